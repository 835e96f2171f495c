//! The host-application boundary.
//!
//! Everything this crate needs from the target 3D application is the
//! small actor surface in [`HostScene`]: run the native importer, look
//! actors up by name, move them, rewrite their vertices, create grouping
//! actors, and reparent. [`MemoryHost`] implements the same surface over
//! a plain map so the pipeline can run end to end without a host.

use std::collections::HashMap;
use std::path::Path;

use glam::Vec3;
use thiserror::Error;

use dae_core::collada::{extract_scene, Document};

/// Errors surfaced by the host boundary. Per-actor failures are expected
/// and tolerated by the batch; only the native importer itself is fatal.
#[derive(Error, Debug)]
pub enum HostError {
    #[error("no actor named '{0}' in the host scene")]
    NoSuchActor(String),

    #[error("native importer failed: {0}")]
    Import(String),
}

/// The host application's scene-actor API.
pub trait HostScene {
    /// The host's own opaque DAE import: meshes, materials, actors.
    fn import_native(&mut self, path: &Path) -> Result<(), HostError>;

    fn has_actor(&self, name: &str) -> bool;

    fn actor_position(&self, name: &str) -> Result<Vec3, HostError>;

    fn set_actor_position(&mut self, name: &str, position: Vec3) -> Result<(), HostError>;

    /// Apply `f` to every vertex of the actor's geometry. Actors without
    /// geometry succeed without doing anything.
    fn update_vertices(
        &mut self,
        name: &str,
        f: &mut dyn FnMut(Vec3) -> Vec3,
    ) -> Result<(), HostError>;

    /// Create an empty grouping actor under the given name and hand it
    /// back by that name directly.
    fn create_grouping(&mut self, name: &str) -> Result<(), HostError>;

    fn set_parent(&mut self, child: &str, parent: &str) -> Result<(), HostError>;
}

/// One actor in the in-memory host scene.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct MemoryActor {
    pub position: Vec3,
    pub vertices: Vec<Vec3>,
    pub parent: Option<String>,
    pub grouping: bool,
}

/// In-memory [`HostScene`] used by the CLI driver and the tests.
///
/// Its native importer materializes an actor for every scene node that
/// carries geometry, with positions and vertices in raw document
/// coordinates, which is exactly the state a real host leaves behind
/// before the adjustment pass runs.
#[derive(Debug, Default)]
pub struct MemoryHost {
    actors: HashMap<String, MemoryActor>,
    scene_id: String,
}

impl MemoryHost {
    pub fn new(scene_id: impl Into<String>) -> Self {
        Self {
            actors: HashMap::new(),
            scene_id: scene_id.into(),
        }
    }

    /// Materialize actors from an already-parsed document; the path-based
    /// `import_native` goes through here.
    pub fn load_document(&mut self, document: &Document) -> Result<(), HostError> {
        let nodes = extract_scene(document, &self.scene_id)
            .map_err(|err| HostError::Import(err.to_string()))?;

        for node in nodes.values() {
            let mesh = match &node.mesh {
                Some(mesh) => mesh,
                None => continue,
            };
            let name = match node.label() {
                Some(label) => label.to_string(),
                None => continue,
            };
            let actor = MemoryActor {
                position: node.position,
                vertices: mesh.positions().unwrap_or_default(),
                parent: None,
                grouping: false,
            };
            self.actors.insert(name, actor);
        }

        log::debug!("native import materialized {} actors", self.actors.len());
        Ok(())
    }

    pub fn insert_actor(&mut self, name: impl Into<String>, actor: MemoryActor) {
        self.actors.insert(name.into(), actor);
    }

    pub fn actor(&self, name: &str) -> Option<&MemoryActor> {
        self.actors.get(name)
    }

    pub fn actor_count(&self) -> usize {
        self.actors.len()
    }

    pub fn actors(&self) -> impl Iterator<Item = (&str, &MemoryActor)> {
        self.actors.iter().map(|(name, actor)| (name.as_str(), actor))
    }

    fn actor_mut(&mut self, name: &str) -> Result<&mut MemoryActor, HostError> {
        self.actors
            .get_mut(name)
            .ok_or_else(|| HostError::NoSuchActor(name.to_string()))
    }
}

impl HostScene for MemoryHost {
    fn import_native(&mut self, path: &Path) -> Result<(), HostError> {
        let document =
            Document::from_file(path).map_err(|err| HostError::Import(err.to_string()))?;
        self.load_document(&document)
    }

    fn has_actor(&self, name: &str) -> bool {
        self.actors.contains_key(name)
    }

    fn actor_position(&self, name: &str) -> Result<Vec3, HostError> {
        self.actors
            .get(name)
            .map(|actor| actor.position)
            .ok_or_else(|| HostError::NoSuchActor(name.to_string()))
    }

    fn set_actor_position(&mut self, name: &str, position: Vec3) -> Result<(), HostError> {
        self.actor_mut(name)?.position = position;
        Ok(())
    }

    fn update_vertices(
        &mut self,
        name: &str,
        f: &mut dyn FnMut(Vec3) -> Vec3,
    ) -> Result<(), HostError> {
        let actor = self.actor_mut(name)?;
        for vertex in &mut actor.vertices {
            *vertex = f(*vertex);
        }
        Ok(())
    }

    fn create_grouping(&mut self, name: &str) -> Result<(), HostError> {
        self.actors.insert(
            name.to_string(),
            MemoryActor {
                grouping: true,
                ..Default::default()
            },
        );
        Ok(())
    }

    fn set_parent(&mut self, child: &str, parent: &str) -> Result<(), HostError> {
        if !self.actors.contains_key(parent) {
            return Err(HostError::NoSuchActor(parent.to_string()));
        }
        self.actor_mut(child)?.parent = Some(parent.to_string());
        Ok(())
    }
}
