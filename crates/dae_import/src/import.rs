//! Import orchestration.
//!
//! The pipeline: parse and extract the COLLADA scene graph (fatal
//! taxonomy lives in `dae_core`), hand the file to the host's native
//! importer, then walk the extracted nodes applying axis/scale and
//! hierarchy corrections. Everything past extraction is best-effort: a
//! node with no host counterpart, or a host call failing for one node,
//! is logged and skipped so the rest of the batch completes.

use std::collections::HashMap;
use std::path::Path;

use glam::Mat3;
use thiserror::Error;

use dae_core::collada::{extract_scene, DaeNode, Document, ExtractError};

use crate::adjust;
use crate::host::{HostError, HostScene};
use crate::options::ImportOptions;

/// Errors that abort the whole import.
#[derive(Error, Debug)]
pub enum ImportError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Extract(#[from] ExtractError),

    #[error("invalid options: {0}")]
    Options(#[from] serde_json::Error),

    #[error("invalid scale divisor '{0}'")]
    InvalidScale(String),

    #[error(transparent)]
    Host(#[from] HostError),
}

/// What the adjustment pass did, for reporting.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ImportSummary {
    /// Nodes extracted from the document.
    pub nodes: usize,

    /// Actors whose position and vertices were corrected.
    pub adjusted: usize,

    /// Grouping actors created for mesh-less nodes.
    pub groupings: usize,

    /// Actors reparented to mirror the document hierarchy.
    pub reparented: usize,

    /// Nodes skipped after a correlation or host failure.
    pub skipped: usize,
}

/// Run the full import against a host.
pub fn run_import(
    host: &mut dyn HostScene,
    path: &Path,
    scene_id: &str,
    options: &ImportOptions,
) -> Result<ImportSummary, ImportError> {
    let document = Document::from_file(path)?;
    let nodes = extract_scene(&document, scene_id)?;
    log::info!(
        "extracted {} nodes from '{}' scene '{}'",
        nodes.len(),
        path.display(),
        scene_id
    );

    host.import_native(path)?;

    apply_adjustments(host, &nodes, options)
}

/// Apply axis, scale, and hierarchy corrections to already-imported
/// actors. Fatal only for a malformed scale divisor; every per-node
/// failure is logged and counted in `skipped`.
pub fn apply_adjustments(
    host: &mut dyn HostScene,
    nodes: &HashMap<String, DaeNode>,
    options: &ImportOptions,
) -> Result<ImportSummary, ImportError> {
    let (matrix, scale) = adjust::conversion(options)?;

    let mut summary = ImportSummary {
        nodes: nodes.len(),
        ..Default::default()
    };

    // Groupings first: mesh-less nodes have no actor from the native
    // import, and the reparenting pass needs them to exist.
    if options.adjust_hierarchy {
        for node in nodes.values().filter(|node| node.mesh.is_none()) {
            let label = match node.label() {
                Some(label) => label,
                None => continue,
            };
            match host.create_grouping(label) {
                Ok(()) => summary.groupings += 1,
                // Counted in `skipped` by the main loop, where the actor
                // lookup misses.
                Err(err) => log::warn!("could not create grouping '{}': {}", label, err),
            }
        }
    }

    for node in nodes.values() {
        let label = match node.label() {
            Some(label) => label,
            None => {
                summary.skipped += 1;
                continue;
            }
        };

        if !host.has_actor(label) {
            log::warn!("no host actor matches '{}'; skipping", label);
            summary.skipped += 1;
            continue;
        }

        if let Err(err) = adjust_actor(host, node, label, nodes, options, matrix, scale, &mut summary)
        {
            log::warn!("host error on '{}': {}", label, err);
            summary.skipped += 1;
        }
    }

    log::info!(
        "import finished: {} adjusted, {} groupings, {} reparented, {} skipped",
        summary.adjusted,
        summary.groupings,
        summary.reparented,
        summary.skipped
    );
    Ok(summary)
}

#[allow(clippy::too_many_arguments)]
fn adjust_actor(
    host: &mut dyn HostScene,
    node: &DaeNode,
    label: &str,
    nodes: &HashMap<String, DaeNode>,
    options: &ImportOptions,
    matrix: Mat3,
    scale: f32,
    summary: &mut ImportSummary,
) -> Result<(), HostError> {
    if !options.transform_disabled() {
        let position = host.actor_position(label)?;
        host.set_actor_position(label, adjust::adjust_point(matrix, scale, position))?;
        host.update_vertices(label, &mut |vertex| adjust::adjust_point(matrix, scale, vertex))?;
        summary.adjusted += 1;
    }

    if options.adjust_hierarchy {
        let parent_label = node
            .parent
            .as_deref()
            .and_then(|id| nodes.get(id))
            .and_then(DaeNode::label);
        if let Some(parent_label) = parent_label {
            host.set_parent(label, parent_label)?;
            summary.reparented += 1;
        }
    }

    Ok(())
}
