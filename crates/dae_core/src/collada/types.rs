//! Scene-graph types reconstructed from a COLLADA document.

use glam::Vec3;

/// A single decoded component of a source tuple.
///
/// COLLADA accessors declare a closed vocabulary of param types; only
/// floats and names survive decoding.
#[derive(Clone, Debug, PartialEq)]
pub enum Value {
    Float(f32),
    Name(String),
}

impl Value {
    pub fn as_float(&self) -> Option<f32> {
        match self {
            Value::Float(value) => Some(*value),
            Value::Name(_) => None,
        }
    }

    pub fn as_name(&self) -> Option<&str> {
        match self {
            Value::Name(name) => Some(name),
            Value::Float(_) => None,
        }
    }
}

/// Decoded vertex positions of a geometry referenced by a scene node.
///
/// `fields` holds the accessor's param names, lower-cased and in declared
/// order; each tuple in `vertices` carries one [`Value`] per field. No
/// positional assumption is made about the component order, it follows
/// whatever the accessor declares (typically x/y/z).
#[derive(Clone, Debug, Default, PartialEq)]
pub struct DaeMesh {
    pub fields: Vec<String>,
    pub vertices: Vec<Vec<Value>>,
}

impl DaeMesh {
    /// Tuple slot of a lower-cased field name.
    pub fn field_index(&self, name: &str) -> Option<usize> {
        self.fields.iter().position(|field| field == name)
    }

    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    /// Vertices as 3D points, located via the declared x/y/z field names.
    ///
    /// Returns `None` if the accessor does not declare all three axes.
    pub fn positions(&self) -> Option<Vec<Vec3>> {
        let x = self.field_index("x")?;
        let y = self.field_index("y")?;
        let z = self.field_index("z")?;
        Some(
            self.vertices
                .iter()
                .map(|tuple| {
                    Vec3::new(
                        tuple.get(x).and_then(Value::as_float).unwrap_or(0.0),
                        tuple.get(y).and_then(Value::as_float).unwrap_or(0.0),
                        tuple.get(z).and_then(Value::as_float).unwrap_or(0.0),
                    )
                })
                .collect(),
        )
    }
}

/// One node of a COLLADA visual scene.
///
/// Nodes are collected into a flat id-keyed mapping; the hierarchy is
/// recoverable through the `parent` back-reference, which names the
/// enclosing node's id (parents are always inserted before their
/// children, the traversal is top-down).
#[derive(Clone, Debug, PartialEq)]
pub struct DaeNode {
    /// `id` attribute, unique within a document.
    pub id: Option<String>,

    /// `name` attribute, optional and possibly non-unique. Used to match
    /// the node against its host-side counterpart.
    pub name: Option<String>,

    /// Translation channel (`translate` with `sid="location"`).
    pub position: Vec3,

    /// Per-axis rotation angles in degrees, collapsed from the up to
    /// three `rotate` elements COLLADA emits per node.
    pub rotation: Vec3,

    /// Scale channel (`scale` with `sid="scale"`).
    pub scale: Vec3,

    /// Id of the enclosing scene node, `None` at scene roots.
    pub parent: Option<String>,

    /// Decoded geometry, present only when the node's
    /// `instance_geometry` reference resolves.
    pub mesh: Option<DaeMesh>,
}

impl DaeNode {
    pub fn new(id: Option<String>, name: Option<String>) -> Self {
        Self {
            id,
            name,
            position: Vec3::ZERO,
            rotation: Vec3::ZERO,
            scale: Vec3::ONE,
            parent: None,
            mesh: None,
        }
    }

    /// Display label used for host-actor correlation: the `name`
    /// attribute when present, otherwise the `id`.
    pub fn label(&self) -> Option<&str> {
        self.name.as_deref().or(self.id.as_deref())
    }
}

impl Default for DaeNode {
    fn default() -> Self {
        Self::new(None, None)
    }
}
