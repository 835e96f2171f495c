//! DAE Import - apply COLLADA scene metadata to a host 3D application.
//!
//! The host's own DAE importer brings in meshes and materials as an
//! opaque step; it does not expose the document's hierarchy or the
//! axis/scale conventions it was authored with. This crate re-walks the
//! same file with `dae_core`, correlates the extracted nodes to host
//! actors by name, and applies three user-configurable corrections:
//!
//! - **Axis**: a fixed linear conversion (currently Z-up to Y-up) applied
//!   to actor positions and every mesh vertex
//! - **Scale**: a uniform divisor applied alongside the axis conversion
//! - **Hierarchy**: grouping actors for mesh-less nodes plus native
//!   reparenting to mirror the document's node tree
//!
//! The host sits behind the [`host::HostScene`] trait; [`host::MemoryHost`]
//! is an in-memory stand-in used by the CLI driver and the tests.

pub mod adjust;
pub mod host;
pub mod import;
pub mod options;

// Re-export commonly used types
pub use host::{HostError, HostScene, MemoryHost};
pub use import::{apply_adjustments, run_import, ImportError, ImportSummary};
pub use options::{AxisPreset, ImportOptions};
