//! COLLADA (DAE) scene-graph support.
//!
//! This module reads a COLLADA document's visual-scene node tree and
//! reconstructs it as a flat id-to-node mapping with parent back-references
//! and decoded mesh payloads.
//!
//! ## Supported COLLADA Features
//!
//! - `library_visual_scenes`: node hierarchies with translate/rotate/scale
//!   channels
//! - `library_geometries`: vertex position sources resolved through
//!   `instance_geometry` references
//! - Generic source/accessor decoding into named, typed tuples
//!
//! ## Not Supported
//!
//! - Animation (`library_animations`)
//! - Materials, effects, images
//! - Controllers and skinning
//! - Arbitrary rotation axes (each `rotate` element is assumed to rotate
//!   about exactly one of X/Y/Z, keyed by its `sid` suffix)
//!
//! # Example
//!
//! ```ignore
//! use dae_core::collada::{extract_scene, Document};
//!
//! let document = Document::from_file("model.dae")?;
//! let nodes = extract_scene(&document, "Scene")?;
//! for (id, node) in &nodes {
//!     println!("{}: pos {:?}, parent {:?}", id, node.position, node.parent);
//! }
//! ```

use thiserror::Error;

pub mod xml;

mod document;
mod scene;
mod source;
mod types;

pub use document::*;
pub use scene::*;
pub use source::*;
pub use types::*;

/// Errors that can occur while reading a COLLADA document.
///
/// Structural absence (a missing transform channel, an unresolvable
/// geometry reference, an unknown scene id) is never an error; only
/// document-level and value-decoding failures are.
#[derive(Error, Debug)]
pub enum ExtractError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("XML error: {0}")]
    Xml(#[from] xmltree::ParseError),

    #[error("\"{0}\" doesn't look like a COLLADA file")]
    NotCollada(String),

    #[error("invalid float value '{0}'")]
    InvalidFloat(String),

    #[error("unsupported accessor param type '{0}'")]
    UnknownParamType(String),

    #[error("rotate element holds {0} values, expected at least 4")]
    MalformedRotate(usize),
}

/// Result type for extraction operations.
pub type ExtractResult<T> = Result<T, ExtractError>;
