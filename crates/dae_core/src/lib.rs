//! DAE Core - COLLADA scene-graph extraction.
//!
//! This crate provides:
//!
//! - **Scene graph types**: `DaeNode`, `DaeMesh`, `Value`
//! - **COLLADA support**: namespace-aware document queries, source/accessor
//!   decoding, and visual-scene tree extraction
//!
//! # Example
//!
//! ```ignore
//! use dae_core::collada::{extract_scene, Document};
//!
//! let document = Document::from_file("model.dae")?;
//! let nodes = extract_scene(&document, "Scene")?;
//! println!("Extracted {} scene nodes", nodes.len());
//! ```

pub mod collada;

// Re-export commonly used types
pub use collada::{extract_scene, DaeMesh, DaeNode, Document, ExtractError, Value};
