//! COLLADA document loading.
//!
//! A [`Document`] wraps a parsed XML tree. Opening one is the only point
//! where fatal document errors can occur: an unreadable file, XML that is
//! not well formed, or a file that never mentions the COLLADA namespace.
//! Everything past this point treats missing structure as optional data.

use std::path::Path;

use xmltree::Element;

use super::xml::COLLADA_NS;
use super::{ExtractError, ExtractResult};

/// A parsed COLLADA document.
#[derive(Debug)]
pub struct Document {
    root: Element,
}

impl Document {
    /// Read and parse a COLLADA file.
    ///
    /// The raw text is pre-checked for the COLLADA namespace before XML
    /// parsing, so an arbitrary XML file is rejected with a distinct
    /// error rather than yielding an empty scene.
    pub fn from_file<P: AsRef<Path>>(path: P) -> ExtractResult<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)?;
        let label = path
            .file_name()
            .and_then(|name| name.to_str())
            .unwrap_or("<unnamed>");
        Self::parse(&content, label)
    }

    /// Parse a COLLADA document from an in-memory string.
    pub fn from_string(content: &str) -> ExtractResult<Self> {
        Self::parse(content, "<string>")
    }

    fn parse(content: &str, label: &str) -> ExtractResult<Self> {
        if !content.contains(COLLADA_NS) {
            return Err(ExtractError::NotCollada(label.to_string()));
        }
        let root = Element::parse(content.as_bytes())?;
        log::debug!("parsed COLLADA document '{}'", label);
        Ok(Self { root })
    }

    /// The document's root element.
    pub fn root(&self) -> &Element {
        &self.root
    }
}
