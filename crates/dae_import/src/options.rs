//! Import adjustment options.
//!
//! These are plain data handed over by whatever collects them (a dialog,
//! a CLI, a JSON file); defaults mirror a Blender-style Z-up export into
//! a Y-up host with its unit-per-meter divisor.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::import::ImportError;

/// Named axis-conversion presets. A closed enum: only `Z_UP` carries a
/// conversion matrix, anything else falls back to identity.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum AxisPreset {
    #[serde(rename = "Z_UP")]
    ZUp,
    #[serde(rename = "Y_UP")]
    YUp,
}

impl std::str::FromStr for AxisPreset {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Z_UP" => Ok(Self::ZUp),
            "Y_UP" => Ok(Self::YUp),
            _ => Err(format!("Invalid axis preset: {}", s)),
        }
    }
}

/// User-facing import adjustments.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ImportOptions {
    /// Axis conversion, `None` to leave positions untouched.
    pub adjust_axis: Option<AxisPreset>,

    /// Uniform scale divisor as the user's decimal string, parsed at
    /// application time. `None` disables scaling.
    pub adjust_scale: Option<String>,

    /// Recreate the document's parent/child hierarchy in the host.
    pub adjust_hierarchy: bool,
}

impl Default for ImportOptions {
    fn default() -> Self {
        Self {
            adjust_axis: Some(AxisPreset::ZUp),
            adjust_scale: Some("2.62128".to_string()),
            adjust_hierarchy: true,
        }
    }
}

impl ImportOptions {
    /// Load options from a JSON file.
    pub fn from_json_file<P: AsRef<Path>>(path: P) -> Result<Self, ImportError> {
        let content = std::fs::read_to_string(path)?;
        Ok(serde_json::from_str(&content)?)
    }

    /// True when neither axis nor scale adjustment is active.
    pub fn transform_disabled(&self) -> bool {
        self.adjust_axis.is_none() && self.adjust_scale.is_none()
    }
}
