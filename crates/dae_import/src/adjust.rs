//! Axis and scale correction math.

use glam::{Mat3, Vec3};

use crate::import::ImportError;
use crate::options::{AxisPreset, ImportOptions};

/// Host and document already agree on axes.
pub const AXIS_IDENTITY: Mat3 = Mat3::IDENTITY;

/// Z-up document into a Y-up host: (x, y, z) -> (x, z, -y).
pub const AXIS_Z_UP: Mat3 = Mat3::from_cols(
    Vec3::new(1.0, 0.0, 0.0),
    Vec3::new(0.0, 0.0, -1.0),
    Vec3::new(0.0, 1.0, 0.0),
);

/// Resolve the options into a conversion matrix and a uniform scale
/// factor. A malformed scale divisor is fatal; a preset without a
/// conversion entry falls back to identity.
pub fn conversion(options: &ImportOptions) -> Result<(Mat3, f32), ImportError> {
    let matrix = match options.adjust_axis {
        Some(AxisPreset::ZUp) => AXIS_Z_UP,
        Some(AxisPreset::YUp) | None => AXIS_IDENTITY,
    };

    let scale = match &options.adjust_scale {
        Some(text) => {
            let divisor: f32 = text
                .trim()
                .parse()
                .map_err(|_| ImportError::InvalidScale(text.clone()))?;
            1.0 / divisor
        }
        None => 1.0,
    };

    Ok((matrix, scale))
}

/// Apply the conversion to one point. Used for actor positions and for
/// every vertex of an actor's mesh.
pub fn adjust_point(matrix: Mat3, scale: f32, point: Vec3) -> Vec3 {
    matrix * point * scale
}
