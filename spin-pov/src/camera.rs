use nalgebra::{
    Point3,
    Vector3,
};

use crate::Error;

/// Camera looking at the origin from a point that sees the whole system.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CameraPlacement {
    pub position: Point3<f64>,
    pub look_at: Point3<f64>,
}

impl CameraPlacement {
    /// Places the camera along the normalized `(1/dx, 1/dy, 1/dz)`, at
    /// `distance_factor` times the length of the bounding box diagonal.
    ///
    /// Long axes get a small component, so the camera looks across them and
    /// elongated systems still fit in the picture.
    pub fn frame_extents(extents: &Vector3<f64>, distance_factor: f64) -> Result<Self, Error> {
        if !extents.iter().all(|d| d.is_finite() && *d > 0.0) {
            return Err(Error::DegenerateExtents { extents: *extents });
        }

        // min/d is in (0, 1], so the reciprocals can't overflow
        let min = extents.min();
        let direction = extents.map(|d| min / d).normalize();
        let distance = distance_factor * scaled_norm(extents);

        let position = direction * distance;
        if !position.iter().all(|c| c.is_finite()) || position == Vector3::zeros() {
            return Err(Error::DegenerateExtents { extents: *extents });
        }

        Ok(Self {
            position: Point3::from(position),
            look_at: Point3::origin(),
        })
    }
}

/// Euclidean norm that doesn't overflow or underflow in the squares.
fn scaled_norm(vector: &Vector3<f64>) -> f64 {
    let max = vector.amax();
    if max == 0.0 {
        0.0
    }
    else {
        max * (vector / max).norm()
    }
}
