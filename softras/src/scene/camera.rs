use glam::{Mat4, Vec3};
use serde::{Deserialize, Serialize};

use crate::foundation::error::{SoftrasError, SoftrasResult};
use crate::transform::projection::{orthographic, perspective};
use crate::transform::view::create_view_matrix;

/// Lens model of a [`Camera`]. Distances are along the view direction, in world units.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Projection {
    /// Pinhole camera.
    Perspective {
        /// Vertical field of view in degrees, in `(0, 180)`.
        fov_y_deg: f32,
        /// Near plane, `> 0`.
        near: f32,
        /// Far plane, beyond `near`.
        far: f32,
    },
    /// Parallel projection.
    Orthographic {
        /// Full vertical extent of the view volume.
        height: f32,
        /// Near plane.
        near: f32,
        /// Far plane, beyond `near`.
        far: f32,
    },
}

impl Default for Projection {
    fn default() -> Self {
        Self::Perspective {
            fov_y_deg: 60.0,
            near: 0.3,
            far: 1000.0,
        }
    }
}

impl Projection {
    /// Projection matrix for a viewport with the given aspect ratio.
    pub fn matrix(&self, aspect: f32) -> Mat4 {
        match *self {
            Self::Perspective {
                fov_y_deg,
                near,
                far,
            } => perspective(near, far, fov_y_deg, aspect),
            Self::Orthographic { height, near, far } => orthographic(near, far, height, aspect),
        }
    }

    /// Reject planes and angles that would produce a singular matrix.
    pub fn validate(&self) -> SoftrasResult<()> {
        match *self {
            Self::Perspective {
                fov_y_deg,
                near,
                far,
            } => {
                if !(near > 0.0) {
                    return Err(SoftrasError::validation("perspective near must be > 0"));
                }
                if !(far > near) {
                    return Err(SoftrasError::validation("camera far must be greater than near"));
                }
                if !(fov_y_deg > 0.0 && fov_y_deg < 180.0) {
                    return Err(SoftrasError::validation(
                        "perspective fov_y_deg must be in (0, 180)",
                    ));
                }
            }
            Self::Orthographic { height, near, far } => {
                if !(far > near) {
                    return Err(SoftrasError::validation("camera far must be greater than near"));
                }
                if !(height > 0.0) {
                    return Err(SoftrasError::validation("orthographic height must be > 0"));
                }
            }
        }
        Ok(())
    }
}

/// Viewer placement plus projection. `forward` and `up` need not be unit length or orthogonal.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Camera {
    /// Eye position, world space.
    pub position: Vec3,
    /// Viewing direction.
    pub forward: Vec3,
    /// Approximate up direction.
    pub up: Vec3,
    /// Lens model.
    pub projection: Projection,
}

impl Default for Camera {
    fn default() -> Self {
        Self {
            position: Vec3::ZERO,
            forward: Vec3::Z,
            up: Vec3::Y,
            projection: Projection::default(),
        }
    }
}

impl Camera {
    /// World to view transform.
    pub fn view_matrix(&self) -> Mat4 {
        create_view_matrix(self.position, self.forward, self.up)
    }

    /// `projection * view`.
    pub fn view_projection(&self, aspect: f32) -> Mat4 {
        self.projection.matrix(aspect) * self.view_matrix()
    }

    /// Check the pose and the projection.
    pub fn validate(&self) -> SoftrasResult<()> {
        if !self.position.is_finite() {
            return Err(SoftrasError::validation("camera position must be finite"));
        }
        if !(self.forward.length_squared() > f32::EPSILON) || !self.forward.is_finite() {
            return Err(SoftrasError::validation("camera forward must be non-zero"));
        }
        if !self.up.is_finite() {
            return Err(SoftrasError::validation("camera up must be finite"));
        }
        if self.forward.normalize().cross(self.up).length_squared() <= 1e-8 {
            return Err(SoftrasError::validation(
                "camera up must not be parallel to forward",
            ));
        }
        self.projection.validate()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/scene/camera.rs"]
mod tests;
