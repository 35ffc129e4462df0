use glam::{EulerRot, Mat4, Quat, Vec3};

/// Placement of a drawable in world space.
///
/// Rotation is given as Euler angles in degrees and applied Z first, then X, then Y.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct Transform {
    /// World-space translation.
    pub position: Vec3,
    /// Euler angles in degrees.
    pub rotation_deg: Vec3,
    /// Per-axis scale.
    pub scale: Vec3,
}

impl Default for Transform {
    fn default() -> Self {
        Self {
            position: Vec3::ZERO,
            rotation_deg: Vec3::ZERO,
            scale: Vec3::ONE,
        }
    }
}

impl Transform {
    /// Identity rotation and scale at `position`.
    pub fn from_position(position: Vec3) -> Self {
        Self {
            position,
            ..Self::default()
        }
    }

    /// Rotation as a quaternion.
    pub fn rotation(self) -> Quat {
        let r = self.rotation_deg;
        Quat::from_euler(
            EulerRot::YXZ,
            r.y.to_radians(),
            r.x.to_radians(),
            r.z.to_radians(),
        )
    }

    /// Model matrix composed as `translate * rotate * scale`.
    pub fn to_matrix(self) -> Mat4 {
        Mat4::from_scale_rotation_translation(self.scale, self.rotation(), self.position)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/transform/model.rs"]
mod tests;
