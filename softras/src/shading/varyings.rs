use glam::{Vec2, Vec3, Vec4};

use crate::foundation::core::Color;

/// Per-vertex output of the vertex stage, interpolated across a triangle for the fragment stage.
///
/// Every field is interpolation-eligible and blended with the same weights.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct VertexOutput {
    /// Clip-space position, before the perspective divide.
    pub position_cs: Vec4,
    /// Object-space position.
    pub position_os: Vec4,
    /// World-space normal, `w = 0`.
    pub normal_ws: Vec4,
    /// World-space tangent, `w` the bitangent sign.
    pub tangent: Vec4,
    /// Texture coordinate.
    pub uv: Vec2,
    /// Vertex color.
    pub color: Color,
    /// Unnormalized direction from the surface towards the camera, world space.
    pub view_dir: Vec3,
}

impl VertexOutput {
    /// Linear blend towards `other`; `t = 0` yields `self`.
    pub fn lerp(&self, other: &Self, t: f32) -> Self {
        Self {
            position_cs: self.position_cs.lerp(other.position_cs, t),
            position_os: self.position_os.lerp(other.position_os, t),
            normal_ws: self.normal_ws.lerp(other.normal_ws, t),
            tangent: self.tangent.lerp(other.tangent, t),
            uv: self.uv.lerp(other.uv, t),
            color: self.color.lerp(other.color, t),
            view_dir: self.view_dir.lerp(other.view_dir, t),
        }
    }

    /// Weighted sum of three records; `w` is expected to sum to one.
    pub fn interpolate(v: [&Self; 3], w: Vec3) -> Self {
        Self {
            position_cs: v[0].position_cs * w.x + v[1].position_cs * w.y + v[2].position_cs * w.z,
            position_os: v[0].position_os * w.x + v[1].position_os * w.y + v[2].position_os * w.z,
            normal_ws: v[0].normal_ws * w.x + v[1].normal_ws * w.y + v[2].normal_ws * w.z,
            tangent: v[0].tangent * w.x + v[1].tangent * w.y + v[2].tangent * w.z,
            uv: v[0].uv * w.x + v[1].uv * w.y + v[2].uv * w.z,
            color: v[0].color * w.x + v[1].color * w.y + v[2].color * w.z,
            view_dir: v[0].view_dir * w.x + v[1].view_dir * w.y + v[2].view_dir * w.z,
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/shading/varyings.rs"]
mod tests;
