use glam::{Vec2, Vec3, Vec4};

use crate::foundation::core::{Color, WHITE};

/// One model-space vertex with every attribute the shading stages may read.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Vertex {
    /// Model-space position.
    pub position: Vec3,
    /// Texture coordinate, `v` up.
    pub uv: Vec2,
    /// Model-space normal.
    pub normal: Vec3,
    /// `xyz` tangent direction, `w` bitangent sign.
    pub tangent: Vec4,
    /// Vertex color, white by default.
    pub color: Color,
}

impl Default for Vertex {
    fn default() -> Self {
        Self {
            position: Vec3::ZERO,
            uv: Vec2::ZERO,
            normal: Vec3::ZERO,
            tangent: Vec4::ZERO,
            color: WHITE,
        }
    }
}

impl Vertex {
    /// Position, uv and normal; tangent zero and color white.
    pub fn new(position: Vec3, uv: Vec2, normal: Vec3) -> Self {
        Self {
            position,
            uv,
            normal,
            ..Self::default()
        }
    }

    /// A vertex with only a position set.
    pub fn from_position(position: Vec3) -> Self {
        Self {
            position,
            ..Self::default()
        }
    }

    /// Builder for [`Vertex::color`].
    pub fn with_color(mut self, color: Color) -> Self {
        self.color = color;
        self
    }

    /// Builder for [`Vertex::tangent`].
    pub fn with_tangent(mut self, tangent: Vec4) -> Self {
        self.tangent = tangent;
        self
    }
}
