use glam::{Vec2, Vec3, Vec4};
use serde::{Deserialize, Serialize};

use crate::foundation::core::{BLACK, Color, Viewport, WHITE};
use crate::render::framebuffer::ClearFlags;
use crate::render::msaa::MsaaMode;
use crate::render::rasterizer::PrimitiveMode;
use crate::scene::camera::Camera;
use crate::shading::program::DirectionalLight;
use crate::shading::state::RenderStateOverride;
use crate::transform::model::Transform;

/// Texture value that selects the built-in checkerboard instead of a file.
pub(crate) const CHECKER_TEXTURE: &str = "checker";

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub(crate) struct SceneDef {
    pub(crate) viewport: Viewport,
    #[serde(default)]
    pub(crate) camera: Camera,
    #[serde(default = "default_ambient")]
    pub(crate) ambient: Color,
    #[serde(default)]
    pub(crate) light: DirectionalLight,
    #[serde(default)]
    pub(crate) clear: ClearDef,
    #[serde(default)]
    pub(crate) msaa: MsaaMode,
    #[serde(default)]
    pub(crate) primitive: PrimitiveMode,
    #[serde(default)]
    pub(crate) objects: Vec<ObjectDef>,
}

fn default_ambient() -> Color {
    Vec4::new(0.1, 0.1, 0.1, 1.0)
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub(crate) enum ClearFlagsDef {
    #[default]
    ColorDepth,
    Depth,
    Nothing,
}

impl ClearFlagsDef {
    pub(crate) fn to_flags(self) -> ClearFlags {
        match self {
            Self::ColorDepth => ClearFlags::ALL,
            Self::Depth => ClearFlags::DEPTH,
            Self::Nothing => ClearFlags::NONE,
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub(crate) struct ClearDef {
    #[serde(default)]
    pub(crate) flags: ClearFlagsDef,
    #[serde(default = "default_clear_color")]
    pub(crate) color: Color,
}

fn default_clear_color() -> Color {
    BLACK
}

impl Default for ClearDef {
    fn default() -> Self {
        Self {
            flags: ClearFlagsDef::default(),
            color: default_clear_color(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub(crate) struct ObjectDef {
    #[serde(default)]
    pub(crate) name: String,
    pub(crate) mesh: MeshDef,
    #[serde(default)]
    pub(crate) transform: Transform,
    #[serde(default)]
    pub(crate) shader: ShaderDef,
    /// Path relative to the assets root, or [`CHECKER_TEXTURE`].
    #[serde(default)]
    pub(crate) texture: Option<String>,
    #[serde(default = "default_base_color")]
    pub(crate) base_color: Color,
    #[serde(default)]
    pub(crate) state: RenderStateOverride,
}

fn default_base_color() -> Color {
    WHITE
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub(crate) enum MeshDef {
    Cube,
    Quad,
    Triangle,
    UvSphere { segments: u32, rings: u32 },
    Inline(InlineMeshDef),
}

/// Explicit geometry. Optional attribute arrays must match `positions` in length when present.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub(crate) struct InlineMeshDef {
    pub(crate) positions: Vec<Vec3>,
    pub(crate) indices: Vec<u32>,
    #[serde(default)]
    pub(crate) uvs: Vec<Vec2>,
    #[serde(default)]
    pub(crate) normals: Vec<Vec3>,
    #[serde(default)]
    pub(crate) colors: Vec<Color>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub(crate) enum ShaderDef {
    #[default]
    Unlit,
    VertexColor,
    BlinnPhong {
        #[serde(default = "default_gloss")]
        gloss: f32,
        #[serde(default = "default_specular")]
        specular: f32,
    },
    AlphaTest {
        #[serde(default = "default_cutoff")]
        cutoff: f32,
    },
    AlphaBlend,
    Normal,
    /// Six face textures in `+X, -X, +Y, -Y, +Z, -Z` order.
    Skybox { faces: Vec<String> },
}

fn default_gloss() -> f32 {
    20.0
}

fn default_specular() -> f32 {
    1.0
}

fn default_cutoff() -> f32 {
    0.5
}

#[cfg(test)]
#[path = "../../tests/unit/scene/model.rs"]
mod tests;
