//! softras is a deterministic CPU software rasterizer.
//!
//! It reimplements the geometry and pixel stages of a GPU pipeline: homogeneous clip-space
//! transform, frustum clipping, bounding-box/barycentric triangle rasterization,
//! perspective-correct interpolation, depth testing, MSAA with resolve, programmable shading and
//! blending.
//!
//! Two ways in:
//!
//! - Low level: build [`Drawable`]s from a [`Mesh`] and a [`ShaderProgram`], then drive a
//!   [`Rasterizer`] with [`Rasterizer::clear`] / [`Rasterizer::render`].
//! - Scene level: load a JSON [`Scene`], create a [`RenderSession`] and call
//!   [`RenderSession::render_frame`].
#![forbid(unsafe_code)]
#![deny(missing_docs)]
#![allow(clippy::missing_docs_in_private_items)]

mod foundation;

pub(crate) mod mesh;
pub(crate) mod pipeline;
pub(crate) mod render;
pub(crate) mod scene;
pub(crate) mod session;
pub(crate) mod shading;
pub(crate) mod transform;

pub use crate::foundation::core::{
    BLACK, BLUE, Color, GREEN, Mat4, RED, TRANSPARENT, Vec2, Vec3, Vec4, Viewport, WHITE,
    color_to_rgba8, rgba8_to_color,
};
pub use crate::foundation::error::{SoftrasError, SoftrasResult};
pub use crate::foundation::math::FrameFingerprint;

pub use crate::mesh::buffer::{IndexBuffer, Mesh, VertexBuffer};
pub use crate::mesh::primitives;
pub use crate::mesh::vertex::Vertex;
pub use crate::pipeline::blend::{blend_colors, depth_test};
pub use crate::pipeline::clip::{CLIP_PLANES, ClipPolygon, clip_triangle, fan_triangles};
pub use crate::render::framebuffer::{ClearFlags, FrameBuffer, FrameRGBA};
pub use crate::render::msaa::MsaaMode;
pub use crate::render::rasterizer::{PrimitiveMode, RasterStats, Rasterizer, RasterizerOpts};
pub use crate::scene::camera::{Camera, Projection};
pub use crate::scene::drawable::{Drawable, sort_drawables};
pub use crate::scene::scene::Scene;
pub use crate::session::render_session::{RenderSession, RenderSessionOpts};
pub use crate::shading::builtin::{
    AlphaBlendShader, AlphaTestShader, BlinnPhongShader, NormalShader, SkyboxShader, UnlitShader,
    VertexColorShader,
};
pub use crate::shading::program::{
    DirectionalLight, DrawMatrices, FrameContext, Shader, ShaderProgram, Uniforms, standard_vertex,
};
pub use crate::shading::state::{
    BlendMode, CullMode, RenderQueue, RenderState, RenderStateOverride, ZTest,
};
pub use crate::shading::texture::{CubeFace, Cubemap, Texture, sample_or_white};
pub use crate::shading::varyings::VertexOutput;
pub use crate::transform::model::Transform;
pub use crate::transform::projection::{orthographic, perspective};
pub use crate::transform::space::{
    ScreenPoint, barycentric, clip_to_screen, object_to_clip, object_to_world_dir,
    perspective_correct, signed_area,
};
pub use crate::transform::view::create_view_matrix;
