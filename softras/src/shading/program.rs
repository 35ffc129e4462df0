use std::fmt;

use glam::{Mat3, Mat4, Vec3, Vec4};
use serde::{Deserialize, Serialize};

use crate::foundation::core::{Color, WHITE};
use crate::mesh::vertex::Vertex;
use crate::shading::state::RenderState;
use crate::shading::varyings::VertexOutput;

/// The single directional light of a frame.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DirectionalLight {
    /// Direction the light travels in, world space.
    pub direction: Vec3,
    /// Linear RGB color.
    pub color: Vec3,
    /// Scale applied to `color`.
    pub intensity: f32,
}

impl Default for DirectionalLight {
    fn default() -> Self {
        Self {
            direction: Vec3::new(0.0, -1.0, 0.0),
            color: Vec3::ONE,
            intensity: 1.0,
        }
    }
}

/// Per-frame values every shader may read.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FrameContext {
    /// Ambient term added by lit shaders.
    pub ambient: Color,
    /// The frame's light.
    pub light: DirectionalLight,
    /// Eye position, used for view directions.
    pub camera_position: Vec3,
}

impl Default for FrameContext {
    fn default() -> Self {
        Self {
            ambient: Vec4::new(0.1, 0.1, 0.1, 1.0),
            light: DirectionalLight::default(),
            camera_position: Vec3::ZERO,
        }
    }
}

/// Matrices bound by the rasterizer right before a drawable's vertex stage runs.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DrawMatrices {
    /// Model to world.
    pub model: Mat4,
    /// World to clip.
    pub view_projection: Mat4,
    /// Model to clip.
    pub mvp: Mat4,
    /// Inverse transpose of the model matrix's upper 3x3.
    pub normal: Mat3,
}

impl DrawMatrices {
    /// Derive `mvp` and the normal matrix from `model` and `view_projection`.
    pub fn new(model: Mat4, view_projection: Mat4) -> Self {
        let linear = Mat3::from_mat4(model);
        let normal = if linear.determinant().abs() > f32::EPSILON {
            linear.inverse().transpose()
        } else {
            linear
        };
        Self {
            model,
            view_projection,
            mvp: view_projection * model,
            normal,
        }
    }
}

impl Default for DrawMatrices {
    fn default() -> Self {
        Self::new(Mat4::IDENTITY, Mat4::IDENTITY)
    }
}

/// Everything a shader stage can read for one draw.
#[derive(Clone, Copy, Debug)]
pub struct Uniforms<'a> {
    /// Matrices of the current draw.
    pub matrices: &'a DrawMatrices,
    /// Program base color.
    pub base_color: Color,
    /// Frame-wide values.
    pub frame: &'a FrameContext,
}

/// Programmable stages of a material.
///
/// The vertex stage maps one model-space vertex to a clip-space record; the fragment stage maps an
/// interpolated record to a color, or `None` to discard the fragment.
pub trait Shader: Send + Sync + fmt::Debug {
    /// Short identifier for logs.
    fn name(&self) -> &'static str;

    /// Fixed-function state a program starts with when built around this shader.
    fn default_state(&self) -> RenderState {
        RenderState::default()
    }

    /// Vertex stage. The default is [`standard_vertex`].
    fn vertex(&self, v: &Vertex, u: &Uniforms<'_>) -> VertexOutput {
        standard_vertex(v, u)
    }

    /// Fragment stage. `None` discards the fragment.
    fn fragment(&self, input: &VertexOutput, u: &Uniforms<'_>) -> Option<Color>;
}

/// Model-to-clip transform plus world-space normal, tangent and view direction.
pub fn standard_vertex(v: &Vertex, u: &Uniforms<'_>) -> VertexOutput {
    let position_os = v.position.extend(1.0);
    let position_ws = u.matrices.model * position_os;
    let normal_ws = (u.matrices.normal * v.normal).normalize_or_zero();
    let tangent_ws = u.matrices.model.transform_vector3(v.tangent.truncate());
    VertexOutput {
        position_cs: u.matrices.mvp * position_os,
        position_os,
        normal_ws: normal_ws.extend(0.0),
        tangent: tangent_ws.extend(v.tangent.w),
        uv: v.uv,
        color: v.color,
        view_dir: u.frame.camera_position - position_ws.truncate(),
    }
}

/// A shader plus the fixed-function state and per-draw matrices it runs with.
pub struct ShaderProgram {
    /// Cull, depth, blend and queue settings.
    pub state: RenderState,
    /// Tint passed to the shader as a uniform.
    pub base_color: Color,
    matrices: DrawMatrices,
    shader: Box<dyn Shader>,
}

impl fmt::Debug for ShaderProgram {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ShaderProgram")
            .field("shader", &self.shader.name())
            .field("state", &self.state)
            .field("base_color", &self.base_color)
            .finish()
    }
}

impl ShaderProgram {
    /// Wrap `shader` with its default state and a white base color.
    pub fn new(shader: impl Shader + 'static) -> Self {
        Self::from_boxed(Box::new(shader))
    }

    /// Like [`ShaderProgram::new`] for an already boxed shader.
    pub fn from_boxed(shader: Box<dyn Shader>) -> Self {
        Self {
            state: shader.default_state(),
            base_color: WHITE,
            matrices: DrawMatrices::default(),
            shader,
        }
    }

    /// Replace the fixed-function state.
    pub fn with_state(mut self, state: RenderState) -> Self {
        self.state = state;
        self
    }

    /// Replace the base color.
    pub fn with_base_color(mut self, color: Color) -> Self {
        self.base_color = color;
        self
    }

    /// The programmable stages.
    pub fn shader(&self) -> &dyn Shader {
        self.shader.as_ref()
    }

    /// Matrices bound for the current draw.
    pub fn matrices(&self) -> &DrawMatrices {
        &self.matrices
    }

    /// Overwrite all per-draw matrices. Called once per drawable per frame.
    pub fn bind_matrices(&mut self, model: Mat4, view_projection: Mat4) {
        self.matrices = DrawMatrices::new(model, view_projection);
    }

    /// Uniform view for one draw.
    pub fn uniforms<'a>(&'a self, frame: &'a FrameContext) -> Uniforms<'a> {
        Uniforms {
            matrices: &self.matrices,
            base_color: self.base_color,
            frame,
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/shading/program.rs"]
mod tests;
