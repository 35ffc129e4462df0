//! Built-in shaders covering the common material cases.

use std::sync::Arc;

use glam::{Vec3, Vec4};

use crate::foundation::core::Color;
use crate::shading::program::{Shader, Uniforms};
use crate::shading::state::{BlendMode, CullMode, RenderQueue, RenderState};
use crate::shading::texture::{Cubemap, Texture, sample_or_white};
use crate::shading::varyings::VertexOutput;

/// `base_color * texture(uv)`.
#[derive(Clone, Debug, Default)]
pub struct UnlitShader {
    /// Optional albedo texture; white when absent.
    pub texture: Option<Arc<Texture>>,
}

impl Shader for UnlitShader {
    fn name(&self) -> &'static str {
        "unlit"
    }

    fn fragment(&self, input: &VertexOutput, u: &Uniforms<'_>) -> Option<Color> {
        Some(u.base_color * sample_or_white(self.texture.as_deref(), input.uv))
    }
}

/// Interpolated vertex color tinted by the base color.
#[derive(Clone, Copy, Debug, Default)]
pub struct VertexColorShader;

impl Shader for VertexColorShader {
    fn name(&self) -> &'static str {
        "vertex_color"
    }

    fn fragment(&self, input: &VertexOutput, u: &Uniforms<'_>) -> Option<Color> {
        Some(input.color * u.base_color)
    }
}

/// Ambient plus Lambert diffuse plus Blinn-Phong specular from the frame's directional light.
#[derive(Clone, Debug)]
pub struct BlinnPhongShader {
    /// Specular exponent.
    pub gloss: f32,
    /// Specular strength.
    pub specular: f32,
    /// Optional albedo texture.
    pub texture: Option<Arc<Texture>>,
}

impl Default for BlinnPhongShader {
    fn default() -> Self {
        Self {
            gloss: 20.0,
            specular: 1.0,
            texture: None,
        }
    }
}

impl Shader for BlinnPhongShader {
    fn name(&self) -> &'static str {
        "blinn_phong"
    }

    fn fragment(&self, input: &VertexOutput, u: &Uniforms<'_>) -> Option<Color> {
        let albedo = u.base_color * sample_or_white(self.texture.as_deref(), input.uv);
        let light = &u.frame.light;
        let radiance = light.color * light.intensity;

        let n = input.normal_ws.truncate().normalize_or_zero();
        let l = (-light.direction).normalize_or_zero();
        let v = input.view_dir.normalize_or_zero();
        let h = (l + v).normalize_or_zero();

        let ambient = u.frame.ambient.truncate() * albedo.truncate();
        let diffuse = radiance * albedo.truncate() * n.dot(l).max(0.0);
        let spec = radiance * self.specular * n.dot(h).max(0.0).powf(self.gloss.max(0.0));

        Some((ambient + diffuse + spec).extend(albedo.w))
    }
}

/// Cutout material: discards fragments whose alpha falls below `cutoff`.
#[derive(Clone, Debug)]
pub struct AlphaTestShader {
    /// Alpha threshold below which fragments are discarded.
    pub cutoff: f32,
    /// Optional albedo texture.
    pub texture: Option<Arc<Texture>>,
}

impl Default for AlphaTestShader {
    fn default() -> Self {
        Self {
            cutoff: 0.5,
            texture: None,
        }
    }
}

impl Shader for AlphaTestShader {
    fn name(&self) -> &'static str {
        "alpha_test"
    }

    fn default_state(&self) -> RenderState {
        RenderState {
            queue: RenderQueue::ALPHA_TEST,
            ..RenderState::default()
        }
    }

    fn fragment(&self, input: &VertexOutput, u: &Uniforms<'_>) -> Option<Color> {
        let c = u.base_color * sample_or_white(self.texture.as_deref(), input.uv);
        (c.w >= self.cutoff).then_some(c)
    }
}

/// Straight-alpha transparent material.
#[derive(Clone, Debug, Default)]
pub struct AlphaBlendShader {
    /// Optional albedo texture.
    pub texture: Option<Arc<Texture>>,
}

impl Shader for AlphaBlendShader {
    fn name(&self) -> &'static str {
        "alpha_blend"
    }

    fn default_state(&self) -> RenderState {
        RenderState {
            queue: RenderQueue::TRANSPARENT,
            blend: BlendMode::AlphaBlend,
            z_write: false,
            ..RenderState::default()
        }
    }

    fn fragment(&self, input: &VertexOutput, u: &Uniforms<'_>) -> Option<Color> {
        Some(u.base_color * sample_or_white(self.texture.as_deref(), input.uv))
    }
}

/// World-space normal remapped to `[0, 1]`.
#[derive(Clone, Copy, Debug, Default)]
pub struct NormalShader;

impl Shader for NormalShader {
    fn name(&self) -> &'static str {
        "normal"
    }

    fn fragment(&self, input: &VertexOutput, _u: &Uniforms<'_>) -> Option<Color> {
        let n = input.normal_ws.truncate().normalize_or_zero();
        Some((n * 0.5 + Vec3::splat(0.5)).extend(1.0))
    }
}

/// Environment cube sampled by object-space position; meant for a cube around the camera.
#[derive(Clone, Debug, Default)]
pub struct SkyboxShader {
    /// Faces sampled by view direction.
    pub cubemap: Arc<Cubemap>,
}

impl Shader for SkyboxShader {
    fn name(&self) -> &'static str {
        "skybox"
    }

    fn default_state(&self) -> RenderState {
        RenderState {
            queue: RenderQueue::BACKGROUND,
            cull: CullMode::None,
            z_write: false,
            ..RenderState::default()
        }
    }

    fn fragment(&self, input: &VertexOutput, u: &Uniforms<'_>) -> Option<Color> {
        let c = self.cubemap.sample(input.position_os.truncate());
        Some(c * Vec4::new(u.base_color.x, u.base_color.y, u.base_color.z, 1.0))
    }
}

#[cfg(test)]
#[path = "../../tests/unit/shading/builtin.rs"]
mod tests;
