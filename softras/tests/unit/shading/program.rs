use super::*;
use crate::shading::state::{BlendMode, RenderQueue};
use glam::Vec2;

#[derive(Debug)]
struct Flat;

impl Shader for Flat {
    fn name(&self) -> &'static str {
        "flat"
    }

    fn default_state(&self) -> RenderState {
        RenderState {
            queue: RenderQueue::OVERLAY,
            ..RenderState::default()
        }
    }

    fn fragment(&self, _input: &VertexOutput, u: &Uniforms<'_>) -> Option<Color> {
        Some(u.base_color)
    }
}

#[test]
fn program_starts_from_shader_default_state() {
    let p = ShaderProgram::new(Flat);
    assert_eq!(p.state.queue, RenderQueue::OVERLAY);
    assert_eq!(p.state.blend, BlendMode::None);
    assert_eq!(p.base_color, WHITE);
    assert_eq!(p.shader().name(), "flat");
}

#[test]
fn bind_matrices_replaces_previous_values() {
    let mut p = ShaderProgram::new(Flat);
    p.bind_matrices(Mat4::from_translation(Vec3::X), Mat4::from_scale(Vec3::splat(2.0)));
    let first = p.matrices().mvp;
    assert_eq!(first.transform_point3(Vec3::ZERO), Vec3::new(2.0, 0.0, 0.0));

    p.bind_matrices(Mat4::IDENTITY, Mat4::IDENTITY);
    assert_eq!(p.matrices().mvp, Mat4::IDENTITY);
    assert_eq!(p.matrices().model, Mat4::IDENTITY);
}

#[test]
fn standard_vertex_fills_world_space_fields() {
    let mut p = ShaderProgram::new(Flat);
    p.bind_matrices(
        Mat4::from_scale_rotation_translation(
            Vec3::new(2.0, 1.0, 1.0),
            glam::Quat::IDENTITY,
            Vec3::new(0.0, 0.0, 5.0),
        ),
        Mat4::IDENTITY,
    );
    let frame = FrameContext {
        camera_position: Vec3::ZERO,
        ..FrameContext::default()
    };
    let v = Vertex::new(Vec3::new(1.0, 0.0, 0.0), Vec2::new(0.25, 0.75), Vec3::new(1.0, 1.0, 0.0).normalize());
    let out = p.shader().vertex(&v, &p.uniforms(&frame));

    assert_eq!(out.position_cs, Vec4::new(2.0, 0.0, 5.0, 1.0));
    assert_eq!(out.position_os, Vec4::new(1.0, 0.0, 0.0, 1.0));
    assert_eq!(out.view_dir, Vec3::new(-2.0, 0.0, -5.0));
    assert_eq!(out.uv, Vec2::new(0.25, 0.75));
    // Non-uniform scale squashes the normal along the stretched axis.
    let n = out.normal_ws.truncate();
    assert!((n.length() - 1.0).abs() < 1e-5);
    assert!(n.y > n.x);
    assert_eq!(out.normal_ws.w, 0.0);
}
