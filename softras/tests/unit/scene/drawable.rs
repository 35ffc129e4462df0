use super::*;
use crate::mesh::primitives;
use crate::shading::builtin::{AlphaBlendShader, UnlitShader};
use crate::shading::state::RenderState;

fn at(name: &str, z: f32, queue: RenderQueue) -> Drawable {
    let program = ShaderProgram::new(UnlitShader::default()).with_state(RenderState {
        queue,
        ..RenderState::default()
    });
    Drawable::new(name, Arc::new(primitives::quad()), program)
        .with_transform(Transform::from_position(Vec3::new(0.0, 0.0, z)))
}

fn names(ds: &[Drawable]) -> Vec<&str> {
    ds.iter().map(|d| d.name.as_str()).collect()
}

#[test]
fn set_transform_recomputes_model_matrix() {
    let mut d = at("q", 0.0, RenderQueue::GEOMETRY);
    assert_eq!(d.model_matrix().w_axis.truncate(), Vec3::ZERO);
    d.set_transform(Transform {
        position: Vec3::new(1.0, 2.0, 3.0),
        scale: Vec3::splat(2.0),
        ..Transform::default()
    });
    assert_eq!(d.model_matrix().transform_point3(Vec3::X), Vec3::new(3.0, 2.0, 3.0));
    assert_eq!(d.distance_to(Vec3::new(1.0, 2.0, 0.0)), 3.0);
}

#[test]
fn set_model_matrix_keeps_transform_in_sync() {
    let mut d = at("q", 0.0, RenderQueue::GEOMETRY);
    let t = Transform {
        position: Vec3::new(-1.0, 0.5, 4.0),
        rotation_deg: Vec3::new(0.0, 90.0, 0.0),
        scale: Vec3::ONE,
    };
    d.set_model_matrix(t.to_matrix());
    let back = d.transform();
    assert!((back.position - t.position).length() < 1e-5);
    assert!((back.rotation_deg.y - 90.0).abs() < 1e-3);
}

#[test]
fn opaque_front_to_back_transparent_back_to_front() {
    let mut ds = vec![
        at("glass_near", 2.0, RenderQueue::TRANSPARENT),
        at("wall_far", 9.0, RenderQueue::GEOMETRY),
        at("hud", 1.0, RenderQueue::OVERLAY),
        at("glass_far", 8.0, RenderQueue::TRANSPARENT),
        at("sky", 50.0, RenderQueue::BACKGROUND),
        at("wall_near", 3.0, RenderQueue::GEOMETRY),
        at("cutout", 5.0, RenderQueue::ALPHA_TEST),
    ];
    sort_drawables(&mut ds, Vec3::ZERO);
    assert_eq!(
        names(&ds),
        vec!["sky", "wall_near", "wall_far", "cutout", "glass_far", "glass_near", "hud"]
    );
}

#[test]
fn queue_comes_from_program_state() {
    let d = Drawable::new(
        "t",
        Arc::new(primitives::triangle()),
        ShaderProgram::new(AlphaBlendShader::default()),
    );
    assert_eq!(d.queue(), RenderQueue::TRANSPARENT);
}
