use super::*;

fn record(k: f32) -> VertexOutput {
    VertexOutput {
        position_cs: Vec4::new(k, 2.0 * k, 3.0 * k, 1.0),
        position_os: Vec4::splat(k),
        normal_ws: Vec4::new(0.0, k, 0.0, 0.0),
        tangent: Vec4::new(k, 0.0, 0.0, 1.0),
        uv: Vec2::new(k, 1.0 - k),
        color: Vec4::new(k, k, k, 1.0),
        view_dir: Vec3::new(0.0, 0.0, -k),
    }
}

#[test]
fn lerp_endpoints_and_midpoint() {
    let a = record(0.0);
    let b = record(1.0);
    assert_eq!(a.lerp(&b, 0.0), a);
    assert_eq!(a.lerp(&b, 1.0), b);
    let mid = a.lerp(&b, 0.5);
    assert_eq!(mid.uv, Vec2::new(0.5, 0.5));
    assert_eq!(mid.view_dir, Vec3::new(0.0, 0.0, -0.5));
    assert_eq!(mid.position_cs, Vec4::new(0.5, 1.0, 1.5, 1.0));
}

#[test]
fn interpolate_selects_vertex_for_unit_weights() {
    let (a, b, c) = (record(1.0), record(2.0), record(4.0));
    assert_eq!(VertexOutput::interpolate([&a, &b, &c], Vec3::Y), b);
    let mixed = VertexOutput::interpolate([&a, &b, &c], Vec3::new(0.5, 0.25, 0.25));
    assert!((mixed.uv.x - 2.0).abs() < 1e-6);
    assert!((mixed.color.w - 1.0).abs() < 1e-6);
}
