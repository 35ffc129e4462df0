use super::*;
use glam::Vec3;

fn ndc(m: Mat4, p: Vec3) -> Vec3 {
    let c = m * p.extend(1.0);
    c.truncate() / c.w
}

#[test]
fn perspective_maps_near_and_far_to_ndc_bounds() {
    let m = perspective(0.5, 50.0, 60.0, 16.0 / 9.0);
    assert!((ndc(m, Vec3::new(0.0, 0.0, 0.5)).z + 1.0).abs() < 1e-5);
    assert!((ndc(m, Vec3::new(0.0, 0.0, 50.0)).z - 1.0).abs() < 1e-4);
    // Clip w carries view depth.
    let c = m * Vec4::new(0.0, 0.0, 7.0, 1.0);
    assert!((c.w - 7.0).abs() < 1e-6);
}

#[test]
fn perspective_fov_edge_lands_on_ndc_edge() {
    let m = perspective(0.1, 100.0, 90.0, 2.0);
    // tan(45deg) = 1: at depth 4 the top of the frustum is y = 4, the right edge x = 8.
    let top = ndc(m, Vec3::new(0.0, 4.0, 4.0));
    assert!((top.y - 1.0).abs() < 1e-5);
    let right = ndc(m, Vec3::new(8.0, 0.0, 4.0));
    assert!((right.x - 1.0).abs() < 1e-5);
}

#[test]
fn orthographic_is_affine_and_maps_volume_to_unit_cube() {
    let m = orthographic(1.0, 11.0, 4.0, 1.5);
    let c = m * Vec4::new(3.0, 2.0, 11.0, 1.0);
    assert_eq!(c.w, 1.0);
    assert!((c.x - 1.0).abs() < 1e-6);
    assert!((c.y - 1.0).abs() < 1e-6);
    assert!((c.z - 1.0).abs() < 1e-6);
    assert!((ndc(m, Vec3::new(0.0, 0.0, 1.0)).z + 1.0).abs() < 1e-6);
}
