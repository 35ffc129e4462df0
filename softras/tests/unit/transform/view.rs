use super::*;

#[test]
fn camera_position_maps_to_view_origin() {
    let pos = Vec3::new(3.0, -2.0, 7.5);
    let view = create_view_matrix(pos, Vec3::new(0.2, 0.1, 1.0), Vec3::Y);
    let p = view.transform_point3(pos);
    assert!(p.length() < 1e-5, "{p:?}");
}

#[test]
fn identity_camera_yields_identity_view() {
    let view = create_view_matrix(Vec3::ZERO, Vec3::Z, Vec3::Y);
    assert!(view.abs_diff_eq(Mat4::IDENTITY, 1e-6));
}

#[test]
fn points_ahead_have_positive_depth_and_up_is_reorthogonalized() {
    let pos = Vec3::new(0.0, 0.0, -5.0);
    // A slanted `up` must still produce an orthonormal basis.
    let view = create_view_matrix(pos, Vec3::Z, Vec3::new(0.0, 1.0, 0.5));
    let ahead = view.transform_point3(Vec3::ZERO);
    assert!((ahead.z - 5.0).abs() < 1e-5);
    let right = view.transform_vector3(Vec3::X);
    assert!((right - Vec3::X).length() < 1e-5);
    let up = view.transform_vector3(Vec3::Y);
    assert!((up - Vec3::Y).length() < 1e-5);
}
