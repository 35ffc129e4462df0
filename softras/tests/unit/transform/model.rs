use super::*;

#[test]
fn default_transform_is_identity() {
    assert!(Transform::default().to_matrix().abs_diff_eq(Mat4::IDENTITY, 1e-6));
}

#[test]
fn translate_rotate_scale_compose_in_order() {
    let t = Transform {
        position: Vec3::new(1.0, 2.0, 3.0),
        rotation_deg: Vec3::new(0.0, 90.0, 0.0),
        scale: Vec3::new(2.0, 1.0, 1.0),
    };
    // Scale first (x -> 2), then yaw 90deg (x -> -z), then translate.
    let p = t.to_matrix().transform_point3(Vec3::X);
    assert!((p - Vec3::new(1.0, 2.0, 1.0)).length() < 1e-5, "{p:?}");
}
