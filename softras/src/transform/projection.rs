use glam::{Mat4, Vec4};

/// Perspective projection with a vertical field of view in degrees.
///
/// View depth `near` maps to NDC `z = -1` and `far` to `z = 1`; clip `w` carries the view depth
/// for the later perspective divide.
pub fn perspective(near: f32, far: f32, fov_y_deg: f32, aspect: f32) -> Mat4 {
    let tan_half_fov = (fov_y_deg.to_radians() * 0.5).tan();
    let scale_y = 1.0 / tan_half_fov;
    let scale_x = scale_y / aspect;
    let depth = far - near;

    Mat4::from_cols(
        Vec4::new(scale_x, 0.0, 0.0, 0.0),
        Vec4::new(0.0, scale_y, 0.0, 0.0),
        Vec4::new(0.0, 0.0, (far + near) / depth, 1.0),
        Vec4::new(0.0, 0.0, -(2.0 * far * near) / depth, 0.0),
    )
}

/// Orthographic projection of a view volume `height` units tall.
pub fn orthographic(near: f32, far: f32, height: f32, aspect: f32) -> Mat4 {
    let width = height * aspect;
    let depth = far - near;

    Mat4::from_cols(
        Vec4::new(2.0 / width, 0.0, 0.0, 0.0),
        Vec4::new(0.0, 2.0 / height, 0.0, 0.0),
        Vec4::new(0.0, 0.0, 2.0 / depth, 0.0),
        Vec4::new(0.0, 0.0, -(far + near) / depth, 1.0),
    )
}

#[cfg(test)]
#[path = "../../tests/unit/transform/projection.rs"]
mod tests;
