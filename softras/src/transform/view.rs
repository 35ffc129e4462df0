use glam::{Mat4, Vec3, Vec4};

/// Build a world-to-view matrix for a camera at `position` looking along `forward`.
///
/// `up` only needs to be roughly upward: it is re-orthogonalized against `forward`, giving the
/// basis `(right, up, forward)` with `right = up x forward`. The result is the inverse of the
/// camera's rigid transform, with the translation folded in as dot products.
pub fn create_view_matrix(position: Vec3, forward: Vec3, up: Vec3) -> Mat4 {
    let forward = forward.normalize_or_zero();
    let right = up.cross(forward).normalize_or_zero();
    let up = forward.cross(right).normalize_or_zero();

    Mat4::from_cols(
        Vec4::new(right.x, up.x, forward.x, 0.0),
        Vec4::new(right.y, up.y, forward.y, 0.0),
        Vec4::new(right.z, up.z, forward.z, 0.0),
        Vec4::new(
            -right.dot(position),
            -up.dot(position),
            -forward.dot(position),
            1.0,
        ),
    )
}

#[cfg(test)]
#[path = "../../tests/unit/transform/view.rs"]
mod tests;
