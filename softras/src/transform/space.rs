use glam::{Mat4, Vec2, Vec3, Vec4};

use crate::foundation::core::Viewport;
use crate::foundation::math::{DEGENERATE_AREA_EPSILON, DIVISION_EPSILON};

/// Transform a model-space position to homogeneous clip space (`w = 1` appended).
pub fn object_to_clip(position_os: Vec3, mvp: &Mat4) -> Vec4 {
    *mvp * position_os.extend(1.0)
}

/// Transform a model-space direction (`w = 0`) by a model matrix.
pub fn object_to_world_dir(dir_os: Vec3, model: &Mat4) -> Vec3 {
    model.transform_vector3(dir_os)
}

/// A clip-space position after the perspective divide and viewport mapping.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ScreenPoint {
    /// `x`, `y` in pixels, `z` the NDC depth, `w` the original clip-space `w`.
    pub screen: Vec4,
    /// Normalized device coordinates.
    pub ndc: Vec3,
}

impl ScreenPoint {
    /// Pixel position.
    pub fn xy(&self) -> Vec2 {
        self.screen.truncate().truncate()
    }

    /// NDC depth, as stored in the depth buffer.
    pub fn depth(&self) -> f32 {
        self.screen.z
    }

    /// Clip-space `w`.
    pub fn clip_w(&self) -> f32 {
        self.screen.w
    }
}

/// Divide by `w` and map NDC `x, y` from `[-1, 1]` onto `[0, viewport)`.
///
/// A `w` too close to zero is nudged away from it, keeping its sign; clipping normally removes
/// such vertices before they get here.
pub fn clip_to_screen(clip: Vec4, viewport: Viewport) -> ScreenPoint {
    let w = if clip.w.abs() < DIVISION_EPSILON {
        DIVISION_EPSILON.copysign(clip.w)
    } else {
        clip.w
    };
    let ndc = clip.truncate() / w;
    let x = (ndc.x + 1.0) * 0.5 * viewport.width as f32;
    let y = (ndc.y + 1.0) * 0.5 * viewport.height as f32;
    ScreenPoint {
        screen: Vec4::new(x, y, ndc.z, clip.w),
        ndc,
    }
}

/// Twice the signed area of the 2D triangle `(a, b, c)`. Positive for counter-clockwise
/// winding in a `y`-up space.
pub fn signed_area(a: Vec2, b: Vec2, c: Vec2) -> f32 {
    (b - a).perp_dot(c - a)
}

/// Barycentric weights of `p` with respect to `(v0, v1, v2)` by the edge-function method.
///
/// Degenerate (edge-on or zero-area) triangles return `(-1, 1, 1)`, which every inside test
/// rejects.
pub fn barycentric(p: Vec2, v0: Vec2, v1: Vec2, v2: Vec2) -> Vec3 {
    let u = Vec3::new(v2.x - v0.x, v1.x - v0.x, v0.x - p.x).cross(Vec3::new(
        v2.y - v0.y,
        v1.y - v0.y,
        v0.y - p.y,
    ));
    if u.z.abs() < DEGENERATE_AREA_EPSILON {
        return Vec3::new(-1.0, 1.0, 1.0);
    }
    Vec3::new(1.0 - (u.x + u.y) / u.z, u.y / u.z, u.x / u.z)
}

/// Turn screen-linear weights into perspective-correct ones: divide each weight by its
/// vertex's clip `w` and renormalize to a unit sum.
///
/// When the renormalization denominator vanishes the screen-linear weights are returned as-is.
pub fn perspective_correct(bary: Vec3, clip_w: Vec3) -> Vec3 {
    let safe_w = clip_w.signum() * clip_w.abs().max(Vec3::splat(DIVISION_EPSILON));
    let corrected = bary / safe_w;
    let sum = corrected.x + corrected.y + corrected.z;
    if sum.abs() < DIVISION_EPSILON {
        return bary;
    }
    corrected / sum
}

#[cfg(test)]
#[path = "../../tests/unit/transform/space.rs"]
mod tests;
