//! Sutherland-Hodgman clipping against the six homogeneous frustum planes.

use glam::Vec4;
use smallvec::SmallVec;

use crate::shading::varyings::VertexOutput;

/// Frustum planes in clip space; a point is inside when `plane.dot(p) >= 0`.
///
/// Order: left, right, bottom, top, near, far.
pub const CLIP_PLANES: [Vec4; 6] = [
    Vec4::new(1.0, 0.0, 0.0, 1.0),
    Vec4::new(-1.0, 0.0, 0.0, 1.0),
    Vec4::new(0.0, 1.0, 0.0, 1.0),
    Vec4::new(0.0, -1.0, 0.0, 1.0),
    Vec4::new(0.0, 0.0, 1.0, 1.0),
    Vec4::new(0.0, 0.0, -1.0, 1.0),
];

/// A clipped convex polygon. One triangle gains at most one vertex per plane.
pub type ClipPolygon = SmallVec<[VertexOutput; 9]>;

/// Clip one triangle; an empty result means nothing of it is visible.
///
/// A triangle already inside every plane comes back as its three vertices, unchanged and in order.
pub fn clip_triangle(tri: &[VertexOutput; 3]) -> ClipPolygon {
    let mut poly = ClipPolygon::from_slice(tri);
    let mut next = ClipPolygon::new();

    for plane in CLIP_PLANES {
        next.clear();
        let n = poly.len();
        for i in 0..n {
            let start = &poly[i];
            let end = &poly[(i + 1) % n];
            let ds = plane.dot(start.position_cs);
            let de = plane.dot(end.position_cs);
            match (ds >= 0.0, de >= 0.0) {
                (true, true) => next.push(*start),
                (true, false) => {
                    next.push(*start);
                    next.push(intersect(start, end, ds, de));
                }
                (false, true) => next.push(intersect(start, end, ds, de)),
                (false, false) => {}
            }
        }
        std::mem::swap(&mut poly, &mut next);
        if poly.is_empty() {
            break;
        }
    }
    poly
}

/// Point where edge `start -> end` meets the plane; `ds`, `de` are the endpoints' plane distances
/// with opposite signs.
fn intersect(start: &VertexOutput, end: &VertexOutput, ds: f32, de: f32) -> VertexOutput {
    let t = ds / (ds - de);
    start.lerp(end, t)
}

/// Fan-triangulate a convex polygon as `(v0, vj, vj+1)`.
pub fn fan_triangles(poly: &[VertexOutput]) -> impl Iterator<Item = [&VertexOutput; 3]> + '_ {
    (1..poly.len().saturating_sub(1)).map(move |j| [&poly[0], &poly[j], &poly[j + 1]])
}

#[cfg(test)]
#[path = "../../tests/unit/pipeline/clip.rs"]
mod tests;
