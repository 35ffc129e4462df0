//! Built-in meshes, unit sized and centred on the origin.
//!
//! Front faces wind clockwise when seen from outside, matching the rasterizer's cull test.

use std::f32::consts::{PI, TAU};

use glam::{Vec2, Vec3};

use crate::foundation::error::{SoftrasError, SoftrasResult};
use crate::mesh::buffer::Mesh;
use crate::mesh::vertex::Vertex;

/// Appends one square face with outward normal `normal` and screen-up axis `up`.
fn push_face(vertices: &mut Vec<Vertex>, indices: &mut Vec<u32>, normal: Vec3, up: Vec3, half: f32) {
    let right = normal.cross(up);
    let centre = normal * half;
    let base = vertices.len() as u32;
    let corners = [
        (-right - up, Vec2::new(0.0, 0.0)),
        (-right + up, Vec2::new(0.0, 1.0)),
        (right + up, Vec2::new(1.0, 1.0)),
        (right - up, Vec2::new(1.0, 0.0)),
    ];
    for (offset, uv) in corners {
        vertices.push(Vertex::new(centre + offset * half, uv, normal).with_tangent(right.extend(1.0)));
    }
    indices.extend_from_slice(&[base, base + 1, base + 2, base, base + 2, base + 3]);
}

/// Axis-aligned cube from `-0.5` to `0.5`, four vertices per face so normals stay flat.
pub fn cube() -> Mesh {
    let faces = [
        (Vec3::X, Vec3::Y),
        (Vec3::NEG_X, Vec3::Y),
        (Vec3::Y, Vec3::Z),
        (Vec3::NEG_Y, Vec3::Z),
        (Vec3::Z, Vec3::Y),
        (Vec3::NEG_Z, Vec3::Y),
    ];
    let mut vertices = Vec::with_capacity(24);
    let mut indices = Vec::with_capacity(36);
    for (normal, up) in faces {
        push_face(&mut vertices, &mut indices, normal, up, 0.5);
    }
    Mesh::from_generated(vertices, indices)
}

/// Unit quad in the XY plane facing -Z.
pub fn quad() -> Mesh {
    let mut vertices = Vec::with_capacity(4);
    let mut indices = Vec::with_capacity(6);
    push_face(&mut vertices, &mut indices, Vec3::NEG_Z, Vec3::Y, 0.5);
    // push_face offsets along the normal; a quad sits on z = 0.
    for v in &mut vertices {
        v.position.z = 0.0;
    }
    Mesh::from_generated(vertices, indices)
}

/// Single triangle in the XY plane facing -Z.
pub fn triangle() -> Mesh {
    let normal = Vec3::NEG_Z;
    let vertices = vec![
        Vertex::new(Vec3::new(-0.5, -0.5, 0.0), Vec2::new(0.0, 0.0), normal),
        Vertex::new(Vec3::new(0.0, 0.5, 0.0), Vec2::new(0.5, 1.0), normal),
        Vertex::new(Vec3::new(0.5, -0.5, 0.0), Vec2::new(1.0, 0.0), normal),
    ];
    Mesh::from_generated(vertices, vec![0, 1, 2])
}

/// Latitude/longitude sphere of radius 0.5.
pub fn uv_sphere(segments: u32, rings: u32) -> SoftrasResult<Mesh> {
    if segments < 3 || rings < 2 {
        return Err(SoftrasError::validation(format!(
            "uv sphere needs at least 3 segments and 2 rings, got {segments}x{rings}"
        )));
    }

    let stride = segments + 1;
    let mut vertices = Vec::with_capacity((stride * (rings + 1)) as usize);
    for r in 0..=rings {
        let theta = PI * r as f32 / rings as f32;
        let (sin_t, cos_t) = theta.sin_cos();
        for s in 0..=segments {
            let phi = TAU * s as f32 / segments as f32;
            let (sin_p, cos_p) = phi.sin_cos();
            let normal = Vec3::new(sin_t * cos_p, cos_t, sin_t * sin_p);
            let uv = Vec2::new(s as f32 / segments as f32, 1.0 - r as f32 / rings as f32);
            let tangent = Vec3::new(-sin_p, 0.0, cos_p).extend(1.0);
            vertices.push(Vertex::new(normal * 0.5, uv, normal).with_tangent(tangent));
        }
    }

    let mut indices = Vec::with_capacity((segments * rings * 6) as usize);
    for r in 0..rings {
        for s in 0..segments {
            let a = r * stride + s;
            let b = a + stride;
            let c = b + 1;
            let d = a + 1;
            indices.extend_from_slice(&[a, d, c, a, c, b]);
        }
    }

    Ok(Mesh::from_generated(vertices, indices))
}

#[cfg(test)]
#[path = "../../tests/unit/mesh/primitives.rs"]
mod tests;
