use super::*;

/// Every non-degenerate triangle's edge cross product must point along its vertex normals.
fn assert_outward(mesh: &Mesh) {
    for tri in mesh.indices().triangles() {
        let v = mesh.vertices().as_slice();
        let [a, b, c] = tri.map(|i| &v[i as usize]);
        let n = (b.position - a.position).cross(c.position - a.position);
        if n.length_squared() < 1e-12 {
            continue;
        }
        let avg = a.normal + b.normal + c.normal;
        assert!(n.dot(avg) > 0.0, "triangle {tri:?} winds inward");
    }
}

#[test]
fn cube_has_24_vertices_and_12_outward_triangles() {
    let mesh = cube();
    assert_eq!(mesh.vertices().len(), 24);
    assert_eq!(mesh.indices().triangle_count(), 12);
    assert_outward(&mesh);
    for v in mesh.vertices().as_slice() {
        assert!(v.position.abs().max_element() <= 0.5 + 1e-6);
    }
}

#[test]
fn quad_and_triangle_face_negative_z() {
    for mesh in [quad(), triangle()] {
        assert_outward(&mesh);
        for v in mesh.vertices().as_slice() {
            assert_eq!(v.position.z, 0.0);
            assert_eq!(v.normal, Vec3::NEG_Z);
        }
    }
    assert_eq!(quad().indices().triangle_count(), 2);
}

#[test]
fn sphere_vertices_lie_on_radius() {
    let mesh = uv_sphere(12, 8).unwrap();
    assert_eq!(mesh.vertices().len(), 13 * 9);
    assert_eq!(mesh.indices().triangle_count(), 12 * 8 * 2);
    for v in mesh.vertices().as_slice() {
        assert!((v.position.length() - 0.5).abs() < 1e-5);
    }
    assert_outward(&mesh);
}

#[test]
fn sphere_rejects_too_few_segments() {
    assert!(uv_sphere(2, 8).is_err());
    assert!(uv_sphere(8, 1).is_err());
}
