use std::sync::Arc;

use glam::{Mat4, Vec3};

use crate::mesh::buffer::Mesh;
use crate::shading::program::ShaderProgram;
use crate::shading::state::RenderQueue;
use crate::transform::model::Transform;

/// A mesh placed in the world with the program that shades it.
#[derive(Debug)]
pub struct Drawable {
    /// Label used in logs.
    pub name: String,
    /// Shader and state used for every triangle of the mesh.
    pub program: ShaderProgram,
    mesh: Arc<Mesh>,
    transform: Transform,
    model: Mat4,
}

impl Drawable {
    /// Place `mesh` at the origin with an identity transform.
    pub fn new(name: impl Into<String>, mesh: Arc<Mesh>, program: ShaderProgram) -> Self {
        Self {
            name: name.into(),
            program,
            mesh,
            transform: Transform::default(),
            model: Mat4::IDENTITY,
        }
    }

    /// Builder form of [`Drawable::set_transform`].
    pub fn with_transform(mut self, transform: Transform) -> Self {
        self.set_transform(transform);
        self
    }

    /// Replace the placement and recompute the model matrix.
    pub fn set_transform(&mut self, transform: Transform) {
        self.transform = transform;
        self.model = transform.to_matrix();
    }

    /// Use an explicit model matrix, e.g. one supplied by a host scene graph.
    pub fn set_model_matrix(&mut self, model: Mat4) {
        let (scale, rotation, position) = model.to_scale_rotation_translation();
        let (y, x, z) = rotation.to_euler(glam::EulerRot::YXZ);
        self.transform = Transform {
            position,
            rotation_deg: Vec3::new(x.to_degrees(), y.to_degrees(), z.to_degrees()),
            scale,
        };
        self.model = model;
    }

    /// Current placement.
    pub fn transform(&self) -> Transform {
        self.transform
    }

    /// Model-to-world matrix.
    pub fn model_matrix(&self) -> Mat4 {
        self.model
    }

    /// The shared geometry.
    pub fn mesh(&self) -> &Mesh {
        &self.mesh
    }

    /// Queue from the program's state.
    pub fn queue(&self) -> RenderQueue {
        self.program.state.queue
    }

    /// World-space distance from the drawable's origin to `point`.
    pub fn distance_to(&self, point: Vec3) -> f32 {
        self.model.w_axis.truncate().distance(point)
    }
}

/// Order drawables for a frame: ascending render queue, then front to back, except the
/// transparent tier which goes back to front. Ties keep their relative order.
pub fn sort_drawables(drawables: &mut [Drawable], camera_position: Vec3) {
    drawables.sort_by(|a, b| {
        let (qa, qb) = (a.queue(), b.queue());
        qa.cmp(&qb).then_with(|| {
            let da = a.distance_to(camera_position);
            let db = b.distance_to(camera_position);
            if qa.is_transparent() {
                db.total_cmp(&da)
            } else {
                da.total_cmp(&db)
            }
        })
    });
}

#[cfg(test)]
#[path = "../../tests/unit/scene/drawable.rs"]
mod tests;
