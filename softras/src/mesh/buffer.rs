use std::sync::Arc;

use crate::foundation::error::{SoftrasError, SoftrasResult};
use crate::mesh::vertex::Vertex;

/// Immutable per-vertex attribute storage for one mesh.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct VertexBuffer {
    vertices: Vec<Vertex>,
}

impl VertexBuffer {
    /// Wrap `vertices` as they are.
    pub fn new(vertices: Vec<Vertex>) -> Self {
        Self { vertices }
    }

    /// Number of vertices.
    pub fn len(&self) -> usize {
        self.vertices.len()
    }

    /// Whether the buffer holds no vertices.
    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }

    /// All vertices, in index order.
    pub fn as_slice(&self) -> &[Vertex] {
        &self.vertices
    }
}

impl From<Vec<Vertex>> for VertexBuffer {
    fn from(vertices: Vec<Vertex>) -> Self {
        Self::new(vertices)
    }
}

/// Flattened triangle list, three indices per triangle.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct IndexBuffer {
    indices: Vec<u32>,
}

impl IndexBuffer {
    /// Fails unless the length is a multiple of three.
    pub fn new(indices: Vec<u32>) -> SoftrasResult<Self> {
        if indices.len() % 3 != 0 {
            return Err(SoftrasError::validation(format!(
                "index count {} is not a multiple of 3",
                indices.len()
            )));
        }
        Ok(Self { indices })
    }

    /// Number of indices, not triangles.
    pub fn len(&self) -> usize {
        self.indices.len()
    }

    /// Whether the buffer holds no indices.
    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }

    /// Number of whole triangles.
    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    /// The flat index list.
    pub fn as_slice(&self) -> &[u32] {
        &self.indices
    }

    /// Index triples in submission order.
    pub fn triangles(&self) -> impl Iterator<Item = [u32; 3]> + '_ {
        self.indices.chunks_exact(3).map(|t| [t[0], t[1], t[2]])
    }

    /// Largest index, or `None` for an empty buffer.
    pub fn max_index(&self) -> Option<u32> {
        self.indices.iter().copied().max()
    }
}

/// A vertex buffer paired with the index buffer that references it.
///
/// Construction guarantees every index is in range, so the rasterizer never bounds-checks per
/// triangle.
#[derive(Clone, Debug, PartialEq)]
pub struct Mesh {
    vertices: VertexBuffer,
    indices: IndexBuffer,
}

impl Mesh {
    /// Pair the buffers, rejecting any index past the end of `vertices`.
    pub fn new(vertices: VertexBuffer, indices: IndexBuffer) -> SoftrasResult<Self> {
        if let Some(max) = indices.max_index()
            && max as usize >= vertices.len()
        {
            return Err(SoftrasError::validation(format!(
                "index {max} out of range for {} vertices",
                vertices.len()
            )));
        }
        Ok(Self { vertices, indices })
    }

    /// Same as [`Mesh::new`] from raw vectors.
    pub fn from_parts(vertices: Vec<Vertex>, indices: Vec<u32>) -> SoftrasResult<Self> {
        Self::new(VertexBuffer::new(vertices), IndexBuffer::new(indices)?)
    }

    /// For generated meshes whose indices are correct by construction.
    pub(crate) fn from_generated(vertices: Vec<Vertex>, indices: Vec<u32>) -> Self {
        debug_assert!(indices.len() % 3 == 0);
        debug_assert!(indices.iter().all(|&i| (i as usize) < vertices.len()));
        Self {
            vertices: VertexBuffer::new(vertices),
            indices: IndexBuffer { indices },
        }
    }

    /// Per-vertex attributes.
    pub fn vertices(&self) -> &VertexBuffer {
        &self.vertices
    }

    /// Triangle list.
    pub fn indices(&self) -> &IndexBuffer {
        &self.indices
    }

    /// Wrap in an [`Arc`] so several drawables can share the buffers.
    pub fn into_shared(self) -> Arc<Self> {
        Arc::new(self)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/mesh/buffer.rs"]
mod tests;
