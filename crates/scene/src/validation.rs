//! Mesh validation utilities.
//!
//! `MeshValidator` provides methods to check mesh data integrity:
//! correct stride, in-range indices, normalized normals, AABB dimensions.
//! Used by the shape-library tests and the integration tests.

use crate::shapes::{MeshData, VERTEX_STRIDE};

/// Validator for [`MeshData`] integrity checks.
pub struct MeshValidator<'a> {
    mesh: &'a MeshData,
}

impl<'a> MeshValidator<'a> {
    pub fn new(mesh: &'a MeshData) -> Self {
        Self { mesh }
    }

    pub fn vertex_count(&self) -> usize {
        self.mesh.vertex_count()
    }

    pub fn triangle_count(&self) -> usize {
        self.mesh.triangle_count()
    }

    /// Check that the vertex buffer length is a multiple of the stride.
    pub fn is_stride_valid(&self) -> bool {
        self.mesh.vertices.len() % VERTEX_STRIDE == 0
    }

    /// Check that the index buffer length is a multiple of 3.
    pub fn is_index_stride_valid(&self) -> bool {
        self.mesh.indices.len() % 3 == 0
    }

    /// Check that the tangent stream is either absent or exactly 3 floats
    /// per vertex.
    pub fn is_tangent_stream_valid(&self) -> bool {
        self.mesh.tangents.is_empty() || self.mesh.tangents.len() == self.vertex_count() * 3
    }

    /// Check that all indices are within the valid vertex range.
    pub fn are_indices_in_range(&self) -> bool {
        let max_idx = self.vertex_count() as u32;
        self.mesh.indices.iter().all(|&i| i < max_idx)
    }

    /// Check that all vertex normals have unit length (within epsilon).
    pub fn are_normals_normalized(&self, epsilon: f32) -> bool {
        for i in 0..self.vertex_count() {
            let base = i * VERTEX_STRIDE;
            let nx = self.mesh.vertices[base + 3];
            let ny = self.mesh.vertices[base + 4];
            let nz = self.mesh.vertices[base + 5];
            let len = (nx * nx + ny * ny + nz * nz).sqrt();
            if (len - 1.0).abs() > epsilon {
                return false;
            }
        }
        true
    }

    /// Axis-aligned bounding box as (min, max) corners.
    pub fn aabb(&self) -> ([f32; 3], [f32; 3]) {
        let mut min = [f32::INFINITY; 3];
        let mut max = [f32::NEG_INFINITY; 3];
        for i in 0..self.vertex_count() {
            let base = i * VERTEX_STRIDE;
            for axis in 0..3 {
                let p = self.mesh.vertices[base + axis];
                min[axis] = min[axis].min(p);
                max[axis] = max[axis].max(p);
            }
        }
        (min, max)
    }

    /// Dimensions (width, height, depth) of the bounding box.
    pub fn dimensions(&self) -> [f32; 3] {
        let (min, max) = self.aabb();
        [max[0] - min[0], max[1] - min[1], max[2] - min[2]]
    }

    /// Check that the AABB dimensions are approximately equal to `expected`.
    pub fn assert_dimensions_approx(&self, expected: [f32; 3], tolerance: f32) -> bool {
        let dims = self.dimensions();
        (dims[0] - expected[0]).abs() < tolerance
            && (dims[1] - expected[1]).abs() < tolerance
            && (dims[2] - expected[2]).abs() < tolerance
    }

    /// Run all validation checks and return a list of error messages.
    /// An empty list means the mesh is valid.
    pub fn validate_all(&self) -> Vec<String> {
        let mut errors = Vec::new();

        if !self.is_stride_valid() {
            errors.push(format!(
                "Vertex buffer length {} is not a multiple of {}",
                self.mesh.vertices.len(),
                VERTEX_STRIDE
            ));
        }

        if !self.is_index_stride_valid() {
            errors.push(format!(
                "Index buffer length {} is not a multiple of 3",
                self.mesh.indices.len()
            ));
        }

        if !self.is_tangent_stream_valid() {
            errors.push(format!(
                "Tangent stream length {} does not match {} vertices",
                self.mesh.tangents.len(),
                self.vertex_count()
            ));
        }

        if !self.are_indices_in_range() {
            let max_idx = self.vertex_count() as u32;
            let out_of_range: Vec<_> = self
                .mesh
                .indices
                .iter()
                .filter(|&&i| i >= max_idx)
                .collect();
            errors.push(format!("Indices out of range: {:?}", out_of_range));
        }

        if !self.are_normals_normalized(1e-3) {
            errors.push("Normals are not unit length".to_string());
        }

        errors
    }
}
