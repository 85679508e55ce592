//! CPU-side mesh representation fed to the GPU upload path.

use anyhow::{Result, bail};

/// Vertex with position/color/normal. Values are in model space.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct MeshVertex {
    pub position: [f32; 3],
    pub color: [f32; 4],
    pub normal: [f32; 3],
}

impl MeshVertex {
    pub fn new(position: [f32; 3], color: [f32; 4], normal: [f32; 3]) -> Self {
        Self {
            position,
            color,
            normal,
        }
    }
}

/// Indexed triangle mesh; `indices` holds one triple per triangle.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct MeshData {
    pub vertices: Vec<MeshVertex>,
    pub indices: Vec<u32>,
}

impl MeshData {
    pub fn new(vertices: Vec<MeshVertex>, indices: Vec<u32>) -> Self {
        Self { vertices, indices }
    }

    /// Append a vertex and return its index.
    pub fn add_vertex(&mut self, position: [f32; 3], color: [f32; 4], normal: [f32; 3]) -> u32 {
        let idx = self.vertices.len() as u32;
        self.vertices.push(MeshVertex::new(position, color, normal));
        idx
    }

    pub fn add_triangle(&mut self, a: u32, b: u32, c: u32) {
        self.indices.extend_from_slice(&[a, b, c]);
    }

    /// Index the next vertex pushed will get.
    #[inline]
    pub fn next_index(&self) -> u32 {
        self.vertices.len() as u32
    }

    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    /// Returns `true` if both vertex and index buffers are non-empty.
    pub fn is_valid(&self) -> bool {
        !self.vertices.is_empty() && !self.indices.is_empty()
    }

    /// Check the mesh is drawable: whole triangles, every index in range.
    pub fn validate(&self) -> Result<()> {
        if !self.is_valid() {
            bail!(
                "Mesh is empty (vertices={}, indices={})",
                self.vertices.len(),
                self.indices.len()
            );
        }
        if self.indices.len() % 3 != 0 {
            bail!(
                "Index count {} is not a multiple of 3",
                self.indices.len()
            );
        }
        if u32::try_from(self.vertices.len()).is_err() {
            bail!("Too many vertices in mesh (>{})", u32::MAX);
        }
        let len = self.vertices.len();
        if let Some((pos, idx)) = self
            .indices
            .iter()
            .enumerate()
            .find(|&(_, &i)| i as usize >= len)
        {
            bail!(
                "Index {} at position {} out of bounds (vertices={})",
                idx,
                pos,
                len
            );
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn triangle() -> MeshData {
        let mut mesh = MeshData::default();
        let n = [0.0, 0.0, 1.0];
        let c = [1.0; 4];
        let a = mesh.add_vertex([0.0, 0.0, 0.0], c, n);
        let b = mesh.add_vertex([1.0, 0.0, 0.0], c, n);
        let d = mesh.add_vertex([0.0, 1.0, 0.0], c, n);
        mesh.add_triangle(a, b, d);
        mesh
    }

    #[test]
    fn mesh_data_validity() {
        let data = MeshData::new(vec![MeshVertex::default()], vec![0]);
        assert!(data.is_valid());
        assert!(!MeshData::default().is_valid());
    }

    #[test]
    fn add_vertex_returns_sequential_indices() {
        let mesh = triangle();
        assert_eq!(mesh.indices, vec![0, 1, 2]);
        assert_eq!(mesh.next_index(), 3);
        assert_eq!(mesh.triangle_count(), 1);
        assert!(mesh.validate().is_ok());
    }

    #[test]
    fn validate_rejects_out_of_range_index() {
        let mut mesh = triangle();
        mesh.add_triangle(0, 1, 7);
        let err = mesh.validate().unwrap_err().to_string();
        assert!(err.contains("out of bounds"), "{err}");
    }

    #[test]
    fn validate_rejects_partial_triangle() {
        let mut mesh = triangle();
        mesh.indices.push(0);
        assert!(mesh.validate().is_err());
        assert!(MeshData::default().validate().is_err());
    }
}
