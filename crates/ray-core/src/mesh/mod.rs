//! Generated ray surfaces.
//!
//! A [`Mesh`] is a flat vertex list plus committed triangle and line index
//! lists. Vertices are `bytemuck::Pod` so the buffers can be handed to a
//! renderer without conversion.

pub mod alpha;
pub mod frame;
pub mod generator;
pub mod mask;
pub mod pattern;

use glam::Vec3;

pub use alpha::{AlphaInputs, AlphaTuning, ClipRange};
pub use frame::LocalFrame;
pub use generator::{GeneratorTuning, SurfaceGenerator, SurfaceRequest};
pub use mask::{GridMask, VisibilityMask};
pub use pattern::{CellCoord, CellEmitter, CellPattern, PatternEmitter};

/// GPU vertex: 36 bytes, matches the effect shader's vertex layout.
#[repr(C)]
#[derive(Clone, Copy, Debug, Default, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct Vertex {
    pub position: [f32; 3], // 12 bytes
    pub normal: [f32; 3],   // 12 bytes
    pub uv: [f32; 2],       //  8 bytes
    pub color: [u8; 4],     //  4 bytes, RGBA8
}

impl Vertex {
    pub fn new(position: Vec3, normal: Vec3, uv: [f32; 2], color: [u8; 4]) -> Self {
        Self {
            position: position.to_array(),
            normal: normal.to_array(),
            uv,
            color,
        }
    }

    pub fn position(&self) -> Vec3 {
        Vec3::from_array(self.position)
    }

    pub fn normal(&self) -> Vec3 {
        Vec3::from_array(self.normal)
    }

    /// Alpha channel in [0,1].
    pub fn alpha(&self) -> f32 {
        self.color[3] as f32 / 255.0
    }
}

/// Pack a linear RGB color and alpha into RGBA8.
pub fn pack_color(rgb: [f32; 3], alpha: f32) -> [u8; 4] {
    let to_byte = |c: f32| (crate::math::saturate(c) * 255.0).round() as u8;
    [to_byte(rgb[0]), to_byte(rgb[1]), to_byte(rgb[2]), to_byte(alpha)]
}

/// Handle to a vertex inside a [`MeshBuilder`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct VertexId(pub u32);

/// Committed geometry of one ray.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Mesh {
    pub vertices: Vec<Vertex>,
    /// Triangle list, three indices per triangle.
    pub triangles: Vec<u32>,
    /// Line list, two indices per line.
    pub lines: Vec<u32>,
}

impl Mesh {
    pub fn is_empty(&self) -> bool {
        self.triangles.is_empty() && self.lines.is_empty()
    }

    pub fn triangle_count(&self) -> usize {
        self.triangles.len() / 3
    }

    pub fn line_count(&self) -> usize {
        self.lines.len() / 2
    }

    pub fn vertex_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.vertices)
    }

    pub fn triangle_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.triangles)
    }

    pub fn line_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.lines)
    }

    /// Append `other`, rebasing its indices.
    pub fn append(&mut self, other: &Mesh) {
        let base = self.vertices.len() as u32;
        self.vertices.extend_from_slice(&other.vertices);
        self.triangles.extend(other.triangles.iter().map(|i| i + base));
        self.lines.extend(other.lines.iter().map(|i| i + base));
    }
}

/// Incremental mesh construction used by cell emitters.
#[derive(Debug, Default)]
pub struct MeshBuilder {
    mesh: Mesh,
}

impl MeshBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(vertices: usize, indices: usize) -> Self {
        Self {
            mesh: Mesh {
                vertices: Vec::with_capacity(vertices),
                triangles: Vec::with_capacity(indices),
                lines: Vec::new(),
            },
        }
    }

    pub fn push_vertex(&mut self, vertex: Vertex) -> VertexId {
        let id = VertexId(self.mesh.vertices.len() as u32);
        self.mesh.vertices.push(vertex);
        id
    }

    pub fn vertex(&self, id: VertexId) -> &Vertex {
        &self.mesh.vertices[id.0 as usize]
    }

    pub fn triangle(&mut self, a: VertexId, b: VertexId, c: VertexId) {
        self.mesh.triangles.extend_from_slice(&[a.0, b.0, c.0]);
    }

    pub fn line(&mut self, a: VertexId, b: VertexId) {
        self.mesh.lines.extend_from_slice(&[a.0, b.0]);
    }

    pub fn vertex_count(&self) -> usize {
        self.mesh.vertices.len()
    }

    pub fn finish(self) -> Mesh {
        self.mesh
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_vertex_size() {
        assert_eq!(std::mem::size_of::<Vertex>(), 36);
    }

    #[test]
    fn test_pack_color_clamps() {
        assert_eq!(pack_color([2.0, 0.5, -1.0], 1.0), [255, 128, 0, 255]);
        assert_eq!(pack_color([0.0; 3], f32::NAN)[3], 0);
    }

    #[test]
    fn test_append_rebases_indices() {
        let mut b = MeshBuilder::new();
        let v = [
            b.push_vertex(Vertex::default()),
            b.push_vertex(Vertex::default()),
            b.push_vertex(Vertex::default()),
        ];
        b.triangle(v[0], v[1], v[2]);
        let tri = b.finish();

        let mut merged = tri.clone();
        merged.append(&tri);
        assert_eq!(merged.vertices.len(), 6);
        assert_eq!(merged.triangles, vec![0, 1, 2, 3, 4, 5]);
    }
}
