use bytemuck::{Pod, Zeroable};

/// One terrain vertex: a 2D footprint position and its heightmap UV.
///
/// The vertical axis comes from the heightmap in the vertex stage, so the
/// CPU-side mesh is flat.
#[repr(C)]
#[derive(Debug, Copy, Clone, Pod, Zeroable)]
pub struct TerrainVertex {
    pub position: [f32; 2],
    pub uv: [f32; 2],
}

impl TerrainVertex {
    const ATTRIBS: [wgpu::VertexAttribute; 2] =
        wgpu::vertex_attr_array![0 => Float32x2, 1 => Float32x2];

    pub fn layout() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<TerrainVertex>() as wgpu::BufferAddress,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &Self::ATTRIBS,
        }
    }
}

/// A triangulated terrain chunk covering the `[0, size-1]` square footprint.
pub struct ChunkMesh {
    pub vertices: Vec<TerrainVertex>,
    pub indices: Vec<u32>,
}

impl ChunkMesh {
    /// Scatter points over the footprint and Delaunay-triangulate them.
    ///
    /// Border points sit at unit spacing along all four edges so the chunk
    /// silhouette is straight; interior points form a grid whose count
    /// scales with `density` (1.0 puts roughly one point per unit). Border
    /// vertices carry UV components of exactly 0.0 and 1.0.
    ///
    /// Requires `size >= 3` and `density > 0`.
    pub fn generate(size: u32, density: f32) -> Self {
        assert!(size >= 3, "chunk size must be at least 3");
        assert!(density > 0.0, "density must be positive");

        let extent = (size - 1) as f64;
        let mut points = Vec::new();

        for i in 0..size {
            points.push(delaunator::Point {
                x: i as f64,
                y: 0.0,
            });
            points.push(delaunator::Point {
                x: i as f64,
                y: extent,
            });
        }
        for i in 1..size - 1 {
            points.push(delaunator::Point {
                x: 0.0,
                y: i as f64,
            });
            points.push(delaunator::Point {
                x: extent,
                y: i as f64,
            });
        }

        let num_inner = ((size - 2) as f32 * density).ceil() as u32;
        for i in 0..num_inner {
            for j in 0..num_inner {
                let ti = (i + 1) as f64 / (num_inner + 1) as f64;
                let tj = (j + 1) as f64 / (num_inner + 1) as f64;
                points.push(delaunator::Point {
                    x: ti * extent,
                    y: tj * extent,
                });
            }
        }

        let indices: Vec<u32> = delaunator::triangulate(&points)
            .triangles
            .into_iter()
            .map(|i| i as u32)
            .collect();

        let vertices: Vec<TerrainVertex> = points
            .into_iter()
            .map(|p| TerrainVertex {
                position: [p.x as f32, p.y as f32],
                uv: [(p.x / extent) as f32, (p.y / extent) as f32],
            })
            .collect();

        tracing::debug!(
            vertices = vertices.len(),
            indices = indices.len(),
            "generated terrain chunk"
        );

        Self { vertices, indices }
    }

    pub fn num_indices(&self) -> u32 {
        self.indices.len() as u32
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn vertex_count_matches_scatter() {
        // 10x10 footprint at density 1.0: 36 border points + 8x8 interior.
        let mesh = ChunkMesh::generate(10, 1.0);
        assert_eq!(mesh.vertices.len(), 36 + 64);
    }

    #[test]
    fn triangulation_produces_triangles() {
        let mesh = ChunkMesh::generate(10, 1.0);
        assert!(mesh.num_indices() > 0);
        assert_eq!(mesh.indices.len() % 3, 0);
    }

    #[test]
    fn indices_stay_in_range() {
        let mesh = ChunkMesh::generate(20, 0.5);
        let max = mesh.vertices.len() as u32;
        assert!(mesh.indices.iter().all(|&i| i < max));
    }

    #[test]
    fn uvs_cover_unit_square() {
        let mesh = ChunkMesh::generate(10, 1.0);
        for v in &mesh.vertices {
            assert!((0.0..=1.0).contains(&v.uv[0]));
            assert!((0.0..=1.0).contains(&v.uv[1]));
        }
        // Corners land on exact UV extremes.
        assert!(mesh.vertices.iter().any(|v| v.uv == [0.0, 0.0]));
        assert!(mesh.vertices.iter().any(|v| v.uv == [1.0, 1.0]));
    }

    #[test]
    fn border_vertices_reach_footprint_edges() {
        let mesh = ChunkMesh::generate(10, 1.0);
        let extent = 9.0;
        assert!(mesh.vertices.iter().any(|v| v.position[0] == extent));
        assert!(mesh.vertices.iter().any(|v| v.position[1] == extent));
    }

    #[test]
    fn minimal_chunk_triangulates() {
        let mesh = ChunkMesh::generate(3, 0.1);
        assert!(mesh.num_indices() >= 3);
    }

    #[test]
    #[should_panic(expected = "at least 3")]
    fn tiny_chunk_panics() {
        ChunkMesh::generate(2, 1.0);
    }
}
