//! wgpu terrain backend.
//!
//! Renders a Delaunay-triangulated terrain chunk whose vertices are
//! displaced on the GPU by a heightmap texture. Camera uses a fly-camera
//! model with ground-plane WASD movement and mouse look.
//!
//! # Invariants
//! - The renderer never mutates the heightfield; regeneration re-uploads a
//!   new field into the same binding slot.
//! - The uniform and texture binding layout is a wire contract: group 0
//!   binding 0 is the 80-byte `RenderSettings` block, group 1 holds the
//!   heightmap texture and its filtering sampler.
//! - Vertex displacement reads discrete texels; fragment tinting samples
//!   with filtering. The two paths intentionally disagree at texel edges.

mod camera;
mod gpu;
mod mesh;
pub mod shaders;

pub use camera::FlyCamera;
pub use gpu::TerrainRenderer;
pub use mesh::{ChunkMesh, TerrainVertex};
