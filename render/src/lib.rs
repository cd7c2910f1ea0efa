//! Turns chunks into triangle meshes ready for upload to a GPU.

pub mod capacity;
mod chunk_mesh;
pub mod mesh;
mod texture;
mod world_meshes;

pub use capacity::{worst_case_cubes, MeshCapacity};
pub use chunk_mesh::ChunkMesh;
pub use mesh::{Index, Vertex, VertexAttribute, VERTEX_STRIDE};
pub use texture::BlockTextures;
pub use world_meshes::{MeshStats, WorldMeshes};
