//! The voxel world: sparse chunk storage, procedural generation and ray picking.

mod error;
pub mod generator;
pub mod pick;
mod world;

pub use error::WorldError;
pub use generator::{generate_chunk, BlockGenerator, GeneratorConfig};
pub use pick::{cast_ray, RaycastHit};
pub use world::{World, WorldSummary};
