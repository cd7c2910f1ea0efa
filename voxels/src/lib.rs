//! Types used to represent the voxel-based world.
//!
pub mod config;
mod core;
pub mod index_utils;

pub use crate::{
    config::{BlockConfig, BlockConfigHelper, BlockInfo, TextureRegion},
    core::{BlockId, Chunk},
    index_utils::{CHUNK_SHIFT, CHUNK_SIZE},
};
