use std::collections::HashMap;
use std::time::Instant;

use cgmath::Point3;
use log::{info, warn};

use cubeworld_voxels::index_utils;
use cubeworld_world::{World, WorldError};

use crate::chunk_mesh::ChunkMesh;

/// One mesh per loaded chunk of a world.
#[derive(Debug, Default)]
pub struct WorldMeshes {
    meshes: HashMap<Point3<i64>, ChunkMesh>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct MeshStats {
    pub count_meshes: usize,
    pub count_vertices: usize,
    pub count_triangles: usize,
    /// Bytes allocated across all vertex and index buffers.
    pub allocated_bytes: usize,
}

impl WorldMeshes {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a mesh for every loaded chunk, reusing existing buffers. Meshes for chunks that are
    /// no longer loaded are dropped. Returns the number of meshes built.
    pub fn build_all(&mut self, world: &World) -> usize {
        let ts_start = Instant::now();

        self.meshes.retain(|&chunk_pos, _| world.is_loaded(chunk_pos));

        let mut count = 0;
        for (chunk_pos, chunk) in world.iter_chunks() {
            let mesh = self
                .meshes
                .entry(chunk_pos)
                .or_insert_with(ChunkMesh::standard);
            mesh.build_from_chunk(chunk, index_utils::chunk_origin(chunk_pos));
            count += 1;
        }

        let elapsed = ts_start.elapsed();
        metrics::timing!("render.world_meshes.build_all", elapsed);
        info!("Built {} chunk meshes in {:?}", count, elapsed);

        count
    }

    /// Rebuilds the mesh of a single chunk, e.g. after `World::set_block`.
    pub fn rebuild(&mut self, world: &World, chunk_pos: Point3<i64>) -> Result<(), WorldError> {
        if !world.is_loaded(chunk_pos) {
            warn!("Not building mesh for unloaded chunk {:?}", chunk_pos);
            return Err(WorldError::ChunkNotLoaded(chunk_pos));
        }

        self.meshes
            .entry(chunk_pos)
            .or_insert_with(ChunkMesh::standard)
            .build(world, chunk_pos)
    }

    pub fn get(&self, chunk_pos: Point3<i64>) -> Option<&ChunkMesh> {
        self.meshes.get(&chunk_pos)
    }

    /// Visits every mesh with the coordinate of its chunk, in an unspecified order.
    pub fn iter(&self) -> impl Iterator<Item = (Point3<i64>, &ChunkMesh)> + '_ {
        self.meshes.iter().map(|(&pos, mesh)| (pos, mesh))
    }

    pub fn stats(&self) -> MeshStats {
        self.meshes
            .values()
            .fold(MeshStats::default(), |stats, mesh| MeshStats {
                count_meshes: stats.count_meshes + 1,
                count_vertices: stats.count_vertices + mesh.vertices().len(),
                count_triangles: stats.count_triangles + mesh.triangle_count(),
                allocated_bytes: stats.allocated_bytes
                    + mesh.capacity().vertex_bytes()
                    + mesh.capacity().index_bytes(),
            })
    }
}
