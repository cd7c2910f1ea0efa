use std::collections::HashMap;
use std::time::Instant;

use cgmath::Point3;
use log::info;

use cubeworld_util::{convert_vec, Bounds};
use cubeworld_voxels::{index_utils, BlockId, Chunk};

use crate::{generator::generate_chunk, BlockGenerator, WorldError};

/// Sparse storage of standard-sized chunks, keyed by chunk coordinate. Chunks are generated on
/// demand from the world's generator and never exist partially.
pub struct World {
    chunks: HashMap<Point3<i64>, Chunk>,
    generator: Box<dyn BlockGenerator>,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WorldSummary {
    pub count_chunks: usize,
    pub count_total: usize,
    pub count_nonempty: usize,
    pub pct_nonempty: f64,
}

impl World {
    pub fn new<G>(generator: G) -> Self
    where
        G: BlockGenerator + 'static,
    {
        World {
            chunks: HashMap::new(),
            generator: Box::new(generator),
        }
    }

    /// Generates and inserts the chunk at `chunk_pos` unless it is already loaded. Returns
    /// whether a chunk was generated. An existing chunk, including any edits made to it, is
    /// never replaced.
    pub fn load_chunk(&mut self, chunk_pos: Point3<i64>) -> bool {
        if self.chunks.contains_key(&chunk_pos) {
            return false;
        }

        let chunk = self.generate(chunk_pos);
        self.chunks.insert(chunk_pos, chunk);
        true
    }

    /// Regenerates the chunk at `chunk_pos`, discarding whatever was loaded there.
    pub fn reload_chunk(&mut self, chunk_pos: Point3<i64>) {
        let chunk = self.generate(chunk_pos);
        self.chunks.insert(chunk_pos, chunk);
    }

    /// Loads every chunk whose chunk coordinate lies in `chunk_bounds`. Returns the number of
    /// chunks that were newly generated.
    pub fn load_region(&mut self, chunk_bounds: Bounds<i64>) -> usize {
        let ts_start = Instant::now();
        info!(
            "Loading {} chunks in {:?}",
            chunk_bounds.volume(),
            chunk_bounds
        );

        let mut count_loaded = 0;
        for chunk_pos in chunk_bounds.iter_points() {
            if self.load_chunk(chunk_pos) {
                count_loaded += 1;
            }
        }

        let elapsed = ts_start.elapsed();
        metrics::timing!("world.load_region", elapsed);
        info!("Generated {} chunks in {:?}", count_loaded, elapsed);

        count_loaded
    }

    /// Loads the chunks covering every block within `radius` of `center` on each axis.
    pub fn load_blocks_around(&mut self, center: Point3<i64>, radius: i64) -> usize {
        let chunk_size = convert_vec!(index_utils::chunk_size(), i64);
        let chunk_bounds = Bounds::around(center, radius).quantize_down(chunk_size);
        self.load_region(chunk_bounds)
    }

    #[inline]
    pub fn is_loaded(&self, chunk_pos: Point3<i64>) -> bool {
        self.chunks.contains_key(&chunk_pos)
    }

    #[inline]
    pub fn chunk(&self, chunk_pos: Point3<i64>) -> Result<&Chunk, WorldError> {
        self.chunks
            .get(&chunk_pos)
            .ok_or(WorldError::ChunkNotLoaded(chunk_pos))
    }

    /// Looks up the block at an absolute block coordinate.
    #[inline]
    pub fn block_at(&self, p: Point3<i64>) -> Result<BlockId, WorldError> {
        let (chunk_pos, inner_pos) = index_utils::to_chunk_pos(p);
        let chunk = self.chunk(chunk_pos)?;
        Ok(chunk.get_block(inner_pos))
    }

    /// Changes the block at an absolute block coordinate and returns the coordinate of the chunk
    /// that was modified. Meshes of that chunk are not updated.
    pub fn set_block(&mut self, p: Point3<i64>, block: BlockId) -> Result<Point3<i64>, WorldError> {
        let (chunk_pos, inner_pos) = index_utils::to_chunk_pos(p);
        let chunk = self
            .chunks
            .get_mut(&chunk_pos)
            .ok_or(WorldError::ChunkNotLoaded(chunk_pos))?;
        chunk.set_block(inner_pos, block);
        Ok(chunk_pos)
    }

    /// Visits every loaded chunk exactly once, in an unspecified order.
    #[inline]
    pub fn iter_chunks(&self) -> impl Iterator<Item = (Point3<i64>, &Chunk)> + '_ {
        self.chunks.iter().map(|(&pos, chunk)| (pos, chunk))
    }

    #[inline]
    pub fn chunk_count(&self) -> usize {
        self.chunks.len()
    }

    pub fn debug_summary(&self) -> WorldSummary {
        let count_total = self.chunks.len() * index_utils::chunk_size_total();
        let count_nonempty = self
            .chunks
            .values()
            .map(|chunk| chunk.count_nonempty())
            .sum();

        let pct_nonempty = if count_total == 0 {
            0.0
        } else {
            (count_nonempty as f64 / count_total as f64) * 100.0
        };

        WorldSummary {
            count_chunks: self.chunks.len(),
            count_total,
            count_nonempty,
            pct_nonempty,
        }
    }

    fn generate(&self, chunk_pos: Point3<i64>) -> Chunk {
        let origin = index_utils::chunk_origin(chunk_pos);
        generate_chunk(origin, index_utils::chunk_size(), &*self.generator)
    }
}

impl std::fmt::Debug for World {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("World")
            .field("chunk_count", &self.chunks.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use cgmath::Vector3;
    use rand::Rng;

    use super::*;
    use crate::GeneratorConfig;

    const CS: i64 = index_utils::CHUNK_SIZE as i64;

    /// Encodes the position into the block so lookups can be checked exactly.
    fn coordinate_hash(p: Point3<i64>) -> BlockId {
        BlockId::from_u8((p.x * 7 + p.y * 13 + p.z * 31).rem_euclid(251) as u8)
    }

    #[test]
    fn test_block_at_matches_chunk() {
        let mut world = World::new(coordinate_hash);
        let chunks = [
            Point3::new(0, 0, 0),
            Point3::new(-1, 0, 0),
            Point3::new(-1, -2, 3),
        ];
        for &chunk_pos in chunks.iter() {
            assert!(world.load_chunk(chunk_pos));
        }

        let mut rng = rand::thread_rng();
        for &chunk_pos in chunks.iter() {
            let chunk = world.chunk(chunk_pos).unwrap();
            for _ in 0..200 {
                let local = Point3::new(
                    rng.gen_range(0, index_utils::CHUNK_SIZE),
                    rng.gen_range(0, index_utils::CHUNK_SIZE),
                    rng.gen_range(0, index_utils::CHUNK_SIZE),
                );
                let p = index_utils::from_chunk_pos(chunk_pos, local);
                assert_eq!(world.block_at(p), Ok(chunk.get_block(local)));
                assert_eq!(world.block_at(p), Ok(coordinate_hash(p)));
            }
        }
    }

    #[test]
    fn test_negative_coordinates() {
        let mut world = World::new(coordinate_hash);
        world.load_chunk(Point3::new(-1, -1, -1));

        for &p in [
            Point3::new(-1, -1, -1),
            Point3::new(-CS, -CS, -CS),
            Point3::new(-CS, -1, -5),
        ]
        .iter()
        {
            assert_eq!(world.block_at(p), Ok(coordinate_hash(p)));
        }

        assert_eq!(
            world.block_at(Point3::new(-CS - 1, -1, -1)),
            Err(WorldError::ChunkNotLoaded(Point3::new(-2, -1, -1)))
        );
        assert_eq!(
            world.block_at(Point3::new(0, -1, -1)),
            Err(WorldError::ChunkNotLoaded(Point3::new(0, -1, -1)))
        );
    }

    #[test]
    fn test_unloaded_is_not_air() {
        let world = World::new(GeneratorConfig::Empty);
        assert_eq!(
            world.block_at(Point3::new(3, 4, 5)),
            Err(WorldError::ChunkNotLoaded(Point3::new(0, 0, 0)))
        );
        assert!(world.chunk(Point3::new(0, 0, 0)).is_err());
        assert!(!world.is_loaded(Point3::new(0, 0, 0)));
    }

    #[test]
    fn test_load_chunk_keeps_edits() {
        let mut world = World::new(GeneratorConfig::Solid {
            block: BlockId::from_u8(1),
        });
        let p = Point3::new(CS + 3, 2, -7);

        assert_eq!(
            world.set_block(p, BlockId::air()),
            Err(WorldError::ChunkNotLoaded(Point3::new(1, 0, -1)))
        );

        assert!(world.load_chunk(Point3::new(1, 0, -1)));
        assert_eq!(world.set_block(p, BlockId::air()), Ok(Point3::new(1, 0, -1)));
        assert_eq!(world.block_at(p), Ok(BlockId::air()));

        assert!(!world.load_chunk(Point3::new(1, 0, -1)));
        assert_eq!(world.block_at(p), Ok(BlockId::air()));
        assert_eq!(world.chunk_count(), 1);

        world.reload_chunk(Point3::new(1, 0, -1));
        assert_eq!(world.block_at(p), Ok(BlockId::from_u8(1)));
        assert_eq!(world.chunk_count(), 1);
    }

    #[test]
    fn test_load_blocks_around() {
        let mut world = World::new(GeneratorConfig::default());
        let count = world.load_blocks_around(Point3::new(0, 0, 0), 10);

        // -10..10 on each axis straddles chunks -1 and 0.
        assert_eq!(count, 8);
        assert_eq!(world.chunk_count(), 8);
        for chunk_pos in Bounds::new(Point3::new(-1, -1, -1), Vector3::new(2, 2, 2)).iter_points() {
            assert!(world.is_loaded(chunk_pos));
        }

        assert_eq!(world.load_blocks_around(Point3::new(5, 5, 5), 3), 0);
        assert_eq!(world.iter_chunks().count(), 8);
    }

    #[test]
    fn test_debug_summary() {
        let mut world = World::new(|p: Point3<i64>| {
            if p.y < 0 {
                BlockId::from_u8(1)
            } else {
                BlockId::air()
            }
        });
        world.load_region(Bounds::new(Point3::new(0, -1, 0), Vector3::new(1, 2, 1)));

        let summary = world.debug_summary();
        assert_eq!(summary.count_chunks, 2);
        assert_eq!(summary.count_total, 2 * index_utils::chunk_size_total());
        assert_eq!(summary.count_nonempty, index_utils::chunk_size_total());
        assert!((summary.pct_nonempty - 50.0).abs() < 1e-9);
    }
}
