use cgmath::{Point3, Vector3};
use serde::{Deserialize, Serialize};

use crate::index_utils;

/// Identifies the material of a single block. Zero is air; every other value is solid and is an
/// index into the block table held by `BlockConfigHelper`.
#[derive(
    Debug, Default, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[repr(transparent)]
pub struct BlockId(u8);

/// A dense box of blocks: the unit of storage in the world and the unit of meshing.
///
/// The size is fixed at construction. Blocks are stored x-fastest, then z, then y; see
/// `index_utils::pack_xyz`.
#[derive(Clone, PartialEq, Eq)]
pub struct Chunk {
    size: Vector3<usize>,
    /* Memory layout (if chunk size were 4x2x3)
    y-level 0
       x - >
     z 0  1  2  3
     | 4  5  6  7
     v 8  9  10 11

     y-level 1
       x - >
     z 12 13 14 15
     | 16 17 18 19
     v 20 21 22 23
     */
    blocks: Vec<BlockId>,
}

impl BlockId {
    #[inline]
    pub const fn air() -> Self {
        BlockId(0)
    }

    #[inline]
    pub const fn from_u8(val: u8) -> Self {
        BlockId(val)
    }

    #[inline]
    pub fn to_u8(self) -> u8 {
        self.0
    }

    #[inline]
    pub fn is_empty(self) -> bool {
        self.0 == 0
    }

    #[inline]
    pub fn is_solid(self) -> bool {
        self.0 != 0
    }
}

impl Chunk {
    /// Creates a chunk filled with air.
    pub fn empty(size: Vector3<usize>) -> Chunk {
        Chunk::filled(size, BlockId::air())
    }

    pub fn filled(size: Vector3<usize>, block: BlockId) -> Chunk {
        Chunk {
            size,
            blocks: vec![block; size.x * size.y * size.z],
        }
    }

    /// A chunk of the standard `CHUNK_SIZE` cube filled with air.
    pub fn standard() -> Chunk {
        Chunk::empty(index_utils::chunk_size())
    }

    #[inline]
    pub fn size(&self) -> Vector3<usize> {
        self.size
    }

    #[inline]
    pub fn get_block(&self, p: Point3<usize>) -> BlockId {
        self.blocks[index_utils::pack_xyz(self.size, p)]
    }

    #[inline]
    pub fn set_block(&mut self, p: Point3<usize>, val: BlockId) {
        self.blocks[index_utils::pack_xyz(self.size, p)] = val;
    }

    /// Like `get_block` but takes signed coordinates and returns `None` for points outside the
    /// chunk instead of panicking.
    #[inline]
    pub fn try_get_block(&self, p: Point3<i64>) -> Option<BlockId> {
        if p.x < 0 || p.y < 0 || p.z < 0 {
            return None;
        }

        let p = Point3::new(p.x as usize, p.y as usize, p.z as usize);
        if index_utils::point_within_size(p, self.size) {
            Some(self.get_block(p))
        } else {
            None
        }
    }

    /// The raw block storage, in linear index order.
    #[inline]
    pub fn blocks(&self) -> &[BlockId] {
        &self.blocks[..]
    }

    /// Visits every block with its local position, in linear index order.
    pub fn iter_blocks(&self) -> impl Iterator<Item = (Point3<usize>, BlockId)> + '_ {
        let size = self.size;
        self.blocks
            .iter()
            .enumerate()
            .map(move |(index, &block)| (index_utils::unpack_xyz(size, index), block))
    }

    pub fn count_nonempty(&self) -> usize {
        self.blocks.iter().filter(|block| block.is_solid()).count()
    }
}

impl std::fmt::Debug for Chunk {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "Chunk {{")?;
        for y in 0..self.size.y {
            writeln!(f, "y={}", y)?;
            for z in 0..self.size.z {
                for x in 0..self.size.x {
                    write!(f, "{}", self.get_block(Point3 { x, y, z }).0)?;
                }
                writeln!(f)?;
            }
        }
        write!(f, "}}")
    }
}
