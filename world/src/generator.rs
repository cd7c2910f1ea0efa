use cgmath::{Point3, Vector3};
use serde::{Deserialize, Serialize};

use cubeworld_voxels::{BlockId, Chunk};

/// Decides the block at every absolute block coordinate. Must be a pure function of the
/// coordinate so that regenerating a chunk gives the same result.
pub trait BlockGenerator {
    fn block_at(&self, p: Point3<i64>) -> BlockId;
}

impl<F> BlockGenerator for F
where
    F: Fn(Point3<i64>) -> BlockId,
{
    #[inline]
    fn block_at(&self, p: Point3<i64>) -> BlockId {
        self(p)
    }
}

/// Selects one of the built-in generators.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum GeneratorConfig {
    /// Ridges running along x whose height follows `|sin|` of the z coordinate. Everything below
    /// the surface is `block`, everything above is air.
    SineHills {
        #[serde(default = "GeneratorConfig::default_amplitude")]
        amplitude: f64,
        #[serde(default = "GeneratorConfig::default_wavelength")]
        wavelength: f64,
        #[serde(default = "GeneratorConfig::default_block")]
        block: BlockId,
    },
    /// Solid wherever `x + y + z` is even.
    Checkerboard {
        #[serde(default = "GeneratorConfig::default_block")]
        block: BlockId,
    },
    Solid {
        #[serde(default = "GeneratorConfig::default_block")]
        block: BlockId,
    },
    Empty,
}

impl GeneratorConfig {
    /// The solid block this generator places, if any.
    pub fn block(&self) -> Option<BlockId> {
        match *self {
            GeneratorConfig::SineHills { block, .. }
            | GeneratorConfig::Checkerboard { block }
            | GeneratorConfig::Solid { block } => Some(block),
            GeneratorConfig::Empty => None,
        }
    }

    fn default_amplitude() -> f64 {
        16.0
    }

    fn default_wavelength() -> f64 {
        16.0
    }

    fn default_block() -> BlockId {
        BlockId::from_u8(1)
    }
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        GeneratorConfig::SineHills {
            amplitude: Self::default_amplitude(),
            wavelength: Self::default_wavelength(),
            block: Self::default_block(),
        }
    }
}

impl BlockGenerator for GeneratorConfig {
    fn block_at(&self, p: Point3<i64>) -> BlockId {
        match *self {
            GeneratorConfig::SineHills {
                amplitude,
                wavelength,
                block,
            } => {
                use std::f64::consts::PI;
                let height = (amplitude * (p.z as f64 / wavelength * PI).sin().abs()) as i64;
                if p.y < height {
                    block
                } else {
                    BlockId::air()
                }
            }
            GeneratorConfig::Checkerboard { block } => {
                if (p.x + p.y + p.z).rem_euclid(2) == 0 {
                    block
                } else {
                    BlockId::air()
                }
            }
            GeneratorConfig::Solid { block } => block,
            GeneratorConfig::Empty => BlockId::air(),
        }
    }
}

/// Fills a new chunk of the given size whose lowest corner sits at `origin` in block
/// coordinates. Each local position `l` holds `generator.block_at(origin + l)`.
pub fn generate_chunk<G>(origin: Point3<i64>, size: Vector3<usize>, generator: &G) -> Chunk
where
    G: BlockGenerator + ?Sized,
{
    let mut chunk = Chunk::empty(size);

    // Visit in storage order: x fastest, then z, then y.
    for y in 0..size.y {
        for z in 0..size.z {
            for x in 0..size.x {
                let local = Point3 { x, y, z };
                let p = Point3 {
                    x: origin.x + x as i64,
                    y: origin.y + y as i64,
                    z: origin.z + z as i64,
                };
                chunk.set_block(local, generator.block_at(p));
            }
        }
    }

    chunk
}
