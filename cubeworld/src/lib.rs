pub mod files;
pub mod settings;

use anyhow::{anyhow, bail, Result};
use cgmath::Point3;
use log::info;

use cubeworld_render::{BlockTextures, MeshStats, WorldMeshes};
use cubeworld_util::convert_point;
use cubeworld_voxels::BlockConfigHelper;
use cubeworld_world::{cast_ray, RaycastHit, World};

use settings::Settings;

/// A generated world together with the block table it was generated against.
pub struct Session {
    pub blocks: BlockConfigHelper,
    pub world: World,
}

impl Session {
    pub fn new(settings: &Settings) -> Result<Self> {
        let blocks = BlockConfigHelper::new(&settings.block_config)?;

        if let Some(block) = settings.generator.block() {
            if blocks.block_info(block).is_none() {
                bail!(
                    "Generator places block id {} but the block table has only {} entries",
                    block.to_u8(),
                    blocks.blocks().len()
                );
            }
        }

        info!("Creating world: {:?}", settings.generator);
        let world = World::new(settings.generator.clone());
        Ok(Session { blocks, world })
    }

    /// Loads the chunks covering `radius` blocks around `center`.
    pub fn load_around(&mut self, center: Point3<i64>, radius: i64) {
        self.world.load_blocks_around(center, radius);
        info!("World summary: {:?}", self.world.debug_summary());
    }

    pub fn build_meshes(&self) -> (WorldMeshes, BlockTextures) {
        let mut meshes = WorldMeshes::new();
        meshes.build_all(&self.world);
        let textures = BlockTextures::from_config(&self.blocks);
        info!("{} block textures in atlas", textures.len());
        (meshes, textures)
    }

    /// Casts a ray after loading every chunk it could pass through. Each step moves one voxel
    /// along one axis, so the walk never leaves `max_steps` voxels around the start.
    pub fn pick(
        &mut self,
        from: Point3<f64>,
        to: Point3<f64>,
        max_steps: usize,
    ) -> Option<RaycastHit> {
        let center = convert_point!(from.map(f64::floor), i64);
        self.load_around(center, max_steps as i64 + 1);

        cast_ray(&self.world, from, to, max_steps)
    }

    pub fn block_name(&self, hit: &RaycastHit) -> &str {
        self.blocks
            .block_info(hit.block)
            .map_or("<unknown>", |info| info.name.as_str())
    }
}

pub fn describe_stats(stats: &MeshStats) -> String {
    format!(
        "{} meshes, {} vertices, {} triangles, {} MB allocated",
        stats.count_meshes,
        stats.count_vertices,
        stats.count_triangles,
        stats.allocated_bytes / (1024 * 1024)
    )
}

/// Parses a point written as `x,y,z`.
pub fn parse_point(s: &str) -> Result<Point3<f64>> {
    let parts = s
        .split(',')
        .map(|part| {
            part.trim()
                .parse::<f64>()
                .map_err(|err| anyhow!("Invalid coordinate {:?}: {}", part, err))
        })
        .collect::<Result<Vec<_>>>()?;

    match parts[..] {
        [x, y, z] => Ok(Point3::new(x, y, z)),
        _ => bail!("Expected 3 comma-separated coordinates, got {:?}", s),
    }
}

#[cfg(test)]
mod tests {
    use cubeworld_voxels::BlockId;
    use cubeworld_world::GeneratorConfig;

    use super::*;

    #[test]
    fn test_parse_point() {
        assert_eq!(
            parse_point("1.5, -2,3").unwrap(),
            Point3::new(1.5, -2.0, 3.0)
        );
        assert!(parse_point("1,2").is_err());
        assert!(parse_point("1,2,x").is_err());
        assert!(parse_point("1,2,3,4").is_err());
    }

    #[test]
    fn test_rejects_unknown_generator_block() {
        let mut settings = Settings::default();
        settings.generator = GeneratorConfig::Solid {
            block: BlockId::from_u8(9),
        };
        assert!(Session::new(&settings).is_err());
    }

    #[test]
    fn test_pick_loads_chunks() {
        let settings = Settings::default();
        let mut session = Session::new(&settings).unwrap();
        assert_eq!(session.world.chunk_count(), 0);

        // Straight down onto the sine hills at z = 8, where the surface is at y = 16.
        let hit = session
            .pick(Point3::new(4.5, 40.5, 8.5), Point3::new(4.5, -10.5, 8.5), 64)
            .unwrap();
        assert_eq!(hit.position, Point3::new(4, 15, 8));
        assert_eq!(session.block_name(&hit), "Stone");
        assert!(session.world.chunk_count() > 0);
    }

    #[test]
    fn test_pick_independent_of_loaded_chunks() {
        let settings = Settings::default();
        // The walk continues past `to` and reaches the surface below it.
        let from = Point3::new(4.5, 40.5, 8.5);
        let to = Point3::new(4.5, 38.5, 8.5);

        let mut fresh = Session::new(&settings).unwrap();
        let fresh_hit = fresh.pick(from, to, 64);

        let mut preloaded = Session::new(&settings).unwrap();
        preloaded.load_around(Point3::new(0, 0, 0), 32);
        let preloaded_hit = preloaded.pick(from, to, 64);

        assert_eq!(fresh_hit, preloaded_hit);
        assert_eq!(fresh_hit.map(|hit| hit.position), Some(Point3::new(4, 15, 8)));
    }

    #[test]
    fn test_build_meshes() {
        let mut settings = Settings::default();
        settings.generator = GeneratorConfig::Solid {
            block: BlockId::from_u8(2),
        };
        let mut session = Session::new(&settings).unwrap();
        session.load_around(Point3::new(0, 0, 0), 1);

        let (meshes, textures) = session.build_meshes();
        let stats = meshes.stats();
        assert_eq!(stats.count_meshes, 8);
        assert_eq!(stats.count_triangles, 8 * 6 * 32 * 32 * 2);
        assert!(textures.region(BlockId::from_u8(2)).is_some());
        assert!(describe_stats(&stats).starts_with("8 meshes"));
    }
}
