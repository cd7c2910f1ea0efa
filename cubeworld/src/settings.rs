use serde::{Deserialize, Serialize};

use cubeworld_voxels::BlockConfig;
use cubeworld_world::GeneratorConfig;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    pub generator: GeneratorConfig,
    /// Chunks covering this many blocks around the origin on each axis are loaded at startup.
    pub load_radius: i64,
    pub block_config: BlockConfig,
    pub pick: PickSettings,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PickSettings {
    pub max_steps: usize,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            generator: GeneratorConfig::default(),
            load_radius: 32,
            block_config: BlockConfig::default(),
            pick: PickSettings::default(),
        }
    }
}

impl Default for PickSettings {
    fn default() -> Self {
        Self { max_steps: 64 }
    }
}
