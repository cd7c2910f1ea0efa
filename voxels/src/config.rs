use std::collections::HashMap;

use anyhow::{bail, Result};
use serde::{Deserialize, Serialize};

use crate::BlockId;

/// A rectangle in the texture atlas, in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TextureRegion {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

/// Specification of a block type.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BlockInfo {
    pub name: String,
    /// Where the block's face texture lives in the atlas. Air has none.
    #[serde(default)]
    pub texture: Option<TextureRegion>,
}

/// Specification of the selection of available blocks. A block's id is its position in
/// `blocks`; the first entry must be air.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BlockConfig {
    /// Size of the texture atlas in pixels.
    pub atlas_size: [u32; 2],
    pub blocks: Vec<BlockInfo>,
}

#[derive(Debug, Clone)]
pub struct BlockConfigHelper {
    blocks_by_name: HashMap<String, (BlockId, BlockInfo)>,
    blocks_by_id: Vec<BlockInfo>,
    atlas_size: [u32; 2],
}

impl Default for BlockConfig {
    fn default() -> Self {
        let tile = |index: u32| TextureRegion {
            x: index * 16,
            y: 0,
            width: 16,
            height: 16,
        };

        let block = |name: &str, texture| BlockInfo {
            name: name.into(),
            texture,
        };

        BlockConfig {
            atlas_size: [64, 16],
            blocks: vec![
                block("Air", None),
                block("Stone", Some(tile(0))),
                block("Dirt", Some(tile(1))),
                block("Grass", Some(tile(2))),
            ],
        }
    }
}

impl BlockConfigHelper {
    pub fn new(config: &BlockConfig) -> Result<Self> {
        if config.blocks.is_empty() || config.blocks[0].texture.is_some() {
            bail!("First entry in block config must be air, with no texture");
        }

        if config.blocks.len() > usize::from(u8::MAX) + 1 {
            bail!(
                "Block config has {} entries but at most {} block ids exist",
                config.blocks.len(),
                usize::from(u8::MAX) + 1
            );
        }

        let [atlas_width, atlas_height] = config.atlas_size;
        for info in &config.blocks[1..] {
            let region = match info.texture {
                Some(region) => region,
                None => bail!("Block {} has no texture region", info.name),
            };

            if region.x + region.width > atlas_width || region.y + region.height > atlas_height {
                bail!(
                    "Texture region {:?} of block {} lies outside the {}x{} atlas",
                    region,
                    info.name,
                    atlas_width,
                    atlas_height
                );
            }
        }

        let blocks_by_id = config.blocks.clone();

        let blocks_by_name = blocks_by_id
            .iter()
            .enumerate()
            .map(|(i, info)| {
                let name = info.name.clone();
                let block = BlockId::from_u8(i as u8);
                (name, (block, info.clone()))
            })
            .collect();

        for (block_id, info) in blocks_by_id.iter().enumerate() {
            log::info!("Block id {} is {}", block_id, info.name);
        }

        Ok(Self {
            blocks_by_name,
            blocks_by_id,
            atlas_size: config.atlas_size,
        })
    }

    pub fn from_yaml<R: std::io::Read>(reader: R) -> Result<Self> {
        let config: BlockConfig = serde_yaml::from_reader(reader)?;
        Self::new(&config)
    }

    pub fn block_by_name(&self, name: &str) -> Option<(BlockId, &BlockInfo)> {
        let (block, info) = self.blocks_by_name.get(name)?;
        Some((*block, info))
    }

    pub fn block_info(&self, block: BlockId) -> Option<&BlockInfo> {
        self.blocks_by_id.get(block.to_u8() as usize)
    }

    pub fn blocks(&self) -> &[BlockInfo] {
        &self.blocks_by_id[..]
    }

    pub fn atlas_size(&self) -> [u32; 2] {
        self.atlas_size
    }

    /// The atlas region of every solid block, keyed by id.
    pub fn texture_regions(&self) -> HashMap<BlockId, TextureRegion> {
        self.blocks_by_id
            .iter()
            .enumerate()
            .filter_map(|(i, info)| {
                info.texture
                    .map(|region| (BlockId::from_u8(i as u8), region))
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let helper = BlockConfigHelper::new(&BlockConfig::default()).unwrap();
        assert_eq!(helper.blocks().len(), 4);

        let (grass, info) = helper.block_by_name("Grass").unwrap();
        assert_eq!(grass, BlockId::from_u8(3));
        assert_eq!(info.texture.unwrap().x, 32);
        assert_eq!(helper.block_info(grass).unwrap().name, "Grass");
        assert!(helper.block_by_name("Lava").is_none());

        let regions = helper.texture_regions();
        assert_eq!(regions.len(), 3);
        assert!(!regions.contains_key(&BlockId::air()));
    }

    #[test]
    fn test_from_yaml() {
        let yaml = "
atlas_size: [32, 32]
blocks:
  - name: Air
  - name: Rock
    texture: { x: 16, y: 16, width: 16, height: 16 }
";
        let helper = BlockConfigHelper::from_yaml(yaml.as_bytes()).unwrap();
        assert_eq!(helper.atlas_size(), [32, 32]);
        let (rock, _) = helper.block_by_name("Rock").unwrap();
        assert_eq!(
            helper.texture_regions()[&rock],
            TextureRegion {
                x: 16,
                y: 16,
                width: 16,
                height: 16
            }
        );
    }

    #[test]
    fn test_rejects_bad_configs() {
        let mut config = BlockConfig::default();
        config.blocks.remove(0);
        assert!(BlockConfigHelper::new(&config).is_err());

        let mut config = BlockConfig::default();
        config.blocks[2].texture = None;
        assert!(BlockConfigHelper::new(&config).is_err());

        let mut config = BlockConfig::default();
        config.atlas_size = [32, 16];
        assert!(BlockConfigHelper::new(&config).is_err());
    }
}
