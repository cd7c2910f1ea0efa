use std::collections::HashMap;

use cubeworld_voxels::{BlockConfigHelper, BlockId, TextureRegion};

/// Maps each solid block to its region of the texture atlas. Face texture coordinates from the
/// mesh builder run from 0 to 1 and are scaled into this region at draw time.
#[derive(Debug, Clone)]
pub struct BlockTextures {
    atlas_size: [u32; 2],
    regions: HashMap<BlockId, TextureRegion>,
}

impl BlockTextures {
    pub fn new(atlas_size: [u32; 2], regions: HashMap<BlockId, TextureRegion>) -> Self {
        BlockTextures {
            atlas_size,
            regions,
        }
    }

    pub fn from_config(helper: &BlockConfigHelper) -> Self {
        BlockTextures::new(helper.atlas_size(), helper.texture_regions())
    }

    pub fn region(&self, block: BlockId) -> Option<TextureRegion> {
        self.regions.get(&block).copied()
    }

    /// The block's region in normalized atlas coordinates, as `[min, max]`.
    pub fn uv_rect(&self, block: BlockId) -> Option<[[f32; 2]; 2]> {
        let region = self.region(block)?;
        let [width, height] = self.atlas_size;
        let (width, height) = (width as f32, height as f32);

        Some([
            [region.x as f32 / width, region.y as f32 / height],
            [
                (region.x + region.width) as f32 / width,
                (region.y + region.height) as f32 / height,
            ],
        ])
    }

    /// Maps a face texture coordinate into the atlas for the given block.
    pub fn atlas_coord(&self, block: BlockId, tex_coord: [f32; 2]) -> Option<[f32; 2]> {
        let [min, max] = self.uv_rect(block)?;
        Some([
            min[0] + tex_coord[0] * (max[0] - min[0]),
            min[1] + tex_coord[1] * (max[1] - min[1]),
        ])
    }

    pub fn len(&self) -> usize {
        self.regions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.regions.is_empty()
    }
}
