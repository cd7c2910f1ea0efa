//! Finding the first solid block along a line segment.

use cgmath::{Point3, Vector3};

use cubeworld_util::VoxelRaycast;
use cubeworld_voxels::BlockId;

use crate::World;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RaycastHit {
    pub block: BlockId,
    pub position: Point3<i64>,
    /// Outward normal of the face the ray entered through. `None` when the ray starts inside the
    /// hit block.
    pub normal: Option<Vector3<i64>>,
    /// The voxel visited just before the hit, where a block placed against the hit face goes.
    pub adjacent: Option<Point3<i64>>,
}

/// Walks the voxels from `from` towards `to`, checking the starting voxel and then at most
/// `max_steps` more, and returns the first solid block found. Voxels in chunks that are not
/// loaded are passed through.
pub fn cast_ray(
    world: &World,
    from: Point3<f64>,
    to: Point3<f64>,
    max_steps: usize,
) -> Option<RaycastHit> {
    let mut ray = VoxelRaycast::new(from, to);
    let mut adjacent = None;

    for step in 0..=max_steps {
        if step > 0 {
            ray.step();
        }

        let position = ray.position();
        if let Ok(block) = world.block_at(position) {
            if block.is_solid() {
                return Some(RaycastHit {
                    block,
                    position,
                    normal: ray.entry_normal(),
                    adjacent,
                });
            }
        }

        adjacent = Some(position);
    }

    None
}
