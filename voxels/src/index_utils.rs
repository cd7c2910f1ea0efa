//! Mapping between block coordinates, chunk coordinates and linear indices.
//!
//! Within a grid the linear index of `(x, y, z)` is `x + z * width + y * width * depth`: x varies
//! fastest, then z, then y. Meshing emits geometry in this order, so it must not change.

use cgmath::{EuclideanSpace, Point3, Vector3};

/// log2 of the chunk side length.
pub const CHUNK_SHIFT: u32 = 5;
/// Side length of a cubic chunk, in blocks.
pub const CHUNK_SIZE: usize = 1 << CHUNK_SHIFT;

#[inline]
pub const fn chunk_size() -> Vector3<usize> {
    Vector3 {
        x: CHUNK_SIZE,
        y: CHUNK_SIZE,
        z: CHUNK_SIZE,
    }
}

#[inline]
pub const fn chunk_size_total() -> usize {
    chunk_size().x * chunk_size().y * chunk_size().z
}

#[inline]
pub fn pack_xyz(bounds: Vector3<usize>, p: Point3<usize>) -> usize {
    assert!(point_within_size(p, bounds));
    p.x + p.z * bounds.x + p.y * bounds.x * bounds.z
}

#[inline]
pub fn unpack_xyz(bounds: Vector3<usize>, index: usize) -> Point3<usize> {
    assert!(index < bounds.x * bounds.y * bounds.z);
    let xz = index % (bounds.x * bounds.z);

    Point3 {
        x: xz % bounds.x,
        y: index / (bounds.x * bounds.z),
        z: xz / bounds.x,
    }
}

#[inline]
pub fn point_within_size(point: Point3<usize>, bounds: Vector3<usize>) -> bool {
    point.x < bounds.x && point.y < bounds.y && point.z < bounds.z
}

/// From a point in block coordinates, return the chunk coordinate and the position of the block
/// within that chunk.
///
/// The chunk coordinate is an arithmetic shift, i.e. a floor division, so chunk `-1` holds blocks
/// `-CHUNK_SIZE..=-1` and the local position is never negative.
#[inline]
pub fn to_chunk_pos(p: Point3<i64>) -> (Point3<i64>, Point3<usize>) {
    let chunk_pos = Point3 {
        x: p.x >> CHUNK_SHIFT,
        y: p.y >> CHUNK_SHIFT,
        z: p.z >> CHUNK_SHIFT,
    };
    let local = p - chunk_origin(chunk_pos);
    let inner_pos = Point3 {
        x: local.x as usize,
        y: local.y as usize,
        z: local.z as usize,
    };
    (chunk_pos, inner_pos)
}

/// The block coordinates of the lowest corner of a chunk.
#[inline]
pub fn chunk_origin(chunk_pos: Point3<i64>) -> Point3<i64> {
    Point3 {
        x: chunk_pos.x << CHUNK_SHIFT,
        y: chunk_pos.y << CHUNK_SHIFT,
        z: chunk_pos.z << CHUNK_SHIFT,
    }
}

/// Inverse of `to_chunk_pos`.
#[inline]
pub fn from_chunk_pos(chunk_pos: Point3<i64>, inner_pos: Point3<usize>) -> Point3<i64> {
    let inner_offset = Point3 {
        x: inner_pos.x as i64,
        y: inner_pos.y as i64,
        z: inner_pos.z as i64,
    } - Point3::origin();
    chunk_origin(chunk_pos) + inner_offset
}
