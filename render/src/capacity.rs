//! Worst-case buffer sizes for chunk meshes.
//!
//! Faces are only emitted between a solid and an empty cell, so a chunk has the most exposed
//! faces when no two solid cells share a face: the 3D checkerboard, solid wherever `x + y + z`
//! is even. Every solid cell then shows all six faces.

use cgmath::Vector3;

use crate::mesh::Vertex;

/// Number of solid cells in a checkerboard chunk of the given size.
///
/// Each axis of length `n` has `n / 2` odd and `n - n / 2` even coordinates; a cell is solid when
/// an even number of its coordinates are odd.
///
/// Six faces per counted cell bounds the faces of any chunk whose axes are all at least 2 long.
/// With an axis of length 1 neighbouring solid cells still expose both faces across that axis,
/// so a solid 1x1x2 chunk has 10 faces against a bound of 6.
pub fn worst_case_cubes(size: Vector3<usize>) -> usize {
    let lo = |n: usize| n >> 1;
    let hi = |n: usize| lo(n) + (n & 1);

    let (lo_w, hi_w) = (lo(size.x), hi(size.x));
    let (lo_h, hi_h) = (lo(size.y), hi(size.y));
    let (lo_d, hi_d) = (lo(size.z), hi(size.z));

    hi_h * (hi_w * hi_d + lo_w * lo_d) + lo_h * (lo_w * hi_d + hi_w * lo_d)
}

/// Buffer sizes that no chunk of a given size can exceed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MeshCapacity {
    pub faces: usize,
    pub vertices: usize,
    pub indices: usize,
}

impl MeshCapacity {
    pub fn for_chunk_size(size: Vector3<usize>) -> Self {
        let faces = worst_case_cubes(size) * 6;
        MeshCapacity {
            faces,
            vertices: faces * 4,
            indices: faces * 2 * 3,
        }
    }

    /// Size of the vertex buffer in bytes.
    pub fn vertex_bytes(&self) -> usize {
        self.vertices * std::mem::size_of::<Vertex>()
    }

    /// Size of the index buffer in bytes.
    pub fn index_bytes(&self) -> usize {
        self.indices * std::mem::size_of::<crate::mesh::Index>()
    }
}
