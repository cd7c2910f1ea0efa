use std::time::Instant;

use cgmath::{EuclideanSpace, Matrix4, Point3, SquareMatrix, Vector3};
use log::debug;
use zerocopy::AsBytes;

use cubeworld_util::convert_point;
use cubeworld_voxels::{index_utils, Chunk};
use cubeworld_world::{World, WorldError};

use crate::capacity::MeshCapacity;
use crate::mesh::{vertex, Index, Vertex};

/// Triangulated surface of one chunk. Buffers are sized once for the worst case and reused by
/// every rebuild.
#[derive(Debug, Clone)]
pub struct ChunkMesh {
    size: Vector3<usize>,
    capacity: MeshCapacity,
    vertices: Vec<Vertex>,
    indices: Vec<Index>,
    model: Matrix4<f32>,
}

/// For each axis, the two unit vectors spanning a face perpendicular to it, in cyclic order.
const FACE_SPAN: [[[f32; 3]; 2]; 3] = [
    [[0., 1., 0.], [0., 0., 1.]],
    [[0., 0., 1.], [1., 0., 0.]],
    [[1., 0., 0.], [0., 1., 0.]],
];

const FACE_TEX_COORDS: [[f32; 2]; 4] = [[0., 0.], [1., 0.], [1., 1.], [0., 1.]];

impl ChunkMesh {
    /// Allocates buffers for chunks of the given size. Every axis must be at least 2 long; below
    /// that a lone solid cell exposes faces on both sides of the flat axis and the checkerboard
    /// bound no longer holds.
    pub fn new(size: Vector3<usize>) -> Self {
        assert!(
            size.x >= 2 && size.y >= 2 && size.z >= 2,
            "chunk mesh size {:?} is too small",
            size
        );

        let capacity = MeshCapacity::for_chunk_size(size);
        ChunkMesh {
            size,
            capacity,
            vertices: Vec::with_capacity(capacity.vertices),
            indices: Vec::with_capacity(capacity.indices),
            model: Matrix4::identity(),
        }
    }

    /// A mesh for standard-sized world chunks.
    pub fn standard() -> Self {
        ChunkMesh::new(index_utils::chunk_size())
    }

    /// Rebuilds the mesh from the world's chunk at `chunk_pos`. If the chunk is not loaded the
    /// previous contents are kept.
    pub fn build(&mut self, world: &World, chunk_pos: Point3<i64>) -> Result<(), WorldError> {
        let chunk = world.chunk(chunk_pos)?;
        self.build_from_chunk(chunk, index_utils::chunk_origin(chunk_pos));
        Ok(())
    }

    /// Rebuilds the mesh from a chunk whose lowest corner is at `origin` in world space.
    ///
    /// # Panics
    ///
    /// Panics if the chunk's size differs from the size the mesh was allocated for.
    pub fn build_from_chunk(&mut self, chunk: &Chunk, origin: Point3<i64>) {
        assert_eq!(chunk.size(), self.size);
        let ts_start = Instant::now();

        self.vertices.clear();
        self.indices.clear();

        let is_solid = |x: i64, y: i64, z: i64| {
            chunk
                .try_get_block(Point3::new(x, y, z))
                .map_or(false, |block| block.is_solid())
        };

        let (w, h, d) = (
            self.size.x as i64,
            self.size.y as i64,
            self.size.z as i64,
        );

        // The -1 layer on each axis catches faces on the chunk's lower boundary.
        for y in -1..h {
            for z in -1..d {
                for x in -1..w {
                    let current = is_solid(x, y, z);
                    let next = [
                        is_solid(x + 1, y, z),
                        is_solid(x, y + 1, z),
                        is_solid(x, y, z + 1),
                    ];

                    for axis in 0..3 {
                        if current != next[axis] {
                            let mut corner = [x as f32, y as f32, z as f32];
                            corner[axis] += 1.;
                            self.push_face(corner, axis, current);
                        }
                    }
                }
            }
        }

        self.model = Matrix4::from_translation(convert_point!(origin, f32) - Point3::origin());

        metrics::timing!("render.chunk_mesh.build", ts_start.elapsed());
        debug!(
            "Built mesh at {:?}: {} vertices, {} indices",
            origin,
            self.vertices.len(),
            self.indices.len()
        );
    }

    /// Emits the quad at `corner` perpendicular to `axis`. When `solid_below` the solid cell is
    /// on the negative side and the face points along the axis; otherwise it points against it.
    fn push_face(&mut self, corner: [f32; 3], axis: usize, solid_below: bool) {
        assert!(
            self.vertices.len() + 4 <= self.capacity.vertices
                && self.indices.len() + 6 <= self.capacity.indices,
            "chunk mesh exceeded its worst-case capacity"
        );

        let s = if solid_below { 0 } else { 1 };
        let u = FACE_SPAN[axis][s];
        let v = FACE_SPAN[axis][s ^ 1];

        let t = corner;
        let positions = [
            t,
            [t[0] + u[0], t[1] + u[1], t[2] + u[2]],
            [t[0] + u[0] + v[0], t[1] + u[1] + v[1], t[2] + u[2] + v[2]],
            [t[0] + v[0], t[1] + v[1], t[2] + v[2]],
        ];

        let base = self.vertices.len() as Index;
        for (&pos, &tex_coord) in positions.iter().zip(FACE_TEX_COORDS.iter()) {
            self.vertices.push(vertex(pos, tex_coord));
        }

        self.indices
            .extend_from_slice(&[base, base + 1, base + 2, base, base + 2, base + 3]);
    }

    pub fn size(&self) -> Vector3<usize> {
        self.size
    }

    pub fn capacity(&self) -> MeshCapacity {
        self.capacity
    }

    pub fn vertices(&self) -> &[Vertex] {
        &self.vertices[..]
    }

    pub fn indices(&self) -> &[Index] {
        &self.indices[..]
    }

    /// Number of entries in the index buffer to draw.
    pub fn index_count(&self) -> usize {
        self.indices.len()
    }

    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    /// Transform from the mesh's local space to world space.
    pub fn model(&self) -> Matrix4<f32> {
        self.model
    }

    pub fn vertex_bytes(&self) -> &[u8] {
        self.vertices.as_bytes()
    }

    pub fn index_bytes(&self) -> &[u8] {
        self.indices.as_bytes()
    }

    /// Iterates the triangles as vertex triples.
    pub fn triangles(&self) -> impl Iterator<Item = [Vertex; 3]> + '_ {
        self.indices.chunks(3).map(move |tri| {
            [
                self.vertices[tri[0] as usize],
                self.vertices[tri[1] as usize],
                self.vertices[tri[2] as usize],
            ]
        })
    }
}
