use cgmath::{InnerSpace, Vector3};
use zerocopy::{AsBytes, FromBytes};

pub type Index = u32;

/// One corner of a block face: a position in the chunk's local space and a coordinate within
/// the face's texture.
#[derive(Clone, Copy, Debug, PartialEq, AsBytes, FromBytes)]
#[repr(C)]
pub struct Vertex {
    pub pos: [f32; 3],
    pub tex_coord: [f32; 2],
}

/// Location of one vertex attribute within a `Vertex`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct VertexAttribute {
    pub shader_location: u32,
    /// Byte offset from the start of the vertex.
    pub offset: usize,
    /// Number of `f32` components.
    pub components: usize,
}

pub const VERTEX_STRIDE: usize = std::mem::size_of::<Vertex>();

impl Vertex {
    pub const ATTRIBUTES: [VertexAttribute; 2] = [
        // pos
        VertexAttribute {
            shader_location: 0,
            offset: 0,
            components: 3,
        },
        // tex_coord
        VertexAttribute {
            shader_location: 1,
            offset: 3 * 4,
            components: 2,
        },
    ];

    pub fn position(&self) -> Vector3<f32> {
        Vector3::new(self.pos[0], self.pos[1], self.pos[2])
    }
}

pub fn vertex(pos: [f32; 3], tex_coord: [f32; 2]) -> Vertex {
    Vertex { pos, tex_coord }
}

/// Unit normal of a counter-clockwise triangle, by the right-hand rule.
pub fn normal_of(triangle: [Vertex; 3]) -> Vector3<f32> {
    let [a, b, c] = triangle;
    let ab = b.position() - a.position();
    let ac = c.position() - a.position();
    ab.cross(ac).normalize()
}
