use bytemuck::{Pod, Zeroable};

/// Vertices per triangle.
pub const VERTEX_COUNT: usize = 3;

/// One vertex record: three consecutive float4 attributes, 48 bytes.
///
/// `velocity` is a general per-vertex animation input read by the vertex
/// program, not a physical velocity.
#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq, Pod, Zeroable)]
pub struct Vertex {
    pub position: [f32; 4],
    pub color: [f32; 4],
    pub velocity: [f32; 4],
}

impl Vertex {
    /// Byte size of one record; the vertex buffer stride.
    pub const STRIDE: u64 = std::mem::size_of::<Vertex>() as u64;
}
