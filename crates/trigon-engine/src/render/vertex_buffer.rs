use wgpu::util::DeviceExt;

use crate::frame::Vertex;

/// How the buffer is bound to its vertex slot.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub struct VertexBinding {
    pub slot: u32,
    pub stride: u64,
    pub offset: u64,
}

/// GPU-resident copy of the triangle's vertices.
///
/// Allocated once and rewritten in place through the queue each tick, so no
/// buffer is created per frame.
pub struct GpuVertexBuffer {
    buffer: wgpu::Buffer,
    binding: VertexBinding,
    len: usize,
}

impl GpuVertexBuffer {
    /// Creates the buffer initialized with `vertices`. Its length is fixed
    /// from here on.
    pub fn new(device: &wgpu::Device, vertices: &[Vertex]) -> Self {
        let buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("trigon triangle vbo"),
            contents: bytemuck::cast_slice(vertices),
            usage: wgpu::BufferUsages::VERTEX | wgpu::BufferUsages::COPY_DST,
        });

        Self {
            buffer,
            binding: VertexBinding {
                slot: 0,
                stride: Vertex::STRIDE,
                offset: 0,
            },
            len: vertices.len(),
        }
    }

    /// Overwrites the buffer contents. `vertices` must match the length the
    /// buffer was created with.
    pub fn update(&self, queue: &wgpu::Queue, vertices: &[Vertex]) {
        debug_assert_eq!(vertices.len(), self.len);
        queue.write_buffer(&self.buffer, self.binding.offset, bytemuck::cast_slice(vertices));
    }

    pub fn binding(&self) -> VertexBinding {
        self.binding
    }

    /// Vertex count the buffer holds.
    pub fn len(&self) -> usize {
        self.len
    }

    /// Slice to bind, starting at the binding offset.
    pub fn slice(&self) -> wgpu::BufferSlice<'_> {
        self.buffer.slice(self.binding.offset..)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::device::headless_device;
    use crate::frame::FrameState;

    #[test]
    fn binds_slot_zero_with_record_stride() {
        let Some((device, queue)) = headless_device() else { return };

        let mut state = FrameState::default();
        let vbo = GpuVertexBuffer::new(&device, state.vertices());
        assert_eq!(
            vbo.binding(),
            VertexBinding {
                slot: 0,
                stride: 48,
                offset: 0
            }
        );
        assert_eq!(vbo.len(), 3);

        state.advance();
        vbo.update(&queue, state.vertices());
        queue.submit(std::iter::empty());
    }
}
