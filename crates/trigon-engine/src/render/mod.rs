//! GPU side of a tick: the persistent vertex buffer and the draw pass.
//!
//! `GpuBackend` implements `core::FrameBackend` on top of a
//! `GraphicsContext` and a `ShaderPipeline`.

mod backend;
mod draw;
mod vertex_buffer;

pub use backend::GpuBackend;
pub use draw::{clear_color, DrawCall, DrawOutcome};
pub use vertex_buffer::{GpuVertexBuffer, VertexBinding};
