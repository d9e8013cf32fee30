//! CPU-side triangle state.
//!
//! `FrameState` is created once and mutated in place every tick. The GPU copy
//! lives in `render::GpuVertexBuffer`.

mod state;
mod vertex;

pub use state::{FrameState, VelocityWrite, FLOAT4_COUNT, VELOCITY_STEP};
pub use vertex::{Vertex, VERTEX_COUNT};
