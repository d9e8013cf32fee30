//! Render loop contracts.
//!
//! `RenderLoop` owns the per-tick logic (Update then Draw) and talks to the
//! GPU only through `FrameBackend`, so the host message pump and the tests
//! drive the same code.

mod backend;
mod loop_driver;

pub use backend::FrameBackend;
pub use loop_driver::{LoopState, RenderLoop};
