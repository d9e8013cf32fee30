//! Window + host message loop.
//!
//! Owns the `winit` EventLoop and the single fixed-size window, and calls
//! `RenderLoop::advance_one_frame` once per redraw.

mod runtime;

pub use runtime::Runtime;
