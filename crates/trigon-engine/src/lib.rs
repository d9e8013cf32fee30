//! Trigon engine crate.
//!
//! Owns the GPU device, the shader pipeline, the animated triangle state and
//! the render loop that ties them to a `winit` window.

pub mod config;
pub mod core;
pub mod device;
pub mod error;
pub mod frame;
pub mod logging;
pub mod paint;
pub mod render;
pub mod shader;
pub mod time;
pub mod window;
