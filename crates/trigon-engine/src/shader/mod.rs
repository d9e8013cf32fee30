//! Shader programs and the vertex input layout that feeds them.
//!
//! WGSL is parsed and validated with naga on the CPU, so compile and layout
//! errors are reported with full diagnostics before any GPU object exists.
//! `ShaderPipeline` then links the validated programs on a device.

mod compile;
mod layout;
mod pipeline;
mod program_set;
mod signature;
mod target;

pub use compile::{compile, compile_source, CompiledProgram};
pub use layout::{build_input_layout, default_input_elements, InputElementSpec, InputLayout};
pub use pipeline::ShaderPipeline;
pub use program_set::ProgramSet;
pub use signature::{InputKind, InputSignature, SignatureInput};
pub use target::ShaderTarget;

pub use crate::error::ShaderStage;

/// The shipped triangle shader, for tests.
#[cfg(test)]
pub(crate) const TRIANGLE_WGSL: &str = include_str!("../../../trigon-app/content/triangle.wgsl");
