//! Initialization error taxonomy.
//!
//! Every variant is fatal: initialization stops at the first failure and the
//! error propagates to the binary. Nothing is retried.

use std::fmt;

/// Top-level initialization failure.
#[derive(Debug, thiserror::Error)]
pub enum InitError {
    #[error(transparent)]
    DeviceCreation(#[from] DeviceCreationError),

    #[error(transparent)]
    ShaderCompilation(#[from] ShaderCompilationError),

    #[error(transparent)]
    LayoutMismatch(#[from] LayoutMismatchError),
}

/// No capable graphics device could be brought up for the window.
#[derive(Debug, thiserror::Error)]
pub enum DeviceCreationError {
    #[error("surface has zero size ({width}x{height})")]
    ZeroSize { width: u32, height: u32 },

    #[error("failed to create presentation surface: {0}")]
    Surface(#[from] wgpu::CreateSurfaceError),

    #[error("no hardware graphics adapter compatible with the surface: {0}")]
    NoAdapter(#[from] wgpu::RequestAdapterError),

    #[error("failed to create graphics device: {0}")]
    Device(#[from] wgpu::RequestDeviceError),

    #[error("surface supports none of the 8-bit RGBA formats (requested {requested:?})")]
    UnsupportedFormat { requested: wgpu::TextureFormat },
}

/// Pipeline stage a program is compiled for.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum ShaderStage {
    Vertex,
    Pixel,
}

impl fmt::Display for ShaderStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ShaderStage::Vertex => f.write_str("vertex"),
            ShaderStage::Pixel => f.write_str("pixel"),
        }
    }
}

/// Why a shader program failed to compile.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum CompileFailure {
    Io,
    Syntax,
    Validation,
    MissingEntryPoint,
    StageMismatch,
    UnsupportedTarget,
}

/// Compiler failure. `diagnostic` carries the compiler text verbatim.
#[derive(Debug, Clone, thiserror::Error)]
#[error("failed to compile {stage} program `{entry_point}` from {label} ({kind:?}):\n{diagnostic}")]
pub struct ShaderCompilationError {
    pub label: String,
    pub entry_point: String,
    pub stage: ShaderStage,
    pub kind: CompileFailure,
    pub diagnostic: String,
}

/// Why an input element could not be bound to the vertex program.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum LayoutMismatch {
    NotAVertexProgram,
    MissingSignatureSlot,
    TypeMismatch,
    DuplicateLocation,
    UnfedInput,
    /// `input_slot` is past the device's vertex buffer limit.
    SlotOutOfRange,
}

/// Input layout does not fit the vertex program's input signature.
#[derive(Debug, Clone, thiserror::Error)]
#[error("input layout mismatch for {element} at location {location} ({kind:?}): {detail}")]
pub struct LayoutMismatchError {
    /// Semantic of the offending element, e.g. `POSITION1`.
    pub element: String,
    pub location: u32,
    pub kind: LayoutMismatch,
    pub detail: String,
}
