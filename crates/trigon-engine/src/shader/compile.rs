use std::path::Path;

use crate::error::{CompileFailure, ShaderCompilationError, ShaderStage};

use super::signature::InputSignature;
use super::target::ShaderTarget;

/// A validated program: one entry point of a WGSL module.
///
/// Keeps the source text so the device can build its own module from it.
#[derive(Debug, Clone)]
pub struct CompiledProgram {
    label: String,
    source: String,
    entry_point: String,
    stage: ShaderStage,
    target: ShaderTarget,
    signature: InputSignature,
}

impl CompiledProgram {
    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn source(&self) -> &str {
        &self.source
    }

    pub fn entry_point(&self) -> &str {
        &self.entry_point
    }

    pub fn stage(&self) -> ShaderStage {
        self.stage
    }

    pub fn target(&self) -> ShaderTarget {
        self.target
    }

    /// Vertex inputs of the entry point. Empty for pixel programs.
    pub fn input_signature(&self) -> &InputSignature {
        &self.signature
    }
}

/// Compiles `entry_point` from the WGSL file at `path` for `stage`.
///
/// `target` is a shader model version string such as "4.0".
pub fn compile(
    path: impl AsRef<Path>,
    entry_point: &str,
    stage: ShaderStage,
    target: &str,
) -> Result<CompiledProgram, ShaderCompilationError> {
    let path = path.as_ref();
    let label = path.display().to_string();

    let source = std::fs::read_to_string(path).map_err(|e| ShaderCompilationError {
        label: label.clone(),
        entry_point: entry_point.to_string(),
        stage,
        kind: CompileFailure::Io,
        diagnostic: e.to_string(),
    })?;

    compile_source(&label, &source, entry_point, stage, target)
}

/// Compiles `entry_point` from in-memory WGSL. `label` names the source in
/// diagnostics.
pub fn compile_source(
    label: &str,
    source: &str,
    entry_point: &str,
    stage: ShaderStage,
    target: &str,
) -> Result<CompiledProgram, ShaderCompilationError> {
    let fail = |kind, diagnostic: String| ShaderCompilationError {
        label: label.to_string(),
        entry_point: entry_point.to_string(),
        stage,
        kind,
        diagnostic,
    };

    let target = ShaderTarget::parse(target, entry_point, stage)?;

    let module = naga::front::wgsl::parse_str(source)
        .map_err(|e| fail(CompileFailure::Syntax, e.emit_to_string(source)))?;

    let mut validator =
        naga::valid::Validator::new(naga::valid::ValidationFlags::all(), target.capabilities());
    validator
        .validate(&module)
        .map_err(|e| fail(CompileFailure::Validation, e.emit_to_string(source)))?;

    let Some(entry) = module.entry_points.iter().find(|e| e.name == entry_point) else {
        let available: Vec<&str> = module.entry_points.iter().map(|e| e.name.as_str()).collect();
        return Err(fail(
            CompileFailure::MissingEntryPoint,
            format!("entry point `{entry_point}` not found; module defines {available:?}"),
        ));
    };

    let expected = match stage {
        ShaderStage::Vertex => naga::ShaderStage::Vertex,
        ShaderStage::Pixel => naga::ShaderStage::Fragment,
    };
    if entry.stage != expected {
        return Err(fail(
            CompileFailure::StageMismatch,
            format!(
                "entry point `{entry_point}` is a {:?} shader, expected {expected:?}",
                entry.stage
            ),
        ));
    }

    let signature = match stage {
        ShaderStage::Vertex => InputSignature::reflect(&module, entry),
        ShaderStage::Pixel => InputSignature::default(),
    };

    log::debug!(
        "compiled {stage} program `{entry_point}` from {label} (model {}, {} inputs)",
        target.as_str(),
        signature.inputs().len()
    );

    Ok(CompiledProgram {
        label: label.to_string(),
        source: source.to_string(),
        entry_point: entry_point.to_string(),
        stage,
        target,
        signature,
    })
}
