use crate::config::ShaderConfig;
use crate::error::{InitError, ShaderStage};

use super::compile::{compile, CompiledProgram};
use super::layout::{build_input_layout, default_input_elements, InputLayout};

/// Both programs of the shader artifact plus the bound input layout.
///
/// Everything here is CPU-side; a failure aborts initialization before any
/// pipeline exists.
#[derive(Debug, Clone)]
pub struct ProgramSet {
    pub vertex: CompiledProgram,
    pub pixel: CompiledProgram,
    pub layout: InputLayout,
}

impl ProgramSet {
    pub fn load(cfg: &ShaderConfig) -> Result<Self, InitError> {
        let vertex = compile(&cfg.path, &cfg.vertex_entry, ShaderStage::Vertex, &cfg.target)?;
        let pixel = compile(&cfg.path, &cfg.pixel_entry, ShaderStage::Pixel, &cfg.target)?;
        let layout = build_input_layout(&vertex, &default_input_elements())?;

        log::info!(
            "loaded `{}` + `{}` from {} (model {})",
            vertex.entry_point(),
            pixel.entry_point(),
            cfg.path.display(),
            vertex.target().as_str()
        );

        Ok(Self { vertex, pixel, layout })
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;
    use crate::error::{CompileFailure, LayoutMismatch};
    use crate::shader::TRIANGLE_WGSL;

    fn config_for(source: &str) -> (tempfile::NamedTempFile, ShaderConfig) {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(source.as_bytes()).unwrap();
        let cfg = ShaderConfig {
            path: file.path().to_path_buf(),
            ..ShaderConfig::default()
        };
        (file, cfg)
    }

    #[test]
    fn loads_shipped_shader() {
        let (_file, cfg) = config_for(TRIANGLE_WGSL);
        let set = ProgramSet::load(&cfg).unwrap();
        assert_eq!(set.vertex.entry_point(), "VS");
        assert_eq!(set.pixel.entry_point(), "PS");
        assert_eq!(set.layout.stride(0), Some(48));
    }

    #[test]
    fn missing_pixel_entry_is_a_compilation_error() {
        let (_file, cfg) = config_for(&TRIANGLE_WGSL.replace("fn PS(", "fn Shade("));
        let err = ProgramSet::load(&cfg).unwrap_err();
        let InitError::ShaderCompilation(e) = err else {
            panic!("expected ShaderCompilation, got {err:?}")
        };
        assert_eq!(e.kind, CompileFailure::MissingEntryPoint);
        assert_eq!(e.stage, ShaderStage::Pixel);
    }

    #[test]
    fn vertex_program_without_velocity_input_is_a_layout_error() {
        let src = r#"
            struct VertexInput {
                @location(0) position: vec4<f32>,
                @location(1) color: vec4<f32>,
            };
            struct VertexOutput {
                @builtin(position) position: vec4<f32>,
                @location(0) color: vec4<f32>,
            };
            @vertex
            fn VS(input: VertexInput) -> VertexOutput {
                var out: VertexOutput;
                out.position = input.position;
                out.color = input.color;
                return out;
            }
            @fragment
            fn PS(input: VertexOutput) -> @location(0) vec4<f32> {
                return input.color;
            }
        "#;
        let (_file, cfg) = config_for(src);
        let err = ProgramSet::load(&cfg).unwrap_err();
        let InitError::LayoutMismatch(e) = err else {
            panic!("expected LayoutMismatch, got {err:?}")
        };
        assert_eq!(e.kind, LayoutMismatch::MissingSignatureSlot);
        assert_eq!(e.element, "POSITION1");
    }
}
