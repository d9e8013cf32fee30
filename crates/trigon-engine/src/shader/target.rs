use crate::error::{CompileFailure, ShaderCompilationError, ShaderStage};

/// Shader model version programs are validated against.
///
/// Each version maps to the set of optional naga capabilities a program may
/// use. "4.0" allows none of them.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum ShaderTarget {
    Model4_0,
    Model5_0,
}

impl ShaderTarget {
    /// Parses a version string such as "4.0".
    ///
    /// `entry_point` and `stage` only label the error.
    pub fn parse(
        version: &str,
        entry_point: &str,
        stage: ShaderStage,
    ) -> Result<Self, ShaderCompilationError> {
        match version.trim() {
            "4.0" | "4_0" => Ok(Self::Model4_0),
            "5.0" | "5_0" => Ok(Self::Model5_0),
            other => Err(ShaderCompilationError {
                label: format!("target {other:?}"),
                entry_point: entry_point.to_string(),
                stage,
                kind: CompileFailure::UnsupportedTarget,
                diagnostic: format!(
                    "unsupported shader model {other:?}; expected \"4.0\" or \"5.0\""
                ),
            }),
        }
    }

    pub fn capabilities(self) -> naga::valid::Capabilities {
        match self {
            Self::Model4_0 => naga::valid::Capabilities::empty(),
            Self::Model5_0 => naga::valid::Capabilities::default(),
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Model4_0 => "4.0",
            Self::Model5_0 => "5.0",
        }
    }
}
