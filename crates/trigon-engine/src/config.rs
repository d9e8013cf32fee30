//! Startup configuration.
//!
//! Window size, back buffer format, refresh rate and shader location are
//! plain fields; each `Default` holds the stock values.

use std::path::PathBuf;

use crate::frame::VelocityWrite;
use crate::logging::LoggingConfig;

/// Presentation chain parameters passed to `GraphicsContext::new`.
#[derive(Debug, Clone)]
pub struct SurfaceConfig {
    /// Back buffer width in physical pixels.
    pub width: u32,

    /// Back buffer height in physical pixels.
    pub height: u32,

    /// Number of back buffers; maps to the surface's maximum frame latency.
    pub buffer_count: u32,

    /// Requested back buffer format. A same-family fallback is picked if the
    /// surface does not support it.
    pub color_format: wgpu::TextureFormat,

    /// Nominal refresh rate as a fraction. Informational in windowed mode.
    pub refresh_rate_numerator: u32,
    pub refresh_rate_denominator: u32,

    /// Preferred swap behavior. `Immediate` presents with no sync interval.
    pub present_mode: wgpu::PresentMode,

    pub power_preference: wgpu::PowerPreference,
}

impl Default for SurfaceConfig {
    fn default() -> Self {
        Self {
            width: 800,
            height: 600,
            buffer_count: 1,
            color_format: wgpu::TextureFormat::Rgba8Unorm,
            refresh_rate_numerator: 60,
            refresh_rate_denominator: 1,
            present_mode: wgpu::PresentMode::Immediate,
            power_preference: wgpu::PowerPreference::HighPerformance,
        }
    }
}

impl SurfaceConfig {
    /// Nominal refresh rate in Hz. A zero denominator reads as zero.
    pub fn refresh_rate_hz(&self) -> f32 {
        if self.refresh_rate_denominator == 0 {
            return 0.0;
        }
        self.refresh_rate_numerator as f32 / self.refresh_rate_denominator as f32
    }
}

/// Where the shader artifact lives and which programs to pull out of it.
#[derive(Debug, Clone)]
pub struct ShaderConfig {
    pub path: PathBuf,
    pub vertex_entry: String,
    pub pixel_entry: String,
    /// Shader model version string, e.g. "4.0".
    pub target: String,
}

impl Default for ShaderConfig {
    fn default() -> Self {
        Self {
            path: PathBuf::from("content/triangle.wgsl"),
            vertex_entry: "VS".to_string(),
            pixel_entry: "PS".to_string(),
            target: "4.0".to_string(),
        }
    }
}

/// Full application configuration.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub title: String,
    pub surface: SurfaceConfig,
    pub shader: ShaderConfig,
    pub velocity_write: VelocityWrite,
    pub logging: LoggingConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            title: "trigon".to_string(),
            surface: SurfaceConfig::default(),
            shader: ShaderConfig::default(),
            velocity_write: VelocityWrite::default(),
            logging: LoggingConfig::default(),
        }
    }
}
