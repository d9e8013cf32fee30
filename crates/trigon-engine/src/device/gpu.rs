use winit::dpi::PhysicalSize;
use winit::window::Window;

use crate::config::SurfaceConfig;
use crate::error::DeviceCreationError;

use super::surface;
use super::{GpuFrame, SurfaceErrorAction};

/// Owns the device, its queue and the presentation chain of one window.
///
/// Created once and dropped at shutdown. The surface is never resized: the
/// window is fixed-size and resize events are not forwarded here.
pub struct GraphicsContext<'w> {
    /// Window the surface presents to; notified before each present.
    window: &'w Window,

    /// Surface bound to the window.
    ///
    /// Surface lifetime is tied to the window; the owner must ensure the
    /// window outlives the context.
    surface: wgpu::Surface<'w>,

    adapter: wgpu::Adapter,

    /// Logical device.
    device: wgpu::Device,

    /// Immediate submission queue.
    queue: wgpu::Queue,

    /// Active surface configuration.
    config: wgpu::SurfaceConfiguration,
}

impl<'w> GraphicsContext<'w> {
    /// Brings up a hardware device and a presentation chain for `window`.
    ///
    /// There is no software fallback: no hardware adapter means failure.
    pub async fn new(window: &'w Window, cfg: &SurfaceConfig) -> Result<Self, DeviceCreationError> {
        if cfg.width == 0 || cfg.height == 0 {
            return Err(DeviceCreationError::ZeroSize {
                width: cfg.width,
                height: cfg.height,
            });
        }

        let inner = window.inner_size();
        if inner != PhysicalSize::new(cfg.width, cfg.height) {
            log::warn!(
                "window is {}x{} but surface is configured for {}x{}",
                inner.width,
                inner.height,
                cfg.width,
                cfg.height
            );
        }

        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
            backends: wgpu::Backends::all(),
            ..Default::default()
        });

        let surface = instance.create_surface(window)?;

        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: cfg.power_preference,
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await?;

        let info = adapter.get_info();
        log::info!("adapter: {} ({:?}, {:?})", info.name, info.backend, info.device_type);

        let (device, queue) = adapter
            .request_device(&wgpu::DeviceDescriptor {
                label: Some("trigon device"),
                required_features: wgpu::Features::empty(),
                required_limits: wgpu::Limits::default(),
                experimental_features: wgpu::ExperimentalFeatures::disabled(),
                memory_hints: wgpu::MemoryHints::Performance,
                trace: wgpu::Trace::Off,
            })
            .await?;

        let caps = surface.get_capabilities(&adapter);
        let format = surface::choose_surface_format(&caps.formats, cfg.color_format).ok_or(
            DeviceCreationError::UnsupportedFormat {
                requested: cfg.color_format,
            },
        )?;
        if format != cfg.color_format {
            log::warn!("{:?} unsupported by the surface; using {format:?}", cfg.color_format);
        }

        let present_mode = surface::choose_present_mode(&caps.present_modes, cfg.present_mode);
        if present_mode != cfg.present_mode {
            log::warn!("{:?} present unsupported; using {present_mode:?}", cfg.present_mode);
        }

        let config = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format,
            width: cfg.width,
            height: cfg.height,
            present_mode,
            alpha_mode: surface::choose_alpha_mode(&caps.alpha_modes),
            view_formats: vec![],
            desired_maximum_frame_latency: cfg.buffer_count.max(1),
        };

        surface.configure(&device, &config);

        log::info!(
            "surface {}x{} {format:?}, {present_mode:?}, {} buffer(s), nominal {:.0} Hz",
            config.width,
            config.height,
            config.desired_maximum_frame_latency,
            cfg.refresh_rate_hz()
        );

        Ok(Self {
            window,
            surface,
            adapter,
            device,
            queue,
            config,
        })
    }

    /// Returns the active back buffer format.
    pub fn surface_format(&self) -> wgpu::TextureFormat {
        self.config.format
    }

    /// Returns the back buffer size (physical pixels).
    pub fn size(&self) -> PhysicalSize<u32> {
        PhysicalSize::new(self.config.width, self.config.height)
    }

    /// Viewport covering the whole back buffer as `(width, height)`.
    pub fn viewport(&self) -> (f32, f32) {
        let size = self.size();
        (size.width as f32, size.height as f32)
    }

    pub fn adapter_info(&self) -> wgpu::AdapterInfo {
        self.adapter.get_info()
    }

    /// Returns a reference to the logical device.
    pub fn device(&self) -> &wgpu::Device {
        &self.device
    }

    /// Returns a reference to the submission queue.
    pub fn queue(&self) -> &wgpu::Queue {
        &self.queue
    }

    /// Acquires the back buffer, wraps it in a render-target view and opens
    /// an encoder.
    pub fn begin_frame(&self) -> Result<GpuFrame, wgpu::SurfaceError> {
        let surface_texture = self.surface.get_current_texture()?;

        debug_assert_eq!(surface_texture.texture.format(), self.config.format);
        debug_assert_eq!(surface_texture.texture.width(), self.config.width);
        debug_assert_eq!(surface_texture.texture.height(), self.config.height);

        let view = surface_texture
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());

        let encoder = self
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("trigon frame encoder"),
            });

        Ok(GpuFrame {
            surface_texture,
            view,
            encoder,
        })
    }

    /// Submits the recorded commands and presents the back buffer.
    pub fn present(&self, frame: GpuFrame) {
        let GpuFrame {
            surface_texture,
            view,
            encoder,
        } = frame;

        self.queue.submit(std::iter::once(encoder.finish()));
        drop(view);

        self.window.pre_present_notify();
        surface_texture.present();
    }

    /// Converts a `SurfaceError` into a higher-level action, reconfiguring
    /// the surface with its current configuration when asked to.
    pub fn handle_surface_error(&self, err: wgpu::SurfaceError) -> SurfaceErrorAction {
        let action = surface::classify_surface_error(&err);
        match action {
            SurfaceErrorAction::Reconfigured => {
                log::warn!("surface {err}; reconfiguring");
                self.surface.configure(&self.device, &self.config);
            }
            SurfaceErrorAction::SkipFrame => log::debug!("surface {err}; skipping frame"),
            SurfaceErrorAction::Fatal => log::error!("surface {err}"),
        }
        action
    }
}
