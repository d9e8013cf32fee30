use anyhow::{Context, Result};
use ouroboros::self_referencing;

use winit::application::ApplicationHandler;
use winit::dpi::PhysicalSize;
use winit::event::WindowEvent;
use winit::event_loop::{ActiveEventLoop, ControlFlow, EventLoop};
use winit::window::{Window, WindowId};

use crate::config::AppConfig;
use crate::core::{LoopState, RenderLoop};
use crate::frame::FrameState;
use crate::render::GpuBackend;

/// Entry point for the runtime.
pub struct Runtime;

impl Runtime {
    /// Opens the window, initializes the GPU and runs until the window closes.
    ///
    /// Initialization failures end the event loop and are returned here.
    pub fn run(config: AppConfig) -> Result<()> {
        let event_loop = EventLoop::new().context("failed to create winit EventLoop")?;
        let mut state = AppState::new(config);

        event_loop
            .run_app(&mut state)
            .context("winit event loop terminated with error")?;

        if let Some(err) = state.init_error.take() {
            return Err(err);
        }

        Ok(())
    }
}

#[self_referencing]
struct WindowEntry {
    window: Window,

    #[borrows(window)]
    #[covariant]
    render_loop: RenderLoop<GpuBackend<'this>>,
}

struct AppState {
    config: AppConfig,
    entry: Option<WindowEntry>,
    init_error: Option<anyhow::Error>,
    exit_requested: bool,
}

impl AppState {
    fn new(config: AppConfig) -> Self {
        Self {
            config,
            entry: None,
            init_error: None,
            exit_requested: false,
        }
    }

    fn create_window_entry(&self, event_loop: &ActiveEventLoop) -> Result<WindowEntry> {
        let surface = &self.config.surface;
        let attrs = Window::default_attributes()
            .with_title(self.config.title.clone())
            .with_inner_size(PhysicalSize::new(surface.width, surface.height))
            .with_resizable(false);

        let window = event_loop
            .create_window(attrs)
            .context("failed to create window")?;

        let shader = &self.config.shader;
        let write = self.config.velocity_write;

        let entry = WindowEntry::try_new(window, |w| {
            let frame = FrameState::new(write);
            let backend = pollster::block_on(GpuBackend::initialize(
                w,
                surface,
                shader,
                frame.vertices(),
            ))?;
            Ok::<_, crate::error::InitError>(RenderLoop::new(backend, frame))
        })
        .context("graphics initialization failed")?;

        let ctx = entry.borrow_render_loop().backend().context();
        let size = ctx.size();
        log::info!(
            "initialized {}x{} on {}; entering render loop",
            size.width,
            size.height,
            ctx.adapter_info().name
        );
        Ok(entry)
    }

    fn stop(&mut self, event_loop: &ActiveEventLoop) {
        if let Some(entry) = self.entry.as_mut() {
            entry.with_render_loop_mut(|l| l.request_stop());
        }
        // Drops the GPU objects before the window they borrow.
        self.entry = None;
        self.exit_requested = true;
        event_loop.exit();
    }
}

impl ApplicationHandler for AppState {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.entry.is_some() || self.exit_requested {
            return;
        }

        match self.create_window_entry(event_loop) {
            Ok(entry) => {
                entry.borrow_window().request_redraw();
                self.entry = Some(entry);
            }
            Err(e) => {
                log::error!("{e:#}");
                self.init_error = Some(e);
                self.exit_requested = true;
                event_loop.exit();
            }
        }
    }

    fn about_to_wait(&mut self, event_loop: &ActiveEventLoop) {
        if self.exit_requested {
            event_loop.exit();
            return;
        }

        // Tick as fast as the OS hands out idle cycles.
        event_loop.set_control_flow(ControlFlow::Poll);

        if let Some(entry) = self.entry.as_ref() {
            entry.borrow_window().request_redraw();
        }
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _window_id: WindowId,
        event: WindowEvent,
    ) {
        match event {
            WindowEvent::CloseRequested | WindowEvent::Destroyed => {
                log::info!("window closed");
                self.stop(event_loop);
            }

            // The surface keeps its initial size and mode.
            WindowEvent::Resized(size) => {
                log::debug!("ignoring resize to {}x{}", size.width, size.height);
            }
            WindowEvent::ScaleFactorChanged { scale_factor, .. } => {
                log::debug!("ignoring scale factor change to {scale_factor}");
            }

            WindowEvent::RedrawRequested => {
                let Some(entry) = self.entry.as_mut() else { return };
                let state = entry.with_render_loop_mut(|l| l.advance_one_frame());
                if state == LoopState::Stopped {
                    self.stop(event_loop);
                }
            }

            _ => {}
        }
    }

    fn exiting(&mut self, _event_loop: &ActiveEventLoop) {
        log::debug!("event loop exiting");
    }
}
