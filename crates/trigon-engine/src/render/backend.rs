use winit::window::Window;

use crate::config::{ShaderConfig, SurfaceConfig};
use crate::core::FrameBackend;
use crate::device::{GraphicsContext, SurfaceErrorAction};
use crate::error::InitError;
use crate::frame::Vertex;
use crate::shader::{ProgramSet, ShaderPipeline};

use super::draw::{DrawCall, DrawOutcome};
use super::vertex_buffer::GpuVertexBuffer;

/// `FrameBackend` on wgpu: one graphics context, one pipeline, one vertex buffer.
pub struct GpuBackend<'w> {
    ctx: GraphicsContext<'w>,
    pipeline: ShaderPipeline,
    vertices: GpuVertexBuffer,
}

impl<'w> GpuBackend<'w> {
    /// Runs the whole initialization sequence for `window`:
    /// device + surface, both programs, input layout, pipeline, vertex buffer.
    ///
    /// Stops at the first failure; nothing is retried.
    pub async fn initialize(
        window: &'w Window,
        surface: &SurfaceConfig,
        shader: &ShaderConfig,
        initial: &[Vertex],
    ) -> Result<Self, InitError> {
        let ctx = GraphicsContext::new(window, surface).await?;

        let ProgramSet { vertex, pixel, layout } = ProgramSet::load(shader)?;

        let vertices = GpuVertexBuffer::new(ctx.device(), initial);

        let binding = vertices.binding();
        if layout.stride(binding.slot) != Some(binding.stride) {
            log::warn!(
                "input layout stride {:?} differs from the {}-byte vertex record",
                layout.stride(binding.slot),
                binding.stride
            );
        }

        let pipeline =
            ShaderPipeline::new(ctx.device(), ctx.surface_format(), &vertex, &pixel, layout);

        Ok(Self {
            ctx,
            pipeline,
            vertices,
        })
    }

    pub fn context(&self) -> &GraphicsContext<'w> {
        &self.ctx
    }
}

impl FrameBackend for GpuBackend<'_> {
    fn upload_vertices(&mut self, vertices: &[Vertex]) {
        self.vertices.update(self.ctx.queue(), vertices);
    }

    fn draw(&mut self, call: &DrawCall) -> DrawOutcome {
        let mut frame = match self.ctx.begin_frame() {
            Ok(f) => f,
            Err(err) => {
                return match self.ctx.handle_surface_error(err) {
                    SurfaceErrorAction::Fatal => DrawOutcome::Fatal,
                    SurfaceErrorAction::Reconfigured | SurfaceErrorAction::SkipFrame => {
                        DrawOutcome::Skipped
                    }
                };
            }
        };

        let (width, height) = self.ctx.viewport();
        let binding = self.vertices.binding();

        // Pass is dropped before the encoder moves into present().
        {
            let mut rpass = frame.encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("trigon triangle pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &frame.view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(call.clear.to_wgpu()),
                        store: wgpu::StoreOp::Store,
                    },
                    depth_slice: None,
                })],
                depth_stencil_attachment: None,
                timestamp_writes: None,
                occlusion_query_set: None,
                multiview_mask: None,
            });

            rpass.set_viewport(0.0, 0.0, width, height, 0.0, 1.0);
            rpass.set_pipeline(self.pipeline.render_pipeline());
            rpass.set_vertex_buffer(binding.slot, self.vertices.slice());
            rpass.draw(call.vertices.clone(), call.instances.clone());
        }

        self.ctx.present(frame);
        DrawOutcome::Presented
    }
}
