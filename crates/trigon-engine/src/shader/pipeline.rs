use crate::error::ShaderStage;

use super::compile::CompiledProgram;
use super::layout::InputLayout;

/// Vertex + pixel programs and the input layout, linked on a device.
///
/// Immutable after creation. Borrowing the device at construction keeps the
/// dependency on a live graphics context explicit.
pub struct ShaderPipeline {
    input_layout: InputLayout,
    pipeline: wgpu::RenderPipeline,
}

impl ShaderPipeline {
    /// Creates GPU modules for both programs and links them for `target_format`.
    ///
    /// Both programs must already have passed `compile`; `layout` must come
    /// from `build_input_layout` on `vertex`.
    pub fn new(
        device: &wgpu::Device,
        target_format: wgpu::TextureFormat,
        vertex: &CompiledProgram,
        pixel: &CompiledProgram,
        layout: InputLayout,
    ) -> Self {
        debug_assert_eq!(vertex.stage(), ShaderStage::Vertex);
        debug_assert_eq!(pixel.stage(), ShaderStage::Pixel);

        let vertex_module = create_module(device, vertex);
        let pixel_module = create_module(device, pixel);

        let pipeline_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("trigon pipeline layout"),
            bind_group_layouts: &[],
            immediate_size: 0,
        });

        let buffers = layout.vertex_buffer_layouts();

        let pipeline = device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some("trigon triangle pipeline"),
            layout: Some(&pipeline_layout),

            vertex: wgpu::VertexState {
                module: &vertex_module,
                entry_point: Some(vertex.entry_point()),
                compilation_options: Default::default(),
                buffers: &buffers,
            },

            fragment: Some(wgpu::FragmentState {
                module: &pixel_module,
                entry_point: Some(pixel.entry_point()),
                compilation_options: Default::default(),
                targets: &[Some(wgpu::ColorTargetState {
                    format: target_format,
                    blend: Some(wgpu::BlendState::REPLACE),
                    write_mask: wgpu::ColorWrites::ALL,
                })],
            }),

            primitive: wgpu::PrimitiveState {
                topology: wgpu::PrimitiveTopology::TriangleList,
                strip_index_format: None,
                front_face: wgpu::FrontFace::Ccw,
                cull_mode: None,
                polygon_mode: wgpu::PolygonMode::Fill,
                unclipped_depth: false,
                conservative: false,
            },

            depth_stencil: None,
            multisample: wgpu::MultisampleState::default(),
            multiview_mask: None,
            cache: None,
        });

        log::info!(
            "linked pipeline `{}` + `{}` for {target_format:?}",
            vertex.entry_point(),
            pixel.entry_point()
        );

        Self {
            input_layout: layout,
            pipeline,
        }
    }

    pub fn render_pipeline(&self) -> &wgpu::RenderPipeline {
        &self.pipeline
    }

    pub fn input_layout(&self) -> &InputLayout {
        &self.input_layout
    }
}

fn create_module(device: &wgpu::Device, program: &CompiledProgram) -> wgpu::ShaderModule {
    let label = format!("{} ({})", program.label(), program.entry_point());
    device.create_shader_module(wgpu::ShaderModuleDescriptor {
        label: Some(&label),
        source: wgpu::ShaderSource::Wgsl(program.source().into()),
    })
}
