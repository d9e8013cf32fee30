use std::collections::BTreeMap;

use crate::error::{LayoutMismatch, LayoutMismatchError, ShaderStage};

use super::compile::CompiledProgram;
use super::signature::InputKind;

/// One vertex attribute as the application lays it out in memory.
#[derive(Debug, Clone, PartialEq)]
pub struct InputElementSpec {
    pub semantic_name: &'static str,
    pub semantic_index: u32,
    pub format: wgpu::VertexFormat,
    /// Byte offset inside the vertex record. Not checked against the program.
    pub offset: u64,
    /// Vertex buffer slot the attribute is read from.
    pub input_slot: u32,
    /// `@location` of the matching vertex program input.
    pub shader_location: u32,
}

impl InputElementSpec {
    /// Semantic with its index, e.g. `POSITION1`.
    pub fn semantic(&self) -> String {
        format!("{}{}", self.semantic_name, self.semantic_index)
    }
}

/// Position, color and velocity, all float4, packed into one 48-byte record
/// on slot 0.
pub fn default_input_elements() -> [InputElementSpec; 3] {
    [
        InputElementSpec {
            semantic_name: "POSITION",
            semantic_index: 0,
            format: wgpu::VertexFormat::Float32x4,
            offset: 0,
            input_slot: 0,
            shader_location: 0,
        },
        InputElementSpec {
            semantic_name: "COLOR",
            semantic_index: 0,
            format: wgpu::VertexFormat::Float32x4,
            offset: 16,
            input_slot: 0,
            shader_location: 1,
        },
        // Velocity rides in a second POSITION semantic.
        InputElementSpec {
            semantic_name: "POSITION",
            semantic_index: 1,
            format: wgpu::VertexFormat::Float32x4,
            offset: 32,
            input_slot: 0,
            shader_location: 2,
        },
    ]
}

#[derive(Debug, Clone)]
struct SlotLayout {
    stride: u64,
    attributes: Vec<wgpu::VertexAttribute>,
}

/// Elements bound against a vertex program, grouped per vertex buffer slot.
#[derive(Debug, Clone)]
pub struct InputLayout {
    elements: Vec<InputElementSpec>,
    slots: Vec<SlotLayout>,
}

impl InputLayout {
    pub fn elements(&self) -> &[InputElementSpec] {
        &self.elements
    }

    /// Number of vertex buffer slots, including empty ones below the highest
    /// used slot.
    pub fn slot_count(&self) -> usize {
        self.slots.len()
    }

    /// Record stride of `slot`: the end of its furthest attribute.
    pub fn stride(&self, slot: u32) -> Option<u64> {
        self.slots.get(slot as usize).map(|s| s.stride)
    }

    /// One `wgpu` buffer layout per slot, indexed by slot.
    pub fn vertex_buffer_layouts(&self) -> Vec<wgpu::VertexBufferLayout<'_>> {
        self.slots
            .iter()
            .map(|s| wgpu::VertexBufferLayout {
                array_stride: s.stride,
                step_mode: wgpu::VertexStepMode::Vertex,
                attributes: &s.attributes,
            })
            .collect()
    }
}

/// Binds `elements` against the input signature of `vertex_program`.
///
/// Every element must name a location the program declares, with a matching
/// scalar kind, and every declared input must be fed. Byte offsets are taken
/// as given.
pub fn build_input_layout(
    vertex_program: &CompiledProgram,
    elements: &[InputElementSpec],
) -> Result<InputLayout, LayoutMismatchError> {
    let mismatch = |e: &InputElementSpec, kind, detail: String| LayoutMismatchError {
        element: e.semantic(),
        location: e.shader_location,
        kind,
        detail,
    };

    if vertex_program.stage() != ShaderStage::Vertex {
        return Err(LayoutMismatchError {
            element: String::new(),
            location: 0,
            kind: LayoutMismatch::NotAVertexProgram,
            detail: format!(
                "`{}` is a {} program",
                vertex_program.entry_point(),
                vertex_program.stage()
            ),
        });
    }

    let signature = vertex_program.input_signature();
    let mut fed: BTreeMap<u32, &InputElementSpec> = BTreeMap::new();

    let max_slots = wgpu::Limits::default().max_vertex_buffers;

    for e in elements {
        if e.input_slot >= max_slots {
            return Err(mismatch(
                e,
                LayoutMismatch::SlotOutOfRange,
                format!("input slot {} exceeds the {max_slots} vertex buffer limit", e.input_slot),
            ));
        }

        let Some(input) = signature.at_location(e.shader_location) else {
            return Err(mismatch(
                e,
                LayoutMismatch::MissingSignatureSlot,
                format!(
                    "`{}` declares no input at @location({})",
                    vertex_program.entry_point(),
                    e.shader_location
                ),
            ));
        };

        let kind = InputKind::of_format(e.format);
        if kind != input.kind {
            return Err(mismatch(
                e,
                LayoutMismatch::TypeMismatch,
                format!(
                    "format {:?} delivers {kind:?}, program expects {:?}",
                    e.format, input.kind
                ),
            ));
        }

        if let Some(prev) = fed.insert(e.shader_location, e) {
            return Err(mismatch(
                e,
                LayoutMismatch::DuplicateLocation,
                format!("location already fed by {}", prev.semantic()),
            ));
        }
    }

    if let Some(unfed) = signature.inputs().iter().find(|i| !fed.contains_key(&i.location)) {
        return Err(LayoutMismatchError {
            element: unfed.name.clone().unwrap_or_default(),
            location: unfed.location,
            kind: LayoutMismatch::UnfedInput,
            detail: "no input element feeds this program input".to_string(),
        });
    }

    let slot_count = elements.iter().map(|e| e.input_slot as usize + 1).max().unwrap_or(0);
    let mut slots = vec![SlotLayout { stride: 0, attributes: Vec::new() }; slot_count];

    for e in elements {
        let slot = &mut slots[e.input_slot as usize];
        slot.stride = slot.stride.max(e.offset + e.format.size());
        slot.attributes.push(wgpu::VertexAttribute {
            format: e.format,
            offset: e.offset,
            shader_location: e.shader_location,
        });
    }

    Ok(InputLayout {
        elements: elements.to_vec(),
        slots,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::frame::Vertex;
    use crate::shader::{compile_source, TRIANGLE_WGSL};

    fn vs() -> CompiledProgram {
        compile_source("triangle", TRIANGLE_WGSL, "VS", ShaderStage::Vertex, "4.0").unwrap()
    }

    // ── default layout ────────────────────────────────────────────────────

    #[test]
    fn default_layout_matches_vertex_record() {
        let layout = build_input_layout(&vs(), &default_input_elements()).unwrap();

        assert_eq!(layout.slot_count(), 1);
        assert_eq!(layout.stride(0), Some(48));
        assert_eq!(layout.stride(0), Some(Vertex::STRIDE));

        let offsets: Vec<u64> = layout.elements().iter().map(|e| e.offset).collect();
        assert_eq!(offsets, vec![0, 16, 32]);
        assert_eq!(
            offsets,
            vec![
                std::mem::offset_of!(Vertex, position) as u64,
                std::mem::offset_of!(Vertex, color) as u64,
                std::mem::offset_of!(Vertex, velocity) as u64,
            ]
        );

        let buffers = layout.vertex_buffer_layouts();
        assert_eq!(buffers.len(), 1);
        assert_eq!(buffers[0].array_stride, 48);
        assert_eq!(buffers[0].attributes.len(), 3);
    }

    #[test]
    fn semantics_render_with_index() {
        let names: Vec<String> = default_input_elements().iter().map(|e| e.semantic()).collect();
        assert_eq!(names, vec!["POSITION0", "COLOR0", "POSITION1"]);
    }

    // ── mismatches ────────────────────────────────────────────────────────

    #[test]
    fn element_without_signature_slot() {
        let mut elements = default_input_elements().to_vec();
        elements[2].shader_location = 7;
        let err = build_input_layout(&vs(), &elements).unwrap_err();
        assert_eq!(err.kind, LayoutMismatch::MissingSignatureSlot);
        assert_eq!(err.element, "POSITION1");
        assert_eq!(err.location, 7);
    }

    #[test]
    fn integer_format_for_float_input() {
        let mut elements = default_input_elements().to_vec();
        elements[1].format = wgpu::VertexFormat::Uint32x4;
        let err = build_input_layout(&vs(), &elements).unwrap_err();
        assert_eq!(err.kind, LayoutMismatch::TypeMismatch);
        assert_eq!(err.element, "COLOR0");
    }

    #[test]
    fn two_elements_on_one_location() {
        let mut elements = default_input_elements().to_vec();
        elements[2].shader_location = 1;
        let err = build_input_layout(&vs(), &elements).unwrap_err();
        assert_eq!(err.kind, LayoutMismatch::DuplicateLocation);
    }

    #[test]
    fn program_input_left_unfed() {
        let elements = &default_input_elements()[..2];
        let err = build_input_layout(&vs(), elements).unwrap_err();
        assert_eq!(err.kind, LayoutMismatch::UnfedInput);
        assert_eq!(err.location, 2);
        assert_eq!(err.element, "velocity");
    }

    #[test]
    fn pixel_program_cannot_carry_a_layout() {
        let ps =
            compile_source("triangle", TRIANGLE_WGSL, "PS", ShaderStage::Pixel, "4.0").unwrap();
        let err = build_input_layout(&ps, &default_input_elements()).unwrap_err();
        assert_eq!(err.kind, LayoutMismatch::NotAVertexProgram);
    }

    #[test]
    fn offsets_are_not_validated() {
        // Known gap: a shuffled offset still binds.
        let mut elements = default_input_elements().to_vec();
        elements[1].offset = 20;
        let layout = build_input_layout(&vs(), &elements).unwrap();
        assert_eq!(layout.elements()[1].offset, 20);
        // COLOR0 now overlaps velocity; the furthest end is still 48.
        assert_eq!(layout.stride(0), Some(48));
    }

    #[test]
    fn slot_past_vertex_buffer_limit() {
        let mut elements = default_input_elements().to_vec();
        elements[0].input_slot = u32::MAX;
        let err = build_input_layout(&vs(), &elements).unwrap_err();
        assert_eq!(err.kind, LayoutMismatch::SlotOutOfRange);
        assert_eq!(err.element, "POSITION0");

        elements[0].input_slot = wgpu::Limits::default().max_vertex_buffers;
        let err = build_input_layout(&vs(), &elements).unwrap_err();
        assert_eq!(err.kind, LayoutMismatch::SlotOutOfRange);
    }
}
