/// Scalar family of a vertex input.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum InputKind {
    Float,
    Sint,
    Uint,
}

impl InputKind {
    /// Scalar family a vertex buffer format delivers to the shader.
    ///
    /// Normalized integer formats arrive as floats.
    pub fn of_format(format: wgpu::VertexFormat) -> Self {
        use wgpu::VertexFormat as F;
        match format {
            F::Uint8 | F::Uint8x2 | F::Uint8x4 | F::Uint16 | F::Uint16x2 | F::Uint16x4
            | F::Uint32 | F::Uint32x2 | F::Uint32x3 | F::Uint32x4 => Self::Uint,
            F::Sint8 | F::Sint8x2 | F::Sint8x4 | F::Sint16 | F::Sint16x2 | F::Sint16x4
            | F::Sint32 | F::Sint32x2 | F::Sint32x3 | F::Sint32x4 => Self::Sint,
            _ => Self::Float,
        }
    }

    fn of_scalar(kind: naga::ScalarKind) -> Option<Self> {
        match kind {
            naga::ScalarKind::Float => Some(Self::Float),
            naga::ScalarKind::Sint => Some(Self::Sint),
            naga::ScalarKind::Uint => Some(Self::Uint),
            _ => None,
        }
    }
}

/// One user-defined input of a vertex entry point.
#[derive(Debug, Clone, PartialEq)]
pub struct SignatureInput {
    pub name: Option<String>,
    pub location: u32,
    pub kind: InputKind,
    pub components: u32,
}

/// The `@location` inputs a vertex entry point declares, sorted by location.
///
/// Built-ins such as `vertex_index` are not part of the signature.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct InputSignature {
    inputs: Vec<SignatureInput>,
}

impl InputSignature {
    /// Reflects the inputs of `entry` from the module's type arena.
    pub(crate) fn reflect(module: &naga::Module, entry: &naga::EntryPoint) -> Self {
        let mut inputs = Vec::new();

        for arg in &entry.function.arguments {
            match &module.types[arg.ty].inner {
                naga::TypeInner::Struct { members, .. } => {
                    for m in members {
                        push_input(module, &mut inputs, m.name.clone(), m.ty, m.binding.as_ref());
                    }
                }
                _ => push_input(
                    module,
                    &mut inputs,
                    arg.name.clone(),
                    arg.ty,
                    arg.binding.as_ref(),
                ),
            }
        }

        inputs.sort_by_key(|i| i.location);
        Self { inputs }
    }

    pub fn inputs(&self) -> &[SignatureInput] {
        &self.inputs
    }

    pub fn at_location(&self, location: u32) -> Option<&SignatureInput> {
        self.inputs.iter().find(|i| i.location == location)
    }

    pub fn is_empty(&self) -> bool {
        self.inputs.is_empty()
    }
}

fn push_input(
    module: &naga::Module,
    out: &mut Vec<SignatureInput>,
    name: Option<String>,
    ty: naga::Handle<naga::Type>,
    binding: Option<&naga::Binding>,
) {
    let Some(naga::Binding::Location { location, .. }) = binding else { return };

    let (scalar, components) = match &module.types[ty].inner {
        naga::TypeInner::Scalar(s) => (*s, 1),
        naga::TypeInner::Vector { size, scalar } => (*scalar, *size as u32),
        other => {
            log::debug!("skipping vertex input at location {location} with type {other:?}");
            return;
        }
    };

    let Some(kind) = InputKind::of_scalar(scalar.kind) else { return };

    out.push(SignatureInput {
        name,
        location: *location,
        kind,
        components,
    });
}
