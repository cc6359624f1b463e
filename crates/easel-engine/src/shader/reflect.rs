//! Stage interface extraction: locations, builtins and bound resources.

use naga::{AddressSpace, Binding, BuiltIn, Handle, Module, Type, TypeInner};

use super::stage::StageModule;

/// Where a named shader input lives.
///
/// `NotFound` is an ordinary answer (inactive or misspelled names), not an error.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum Location {
    Attribute(u32),
    Uniform(UniformSlot),
    NotFound,
}

impl Location {
    pub fn is_found(&self) -> bool {
        !matches!(self, Self::NotFound)
    }
}

/// A bound resource slot: `@group(group) @binding(binding)`.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub struct UniformSlot {
    pub group: u32,
    pub binding: u32,
    pub kind: UniformKind,
}

impl UniformSlot {
    pub(crate) fn key(&self) -> (u32, u32) {
        (self.group, self.binding)
    }
}

#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum UniformKind {
    /// Uniform buffer of `size` bytes.
    Buffer { size: u32 },
    Texture,
    Sampler,
}

/// A `@location` input or output of an entry point.
#[derive(Debug, Clone)]
pub(crate) struct Varying {
    pub name: Option<String>,
    pub location: u32,
    pub inner: TypeInner,
}

impl Varying {
    pub fn describe(&self) -> String {
        match &self.name {
            Some(name) => format!("`{name}` (location {})", self.location),
            None => format!("location {}", self.location),
        }
    }

    /// Scalar count of a vector/scalar varying.
    pub fn components(&self) -> Option<u32> {
        match self.inner {
            TypeInner::Scalar(_) => Some(1),
            TypeInner::Vector { size, .. } => Some(size as u32),
            _ => None,
        }
    }
}

#[derive(Debug, Default)]
pub(crate) struct StageIo {
    pub locations: Vec<Varying>,
    pub writes_position: bool,
}

impl StageIo {
    pub fn at(&self, location: u32) -> Option<&Varying> {
        self.locations.iter().find(|v| v.location == location)
    }

    fn collect(&mut self, module: &Module, name: Option<&String>, ty: Handle<Type>, binding: Option<&Binding>) {
        match binding {
            Some(Binding::Location { location, .. }) => self.locations.push(Varying {
                name: name.cloned(),
                location: *location,
                inner: module.types[ty].inner.clone(),
            }),
            Some(Binding::BuiltIn(builtin)) => {
                if matches!(builtin, BuiltIn::Position { .. }) {
                    self.writes_position = true;
                }
            }
            None => {
                if let TypeInner::Struct { members, .. } = &module.types[ty].inner {
                    for m in members {
                        self.collect(module, m.name.as_ref(), m.ty, m.binding.as_ref());
                    }
                }
            }
        }
    }
}

/// Inputs of entry point `index`.
pub(crate) fn entry_inputs(stage: &StageModule, index: usize) -> StageIo {
    let mut io = StageIo::default();
    let ep = &stage.module.entry_points[index];
    for arg in &ep.function.arguments {
        io.collect(&stage.module, arg.name.as_ref(), arg.ty, arg.binding.as_ref());
    }
    io
}

/// Outputs of entry point `index`.
pub(crate) fn entry_outputs(stage: &StageModule, index: usize) -> StageIo {
    let mut io = StageIo::default();
    let ep = &stage.module.entry_points[index];
    if let Some(result) = &ep.function.result {
        io.collect(&stage.module, None, result.ty, result.binding.as_ref());
    }
    io
}

/// A bound global the entry point actually uses.
#[derive(Debug, Clone)]
pub(crate) struct Resource {
    pub name: String,
    pub slot: UniformSlot,
}

/// Active resources of entry point `index`.
///
/// Globals the entry point never touches are skipped, so they resolve to
/// `Location::NotFound` later. Unsupported resource kinds become problems.
pub(crate) fn active_resources(stage: &StageModule, index: usize) -> (Vec<Resource>, Vec<String>) {
    let module = &stage.module;
    let usage = stage.info.get_entry_point(index);

    let mut resources = Vec::new();
    let mut problems = Vec::new();

    for (handle, var) in module.global_variables.iter() {
        let Some(binding) = &var.binding else { continue };
        if usage[handle].is_empty() {
            continue;
        }

        let inner = &module.types[var.ty].inner;
        let name = var
            .name
            .clone()
            .or_else(|| anonymous_block_name(module, var.ty))
            .unwrap_or_else(|| format!("group{}_binding{}", binding.group, binding.binding));

        let kind = match (var.space, inner) {
            (AddressSpace::Uniform, _) => UniformKind::Buffer {
                size: inner.size(module.to_ctx()),
            },
            (AddressSpace::Handle, TypeInner::Image { .. }) => UniformKind::Texture,
            (AddressSpace::Handle, TypeInner::Sampler { .. }) => UniformKind::Sampler,
            (space, _) => {
                problems.push(format!(
                    "{} stage: `{name}` uses unsupported resource space {space:?}",
                    stage.stage
                ));
                continue;
            }
        };

        resources.push(Resource {
            name,
            slot: UniformSlot {
                group: binding.group,
                binding: binding.binding,
                kind,
            },
        });
    }

    (resources, problems)
}

/// Name for an instance-less uniform block: its only member, else the block type.
fn anonymous_block_name(module: &Module, ty: Handle<Type>) -> Option<String> {
    let ty = &module.types[ty];
    match &ty.inner {
        TypeInner::Struct { members, .. } if members.len() == 1 => members[0].name.clone(),
        _ => ty.name.clone(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shader::stage::compile_stage;
    use crate::shader::{ShaderLanguage, ShaderStage};

    fn vertex(src: &str) -> StageModule {
        compile_stage(ShaderStage::Vertex, ShaderLanguage::Wgsl, src).unwrap()
    }

    #[test]
    fn struct_outputs_are_flattened() {
        let m = vertex(
            r#"
struct Out {
    @builtin(position) pos: vec4<f32>,
    @location(0) uv: vec2<f32>,
    @location(2) tint: vec4<f32>,
};
@vertex fn vs_main(@location(0) p: vec2<f32>) -> Out {
    var o: Out;
    o.pos = vec4<f32>(p, 0.0, 1.0);
    o.uv = p;
    o.tint = vec4<f32>(1.0);
    return o;
}
"#,
        );
        let out = entry_outputs(&m, 0);
        assert!(out.writes_position);
        assert_eq!(out.locations.len(), 2);
        assert_eq!(out.at(2).and_then(Varying::components), Some(4));
        assert_eq!(out.at(0).and_then(|v| v.name.as_deref()), Some("uv"));

        let inputs = entry_inputs(&m, 0);
        assert!(!inputs.writes_position);
        assert_eq!(inputs.at(0).and_then(|v| v.name.as_deref()), Some("p"));
        assert_eq!(inputs.at(0).and_then(Varying::components), Some(2));
    }

    #[test]
    fn only_used_globals_are_active() {
        let m = vertex(
            r#"
@group(0) @binding(0) var<uniform> used: mat3x3<f32>;
@group(0) @binding(1) var<uniform> unused: vec4<f32>;
@vertex fn vs_main(@location(0) p: vec2<f32>) -> @builtin(position) vec4<f32> {
    let q = used * vec3<f32>(p, 1.0);
    return vec4<f32>(q.xy, 0.0, 1.0);
}
"#,
        );
        let (resources, problems) = active_resources(&m, 0);
        assert!(problems.is_empty());
        assert_eq!(resources.len(), 1);
        assert_eq!(resources[0].name, "used");
        assert_eq!(resources[0].slot.kind, UniformKind::Buffer { size: 48 });
    }

    #[test]
    fn textures_and_samplers_are_classified() {
        let m = compile_stage(
            ShaderStage::Fragment,
            ShaderLanguage::Wgsl,
            r#"
@group(0) @binding(0) var tex: texture_2d<f32>;
@group(0) @binding(1) var samp: sampler;
@fragment fn fs_main(@location(0) uv: vec2<f32>) -> @location(0) vec4<f32> {
    return textureSample(tex, samp, uv);
}
"#,
        )
        .unwrap();
        let (resources, _) = active_resources(&m, 0);
        let kinds: Vec<_> = resources.iter().map(|r| (r.name.as_str(), r.slot.kind)).collect();
        assert!(kinds.contains(&("tex", UniformKind::Texture)));
        assert!(kinds.contains(&("samp", UniformKind::Sampler)));
    }

    #[test]
    fn location_found() {
        assert!(Location::Attribute(0).is_found());
        assert!(!Location::NotFound.is_found());
    }
}
