use std::borrow::Cow;
use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};

use super::{CompiledProgram, UniformKind, UniformSlot};
use crate::render::{Texture2D, UniformValue};

static NEXT_PROGRAM_ID: AtomicU64 = AtomicU64::new(1);

enum BoundResource {
    Buffer(wgpu::Buffer),
    Texture(wgpu::TextureView),
    Sampler(wgpu::Sampler),
}

/// A `CompiledProgram` uploaded to a device.
///
/// Owns one uniform buffer per active buffer uniform (zeroed until set) and
/// whatever textures/samplers have been bound by name.
pub struct GpuProgram {
    id: u64,
    program: CompiledProgram,
    vertex: wgpu::ShaderModule,
    fragment: wgpu::ShaderModule,
    resources: HashMap<(u32, u32), BoundResource>,
}

impl GpuProgram {
    pub fn upload(device: &wgpu::Device, program: &CompiledProgram) -> Self {
        let id = NEXT_PROGRAM_ID.fetch_add(1, Ordering::Relaxed);

        let vertex = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("easel vertex shader"),
            source: wgpu::ShaderSource::Naga(Cow::Owned(program.vertex_module().clone())),
        });
        let fragment = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("easel fragment shader"),
            source: wgpu::ShaderSource::Naga(Cow::Owned(program.fragment_module().clone())),
        });

        let mut resources = HashMap::new();
        for (name, slot) in program.uniforms() {
            if let UniformKind::Buffer { size } = slot.kind {
                let buffer = device.create_buffer(&wgpu::BufferDescriptor {
                    label: Some(name),
                    size: uniform_buffer_size(size),
                    usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
                    mapped_at_creation: false,
                });
                resources.insert(slot.key(), BoundResource::Buffer(buffer));
            }
        }

        log::debug!("uploaded program #{id} ({} uniform buffer(s))", resources.len());

        Self {
            id,
            program: program.clone(),
            vertex,
            fragment,
            resources,
        }
    }

    /// Process-unique id, stable for the life of this upload.
    pub fn id(&self) -> u64 {
        self.id
    }

    pub fn program(&self) -> &CompiledProgram {
        &self.program
    }

    pub(crate) fn vertex_shader(&self) -> &wgpu::ShaderModule {
        &self.vertex
    }

    pub(crate) fn fragment_shader(&self) -> &wgpu::ShaderModule {
        &self.fragment
    }

    /// Writes `value` into the uniform buffer for `name`.
    ///
    /// Returns `false` (with a warning) when `name` is not an active buffer
    /// uniform or the value does not fit.
    pub fn set_uniform(&self, queue: &wgpu::Queue, name: &str, value: &UniformValue) -> bool {
        let Some(slot) = self.slot(name) else { return false };
        let UniformKind::Buffer { size } = slot.kind else {
            log::warn!("uniform `{name}` is a {:?}, not a buffer", slot.kind);
            return false;
        };

        let bytes = value.to_bytes();
        if bytes.len() as u64 > size as u64 {
            log::warn!("value for uniform `{name}` is {} bytes, slot holds {size}", bytes.len());
            return false;
        }

        let Some(BoundResource::Buffer(buffer)) = self.resources.get(&slot.key()) else {
            return false;
        };
        queue.write_buffer(buffer, 0, &bytes);
        true
    }

    pub fn bind_texture(&mut self, name: &str, texture: &Texture2D) -> bool {
        self.bind(name, UniformKind::Texture, BoundResource::Texture(texture.view().clone()))
    }

    pub fn bind_sampler(&mut self, name: &str, texture: &Texture2D) -> bool {
        self.bind(name, UniformKind::Sampler, BoundResource::Sampler(texture.sampler().clone()))
    }

    /// Names of active textures/samplers with nothing bound yet.
    pub fn unbound(&self) -> Vec<&str> {
        self.program
            .uniforms()
            .into_iter()
            .filter(|(_, slot)| !self.resources.contains_key(&slot.key()))
            .map(|(name, _)| name)
            .collect()
    }

    /// One bind group per group index up to the highest used, built against
    /// `pipeline`'s layout. `Err` names the first unbound resource.
    pub(crate) fn bind_groups(
        &self,
        device: &wgpu::Device,
        pipeline: &wgpu::RenderPipeline,
    ) -> Result<Vec<wgpu::BindGroup>, String> {
        let uniforms = self.program.uniforms();
        let Some(max_group) = uniforms.iter().map(|(_, s)| s.group).max() else {
            return Ok(Vec::new());
        };

        (0..=max_group)
            .map(|group| {
                let entries = uniforms
                    .iter()
                    .filter(|(_, s)| s.group == group)
                    .map(|(name, slot)| {
                        let resource = match self.resources.get(&slot.key()) {
                            Some(BoundResource::Buffer(b)) => b.as_entire_binding(),
                            Some(BoundResource::Texture(v)) => wgpu::BindingResource::TextureView(v),
                            Some(BoundResource::Sampler(s)) => wgpu::BindingResource::Sampler(s),
                            None => return Err(name.to_string()),
                        };
                        Ok(wgpu::BindGroupEntry {
                            binding: slot.binding,
                            resource,
                        })
                    })
                    .collect::<Result<Vec<_>, _>>()?;

                Ok(device.create_bind_group(&wgpu::BindGroupDescriptor {
                    label: Some("easel program bind group"),
                    layout: &pipeline.get_bind_group_layout(group),
                    entries: &entries,
                }))
            })
            .collect()
    }

    fn slot(&self, name: &str) -> Option<UniformSlot> {
        let slot = self.program.uniform_slot(name);
        if slot.is_none() {
            log::warn!("shader program has no active uniform named `{name}`");
        }
        slot
    }

    fn bind(&mut self, name: &str, kind: UniformKind, resource: BoundResource) -> bool {
        let Some(slot) = self.slot(name) else { return false };
        if slot.kind != kind {
            log::warn!("uniform `{name}` is a {:?}, cannot bind a {kind:?}", slot.kind);
            return false;
        }
        self.resources.insert(slot.key(), resource);
        true
    }
}

/// Uniform buffers are allocated in 16-byte steps.
fn uniform_buffer_size(size: u32) -> u64 {
    (size.max(16) as u64).next_multiple_of(16)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn buffer_sizes_round_up() {
        assert_eq!(uniform_buffer_size(4), 16);
        assert_eq!(uniform_buffer_size(12), 16);
        assert_eq!(uniform_buffer_size(48), 48);
        assert_eq!(uniform_buffer_size(50), 64);
    }
}
