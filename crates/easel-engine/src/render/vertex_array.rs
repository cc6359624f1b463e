use anyhow::{Context, Result};

use crate::geometry::VertexBuffer;
use crate::shader::CompiledProgram;

struct AttributeSlot {
    name: String,
    location: u32,
    components: u32,
    buffer: Option<wgpu::Buffer>,
    capacity: u64,
    vertex_count: u32,
}

/// Which buffer feeds which attribute location.
///
/// One tightly packed `f32` buffer per attribute. Built against a program so
/// every active attribute is known to be fed.
pub struct VertexArray {
    slots: Vec<AttributeSlot>,
}

impl VertexArray {
    /// `attributes` lists `(name, components)` pairs.
    pub fn new(program: &CompiledProgram, attributes: &[(&str, u32)]) -> Result<Self> {
        let mut slots: Vec<AttributeSlot> = Vec::with_capacity(attributes.len());

        for &(name, components) in attributes {
            anyhow::ensure!(
                (1..=4).contains(&components),
                "attribute `{name}` has {components} components (expected 1..=4)"
            );
            let location = program
                .attribute_location(name)
                .with_context(|| format!("`{name}` is not an active attribute of the program"))?;
            if let Some(declared) = program.attribute_components(name) {
                anyhow::ensure!(
                    components <= declared,
                    "attribute `{name}` is fed {components} components but the shader declares {declared}"
                );
            }
            anyhow::ensure!(
                slots.iter().all(|s| s.location != location),
                "attribute `{name}` is listed twice"
            );
            slots.push(AttributeSlot {
                name: name.to_string(),
                location,
                components,
                buffer: None,
                capacity: 0,
                vertex_count: 0,
            });
        }

        for (name, location) in program.attributes() {
            anyhow::ensure!(
                slots.iter().any(|s| s.location == location),
                "active attribute `{name}` (location {location}) has no buffer"
            );
        }

        Ok(Self { slots })
    }

    /// Replaces the data feeding `name`.
    pub fn upload(
        &mut self,
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        name: &str,
        data: &VertexBuffer,
    ) -> Result<()> {
        let slot = self
            .slots
            .iter_mut()
            .find(|s| s.name == name)
            .with_context(|| format!("vertex array has no attribute `{name}`"))?;
        anyhow::ensure!(
            data.components() == slot.components,
            "attribute `{name}` takes {} components, got {}",
            slot.components,
            data.components()
        );

        slot.vertex_count = data.vertex_count();
        if data.is_empty() {
            return Ok(());
        }

        let bytes = data.as_bytes();
        let needed = bytes.len() as u64;
        if slot.buffer.is_none() || slot.capacity < needed {
            let capacity = needed.next_power_of_two().max(64);
            slot.buffer = Some(device.create_buffer(&wgpu::BufferDescriptor {
                label: Some(&slot.name),
                size: capacity,
                usage: wgpu::BufferUsages::VERTEX | wgpu::BufferUsages::COPY_DST,
                mapped_at_creation: false,
            }));
            slot.capacity = capacity;
        }

        if let Some(buffer) = &slot.buffer {
            queue.write_buffer(buffer, 0, bytes);
        }
        Ok(())
    }

    /// Vertices available to every attribute.
    pub fn vertex_count(&self) -> u32 {
        self.slots
            .iter()
            .map(|s| if s.buffer.is_some() { s.vertex_count } else { 0 })
            .min()
            .unwrap_or(0)
    }

    /// `(location, components)` per buffer slot, in binding order.
    pub(crate) fn layout(&self) -> Vec<(u32, u32)> {
        self.slots.iter().map(|s| (s.location, s.components)).collect()
    }

    pub(crate) fn buffers(&self) -> impl Iterator<Item = Option<&wgpu::Buffer>> {
        self.slots.iter().map(|s| s.buffer.as_ref())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shader::{compile, ShaderLanguage};

    const VS: &str = r#"
struct VsOut {
    @builtin(position) pos: vec4<f32>,
    @location(0) uv: vec2<f32>,
};
@vertex
fn vs_main(@location(0) a_position: vec2<f32>, @location(1) a_uv: vec2<f32>) -> VsOut {
    var out: VsOut;
    out.pos = vec4<f32>(a_position, 0.0, 1.0);
    out.uv = a_uv;
    return out;
}
"#;
    const FS: &str = r#"
@fragment
fn fs_main(@location(0) uv: vec2<f32>) -> @location(0) vec4<f32> {
    return vec4<f32>(uv, 0.0, 1.0);
}
"#;

    fn program() -> CompiledProgram {
        compile(ShaderLanguage::Wgsl, VS, FS).unwrap()
    }

    #[test]
    fn layout_follows_request_order() {
        let vao = VertexArray::new(&program(), &[("a_uv", 2), ("a_position", 2)]).unwrap();
        assert_eq!(vao.layout(), vec![(1, 2), (0, 2)]);
        assert_eq!(vao.vertex_count(), 0);
        assert!(vao.buffers().all(|b| b.is_none()));
    }

    #[test]
    fn rejects_unknown_attribute() {
        let err = VertexArray::new(&program(), &[("a_position", 2), ("a_uv", 2), ("a_color", 4)])
            .err()
            .unwrap();
        assert!(err.to_string().contains("a_color"));
    }

    #[test]
    fn rejects_unfed_attribute() {
        let err = VertexArray::new(&program(), &[("a_position", 2)]).err().unwrap();
        assert!(err.to_string().contains("a_uv"));
    }

    #[test]
    fn rejects_bad_component_count() {
        assert!(VertexArray::new(&program(), &[("a_position", 5), ("a_uv", 2)]).is_err());
        assert!(VertexArray::new(&program(), &[("a_position", 2), ("a_position", 2), ("a_uv", 2)]).is_err());
    }

    #[test]
    fn rejects_more_components_than_declared() {
        let err = VertexArray::new(&program(), &[("a_position", 3), ("a_uv", 2)]).err().unwrap();
        assert!(err.to_string().contains("declares 2"));

        // Fewer is fine: missing components take the shader's defaults.
        assert!(VertexArray::new(&program(), &[("a_position", 1), ("a_uv", 2)]).is_ok());
    }
}
