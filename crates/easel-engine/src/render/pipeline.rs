use std::collections::HashMap;

use crate::device::DEPTH_FORMAT;
use crate::shader::GpuProgram;

/// Everything a render pipeline is specialised on.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub(crate) struct PipelineKey {
    pub program: u64,
    pub topology: wgpu::PrimitiveTopology,
    pub format: wgpu::TextureFormat,
    pub depth: bool,
    pub cull: bool,
    pub layout: Vec<(u32, u32)>,
}

#[derive(Default)]
pub(crate) struct PipelineCache {
    pipelines: HashMap<PipelineKey, wgpu::RenderPipeline>,
}

impl PipelineCache {
    pub fn ensure(&mut self, device: &wgpu::Device, key: &PipelineKey, program: &GpuProgram) {
        if self.pipelines.contains_key(key) {
            return;
        }
        log::debug!("creating pipeline for program #{} ({:?})", key.program, key.topology);
        let pipeline = create_pipeline(device, key, program);
        self.pipelines.insert(key.clone(), pipeline);
    }

    pub fn get(&self, key: &PipelineKey) -> Option<&wgpu::RenderPipeline> {
        self.pipelines.get(key)
    }

    pub fn len(&self) -> usize {
        self.pipelines.len()
    }
}

pub(crate) fn vertex_format(components: u32) -> wgpu::VertexFormat {
    match components {
        1 => wgpu::VertexFormat::Float32,
        2 => wgpu::VertexFormat::Float32x2,
        3 => wgpu::VertexFormat::Float32x3,
        _ => wgpu::VertexFormat::Float32x4,
    }
}

fn create_pipeline(device: &wgpu::Device, key: &PipelineKey, program: &GpuProgram) -> wgpu::RenderPipeline {
    let attributes: Vec<[wgpu::VertexAttribute; 1]> = key
        .layout
        .iter()
        .map(|&(location, components)| {
            [wgpu::VertexAttribute {
                format: vertex_format(components),
                offset: 0,
                shader_location: location,
            }]
        })
        .collect();

    let buffers: Vec<wgpu::VertexBufferLayout<'_>> = key
        .layout
        .iter()
        .zip(&attributes)
        .map(|(&(_, components), attrs)| wgpu::VertexBufferLayout {
            array_stride: components as u64 * std::mem::size_of::<f32>() as u64,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: attrs,
        })
        .collect();

    let compiled = program.program();

    device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
        label: Some("easel program pipeline"),
        layout: None,

        vertex: wgpu::VertexState {
            module: program.vertex_shader(),
            entry_point: Some(compiled.vertex_entry()),
            compilation_options: Default::default(),
            buffers: &buffers,
        },

        fragment: Some(wgpu::FragmentState {
            module: program.fragment_shader(),
            entry_point: Some(compiled.fragment_entry()),
            compilation_options: Default::default(),
            targets: &[Some(wgpu::ColorTargetState {
                format: key.format,
                blend: Some(wgpu::BlendState::ALPHA_BLENDING),
                write_mask: wgpu::ColorWrites::ALL,
            })],
        }),

        primitive: wgpu::PrimitiveState {
            topology: key.topology,
            strip_index_format: None,
            front_face: wgpu::FrontFace::Ccw,
            cull_mode: key.cull.then_some(wgpu::Face::Back),
            polygon_mode: wgpu::PolygonMode::Fill,
            unclipped_depth: false,
            conservative: false,
        },

        depth_stencil: key.depth.then(|| wgpu::DepthStencilState {
            format: DEPTH_FORMAT,
            depth_write_enabled: true,
            depth_compare: wgpu::CompareFunction::Less,
            stencil: wgpu::StencilState::default(),
            bias: wgpu::DepthBiasState::default(),
        }),
        multisample: wgpu::MultisampleState::default(),

        multiview_mask: None,
        cache: None,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn formats_by_component_count() {
        assert_eq!(vertex_format(1), wgpu::VertexFormat::Float32);
        assert_eq!(vertex_format(2), wgpu::VertexFormat::Float32x2);
        assert_eq!(vertex_format(3), wgpu::VertexFormat::Float32x3);
        assert_eq!(vertex_format(4), wgpu::VertexFormat::Float32x4);
    }

    #[test]
    fn keys_differ_by_layout() {
        let a = PipelineKey {
            program: 1,
            topology: wgpu::PrimitiveTopology::TriangleList,
            format: wgpu::TextureFormat::Bgra8UnormSrgb,
            depth: false,
            cull: false,
            layout: vec![(0, 2)],
        };
        let b = PipelineKey {
            layout: vec![(0, 3)],
            ..a.clone()
        };
        assert_ne!(a, b);
        assert_eq!(PipelineCache::default().get(&a).map(|_| ()), None);
    }
}
