use std::ops::Range;

use crate::coords::Color;
use crate::render::{RenderCtx, RenderTarget};
use crate::shader::GpuProgram;

use super::draw::{fan_indices, DrawCall, Topology};
use super::pipeline::{PipelineCache, PipelineKey};
use super::uniform::UniformValue;
use super::vertex_array::VertexArray;

/// Per-renderer pass configuration.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct RenderOptions {
    pub clear_color: Color,
    /// Clears and tests depth when the target has a depth attachment.
    pub depth_test: bool,
    pub cull_back_faces: bool,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            clear_color: Color::BLACK,
            depth_test: false,
            cull_back_faces: false,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
enum PlannedDraw {
    Direct { key: usize, vertices: Range<u32> },
    Fan { key: usize, indices: Range<u32> },
}

/// Validated draws, the distinct pipeline keys they use and the fan indices
/// they share (one index buffer for every fan in the call).
#[derive(Debug, Default)]
struct DrawPlan {
    keys: Vec<PipelineKey>,
    draws: Vec<PlannedDraw>,
    fan_indices: Vec<u32>,
}

/// Plans `draws` against `available` uploaded vertices.
///
/// `base` supplies everything but the topology of each pipeline key.
fn plan_draws(draws: &[DrawCall], available: u32, base: &PipelineKey) -> DrawPlan {
    let mut plan = DrawPlan::default();

    for draw in draws {
        if draw.end() > available as u64 {
            log::error!(
                "skipping {:?} draw of {} vertices at {}: only {available} uploaded",
                draw.topology,
                draw.count,
                draw.first
            );
            continue;
        }
        if draw.count < draw.topology.min_vertices() {
            log::debug!("skipping {:?} draw of {} vertices: nothing to rasterise", draw.topology, draw.count);
            continue;
        }

        let key = PipelineKey {
            topology: draw.topology.to_wgpu(),
            ..base.clone()
        };
        let key = match plan.keys.iter().position(|k| *k == key) {
            Some(i) => i,
            None => {
                plan.keys.push(key);
                plan.keys.len() - 1
            }
        };

        plan.draws.push(match draw.topology {
            Topology::TriangleFan => {
                let start = plan.fan_indices.len() as u32;
                plan.fan_indices.extend(fan_indices(draw.first, draw.count));
                PlannedDraw::Fan {
                    key,
                    indices: start..plan.fan_indices.len() as u32,
                }
            }
            _ => PlannedDraw::Direct {
                key,
                vertices: draw.first..draw.first + draw.count,
            },
        });
    }

    plan
}

/// Draws one program + vertex array per call.
///
/// Each call clears the target, then binds pipeline, uniforms and vertex
/// buffers from scratch; nothing is inherited from a previous call.
#[derive(Default)]
pub struct FrameRenderer {
    options: RenderOptions,
    pipelines: PipelineCache,

    fan_ibo: Option<wgpu::Buffer>,
    fan_capacity: u64,

    warned_no_depth: bool,
}

impl FrameRenderer {
    pub fn new(options: RenderOptions) -> Self {
        Self {
            options,
            ..Self::default()
        }
    }

    pub fn options(&self) -> RenderOptions {
        self.options
    }

    pub fn set_options(&mut self, options: RenderOptions) {
        self.options = options;
    }

    pub fn pipeline_count(&self) -> usize {
        self.pipelines.len()
    }

    /// Clears `target` and issues a single draw.
    pub fn render_frame(
        &mut self,
        ctx: &RenderCtx<'_>,
        target: &mut RenderTarget<'_>,
        program: &GpuProgram,
        vao: &VertexArray,
        uniforms: &[(&str, UniformValue)],
        draw: DrawCall,
    ) {
        self.render_draws(ctx, target, program, vao, uniforms, std::slice::from_ref(&draw));
    }

    /// Clears `target` and issues every draw in `draws` against the same
    /// program, uniforms and vertex buffers.
    ///
    /// Draws reading past the uploaded vertices are skipped with an error.
    pub fn render_draws(
        &mut self,
        ctx: &RenderCtx<'_>,
        target: &mut RenderTarget<'_>,
        program: &GpuProgram,
        vao: &VertexArray,
        uniforms: &[(&str, UniformValue)],
        draws: &[DrawCall],
    ) {
        let depth_view = match (self.options.depth_test, target.depth_view) {
            (true, Some(view)) => Some(view),
            (true, None) => {
                if !self.warned_no_depth {
                    log::warn!("depth test requested but the target has no depth buffer");
                    self.warned_no_depth = true;
                }
                None
            }
            (false, _) => None,
        };

        for (name, value) in uniforms {
            program.set_uniform(ctx.queue, name, value);
        }

        let base = PipelineKey {
            program: program.id(),
            topology: wgpu::PrimitiveTopology::TriangleList,
            format: ctx.surface_format,
            depth: depth_view.is_some(),
            cull: self.options.cull_back_faces,
            layout: vao.layout(),
        };
        let DrawPlan {
            keys,
            draws: planned,
            fan_indices: fan,
        } = plan_draws(draws, vao.vertex_count(), &base);

        for key in &keys {
            self.pipelines.ensure(ctx.device, key, program);
        }
        self.ensure_fan_indices(ctx, &fan);

        // Bind groups are tied to each pipeline's derived layout.
        let mut bound: Vec<Option<Vec<wgpu::BindGroup>>> = Vec::with_capacity(keys.len());
        for key in &keys {
            let groups = self
                .pipelines
                .get(key)
                .map(|pipeline| program.bind_groups(ctx.device, pipeline));
            match groups {
                Some(Ok(groups)) => bound.push(Some(groups)),
                Some(Err(name)) => {
                    log::error!("skipping draw: shader resource `{name}` has nothing bound");
                    bound.push(None);
                }
                None => bound.push(None),
            }
        }

        let mut rpass = target.encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
            label: Some("easel frame"),
            color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                view: target.color_view,
                resolve_target: None,
                ops: wgpu::Operations {
                    load: wgpu::LoadOp::Clear(self.options.clear_color.to_wgpu()),
                    store: wgpu::StoreOp::Store,
                },
                depth_slice: None,
            })],
            depth_stencil_attachment: depth_view.map(|view| wgpu::RenderPassDepthStencilAttachment {
                view,
                depth_ops: Some(wgpu::Operations {
                    load: wgpu::LoadOp::Clear(1.0),
                    store: wgpu::StoreOp::Store,
                }),
                stencil_ops: None,
            }),
            timestamp_writes: None,
            occlusion_query_set: None,
            multiview_mask: None,
        });

        let mut current: Option<usize> = None;
        for draw in &planned {
            let (PlannedDraw::Direct { key, .. } | PlannedDraw::Fan { key, .. }) = draw;
            let key = *key;

            let (Some(pipeline), Some(Some(groups))) = (self.pipelines.get(&keys[key]), bound.get(key)) else {
                continue;
            };

            if current != Some(key) {
                rpass.set_pipeline(pipeline);
                for (i, group) in groups.iter().enumerate() {
                    rpass.set_bind_group(i as u32, group, &[]);
                }
                for (slot, buffer) in vao.buffers().enumerate() {
                    if let Some(buffer) = buffer {
                        rpass.set_vertex_buffer(slot as u32, buffer.slice(..));
                    }
                }
                current = Some(key);
            }

            match draw {
                PlannedDraw::Direct { vertices, .. } => rpass.draw(vertices.clone(), 0..1),
                PlannedDraw::Fan { indices, .. } => {
                    let Some(ibo) = &self.fan_ibo else { continue };
                    rpass.set_index_buffer(ibo.slice(..), wgpu::IndexFormat::Uint32);
                    rpass.draw_indexed(indices.clone(), 0, 0..1);
                }
            }
        }
    }

    fn ensure_fan_indices(&mut self, ctx: &RenderCtx<'_>, indices: &[u32]) {
        if indices.is_empty() {
            return;
        }
        let needed = std::mem::size_of_val(indices) as u64;
        if self.fan_ibo.is_none() || self.fan_capacity < needed {
            let capacity = needed.next_power_of_two().max(64);
            self.fan_ibo = Some(ctx.device.create_buffer(&wgpu::BufferDescriptor {
                label: Some("easel fan indices"),
                size: capacity,
                usage: wgpu::BufferUsages::INDEX | wgpu::BufferUsages::COPY_DST,
                mapped_at_creation: false,
            }));
            self.fan_capacity = capacity;
        }
        if let Some(ibo) = &self.fan_ibo {
            ctx.queue.write_buffer(ibo, 0, bytemuck::cast_slice(indices));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_options_clear_black_without_depth() {
        let opts = RenderOptions::default();
        assert_eq!(opts.clear_color, Color::BLACK);
        assert!(!opts.depth_test);
        assert!(!opts.cull_back_faces);
    }

    #[test]
    fn new_keeps_options() {
        let opts = RenderOptions {
            depth_test: true,
            ..RenderOptions::default()
        };
        let renderer = FrameRenderer::new(opts);
        assert_eq!(renderer.options(), opts);
        assert_eq!(renderer.pipeline_count(), 0);
    }

    fn base_key() -> PipelineKey {
        PipelineKey {
            program: 7,
            topology: wgpu::PrimitiveTopology::TriangleList,
            format: wgpu::TextureFormat::Bgra8UnormSrgb,
            depth: false,
            cull: false,
            layout: vec![(0, 2)],
        }
    }

    #[test]
    fn fans_sharing_a_buffer_index_their_own_vertices() {
        let draws = [
            DrawCall::new(Topology::TriangleFan, 10),
            DrawCall::new(Topology::TriangleFan, 10).starting_at(14),
        ];
        let plan = plan_draws(&draws, 24, &base_key());

        assert_eq!(plan.keys.len(), 1);
        assert_eq!(plan.keys[0].topology, wgpu::PrimitiveTopology::TriangleList);
        assert_eq!(
            plan.draws,
            vec![
                PlannedDraw::Fan { key: 0, indices: 0..24 },
                PlannedDraw::Fan { key: 0, indices: 24..48 },
            ]
        );
        assert_eq!(&plan.fan_indices[24..27], &[14, 15, 16]);
        assert!(plan.fan_indices[24..].iter().all(|i| (14..24).contains(i)));
    }

    #[test]
    fn out_of_range_draws_are_skipped() {
        let draws = [
            DrawCall::new(Topology::TriangleStrip, 4).starting_at(2),
            DrawCall::new(Topology::Triangles, 3),
        ];
        let plan = plan_draws(&draws, 5, &base_key());

        assert_eq!(plan.draws, vec![PlannedDraw::Direct { key: 0, vertices: 0..3 }]);
        assert_eq!(plan.keys.len(), 1);
        assert!(plan.fan_indices.is_empty());
    }

    #[test]
    fn degenerate_draws_are_dropped() {
        let draws = [
            DrawCall::new(Topology::Triangles, 2),
            DrawCall::new(Topology::TriangleFan, 0),
            DrawCall::new(Topology::Lines, 1),
        ];
        let plan = plan_draws(&draws, 8, &base_key());
        assert!(plan.draws.is_empty());
        assert!(plan.keys.is_empty());
    }

    #[test]
    fn draws_share_keys_by_topology() {
        let draws = [
            DrawCall::new(Topology::Triangles, 3),
            DrawCall::new(Topology::TriangleStrip, 4).starting_at(3),
            DrawCall::new(Topology::Triangles, 3).starting_at(7),
        ];
        let plan = plan_draws(&draws, 10, &base_key());

        assert_eq!(plan.keys.len(), 2);
        assert_eq!(plan.keys[1].topology, wgpu::PrimitiveTopology::TriangleStrip);
        assert_eq!(plan.keys[1].layout, base_key().layout);
        assert_eq!(
            plan.draws,
            vec![
                PlannedDraw::Direct { key: 0, vertices: 0..3 },
                PlannedDraw::Direct { key: 1, vertices: 3..7 },
                PlannedDraw::Direct { key: 0, vertices: 7..10 },
            ]
        );
    }
}
