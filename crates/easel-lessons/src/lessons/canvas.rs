use anyhow::Result;

use easel_engine::geometry::VertexBuffer;
use easel_engine::render::{DrawCall, FrameRenderer, RenderCtx, RenderOptions, RenderTarget, UniformValue, VertexArray};
use easel_engine::shader::{CompiledProgram, GpuProgram};

/// One program, its vertex array and a renderer: what every lesson draws with.
pub struct Canvas {
    program: CompiledProgram,
    vao: VertexArray,
    renderer: FrameRenderer,
    gpu: Option<GpuProgram>,
}

impl Canvas {
    pub fn new(program: CompiledProgram, attributes: &[(&str, u32)], options: RenderOptions) -> Result<Self> {
        let vao = VertexArray::new(&program, attributes)?;
        Ok(Self {
            program,
            vao,
            renderer: FrameRenderer::new(options),
            gpu: None,
        })
    }

    /// Uploads the program on first use; `setup` runs once, on the fresh upload.
    pub fn prepare<F>(&mut self, ctx: &RenderCtx<'_>, setup: F) -> Result<()>
    where
        F: FnOnce(&mut GpuProgram) -> Result<()>,
    {
        if self.gpu.is_none() {
            let mut gpu = GpuProgram::upload(ctx.device, &self.program);
            setup(&mut gpu)?;
            let unbound = gpu.unbound();
            anyhow::ensure!(unbound.is_empty(), "shader resources left unbound: {}", unbound.join(", "));
            self.gpu = Some(gpu);
        }
        Ok(())
    }

    pub fn upload(&mut self, ctx: &RenderCtx<'_>, attribute: &str, data: &VertexBuffer) -> Result<()> {
        self.vao.upload(ctx.device, ctx.queue, attribute, data)
    }

    pub fn draw(
        &mut self,
        ctx: &RenderCtx<'_>,
        target: &mut RenderTarget<'_>,
        uniforms: &[(&str, UniformValue)],
        draws: &[DrawCall],
    ) -> Result<()> {
        self.prepare(ctx, |_| Ok(()))?;
        if let Some(gpu) = &self.gpu {
            self.renderer.render_draws(ctx, target, gpu, &self.vao, uniforms, draws);
        }
        Ok(())
    }
}
