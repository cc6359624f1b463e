use anyhow::Result;

use easel_engine::coords::{Color, Viewport};
use easel_engine::core::{App, AppControl, FrameCtx};
use easel_engine::geometry::{rectangle, VertexBuffer};
use easel_engine::input::{InputEvent, InputState};
use easel_engine::render::{DrawCall, RenderCtx, RenderOptions, RenderTarget, Topology};
use easel_engine::shader::CompiledProgram;
use easel_engine::transform::pixel_projection;

use super::canvas::Canvas;
use super::{exit_on_escape, finish};

/// Uniform names of the flat-colour program in each source language.
#[derive(Debug, Copy, Clone)]
pub struct FlatUniforms {
    pub matrix: &'static str,
    pub color: &'static str,
}

impl FlatUniforms {
    pub const WGSL: Self = Self {
        matrix: "u_matrix",
        color: "u_color",
    };
    // GLSL uniforms live in named blocks.
    pub const GLSL: Self = Self {
        matrix: "u_transform",
        color: "u_style",
    };
}

/// A square half the size of the shorter window side, centred.
pub fn centred_square(viewport: Viewport) -> VertexBuffer {
    let side = viewport.width.min(viewport.height) / 2.0;
    let c = viewport.center();
    rectangle(c.x - side / 2.0, c.y - side / 2.0, side, side)
}

pub struct SquareLesson {
    canvas: Canvas,
    uniforms: FlatUniforms,
}

impl SquareLesson {
    pub fn new(program: CompiledProgram, uniforms: FlatUniforms) -> Result<Self> {
        Ok(Self {
            canvas: Canvas::new(program, &[("a_position", 2)], RenderOptions::default())?,
            uniforms,
        })
    }

    fn draw(&mut self, ctx: &RenderCtx<'_>, target: &mut RenderTarget<'_>) -> Result<()> {
        let vp = ctx.viewport;
        self.canvas.upload(ctx, "a_position", &centred_square(vp))?;
        self.canvas.draw(
            ctx,
            target,
            &[
                (self.uniforms.matrix, pixel_projection(vp.width, vp.height).into()),
                (self.uniforms.color, Color::WHITE.into()),
            ],
            &[DrawCall::new(Topology::TriangleStrip, 4)],
        )
    }
}

impl App for SquareLesson {
    fn on_input(&mut self, event: &InputEvent, _state: &InputState) -> AppControl {
        exit_on_escape(event)
    }

    fn on_frame(&mut self, ctx: &mut FrameCtx<'_, '_>) -> AppControl {
        let mut result = Ok(());
        let control = ctx.render(|rctx, target| result = self.draw(rctx, target));
        finish(control, result)
    }
}
