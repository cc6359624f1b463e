use anyhow::Result;

use easel_engine::coords::Color;
use easel_engine::core::{App, AppControl, FrameCtx};
use easel_engine::geometry::{circle_fan, circle_tex_coords};
use easel_engine::input::{InputEvent, InputState};
use easel_engine::render::{DrawCall, ImageData, RenderCtx, RenderOptions, RenderTarget, Texture2D, Topology};
use easel_engine::shader::CompiledProgram;
use easel_engine::transform::pixel_projection;

use super::canvas::Canvas;
use super::{exit_on_escape, finish};

const STEPS: u32 = 64;

/// Tint cycling slowly through warm colours.
pub fn tint_at(elapsed: f64) -> Color {
    let t = elapsed as f32;
    Color::new(1.0, 0.75 + 0.25 * t.sin(), 0.75 + 0.25 * (t * 0.7).cos(), 1.0)
}

pub struct TexturedCircleLesson {
    canvas: Canvas,
    image: ImageData,
    texture: Option<Texture2D>,
    elapsed: f64,
}

impl TexturedCircleLesson {
    pub fn new(program: CompiledProgram, image: ImageData) -> Result<Self> {
        Ok(Self {
            canvas: Canvas::new(
                program,
                &[("a_position", 2), ("a_tex_coord", 2)],
                RenderOptions {
                    clear_color: Color::from_rgb8(30, 30, 40),
                    ..RenderOptions::default()
                },
            )?,
            image,
            texture: None,
            elapsed: 0.0,
        })
    }

    fn draw(&mut self, ctx: &RenderCtx<'_>, target: &mut RenderTarget<'_>) -> Result<()> {
        let (image, texture) = (&self.image, &mut self.texture);
        self.canvas.prepare(ctx, |program| {
            let tex = Texture2D::from_image(ctx.device, ctx.queue, image, "circle texture")?;
            anyhow::ensure!(program.bind_texture("u_texture", &tex), "program has no `u_texture`");
            anyhow::ensure!(program.bind_sampler("u_sampler", &tex), "program has no `u_sampler`");
            *texture = Some(tex);
            Ok(())
        })?;

        let vp = ctx.viewport;
        let c = vp.center();
        let radius = vp.width.min(vp.height) / 3.0;
        let positions = circle_fan(c.x, c.y, radius, STEPS);
        self.canvas.upload(ctx, "a_position", &positions)?;
        self.canvas.upload(ctx, "a_tex_coord", &circle_tex_coords(STEPS))?;

        self.canvas.draw(
            ctx,
            target,
            &[
                ("u_matrix", pixel_projection(vp.width, vp.height).into()),
                ("u_tint", tint_at(self.elapsed).into()),
            ],
            &[DrawCall::new(Topology::TriangleFan, positions.vertex_count())],
        )
    }
}

impl App for TexturedCircleLesson {
    fn on_input(&mut self, event: &InputEvent, _state: &InputState) -> AppControl {
        exit_on_escape(event)
    }

    fn on_frame(&mut self, ctx: &mut FrameCtx<'_, '_>) -> AppControl {
        self.elapsed = ctx.time.elapsed;

        let mut result = Ok(());
        let control = ctx.render(|rctx, target| result = self.draw(rctx, target));
        finish(control, result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tint_stays_in_range() {
        for i in 0..200 {
            let c = tint_at(i as f64 * 0.1);
            for ch in c.to_array() {
                assert!((0.0..=1.0).contains(&ch));
            }
        }
    }
}
