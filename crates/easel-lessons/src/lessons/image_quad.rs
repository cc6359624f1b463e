use anyhow::Result;

use easel_engine::coords::{Color, Viewport};
use easel_engine::core::{App, AppControl, FrameCtx};
use easel_engine::geometry::{rectangle, rectangle_tex_coords, VertexBuffer};
use easel_engine::input::{InputEvent, InputState};
use easel_engine::render::{DrawCall, ImageData, RenderCtx, RenderOptions, RenderTarget, Texture2D, Topology};
use easel_engine::shader::CompiledProgram;
use easel_engine::transform::pixel_projection;

use super::canvas::Canvas;
use super::{exit_on_escape, finish};

/// Largest placement of a `width x height` image inside `bounds` (90% margin),
/// never upscaled, centred. Returns `(x, y, w, h)`.
pub fn fit_centred(width: u32, height: u32, bounds: Viewport) -> (f32, f32, f32, f32) {
    let (iw, ih) = (width as f32, height as f32);
    let scale = (bounds.width * 0.9 / iw).min(bounds.height * 0.9 / ih).min(1.0);
    let (w, h) = (iw * scale, ih * scale);
    ((bounds.width - w) / 2.0, (bounds.height - h) / 2.0, w, h)
}

/// Strip-ordered positions and matching texture coordinates for `image` in `bounds`.
pub fn quad(image: &ImageData, bounds: Viewport) -> (VertexBuffer, VertexBuffer) {
    let (x, y, w, h) = fit_centred(image.width(), image.height(), bounds);
    (rectangle(x, y, w, h), rectangle_tex_coords())
}

pub struct ImageLesson {
    canvas: Canvas,
    image: ImageData,
    texture: Option<Texture2D>,
}

impl ImageLesson {
    pub fn new(program: CompiledProgram, image: ImageData) -> Result<Self> {
        Ok(Self {
            canvas: Canvas::new(
                program,
                &[("a_position", 2), ("a_tex_coord", 2)],
                RenderOptions {
                    clear_color: Color::from_rgb8(20, 20, 20),
                    ..RenderOptions::default()
                },
            )?,
            image,
            texture: None,
        })
    }

    fn draw(&mut self, ctx: &RenderCtx<'_>, target: &mut RenderTarget<'_>) -> Result<()> {
        let (image, texture) = (&self.image, &mut self.texture);
        self.canvas.prepare(ctx, |program| {
            let tex = Texture2D::from_image(ctx.device, ctx.queue, image, "image texture")?;
            anyhow::ensure!(program.bind_texture("u_texture", &tex), "program has no `u_texture`");
            anyhow::ensure!(program.bind_sampler("u_sampler", &tex), "program has no `u_sampler`");
            *texture = Some(tex);
            Ok(())
        })?;

        let vp = ctx.viewport;
        let (positions, tex_coords) = quad(&self.image, vp);
        self.canvas.upload(ctx, "a_position", &positions)?;
        self.canvas.upload(ctx, "a_tex_coord", &tex_coords)?;

        self.canvas.draw(
            ctx,
            target,
            &[
                ("u_matrix", pixel_projection(vp.width, vp.height).into()),
                ("u_tint", Color::WHITE.into()),
            ],
            &[DrawCall::new(Topology::TriangleStrip, positions.vertex_count())],
        )
    }
}

impl App for ImageLesson {
    fn on_input(&mut self, event: &InputEvent, _state: &InputState) -> AppControl {
        exit_on_escape(event)
    }

    fn on_frame(&mut self, ctx: &mut FrameCtx<'_, '_>) -> AppControl {
        let mut result = Ok(());
        let control = ctx.render(|rctx, target| result = self.draw(rctx, target));
        finish(control, result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn small_images_keep_their_size() {
        let (x, y, w, h) = fit_centred(100, 50, Viewport::new(800.0, 600.0));
        assert_eq!((w, h), (100.0, 50.0));
        assert_eq!((x, y), (350.0, 275.0));
    }

    #[test]
    fn large_images_shrink_preserving_aspect() {
        let (_, _, w, h) = fit_centred(2000, 1000, Viewport::new(800.0, 600.0));
        assert!((w - 720.0).abs() < 1e-3);
        assert!((h - 360.0).abs() < 1e-3);
    }

    #[test]
    fn quad_corners_carry_matching_tex_coords() {
        let image = ImageData::solid(100, 50, [255; 4]);
        let (positions, tex_coords) = quad(&image, Viewport::new(800.0, 600.0));
        assert_eq!(positions.vertex_count(), 4);
        assert_eq!(tex_coords.vertex_count(), 4);

        // Top-left samples the image origin, bottom-right its far corner.
        assert_eq!(positions.vertex(0), Some(&[350.0, 275.0][..]));
        assert_eq!(tex_coords.vertex(0), Some(&[0.0, 0.0][..]));
        assert_eq!(positions.vertex(3), Some(&[450.0, 325.0][..]));
        assert_eq!(tex_coords.vertex(3), Some(&[1.0, 1.0][..]));
    }
}
