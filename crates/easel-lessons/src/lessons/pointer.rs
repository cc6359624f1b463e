use anyhow::Result;
use glam::Vec2;

use easel_engine::coords::Color;
use easel_engine::core::{App, AppControl, FrameCtx};
use easel_engine::geometry::VertexBuffer;
use easel_engine::input::{ButtonState, InputEvent, InputState, MouseButton};
use easel_engine::render::{DrawCall, RenderCtx, RenderOptions, RenderTarget, Topology};
use easel_engine::shader::CompiledProgram;
use easel_engine::transform::{pointing_angle, Transform2D};

use super::canvas::Canvas;
use super::{exit_on_escape, finish};

/// An up-pointing arrow head around the origin.
pub fn arrow() -> VertexBuffer {
    VertexBuffer::new(2, vec![0.0, -60.0, -30.0, 30.0, 30.0, 30.0])
}

pub struct PointerLesson {
    canvas: Canvas,
    target: Option<Vec2>,
}

impl PointerLesson {
    pub fn new(program: CompiledProgram) -> Result<Self> {
        Ok(Self {
            canvas: Canvas::new(program, &[("a_position", 2)], RenderOptions::default())?,
            target: None,
        })
    }

    /// Remembers left clicks as the new target.
    fn aim(&mut self, event: &InputEvent) {
        if let InputEvent::PointerButton {
            button: MouseButton::Left,
            state: ButtonState::Pressed,
            x,
            y,
        } = *event
        {
            self.target = Some(Vec2::new(x, y));
        }
    }

    fn draw(&mut self, ctx: &RenderCtx<'_>, target: &mut RenderTarget<'_>) -> Result<()> {
        let centre = ctx.viewport.center();
        let rotation = self.target.map_or(0.0, |t| pointing_angle(centre, t));
        let transform = Transform2D::default().with_translation(centre).with_rotation(rotation);

        let shape = arrow();
        self.canvas.upload(ctx, "a_position", &shape)?;
        self.canvas.draw(
            ctx,
            target,
            &[
                ("u_matrix", transform.compose_in(ctx.viewport).into()),
                ("u_color", Color::from_rgb8(255, 90, 90).into()),
            ],
            &[DrawCall::new(Topology::Triangles, shape.vertex_count())],
        )
    }
}

impl App for PointerLesson {
    fn on_input(&mut self, event: &InputEvent, _state: &InputState) -> AppControl {
        self.aim(event);
        exit_on_escape(event)
    }

    fn on_frame(&mut self, ctx: &mut FrameCtx<'_, '_>) -> AppControl {
        let mut result = Ok(());
        let control = ctx.render(|rctx, target| result = self.draw(rctx, target));
        finish(control, result)
    }
}
