use anyhow::Result;
use glam::Vec2;

use easel_engine::coords::{Color, Viewport};
use easel_engine::core::{App, AppControl, FrameCtx};
use easel_engine::geometry::rectangle;
use easel_engine::input::{ButtonState, InputEvent, InputState, Key};
use easel_engine::render::{DrawCall, RenderCtx, RenderOptions, RenderTarget, Topology};
use easel_engine::shader::CompiledProgram;
use easel_engine::transform::pixel_projection;

use super::canvas::Canvas;
use super::{exit_on_escape, finish};

const STEP: f32 = 10.0;
const SIZE: f32 = 60.0;

/// A square moved in fixed steps, kept inside the window.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Mover {
    pub pos: Vec2,
    pub size: f32,
}

impl Mover {
    pub fn centred(bounds: Viewport) -> Self {
        Self {
            pos: bounds.center() - Vec2::splat(SIZE / 2.0),
            size: SIZE,
        }
    }

    /// Position after one press of `key`; other keys leave it unchanged.
    pub fn nudge(self, key: Key, bounds: Viewport) -> Self {
        let delta = match key {
            Key::ArrowLeft => Vec2::new(-STEP, 0.0),
            Key::ArrowRight => Vec2::new(STEP, 0.0),
            Key::ArrowUp => Vec2::new(0.0, -STEP),
            Key::ArrowDown => Vec2::new(0.0, STEP),
            _ => return self,
        };
        let max = (Vec2::new(bounds.width, bounds.height) - self.size).max(Vec2::ZERO);
        Self {
            pos: (self.pos + delta).clamp(Vec2::ZERO, max),
            ..self
        }
    }
}

pub struct KeyboardLesson {
    canvas: Canvas,
    mover: Option<Mover>,
    bounds: Viewport,
}

impl KeyboardLesson {
    pub fn new(program: CompiledProgram) -> Result<Self> {
        Ok(Self {
            canvas: Canvas::new(program, &[("a_position", 2)], RenderOptions::default())?,
            mover: None,
            bounds: Viewport::default(),
        })
    }

    fn draw(&mut self, ctx: &RenderCtx<'_>, target: &mut RenderTarget<'_>, mover: Mover) -> Result<()> {
        let vp = ctx.viewport;
        self.canvas
            .upload(ctx, "a_position", &rectangle(mover.pos.x, mover.pos.y, mover.size, mover.size))?;
        self.canvas.draw(
            ctx,
            target,
            &[
                ("u_matrix", pixel_projection(vp.width, vp.height).into()),
                ("u_color", Color::from_rgb8(80, 160, 255).into()),
            ],
            &[DrawCall::new(Topology::TriangleStrip, 4)],
        )
    }
}

impl App for KeyboardLesson {
    fn on_input(&mut self, event: &InputEvent, _state: &InputState) -> AppControl {
        if let (
            Some(mover),
            InputEvent::Key {
                key,
                state: ButtonState::Pressed,
                ..
            },
        ) = (self.mover, event)
        {
            self.mover = Some(mover.nudge(*key, self.bounds));
        }
        exit_on_escape(event)
    }

    fn on_frame(&mut self, ctx: &mut FrameCtx<'_, '_>) -> AppControl {
        self.bounds = ctx.viewport();
        let mover = *self.mover.get_or_insert_with(|| Mover::centred(self.bounds));

        let mut result = Ok(());
        let control = ctx.render(|rctx, target| result = self.draw(rctx, target, mover));
        finish(control, result)
    }
}
