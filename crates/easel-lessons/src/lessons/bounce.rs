use anyhow::Result;
use glam::Vec2;

use easel_engine::coords::{Color, Viewport};
use easel_engine::core::{App, AppControl, FrameCtx};
use easel_engine::geometry::rectangle;
use easel_engine::input::{InputEvent, InputState};
use easel_engine::render::{DrawCall, RenderCtx, RenderOptions, RenderTarget, Topology};
use easel_engine::shader::CompiledProgram;
use easel_engine::transform::pixel_projection;

use super::canvas::Canvas;
use super::{exit_on_escape, finish};

/// A square moving at constant speed, reflecting off the window edges.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Bouncer {
    pub pos: Vec2,
    pub vel: Vec2,
    pub size: f32,
}

impl Bouncer {
    pub fn new(pos: Vec2, vel: Vec2, size: f32) -> Self {
        Self { pos, vel, size }
    }

    /// State after `dt` seconds inside `bounds`.
    pub fn advance(self, dt: f32, bounds: Viewport) -> Self {
        let max = (Vec2::new(bounds.width, bounds.height) - self.size).max(Vec2::ZERO);
        let mut pos = self.pos + self.vel * dt;
        let mut vel = self.vel;

        for axis in 0..2 {
            if pos[axis] < 0.0 {
                pos[axis] = -pos[axis];
                vel[axis] = vel[axis].abs();
            } else if pos[axis] > max[axis] {
                pos[axis] = 2.0 * max[axis] - pos[axis];
                vel[axis] = -vel[axis].abs();
            }
            pos[axis] = pos[axis].clamp(0.0, max[axis]);
        }

        Self { pos, vel, ..self }
    }
}

pub struct BounceLesson {
    canvas: Canvas,
    square: Bouncer,
}

impl BounceLesson {
    pub fn new(program: CompiledProgram) -> Result<Self> {
        Ok(Self {
            canvas: Canvas::new(program, &[("a_position", 2)], RenderOptions::default())?,
            square: Bouncer::new(Vec2::new(20.0, 20.0), Vec2::new(240.0, 170.0), 50.0),
        })
    }

    fn draw(&mut self, ctx: &RenderCtx<'_>, target: &mut RenderTarget<'_>) -> Result<()> {
        let vp = ctx.viewport;
        let s = self.square;
        self.canvas.upload(ctx, "a_position", &rectangle(s.pos.x, s.pos.y, s.size, s.size))?;
        self.canvas.draw(
            ctx,
            target,
            &[
                ("u_matrix", pixel_projection(vp.width, vp.height).into()),
                ("u_color", Color::from_rgb8(255, 200, 40).into()),
            ],
            &[DrawCall::new(Topology::TriangleStrip, 4)],
        )
    }
}

impl App for BounceLesson {
    fn on_input(&mut self, event: &InputEvent, _state: &InputState) -> AppControl {
        exit_on_escape(event)
    }

    fn on_frame(&mut self, ctx: &mut FrameCtx<'_, '_>) -> AppControl {
        self.square = self.square.advance(ctx.time.dt, ctx.viewport());

        let mut result = Ok(());
        let control = ctx.render(|rctx, target| result = self.draw(rctx, target));
        finish(control, result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const BOUNDS: Viewport = Viewport::new(100.0, 100.0);

    #[test]
    fn moves_freely_inside() {
        let b = Bouncer::new(Vec2::new(10.0, 10.0), Vec2::new(20.0, 10.0), 10.0).advance(0.5, BOUNDS);
        assert_eq!(b.pos, Vec2::new(20.0, 15.0));
        assert_eq!(b.vel, Vec2::new(20.0, 10.0));
    }

    #[test]
    fn reflects_off_far_edge() {
        let b = Bouncer::new(Vec2::new(85.0, 10.0), Vec2::new(10.0, 0.0), 10.0).advance(1.0, BOUNDS);
        assert_eq!(b.pos.x, 85.0);
        assert_eq!(b.vel.x, -10.0);
    }

    #[test]
    fn reflects_off_origin_edge() {
        let b = Bouncer::new(Vec2::new(10.0, 2.0), Vec2::new(0.0, -5.0), 10.0).advance(1.0, BOUNDS);
        assert_eq!(b.pos.y, 3.0);
        assert_eq!(b.vel.y, 5.0);
    }

    #[test]
    fn never_leaves_bounds() {
        let mut b = Bouncer::new(Vec2::new(0.0, 0.0), Vec2::new(370.0, 233.0), 20.0);
        for _ in 0..500 {
            b = b.advance(0.016, BOUNDS);
            assert!(b.pos.cmpge(Vec2::ZERO).all() && b.pos.cmple(Vec2::splat(80.0)).all());
        }
    }

    #[test]
    fn shrinking_window_clamps() {
        let b = Bouncer::new(Vec2::new(90.0, 90.0), Vec2::ZERO, 10.0).advance(0.0, Viewport::new(50.0, 50.0));
        assert_eq!(b.pos, Vec2::new(40.0, 40.0));
    }
}
