use anyhow::Result;
use glam::Vec2;

use easel_engine::coords::{Color, Viewport};
use easel_engine::core::{App, AppControl, FrameCtx};
use easel_engine::geometry::{rectangle_triangles, VertexBuffer};
use easel_engine::input::{InputEvent, InputState, Key};
use easel_engine::render::{DrawCall, RenderCtx, RenderOptions, RenderTarget, Topology};
use easel_engine::shader::CompiledProgram;
use easel_engine::transform::{to_radians, Transform2D};

use super::canvas::Canvas;
use super::{exit_on_escape, finish};

const MOVE_SPEED: f32 = 200.0; // px/s
const TURN_SPEED: f32 = 90.0; // deg/s
const GROW_RATE: f32 = 1.0; // scale/s
const MIN_SCALE: f32 = 0.1;
const MAX_SCALE: f32 = 10.0;

/// A flat letter F, 100x150 px, origin at its top-left corner.
pub fn letter_f() -> VertexBuffer {
    let mut vb = rectangle_triangles(0.0, 0.0, 30.0, 150.0);
    vb.append(&rectangle_triangles(30.0, 0.0, 70.0, 30.0));
    vb.append(&rectangle_triangles(30.0, 60.0, 40.0, 30.0));
    vb
}

/// Parameters driven by held keys: arrows move, Q/E turn, W/S scale.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct TransformParams {
    pub transform: Transform2D,
}

impl TransformParams {
    pub fn centred(viewport: Viewport) -> Self {
        Self {
            transform: Transform2D::default().with_translation(viewport.center() - Vec2::new(50.0, 75.0)),
        }
    }

    /// The parameters after `dt` seconds of the currently held keys.
    pub fn step(self, input: &InputState, dt: f32) -> Self {
        let axis = |neg: Key, pos: Key| input.key_down(pos) as i32 as f32 - input.key_down(neg) as i32 as f32;

        let t = self.transform;
        let movement = Vec2::new(axis(Key::ArrowLeft, Key::ArrowRight), axis(Key::ArrowUp, Key::ArrowDown));
        let turn = axis(Key::Q, Key::E);
        let grow = axis(Key::S, Key::W);

        Self {
            transform: Transform2D::new(
                t.translation + movement * MOVE_SPEED * dt,
                t.rotation + to_radians(turn * TURN_SPEED * dt),
                (t.scale * (1.0 + grow * GROW_RATE * dt)).clamp(Vec2::splat(MIN_SCALE), Vec2::splat(MAX_SCALE)),
            ),
        }
    }
}

pub struct TransformLesson {
    canvas: Canvas,
    params: Option<TransformParams>,
    uploaded: bool,
}

impl TransformLesson {
    pub fn new(program: CompiledProgram) -> Result<Self> {
        Ok(Self {
            canvas: Canvas::new(program, &[("a_position", 2)], RenderOptions::default())?,
            params: None,
            uploaded: false,
        })
    }

    fn draw(&mut self, ctx: &RenderCtx<'_>, target: &mut RenderTarget<'_>, params: TransformParams) -> Result<()> {
        let shape = letter_f();
        if !self.uploaded {
            self.canvas.upload(ctx, "a_position", &shape)?;
            self.uploaded = true;
        }
        self.canvas.draw(
            ctx,
            target,
            &[
                ("u_matrix", params.transform.compose_in(ctx.viewport).into()),
                ("u_color", Color::new(0.2, 1.0, 0.2, 1.0).into()),
            ],
            &[DrawCall::new(Topology::Triangles, shape.vertex_count())],
        )
    }
}

impl App for TransformLesson {
    fn on_input(&mut self, event: &InputEvent, _state: &InputState) -> AppControl {
        if event.is_key_press(Key::R) {
            self.params = None;
        }
        exit_on_escape(event)
    }

    fn on_frame(&mut self, ctx: &mut FrameCtx<'_, '_>) -> AppControl {
        let params = self
            .params
            .unwrap_or_else(|| TransformParams::centred(ctx.viewport()))
            .step(ctx.input, ctx.time.dt);
        self.params = Some(params);

        let mut result = Ok(());
        let control = ctx.render(|rctx, target| result = self.draw(rctx, target, params));
        finish(control, result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use easel_engine::input::{ButtonState, InputFrame};

    fn holding(keys: &[Key]) -> InputState {
        let mut state = InputState::default();
        let mut frame = InputFrame::default();
        for &key in keys {
            state.apply_event(
                &mut frame,
                InputEvent::Key {
                    key,
                    state: ButtonState::Pressed,
                    repeat: false,
                },
            );
        }
        state
    }

    #[test]
    fn letter_f_is_three_bars() {
        assert_eq!(letter_f().vertex_count(), 18);
    }

    #[test]
    fn idle_keys_change_nothing() {
        let p = TransformParams::centred(Viewport::new(800.0, 600.0));
        assert_eq!(p.step(&InputState::default(), 0.5), p);
    }

    #[test]
    fn arrows_move_at_fixed_speed() {
        let p = TransformParams::centred(Viewport::new(800.0, 600.0));
        let q = p.step(&holding(&[Key::ArrowRight, Key::ArrowUp]), 0.5);
        let delta = q.transform.translation - p.transform.translation;
        assert!((delta - Vec2::new(100.0, -100.0)).length() < 1e-4);
    }

    #[test]
    fn turning_and_scaling() {
        let p = TransformParams::centred(Viewport::new(800.0, 600.0));
        let q = p.step(&holding(&[Key::E, Key::W]), 1.0);
        assert!((q.transform.rotation - to_radians(90.0)).abs() < 1e-5);
        assert!((q.transform.scale - Vec2::splat(2.0)).length() < 1e-5);
    }

    #[test]
    fn scale_is_bounded() {
        let mut p = TransformParams::centred(Viewport::new(800.0, 600.0));
        let shrink = holding(&[Key::S]);
        for _ in 0..100 {
            p = p.step(&shrink, 1.0);
        }
        assert_eq!(p.transform.scale, Vec2::splat(MIN_SCALE));
    }
}
