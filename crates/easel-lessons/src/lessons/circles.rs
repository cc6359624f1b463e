use anyhow::Result;
use rand::Rng;

use easel_engine::coords::Viewport;
use easel_engine::core::{App, AppControl, FrameCtx};
use easel_engine::geometry::{circle_fan, VertexBuffer};
use easel_engine::input::{InputEvent, InputState, Key};
use easel_engine::render::{DrawCall, RenderCtx, RenderOptions, RenderTarget, Topology};
use easel_engine::shader::CompiledProgram;
use easel_engine::transform::pixel_projection;

use super::canvas::Canvas;
use super::{exit_on_escape, finish};

pub const CIRCLE_COUNT: usize = 10;

/// Several fans packed into one position buffer and one colour buffer.
#[derive(Debug, Clone, PartialEq)]
pub struct CircleSet {
    pub positions: VertexBuffer,
    pub colors: VertexBuffer,
    pub draws: Vec<DrawCall>,
}

/// `count` circles of random size, detail and colour, fully inside `bounds`.
pub fn random_circles(rng: &mut impl Rng, bounds: Viewport, count: usize) -> CircleSet {
    let mut set = CircleSet {
        positions: VertexBuffer::with_capacity(2, count * 34),
        colors: VertexBuffer::with_capacity(4, count * 34),
        draws: Vec::with_capacity(count),
    };

    for _ in 0..count {
        let max_r = (bounds.width.min(bounds.height) / 4.0).max(11.0);
        let r = rng.gen_range(10.0..max_r);
        let cx = rng.gen_range(r..(bounds.width - r).max(r + 1.0));
        let cy = rng.gen_range(r..(bounds.height - r).max(r + 1.0));
        let steps = rng.gen_range(3..=32);

        let fan = circle_fan(cx, cy, r, steps);
        let color: [f32; 4] = [rng.gen_range(0.2..1.0), rng.gen_range(0.2..1.0), rng.gen_range(0.2..1.0), 1.0];

        let first = set.positions.append(&fan);
        set.colors.append(&VertexBuffer::repeated(&color, fan.vertex_count()));
        set.draws
            .push(DrawCall::new(Topology::TriangleFan, fan.vertex_count()).starting_at(first));
    }

    set
}

pub struct CirclesLesson {
    canvas: Canvas,
    circles: Option<CircleSet>,
    dirty: bool,
}

impl CirclesLesson {
    pub fn new(program: CompiledProgram) -> Result<Self> {
        Ok(Self {
            canvas: Canvas::new(program, &[("a_position", 2), ("a_color", 4)], RenderOptions::default())?,
            circles: None,
            dirty: true,
        })
    }

    fn draw(&mut self, ctx: &RenderCtx<'_>, target: &mut RenderTarget<'_>) -> Result<()> {
        let vp = ctx.viewport;
        if self.dirty || self.circles.is_none() {
            let set = random_circles(&mut rand::thread_rng(), vp, CIRCLE_COUNT);
            self.canvas.upload(ctx, "a_position", &set.positions)?;
            self.canvas.upload(ctx, "a_color", &set.colors)?;
            log::debug!("generated {} circles ({} vertices)", set.draws.len(), set.positions.vertex_count());
            self.circles = Some(set);
            self.dirty = false;
        }

        let draws = self.circles.as_ref().map(|c| c.draws.clone()).unwrap_or_default();
        self.canvas.draw(
            ctx,
            target,
            &[("u_matrix", pixel_projection(vp.width, vp.height).into())],
            &draws,
        )
    }
}

impl App for CirclesLesson {
    fn on_input(&mut self, event: &InputEvent, _state: &InputState) -> AppControl {
        if event.is_key_press(Key::Space) {
            self.dirty = true;
        }
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
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn draws_tile_the_shared_buffer() {
        let set = random_circles(&mut StdRng::seed_from_u64(7), Viewport::new(640.0, 480.0), CIRCLE_COUNT);
        assert_eq!(set.draws.len(), CIRCLE_COUNT);
        assert_eq!(set.positions.vertex_count(), set.colors.vertex_count());

        let mut next = 0;
        for draw in &set.draws {
            assert_eq!(draw.topology, Topology::TriangleFan);
            assert_eq!(draw.first, next);
            assert!(draw.count >= 10);
            next += draw.count;
        }
        assert_eq!(next, set.positions.vertex_count());
    }

    #[test]
    fn circles_stay_inside() {
        let bounds = Viewport::new(300.0, 200.0);
        let set = random_circles(&mut StdRng::seed_from_u64(1), bounds, 50);
        for i in 0..set.positions.vertex_count() as usize {
            let v = set.positions.vertex(i).unwrap();
            assert!((-1e-3..=300.001).contains(&v[0]) && (-1e-3..=200.001).contains(&v[1]));
        }
    }

    #[test]
    fn each_circle_has_one_colour() {
        let set = random_circles(&mut StdRng::seed_from_u64(3), Viewport::new(640.0, 480.0), 4);
        for draw in &set.draws {
            let first = set.colors.vertex(draw.first as usize).unwrap();
            for i in draw.first..draw.first + draw.count {
                assert_eq!(set.colors.vertex(i as usize).unwrap(), first);
            }
        }
    }
}
