use anyhow::Result;
use glam::{Mat4, Vec3};

use easel_engine::coords::{Color, Viewport};
use easel_engine::core::{App, AppControl, FrameCtx};
use easel_engine::geometry::VertexBuffer;
use easel_engine::input::{InputEvent, InputState};
use easel_engine::render::{DrawCall, RenderCtx, RenderOptions, RenderTarget, Topology};
use easel_engine::shader::CompiledProgram;
use easel_engine::transform::{perspective, to_radians, Transform3D};

use super::canvas::Canvas;
use super::{exit_on_escape, finish};

const FIELD_OF_VIEW: f32 = 45.0; // degrees
const NEAR: f32 = 0.1;
const FAR: f32 = 100.0;
const DISTANCE: f32 = 6.0;

/// A 2x2 square on the z = 0 plane, strip order.
pub fn unit_square() -> VertexBuffer {
    VertexBuffer::new(
        3,
        vec![
            1.0, 1.0, 0.0, //
            -1.0, 1.0, 0.0, //
            1.0, -1.0, 0.0, //
            -1.0, -1.0, 0.0,
        ],
    )
}

/// Projection times model-view: the square pushed `DISTANCE` units away
/// from a camera at the origin.
pub fn camera_matrix(vp: Viewport) -> Mat4 {
    let projection = perspective(to_radians(FIELD_OF_VIEW), vp.aspect(), NEAR, FAR);
    let model_view = Transform3D::default().with_translation(Vec3::new(0.0, 0.0, -DISTANCE));
    projection * model_view.compose()
}

pub struct PerspectiveLesson {
    canvas: Canvas,
    uploaded: bool,
}

impl PerspectiveLesson {
    pub fn new(program: CompiledProgram) -> Result<Self> {
        Ok(Self {
            canvas: Canvas::new(program, &[("a_position", 3), ("a_color", 4)], RenderOptions::default())?,
            uploaded: false,
        })
    }

    fn draw(&mut self, ctx: &RenderCtx<'_>, target: &mut RenderTarget<'_>) -> Result<()> {
        if !self.uploaded {
            let square = unit_square();
            let white = VertexBuffer::repeated(&Color::WHITE.to_array(), square.vertex_count());
            self.canvas.upload(ctx, "a_position", &square)?;
            self.canvas.upload(ctx, "a_color", &white)?;
            self.uploaded = true;
        }

        self.canvas.draw(
            ctx,
            target,
            &[("u_matrix", camera_matrix(ctx.viewport).into())],
            &[DrawCall::new(Topology::TriangleStrip, 4)],
        )
    }
}

impl App for PerspectiveLesson {
    fn on_input(&mut self, event: &InputEvent, _state: &InputState) -> AppControl {
        exit_on_escape(event)
    }

    fn on_frame(&mut self, ctx: &mut FrameCtx<'_, '_>) -> AppControl {
        let mut result = Ok(());
        let control = ctx.render(|rctx, target| result = self.draw(rctx, target));
        finish(control, result)
    }
}
