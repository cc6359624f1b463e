use anyhow::Result;
use glam::{Mat4, Vec3};

use easel_engine::coords::{Color, Viewport};
use easel_engine::core::{App, AppControl, FrameCtx};
use easel_engine::geometry::{cuboid, cuboid_face_colors, VertexBuffer};
use easel_engine::input::{InputEvent, InputState, Key};
use easel_engine::render::{DrawCall, RenderCtx, RenderOptions, RenderTarget, Topology};
use easel_engine::shader::CompiledProgram;
use easel_engine::transform::{orthographic_pixels, Transform3D};

use super::canvas::Canvas;
use super::{exit_on_escape, finish};

const SPIN: Vec3 = Vec3::new(0.4, 0.7, 0.0); // rad/s

const FACE_COLORS: [[f32; 4]; 6] = [
    [0.78, 0.27, 0.47, 1.0],
    [0.31, 0.27, 0.78, 1.0],
    [0.27, 0.78, 0.47, 1.0],
    [0.78, 0.70, 0.27, 1.0],
    [0.27, 0.70, 0.78, 1.0],
    [0.63, 0.63, 0.63, 1.0],
];

/// A 3D letter F (100x150x30) centred on the origin: positions and colours.
pub fn letter_f_3d() -> (VertexBuffer, VertexBuffer) {
    let offset = Vec3::new(50.0, 75.0, 15.0);
    let bars = [
        (Vec3::new(0.0, 0.0, 0.0), Vec3::new(30.0, 150.0, 30.0)),
        (Vec3::new(30.0, 0.0, 0.0), Vec3::new(100.0, 30.0, 30.0)),
        (Vec3::new(30.0, 60.0, 0.0), Vec3::new(67.0, 90.0, 30.0)),
    ];

    let mut positions = VertexBuffer::with_capacity(3, 36 * bars.len());
    let mut colors = VertexBuffer::with_capacity(4, 36 * bars.len());
    for (min, max) in bars {
        positions.append(&cuboid(min - offset, max - offset));
        colors.append(&cuboid_face_colors(FACE_COLORS));
    }
    (positions, colors)
}

/// Model-to-clip matrix for the letter centred in `vp`.
///
/// The letter scales with the shorter side; the depth range follows the
/// longer one, so the rotated letter never reaches the near or far plane.
pub fn scene_matrix(vp: Viewport, rotation: Vec3) -> Mat4 {
    let c = vp.center();
    let model = Transform3D::default()
        .with_translation(Vec3::new(c.x, c.y, 0.0))
        .with_rotation(rotation)
        .with_scale(Vec3::splat(vp.width.min(vp.height) / 300.0));
    orthographic_pixels(vp.width, vp.height, vp.width.max(vp.height)) * model.compose()
}

pub struct OrthographicLesson {
    canvas: Canvas,
    rotation: Vec3,
    paused: bool,
    vertex_count: Option<u32>,
}

impl OrthographicLesson {
    pub fn new(program: CompiledProgram) -> Result<Self> {
        Ok(Self {
            canvas: Canvas::new(
                program,
                &[("a_position", 3), ("a_color", 4)],
                RenderOptions {
                    clear_color: Color::from_rgb8(15, 15, 25),
                    depth_test: true,
                    cull_back_faces: false,
                },
            )?,
            rotation: Vec3::new(0.5, 0.6, 0.0),
            paused: false,
            vertex_count: None,
        })
    }

    fn draw(&mut self, ctx: &RenderCtx<'_>, target: &mut RenderTarget<'_>) -> Result<()> {
        let count = match self.vertex_count {
            Some(n) => n,
            None => {
                let (positions, colors) = letter_f_3d();
                self.canvas.upload(ctx, "a_position", &positions)?;
                self.canvas.upload(ctx, "a_color", &colors)?;
                *self.vertex_count.insert(positions.vertex_count())
            }
        };

        let matrix = scene_matrix(ctx.viewport, self.rotation);

        self.canvas.draw(
            ctx,
            target,
            &[("u_matrix", matrix.into())],
            &[DrawCall::new(Topology::Triangles, count)],
        )
    }
}

impl App for OrthographicLesson {
    fn on_input(&mut self, event: &InputEvent, _state: &InputState) -> AppControl {
        if event.is_key_press(Key::Space) {
            self.paused = !self.paused;
        }
        exit_on_escape(event)
    }

    fn on_frame(&mut self, ctx: &mut FrameCtx<'_, '_>) -> AppControl {
        if !self.paused {
            self.rotation += SPIN * ctx.time.dt;
        }

        let mut result = Ok(());
        let control = ctx.render(|rctx, target| result = self.draw(rctx, target));
        finish(control, result)
    }
}
