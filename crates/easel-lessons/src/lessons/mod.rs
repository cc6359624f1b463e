//! The exercise set.
//!
//! Every lesson compiles its program and checks its vertex layout when it is
//! built, before any window exists; GPU resources are created on the first
//! frame.

mod assets;
mod bounce;
mod canvas;
mod circles;
mod image_quad;
mod keyboard;
mod orthographic;
mod perspective;
mod pointer;
mod square;
mod textured_circle;
mod transform;

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::ValueEnum;

use easel_engine::core::{App, AppControl};
use easel_engine::input::{InputEvent, Key};
use easel_engine::shader::{CompiledProgram, ShaderLanguage, ShaderSourceCache};

#[derive(Debug, Copy, Clone, Eq, PartialEq, ValueEnum)]
pub enum LessonKind {
    /// White square in the middle of the window.
    Square,
    /// Letter F moved, turned and scaled with the keyboard.
    Transform,
    /// Square nudged with the arrow keys.
    Keyboard,
    /// Square bouncing off the window edges.
    Bounce,
    /// Arrow turning towards the last click.
    Pointer,
    /// Ten random circles from one vertex buffer (space regenerates).
    Circles,
    /// Tinted circle with a texture.
    TexturedCircle,
    /// Image drawn as a textured strip.
    Image,
    /// Rotating 3D letter F with depth testing.
    Orthographic,
    /// White square seen through a perspective camera.
    Perspective,
    /// The square lesson compiled from GLSL.
    Glsl,
}

impl LessonKind {
    pub fn title(self) -> &'static str {
        match self {
            Self::Square => "square",
            Self::Transform => "2D transform",
            Self::Keyboard => "keyboard",
            Self::Bounce => "bounce",
            Self::Pointer => "pointer",
            Self::Circles => "circles",
            Self::TexturedCircle => "textured circle",
            Self::Image => "image",
            Self::Orthographic => "orthographic 3D",
            Self::Perspective => "perspective square",
            Self::Glsl => "GLSL square",
        }
    }

    pub fn needs_depth(self) -> bool {
        matches!(self, Self::Orthographic)
    }
}

/// Inputs shared by all lessons.
#[derive(Debug, Clone)]
pub struct LessonEnv {
    pub shader_dir: PathBuf,
    pub texture: Option<PathBuf>,
}

pub fn build(kind: LessonKind, env: &LessonEnv, cache: &mut ShaderSourceCache) -> Result<Box<dyn App>> {
    let dir = env.shader_dir.as_path();
    let wgsl = ShaderLanguage::Wgsl;

    let lesson: Box<dyn App> = match kind {
        LessonKind::Square => Box::new(square::SquareLesson::new(
            load_program(cache, dir, "flat", wgsl)?,
            square::FlatUniforms::WGSL,
        )?),
        LessonKind::Glsl => Box::new(square::SquareLesson::new(
            load_program(cache, dir, "flat", ShaderLanguage::Glsl)?,
            square::FlatUniforms::GLSL,
        )?),
        LessonKind::Transform => Box::new(transform::TransformLesson::new(load_program(cache, dir, "flat", wgsl)?)?),
        LessonKind::Keyboard => Box::new(keyboard::KeyboardLesson::new(load_program(cache, dir, "flat", wgsl)?)?),
        LessonKind::Bounce => Box::new(bounce::BounceLesson::new(load_program(cache, dir, "flat", wgsl)?)?),
        LessonKind::Pointer => Box::new(pointer::PointerLesson::new(load_program(cache, dir, "flat", wgsl)?)?),
        LessonKind::Circles => Box::new(circles::CirclesLesson::new(load_program(cache, dir, "vertex_color", wgsl)?)?),
        LessonKind::TexturedCircle => Box::new(textured_circle::TexturedCircleLesson::new(
            load_program(cache, dir, "textured", wgsl)?,
            assets::load_image(env.texture.as_deref())?,
        )?),
        LessonKind::Image => Box::new(image_quad::ImageLesson::new(
            load_program(cache, dir, "textured", wgsl)?,
            assets::load_image(env.texture.as_deref())?,
        )?),
        LessonKind::Orthographic => Box::new(orthographic::OrthographicLesson::new(load_program(
            cache, dir, "solid3d", wgsl,
        )?)?),
        LessonKind::Perspective => Box::new(perspective::PerspectiveLesson::new(load_program(
            cache, dir, "solid3d", wgsl,
        )?)?),
    };

    log::info!("lesson `{}` ready", kind.title());
    Ok(lesson)
}

/// Loads `<name>.vert.wgsl`/`<name>.frag.wgsl` (or `<name>.vert`/`<name>.frag`
/// for GLSL) from `dir` and compiles them.
pub fn load_program(
    cache: &mut ShaderSourceCache,
    dir: &Path,
    name: &str,
    language: ShaderLanguage,
) -> Result<CompiledProgram> {
    let (vs, fs) = match language {
        ShaderLanguage::Wgsl => (format!("{name}.vert.wgsl"), format!("{name}.frag.wgsl")),
        ShaderLanguage::Glsl => (format!("{name}.vert"), format!("{name}.frag")),
    };
    let source = cache.load(&format!("{name}:{language:?}"), dir.join(vs), dir.join(fs))?;
    CompiledProgram::from_source(&source).with_context(|| format!("shader program `{name}`"))
}

/// Escape quits every lesson.
pub(crate) fn exit_on_escape(event: &InputEvent) -> AppControl {
    if event.is_key_press(Key::Escape) {
        AppControl::Exit
    } else {
        AppControl::Continue
    }
}

/// Folds a frame's draw result into the runtime directive.
pub(crate) fn finish(control: AppControl, result: Result<()>) -> AppControl {
    match result {
        Ok(()) => control,
        Err(err) => {
            log::error!("{err:#}");
            AppControl::Exit
        }
    }
}

#[cfg(test)]
pub(crate) fn shader_dir() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("shaders")
}
