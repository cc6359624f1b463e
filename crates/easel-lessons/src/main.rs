//! Tutorial exercises on the easel engine.
//!
//! ## Usage
//!
//! ```bash
//! # Centred white square
//! easel-lessons square
//!
//! # Textured circle with your own image, verbose shader logging
//! easel-lessons textured-circle --texture photo.png --log easel_engine::shader=debug
//! ```

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Result;
use clap::Parser;
use winit::dpi::LogicalSize;

use easel_engine::device::GpuInit;
use easel_engine::logging::{init_logging, LoggingConfig};
use easel_engine::shader::ShaderSourceCache;
use easel_engine::window::{Runtime, RuntimeConfig};

mod lessons;

use lessons::{LessonEnv, LessonKind};

#[derive(Parser)]
#[command(name = "easel-lessons")]
#[command(about = "Small graphics exercises: shaders, shapes, transforms, textures")]
struct Cli {
    /// Lesson to run
    #[arg(value_enum)]
    lesson: LessonKind,

    /// Directory holding the shader sources
    #[arg(long, default_value = concat!(env!("CARGO_MANIFEST_DIR"), "/shaders"))]
    shader_dir: PathBuf,

    /// Log filter (env_logger syntax); overrides RUST_LOG
    #[arg(long)]
    log: Option<String>,

    /// Image for the texture lessons (a checkerboard when omitted)
    #[arg(long)]
    texture: Option<PathBuf>,

    /// Window width in logical pixels
    #[arg(long, default_value = "800")]
    width: f64,

    /// Window height in logical pixels
    #[arg(long, default_value = "600")]
    height: f64,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    init_logging(LoggingConfig {
        env_filter: cli.log.clone(),
        ..LoggingConfig::default()
    });

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            log::error!("{err:#}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<()> {
    let env = LessonEnv {
        shader_dir: cli.shader_dir,
        texture: cli.texture,
    };

    // Shader compile and link errors surface here, before a window opens.
    let mut cache = ShaderSourceCache::new();
    let lesson = lessons::build(cli.lesson, &env, &mut cache)?;

    let config = RuntimeConfig {
        title: format!("easel: {}", cli.lesson.title()),
        initial_size: LogicalSize::new(cli.width, cli.height),
    };
    let gpu_init = GpuInit::default().with_depth_buffer(cli.lesson.needs_depth());

    Runtime::run(config, gpu_init, lesson)
}
