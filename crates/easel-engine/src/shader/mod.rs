//! Shader program bootstrap.
//!
//! `compile` turns a vertex/fragment source pair into a `CompiledProgram`:
//! each stage is parsed and validated by naga on its own, then the two stages
//! are linked (entry points, varyings, shared bindings) and the active
//! attribute/uniform names are cached. The result is either fully valid or an
//! error carrying the diagnostic text; nothing half-built escapes.
//!
//! `GpuProgram` is the uploaded form used by the renderer.

mod cache;
mod error;
mod gpu;
mod link;
mod program;
mod reflect;
mod source;
mod stage;

pub use cache::ShaderSourceCache;
pub use error::ShaderError;
pub use gpu::GpuProgram;
pub use program::{compile, CompiledProgram};
pub use reflect::{Location, UniformKind, UniformSlot};
pub use source::{ShaderLanguage, ShaderSource, ShaderStage};
