//! Frame rendering.
//!
//! `FrameRenderer` runs the fixed per-frame sequence for one program:
//! clear, pipeline, uniforms, vertex buffers, draw. GPU resources
//! (pipelines, fan index buffer) are created lazily and cached.
//!
//! Convention:
//! - Pipelines derive their bind group layouts from the shader.
//! - Every attribute has its own tightly packed `f32` buffer.

mod ctx;
mod draw;
mod frame;
mod pipeline;
mod texture;
mod uniform;
mod vertex_array;

pub use ctx::{RenderCtx, RenderTarget};
pub use draw::{fan_indices, DrawCall, Topology};
pub use frame::{FrameRenderer, RenderOptions};
pub use texture::{ImageData, Texture2D};
pub use uniform::UniformValue;
pub use vertex_array::VertexArray;
