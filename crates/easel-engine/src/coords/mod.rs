//! Colour and viewport types shared by the renderer and the lessons.
//!
//! Canonical CPU space for 2D lessons:
//! - physical pixels
//! - origin top-left
//! - +X right, +Y down
//!
//! `transform::pixel_projection` converts this space to clip space.

mod color;
mod viewport;

pub use color::Color;
pub use viewport::Viewport;
