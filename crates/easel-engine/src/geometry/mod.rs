//! Vertex data for simple shapes.
//!
//! Pure functions; every call returns a fresh buffer. Positions are in the
//! caller's units (usually physical pixels, +Y down).

mod circle;
mod cuboid;
mod rect;
mod vertex_buffer;

pub use circle::{circle_fan, circle_tex_coords, circle_vertex_count, MIN_CIRCLE_STEPS};
pub use cuboid::{cuboid, cuboid_face_colors};
pub use rect::{rectangle, rectangle_tex_coords, rectangle_triangles};
pub use vertex_buffer::VertexBuffer;
