//! Affine transforms for 2D (`Mat3`) and 3D (`Mat4`) scenes.
//!
//! Every `compose` call rebuilds the matrix from its parameters; nothing is
//! accumulated between frames.

mod affine2d;
mod affine3d;
mod angle;
mod projection;

pub use affine2d::Transform2D;
pub use affine3d::Transform3D;
pub use angle::{pointing_angle, to_degrees, to_radians};
pub use projection::{orthographic_pixels, perspective, pixel_projection};
