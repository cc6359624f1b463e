//! Easel engine crate.
//!
//! Shader program bootstrap, shape tessellation, affine transforms and a
//! single-draw frame renderer on top of wgpu, plus the window/device runtime
//! the lessons run in.

pub mod device;
pub mod window;
pub mod input;
pub mod time;
pub mod core;

pub mod logging;
pub mod coords;
pub mod shader;
pub mod geometry;
pub mod transform;
pub mod render;
