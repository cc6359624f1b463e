//! Frame timing.
//!
//! The renderer holds no timing state; animated lessons read `FrameTime` from
//! the per-frame context and recompute their geometry/transforms from it.

mod frame_clock;

pub use frame_clock::{FrameClock, FrameTime};
