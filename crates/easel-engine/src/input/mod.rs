//! Input subsystem.
//!
//! Lessons see platform-agnostic `InputEvent`s; the runtime translates winit
//! events through `translate_window_event`.

mod frame;
mod state;
mod translate;
mod types;

pub use frame::InputFrame;
pub use state::InputState;
pub use translate::translate_window_event;
pub use types::{ButtonState, InputEvent, Key, MouseButton};
