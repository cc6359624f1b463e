use crate::input::{InputEvent, InputState};

use super::ctx::FrameCtx;

/// Control directive returned by app callbacks.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum AppControl {
    Continue,
    Exit,
}

/// Application contract implemented by lessons.
pub trait App {
    /// Called for each translated input event, before it is folded into `state`.
    fn on_input(&mut self, event: &InputEvent, state: &InputState) -> AppControl {
        let _ = (event, state);
        AppControl::Continue
    }

    /// Called once per rendered frame.
    fn on_frame(&mut self, ctx: &mut FrameCtx<'_, '_>) -> AppControl;
}

impl<T: App + ?Sized> App for Box<T> {
    fn on_input(&mut self, event: &InputEvent, state: &InputState) -> AppControl {
        (**self).on_input(event, state)
    }

    fn on_frame(&mut self, ctx: &mut FrameCtx<'_, '_>) -> AppControl {
        (**self).on_frame(ctx)
    }
}
