/// Keyboard key identifier.
///
/// Only the keys the lessons bind are named; everything else arrives as
/// `Unknown` with the platform code.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum Key {
    Escape,
    Enter,
    Space,

    ArrowUp,
    ArrowDown,
    ArrowLeft,
    ArrowRight,

    A, D, E, Q, R, S, W, X, Z,

    /// `=` / `+` key.
    Plus,
    /// `-` key.
    Minus,

    Unknown(u32),
}

/// Pressed/released state shared by keys and mouse buttons.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum ButtonState {
    Pressed,
    Released,
}

#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum MouseButton {
    Left,
    Right,
    Middle,
    Other(u16),
}

/// Platform-agnostic input event. Positions are physical pixels, top-left origin.
#[derive(Debug, Clone, PartialEq)]
pub enum InputEvent {
    Key {
        key: Key,
        state: ButtonState,
        repeat: bool,
    },
    PointerMoved {
        x: f32,
        y: f32,
    },
    PointerButton {
        button: MouseButton,
        state: ButtonState,
        x: f32,
        y: f32,
    },
    PointerLeft,
    Focused(bool),
}

impl InputEvent {
    /// True for a key press (including auto-repeat) of `key`.
    pub fn is_key_press(&self, key: Key) -> bool {
        matches!(self, InputEvent::Key { key: k, state: ButtonState::Pressed, .. } if *k == key)
    }
}
