/// Keyboard key identifier.
///
/// Covers the camera bindings. The runtime maps platform keycodes onto
/// these; anything else becomes `Key::Unknown(code)`.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum Key {
    Escape,
    Space,
    Shift,

    W,
    A,
    S,
    D,

    /// Platform-dependent key not represented here.
    Unknown(u32),
}

#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum KeyState {
    Pressed,
    Released,
}

/// Virtual cursor position in physical pixels.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct PointerMoveEvent {
    pub x: f64,
    pub y: f64,
}

/// Platform-agnostic input events emitted by the runtime.
#[derive(Debug, Clone, PartialEq)]
pub enum InputEvent {
    /// Repeats arrive as further `Pressed` events.
    Key { key: Key, state: KeyState },

    /// Raw device motion, expressed as an unbounded virtual cursor position
    /// (accumulated deltas). Keeps arriving while the cursor is grabbed.
    PointerMotion(PointerMoveEvent),

    /// Window focus change.
    Focused(bool),
}
