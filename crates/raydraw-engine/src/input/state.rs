use std::collections::HashSet;

use super::frame::InputFrame;
use super::types::{InputEvent, Key, KeyState, PointerMoveEvent};

/// Current input state for the window: held keys and the virtual pointer.
///
/// Events are also appended to an `InputFrame` for per-frame consumers.
#[derive(Debug, Default)]
pub struct InputState {
    /// Accumulated raw motion. Unbounded; only deltas between samples matter.
    pub virtual_pointer: (f64, f64),

    /// Set of currently held keys.
    pub keys_down: HashSet<Key>,
}

impl InputState {
    /// Applies a platform-agnostic input event to the current state and records it in `frame`.
    pub fn apply_event(&mut self, frame: &mut InputFrame, ev: InputEvent) {
        match &ev {
            // Avoids stuck keys when focus is lost mid-press.
            InputEvent::Focused(false) => self.keys_down.clear(),
            InputEvent::Focused(true) => {}

            InputEvent::PointerMotion(PointerMoveEvent { x, y }) => {
                self.virtual_pointer = (*x, *y);
            }

            InputEvent::Key { key, state } => match state {
                KeyState::Pressed => {
                    self.keys_down.insert(*key);
                }
                KeyState::Released => {
                    self.keys_down.remove(key);
                }
            },
        }

        frame.push_event(ev);
    }

    /// Builds the `PointerMotion` event for a raw device delta.
    pub fn motion_event(&self, dx: f64, dy: f64) -> InputEvent {
        let (x, y) = self.virtual_pointer;
        InputEvent::PointerMotion(PointerMoveEvent { x: x + dx, y: y + dy })
    }

    pub fn key_down(&self, key: Key) -> bool {
        self.keys_down.contains(&key)
    }
}
