use winit::event::{DeviceEvent, ElementState, WindowEvent};
use winit::keyboard::{KeyCode, PhysicalKey};

use crate::input::{InputEvent, InputState, Key, KeyState};

/// Translates a winit `WindowEvent` into an engine `InputEvent`.
///
/// Returns `None` for events not represented by the input subsystem.
pub(crate) fn translate_window_event(event: &WindowEvent) -> Option<InputEvent> {
    match event {
        WindowEvent::Focused(f) => Some(InputEvent::Focused(*f)),

        WindowEvent::KeyboardInput { event, .. } => {
            let state = match event.state {
                ElementState::Pressed => KeyState::Pressed,
                ElementState::Released => KeyState::Released,
            };

            Some(InputEvent::Key {
                key: map_key(event.physical_key),
                state,
            })
        }

        _ => None,
    }
}

/// Translates raw device motion into a virtual cursor sample.
///
/// Raw motion keeps arriving while the cursor is locked at the window edge or
/// center, which is what camera look needs.
pub(crate) fn translate_device_event(
    state: &InputState,
    event: &DeviceEvent,
) -> Option<InputEvent> {
    match event {
        DeviceEvent::MouseMotion { delta: (dx, dy) } => Some(state.motion_event(*dx, *dy)),
        _ => None,
    }
}

fn map_key(pk: PhysicalKey) -> Key {
    match pk {
        PhysicalKey::Code(code) => match code {
            KeyCode::Escape => Key::Escape,
            KeyCode::Space => Key::Space,
            KeyCode::ShiftLeft | KeyCode::ShiftRight => Key::Shift,

            KeyCode::KeyW => Key::W,
            KeyCode::KeyA => Key::A,
            KeyCode::KeyS => Key::S,
            KeyCode::KeyD => Key::D,

            other => Key::Unknown(other as u32),
        },

        // NativeKeyCode carries no stable numeric in winit 0.30.
        PhysicalKey::Unidentified(_) => Key::Unknown(0),
    }
}
