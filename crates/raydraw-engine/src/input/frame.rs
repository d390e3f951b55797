use super::types::InputEvent;

/// Events received since the last frame, in arrival order.
///
/// `InputState` holds what is currently down; `InputFrame` is cleared by the
/// runtime after every `on_frame`.
#[derive(Debug, Default)]
pub struct InputFrame {
    pub events: Vec<InputEvent>,
}

impl InputFrame {
    pub fn clear(&mut self) {
        self.events.clear();
    }

    pub fn push_event(&mut self, ev: InputEvent) {
        self.events.push(ev);
    }

    /// Virtual cursor positions reported this frame, in arrival order.
    pub fn pointer_motion(&self) -> impl Iterator<Item = (f64, f64)> + '_ {
        self.events.iter().filter_map(|ev| match ev {
            InputEvent::PointerMotion(p) => Some((p.x, p.y)),
            _ => None,
        })
    }
}
