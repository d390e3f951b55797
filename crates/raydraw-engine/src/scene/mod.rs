//! Scene state shared by the input controller, resize handler and renderers.

mod light;
mod state;

pub use light::orbiting_light;
pub use state::SceneState;
