use glam::Vec3;

use crate::camera::CameraState;
use crate::coords::Viewport;
use crate::time::FrameTime;

use super::light::orbiting_light;

/// Per-run scene state.
///
/// Constructed once by the application and passed by reference to the input
/// controller, the resize handler and the renderers.
#[derive(Debug, Clone)]
pub struct SceneState {
    pub camera: CameraState,

    /// Drawable area in physical pixels. Written by the resize handler only.
    viewport: Viewport,

    pub light_position: Vec3,

    /// Seconds since start.
    pub time: f32,
}

impl SceneState {
    pub fn new(camera: CameraState, viewport: Viewport) -> Self {
        Self {
            camera,
            viewport,
            light_position: orbiting_light(0.0),
            time: 0.0,
        }
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    /// Records new drawable dimensions. Returns true when they changed.
    pub fn resize(&mut self, viewport: Viewport) -> bool {
        let changed = self.viewport != viewport;
        self.viewport = viewport;
        changed
    }

    /// Advances time-driven parameters.
    pub fn advance(&mut self, time: FrameTime) {
        self.time = time.elapsed;
        self.light_position = orbiting_light(self.time);
    }
}
