//! Fly camera: orientation state and the input controller that drives it.
//!
//! `CameraState` is plain data owned by the scene. `CameraController` is the
//! only writer of orientation and capture mode; it converts cursor samples,
//! held keys and the capture toggle into state updates.

mod controller;
mod state;

pub use controller::{CameraController, CameraControllerConfig, MovementScale};
pub use state::{basis_from_angles, CameraState, CaptureMode, DEFAULT_YAW, PITCH_LIMIT, WORLD_UP};
