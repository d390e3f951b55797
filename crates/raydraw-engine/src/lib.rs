//! Raydraw engine crate.
//!
//! Window/GPU runtime, input, camera controller, shader program builder and
//! the curve and raytrace renderers used by the demo binaries.

pub mod device;
pub mod window;
pub mod input;
pub mod time;
pub mod core;

pub mod logging;
pub mod coords;
pub mod render;
pub mod camera;
pub mod scene;
pub mod shader;
