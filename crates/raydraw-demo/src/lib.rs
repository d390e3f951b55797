//! Demo programs built on `raydraw-engine`.
//!
//! Two executables share this library: `curve` draws a static cubic and
//! `raytrace` runs the compute-shader raytracer with a fly camera.

mod config;
mod curve_app;
mod raytrace_app;

pub use config::{DemoConfig, SHADER_DIR_ENV};
pub use curve_app::CurveApp;
pub use raytrace_app::RaytraceApp;
