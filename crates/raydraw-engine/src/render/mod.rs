//! GPU rendering subsystem.
//!
//! Renderers own their GPU resources (pipelines, buffers, images) and record
//! into the frame encoder handed out by `FrameCtx::render`. Pipelines are
//! built from `ShaderProgram`s so shader loading stays with the caller.

mod ctx;
pub mod curve;
pub mod raytrace;

pub use ctx::{RenderCtx, RenderTarget};
pub use curve::{curve_vertices, CurveRenderer, CurveVertex};
pub use raytrace::{OutputImage, RaytraceRenderer, RaytraceUniform};
