//! Core engine-facing contracts.
//!
//! The runtime drives an `App` through three phases: setup (once the window
//! and GPU exist), resize (whenever the surface extent changes) and frame.
//! Each phase gets a context that exposes only what it may touch.

mod app;
mod ctx;

pub use app::{App, AppControl};
pub use ctx::{FrameCtx, SetupCtx, WindowCtx};
