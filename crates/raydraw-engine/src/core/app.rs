use anyhow::Result;
use winit::event::WindowEvent;

use crate::coords::Viewport;

use super::ctx::{FrameCtx, SetupCtx};

/// Control directive returned by app callbacks.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum AppControl {
    Continue,
    Exit,
}

/// Application contract implemented by the demo programs.
pub trait App {
    /// Called once after the window and GPU are ready, before the first frame.
    ///
    /// Build pipelines and other GPU resources here. An error stops the
    /// runtime and is returned from `Runtime::run`.
    fn on_init(&mut self, ctx: &mut SetupCtx<'_, '_>) -> Result<()>;

    /// Called after the surface was reconfigured for a new non-zero extent.
    fn on_resize(&mut self, ctx: &mut SetupCtx<'_, '_>, viewport: Viewport) -> Result<()> {
        let _ = (ctx, viewport);
        Ok(())
    }

    /// Called for every window event, after input state has been updated.
    fn on_window_event(&mut self, event: &WindowEvent) -> AppControl {
        let _ = event;
        AppControl::Continue
    }

    /// Called once per rendered frame.
    fn on_frame(&mut self, ctx: &mut FrameCtx<'_, '_>) -> AppControl;
}
