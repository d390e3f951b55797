use winit::window::{CursorGrabMode, Window};

use crate::camera::CaptureMode;
use crate::coords::Viewport;
use crate::device::Gpu;
use crate::input::{InputFrame, InputState};
use crate::render::{RenderCtx, RenderTarget};
use crate::time::FrameTime;

use super::app::AppControl;

/// Window handle plus the few window operations apps need.
pub struct WindowCtx<'a> {
    pub window: &'a Window,
}

impl<'a> WindowCtx<'a> {
    /// Current client area in physical pixels.
    pub fn viewport(&self) -> Viewport {
        let size = self.window.inner_size();
        Viewport::new(size.width, size.height)
    }

    /// Hides and grabs the cursor when captured, releases and shows it when free.
    ///
    /// Grabbing tries `Locked` first and falls back to `Confined`; platforms
    /// that support neither keep the cursor free but hidden.
    pub fn set_cursor_mode(&self, mode: CaptureMode) {
        if mode == CaptureMode::Captured {
            let grabbed = self
                .window
                .set_cursor_grab(CursorGrabMode::Locked)
                .or_else(|_| self.window.set_cursor_grab(CursorGrabMode::Confined));
            if let Err(e) = grabbed {
                log::warn!("cursor grab unavailable: {e}");
            }
            self.window.set_cursor_visible(false);
        } else {
            if let Err(e) = self.window.set_cursor_grab(CursorGrabMode::None) {
                log::warn!("cursor release failed: {e}");
            }
            self.window.set_cursor_visible(true);
        }
    }
}

/// Context for `App::on_init` and `App::on_resize`.
pub struct SetupCtx<'a, 'w> {
    pub window: WindowCtx<'a>,
    pub gpu: &'a Gpu<'w>,
}

impl<'a, 'w> SetupCtx<'a, 'w> {
    /// Renderer-facing handles for building GPU resources.
    pub fn render_ctx(&self) -> RenderCtx<'_> {
        RenderCtx::from_gpu(self.gpu)
    }
}

/// Per-frame context passed to `core::App::on_frame`.
///
/// Lifetimes:
/// - `'a` is the duration of the callback invocation
/// - `'w` is the window-borrow lifetime carried by `Gpu<'w>`
pub struct FrameCtx<'a, 'w> {
    pub window: WindowCtx<'a>,
    pub gpu: &'a mut Gpu<'w>,
    pub input: &'a InputState,
    pub input_frame: &'a InputFrame,
    pub time: FrameTime,
}

impl<'a, 'w> FrameCtx<'a, 'w> {
    /// Clears the surface with `clear`, calls `draw` with a ready [`RenderCtx`] and
    /// [`RenderTarget`], then presents the frame.
    ///
    /// Surface loss is handled here: recoverable errors skip the frame, fatal
    /// ones return `AppControl::Exit`.
    pub fn render<F>(&mut self, clear: wgpu::Color, draw: F) -> AppControl
    where
        F: FnOnce(&RenderCtx<'_>, &mut RenderTarget<'_>),
    {
        let mut frame = match self.gpu.begin_frame() {
            Ok(f) => f,
            Err(err) => {
                return if self.gpu.handle_surface_error(err).is_fatal() {
                    AppControl::Exit
                } else {
                    AppControl::Continue
                };
            }
        };

        // Clear pass; dropped before the encoder is lent to the renderers.
        {
            let _rpass = frame.encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("raydraw clear"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &frame.view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(clear),
                        store: wgpu::StoreOp::Store,
                    },
                    depth_slice: None,
                })],
                depth_stencil_attachment: None,
                timestamp_writes: None,
                occlusion_query_set: None,
                multiview_mask: None,
            });
        }

        let rctx = RenderCtx::from_gpu(&*self.gpu);

        // RenderTarget borrows frame.encoder; dropped before submit() takes frame.
        {
            let mut target = RenderTarget::new(&mut frame.encoder, &frame.view);
            draw(&rctx, &mut target);
        }

        self.window.window.pre_present_notify();
        self.gpu.submit(frame);

        AppControl::Continue
    }
}
