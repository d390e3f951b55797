use anyhow::{Context, Result};
use ouroboros::self_referencing;

use winit::application::ApplicationHandler;
use winit::dpi::PhysicalSize;
use winit::event::{DeviceEvent, DeviceId, WindowEvent};
use winit::event_loop::{ActiveEventLoop, ControlFlow, EventLoop};
use winit::window::{Window, WindowId};

use crate::coords::Viewport;
use crate::core::{App as CoreApp, AppControl, FrameCtx, SetupCtx, WindowCtx};
use crate::device::{Gpu, GpuInit};
use crate::input::platform::{translate_device_event, translate_window_event};
use crate::input::{InputFrame, InputState};
use crate::time::FrameClock;

/// Window/runtime configuration.
#[derive(Debug, Clone)]
pub struct RuntimeConfig {
    pub title: String,
    /// Requested client area in physical pixels.
    pub initial_size: PhysicalSize<u32>,
    pub resizable: bool,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            title: "raydraw".to_string(),
            initial_size: PhysicalSize::new(1920, 1080),
            resizable: true,
        }
    }
}

/// Entry point for the runtime.
pub struct Runtime;

impl Runtime {
    /// Opens the window, initializes the GPU and runs `app` until the window
    /// closes or the app asks to exit.
    ///
    /// Errors from window/GPU creation and from `App::on_init`/`App::on_resize`
    /// stop the loop and are returned here.
    pub fn run<A>(config: RuntimeConfig, gpu_init: GpuInit, app: A) -> Result<()>
    where
        A: 'static + CoreApp,
    {
        let event_loop = EventLoop::new().context("failed to create winit EventLoop")?;
        let mut state = AppState::new(config, gpu_init, app);

        event_loop
            .run_app(&mut state)
            .context("winit event loop terminated with error")?;

        match state.error.take() {
            Some(e) => Err(e),
            None => Ok(()),
        }
    }
}

#[self_referencing]
struct WindowEntry {
    input_state: InputState,
    input_frame: InputFrame,
    clock: FrameClock,

    window: Window,

    #[borrows(window)]
    #[covariant]
    gpu: Gpu<'this>,
}

struct AppState<A>
where
    A: CoreApp + 'static,
{
    config: RuntimeConfig,
    gpu_init: GpuInit,
    app: A,

    entry: Option<WindowEntry>,
    exit_requested: bool,
    error: Option<anyhow::Error>,
}

impl<A> AppState<A>
where
    A: CoreApp + 'static,
{
    fn new(config: RuntimeConfig, gpu_init: GpuInit, app: A) -> Self {
        Self {
            config,
            gpu_init,
            app,
            entry: None,
            exit_requested: false,
            error: None,
        }
    }

    fn fail(&mut self, event_loop: &ActiveEventLoop, error: anyhow::Error) {
        log::error!("{error:#}");
        self.error = Some(error);
        self.exit_requested = true;
        event_loop.exit();
    }

    fn create_window_entry(&self, event_loop: &ActiveEventLoop) -> Result<WindowEntry> {
        let attrs = Window::default_attributes()
            .with_title(self.config.title.clone())
            .with_inner_size(self.config.initial_size)
            .with_resizable(self.config.resizable);

        let window = event_loop
            .create_window(attrs)
            .context("failed to create window")?;

        let gpu_init = self.gpu_init.clone();

        WindowEntryTryBuilder {
            input_state: InputState::default(),
            input_frame: InputFrame::default(),
            clock: FrameClock::default(),
            window,
            gpu_builder: |w| pollster::block_on(Gpu::new(w, gpu_init)),
        }
        .try_build()
        .context("GPU initialization failed")
    }

    /// Reconfigures the surface, then lets the app re-provision size-bound
    /// resources. Zero extents (minimized) only record the size.
    fn resize(&mut self, new_size: PhysicalSize<u32>) -> Result<()> {
        let (app, Some(entry)) = (&mut self.app, self.entry.as_mut()) else {
            return Ok(());
        };

        entry.with_gpu_mut(|gpu| gpu.resize(new_size));

        let viewport = Viewport::new(new_size.width, new_size.height);
        if !viewport.is_valid() {
            log::debug!("window minimized; rendering paused");
            return Ok(());
        }

        log::debug!("resized to {}x{}", viewport.width, viewport.height);
        entry.with_mut(|fields| {
            let mut ctx = SetupCtx {
                window: WindowCtx {
                    window: fields.window,
                },
                gpu: fields.gpu,
            };
            app.on_resize(&mut ctx, viewport)
        })?;

        entry.with_window(|w| w.request_redraw());
        Ok(())
    }

    fn redraw(&mut self) -> AppControl {
        let (app, Some(entry)) = (&mut self.app, self.entry.as_mut()) else {
            return AppControl::Continue;
        };

        if !entry.with_gpu(|gpu| gpu.viewport().is_valid()) {
            return AppControl::Continue;
        }

        entry.with_mut(|fields| {
            let time = fields.clock.tick();

            let control = {
                let mut ctx = FrameCtx {
                    window: WindowCtx {
                        window: fields.window,
                    },
                    gpu: fields.gpu,
                    input: fields.input_state,
                    input_frame: fields.input_frame,
                    time,
                };
                app.on_frame(&mut ctx)
            };

            // Clear per-frame deltas after the frame is consumed.
            fields.input_frame.clear();
            control
        })
    }
}

impl<A> ApplicationHandler for AppState<A>
where
    A: CoreApp + 'static,
{
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.entry.is_some() {
            return;
        }

        let entry = match self.create_window_entry(event_loop) {
            Ok(entry) => entry,
            Err(e) => return self.fail(event_loop, e),
        };

        let app = &mut self.app;
        let init = entry.with(|fields| {
            let mut ctx = SetupCtx {
                window: WindowCtx {
                    window: fields.window,
                },
                gpu: fields.gpu,
            };
            app.on_init(&mut ctx)
        });

        if let Err(e) = init {
            return self.fail(event_loop, e.context("application setup failed"));
        }

        entry.with_window(|w| w.request_redraw());
        self.entry = Some(entry);
    }

    fn about_to_wait(&mut self, event_loop: &ActiveEventLoop) {
        if self.exit_requested {
            event_loop.exit();
            return;
        }

        // Uncapped: render as fast as presentation allows.
        event_loop.set_control_flow(ControlFlow::Poll);

        if let Some(entry) = &self.entry {
            entry.with_window(|w| w.request_redraw());
        }
    }

    fn device_event(&mut self, _event_loop: &ActiveEventLoop, _device_id: DeviceId, event: DeviceEvent) {
        let Some(entry) = self.entry.as_mut() else {
            return;
        };

        entry.with_mut(|fields| {
            if let Some(ev) = translate_device_event(fields.input_state, &event) {
                fields.input_state.apply_event(fields.input_frame, ev);
            }
        });
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, _window_id: WindowId, event: WindowEvent) {
        if self.exit_requested {
            event_loop.exit();
            return;
        }

        // Split borrows to avoid `self` capture inside `ouroboros` closures.
        let (app, Some(entry)) = (&mut self.app, self.entry.as_mut()) else {
            return;
        };

        let control = entry.with_mut(|fields| {
            if let Some(ev) = translate_window_event(&event) {
                fields.input_state.apply_event(fields.input_frame, ev);
            }
            app.on_window_event(&event)
        });

        if control == AppControl::Exit {
            self.exit_requested = true;
            event_loop.exit();
            return;
        }

        match &event {
            WindowEvent::CloseRequested => {
                log::info!("window closed");
                self.entry = None;
                self.exit_requested = true;
                event_loop.exit();
            }

            WindowEvent::Resized(new_size) => {
                if let Err(e) = self.resize(*new_size) {
                    self.fail(event_loop, e.context("resize handling failed"));
                }
            }

            WindowEvent::ScaleFactorChanged { .. } => {
                let size = self.entry.as_ref().map(|e| e.with_window(|w| w.inner_size()));
                if let Some(size) = size {
                    if let Err(e) = self.resize(size) {
                        self.fail(event_loop, e.context("resize handling failed"));
                    }
                }
            }

            WindowEvent::RedrawRequested => {
                if self.redraw() == AppControl::Exit {
                    self.exit_requested = true;
                    event_loop.exit();
                }
            }

            _ => {}
        }
    }
}
