use anyhow::{Context, Result};

use raydraw_engine::camera::{CameraController, CameraState};
use raydraw_engine::coords::Viewport;
use raydraw_engine::core::{App, AppControl, FrameCtx, SetupCtx};
use raydraw_engine::render::RaytraceRenderer;
use raydraw_engine::scene::SceneState;
use raydraw_engine::shader::{ShaderProgram, ShaderSources, ShaderStage};

use crate::config::DemoConfig;

const RAYTRACE_SHADER: &str = "raytrace.wgsl";
const BLIT_SHADER: &str = "blit.wgsl";

/// Fly-camera raytracer: WASD/Space/Shift to move, mouse to look, Escape to
/// toggle mouse capture.
pub struct RaytraceApp {
    config: DemoConfig,
    scene: SceneState,
    controller: CameraController,
    renderer: Option<RaytraceRenderer>,
}

impl RaytraceApp {
    pub fn new(config: DemoConfig) -> Self {
        let scene = SceneState::new(
            CameraState::new(config.camera_position),
            Viewport::new(config.width, config.height),
        );
        let controller = CameraController::new(config.controller.clone());

        Self {
            config,
            scene,
            controller,
            renderer: None,
        }
    }
}

impl App for RaytraceApp {
    fn on_init(&mut self, ctx: &mut SetupCtx<'_, '_>) -> Result<()> {
        let compute_path = self.config.shader_path(RAYTRACE_SHADER);
        let blit_path = self.config.shader_path(BLIT_SHADER);

        let compute_sources = ShaderSources::load(&[(ShaderStage::Compute, &compute_path)])?;
        let blit_sources =
            ShaderSources::load(&[(ShaderStage::Vertex, &blit_path), (ShaderStage::Fragment, &blit_path)])?;

        let device = ctx.gpu.device();
        let compute = ShaderProgram::compile(device, "raytrace", &compute_sources)?;
        let blit = ShaderProgram::compile(device, "blit", &blit_sources)?;

        let rctx = ctx.render_ctx();
        let mut renderer = RaytraceRenderer::new(&rctx, &compute, &blit)
            .context("failed to build raytrace pipelines")?;

        // The surface may not have the requested size.
        self.scene.resize(rctx.viewport);
        renderer.ensure_extent(&rctx, rctx.viewport);
        self.renderer = Some(renderer);

        ctx.window.set_cursor_mode(self.scene.camera.capture());
        log::info!("Escape toggles mouse capture");
        Ok(())
    }

    fn on_resize(&mut self, ctx: &mut SetupCtx<'_, '_>, viewport: Viewport) -> Result<()> {
        if !self.scene.resize(viewport) {
            return Ok(());
        }
        if let Some(renderer) = self.renderer.as_mut() {
            renderer.ensure_extent(&ctx.render_ctx(), viewport);
        }
        Ok(())
    }

    fn on_frame(&mut self, ctx: &mut FrameCtx<'_, '_>) -> AppControl {
        let time = ctx.time;

        if let Some(mode) =
            self.controller
                .update(&mut self.scene.camera, ctx.input, ctx.input_frame, time)
        {
            ctx.window.set_cursor_mode(mode);
        }
        self.scene.advance(time);

        let Some(renderer) = self.renderer.as_mut() else {
            return AppControl::Continue;
        };
        let scene = &self.scene;

        ctx.render(self.config.clear_color, |rctx, target| {
            renderer.render(rctx, target, scene)
        })
    }
}
