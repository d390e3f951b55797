use anyhow::{Context, Result};

use raydraw_engine::core::{App, AppControl, FrameCtx, SetupCtx};
use raydraw_engine::render::CurveRenderer;
use raydraw_engine::shader::{ShaderProgram, ShaderSources, ShaderStage};

use crate::config::DemoConfig;

const CURVE_SHADER: &str = "curve.wgsl";

/// Draws `y = -2x³ + 5x² - 7x + 9` over a cleared background.
pub struct CurveApp {
    config: DemoConfig,
    renderer: Option<CurveRenderer>,
}

impl CurveApp {
    pub fn new(config: DemoConfig) -> Self {
        Self {
            config,
            renderer: None,
        }
    }
}

impl App for CurveApp {
    fn on_init(&mut self, ctx: &mut SetupCtx<'_, '_>) -> Result<()> {
        let path = self.config.shader_path(CURVE_SHADER);
        let sources = ShaderSources::load(&[(ShaderStage::Vertex, &path), (ShaderStage::Fragment, &path)])?;
        let program = ShaderProgram::compile(ctx.gpu.device(), "curve", &sources)?;

        let renderer = CurveRenderer::new(&ctx.render_ctx(), &program)
            .context("failed to build curve pipeline")?;
        self.renderer = Some(renderer);
        Ok(())
    }

    fn on_frame(&mut self, ctx: &mut FrameCtx<'_, '_>) -> AppControl {
        let Some(renderer) = self.renderer.as_ref() else {
            return AppControl::Continue;
        };

        ctx.render(self.config.clear_color, |_, target| renderer.render(target))
    }
}
