use anyhow::Result;

use raydraw_demo::{CurveApp, DemoConfig};
use raydraw_engine::logging::{init_logging, LoggingConfig};
use raydraw_engine::window::Runtime;

fn main() -> Result<()> {
    init_logging(LoggingConfig::default());

    let config = DemoConfig::curve();
    log::info!("loading shaders from {}", config.shader_dir.display());

    Runtime::run(config.runtime_config(), config.gpu_init(), CurveApp::new(config))
}
