use anyhow::Result;

use raydraw_demo::{DemoConfig, RaytraceApp};
use raydraw_engine::logging::{init_logging, LoggingConfig};
use raydraw_engine::window::Runtime;

fn main() -> Result<()> {
    init_logging(LoggingConfig::default());

    let config = DemoConfig::raytrace();
    log::info!("loading shaders from {}", config.shader_dir.display());

    Runtime::run(config.runtime_config(), config.gpu_init(), RaytraceApp::new(config))
}
