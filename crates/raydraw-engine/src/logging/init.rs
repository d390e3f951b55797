use std::sync::Once;

use log::LevelFilter;

/// Crates that log adapter enumeration and surface churn at info level.
const NOISY_GPU_CRATES: [&str; 3] = ["wgpu_core", "wgpu_hal", "naga"];

/// Logger configuration.
///
/// Filter precedence: `filter`, then `RUST_LOG`, then `level` with the GPU
/// stack capped at warn.
#[derive(Debug, Clone)]
pub struct LoggingConfig {
    /// `env_logger` filter directives, e.g. "raydraw_engine=debug,wgpu_core=warn".
    pub filter: Option<String>,

    /// Fallback level when neither `filter` nor `RUST_LOG` is set.
    pub level: LevelFilter,

    pub write_style: env_logger::WriteStyle,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            filter: None,
            level: LevelFilter::Info,
            write_style: env_logger::WriteStyle::Auto,
        }
    }
}

static INIT: Once = Once::new();

/// Installs the global `env_logger` backend.
///
/// Only the first call has an effect. Call it at the top of `main`, before the
/// runtime starts.
pub fn init_logging(config: LoggingConfig) {
    INIT.call_once(|| {
        let mut builder = env_logger::Builder::new();

        match config.filter.or_else(|| std::env::var("RUST_LOG").ok()) {
            Some(directives) => {
                builder.parse_filters(&directives);
            }
            None => {
                builder.filter_level(config.level);
                for krate in NOISY_GPU_CRATES {
                    builder.filter_module(krate, config.level.min(LevelFilter::Warn));
                }
            }
        }

        builder.write_style(config.write_style).format_timestamp_millis().init();

        log::debug!("logging initialized");
    });
}
