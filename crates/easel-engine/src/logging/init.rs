use std::sync::Once;

use log::LevelFilter;

/// Crates that log per frame at `info` and drown out sketch output.
const NOISY: [&str; 3] = ["wgpu_core", "wgpu_hal", "naga"];

/// Logger setup for a sketch process.
///
/// Filter precedence: `env_filter`, then `RUST_LOG`, then `level` with the
/// GPU stack capped at `warn`.
#[derive(Debug, Clone)]
pub struct LoggingConfig {
    /// `env_logger` filter syntax, e.g. `"easel_bridge=trace,info"`.
    pub env_filter: Option<String>,
    pub level: LevelFilter,
    pub write_style: env_logger::WriteStyle,
}

impl LoggingConfig {
    /// Debug output for the easel crates, `info` for everything else.
    pub fn verbose() -> Self {
        Self {
            env_filter: Some("easel_bridge=debug,easel_engine=debug,info".to_string()),
            ..Self::default()
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            env_filter: None,
            level: LevelFilter::Info,
            write_style: env_logger::WriteStyle::Auto,
        }
    }
}

static INIT: Once = Once::new();

/// Installs the global logger. Only the first call has an effect.
pub fn init_logging(config: LoggingConfig) {
    INIT.call_once(|| {
        let mut builder = env_logger::Builder::new();

        match config.env_filter.or_else(|| std::env::var("RUST_LOG").ok()) {
            Some(filter) => {
                builder.parse_filters(&filter);
            }
            None => {
                builder.filter_level(config.level);
                for module in NOISY {
                    builder.filter_module(module, config.level.min(LevelFilter::Warn));
                }
            }
        }
        builder.write_style(config.write_style);

        // A test harness may have installed a logger already.
        if builder.try_init().is_ok() {
            log::debug!("logging initialized");
        }
    });
}
