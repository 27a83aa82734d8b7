use crate::config::{Config, RustEnv};
use log::{LevelFilter, SetLoggerError};
use simplelog::{self, ColorChoice, ConfigBuilder, TermLogger, TerminalMode};

/// Dependencies whose logs are dropped unless running at Trace level.
const NOISY_DEPENDENCIES: &[&str] = &["mio", "tower", "tracing", "hyper", "axum"];

pub struct Logger {}

impl Logger {
    /// Installs the global terminal logger for the configured level.
    ///
    /// Below Trace, logs from [`NOISY_DEPENDENCIES`] are filtered out. Colors
    /// are disabled in production so log collectors get plain text.
    pub fn init_logger(config: &Config) -> Result<(), SetLoggerError> {
        let level = config.log_level_filter;

        TermLogger::init(
            Self::to_simplelog_level(level),
            Self::build_log_config(level != LevelFilter::Trace),
            TerminalMode::Mixed,
            Self::color_choice(&config.runtime_env),
        )
    }

    fn to_simplelog_level(level: LevelFilter) -> simplelog::LevelFilter {
        match level {
            LevelFilter::Off => simplelog::LevelFilter::Off,
            LevelFilter::Error => simplelog::LevelFilter::Error,
            LevelFilter::Warn => simplelog::LevelFilter::Warn,
            LevelFilter::Info => simplelog::LevelFilter::Info,
            LevelFilter::Debug => simplelog::LevelFilter::Debug,
            LevelFilter::Trace => simplelog::LevelFilter::Trace,
        }
    }

    fn color_choice(runtime_env: &RustEnv) -> ColorChoice {
        match runtime_env {
            RustEnv::Production => ColorChoice::Never,
            RustEnv::Development | RustEnv::Staging => ColorChoice::Auto,
        }
    }

    fn build_log_config(filter_dependencies: bool) -> simplelog::Config {
        let mut builder = ConfigBuilder::new();
        builder.set_time_format_rfc3339();

        if filter_dependencies {
            for module in NOISY_DEPENDENCIES {
                builder.add_filter_ignore_str(module);
            }
        }

        builder.build()
    }
}
