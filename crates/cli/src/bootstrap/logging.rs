use anyhow::Context;
use std::fs::OpenOptions;
use std::sync::Mutex;
use tinu_dns_domain::config::{LogFormat, LoggingConfig};
use tracing::level_filters::LevelFilter;
use tracing::warn;
use tracing_subscriber::{
    fmt::{self, writer::BoxMakeWriter},
    layer::SubscriberExt,
    util::SubscriberInitExt,
    EnvFilter,
};

/// Installs the global subscriber. `RUST_LOG` directives take precedence
/// over the configured level.
pub fn init_logging(config: &LoggingConfig) -> anyhow::Result<()> {
    let parsed_level = config.level.parse::<LevelFilter>().ok();
    let filter = EnvFilter::builder()
        .with_default_directive(parsed_level.unwrap_or(LevelFilter::INFO).into())
        .from_env_lossy();

    let (writer, ansi) = match &config.file {
        Some(path) => {
            let file = OpenOptions::new()
                .create(true)
                .append(true)
                .open(path)
                .with_context(|| format!("failed to open log file '{}'", path))?;
            (BoxMakeWriter::new(Mutex::new(file)), false)
        }
        None => (BoxMakeWriter::new(std::io::stdout), true),
    };

    match config.format {
        LogFormat::Text => {
            tracing_subscriber::registry()
                .with(filter)
                .with(
                    fmt::layer()
                        .with_target(true)
                        .with_ansi(ansi)
                        .with_writer(writer),
                )
                .init();
        }
        LogFormat::Json => {
            tracing_subscriber::registry()
                .with(filter)
                .with(fmt::layer().json().with_target(true).with_writer(writer))
                .init();
        }
    }

    if parsed_level.is_none() {
        warn!(level = %config.level, "Unknown log level, falling back to info");
    }

    Ok(())
}
