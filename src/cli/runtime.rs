use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use catalog_tagger::config::TaggerConfig;
use tracing::info;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

const LOG_FILE_PREFIX: &str = "catalog-tagger";
const LOG_FILES_KEPT: usize = 3;

/// Console plus rolling file logging.
///
/// The returned guard flushes the file writer on drop and must live for the
/// whole run.
pub fn init_logging(level: &str, debug: bool, log_dir: &Path) -> Result<WorkerGuard> {
    let level = if debug {
        tracing::Level::DEBUG
    } else {
        level.parse().context("Invalid log level")?
    };

    std::fs::create_dir_all(log_dir)
        .with_context(|| format!("Failed to create log directory {}", log_dir.display()))?;
    let appender = RollingFileAppender::builder()
        .rotation(Rotation::DAILY)
        .filename_prefix(LOG_FILE_PREFIX)
        .filename_suffix("log")
        .max_log_files(LOG_FILES_KEPT)
        .build(log_dir)
        .context("Failed to create log file appender")?;
    let (file_writer, guard) = tracing_appender::non_blocking(appender);

    tracing_subscriber::registry()
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(level.to_string())),
        )
        .with(fmt::layer())
        .with(fmt::layer().with_ansi(false).with_writer(file_writer))
        .init();

    Ok(guard)
}

/// Priority: explicit path > ./config.yaml > <config dir>/catalog-tagger/config.yaml
pub fn resolve_config_path(explicit: Option<&PathBuf>) -> Result<PathBuf> {
    if let Some(path) = explicit {
        return Ok(path.clone());
    }
    let local_config = PathBuf::from("config.yaml");
    if local_config.exists() {
        return Ok(local_config);
    }
    let mut path = dirs::config_dir().context("Failed to get config directory")?;
    path.push("catalog-tagger");
    path.push("config.yaml");
    Ok(path)
}

pub fn load_config(path: &Path) -> Result<TaggerConfig> {
    let mut config = TaggerConfig::from_yaml_file(path).context("Failed to load config file")?;
    config.apply_env().context("Invalid environment override")?;
    config.validate()?;

    info!("Loaded configuration from: {}", path.display());
    Ok(config)
}
