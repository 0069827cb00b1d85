use crate::error::{Result as ServerErrorResult, ServerError};

use std::path::PathBuf;
use std::time::SystemTime;

use fern::Dispatch;
use fern::colors::{Color, ColoredLevelConfig};
use log::info;

/// Resolve the log file location from config and initialize fern.
/// The file, when configured, lives under `<config_dir>/<logging.dir>/`.
pub fn init_from_config(config: &relay_config::Config) -> ServerErrorResult<()> {
    let log_file = match config.logging.file {
        Some(ref filename) => {
            let config_dir = relay_config::Config::config_dir()?;
            let log_dir = config_dir.join(&config.logging.dir);

            // May not exist on first run
            std::fs::create_dir_all(&log_dir).map_err(|e| ServerError::Logger {
                message: format!("Failed to create log directory {}: {}", log_dir.display(), e),
            })?;

            Some(log_dir.join(filename))
        }
        None => None,
    };

    initialize(config.logging.level, log_file, config.logging.colored)
}

/// Wire up fern for the whole process.
///
/// A file path routes everything to that file in plain text; otherwise
/// output goes to stdout, colored when `colored` is set.
pub fn initialize(
    log_level: relay_config::LogLevel,
    log_file: Option<PathBuf>,
    colored: bool,
) -> ServerErrorResult<()> {
    let sink = match log_file {
        Some(ref path) => file_dispatch(path)?,
        None if colored => colored_dispatch(),
        None => plain_dispatch(),
    };

    Dispatch::new()
        .level(log_level.0)
        .chain(sink)
        .apply()
        .map_err(|e| ServerError::Logger {
            message: format!("Failed to initialize logger: {e}"),
        })?;

    match log_file {
        Some(ref path) => info!(
            "Logger ready: level={:?}, file={}",
            log_level.0,
            path.display()
        ),
        None => info!("Logger ready: level={:?}, stdout", log_level.0),
    }

    Ok(())
}

fn file_dispatch(path: &PathBuf) -> ServerErrorResult<Dispatch> {
    let file = std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .map_err(|e| ServerError::Logger {
            message: format!("Failed to open log file {}: {}", path.display(), e),
        })?;

    Ok(plain_format(Dispatch::new()).chain(file))
}

fn colored_dispatch() -> Dispatch {
    let colors = ColoredLevelConfig::new()
        .trace(Color::Magenta)
        .debug(Color::Blue)
        .info(Color::Green)
        .warn(Color::Yellow)
        .error(Color::Red);

    Dispatch::new()
        .format(move |out, message, record| {
            out.finish(format_args!(
                "{date} [{level}] {message} ({file}:{line})",
                date = humantime::format_rfc3339(SystemTime::now()),
                level = colors.color(record.level()),
                message = message,
                file = record.file().unwrap_or("unknown"),
                line = record.line().unwrap_or(0),
            ))
        })
        .chain(std::io::stdout())
}

fn plain_dispatch() -> Dispatch {
    plain_format(Dispatch::new()).chain(std::io::stdout())
}

fn plain_format(dispatch: Dispatch) -> Dispatch {
    dispatch.format(|out, message, record| {
        out.finish(format_args!(
            "{date} [{level}] {message} ({file}:{line})",
            date = humantime::format_rfc3339(SystemTime::now()),
            level = record.level(),
            message = message,
            file = record.file().unwrap_or("unknown"),
            line = record.line().unwrap_or(0),
        ))
    })
}
