use std::fs::{self, File};
use std::path::Path;
use std::str::FromStr;
use std::sync::Mutex;

use color_eyre::eyre::{Result, eyre};
use tracing::Level;

use crate::config::LoggingConfig;

/// Where log lines go when no file is configured.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Fallback {
    /// Interactive mode: stderr would corrupt the screen, so drop everything.
    Discard,
    Stderr,
}

pub fn parse_level(level: &str) -> Level {
    Level::from_str(level.trim()).unwrap_or(Level::INFO)
}

pub fn init_logging(config: &LoggingConfig, fallback: Fallback) -> Result<()> {
    let level = parse_level(&config.level);

    match (&config.file, fallback) {
        (Some(path), _) => init_file(path, level, config.json),
        (None, Fallback::Stderr) => {
            let builder = tracing_subscriber::fmt()
                .with_max_level(level)
                .with_writer(std::io::stderr);
            let result = if config.json {
                tracing::subscriber::set_global_default(builder.json().finish())
            } else {
                tracing::subscriber::set_global_default(builder.finish())
            };
            result.map_err(|e| eyre!("failed to set tracing subscriber: {e}"))
        }
        (None, Fallback::Discard) => Ok(()),
    }
}

fn init_file(path: &Path, level: Level, json: bool) -> Result<()> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        fs::create_dir_all(parent)?;
    }
    let file = File::options().create(true).append(true).open(path)?;

    let builder = tracing_subscriber::fmt()
        .with_ansi(false)
        .with_max_level(level)
        .with_writer(Mutex::new(file));
    let result = if json {
        tracing::subscriber::set_global_default(builder.json().finish())
    } else {
        tracing::subscriber::set_global_default(builder.finish())
    };
    result.map_err(|e| eyre!("failed to set tracing subscriber: {e}"))
}
