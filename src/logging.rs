// src/logging.rs

//! File logging. The terminal belongs to the TUI, so nothing is written to stdout or
//! stderr; everything goes to `vanguard-glass.log` in the platform data directory.

use crate::config::ENV_PREFIX;
use color_eyre::eyre::Result;
use directories::ProjectDirs;
use lazy_static::lazy_static;
use std::path::PathBuf;
use tracing_error::ErrorLayer;
use tracing_subscriber::{EnvFilter, Layer, layer::SubscriberExt, util::SubscriberInitExt};

lazy_static! {
    /// Filter override read when `RUST_LOG` is unset, e.g. `VANGUARD_GLASS_LOGLEVEL=debug`.
    pub static ref LOG_LEVEL_ENV: String = format!("{}_LOGLEVEL", *ENV_PREFIX);
    pub static ref LOG_FILE_NAME: String = format!("{}.log", env!("CARGO_PKG_NAME"));
}

/// Directory holding the log file. Falls back to `./.data/vanguard-glass` when the
/// platform has no home directory to resolve against.
pub fn log_directory() -> PathBuf {
    ProjectDirs::from("io", "vanguard-glass", env!("CARGO_PKG_NAME"))
        .map(|dirs| dirs.data_local_dir().to_path_buf())
        .unwrap_or_else(|| PathBuf::from(".data").join(env!("CARGO_PKG_NAME")))
}

/// Filter directive: `RUST_LOG` first, then [`LOG_LEVEL_ENV`], then info for this crate.
/// Blank values count as unset.
pub fn log_filter<F>(lookup: F) -> String
where
    F: Fn(&str) -> Option<String>,
{
    ["RUST_LOG", LOG_LEVEL_ENV.as_str()]
        .into_iter()
        .filter_map(|name| lookup(name))
        .map(|value| value.trim().to_string())
        .find(|value| !value.is_empty())
        .unwrap_or_else(|| format!("{}=info", env!("CARGO_CRATE_NAME")))
}

/// Installs the file subscriber and returns the path being written to.
pub fn initialize_logging() -> Result<PathBuf> {
    let directory = log_directory();
    std::fs::create_dir_all(&directory)?;
    let log_path = directory.join(LOG_FILE_NAME.as_str());
    let log_file = std::fs::File::create(&log_path)?;

    let directive = log_filter(|name| std::env::var(name).ok());
    let file_layer = tracing_subscriber::fmt::layer()
        .with_writer(log_file)
        .with_target(false)
        .with_ansi(false)
        .with_filter(EnvFilter::new(&directive));

    tracing_subscriber::registry()
        .with(file_layer)
        .with(ErrorLayer::default())
        .init();

    tracing::info!(path = %log_path.display(), filter = %directive, "Logging initialized.");
    Ok(log_path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn env(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> + use<> {
        let map: HashMap<String, String> =
            pairs.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect();
        move |name| map.get(name).cloned()
    }

    #[test]
    fn level_variable_is_named_after_the_crate() {
        assert_eq!(LOG_LEVEL_ENV.as_str(), "VANGUARD_GLASS_LOGLEVEL");
        assert_eq!(LOG_FILE_NAME.as_str(), "vanguard-glass.log");
    }

    #[test]
    fn defaults_to_info_for_this_crate() {
        assert_eq!(log_filter(env(&[])), "vanguard_glass=info");
    }

    #[test]
    fn rust_log_wins_over_the_crate_variable() {
        let lookup = env(&[("RUST_LOG", "trace"), ("VANGUARD_GLASS_LOGLEVEL", "warn")]);
        assert_eq!(log_filter(lookup), "trace");
    }

    #[test]
    fn crate_variable_applies_when_rust_log_is_blank() {
        let lookup = env(&[("RUST_LOG", "  "), ("VANGUARD_GLASS_LOGLEVEL", "debug")]);
        assert_eq!(log_filter(lookup), "debug");
    }

    #[test]
    fn log_directory_is_project_specific() {
        let dir = log_directory();
        assert!(dir.to_string_lossy().contains("vanguard-glass"));
    }
}
