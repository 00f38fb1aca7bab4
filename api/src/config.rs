//! Process configuration loading

use std::path::{Path, PathBuf};

use anyhow::Context;
use cb_shared::config::AppConfig;

/// Configuration plus the `.env` file it was merged from, if any
///
/// Loading happens before the tracing subscriber exists, so the caller logs
/// `dotenv_path` once logging is up.
#[derive(Debug)]
pub struct LoadedConfig {
    pub config: AppConfig,
    pub dotenv_path: Option<PathBuf>,
}

/// Loads `.env` when present, then reads the process environment
pub fn load_config() -> LoadedConfig {
    let dotenv_path = dotenvy::dotenv().ok();
    LoadedConfig {
        config: AppConfig::from_env(),
        dotenv_path,
    }
}

/// Loads an explicit env file, then reads the process environment
///
/// Variables already set in the process win over the file.
pub fn load_config_from(path: &Path) -> anyhow::Result<LoadedConfig> {
    dotenvy::from_path(path)
        .with_context(|| format!("failed to read env file {}", path.display()))?;
    Ok(LoadedConfig {
        config: AppConfig::from_env(),
        dotenv_path: Some(path.to_path_buf()),
    })
}
