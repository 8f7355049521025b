use anyhow::{Context, Result};
use std::path::{Path, PathBuf};

use crate::api::DEFAULT_ACCOUNT_ID;

pub(crate) const DEFAULT_API_URL: &str = "http://localhost:5000";
const DEFAULT_LOG_FILTER: &str = "info";
const LOG_FILE: &str = "fintrack.log";

/// Runtime settings, read from the environment (and a `.env` file if one
/// is present).
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Config {
    pub(crate) api_url: String,
    pub(crate) account_id: String,
    pub(crate) log_filter: String,
    pub(crate) data_dir: PathBuf,
}

impl Config {
    pub(crate) fn from_env() -> Result<Self> {
        // A missing .env file is fine
        let _ = dotenvy::dotenv();
        let data_dir = data_dir()?;
        Ok(Self::from_lookup(|key| std::env::var(key).ok(), data_dir))
    }

    /// Build from any key lookup. Unset or blank values fall back to the
    /// defaults.
    pub(crate) fn from_lookup(lookup: impl Fn(&str) -> Option<String>, data_dir: PathBuf) -> Self {
        let get = |key: &str, default: &str| {
            lookup(key)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
                .unwrap_or_else(|| default.to_string())
        };
        Self {
            api_url: get("FINTRACK_API_URL", DEFAULT_API_URL),
            account_id: get("FINTRACK_ACCOUNT_ID", DEFAULT_ACCOUNT_ID),
            log_filter: get("FINTRACK_LOG", DEFAULT_LOG_FILTER),
            data_dir,
        }
    }

    pub(crate) fn log_path(&self) -> PathBuf {
        self.data_dir.join(LOG_FILE)
    }
}

fn data_dir() -> Result<PathBuf> {
    let proj_dirs = directories::ProjectDirs::from("com", "fintrack", "fintrack")
        .ok_or_else(|| anyhow::anyhow!("Could not determine data directory"))?;
    let data_dir = proj_dirs.data_dir();
    ensure_dir(data_dir)?;
    Ok(data_dir.to_path_buf())
}

fn ensure_dir(dir: &Path) -> Result<()> {
    std::fs::create_dir_all(dir)
        .with_context(|| format!("Failed to create data directory: {}", dir.display()))
}

#[cfg(test)]
#[path = "config_tests.rs"]
mod tests;
