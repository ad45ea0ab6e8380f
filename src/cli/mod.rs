//! CLI command implementations

pub mod badges;
pub mod habit;
pub mod history;
pub mod init;
pub mod reset;
pub mod stat;
pub mod status;
pub mod track;

use std::path::{Path, PathBuf};

use anyhow::{Context as _, Result};

use habitforge::config::Config;
use habitforge::{JsonFileStore, ProgressionEngine};

/// Resolved configuration shared by every command
pub struct Context {
    pub config: Config,
    pub data_path: PathBuf,
}

impl Context {
    /// Load the config (global by default) and resolve the state file path
    pub fn load(config_override: Option<&Path>, data_override: Option<&Path>) -> Result<Self> {
        let config = match config_override {
            Some(path) => Config::from_file(path)?,
            None => Config::load()?,
        };
        let data_path = data_override
            .map(Path::to_path_buf)
            .unwrap_or_else(|| config.data_path());

        tracing::debug!("Using state file {}", data_path.display());
        Ok(Self { config, data_path })
    }

    pub fn engine(&self) -> Result<ProgressionEngine<JsonFileStore>> {
        let store = JsonFileStore::open(&self.data_path)
            .with_context(|| format!("Failed to open state file: {}", self.data_path.display()))?;
        Ok(ProgressionEngine::open(store))
    }
}

/// Text progress bar, `width` cells wide
pub(crate) fn progress_bar(fraction: f32, width: usize) -> String {
    let filled = ((fraction.clamp(0.0, 1.0) * width as f32).round() as usize).min(width);
    format!("[{}{}]", "#".repeat(filled), "-".repeat(width - filled))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_progress_bar() {
        assert_eq!(progress_bar(0.0, 4), "[----]");
        assert_eq!(progress_bar(0.5, 4), "[##--]");
        assert_eq!(progress_bar(1.5, 4), "[####]");
    }
}
