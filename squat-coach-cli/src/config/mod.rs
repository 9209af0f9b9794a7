use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use squat_coach::RepThresholds;
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub thresholds: RepThresholds,

    #[serde(default)]
    pub display: DisplayConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DisplayConfig {
    #[serde(default = "default_true")]
    pub color: bool,

    #[serde(default = "default_progress_bar_width")]
    pub progress_bar_width: usize,
}

// Default value functions
fn default_true() -> bool {
    true
}

fn default_progress_bar_width() -> usize {
    20
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            color: default_true(),
            progress_bar_width: default_progress_bar_width(),
        }
    }
}

impl Config {
    /// Get config directory path (~/.squat-coach/)
    pub fn config_dir() -> Result<PathBuf> {
        let home = dirs::home_dir().context("Could not find home directory")?;
        Ok(home.join(".squat-coach"))
    }

    /// Get config file path (~/.squat-coach/config.toml)
    pub fn config_file() -> Result<PathBuf> {
        Ok(Self::config_dir()?.join("config.toml"))
    }

    /// Config file to use: the explicit override, else the default location
    pub fn resolve_path(explicit: Option<&Path>) -> Result<PathBuf> {
        match explicit {
            Some(path) => Ok(path.to_path_buf()),
            None => Self::config_file(),
        }
    }

    /// Load configuration from file, falling back to defaults when missing
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        let config_file = Self::resolve_path(explicit)?;

        if !config_file.exists() {
            tracing::info!("Config file not found, using defaults");
            return Ok(Self::default());
        }

        let contents = fs::read_to_string(&config_file)
            .with_context(|| format!("Failed to read config file {}", config_file.display()))?;

        let config: Config = toml::from_str(&contents).context("Failed to parse config file")?;
        config
            .thresholds
            .validate()
            .context("Invalid thresholds in config file")?;

        Ok(config)
    }

    /// Save configuration to file
    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(dir) = path.parent() {
            fs::create_dir_all(dir).context("Failed to create config directory")?;
        }

        let contents = toml::to_string_pretty(self).context("Failed to serialize config")?;
        fs::write(path, contents).context("Failed to write config file")?;

        Ok(())
    }
}
