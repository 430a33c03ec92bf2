use crate::models::settings::CalendarConfig;
use anyhow::{anyhow, Context, Result};
use directories::ProjectDirs;
use std::fs;
use std::path::{Path, PathBuf};

const CONFIG_FILE_NAME: &str = "layout.toml";

/// Location of the configuration file in the platform config directory,
/// falling back to the working directory when no home directory is known.
pub fn default_config_path() -> PathBuf {
    if let Some(proj_dirs) = ProjectDirs::from("com", "CalendarLayout", "calendar-layout") {
        proj_dirs.config_dir().join(CONFIG_FILE_NAME)
    } else {
        PathBuf::from(CONFIG_FILE_NAME)
    }
}

pub struct SettingsService {
    path: PathBuf,
}

impl SettingsService {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Service reading from [`default_config_path`]
    pub fn from_default_location() -> Self {
        Self::new(default_config_path())
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Get the current configuration.
    ///
    /// A missing file yields the defaults. A file that exists but does not
    /// parse or validate is an error.
    pub fn get(&self) -> Result<CalendarConfig> {
        if !self.path.exists() {
            log::info!(
                "No configuration at {}, using defaults",
                self.path.display()
            );
            return Ok(CalendarConfig::default());
        }

        let contents = fs::read_to_string(&self.path)
            .with_context(|| format!("Failed to read {}", self.path.display()))?;
        let config: CalendarConfig = toml::from_str(&contents)
            .with_context(|| format!("Failed to parse {}", self.path.display()))?;
        config
            .validate()
            .map_err(|e| anyhow!("Invalid configuration in {}: {}", self.path.display(), e))?;

        log::debug!("Loaded configuration from {}", self.path.display());
        Ok(config)
    }

    /// Write the configuration, creating the parent directory if needed
    pub fn update(&self, config: &CalendarConfig) -> Result<()> {
        config.validate().map_err(|e| anyhow!(e))?;

        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)
                    .with_context(|| format!("Failed to create {}", parent.display()))?;
            }
        }

        let contents = toml::to_string_pretty(config).context("Failed to serialize configuration")?;
        fs::write(&self.path, contents)
            .with_context(|| format!("Failed to write {}", self.path.display()))?;
        Ok(())
    }

    /// Reset the file to the default configuration
    pub fn reset(&self) -> Result<()> {
        self.update(&CalendarConfig::default())
    }
}

/// Load the configuration, logging and falling back to defaults on failure
pub fn load_config_or_default(service: &SettingsService) -> CalendarConfig {
    match service.get() {
        Ok(config) => config,
        Err(e) => {
            log::warn!("Failed to load configuration: {:#}, using defaults", e);
            CalendarConfig::default()
        }
    }
}
