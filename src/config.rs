use std::path::{Path, PathBuf};
use std::{env, fs};

use anyhow::{Context, Result};
use dirs::home_dir;
use serde::Deserialize;

use crate::combobox::config::ComboboxConfig;

const DEFAULT_CONFIG_DIR: &str = "invpick";
const CONFIG_FILE_NAME: &str = "config.toml";

/// User settings read from `config.toml`. Every field is optional; missing
/// fields fall back to the combobox defaults.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Heading shown above the picker.
    pub title: Option<String>,
    pub placeholder: Option<String>,
    pub search_placeholder: Option<String>,
    pub empty_message: Option<String>,
    pub count_label: Option<String>,
    /// Directory for log files. Logging is off when unset.
    pub log_dir: Option<PathBuf>,
}

impl Config {
    /// Loads the config from `$INVPICK_CONFIG`, or from
    /// `~/.config/invpick/config.toml`. A missing file yields the defaults.
    pub fn load() -> Result<Self> {
        let path = get_config_file_path()?;
        if !path.exists() {
            return Ok(Self::default());
        }

        Self::load_from(&path)
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        let data = fs::read_to_string(path).with_context(|| {
            format!("Failed to read config file {}", path.display())
        })?;

        Self::parse(&data).with_context(|| {
            format!("Failed to parse config file {}", path.display())
        })
    }

    pub fn parse(data: &str) -> Result<Self> {
        Ok(toml::from_str(data)?)
    }

    /// Builds the combobox settings, preferring configured values over the
    /// defaults.
    pub fn combobox_config(&self) -> ComboboxConfig {
        let defaults = ComboboxConfig::default();

        ComboboxConfig {
            placeholder: self.placeholder.clone().unwrap_or(defaults.placeholder),
            search_placeholder: self
                .search_placeholder
                .clone()
                .unwrap_or(defaults.search_placeholder),
            empty_message: self
                .empty_message
                .clone()
                .unwrap_or(defaults.empty_message),
            disabled: defaults.disabled,
            count_label: self.count_label.clone().or(defaults.count_label),
        }
    }
}

fn get_config_file_path() -> Result<PathBuf> {
    if let Ok(path) = env::var("INVPICK_CONFIG") {
        return Ok(PathBuf::from(path));
    }

    let home = home_dir()
        .ok_or_else(|| anyhow::anyhow!("Failed to determine HOME directory"))?;
    Ok(home
        .join(".config")
        .join(DEFAULT_CONFIG_DIR)
        .join(CONFIG_FILE_NAME))
}
