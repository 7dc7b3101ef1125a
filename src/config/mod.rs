// SPDX-License-Identifier: MPL-2.0
//! This module handles the engine's configuration, including loading and saving
//! user preferences to a `settings.toml` file.
//!
//! # Examples
//!
//! ```no_run
//! use orbit_lens::config::{self, Config};
//! use std::path::PathBuf;
//!
//! // Load existing configuration
//! let mut config = config::load().unwrap_or_default();
//!
//! // Modify a setting
//! config.touch_sensitivity = Some(2.0);
//!
//! // Save the modified configuration
//! config::save(&config).expect("Failed to save config");
//!
//! // To load/save from a specific path (e.g., for testing)
//! let temp_dir = PathBuf::from("./temp_config_dir");
//! std::fs::create_dir_all(&temp_dir).unwrap();
//! let temp_file = temp_dir.join("test_settings.toml");
//! config::save_to_path(&config, &temp_file).expect("Failed to save to path");
//! let loaded_config = config::load_from_path(&temp_file).expect("Failed to load from path");
//! assert_eq!(loaded_config.touch_sensitivity, Some(2.0));
//! std::fs::remove_dir_all(&temp_dir).unwrap();
//! ```

pub mod defaults;

use crate::error::Result;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

pub use defaults::*;

const CONFIG_FILE: &str = "settings.toml";
const APP_NAME: &str = "OrbitLens";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub pointer_sensitivity: Option<f32>,
    #[serde(default)]
    pub touch_sensitivity: Option<f32>,
    #[serde(default)]
    pub auto_rotate_interval_ms: Option<u64>,
    #[serde(default)]
    pub preload_batch_size: Option<usize>,
    #[serde(default)]
    pub preload_all: Option<bool>,
    #[serde(default)]
    pub frame_url_template: Option<String>,
    #[serde(default)]
    pub request_timeout_secs: Option<u64>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            pointer_sensitivity: Some(DEFAULT_POINTER_SENSITIVITY_PX),
            touch_sensitivity: Some(DEFAULT_TOUCH_SENSITIVITY_PX),
            auto_rotate_interval_ms: Some(DEFAULT_AUTO_ROTATE_INTERVAL_MS),
            preload_batch_size: Some(DEFAULT_PRELOAD_BATCH_SIZE),
            preload_all: Some(DEFAULT_PRELOAD_ALL),
            frame_url_template: Some(DEFAULT_FRAME_URL_TEMPLATE.to_string()),
            request_timeout_secs: Some(DEFAULT_REQUEST_TIMEOUT_SECS),
        }
    }
}

impl Config {
    /// Returns the configured URL template, falling back to the default.
    #[must_use]
    pub fn frame_url_template(&self) -> &str {
        self.frame_url_template
            .as_deref()
            .unwrap_or(DEFAULT_FRAME_URL_TEMPLATE)
    }
}

fn get_default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|mut path| {
        path.push(APP_NAME);
        path.push(CONFIG_FILE);
        path
    })
}

pub fn load() -> Result<Config> {
    if let Some(path) = get_default_config_path() {
        if path.exists() {
            return load_from_path(&path);
        }
    }
    Ok(Config::default())
}

pub fn save(config: &Config) -> Result<()> {
    if let Some(path) = get_default_config_path() {
        return save_to_path(config, &path);
    }
    Ok(())
}

pub fn load_from_path(path: &Path) -> Result<Config> {
    let content = fs::read_to_string(path)?;
    match toml::from_str(&content) {
        Ok(config) => Ok(config),
        Err(err) => {
            log::warn!(
                "Ignoring unreadable settings at {}: {}",
                path.display(),
                err
            );
            Ok(Config::default())
        }
    }
}

pub fn save_to_path(config: &Config, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let content = toml::to_string_pretty(config)?;
    fs::write(path, content)?;
    Ok(())
}
