// SPDX-License-Identifier: MPL-2.0
//! Typed viewer settings derived from the persisted configuration.

use crate::config::{defaults, Config};
use crate::domain::viewer::{AutoRotateInterval, BatchSize, Sensitivity};
use std::time::Duration;

/// Which device produced a gesture's coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum InputKind {
    #[default]
    Pointer,
    Touch,
}

/// Tunables of one viewer session.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ViewerSettings {
    pub pointer_sensitivity: Sensitivity,
    pub touch_sensitivity: Sensitivity,
    pub auto_rotate_interval: AutoRotateInterval,
    pub preload_batch: BatchSize,
    /// Stream every frame in the background (`true`) or only the priority
    /// frames plus one batch (`false`).
    pub preload_all: bool,
}

impl Default for ViewerSettings {
    fn default() -> Self {
        Self {
            pointer_sensitivity: Sensitivity::default(),
            touch_sensitivity: Sensitivity::touch(),
            auto_rotate_interval: AutoRotateInterval::default(),
            preload_batch: BatchSize::default(),
            preload_all: defaults::DEFAULT_PRELOAD_ALL,
        }
    }
}

impl ViewerSettings {
    /// Converts persisted values, clamping each into its valid range.
    #[must_use]
    pub fn from_config(config: &Config) -> Self {
        let fallback = Self::default();
        Self {
            pointer_sensitivity: config
                .pointer_sensitivity
                .map_or(fallback.pointer_sensitivity, Sensitivity::new),
            touch_sensitivity: config
                .touch_sensitivity
                .map_or(fallback.touch_sensitivity, Sensitivity::new),
            auto_rotate_interval: config
                .auto_rotate_interval_ms
                .map_or(fallback.auto_rotate_interval, AutoRotateInterval::from_millis),
            preload_batch: config
                .preload_batch_size
                .map_or(fallback.preload_batch, BatchSize::new),
            preload_all: config.preload_all.unwrap_or(fallback.preload_all),
        }
    }

    /// Sensitivity for the given input modality.
    #[must_use]
    pub fn sensitivity(&self, input: InputKind) -> Sensitivity {
        match input {
            InputKind::Pointer => self.pointer_sensitivity,
            InputKind::Touch => self.touch_sensitivity,
        }
    }
}

/// HTTP request timeout from the persisted configuration.
#[must_use]
pub fn request_timeout(config: &Config) -> Duration {
    Duration::from_secs(
        config
            .request_timeout_secs
            .unwrap_or(defaults::DEFAULT_REQUEST_TIMEOUT_SECS),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_config_defaults() {
        assert_eq!(ViewerSettings::from_config(&Config::default()), ViewerSettings::default());
    }

    #[test]
    fn missing_values_fall_back_to_defaults() {
        let config = Config {
            pointer_sensitivity: None,
            touch_sensitivity: None,
            auto_rotate_interval_ms: None,
            preload_batch_size: None,
            preload_all: None,
            frame_url_template: None,
            request_timeout_secs: None,
        };
        assert_eq!(ViewerSettings::from_config(&config), ViewerSettings::default());
        assert_eq!(request_timeout(&config), Duration::from_secs(30));
    }

    #[test]
    fn out_of_range_values_are_clamped() {
        let config = Config {
            pointer_sensitivity: Some(0.0),
            auto_rotate_interval_ms: Some(1),
            preload_batch_size: Some(0),
            preload_all: Some(false),
            ..Config::default()
        };
        let settings = ViewerSettings::from_config(&config);

        assert_eq!(settings.pointer_sensitivity.px(), defaults::MIN_SENSITIVITY_PX);
        assert_eq!(settings.auto_rotate_interval.millis(), defaults::MIN_AUTO_ROTATE_INTERVAL_MS);
        assert_eq!(settings.preload_batch.value(), 1);
        assert!(!settings.preload_all);
    }

    #[test]
    fn sensitivity_follows_input_kind() {
        let settings = ViewerSettings::default();
        assert_eq!(settings.sensitivity(InputKind::Pointer).px(), 4.0);
        assert_eq!(settings.sensitivity(InputKind::Touch).px(), 3.0);
    }
}
