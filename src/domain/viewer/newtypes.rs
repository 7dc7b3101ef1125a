// SPDX-License-Identifier: MPL-2.0
//! Viewer newtypes.
//!
//! This module provides type-safe wrappers for tunable viewer values,
//! ensuring they are always within valid ranges.

use crate::config::defaults;
use std::time::Duration;

// =============================================================================
// Sensitivity
// =============================================================================

/// Horizontal travel in pixels required for one frame step.
///
/// Guaranteed to be within `MIN_SENSITIVITY_PX..=MAX_SENSITIVITY_PX`, so the
/// gesture math never divides by zero or a negative value.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Sensitivity(f32);

impl Sensitivity {
    /// Creates a new sensitivity, clamping the value to the valid range.
    ///
    /// Non-finite input falls back to the pointer default.
    #[must_use]
    pub fn new(px_per_frame: f32) -> Self {
        if !px_per_frame.is_finite() {
            return Self::default();
        }
        Self(px_per_frame.clamp(defaults::MIN_SENSITIVITY_PX, defaults::MAX_SENSITIVITY_PX))
    }

    /// Default sensitivity for touch input.
    #[must_use]
    pub fn touch() -> Self {
        Self(defaults::DEFAULT_TOUCH_SENSITIVITY_PX)
    }

    /// Returns the raw pixel value.
    #[must_use]
    pub fn px(self) -> f32 {
        self.0
    }
}

impl Default for Sensitivity {
    fn default() -> Self {
        Self(defaults::DEFAULT_POINTER_SENSITIVITY_PX)
    }
}

// =============================================================================
// AutoRotateInterval
// =============================================================================

/// Cadence of the auto-rotate frame advance.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AutoRotateInterval(u64);

impl AutoRotateInterval {
    /// Creates a new interval in milliseconds, clamping to valid range.
    #[must_use]
    pub fn from_millis(ms: u64) -> Self {
        Self(ms.clamp(
            defaults::MIN_AUTO_ROTATE_INTERVAL_MS,
            defaults::MAX_AUTO_ROTATE_INTERVAL_MS,
        ))
    }

    /// Returns the value in milliseconds.
    #[must_use]
    pub fn millis(self) -> u64 {
        self.0
    }

    /// Returns the interval as a Duration.
    #[must_use]
    pub fn as_duration(self) -> Duration {
        Duration::from_millis(self.0)
    }
}

impl Default for AutoRotateInterval {
    fn default() -> Self {
        Self(defaults::DEFAULT_AUTO_ROTATE_INTERVAL_MS)
    }
}

// =============================================================================
// BatchSize
// =============================================================================

/// Number of frames fetched together in one background preload batch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BatchSize(usize);

impl BatchSize {
    /// Creates a new batch size, clamping to valid range.
    #[must_use]
    pub fn new(value: usize) -> Self {
        Self(value.clamp(
            defaults::MIN_PRELOAD_BATCH_SIZE,
            defaults::MAX_PRELOAD_BATCH_SIZE,
        ))
    }

    /// Returns the value as usize.
    #[must_use]
    pub fn value(self) -> usize {
        self.0
    }
}

impl Default for BatchSize {
    fn default() -> Self {
        Self(defaults::DEFAULT_PRELOAD_BATCH_SIZE)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sensitivity_clamps_to_valid_range() {
        assert_eq!(Sensitivity::new(0.0).px(), defaults::MIN_SENSITIVITY_PX);
        assert_eq!(Sensitivity::new(-3.0).px(), defaults::MIN_SENSITIVITY_PX);
        assert_eq!(Sensitivity::new(1000.0).px(), defaults::MAX_SENSITIVITY_PX);
        assert_eq!(Sensitivity::new(5.0).px(), 5.0);
    }

    #[test]
    fn sensitivity_rejects_non_finite_values() {
        assert_eq!(Sensitivity::new(f32::NAN), Sensitivity::default());
        assert_eq!(Sensitivity::new(f32::INFINITY), Sensitivity::default());
    }

    #[test]
    fn touch_is_more_sensitive_than_pointer() {
        assert!(Sensitivity::touch().px() < Sensitivity::default().px());
    }

    #[test]
    fn auto_rotate_interval_clamps_and_converts() {
        assert_eq!(AutoRotateInterval::from_millis(0).millis(), 16);
        assert_eq!(AutoRotateInterval::from_millis(60_000).millis(), 2_000);
        assert_eq!(
            AutoRotateInterval::from_millis(150).as_duration(),
            Duration::from_millis(150)
        );
    }

    #[test]
    fn batch_size_is_never_zero() {
        assert_eq!(BatchSize::new(0).value(), 1);
        assert_eq!(BatchSize::new(5).value(), 5);
        assert_eq!(BatchSize::new(10_000).value(), defaults::MAX_PRELOAD_BATCH_SIZE);
    }
}
