// SPDX-License-Identifier: MPL-2.0
//! Centralized default values for all configuration constants.
//!
//! This module serves as the single source of truth for default values
//! used across the engine. Constants are organized by category.
//!
//! # Categories
//!
//! - **Gesture**: Pixels of horizontal travel per frame step
//! - **Auto-rotate**: Frame-advance cadence
//! - **Preload**: Batch sizing and priority frames
//! - **Network**: Frame URL template and request timeout

// ==========================================================================
// Gesture Defaults
// ==========================================================================

/// Default pointer (mouse) sensitivity in pixels per frame.
pub const DEFAULT_POINTER_SENSITIVITY_PX: f32 = 4.0;

/// Default touch sensitivity in pixels per frame.
/// Touchpoints travel coarser than a mouse, so fewer pixels per frame.
pub const DEFAULT_TOUCH_SENSITIVITY_PX: f32 = 3.0;

/// Minimum allowed sensitivity.
pub const MIN_SENSITIVITY_PX: f32 = 1.0;

/// Maximum allowed sensitivity.
pub const MAX_SENSITIVITY_PX: f32 = 64.0;

// ==========================================================================
// Auto-rotate Defaults
// ==========================================================================

/// Default auto-rotate frame-advance interval (in milliseconds).
pub const DEFAULT_AUTO_ROTATE_INTERVAL_MS: u64 = 150;

/// Minimum auto-rotate interval (roughly one 60 Hz display frame).
pub const MIN_AUTO_ROTATE_INTERVAL_MS: u64 = 16;

/// Maximum auto-rotate interval.
pub const MAX_AUTO_ROTATE_INTERVAL_MS: u64 = 2_000;

// ==========================================================================
// Preload Defaults
// ==========================================================================

/// Frames loaded with top priority before batching begins.
pub const PRIORITY_FRAME_COUNT: usize = 3;

/// Default number of frames fetched per background batch.
pub const DEFAULT_PRELOAD_BATCH_SIZE: usize = 8;

/// Minimum batch size.
pub const MIN_PRELOAD_BATCH_SIZE: usize = 1;

/// Maximum batch size.
pub const MAX_PRELOAD_BATCH_SIZE: usize = 64;

/// Whether every frame is preloaded in the background by default.
pub const DEFAULT_PRELOAD_ALL: bool = true;

// ==========================================================================
// Network Defaults
// ==========================================================================

/// Default frame URL template.
///
/// `{product}` is replaced by the product identifier and `{frame}` by the
/// 1-based, zero-padded frame number.
pub const DEFAULT_FRAME_URL_TEMPLATE: &str =
    "https://assets.example.com/products/{product}/360/frame_{frame}.png";

/// Zero-padding width of the frame number in generated URLs.
pub const FRAME_NUMBER_PAD_WIDTH: usize = 3;

/// Default timeout for a single frame request (in seconds).
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;

/// Maximum number of frames a catalog product may declare.
pub const MAX_PRODUCT_FRAMES: u32 = 100;

// ==========================================================================
// Compile-time Validation
// ==========================================================================

const _: () = {
    // Sensitivity validation
    assert!(MIN_SENSITIVITY_PX > 0.0);
    assert!(MAX_SENSITIVITY_PX > MIN_SENSITIVITY_PX);
    assert!(DEFAULT_POINTER_SENSITIVITY_PX >= MIN_SENSITIVITY_PX);
    assert!(DEFAULT_POINTER_SENSITIVITY_PX <= MAX_SENSITIVITY_PX);
    assert!(DEFAULT_TOUCH_SENSITIVITY_PX >= MIN_SENSITIVITY_PX);
    assert!(DEFAULT_TOUCH_SENSITIVITY_PX <= MAX_SENSITIVITY_PX);

    // Auto-rotate validation
    assert!(MIN_AUTO_ROTATE_INTERVAL_MS > 0);
    assert!(MAX_AUTO_ROTATE_INTERVAL_MS >= MIN_AUTO_ROTATE_INTERVAL_MS);
    assert!(DEFAULT_AUTO_ROTATE_INTERVAL_MS >= MIN_AUTO_ROTATE_INTERVAL_MS);
    assert!(DEFAULT_AUTO_ROTATE_INTERVAL_MS <= MAX_AUTO_ROTATE_INTERVAL_MS);

    // Preload validation
    assert!(PRIORITY_FRAME_COUNT > 0);
    assert!(MIN_PRELOAD_BATCH_SIZE > 0);
    assert!(MAX_PRELOAD_BATCH_SIZE >= MIN_PRELOAD_BATCH_SIZE);
    assert!(DEFAULT_PRELOAD_BATCH_SIZE >= MIN_PRELOAD_BATCH_SIZE);
    assert!(DEFAULT_PRELOAD_BATCH_SIZE <= MAX_PRELOAD_BATCH_SIZE);

    // Network validation
    assert!(FRAME_NUMBER_PAD_WIDTH > 0);
    assert!(DEFAULT_REQUEST_TIMEOUT_SECS > 0);
    assert!(MAX_PRODUCT_FRAMES > 0);
};
