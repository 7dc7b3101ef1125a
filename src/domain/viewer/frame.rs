// SPDX-License-Identifier: MPL-2.0
//! Frame identity and readiness types.
//!
//! Frames are 1-based in everything a user sees (slider, counter, events)
//! and 0-based indices internally. The conversion helpers here are the only
//! place that arithmetic lives.

use crate::domain::media::RawImage;

/// Load state of one frame's cache entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrameState {
    /// Nobody asked for this frame yet.
    NotRequested,
    /// A fetch is in flight.
    Loading,
    /// The asset is cached and may be displayed.
    Ready,
    /// The last fetch failed. Only an explicit new request retries it.
    Failed,
}

impl FrameState {
    /// Returns `true` once a fetch has finished, successfully or not.
    #[must_use]
    pub fn is_settled(self) -> bool {
        matches!(self, FrameState::Ready | FrameState::Failed)
    }
}

/// Ready-to-display handle for one frame.
///
/// The engine never looks inside; only the final render step does.
/// Clones are cheap (pixel data is reference-counted).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FrameAsset {
    /// Decoded RGBA pixels, for renderers that upload bitmaps or textures.
    Bitmap(RawImage),
    /// The resolved URL, for renderers that fetch and cache images themselves.
    Remote(String),
}

impl FrameAsset {
    /// Returns the decoded image, if this handle carries one.
    #[must_use]
    pub fn as_bitmap(&self) -> Option<&RawImage> {
        match self {
            FrameAsset::Bitmap(image) => Some(image),
            FrameAsset::Remote(_) => None,
        }
    }
}

/// Applies a signed step to `current`, wrapping modulo `total`.
///
/// Returns 0 when `total` is 0.
#[must_use]
#[allow(clippy::cast_possible_truncation, clippy::cast_possible_wrap, clippy::cast_sign_loss)]
pub fn wrap_index(current: usize, step: i64, total: usize) -> usize {
    if total == 0 {
        return 0;
    }
    let shift = step.rem_euclid(total as i64) as usize;
    (current % total + shift) % total
}

/// Converts any 1-based frame number into a 0-based index, wrapping
/// out-of-range numbers (including 0 and negatives) around the loop.
#[must_use]
#[allow(clippy::cast_possible_truncation, clippy::cast_possible_wrap, clippy::cast_sign_loss)]
pub fn frame_number_to_index(frame: i64, total: usize) -> usize {
    if total == 0 {
        return 0;
    }
    let total = total as i64;
    (frame.rem_euclid(total) - 1).rem_euclid(total) as usize
}

/// Converts a 0-based index into the 1-based frame number shown to users.
#[must_use]
#[allow(clippy::cast_possible_truncation)]
pub fn index_to_frame_number(index: usize) -> u32 {
    (index as u32).saturating_add(1)
}
