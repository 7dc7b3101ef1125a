// SPDX-License-Identifier: MPL-2.0
//! Decoded frame pixels for the domain layer.
//!
//! Pure data without any rendering-backend dependencies.

use std::sync::Arc;

/// Decoded RGBA pixels of one frame.
///
/// Renderers convert this to their own handles (a GPU texture, a canvas
/// bitmap, ...). Cloning shares the pixel buffer.
///
/// # Example
///
/// ```
/// use orbit_lens::domain::media::RawImage;
///
/// let image = RawImage::try_from_rgba(800, 600, vec![0u8; 800 * 600 * 4]).unwrap();
///
/// assert_eq!(image.width(), 800);
/// assert_eq!(image.size_bytes(), 800 * 600 * 4);
/// ```
#[derive(Debug, Clone)]
pub struct RawImage {
    width: u32,
    height: u32,
    rgba_bytes: Arc<Vec<u8>>,
}

impl RawImage {
    /// Creates a `RawImage`, or `None` if the buffer length is not
    /// `width * height * 4`.
    #[must_use]
    pub fn try_from_rgba(width: u32, height: u32, rgba_bytes: Vec<u8>) -> Option<Self> {
        let expected_len = (width as usize) * (height as usize) * 4;
        if rgba_bytes.len() != expected_len {
            return None;
        }
        Some(Self {
            width,
            height,
            rgba_bytes: Arc::new(rgba_bytes),
        })
    }

    /// Creates a `RawImage` from owned RGBA pixel data.
    ///
    /// # Panics
    ///
    /// Panics if the pixel data length doesn't match `width * height * 4`.
    #[must_use]
    pub fn from_rgba(width: u32, height: u32, rgba_bytes: Vec<u8>) -> Self {
        let len = rgba_bytes.len();
        Self::try_from_rgba(width, height, rgba_bytes).unwrap_or_else(|| {
            panic!(
                "RGBA data length mismatch: expected {}, got {len}",
                (width as usize) * (height as usize) * 4
            )
        })
    }

    /// Returns the image width in pixels.
    #[must_use]
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Returns the image height in pixels.
    #[must_use]
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Returns a reference to the RGBA pixel data.
    #[must_use]
    pub fn rgba_bytes(&self) -> &[u8] {
        &self.rgba_bytes
    }

    /// Memory held by the pixel buffer.
    #[must_use]
    pub fn size_bytes(&self) -> usize {
        self.rgba_bytes.len()
    }
}

impl PartialEq for RawImage {
    fn eq(&self, other: &Self) -> bool {
        self.width == other.width
            && self.height == other.height
            && (Arc::ptr_eq(&self.rgba_bytes, &other.rgba_bytes)
                || self.rgba_bytes == other.rgba_bytes)
    }
}

impl Eq for RawImage {}
