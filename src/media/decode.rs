// SPDX-License-Identifier: MPL-2.0
//! Decoding of encoded frame payloads (PNG, JPEG, WebP, ...) into RGBA pixels.

use crate::application::port::FetchError;
use crate::domain::media::RawImage;
use image_rs::GenericImageView;

/// Decodes an encoded image into a [`RawImage`].
///
/// This is CPU-bound; async callers run it on a blocking thread.
///
/// # Errors
///
/// Returns [`FetchError::Decode`] if the bytes are not a supported image or
/// decode to empty dimensions.
pub fn decode_frame(bytes: &[u8]) -> Result<RawImage, FetchError> {
    let img = image_rs::load_from_memory(bytes).map_err(|e| FetchError::Decode(e.to_string()))?;

    let (width, height) = img.dimensions();
    if width == 0 || height == 0 {
        return Err(FetchError::Decode(format!(
            "empty dimensions {width}x{height}"
        )));
    }

    let pixels = img.to_rgba8().into_vec();
    RawImage::try_from_rgba(width, height, pixels)
        .ok_or_else(|| FetchError::Decode("pixel buffer size mismatch".into()))
}

/// Decodes on Tokio's blocking pool so the event loop keeps running.
///
/// # Errors
///
/// Returns [`FetchError::Decode`] if decoding fails or the blocking task dies.
pub async fn decode_frame_blocking(bytes: Vec<u8>) -> Result<RawImage, FetchError> {
    tokio::task::spawn_blocking(move || decode_frame(&bytes))
        .await
        .unwrap_or_else(|e| Err(FetchError::Decode(format!("decode task failed: {e}"))))
}

#[cfg(test)]
pub(crate) fn encode_test_png(width: u32, height: u32) -> Vec<u8> {
    let buffer = image_rs::RgbaImage::from_pixel(width, height, image_rs::Rgba([200, 10, 10, 255]));
    let mut bytes = std::io::Cursor::new(Vec::new());
    buffer
        .write_to(&mut bytes, image_rs::ImageFormat::Png)
        .expect("encoding a test PNG should succeed");
    bytes.into_inner()
}
