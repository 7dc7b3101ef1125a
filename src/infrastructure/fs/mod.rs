// SPDX-License-Identifier: MPL-2.0
//! Local filesystem frame fetcher.
//!
//! Serves frames rendered to disk (plain paths or `file://` URLs), e.g. for
//! offline kiosks and tests.

use crate::application::port::{FetchError, FrameFetcher};
use crate::domain::viewer::FrameAsset;
use crate::media::decode::decode_frame;
use futures_util::future::{BoxFuture, FutureExt};
use std::path::PathBuf;

/// Reads and decodes frames from the local filesystem.
#[derive(Debug, Clone, Copy, Default)]
pub struct FsFrameFetcher;

impl FsFrameFetcher {
    /// Creates a new filesystem fetcher.
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

/// Maps a `file://` URL or plain path to a filesystem path.
fn to_path(url: &str) -> Result<PathBuf, FetchError> {
    if let Some(rest) = url.strip_prefix("file://") {
        return Ok(PathBuf::from(rest));
    }
    if url.contains("://") {
        return Err(FetchError::InvalidUrl(url.to_string()));
    }
    Ok(PathBuf::from(url))
}

impl FrameFetcher for FsFrameFetcher {
    fn fetch(&self, url: &str) -> BoxFuture<'static, Result<FrameAsset, FetchError>> {
        let path = to_path(url);
        async move {
            let path = path?;
            let image = tokio::task::spawn_blocking(move || {
                let bytes = std::fs::read(&path)
                    .map_err(|e| FetchError::Io(format!("{}: {e}", path.display())))?;
                decode_frame(&bytes)
            })
            .await
            .unwrap_or_else(|e| Err(FetchError::Io(format!("read task failed: {e}"))))?;
            Ok(FrameAsset::Bitmap(image))
        }
        .boxed()
    }
}
