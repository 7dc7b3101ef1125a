// SPDX-License-Identifier: MPL-2.0
//! Frame fetching port definition.
//!
//! This module defines the [`FrameFetcher`] trait that turns an opaque frame
//! URL into a ready-to-display [`FrameAsset`]. Infrastructure adapters
//! implement it for HTTP, the local filesystem, or renderers that only need
//! the URL.

use crate::domain::viewer::FrameAsset;
use futures_util::future::BoxFuture;
use std::fmt;

// =============================================================================
// FetchError
// =============================================================================

/// Errors that can occur while fetching one frame asset.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FetchError {
    /// The server answered with a non-success status code.
    Http(u16),

    /// The request could not be completed (DNS, TLS, timeout, reset...).
    Network(String),

    /// The payload is not a decodable image.
    Decode(String),

    /// A local file could not be read.
    Io(String),

    /// The URL cannot be handled by this fetcher.
    InvalidUrl(String),
}

impl fmt::Display for FetchError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FetchError::Http(status) => write!(f, "HTTP status {status}"),
            FetchError::Network(msg) => write!(f, "Network error: {msg}"),
            FetchError::Decode(msg) => write!(f, "Decode error: {msg}"),
            FetchError::Io(msg) => write!(f, "I/O error: {msg}"),
            FetchError::InvalidUrl(url) => write!(f, "Unsupported URL: {url}"),
        }
    }
}

impl std::error::Error for FetchError {}

// =============================================================================
// FrameFetcher Trait
// =============================================================================

/// Port for fetching frame assets.
///
/// The returned future must be `'static` so the preloader can drive it on a
/// spawned task; implementations clone whatever they need out of `self`.
///
/// # Thread Safety
///
/// Implementations must be `Send + Sync`: one fetcher serves every in-flight
/// request of a session.
///
/// # Example
///
/// ```
/// use futures_util::future::{BoxFuture, FutureExt};
/// use orbit_lens::application::port::{FetchError, FrameFetcher};
/// use orbit_lens::domain::viewer::FrameAsset;
///
/// struct Echo;
///
/// impl FrameFetcher for Echo {
///     fn fetch(&self, url: &str) -> BoxFuture<'static, Result<FrameAsset, FetchError>> {
///         let url = url.to_string();
///         async move { Ok(FrameAsset::Remote(url)) }.boxed()
///     }
/// }
/// ```
pub trait FrameFetcher: Send + Sync {
    /// Fetches the asset behind `url`.
    ///
    /// # Errors
    ///
    /// Returns a [`FetchError`] if the asset cannot be retrieved or decoded.
    fn fetch(&self, url: &str) -> BoxFuture<'static, Result<FrameAsset, FetchError>>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fetch_error_display() {
        assert_eq!(format!("{}", FetchError::Http(404)), "HTTP status 404");
        assert!(format!("{}", FetchError::Network("timed out".into())).contains("timed out"));
        assert!(format!("{}", FetchError::Decode("bad header".into())).contains("bad header"));
        assert!(format!("{}", FetchError::InvalidUrl("ftp://x".into())).contains("ftp://x"));
    }
}
