// SPDX-License-Identifier: MPL-2.0
//! HTTP frame fetcher.
//!
//! Downloads frames from the asset host and decodes them to RGBA. The asset
//! host owns resizing and format negotiation; this adapter only moves bytes.

use crate::application::port::{FetchError, FrameFetcher};
use crate::domain::viewer::FrameAsset;
use crate::media::decode::decode_frame_blocking;
use futures_util::future::{BoxFuture, FutureExt};
use std::time::Duration;

const USER_AGENT: &str = concat!("OrbitLens/", env!("CARGO_PKG_VERSION"));

/// Fetches frames over HTTP(S) with a shared connection pool.
#[derive(Debug, Clone)]
pub struct HttpFrameFetcher {
    client: reqwest::Client,
}

impl HttpFrameFetcher {
    /// Creates a fetcher whose requests give up after `timeout`.
    ///
    /// # Errors
    ///
    /// Returns [`FetchError::Network`] if the TLS backend cannot be initialized.
    pub fn new(timeout: Duration) -> Result<Self, FetchError> {
        let client = reqwest::Client::builder()
            .redirect(reqwest::redirect::Policy::limited(10))
            .user_agent(USER_AGENT)
            .timeout(timeout)
            .build()
            .map_err(|e| FetchError::Network(e.to_string()))?;
        Ok(Self { client })
    }

    /// Returns whether this fetcher can handle `url`.
    #[must_use]
    pub fn supports(url: &str) -> bool {
        url.starts_with("http://") || url.starts_with("https://")
    }
}

async fn fetch_frame(client: reqwest::Client, url: String) -> Result<FrameAsset, FetchError> {
    if !HttpFrameFetcher::supports(&url) {
        return Err(FetchError::InvalidUrl(url));
    }

    let response = client
        .get(&url)
        .send()
        .await
        .map_err(|e| FetchError::Network(e.to_string()))?;

    let status = response.status();
    if !status.is_success() {
        return Err(FetchError::Http(status.as_u16()));
    }

    let bytes = response
        .bytes()
        .await
        .map_err(|e| FetchError::Network(e.to_string()))?;
    log::debug!("Fetched {} ({} bytes)", url, bytes.len());

    let image = decode_frame_blocking(bytes.to_vec()).await?;
    Ok(FrameAsset::Bitmap(image))
}

impl FrameFetcher for HttpFrameFetcher {
    fn fetch(&self, url: &str) -> BoxFuture<'static, Result<FrameAsset, FetchError>> {
        fetch_frame(self.client.clone(), url.to_string()).boxed()
    }
}
