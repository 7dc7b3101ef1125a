// SPDX-License-Identifier: MPL-2.0
//! Pass-through fetcher whose handle is the URL itself.
//!
//! For renderers (web views, image widgets with their own cache) that load
//! URLs on their own: the frame is Ready as soon as its URL is resolved.

use crate::application::port::{FetchError, FrameFetcher};
use crate::domain::viewer::FrameAsset;
use futures_util::future::{self, BoxFuture, FutureExt};

#[derive(Debug, Clone, Copy, Default)]
pub struct UrlFrameFetcher;

impl FrameFetcher for UrlFrameFetcher {
    fn fetch(&self, url: &str) -> BoxFuture<'static, Result<FrameAsset, FetchError>> {
        if url.is_empty() {
            return future::ready(Err(FetchError::InvalidUrl(String::new()))).boxed();
        }
        future::ready(Ok(FrameAsset::Remote(url.to_string()))).boxed()
    }
}
