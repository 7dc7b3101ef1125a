// SPDX-License-Identifier: MPL-2.0
//! Test utilities for float comparisons and a controllable frame fetcher.
//!
//! This module re-exports the `approx` crate's assertion macro for float comparison,
//! which properly handles floating-point precision issues that `assert_eq!` cannot.

// Re-export approx macro for convenient use in tests
pub use approx::assert_abs_diff_eq;

use crate::application::port::{FetchError, FrameFetcher};
use crate::domain::viewer::FrameAsset;
use futures_util::future::{BoxFuture, FutureExt};
use std::collections::HashSet;
use std::sync::{Arc, Mutex};
use tokio::sync::Semaphore;

/// Default epsilon for f32 comparisons.
pub const F32_EPSILON: f32 = 1e-6;

/// In-memory fetcher that records every call.
///
/// Gated fetchers hold each fetch until the test releases a permit on the
/// returned semaphore, which keeps frames observably `Loading`.
#[derive(Default)]
pub struct MockFetcher {
    calls: Mutex<Vec<String>>,
    failing: Mutex<HashSet<String>>,
    gate: Option<Arc<Semaphore>>,
}

impl MockFetcher {
    /// Fetches complete as soon as they are polled.
    pub fn immediate() -> Arc<Self> {
        Arc::new(Self::default())
    }

    /// Fetches wait for one permit each.
    pub fn gated() -> (Arc<Self>, Arc<Semaphore>) {
        let gate = Arc::new(Semaphore::new(0));
        let fetcher = Self {
            gate: Some(Arc::clone(&gate)),
            ..Self::default()
        };
        (Arc::new(fetcher), gate)
    }

    /// Makes future fetches of `url` fail with HTTP 404.
    pub fn fail_url(&self, url: &str) {
        self.failing.lock().unwrap().insert(url.to_string());
    }

    /// Makes future fetches of `url` succeed again.
    pub fn heal_url(&self, url: &str) {
        self.failing.lock().unwrap().remove(url);
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    pub fn calls_for(&self, url: &str) -> usize {
        self.calls.lock().unwrap().iter().filter(|u| *u == url).count()
    }
}

impl FrameFetcher for MockFetcher {
    fn fetch(&self, url: &str) -> BoxFuture<'static, Result<FrameAsset, FetchError>> {
        self.calls.lock().unwrap().push(url.to_string());
        let fail = self.failing.lock().unwrap().contains(url);
        let gate = self.gate.clone();
        let url = url.to_string();
        async move {
            if let Some(gate) = gate {
                gate.acquire().await.expect("gate closed").forget();
            }
            if fail {
                Err(FetchError::Http(404))
            } else {
                Ok(FrameAsset::Remote(url))
            }
        }
        .boxed()
    }
}

/// Lets spawned tasks on a current-thread runtime run to their next await.
pub async fn settle() {
    for _ in 0..16 {
        tokio::task::yield_now().await;
    }
}
