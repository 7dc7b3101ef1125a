// SPDX-License-Identifier: MPL-2.0
//! Infrastructure layer adapters.
//!
//! This module contains concrete implementations of the port traits defined in
//! `application::port`. These adapters wrap external dependencies like
//! `reqwest`, the `image` decoders, and system I/O.
//!
//! # Available Adapters
//!
//! - [`http`]: Frames downloaded from the asset host (implements [`FrameFetcher`])
//! - [`fs`]: Frames read from local disk (implements [`FrameFetcher`])
//! - [`passthrough`]: URL-only handles for self-loading renderers
//!
//! [`FrameFetcher`]: crate::application::port::FrameFetcher

pub mod fs;
pub mod http;
pub mod passthrough;

// Re-export main types for convenience
pub use fs::FsFrameFetcher;
pub use http::HttpFrameFetcher;
pub use passthrough::UrlFrameFetcher;
