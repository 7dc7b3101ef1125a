// SPDX-License-Identifier: MPL-2.0
//! Frame media: where frame URLs come from, how payloads are decoded, and
//! the per-session cache that loads them.

pub mod decode;
pub mod frame_source;
pub mod preloader;

// Re-export commonly used types
pub use decode::{decode_frame, decode_frame_blocking};
pub use frame_source::{FrameSource, FrameUrlTemplate, UrlResolver};
pub use preloader::{FrameLoad, FramePreloader, PreloadStats};
