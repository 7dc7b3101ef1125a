// SPDX-License-Identifier: MPL-2.0
//! Port definitions (traits) for dependency inversion.
//!
//! This module defines abstract interfaces that infrastructure adapters implement.
//! These traits use only domain types, ensuring the viewer core remains
//! independent of how frames are actually retrieved.
//!
//! # Available Ports
//!
//! - [`fetch`]: Frame asset retrieval
//!
//! # Design Notes
//!
//! - Traits use domain types only (no `reqwest` or `image` types)
//! - Traits are `Send + Sync` so one adapter serves concurrent fetches
//! - Methods return boxed `'static` futures so callers can spawn them

pub mod fetch;

pub use fetch::{FetchError, FrameFetcher};
