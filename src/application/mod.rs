// SPDX-License-Identifier: MPL-2.0
//! Application layer - Ports between the viewer core and the outside world.
//!
//! - [`port`]: Trait definitions (interfaces) for dependency inversion
//!
//! # Dependency Rule
//!
//! - Application layer depends on domain layer (uses domain types)
//! - Infrastructure layer implements application layer ports
//! - The viewer engine only ever talks to ports
//!
//! # Example
//!
//! ```ignore
//! use orbit_lens::application::port::FrameFetcher;
//! use orbit_lens::infrastructure::http::HttpFrameFetcher;
//!
//! // Infrastructure implements the port trait
//! let fetcher: std::sync::Arc<dyn FrameFetcher> = std::sync::Arc::new(HttpFrameFetcher::new(timeout)?);
//! ```

pub mod port;
