// SPDX-License-Identifier: MPL-2.0
//! `orbit_lens` is the engine behind an interactive 360° product viewer.
//!
//! A product is photographed as a loop of still frames; the viewer swaps
//! them in response to horizontal drags, a scrub slider or an auto-rotate
//! timer. This crate owns the frame state machine, the gesture-to-frame
//! mapping and the prioritized frame preloading, and leaves rendering to
//! the host UI.

#![doc(html_root_url = "https://docs.rs/orbit_lens/0.3.0")]

pub mod application;
pub mod catalog;
pub mod config;
pub mod domain;
pub mod error;
pub mod infrastructure;
pub mod media;
pub mod viewer;

#[cfg(test)]
pub(crate) mod test_utils;
