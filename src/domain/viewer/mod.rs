// SPDX-License-Identifier: MPL-2.0
//! Viewer domain types.
//!
//! Frame identity, cache-entry states, the opaque display handle and the
//! tunable values of a viewer session.

pub mod frame;
pub mod newtypes;

// Re-export commonly used types
pub use frame::{frame_number_to_index, index_to_frame_number, wrap_index, FrameAsset, FrameState};
pub use newtypes::{AutoRotateInterval, BatchSize, Sensitivity};
