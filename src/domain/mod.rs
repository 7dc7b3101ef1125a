// SPDX-License-Identifier: MPL-2.0
//! Domain layer - Core viewer rules with ZERO external dependencies.
//!
//! This module contains pure domain types, value objects, and business rules.
//! It has no dependencies on external crates (except `std`) to ensure
//! testability and architectural purity.
//!
//! # Modules
//!
//! - [`media`]: Decoded pixels ([`RawImage`](media::RawImage))
//! - [`viewer`]: Frame types ([`FrameState`](viewer::FrameState),
//!   [`FrameAsset`](viewer::FrameAsset)), wraparound arithmetic and
//!   value objects ([`Sensitivity`](viewer::Sensitivity),
//!   [`AutoRotateInterval`](viewer::AutoRotateInterval), [`BatchSize`](viewer::BatchSize))

pub mod media;
pub mod viewer;
