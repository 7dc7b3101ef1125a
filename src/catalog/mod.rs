// SPDX-License-Identifier: MPL-2.0
//! Product records consumed from the catalog service.
//!
//! Only the fields the viewer needs are modelled; unknown fields (videos,
//! timestamps, ...) are ignored when deserializing.

use crate::config::defaults::{FRAME_NUMBER_PAD_WIDTH, MAX_PRODUCT_FRAMES};
use crate::media::frame_source::{FrameSource, FrameUrlTemplate};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Frame count assumed when a record omits `totalImages`.
pub const DEFAULT_TOTAL_IMAGES: u32 = 40;

fn default_total_images() -> u32 {
    DEFAULT_TOTAL_IMAGES
}

/// Errors raised when a product record cannot back a viewer session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CatalogError {
    /// `totalImages` outside `1..=100`.
    InvalidFrameCount(u32),
    /// The record has an empty `id`.
    MissingId,
}

impl fmt::Display for CatalogError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CatalogError::InvalidFrameCount(n) => write!(
                f,
                "Product frame count {} is outside 1..={}",
                n, MAX_PRODUCT_FRAMES
            ),
            CatalogError::MissingId => write!(f, "Product record has no id"),
        }
    }
}

impl std::error::Error for CatalogError {}

/// A product with a 360° frame sequence.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub sku: String,
    #[serde(default)]
    pub description: String,
    #[serde(default = "default_total_images")]
    pub total_images: u32,
    #[serde(default, rename = "images360")]
    pub images_360: Vec<String>,
}

impl Product {
    /// Checks that the record can back a viewer session.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::MissingId`] for a blank id and
    /// [`CatalogError::InvalidFrameCount`] when `totalImages` is outside
    /// `1..=100`.
    pub fn validate(&self) -> Result<(), CatalogError> {
        if self.id.trim().is_empty() {
            return Err(CatalogError::MissingId);
        }
        if !(1..=MAX_PRODUCT_FRAMES).contains(&self.total_images) {
            return Err(CatalogError::InvalidFrameCount(self.total_images));
        }
        Ok(())
    }

    /// Builds the frame source for this product.
    ///
    /// The stored `images360` list is used when it has exactly
    /// `totalImages` entries; otherwise URLs are generated from `template`.
    ///
    /// # Errors
    ///
    /// Same as [`validate`](Self::validate).
    pub fn frame_source(&self, template: &str) -> Result<FrameSource, CatalogError> {
        self.validate()?;
        let total = self.total_images as usize;

        if self.images_360.len() == total {
            return Ok(FrameSource::from_urls(self.images_360.clone()));
        }

        if !self.images_360.is_empty() {
            log::warn!(
                "Product {} lists {} images for {} frames, regenerating URLs",
                self.id,
                self.images_360.len(),
                total
            );
        }
        let template = FrameUrlTemplate::new(template, self.id.as_str())
            .with_pad_width(FRAME_NUMBER_PAD_WIDTH);
        Ok(FrameSource::from_template(template, total))
    }
}
