// SPDX-License-Identifier: MPL-2.0
//! Frame URL generation strategies.
//!
//! A [`FrameSource`] fixes how many frames a session has and maps every
//! 0-based frame index to the URL of its asset. The engine never builds URLs
//! itself.

use crate::config::defaults::FRAME_NUMBER_PAD_WIDTH;
use std::fmt;
use std::sync::Arc;

/// Deterministic `index -> URL` formatter keyed by a product identifier.
///
/// `{product}` in the pattern is replaced by the product id and `{frame}` by
/// the 1-based frame number, zero-padded to `pad_width` digits.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FrameUrlTemplate {
    pattern: String,
    product_id: String,
    pad_width: usize,
}

impl FrameUrlTemplate {
    #[must_use]
    pub fn new(pattern: impl Into<String>, product_id: impl Into<String>) -> Self {
        Self {
            pattern: pattern.into(),
            product_id: product_id.into(),
            pad_width: FRAME_NUMBER_PAD_WIDTH,
        }
    }

    /// Overrides the zero-padding width of the frame number.
    #[must_use]
    pub fn with_pad_width(mut self, pad_width: usize) -> Self {
        self.pad_width = pad_width;
        self
    }

    /// Formats the URL for a 0-based frame index.
    #[must_use]
    pub fn format(&self, index: usize) -> String {
        let frame = format!("{:0width$}", index + 1, width = self.pad_width);
        self.pattern
            .replace("{product}", &self.product_id)
            .replace("{frame}", &frame)
    }
}

/// Caller-supplied pure URL resolver.
pub type UrlResolver = Arc<dyn Fn(usize) -> String + Send + Sync>;

/// Where a session's frame URLs come from.
#[derive(Clone)]
pub enum FrameSource {
    /// An explicit list; the list length is the frame count.
    Urls(Vec<String>),
    /// A product-keyed template over `total` frames.
    Template { template: FrameUrlTemplate, total: usize },
    /// A caller-supplied function over `total` frames.
    Custom { resolver: UrlResolver, total: usize },
}

impl FrameSource {
    #[must_use]
    pub fn from_urls(urls: Vec<String>) -> Self {
        FrameSource::Urls(urls)
    }

    #[must_use]
    pub fn from_template(template: FrameUrlTemplate, total: usize) -> Self {
        FrameSource::Template { template, total }
    }

    pub fn from_fn<F>(total: usize, resolver: F) -> Self
    where
        F: Fn(usize) -> String + Send + Sync + 'static,
    {
        FrameSource::Custom {
            resolver: Arc::new(resolver),
            total,
        }
    }

    /// Number of frames in the sequence.
    #[must_use]
    pub fn total_frames(&self) -> usize {
        match self {
            FrameSource::Urls(urls) => urls.len(),
            FrameSource::Template { total, .. } | FrameSource::Custom { total, .. } => *total,
        }
    }

    /// Resolves the URL of a 0-based frame index, or `None` when out of range.
    #[must_use]
    pub fn url_for(&self, index: usize) -> Option<String> {
        if index >= self.total_frames() {
            return None;
        }
        match self {
            FrameSource::Urls(urls) => urls.get(index).cloned(),
            FrameSource::Template { template, .. } => Some(template.format(index)),
            FrameSource::Custom { resolver, .. } => Some(resolver(index)),
        }
    }

    /// Materializes every URL, in frame order.
    #[must_use]
    pub fn urls(&self) -> Vec<String> {
        (0..self.total_frames())
            .filter_map(|index| self.url_for(index))
            .collect()
    }
}

impl fmt::Debug for FrameSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FrameSource::Urls(urls) => f.debug_tuple("Urls").field(&urls.len()).finish(),
            FrameSource::Template { template, total } => f
                .debug_struct("Template")
                .field("template", template)
                .field("total", total)
                .finish(),
            FrameSource::Custom { total, .. } => {
                f.debug_struct("Custom").field("total", total).finish_non_exhaustive()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn template_pads_one_based_frame_number() {
        let template = FrameUrlTemplate::new(
            "https://cdn.example.com/{product}/360/truck_{frame}.png",
            "grille-001",
        );
        assert_eq!(
            template.format(0),
            "https://cdn.example.com/grille-001/360/truck_001.png"
        );
        assert_eq!(
            template.format(39),
            "https://cdn.example.com/grille-001/360/truck_040.png"
        );
    }

    #[test]
    fn custom_pad_width() {
        let template = FrameUrlTemplate::new("{frame}.jpg", "p").with_pad_width(2);
        assert_eq!(template.format(4), "05.jpg");
    }

    #[test]
    fn url_list_defines_total_and_bounds() {
        let source = FrameSource::from_urls(vec!["a".into(), "b".into()]);
        assert_eq!(source.total_frames(), 2);
        assert_eq!(source.url_for(1).as_deref(), Some("b"));
        assert!(source.url_for(2).is_none());
    }

    #[test]
    fn template_source_respects_total() {
        let source = FrameSource::from_template(FrameUrlTemplate::new("{product}/{frame}", "x"), 16);
        assert_eq!(source.total_frames(), 16);
        assert_eq!(source.url_for(15).as_deref(), Some("x/016"));
        assert!(source.url_for(16).is_none());
        assert_eq!(source.urls().len(), 16);
    }

    #[test]
    fn custom_resolver_is_used() {
        let source = FrameSource::from_fn(3, |i| format!("mem://{i}"));
        assert_eq!(source.url_for(2).as_deref(), Some("mem://2"));
        assert!(format!("{source:?}").contains("Custom"));
    }
}
