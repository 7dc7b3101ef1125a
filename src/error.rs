// SPDX-License-Identifier: MPL-2.0
use crate::application::port::FetchError;
use crate::catalog::CatalogError;
use std::fmt;

#[derive(Debug, Clone)]
pub enum Error {
    Io(String),
    Config(String),
    Viewer(ViewerError),
    Fetch(FetchError),
    Catalog(CatalogError),
}

/// Errors raised by viewer sessions (engine and preloader).
///
/// Cloneable so a single frame-load outcome can be observed by every
/// party awaiting the same fetch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ViewerError {
    /// Frame index outside `[0, total)`.
    InvalidIndex { index: usize, total: usize },

    /// The asset for a frame could not be fetched or decoded.
    FetchFailed { index: usize, reason: String },

    /// The session was disposed; the caller has a lifecycle bug.
    Disposed,

    /// A session cannot be created without frames.
    NoFrames,
}

impl fmt::Display for ViewerError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ViewerError::InvalidIndex { index, total } => {
                write!(f, "Invalid frame index {} (session has {} frames)", index, total)
            }
            ViewerError::FetchFailed { index, reason } => {
                write!(f, "Frame {} failed to load: {}", index + 1, reason)
            }
            ViewerError::Disposed => write!(f, "Viewer session has been disposed"),
            ViewerError::NoFrames => write!(f, "Viewer session requires at least one frame"),
        }
    }
}

impl std::error::Error for ViewerError {}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Io(e) => write!(f, "I/O Error: {}", e),
            Error::Config(e) => write!(f, "Config Error: {}", e),
            Error::Viewer(e) => write!(f, "Viewer Error: {}", e),
            Error::Fetch(e) => write!(f, "Fetch Error: {}", e),
            Error::Catalog(e) => write!(f, "Catalog Error: {}", e),
        }
    }
}

impl std::error::Error for Error {}

impl From<ViewerError> for Error {
    fn from(err: ViewerError) -> Self {
        Error::Viewer(err)
    }
}

impl From<FetchError> for Error {
    fn from(err: FetchError) -> Self {
        Error::Fetch(err)
    }
}

impl From<CatalogError> for Error {
    fn from(err: CatalogError) -> Self {
        Error::Catalog(err)
    }
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Error::Io(err.to_string())
    }
}

impl From<toml::de::Error> for Error {
    fn from(err: toml::de::Error) -> Self {
        Error::Config(err.to_string())
    }
}

impl From<toml::ser::Error> for Error {
    fn from(err: toml::ser::Error) -> Self {
        Error::Config(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, Error>;
