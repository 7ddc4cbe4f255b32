//! Error type for composing and rendering boring logs.

use std::io;

use thiserror::Error;

use crate::metrics::MetricsError;

/// Result type alias for boring log operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors surfaced by the library.
#[derive(Error, Debug)]
pub enum Error {
    /// The configured geometry is inconsistent.
    #[error("invalid form geometry: {0}")]
    Metrics(#[from] MetricsError),

    /// No usable font family could be loaded.
    #[error("failed to load fonts: {0}")]
    FontLoad(#[source] genpdf::error::Error),

    /// The PDF backend failed to lay out or encode the document.
    #[error("failed to render PDF: {0}")]
    Render(#[source] genpdf::error::Error),

    /// The rendered bytes could not be read back.
    #[error("failed to inspect rendered PDF: {0}")]
    Inspect(#[from] lopdf::Error),

    /// The configuration file is not valid JSON for a form.
    #[error("invalid configuration: {0}")]
    Config(#[from] serde_json::Error),

    /// I/O error when reading configuration or writing output.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
}
