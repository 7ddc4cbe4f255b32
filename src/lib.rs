//! Composes the one-page BoreDM boring log form.
//!
//! A [`DocumentComposer`] turns [`FormMetrics`] and [`BoringLogFields`] into a declarative
//! [`Document`] tree.  The tree is laid out once per backend: [`PdfRenderer`] produces the
//! downloadable byte stream and [`render_svg`] the on-screen preview.

pub mod builder;
pub mod composer;
pub mod config;
pub mod elements;
pub mod error;
pub mod fields;
pub mod fonts;
pub mod graphic;
pub mod layout;
pub mod metrics;
pub mod node;
pub mod preview;
pub mod render;
pub mod shell;
pub mod styles;

pub use composer::{DocumentComposer, DEFAULT_FILE_NAME};
pub use config::FormConfig;
pub use error::{Error, Result};
pub use fields::{BoringLogFields, CellColumn, LabeledCellSpec, PLACEHOLDER};
pub use metrics::FormMetrics;
pub use node::{Document, LayoutNode};
pub use preview::{host_page, render_svg, DownloadStatus};
pub use render::{PdfArtifact, PdfRenderer, PdfSummary};
