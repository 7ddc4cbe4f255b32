//! Host operations: writing the preview page and producing the download.
//!
//! The preview page is written first with the download link in its preparing state, so it can be
//! opened while the PDF is still being encoded.  Once the byte stream sits next to the page, the
//! page is rewritten with the link enabled.

use std::fs;
use std::path::{Path, PathBuf};

use log::{debug, info};

use crate::config::FormConfig;
use crate::error::Result;
use crate::node::Document;
use crate::preview::{host_page, DownloadStatus};
use crate::render::PdfRenderer;

fn write_host_page(document: &Document, out: &Path, status: DownloadStatus) -> Result<()> {
    fs::write(out, host_page(document, status))?;
    debug!("wrote preview to {} ({})", out.display(), status);
    Ok(())
}

/// Writes the preview host page to `out` and renders the PDF next to it.
///
/// The page shows the preparing state until the PDF has been written, then offers the download.
/// Returns the path of the written PDF.
pub fn run_preview(config: &FormConfig, out: impl AsRef<Path>) -> Result<PathBuf> {
    let out = out.as_ref();
    let directory = match out.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
        _ => PathBuf::from("."),
    };
    fs::create_dir_all(&directory)?;

    let document = config.composer().compose();
    write_host_page(&document, out, DownloadStatus::Preparing)?;

    let pdf_path = run_download(config, &directory, |status| {
        debug!("download link: {}", status);
    })?;
    write_host_page(&document, out, DownloadStatus::Ready)?;
    info!("wrote preview to {} with {}", out.display(), pdf_path.display());

    Ok(pdf_path)
}

/// Renders the PDF into `out_dir`, reporting progress through `on_status`.
pub fn run_download<F>(
    config: &FormConfig,
    out_dir: impl AsRef<Path>,
    mut on_status: F,
) -> Result<PathBuf>
where
    F: FnMut(DownloadStatus),
{
    on_status(DownloadStatus::Preparing);

    let document = config.composer().compose();
    let artifact = PdfRenderer::new().render(&document)?;
    let path = artifact.write_to_dir(out_dir)?;

    on_status(DownloadStatus::Ready);
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use crate::fonts;

    fn scratch_dir(name: &str) -> PathBuf {
        std::env::temp_dir().join(format!("boring-log-{}-{}", name, std::process::id()))
    }

    #[test]
    fn host_page_starts_in_preparing_state() {
        let directory = scratch_dir("host-page");
        fs::create_dir_all(&directory).expect("scratch dir");
        let out = directory.join("preview.html");
        let document = FormConfig::default().composer().compose();

        write_host_page(&document, &out, DownloadStatus::Preparing).expect("write page");
        let html = fs::read_to_string(&out).expect("read page");
        assert!(html.contains("Preparing your PDF…"));
        assert!(!html.contains("<a "));

        let _ = fs::remove_dir_all(&directory);
    }

    #[test]
    fn preview_ends_with_a_download_link() {
        let directory = scratch_dir("preview");
        let _ = fs::remove_dir_all(&directory);
        let out = directory.join("preview.html");

        let result = run_preview(&FormConfig::default(), &out);
        let html = fs::read_to_string(&out).expect("page is written before rendering");

        if fonts::fonts_available() {
            let pdf = result.expect("render preview");
            assert_eq!(pdf, directory.join("BoreDM-B17.pdf"));
            assert!(pdf.is_file());
            assert!(html.contains(r#"href="BoreDM-B17.pdf""#));
            assert!(html.contains("Download PDF"));
            assert!(!html.contains("Preparing your PDF…"));
        } else {
            assert!(matches!(result, Err(Error::FontLoad(_))));
            assert!(html.contains("Preparing your PDF…"));
        }

        let _ = fs::remove_dir_all(&directory);
    }
}
