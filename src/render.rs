//! Turns a composed [`Document`] into PDF bytes.

use std::fs;
use std::path::{Path, PathBuf};

use genpdf::error::ErrorKind;
use genpdf::{Margins, Size};
use log::{debug, info};
use lopdf::{Object, ObjectId};

use crate::builder::DocumentBuilder;
use crate::elements::{mm_from_pt, FormElement};
use crate::error::{Error, Result};
use crate::node::Document;

/// Renders documents through `genpdf`.
#[derive(Clone, Copy, Debug, Default)]
pub struct PdfRenderer;

impl PdfRenderer {
    pub fn new() -> Self {
        Self
    }

    /// Renders the document into a single-page PDF.
    ///
    /// The page takes the document's size, its padding becomes the page margins and the base
    /// font size becomes the document font size.  Content that does not fit on one page is an
    /// error rather than a second page.
    pub fn render(&self, document: &Document) -> Result<PdfArtifact> {
        let page = document.page();
        let mut pdf = DocumentBuilder::new()
            .with_title(document.title())
            .with_paper_size(Size::new(mm_from_pt(page.width), mm_from_pt(page.height)))
            .with_margins(Margins::all(mm_from_pt(page.padding)))
            .with_font_size(page.base_font_size)
            .with_max_pages(1)
            .build()
            .map_err(|err| {
                if matches!(err.kind(), ErrorKind::IoError(_)) {
                    Error::FontLoad(err)
                } else {
                    Error::Render(err)
                }
            })?;

        pdf.push(FormElement::new(document.clone()));

        let mut bytes = Vec::new();
        pdf.render(&mut bytes).map_err(Error::Render)?;
        info!(
            "rendered '{}' as {} ({} bytes)",
            document.title(),
            document.file_name(),
            bytes.len()
        );

        Ok(PdfArtifact {
            file_name: document.file_name().to_owned(),
            bytes,
        })
    }
}

/// A rendered PDF byte stream together with the name it is offered under.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PdfArtifact {
    pub file_name: String,
    pub bytes: Vec<u8>,
}

impl PdfArtifact {
    /// Writes the bytes to `directory/<file_name>` and returns the written path.
    pub fn write_to_dir(&self, directory: impl AsRef<Path>) -> Result<PathBuf> {
        let directory = directory.as_ref();
        fs::create_dir_all(directory)?;
        let path = directory.join(&self.file_name);
        fs::write(&path, &self.bytes)?;
        debug!("wrote {} bytes to {}", self.bytes.len(), path.display());
        Ok(path)
    }

    /// Parses the bytes back and reports their page structure.
    pub fn inspect(&self) -> Result<PdfSummary> {
        let document = lopdf::Document::load_mem(&self.bytes)?;
        let pages = document.get_pages();
        let media_box = match pages.values().next() {
            Some(page_id) => media_box(&document, *page_id)?,
            None => None,
        };

        Ok(PdfSummary {
            page_count: pages.len(),
            media_box,
        })
    }
}

/// Page structure of a rendered PDF.
#[derive(Clone, Debug, PartialEq)]
pub struct PdfSummary {
    pub page_count: usize,
    /// `[llx, lly, urx, ury]` of the first page in points.
    pub media_box: Option<[f64; 4]>,
}

impl PdfSummary {
    /// Width and height of the first page in points.
    pub fn page_size(&self) -> Option<(f64, f64)> {
        self.media_box.map(|[llx, lly, urx, ury]| (urx - llx, ury - lly))
    }
}

/// Looks up the media box of a page, following `/Parent` links for inherited values.
fn media_box(document: &lopdf::Document, page_id: ObjectId) -> Result<Option<[f64; 4]>> {
    let mut current = Some(page_id);
    while let Some(id) = current {
        let dictionary = document.get_object(id)?.as_dict()?;
        if let Ok(object) = dictionary.get(b"MediaBox") {
            let array = resolve(document, object)?.as_array()?;
            if array.len() != 4 {
                return Ok(None);
            }
            let mut values = [0.0; 4];
            for (slot, value) in values.iter_mut().zip(array) {
                match number(resolve(document, value)?) {
                    Some(number) => *slot = number,
                    None => return Ok(None),
                }
            }
            return Ok(Some(values));
        }
        current = dictionary.get(b"Parent").and_then(Object::as_reference).ok();
    }
    Ok(None)
}

fn resolve<'a>(document: &'a lopdf::Document, object: &'a Object) -> Result<&'a Object> {
    match object {
        Object::Reference(id) => Ok(document.get_object(*id)?),
        other => Ok(other),
    }
}

fn number(object: &Object) -> Option<f64> {
    match object {
        Object::Integer(value) => Some(*value as f64),
        Object::Real(value) => Some(f64::from(*value)),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn inspect_rejects_garbage() {
        let artifact = PdfArtifact {
            file_name: "broken.pdf".to_owned(),
            bytes: b"not a pdf".to_vec(),
        };
        assert!(matches!(artifact.inspect(), Err(Error::Inspect(_))));
    }

    #[test]
    fn page_size_comes_from_media_box() {
        let summary = PdfSummary {
            page_count: 1,
            media_box: Some([0.0, 0.0, 792.0, 612.0]),
        };
        assert_eq!(summary.page_size(), Some((792.0, 612.0)));
    }

    #[test]
    fn artifact_is_written_under_its_file_name() {
        let directory =
            std::env::temp_dir().join(format!("boring-log-render-{}", std::process::id()));
        let artifact = PdfArtifact {
            file_name: "BoreDM-B17.pdf".to_owned(),
            bytes: b"%PDF-1.3".to_vec(),
        };
        let path = artifact.write_to_dir(&directory).expect("write artifact");
        assert_eq!(path, directory.join("BoreDM-B17.pdf"));
        assert_eq!(fs::read(&path).expect("read back"), b"%PDF-1.3");
        let _ = fs::remove_dir_all(&directory);
    }
}
