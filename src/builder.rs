//! Construction of `genpdf` documents sized and decorated for the form.

use genpdf::error::{Error, ErrorKind};
use genpdf::style;
use genpdf::{self, Margins, PageDecorator, Size};
use log::debug;

use crate::fonts;

/// Builder for `genpdf::Document` instances that hold exactly the pages they are allowed to.
pub struct DocumentBuilder {
    title: Option<String>,
    paper_size: Option<Size>,
    margins: Option<Margins>,
    font_size: Option<u8>,
    max_pages: usize,
}

impl Default for DocumentBuilder {
    fn default() -> Self {
        Self {
            title: None,
            paper_size: None,
            margins: None,
            font_size: None,
            max_pages: 1,
        }
    }
}

impl DocumentBuilder {
    /// Creates a new single-page builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the title stored in the document metadata.
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Sets the paper size used for newly created documents.
    pub fn with_paper_size(mut self, paper_size: impl Into<Size>) -> Self {
        self.paper_size = Some(paper_size.into());
        self
    }

    /// Sets the margins applied through the page decorator.
    pub fn with_margins(mut self, margins: impl Into<Margins>) -> Self {
        self.margins = Some(margins.into());
        self
    }

    /// Sets the default font size.
    pub fn with_font_size(mut self, font_size: u8) -> Self {
        self.font_size = Some(font_size);
        self
    }

    /// Sets how many pages the document may grow to before rendering fails.
    pub fn with_max_pages(mut self, max_pages: usize) -> Self {
        self.max_pages = max_pages;
        self
    }

    /// Builds a fully configured `genpdf::Document` instance.
    pub fn build(self) -> Result<genpdf::Document, Error> {
        let font_family = fonts::default_font_family()?;
        let mut document = genpdf::Document::new(font_family);

        if let Some(title) = self.title {
            document.set_title(title);
        }

        if let Some(paper_size) = self.paper_size {
            document.set_paper_size(paper_size);
        }

        if let Some(font_size) = self.font_size {
            document.set_font_size(font_size);
        }

        let decorator = BoundedPageDecorator::new(self.margins, self.max_pages);
        document.set_page_decorator(decorator);

        Ok(document)
    }
}

struct BoundedPageDecorator {
    page: usize,
    margins: Option<Margins>,
    max_pages: usize,
}

impl BoundedPageDecorator {
    fn new(margins: Option<Margins>, max_pages: usize) -> Self {
        Self {
            page: 0,
            margins,
            max_pages,
        }
    }
}

impl PageDecorator for BoundedPageDecorator {
    fn decorate_page<'a>(
        &mut self,
        _context: &genpdf::Context,
        mut area: genpdf::render::Area<'a>,
        _style: style::Style,
    ) -> Result<genpdf::render::Area<'a>, Error> {
        self.page += 1;
        if self.page > self.max_pages {
            return Err(Error::new(
                format!(
                    "Content does not fit into {} page(s); page {} was requested",
                    self.max_pages, self.page
                ),
                ErrorKind::PageSizeExceeded,
            ));
        }

        if let Some(margins) = self.margins {
            area.add_margins(margins);
        }
        debug!("decorated page {} of at most {}", self.page, self.max_pages);

        Ok(area)
    }
}
