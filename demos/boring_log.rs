use std::error::Error;

use boring_log::{
    host_page, BoringLogFields, DocumentComposer, DownloadStatus, FormMetrics, PdfRenderer,
};

fn main() -> Result<(), Box<dyn Error>> {
    let mut fields = BoringLogFields::sample();
    fields.boring_depth = Some("25 ft".to_owned());

    let document = DocumentComposer::new(FormMetrics::default(), fields).compose();
    let pdf = PdfRenderer::new().render(&document)?;
    std::fs::write(&pdf.file_name, &pdf.bytes)?;
    std::fs::write("preview.html", host_page(&document, DownloadStatus::Ready))?;

    let summary = pdf.inspect()?;
    println!(
        "Generated {} ({} bytes, {} page(s)) and preview.html",
        pdf.file_name,
        pdf.bytes.len(),
        summary.page_count
    );
    Ok(())
}
