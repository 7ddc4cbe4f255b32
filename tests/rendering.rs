use boring_log::fonts;
use boring_log::shell::run_download;
use boring_log::{
    BoringLogFields, DocumentComposer, DownloadStatus, Error, FormConfig, FormMetrics, PdfRenderer,
};
use sha2::{Digest, Sha256};

const SKIP_HINT: &str =
    "fonts missing. Set BORING_LOG_FONTS_DIR or copy assets/fonts next to the binary.";

fn render_sample_pdf() -> Option<Vec<u8>> {
    if !fonts::fonts_available() {
        return None;
    }

    let document =
        DocumentComposer::new(FormMetrics::default(), BoringLogFields::sample()).compose();
    let bytes = PdfRenderer::new()
        .render(&document)
        .expect("render sample pdf")
        .bytes;

    Some(bytes)
}

fn scrub_pdf(bytes: &[u8]) -> Vec<u8> {
    fn scrub_segment(data: &mut [u8], tag: &[u8], terminator: u8) {
        let mut index = 0;
        while index + tag.len() < data.len() {
            if data[index..].starts_with(tag) {
                let mut cursor = index + tag.len();
                while cursor < data.len() {
                    let byte = data[cursor];
                    if byte == terminator {
                        break;
                    }
                    if terminator == b')' {
                        data[cursor] = b'0';
                    } else if !matches!(byte, b'<' | b'>' | b' ' | b'\n' | b'\r' | b'\t') {
                        data[cursor] = b'0';
                    }
                    cursor += 1;
                }
                index = cursor;
            } else {
                index += 1;
            }
        }
    }

    fn scrub_xml(data: &mut [u8], start: &[u8], end: &[u8]) {
        let mut offset = 0;
        while offset + start.len() < data.len() {
            let Some(start_pos) = data[offset..]
                .windows(start.len())
                .position(|window| window == start)
            else {
                break;
            };
            let start_index = offset + start_pos + start.len();
            let Some(end_pos) = data[start_index..]
                .windows(end.len())
                .position(|window| window == end)
            else {
                break;
            };
            for byte in &mut data[start_index..start_index + end_pos] {
                if !matches!(*byte, b'<' | b'>' | b'/' | b' ' | b'\n' | b'\r' | b'\t') {
                    *byte = b'0';
                }
            }
            offset = start_index + end_pos + end.len();
        }
    }

    let mut normalized = bytes.to_vec();
    for (tag, terminator) in [
        (&b"/CreationDate("[..], b')'),
        (&b"/ModDate("[..], b')'),
        (&b"/ID["[..], b']'),
        (&b"/Producer("[..], b')'),
    ] {
        scrub_segment(&mut normalized, tag, terminator);
    }
    for (start, end) in [
        (&b"<xmp:CreateDate>"[..], &b"</xmp:CreateDate>"[..]),
        (&b"<xmp:ModifyDate>"[..], &b"</xmp:ModifyDate>"[..]),
        (&b"<xmp:MetadataDate>"[..], &b"</xmp:MetadataDate>"[..]),
        (&b"<xmpMM:DocumentID>"[..], &b"</xmpMM:DocumentID>"[..]),
        (&b"<xmpMM:InstanceID>"[..], &b"</xmpMM:InstanceID>"[..]),
        (&b"<xmpMM:VersionID>"[..], &b"</xmpMM:VersionID>"[..]),
    ] {
        scrub_xml(&mut normalized, start, end);
    }
    normalized
}

fn normalized_hash(bytes: &[u8]) -> [u8; 32] {
    let digest = Sha256::digest(scrub_pdf(bytes));
    digest.into()
}

#[test]
fn renders_non_empty_output() {
    let Some(bytes) = render_sample_pdf() else {
        eprintln!("Skipping renders_non_empty_output: {SKIP_HINT}");
        return;
    };
    assert!(bytes.starts_with(b"%PDF"), "output should carry a PDF header");
}

#[test]
fn rendering_is_deterministic() {
    let (Some(bytes_a), Some(bytes_b)) = (render_sample_pdf(), render_sample_pdf()) else {
        eprintln!("Skipping rendering_is_deterministic: {SKIP_HINT}");
        return;
    };

    assert_eq!(bytes_a.len(), bytes_b.len(), "PDF sizes should match");
    assert_eq!(
        normalized_hash(&bytes_a),
        normalized_hash(&bytes_b),
        "PDF renders must be deterministic after metadata normalization"
    );
}

#[test]
fn renders_one_landscape_letter_page() {
    if !fonts::fonts_available() {
        eprintln!("Skipping renders_one_landscape_letter_page: {SKIP_HINT}");
        return;
    }

    let config = FormConfig::from_json_str(
        r#"{
            "fields": {
                "projectTitle": "Riverside Condominiums",
                "boringId": "B-17",
                "drillingFirm": "BoreDM Drilling",
                "hammerType": null
            }
        }"#,
    )
    .expect("valid config");
    let document = config.composer().compose();
    let artifact = PdfRenderer::new().render(&document).expect("render pdf");
    assert_eq!(artifact.file_name, "BoreDM-B17.pdf");

    let summary = artifact.inspect().expect("inspect pdf");
    assert_eq!(summary.page_count, 1);
    let (width, height) = summary.page_size().expect("media box");
    assert!((width - 792.0).abs() < 1.0, "width was {width}");
    assert!((height - 612.0).abs() < 1.0, "height was {height}");
}

#[test]
fn oversized_rows_fail_instead_of_spilling_onto_a_second_page() {
    if !fonts::fonts_available() {
        eprintln!(
            "Skipping oversized_rows_fail_instead_of_spilling_onto_a_second_page: {SKIP_HINT}"
        );
        return;
    }

    let metrics = FormMetrics::default().with_row_height(200.0);
    let document = DocumentComposer::new(metrics, BoringLogFields::sample()).compose();
    let err = PdfRenderer::new().render(&document).unwrap_err();
    assert!(matches!(err, Error::Render(_)), "unexpected error: {err}");
}

#[test]
fn download_reports_preparing_then_ready() {
    if !fonts::fonts_available() {
        eprintln!("Skipping download_reports_preparing_then_ready: {SKIP_HINT}");
        return;
    }

    let directory =
        std::env::temp_dir().join(format!("boring-log-download-{}", std::process::id()));
    let _ = std::fs::remove_dir_all(&directory);

    let mut statuses = Vec::new();
    let path = run_download(&FormConfig::default(), &directory, |status| {
        statuses.push(status)
    })
    .expect("download pdf");

    assert_eq!(statuses, [DownloadStatus::Preparing, DownloadStatus::Ready]);
    assert!(path.ends_with("BoreDM-B17.pdf"), "unexpected path {}", path.display());
    let bytes = std::fs::read(&path).expect("read written pdf");
    assert!(bytes.starts_with(b"%PDF"));

    let _ = std::fs::remove_dir_all(&directory);
}
