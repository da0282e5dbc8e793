//! Minimal in-memory PDFs for tests

/// Build a PDF with `page_count` blank pages.
///
/// Each page dictionary carries a `/TestIndex` entry holding its original
/// 1-based position so tests can follow pages through reordering.
pub(crate) fn blank_pdf(page_count: u32) -> Vec<u8> {
    pdf_with_page_entries(page_count, "")
}

/// Like [`blank_pdf`], with `entries` spliced into every page dictionary
pub(crate) fn pdf_with_page_entries(page_count: u32, entries: &str) -> Vec<u8> {
    let kids = (0..page_count)
        .map(|i| format!("{} 0 R", i + 3))
        .collect::<Vec<_>>()
        .join(" ");

    let mut objects = vec![
        "<< /Type /Catalog /Pages 2 0 R >>".to_string(),
        format!("<< /Type /Pages /Kids [{}] /Count {} >>", kids, page_count),
    ];
    for i in 0..page_count {
        objects.push(format!(
            "<< /Type /Page /Parent 2 0 R /MediaBox [0 0 612 792] /TestIndex {} {} >>",
            i + 1,
            entries
        ));
    }

    let mut out = b"%PDF-1.4\n".to_vec();
    let mut offsets = Vec::with_capacity(objects.len());
    for (i, body) in objects.iter().enumerate() {
        offsets.push(out.len());
        out.extend_from_slice(format!("{} 0 obj\n{}\nendobj\n", i + 1, body).as_bytes());
    }

    let xref_offset = out.len();
    out.extend_from_slice(format!("xref\n0 {}\n", objects.len() + 1).as_bytes());
    out.extend_from_slice(b"0000000000 65535 f \n");
    for offset in offsets {
        out.extend_from_slice(format!("{:010} 00000 n \n", offset).as_bytes());
    }
    out.extend_from_slice(
        format!(
            "trailer\n<< /Size {} /Root 1 0 R >>\nstartxref\n{}\n%%EOF\n",
            objects.len() + 1,
            xref_offset
        )
        .as_bytes(),
    );
    out
}
