use booklet_layout::{
    BookletInput, BookletOptions, BookletStatistics, BuiltinMetrics, LayoutContext,
    layout_booklet, render_booklet,
};
use std::path::Path;

use crate::canvas::PdfCanvas;
use crate::types::Result;

const DOCUMENT_TITLE: &str = "Meeting List";

/// Lay out, render and write the booklet to `output_path`
///
/// The file is only written once the whole document has been produced, so a
/// failed run never leaves a partial PDF behind.
pub async fn generate_pdf(
    input: &BookletInput,
    options: &BookletOptions,
    output_path: impl AsRef<Path>,
) -> Result<BookletStatistics> {
    let input = input.clone();
    let options = options.clone();
    let output_path = output_path.as_ref().to_owned();

    // Layout and PDF generation are CPU-bound
    let (bytes, statistics) =
        tokio::task::spawn_blocking(move || generate_pdf_bytes(&input, &options)).await??;

    tokio::fs::write(&output_path, bytes).await?;
    log::info!("Wrote {}", output_path.display());

    Ok(statistics)
}

pub fn generate_pdf_bytes(
    input: &BookletInput,
    options: &BookletOptions,
) -> Result<(Vec<u8>, BookletStatistics)> {
    let ctx = LayoutContext::new(&BuiltinMetrics);
    let layout = layout_booklet(input, options, &ctx)?;

    let mut canvas = PdfCanvas::new(DOCUMENT_TITLE);
    render_booklet(&layout.pages, &layout.geometry, &mut canvas, &ctx);
    let bytes = canvas.into_bytes()?;

    Ok((bytes, layout.statistics))
}
