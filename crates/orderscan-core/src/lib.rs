pub mod error;
pub mod extraction;
pub mod layout;
pub mod model;
pub mod parsing;
pub mod scan;

use error::OrderScanError;
use extraction::{PdfRasterizer, TextRecognizer};
use image::DynamicImage;
use layout::schema::LayoutConfig;
use model::ExtractionResult;
use std::path::Path;
use tracing::info;

/// Main API entry point: extract order positions from a scanned PDF.
///
/// Pages are processed in document order. Row numbers run across the whole
/// document. A missing or unreadable document is fatal; failures on single
/// fields are recorded on the affected field and do not stop extraction.
pub fn extract_order_positions(
    pdf_path: &Path,
    layout: &LayoutConfig,
    rasterizer: &dyn PdfRasterizer,
    recognizer: &dyn TextRecognizer,
) -> Result<ExtractionResult, OrderScanError> {
    if !pdf_path.exists() {
        return Err(OrderScanError::DocumentNotFound(pdf_path.to_path_buf()));
    }

    info!(
        path = %pdf_path.display(),
        layout = %layout.name,
        rasterizer = rasterizer.backend_name(),
        recognizer = recognizer.backend_name(),
        "extracting order positions"
    );

    let pages = rasterizer.rasterize(pdf_path, layout.image.dpi)?;
    Ok(extract_from_pages(&pages, layout, recognizer))
}

/// Extract order positions from already rasterized pages.
pub fn extract_from_pages(
    pages: &[DynamicImage],
    layout: &LayoutConfig,
    recognizer: &dyn TextRecognizer,
) -> ExtractionResult {
    let mut positions = Vec::new();
    let mut next_row_number = 1;

    for (page_index, page) in pages.iter().enumerate() {
        let binary = scan::preprocess::binarize(page, &layout.image);
        let page_scan = scan::scan_page(&binary, page_index, layout, recognizer, next_row_number);
        next_row_number = page_scan.next_row_number;

        info!(
            page = page_index + 1,
            rows = page_scan.rows.len(),
            "page processed"
        );

        positions.extend(
            page_scan
                .rows
                .iter()
                .map(|row| parsing::to_order_position(row, layout)),
        );
    }

    ExtractionResult {
        positions,
        total_pages: pages.len(),
    }
}
