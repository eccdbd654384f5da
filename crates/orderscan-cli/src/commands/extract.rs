use orderscan_core::error::OrderScanError;
use orderscan_core::extraction::pdftoppm::PdftoppmRasterizer;
use orderscan_core::extraction::tesseract::TesseractRecognizer;
use orderscan_core::layout::builtin;
use orderscan_core::layout::schema::LayoutConfig;
use std::path::PathBuf;
use tracing::info;

use crate::output;
use crate::OutputFormat;

const DEFAULT_PRESET: &str = "order-positions";

pub fn run(
    pdf_file: PathBuf,
    layout_file: Option<PathBuf>,
    preset: Option<String>,
    output_format: OutputFormat,
    output_file: Option<PathBuf>,
) -> Result<(), OrderScanError> {
    let layout = resolve_layout(layout_file, preset)?;

    if !PdftoppmRasterizer::is_available() {
        return Err(OrderScanError::PdftoppmNotFound);
    }
    if !TesseractRecognizer::is_available() {
        return Err(OrderScanError::TesseractNotFound);
    }

    let rasterizer = PdftoppmRasterizer::new();
    let recognizer = TesseractRecognizer::new();
    let result =
        orderscan_core::extract_order_positions(&pdf_file, &layout, &rasterizer, &recognizer)?;

    if let Some(path) = output_file {
        // Always write JSON when saving to file
        let json = serde_json::to_string_pretty(&result)?;
        std::fs::write(&path, json)?;
        info!(
            positions = result.positions.len(),
            pages = result.total_pages,
            path = %path.display(),
            "extraction written"
        );
        return Ok(());
    }

    match output_format {
        OutputFormat::Json => output::json::print(&result)?,
        OutputFormat::Table => output::table::print(&result, &layout),
    }

    Ok(())
}

fn resolve_layout(
    layout_file: Option<PathBuf>,
    preset: Option<String>,
) -> Result<LayoutConfig, OrderScanError> {
    match layout_file {
        Some(path) => orderscan_core::layout::load_layout(&path),
        None => builtin::load_preset(preset.as_deref().unwrap_or(DEFAULT_PRESET)),
    }
}
