pub mod builtin;
pub mod schema;

use crate::error::OrderScanError;
use schema::{FieldKind, LayoutConfig};
use std::collections::HashSet;
use std::path::Path;

/// Load a layout from a JSON file.
pub fn load_layout(path: &Path) -> Result<LayoutConfig, OrderScanError> {
    let content = std::fs::read_to_string(path).map_err(|e| OrderScanError::LayoutLoad {
        path: path.to_path_buf(),
        reason: e.to_string(),
    })?;
    parse_layout(&content, path)
}

/// Parse a layout from a JSON string.
pub fn parse_layout(json: &str, source: &Path) -> Result<LayoutConfig, OrderScanError> {
    let layout: LayoutConfig = serde_json::from_str(json).map_err(|e| OrderScanError::LayoutLoad {
        path: source.to_path_buf(),
        reason: e.to_string(),
    })?;
    validate_layout(&layout)?;
    Ok(layout)
}

/// Parse a layout from a JSON string (no file path context).
pub fn parse_layout_str(json: &str) -> Result<LayoutConfig, OrderScanError> {
    let layout: LayoutConfig = serde_json::from_str(json).map_err(OrderScanError::Json)?;
    validate_layout(&layout)?;
    Ok(layout)
}

/// Validate that a layout is well-formed.
pub fn validate_layout(layout: &LayoutConfig) -> Result<(), OrderScanError> {
    let image = &layout.image;
    if image.dpi == 0 {
        return Err(OrderScanError::LayoutInvalid("dpi must be positive".into()));
    }
    if image.blur_kernel > 1 && image.blur_kernel % 2 == 0 {
        return Err(OrderScanError::LayoutInvalid(format!(
            "blur_kernel must be odd, got {}",
            image.blur_kernel
        )));
    }
    if image.threshold_block_size < 3 || image.threshold_block_size % 2 == 0 {
        return Err(OrderScanError::LayoutInvalid(format!(
            "threshold_block_size must be odd and at least 3, got {}",
            image.threshold_block_size
        )));
    }

    if layout.rows.row_height == 0 {
        return Err(OrderScanError::LayoutInvalid(
            "row_height must be positive".into(),
        ));
    }

    let ratio = layout.empty_region.max_white_ratio;
    if !(0.0..=1.0).contains(&ratio) {
        return Err(OrderScanError::LayoutInvalid(format!(
            "max_white_ratio must be within [0, 1], got {ratio}"
        )));
    }

    if layout.ocr.languages.trim().is_empty() {
        return Err(OrderScanError::LayoutInvalid(
            "ocr languages must not be empty".into(),
        ));
    }

    if layout.fields.is_empty() {
        return Err(OrderScanError::LayoutInvalid("fields must not be empty".into()));
    }

    let mut seen = HashSet::new();
    for field in &layout.fields {
        if field.name.trim().is_empty() {
            return Err(OrderScanError::LayoutInvalid(
                "field name must not be empty".into(),
            ));
        }

        if !seen.insert(field.name.as_str()) {
            return Err(OrderScanError::LayoutInvalid(format!(
                "duplicate field '{}'",
                field.name
            )));
        }

        if field.width == 0 || field.height == 0 {
            return Err(OrderScanError::LayoutInvalid(format!(
                "field '{}' has an empty region ({}x{})",
                field.name, field.width, field.height
            )));
        }

        match field.kind {
            FieldKind::Identifier { length: 0 } => {
                return Err(OrderScanError::LayoutInvalid(format!(
                    "field '{}' has identifier length 0",
                    field.name
                )));
            }
            FieldKind::FixedDecimal { digits } if digits > 9 => {
                return Err(OrderScanError::LayoutInvalid(format!(
                    "field '{}' expects {} decimal digits (at most 9 supported)",
                    field.name, digits
                )));
            }
            _ => {}
        }
    }

    Ok(())
}
