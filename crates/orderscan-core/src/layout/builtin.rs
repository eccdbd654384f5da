use crate::error::OrderScanError;
use crate::layout::parse_layout_str;
use crate::layout::schema::LayoutConfig;

const ORDER_POSITIONS_JSON: &str = include_str!("../../../../layouts/order-positions.json");

/// Available predefined layouts.
pub const PRESETS: &[&str] = &["order-positions"];

/// Load a predefined layout by name.
pub fn load_preset(name: &str) -> Result<LayoutConfig, OrderScanError> {
    match name {
        "order-positions" => parse_layout_str(ORDER_POSITIONS_JSON),
        _ => Err(OrderScanError::LayoutInvalid(format!(
            "unknown preset '{}'. Available: {}",
            name,
            PRESETS.join(", ")
        ))),
    }
}
