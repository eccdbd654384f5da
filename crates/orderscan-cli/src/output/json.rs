use orderscan_core::error::OrderScanError;
use orderscan_core::model::ExtractionResult;

pub fn print(result: &ExtractionResult) -> Result<(), OrderScanError> {
    let json = serde_json::to_string_pretty(result)?;
    println!("{json}");
    Ok(())
}
