use orderscan_core::error::OrderScanError;
use orderscan_core::layout::builtin;
use orderscan_core::layout::schema::FieldKind;
use std::path::Path;

pub fn list() -> Result<(), OrderScanError> {
    println!("Predefined layouts:\n");
    for name in builtin::PRESETS {
        let layout = builtin::load_preset(name)?;
        println!(
            "  {:<18} {} (v{}, {} fields)",
            name,
            layout.name,
            layout.version,
            layout.fields.len()
        );
        if let Some(desc) = &layout.description {
            println!("  {:<18} {}", "", desc);
        }
    }
    Ok(())
}

pub fn show(preset: &str) -> Result<(), OrderScanError> {
    let layout = builtin::load_preset(preset)?;
    println!("{}", serde_json::to_string_pretty(&layout)?);
    Ok(())
}

pub fn validate(file: &Path) -> Result<(), OrderScanError> {
    let layout = orderscan_core::layout::load_layout(file)?;
    println!("✓ Valid layout: {} (v{})", layout.name, layout.version);
    println!(
        "  {} DPI, row height {} px, {} field(s)",
        layout.image.dpi,
        layout.rows.row_height,
        layout.fields.len()
    );
    for field in &layout.fields {
        println!(
            "  - {:<16} x+{:<5} y+{:<4} {}x{}  {:<8} {}",
            field.name,
            field.x_offset,
            field.y_offset,
            field.width,
            field.height,
            field.profile.to_string(),
            describe_kind(field.kind)
        );
    }
    Ok(())
}

fn describe_kind(kind: FieldKind) -> String {
    match kind {
        FieldKind::Identifier { length } => format!("identifier ({length} chars)"),
        FieldKind::Description => "description".into(),
        FieldKind::Text => "text".into(),
        FieldKind::Amount => "amount".into(),
        FieldKind::Quantity => "quantity".into(),
        FieldKind::FixedDecimal { digits } => format!("fixed decimal ({digits} places)"),
    }
}
