use orderscan_core::layout::schema::LayoutConfig;
use orderscan_core::model::{ExtractionResult, PositionField};

pub fn print(result: &ExtractionResult, layout: &LayoutConfig) {
    println!(
        "=== {} position(s) on {} page(s) ===\n",
        result.positions.len(),
        result.total_pages
    );

    if result.positions.is_empty() {
        return;
    }

    // Column width per field: the widest of header and every cell.
    let widths: Vec<usize> = layout
        .fields
        .iter()
        .map(|spec| {
            result
                .positions
                .iter()
                .filter_map(|p| p.field(&spec.name))
                .map(|f| format_cell(f).chars().count())
                .chain(std::iter::once(spec.name.chars().count()))
                .max()
                .unwrap_or(0)
        })
        .collect();

    let mut header = format!("  {:>4}  {:>4}", "Row", "Page");
    for (spec, width) in layout.fields.iter().zip(&widths) {
        header.push_str(&format!("  {:<width$}", spec.name, width = width));
    }
    println!("{}", header.trim_end());

    for position in &result.positions {
        let mut line = format!("  {:>4}  {:>4}", position.row_number, position.page_number);
        for (spec, width) in layout.fields.iter().zip(&widths) {
            let cell = position
                .field(&spec.name)
                .map(format_cell)
                .unwrap_or_else(|| "-".into());
            if spec.kind.is_numeric() {
                line.push_str(&format!("  {:>width$}", cell, width = width));
            } else {
                line.push_str(&format!("  {:<width$}", cell, width = width));
            }
        }
        println!("{}", line.trim_end());
    }

    let failures: Vec<(u32, &PositionField)> = result
        .positions
        .iter()
        .flat_map(|p| {
            p.fields
                .iter()
                .filter(|f| f.error.is_some())
                .map(move |f| (p.row_number, f))
        })
        .collect();

    if !failures.is_empty() {
        println!("\n  Recognition failures:");
        for (row, field) in failures {
            println!(
                "    row {} {}: {}",
                row,
                field.name,
                field.error.as_deref().unwrap_or_default()
            );
        }
    }
}

fn format_cell(field: &PositionField) -> String {
    match &field.value {
        Some(value) => format!("{} ({:.0}%)", value, field.confidence),
        None => "-".into(),
    }
}
