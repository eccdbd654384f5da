pub mod text;
pub mod values;

use crate::layout::schema::{FieldKind, LayoutConfig};
use crate::model::{FieldValue, OrderPosition, PositionField, RawReading, RowRecord};
use text::{clean_description, clean_text, validate_identifier};
use values::{normalize_fixed_decimal, normalize_number, NumberStyle};

/// Normalize a single recognized string according to its field kind.
pub fn normalize_field(kind: FieldKind, raw: &str) -> Option<FieldValue> {
    match kind {
        FieldKind::Identifier { length } => validate_identifier(raw, length).map(FieldValue::Text),
        FieldKind::Description => clean_description(raw).map(FieldValue::Text),
        FieldKind::Text => clean_text(raw).map(FieldValue::Text),
        FieldKind::Amount => normalize_number(raw, NumberStyle::Amount).map(FieldValue::Number),
        FieldKind::Quantity => {
            normalize_number(raw, NumberStyle::Quantity).map(FieldValue::Number)
        }
        FieldKind::FixedDecimal { digits } => {
            normalize_fixed_decimal(raw, digits).map(FieldValue::Number)
        }
    }
}

/// Project a raw row onto the layout's fields, in declaration order.
///
/// Fields missing from the row are treated as empty readings. Confidence is
/// zeroed whenever the value could not be normalized.
pub fn to_order_position(row: &RowRecord, layout: &LayoutConfig) -> OrderPosition {
    let empty = RawReading::empty();
    let fields = layout
        .fields
        .iter()
        .map(|spec| {
            let reading = row.fields.get(&spec.name).unwrap_or(&empty);
            let value = normalize_field(spec.kind, &reading.text);
            let confidence = if value.is_some() {
                reading.confidence
            } else {
                0.0
            };
            PositionField {
                name: spec.name.clone(),
                value,
                confidence,
                error: reading.error.clone(),
            }
        })
        .collect();

    OrderPosition {
        row_number: row.row_number,
        page_number: row.page_number,
        fields,
    }
}
