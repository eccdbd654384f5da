use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Aggregated recognizer output for one field of one row.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RawReading {
    pub text: String,
    /// Mean token confidence on the recognizer's scale, rounded to two decimals.
    pub confidence: f64,
    /// Set when the recognizer call failed for this field.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl RawReading {
    /// Reading for a region that was skipped as empty.
    pub fn empty() -> Self {
        RawReading::default()
    }

    pub fn failed(error: impl Into<String>) -> Self {
        RawReading {
            text: String::new(),
            confidence: 0.0,
            error: Some(error.into()),
        }
    }
}

/// One table row as read from the page, before normalization.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RowRecord {
    /// 1-based, counted across the whole document.
    pub row_number: u32,
    /// 1-based page the row was read from.
    pub page_number: u32,
    pub fields: BTreeMap<String, RawReading>,
}

/// A normalized field value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FieldValue {
    Number(f64),
    Text(String),
}

impl fmt::Display for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldValue::Number(v) => write!(f, "{v}"),
            FieldValue::Text(s) => write!(f, "{s}"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PositionField {
    pub name: String,
    /// `None` when the field could not be extracted. Distinct from zero.
    pub value: Option<FieldValue>,
    /// Recognizer confidence, zero whenever `value` is `None`.
    pub confidence: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Typed projection of a [`RowRecord`], one entry per configured field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderPosition {
    pub row_number: u32,
    pub page_number: u32,
    pub fields: Vec<PositionField>,
}

impl OrderPosition {
    pub fn field(&self, name: &str) -> Option<&PositionField> {
        self.fields.iter().find(|f| f.name == name)
    }

    pub fn value(&self, name: &str) -> Option<&FieldValue> {
        self.field(name).and_then(|f| f.value.as_ref())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExtractionResult {
    pub positions: Vec<OrderPosition>,
    pub total_pages: usize,
}
