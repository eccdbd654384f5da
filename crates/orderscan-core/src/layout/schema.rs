use serde::{Deserialize, Serialize};
use std::fmt;

/// Static description of a scanned order document: page geometry, image
/// preprocessing parameters, and the fields read from every table row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LayoutConfig {
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    pub version: String,
    pub image: ImageParams,
    pub rows: RowGeometry,
    pub empty_region: EmptyRegionPolicy,
    pub ocr: OcrSettings,
    /// Fields in declaration order. Output records follow this order.
    pub fields: Vec<FieldSpec>,
}

impl LayoutConfig {
    /// Row origin Y for the given zero-based page index.
    ///
    /// The first page carries a document header, so its table starts lower.
    pub fn start_y(&self, page_index: usize) -> u32 {
        if page_index == 0 {
            self.rows.start_y_first_page
        } else {
            self.rows.start_y_other_pages
        }
    }

    pub fn field(&self, name: &str) -> Option<&FieldSpec> {
        self.fields.iter().find(|f| f.name == name)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImageParams {
    /// Rendering resolution used when rasterizing PDF pages.
    pub dpi: u32,
    /// Gaussian smoothing kernel size in pixels. 0 or 1 disables smoothing.
    pub blur_kernel: u32,
    /// Neighbourhood size for adaptive binarization. Must be odd.
    pub threshold_block_size: u32,
    /// Bias subtracted from the local mean before comparing.
    pub threshold_constant: f32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RowGeometry {
    pub start_y_first_page: u32,
    pub start_y_other_pages: u32,
    pub row_x: u32,
    pub row_height: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EmptyRegionPolicy {
    /// Regions whose white-pixel ratio exceeds this are empty.
    pub max_white_ratio: f64,
    /// Regions with fewer black pixels than this are empty.
    pub min_black_pixels: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OcrSettings {
    /// Recognizer language set, e.g. "deu+eng".
    pub languages: String,
}

/// A single field within a table row. Offsets are relative to the row origin.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldSpec {
    pub name: String,
    pub x_offset: u32,
    pub y_offset: u32,
    pub width: u32,
    pub height: u32,
    pub profile: RecognitionProfile,
    pub kind: FieldKind,
}

/// How the recognizer should treat a field's region.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RecognitionProfile {
    /// A single word made only of digits.
    Digits,
    /// A single word of digits and decimal separators.
    Decimal,
    /// A single line of free text.
    Line,
    /// A uniform block of text.
    Block,
}

impl fmt::Display for RecognitionProfile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RecognitionProfile::Digits => write!(f, "digits"),
            RecognitionProfile::Decimal => write!(f, "decimal"),
            RecognitionProfile::Line => write!(f, "line"),
            RecognitionProfile::Block => write!(f, "block"),
        }
    }
}

/// Post-processing applied to a field's recognized text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum FieldKind {
    /// Identifier that must have exactly `length` characters.
    Identifier { length: usize },
    /// Free text with scan artifacts removed.
    Description,
    /// Free text, trimmed.
    Text,
    /// Monetary amount. A lone interior space acts as decimal separator.
    Amount,
    /// Count or measure. Spaces are thousands separators.
    Quantity,
    /// Number with a known count of decimal digits. A missing separator
    /// is restored by shifting the value.
    FixedDecimal { digits: u32 },
}

impl FieldKind {
    pub fn is_numeric(&self) -> bool {
        matches!(
            self,
            FieldKind::Amount | FieldKind::Quantity | FieldKind::FixedDecimal { .. }
        )
    }
}
