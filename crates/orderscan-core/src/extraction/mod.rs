pub mod pdftoppm;
pub mod tesseract;

use crate::error::OrderScanError;
use crate::layout::schema::RecognitionProfile;
use image::{DynamicImage, GrayImage};
use std::path::Path;

/// Confidence reported for tokens where the recognizer detected nothing.
pub const NO_DETECTION: f64 = -1.0;

/// A single word reported by the recognizer.
#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    pub text: String,
    pub confidence: f64,
}

impl Token {
    pub fn new(text: impl Into<String>, confidence: f64) -> Self {
        Token {
            text: text.into(),
            confidence,
        }
    }

    pub fn is_detection(&self) -> bool {
        self.confidence != NO_DETECTION
    }
}

/// Trait for PDF rasterization backends.
pub trait PdfRasterizer: Send + Sync {
    /// Render every page of the PDF at `dpi`, in document order.
    fn rasterize(&self, pdf_path: &Path, dpi: u32) -> Result<Vec<DynamicImage>, OrderScanError>;

    /// Name of this rasterization backend (for diagnostics).
    fn backend_name(&self) -> &str;
}

/// Trait for OCR backends.
pub trait TextRecognizer: Send + Sync {
    /// Recognize the words in a binarized region, in reading order.
    fn recognize(
        &self,
        roi: &GrayImage,
        languages: &str,
        profile: RecognitionProfile,
    ) -> Result<Vec<Token>, OrderScanError>;

    /// Name of this recognition backend (for diagnostics).
    fn backend_name(&self) -> &str;
}
