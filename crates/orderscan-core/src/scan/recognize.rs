use crate::extraction::{TextRecognizer, Token};
use crate::layout::schema::RecognitionProfile;
use crate::model::RawReading;
use image::GrayImage;
use tracing::warn;

/// Run the recognizer on one region and aggregate its tokens.
///
/// A recognizer failure is recorded on the reading and never propagated.
pub fn read_field(
    recognizer: &dyn TextRecognizer,
    roi: &GrayImage,
    languages: &str,
    profile: RecognitionProfile,
) -> RawReading {
    match recognizer.recognize(roi, languages, profile) {
        Ok(tokens) => aggregate_tokens(&tokens),
        Err(e) => {
            warn!(
                backend = recognizer.backend_name(),
                error = %e,
                "recognition failed, recording empty reading"
            );
            RawReading::failed(e.to_string())
        }
    }
}

/// Join detected, non-blank token texts with single spaces and average
/// their confidences, rounded to two decimals.
pub fn aggregate_tokens(tokens: &[Token]) -> RawReading {
    let mut texts = Vec::new();
    let mut confidences = Vec::new();

    for token in tokens.iter().filter(|t| t.is_detection()) {
        let text = token.text.trim();
        if text.is_empty() {
            continue;
        }
        texts.push(text);
        confidences.push(token.confidence);
    }

    let confidence = if confidences.is_empty() {
        0.0
    } else {
        confidences.iter().sum::<f64>() / confidences.len() as f64
    };

    RawReading {
        text: texts.join(" "),
        confidence: round2(confidence),
        error: None,
    }
}

fn round2(v: f64) -> f64 {
    (v * 100.0).round() / 100.0
}
