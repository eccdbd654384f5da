use crate::error::OrderScanError;
use crate::extraction::{TextRecognizer, Token, NO_DETECTION};
use crate::layout::schema::RecognitionProfile;
use image::{GrayImage, ImageFormat};
use std::process::Command;

/// OCR backend using the tesseract command-line tool in TSV output mode.
pub struct TesseractRecognizer;

impl TesseractRecognizer {
    pub fn new() -> Self {
        TesseractRecognizer
    }

    /// Check if tesseract is available on the system.
    pub fn is_available() -> bool {
        Command::new("tesseract")
            .arg("--version")
            .output()
            .map(|o| o.status.success())
            .unwrap_or(false)
    }
}

impl Default for TesseractRecognizer {
    fn default() -> Self {
        Self::new()
    }
}

impl TextRecognizer for TesseractRecognizer {
    fn recognize(
        &self,
        roi: &GrayImage,
        languages: &str,
        profile: RecognitionProfile,
    ) -> Result<Vec<Token>, OrderScanError> {
        let tmpfile = tempfile::Builder::new()
            .suffix(".png")
            .tempfile()
            .map_err(|e| OrderScanError::Recognition(e.to_string()))?;
        roi.save_with_format(tmpfile.path(), ImageFormat::Png)?;

        let output = Command::new("tesseract")
            .arg(tmpfile.path())
            .arg("stdout")
            .arg("-l")
            .arg(languages)
            .args(profile_args(profile))
            .arg("tsv")
            .output()
            .map_err(|e| {
                if e.kind() == std::io::ErrorKind::NotFound {
                    OrderScanError::TesseractNotFound
                } else {
                    OrderScanError::Recognition(format!("tesseract failed: {}", e))
                }
            })?;

        if !output.status.success() {
            let code = output.status.code().unwrap_or(-1);
            let stderr = String::from_utf8_lossy(&output.stderr).to_string();
            return Err(OrderScanError::TesseractFailed { code, stderr });
        }

        Ok(parse_tsv(&String::from_utf8_lossy(&output.stdout)))
    }

    fn backend_name(&self) -> &str {
        "tesseract"
    }
}

/// Page segmentation mode and character restrictions for a profile.
fn profile_args(profile: RecognitionProfile) -> Vec<&'static str> {
    match profile {
        RecognitionProfile::Digits => vec![
            "--psm",
            "8",
            "-c",
            "tessedit_char_whitelist=0123456789",
            "-c",
            "classify_bln_numeric_mode=1",
        ],
        RecognitionProfile::Decimal => {
            vec!["--psm", "8", "-c", "tessedit_char_whitelist=0123456789.,"]
        }
        RecognitionProfile::Line => vec!["--psm", "7"],
        RecognitionProfile::Block => vec!["--psm", "6"],
    }
}

/// Parse tesseract TSV output into tokens.
///
/// Columns: level, page_num, block_num, par_num, line_num, word_num,
/// left, top, width, height, conf, text. Non-word levels carry conf -1.
fn parse_tsv(tsv: &str) -> Vec<Token> {
    tsv.lines()
        .skip(1)
        .filter_map(|line| {
            let cols: Vec<&str> = line.split('\t').collect();
            if cols.len() < 11 {
                return None;
            }
            let confidence = cols[10].trim().parse::<f64>().unwrap_or(NO_DETECTION);
            let text = cols.get(11).map(|t| t.trim()).unwrap_or_default();
            Some(Token::new(text, confidence))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_tsv_words_and_sentinels() {
        let tsv = "level\tpage_num\tblock_num\tpar_num\tline_num\tword_num\tleft\ttop\twidth\theight\tconf\ttext\n\
                   1\t1\t0\t0\t0\t0\t0\t0\t310\t50\t-1\t\n\
                   5\t1\t1\t1\t1\t1\t12\t8\t120\t30\t91.5\t12345678\n\
                   5\t1\t1\t1\t1\t2\t140\t8\t40\t30\t80\tAB\n";
        let tokens = parse_tsv(tsv);
        assert_eq!(tokens.len(), 3);
        assert!(!tokens[0].is_detection());
        assert_eq!(tokens[1], Token::new("12345678", 91.5));
        assert_eq!(tokens[2].text, "AB");
    }

    #[test]
    fn test_parse_tsv_missing_text_column() {
        let tsv = "header\n4\t1\t1\t1\t1\t0\t0\t0\t10\t10\t-1\n";
        let tokens = parse_tsv(tsv);
        assert_eq!(tokens, vec![Token::new("", NO_DETECTION)]);
    }

    #[test]
    fn test_profile_args() {
        assert_eq!(profile_args(RecognitionProfile::Line), vec!["--psm", "7"]);
        assert!(profile_args(RecognitionProfile::Digits)
            .contains(&"tessedit_char_whitelist=0123456789"));
    }
}
