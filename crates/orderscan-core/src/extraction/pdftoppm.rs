use crate::error::OrderScanError;
use crate::extraction::PdfRasterizer;
use image::DynamicImage;
use std::path::{Path, PathBuf};
use std::process::Command;
use tracing::debug;

/// Rasterization backend using pdftoppm (from poppler-utils).
pub struct PdftoppmRasterizer;

impl PdftoppmRasterizer {
    pub fn new() -> Self {
        PdftoppmRasterizer
    }

    /// Check if pdftoppm is available on the system.
    pub fn is_available() -> bool {
        Command::new("pdftoppm")
            .arg("-v")
            .output()
            .map(|o| o.status.success() || !o.stderr.is_empty())
            .unwrap_or(false)
    }
}

impl Default for PdftoppmRasterizer {
    fn default() -> Self {
        Self::new()
    }
}

impl PdfRasterizer for PdftoppmRasterizer {
    fn rasterize(&self, pdf_path: &Path, dpi: u32) -> Result<Vec<DynamicImage>, OrderScanError> {
        if !pdf_path.exists() {
            return Err(OrderScanError::DocumentNotFound(pdf_path.to_path_buf()));
        }

        let out_dir = tempfile::tempdir().map_err(|e| OrderScanError::Rasterize(e.to_string()))?;
        let prefix = out_dir.path().join("page");

        let output = Command::new("pdftoppm")
            .arg("-r")
            .arg(dpi.to_string())
            .arg("-png")
            .arg(pdf_path)
            .arg(&prefix)
            .output()
            .map_err(|e| {
                if e.kind() == std::io::ErrorKind::NotFound {
                    OrderScanError::PdftoppmNotFound
                } else {
                    OrderScanError::Rasterize(format!("pdftoppm failed: {}", e))
                }
            })?;

        if !output.status.success() {
            let code = output.status.code().unwrap_or(-1);
            let stderr = String::from_utf8_lossy(&output.stderr).to_string();
            return Err(OrderScanError::PdftoppmFailed { code, stderr });
        }

        let page_files = collect_page_files(out_dir.path())?;
        if page_files.is_empty() {
            return Err(OrderScanError::Rasterize(format!(
                "pdftoppm produced no pages for {}",
                pdf_path.display()
            )));
        }

        debug!(pages = page_files.len(), dpi, "rasterized document");

        page_files
            .iter()
            .map(|path| image::open(path).map_err(OrderScanError::from))
            .collect()
    }

    fn backend_name(&self) -> &str {
        "pdftoppm"
    }
}

/// List the PNG files pdftoppm wrote, in page order.
fn collect_page_files(dir: &Path) -> Result<Vec<PathBuf>, OrderScanError> {
    let mut files = Vec::new();
    for entry in std::fs::read_dir(dir)? {
        let path = entry?.path();
        let is_png = path
            .extension()
            .map(|ext| ext.eq_ignore_ascii_case("png"))
            .unwrap_or(false);
        if is_png {
            files.push(path);
        }
    }
    files.sort_by_key(|p| page_index_of(p));
    Ok(files)
}

/// Page number encoded in a pdftoppm output name such as `page-07.png`.
fn page_index_of(path: &Path) -> usize {
    path.file_stem()
        .and_then(|s| s.to_str())
        .and_then(|s| s.rsplit('-').next())
        .and_then(|n| n.parse().ok())
        .unwrap_or(usize::MAX)
}
