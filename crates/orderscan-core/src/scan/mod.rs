pub mod preprocess;
pub mod recognize;
pub mod region;

use crate::extraction::TextRecognizer;
use crate::layout::schema::LayoutConfig;
use crate::model::{RawReading, RowRecord};
use image::GrayImage;
use recognize::read_field;
use region::{ends_table, is_empty_region, Roi};
use std::collections::BTreeMap;
use tracing::debug;

/// Rows read from one page, plus the row number the next page starts at.
#[derive(Debug, Clone)]
pub struct PageScan {
    pub rows: Vec<RowRecord>,
    pub next_row_number: u32,
}

/// Walk a binarized page top to bottom and read every table row.
///
/// `next_row_number` is the document-wide counter carried in from the
/// previous page. Scanning stops at the first row that ends the table;
/// that row is discarded and its number is not consumed.
pub fn scan_page(
    binary: &GrayImage,
    page_index: usize,
    layout: &LayoutConfig,
    recognizer: &dyn TextRecognizer,
    next_row_number: u32,
) -> PageScan {
    let page_number = page_index as u32 + 1;
    let row_height = u64::from(layout.rows.row_height);
    let page_height = u64::from(binary.height());
    let field_count = layout.fields.len();

    let mut rows = Vec::new();
    let mut next_row_number = next_row_number;
    let mut row_y = u64::from(layout.start_y(page_index));

    while row_y + row_height < page_height {
        let row_number = next_row_number;
        let mut fields = BTreeMap::new();
        let mut empty_count = 0;

        for field in &layout.fields {
            let roi = Roi::for_field(layout.rows.row_x, row_y as u32, field);
            let reading = match roi.crop(binary) {
                Some(region) if !is_empty_region(&region, &layout.empty_region) => read_field(
                    recognizer,
                    &region,
                    &layout.ocr.languages,
                    field.profile,
                ),
                _ => {
                    empty_count += 1;
                    RawReading::empty()
                }
            };
            fields.insert(field.name.clone(), reading);
        }

        if ends_table(empty_count, field_count) {
            debug!(
                page = page_number,
                row_y,
                empty_count,
                field_count,
                "table ended"
            );
            break;
        }

        debug!(page = page_number, row = row_number, row_y, "read row");
        rows.push(RowRecord {
            row_number,
            page_number,
            fields,
        });
        next_row_number += 1;
        row_y += row_height;
    }

    PageScan {
        rows,
        next_row_number,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::OrderScanError;
    use crate::extraction::Token;
    use crate::layout::schema::{
        EmptyRegionPolicy, FieldKind, FieldSpec, ImageParams, OcrSettings, RecognitionProfile,
        RowGeometry,
    };
    use image::Luma;
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct CountingRecognizer {
        calls: AtomicUsize,
    }

    impl TextRecognizer for CountingRecognizer {
        fn recognize(
            &self,
            _roi: &GrayImage,
            _languages: &str,
            _profile: RecognitionProfile,
        ) -> Result<Vec<Token>, OrderScanError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(vec![Token::new("42", 90.0)])
        }

        fn backend_name(&self) -> &str {
            "counting"
        }
    }

    fn field(name: &str, x_offset: u32) -> FieldSpec {
        FieldSpec {
            name: name.into(),
            x_offset,
            y_offset: 2,
            width: 16,
            height: 8,
            profile: RecognitionProfile::Digits,
            kind: FieldKind::Quantity,
        }
    }

    fn layout() -> LayoutConfig {
        LayoutConfig {
            name: "test".into(),
            description: None,
            version: "1".into(),
            image: ImageParams {
                dpi: 72,
                blur_kernel: 0,
                threshold_block_size: 3,
                threshold_constant: 0.0,
            },
            rows: RowGeometry {
                start_y_first_page: 10,
                start_y_other_pages: 0,
                row_x: 0,
                row_height: 12,
            },
            empty_region: EmptyRegionPolicy {
                max_white_ratio: 0.95,
                min_black_pixels: 10,
            },
            ocr: OcrSettings {
                languages: "eng".into(),
            },
            fields: vec![field("a", 0), field("b", 20), field("c", 40)],
        }
    }

    /// Binary page with ink in the given fields of the given rows.
    fn page(
        layout: &LayoutConfig,
        height: u32,
        page_index: usize,
        ink: &[(u32, Vec<usize>)],
    ) -> GrayImage {
        let mut img = GrayImage::from_pixel(60, height, Luma([255]));
        for (row, fields) in ink {
            let row_y = layout.start_y(page_index) + row * layout.rows.row_height;
            for &i in fields {
                let f = &layout.fields[i];
                for y in row_y + f.y_offset..row_y + f.y_offset + f.height {
                    for x in f.x_offset..f.x_offset + f.width {
                        img.put_pixel(x, y, Luma([0]));
                    }
                }
            }
        }
        img
    }

    fn recognizer() -> CountingRecognizer {
        CountingRecognizer {
            calls: AtomicUsize::new(0),
        }
    }

    #[test]
    fn test_rows_until_blank_row() {
        let layout = layout();
        let binary = page(
            &layout,
            100,
            0,
            &[(0, vec![0, 1, 2]), (1, vec![0, 1, 2]), (3, vec![0, 1, 2])],
        );
        let rec = recognizer();
        let scan = scan_page(&binary, 0, &layout, &rec, 1);

        // Row 2 is blank, so row 3 is never reached.
        assert_eq!(scan.rows.len(), 2);
        assert_eq!(scan.rows[0].row_number, 1);
        assert_eq!(scan.rows[1].row_number, 2);
        assert_eq!(scan.next_row_number, 3);
        assert_eq!(rec.calls.load(Ordering::SeqCst), 6);
    }

    #[test]
    fn test_single_stray_mark_ends_table() {
        let layout = layout();
        let binary = page(&layout, 100, 0, &[(0, vec![0, 1, 2]), (1, vec![2])]);
        let scan = scan_page(&binary, 0, &layout, &recognizer(), 1);
        assert_eq!(scan.rows.len(), 1);
    }

    #[test]
    fn test_one_empty_field_keeps_row() {
        let layout = layout();
        let binary = page(&layout, 100, 0, &[(0, vec![0, 2])]);
        let rec = recognizer();
        let scan = scan_page(&binary, 0, &layout, &rec, 1);
        assert_eq!(scan.rows.len(), 1);
        let row = &scan.rows[0];
        assert_eq!(row.fields["b"], RawReading::empty());
        assert_eq!(row.fields["a"].text, "42");
        assert_eq!(rec.calls.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn test_counter_continues_across_pages() {
        let layout = layout();
        let binary = page(&layout, 60, 1, &[(0, vec![0, 1, 2]), (1, vec![0, 1, 2])]);
        let scan = scan_page(&binary, 1, &layout, &recognizer(), 6);
        assert_eq!(
            scan.rows.iter().map(|r| r.row_number).collect::<Vec<_>>(),
            vec![6, 7]
        );
        assert!(scan.rows.iter().all(|r| r.page_number == 2));
        assert_eq!(scan.next_row_number, 8);
    }

    #[test]
    fn test_row_must_fit_above_page_bottom() {
        let layout = layout();
        // Start 10 + 12 = 22 is not below a 22 px page.
        let binary = page(&layout, 22, 0, &[]);
        let scan = scan_page(&binary, 0, &layout, &recognizer(), 1);
        assert!(scan.rows.is_empty());
        assert_eq!(scan.next_row_number, 1);
    }

    #[test]
    fn test_every_configured_field_present() {
        let layout = layout();
        let binary = page(&layout, 40, 0, &[(0, vec![0, 1, 2])]);
        let scan = scan_page(&binary, 0, &layout, &recognizer(), 1);
        let names: Vec<&str> = scan.rows[0].fields.keys().map(|k| k.as_str()).collect();
        assert_eq!(names, vec!["a", "b", "c"]);
    }
}
