use crate::layout::schema::{EmptyRegionPolicy, FieldSpec};
use image::{imageops, GrayImage};

/// Absolute pixel rectangle on a page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Roi {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

impl Roi {
    /// Region of `field` within the row whose top-left corner is `(row_x, row_y)`.
    pub fn for_field(row_x: u32, row_y: u32, field: &FieldSpec) -> Self {
        Roi {
            x: row_x.saturating_add(field.x_offset),
            y: row_y.saturating_add(field.y_offset),
            width: field.width,
            height: field.height,
        }
    }

    /// Intersection with a `width` x `height` raster, or `None` if nothing overlaps.
    pub fn clip(&self, width: u32, height: u32) -> Option<Roi> {
        if self.x >= width || self.y >= height {
            return None;
        }
        let w = self.width.min(width - self.x);
        let h = self.height.min(height - self.y);
        if w == 0 || h == 0 {
            return None;
        }
        Some(Roi {
            x: self.x,
            y: self.y,
            width: w,
            height: h,
        })
    }

    /// Copy this region out of `page`, clipped to its bounds.
    pub fn crop(&self, page: &GrayImage) -> Option<GrayImage> {
        let clipped = self.clip(page.width(), page.height())?;
        Some(
            imageops::crop_imm(page, clipped.x, clipped.y, clipped.width, clipped.height)
                .to_image(),
        )
    }
}

/// Decide whether a binarized region holds nothing worth recognizing.
///
/// A region is empty when its white ratio exceeds the policy limit, or when
/// it has fewer black pixels than the policy minimum. A region with no
/// pixels at all is empty.
pub fn is_empty_region(roi: &GrayImage, policy: &EmptyRegionPolicy) -> bool {
    let total = u64::from(roi.width()) * u64::from(roi.height());
    if total == 0 {
        return true;
    }

    let white = roi.pixels().filter(|p| p[0] == 255).count() as u64;
    let white_ratio = white as f64 / total as f64;
    if white_ratio > policy.max_white_ratio {
        return true;
    }

    let black = roi.pixels().filter(|p| p[0] == 0).count() as u64;
    black < policy.min_black_pixels
}

/// Whether a row with `empty_count` empty fields out of `field_count` marks
/// the end of the table.
///
/// The rule is `empty_count >= field_count - 1`: one non-empty field is
/// tolerated as a stray mark. Single-field layouts deviate from it, since
/// `1 - 1 = 0` would end the table at every row; the threshold is clamped
/// to 1 so the row ends the table only when its one field is empty.
pub fn ends_table(empty_count: usize, field_count: usize) -> bool {
    empty_count >= field_count.saturating_sub(1).max(1)
}
