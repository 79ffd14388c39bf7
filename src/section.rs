//! Mapping a monitor's grid cell to a crop rectangle on the source image.
//!
//! The cell's fractional extent is scaled to the image and truncated. The
//! monitor's viewport offset is converted from basis units to source pixels
//! and subtracted from both edges on its axis, so a positive offset pans the
//! window toward the origin. The result is always clamped to the image with
//! at least one pixel on each axis, however large the offset.

#[cfg(feature = "std")]
use image::{RgbImage, imageops};

use crate::error::{ConfigurationError, LayoutError};
use crate::geometry::{Rect, Size};
use crate::grid::Position;
use crate::layout::LayoutPlan;

/// Crop rectangle of one monitor on the source image. `right` and `bottom`
/// are exclusive; `right > left` and `bottom > top` always hold.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct SourceSection {
    pub position: Position,
    pub left: u32,
    pub top: u32,
    pub right: u32,
    pub bottom: u32,
}

impl SourceSection {
    /// Width in pixels, at least 1.
    pub const fn width(&self) -> u32 {
        self.right - self.left
    }

    /// Height in pixels, at least 1.
    pub const fn height(&self) -> u32 {
        self.bottom - self.top
    }

    /// As an `x, y, width, height` rect.
    pub const fn rect(&self) -> Rect {
        Rect::from_edges(self.left, self.top, self.right, self.bottom)
    }
}

/// Compute the crop rectangle of `pos` on an image of size `image`.
pub fn section_rect(
    plan: &LayoutPlan,
    pos: Position,
    image: Size,
) -> Result<SourceSection, LayoutError> {
    if image.is_empty() {
        return Err(LayoutError::ZeroSourceDimension);
    }
    let missing = ConfigurationError::MissingSpec(pos);
    let spec = plan.spec(pos).ok_or(missing)?;
    let f = plan.fractions(pos).ok_or(missing)?;

    let w = image.width as f64;
    let h = image.height as f64;
    let (span_x, span_y) = plan.total_span();

    // Anything past one image length clamps to the same edge.
    let offset_x = to_pixels(spec.offset_x, w, span_x, image.width);
    let offset_y = to_pixels(spec.offset_y, h, span_y, image.height);

    let (left, right) = clamp_axis(
        (f.left * w) as i64 - offset_x,
        (f.right * w) as i64 - offset_x,
        image.width,
    );
    let (top, bottom) = clamp_axis(
        (f.top * h) as i64 - offset_y,
        (f.bottom * h) as i64 - offset_y,
        image.height,
    );

    let section = SourceSection {
        position: pos,
        left,
        top,
        right,
        bottom,
    };
    tracing::debug!(
        %pos,
        left, top, right, bottom,
        offset_x, offset_y,
        "source section"
    );
    Ok(section)
}

/// Convert a basis-unit offset to source pixels, limited to `±len`.
fn to_pixels(offset: i32, px: f64, span: f64, len: u32) -> i64 {
    let len = len as i64;
    ((offset as f64 * px / span) as i64).clamp(-len, len)
}

/// Clamp `lo` into `[0, max - 1]` and `hi` into `[lo + 1, max]`.
/// `max` must be at least 1.
fn clamp_axis(lo: i64, hi: i64, max: u32) -> (u32, u32) {
    let max = max as i64;
    let lo = lo.clamp(0, max - 1);
    let hi = hi.min(max).max(lo + 1);
    (lo as u32, hi as u32)
}

/// Crop `pos`'s section out of `image` into its own buffer.
#[cfg(feature = "std")]
pub fn extract_section(
    image: &RgbImage,
    plan: &LayoutPlan,
    pos: Position,
) -> Result<(SourceSection, RgbImage), LayoutError> {
    let section = section_rect(plan, pos, Size::new(image.width(), image.height()))?;
    let pixels = imageops::crop_imm(
        image,
        section.left,
        section.top,
        section.width(),
        section.height(),
    )
    .to_image();
    Ok((section, pixels))
}
