//! Fitting sections to monitors and assembling the outputs.
//!
//! Output naming and [`OutputMode`] are available without `std`; the pixel
//! work needs the `std` feature.

use alloc::format;
use alloc::string::String;
#[cfg(feature = "std")]
use alloc::vec::Vec;

#[cfg(feature = "std")]
use image::RgbImage;
#[cfg(feature = "std")]
use image::imageops::{self, FilterType};

use crate::grid::Position;
#[cfg(feature = "std")]
use crate::{
    geometry::{Anchor, FitMode, Size},
    layout::LayoutPlan,
    monitor::MonitorSpec,
};

/// Resampling filter for every resize.
#[cfg(feature = "std")]
const FILTER: FilterType = FilterType::Lanczos3;

/// Whether to emit one image per monitor or a single combined canvas.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum OutputMode {
    /// One canvas sized to the sum of column widths × row heights.
    #[default]
    Combined,
    /// One image per monitor at its exact resolution.
    Split,
}

/// A finished image and the file name it should be stored under.
#[cfg(feature = "std")]
#[derive(Clone, Debug, PartialEq)]
pub struct OutputImage {
    /// `{base}_{row}_{col}.jpg` or `{base}_combined.jpg`.
    pub file_name: String,
    /// Monitor this image belongs to; `None` for the combined canvas.
    pub position: Option<Position>,
    pub image: RgbImage,
}

/// Fit an extracted section to `spec`'s resolution.
///
/// [`FitMode::Stretch`] resizes non-uniformly. [`FitMode::Fill`] crops the
/// section to the monitor's aspect ratio around `anchor`, then resizes.
/// The result is always exactly `spec.resolution`.
#[cfg(feature = "std")]
pub fn compose(section: &RgbImage, spec: &MonitorSpec, fit: FitMode, anchor: Anchor) -> RgbImage {
    let source = Size::new(section.width(), section.height());
    let layout = fit.compute(source, spec.resolution, anchor.gravity());
    let Size { width, height } = layout.resize_to;

    match layout.source_crop {
        Some(r) => {
            let kept = imageops::crop_imm(section, r.x, r.y, r.width, r.height).to_image();
            imageops::resize(&kept, width, height, FILTER)
        }
        None if source == layout.resize_to => section.clone(),
        None => imageops::resize(section, width, height, FILTER),
    }
}

/// Turn fitted monitor images into output artifacts.
///
/// Split mode returns one image per part in position order. Combined mode
/// pastes every part onto a black canvas at [`LayoutPlan::placement`];
/// parts for positions outside the plan are skipped and pastes that run
/// past the canvas edge are clipped.
#[cfg(feature = "std")]
pub fn assemble(
    mut parts: Vec<(Position, RgbImage)>,
    plan: &LayoutPlan,
    output: OutputMode,
    base_name: &str,
) -> Vec<OutputImage> {
    parts.sort_by_key(|(pos, _)| *pos);
    match output {
        OutputMode::Split => parts
            .into_iter()
            .map(|(pos, image)| OutputImage {
                file_name: split_name(base_name, pos),
                position: Some(pos),
                image,
            })
            .collect(),
        OutputMode::Combined => {
            let size = plan.canvas_size();
            let mut canvas = RgbImage::new(size.width, size.height);
            for (pos, image) in &parts {
                let Some((x, y)) = plan.placement(*pos) else {
                    tracing::warn!(%pos, "no cell for monitor, skipping");
                    continue;
                };
                tracing::debug!(%pos, x, y, "paste");
                imageops::replace(&mut canvas, image, x, y);
            }
            let mut out = Vec::with_capacity(1);
            out.push(OutputImage {
                file_name: combined_name(base_name),
                position: None,
                image: canvas,
            });
            out
        }
    }
}

/// `{base}_{row}_{col}.jpg`
pub fn split_name(base_name: &str, pos: Position) -> String {
    format!("{base_name}_{}_{}.jpg", pos.row, pos.col)
}

/// `{base}_combined.jpg`
pub fn combined_name(base_name: &str) -> String {
    format!("{base_name}_combined.jpg")
}
