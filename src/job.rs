//! Configuration snapshot and the per-image rendering pipeline.
//!
//! [`Settings`] collects everything a configuration surface gathers. Its
//! [`build`](Settings::build) validates the grid and plans the layout once;
//! the resulting [`Wallpaper`] is immutable and renders any number of
//! images.
//!
//! # Example
//!
//! ```
//! use zenwall::{Anchor, FitMode, MonitorSpec, Position, Settings, Size};
//!
//! let wallpaper = Settings::new()
//!     .monitor(Position::new(2, 2), MonitorSpec::new(1920, 1080).diagonal(24.0))
//!     .monitor(Position::new(2, 3), MonitorSpec::new(2560, 1440).diagonal(27.0))
//!     .fit(FitMode::Fill)
//!     .anchor(Anchor::Top)
//!     .build()
//!     .unwrap();
//!
//! let sections = wallpaper.sections(Size::new(6000, 2000)).unwrap();
//! assert_eq!(sections.len(), 2);
//! assert_eq!(sections[0].left, 0);
//! assert_eq!(sections[1].right, 6000);
//! ```

use alloc::collections::{BTreeMap, BTreeSet};
use alloc::vec::Vec;

#[cfg(feature = "std")]
use image::RgbImage;

use crate::compose::OutputMode;
#[cfg(feature = "std")]
use crate::compose::{OutputImage, assemble, compose};
use crate::error::LayoutError;
use crate::geometry::{Anchor, FitMode, Size};
use crate::grid::{MonitorGrid, Position};
use crate::layout::{LayoutPlan, PartitionBasis, plan};
use crate::monitor::MonitorSpec;
#[cfg(feature = "std")]
use crate::section::extract_section;
use crate::section::{SourceSection, section_rect};

/// Fully resolved configuration for a generation run.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Settings {
    /// Enabled positions.
    pub enabled: BTreeSet<Position>,
    /// Settings per position. Entries for disabled positions are kept but
    /// unused, so toggling a monitor off and on preserves its values.
    pub monitors: BTreeMap<Position, MonitorSpec>,
    pub fit: FitMode,
    /// Focal point under [`FitMode::Fill`]; ignored for `Stretch`.
    pub anchor: Anchor,
    pub output: OutputMode,
    pub basis: PartitionBasis,
}

impl Settings {
    /// Empty settings: no monitors, Fill, centered, combined, physical basis.
    pub fn new() -> Self {
        Self::default()
    }

    /// Enable `pos` with `spec`.
    pub fn monitor(mut self, pos: Position, spec: MonitorSpec) -> Self {
        self.enabled.insert(pos);
        self.monitors.insert(pos, spec);
        self
    }

    /// Disable `pos`, keeping its spec.
    pub fn disable(mut self, pos: Position) -> Self {
        self.enabled.remove(&pos);
        self
    }

    pub fn fit(mut self, fit: FitMode) -> Self {
        self.fit = fit;
        self
    }

    pub fn anchor(mut self, anchor: Anchor) -> Self {
        self.anchor = anchor;
        self
    }

    pub fn output(mut self, output: OutputMode) -> Self {
        self.output = output;
        self
    }

    /// Shorthand for [`OutputMode::Split`] / [`OutputMode::Combined`].
    pub fn split(self, split: bool) -> Self {
        self.output(if split {
            OutputMode::Split
        } else {
            OutputMode::Combined
        })
    }

    pub fn basis(mut self, basis: PartitionBasis) -> Self {
        self.basis = basis;
        self
    }

    /// Validate the grid and plan the layout.
    ///
    /// Fails with [`LayoutError::InvalidGrid`] before looking at any monitor
    /// settings, then with a configuration error for degenerate monitors.
    pub fn build(&self) -> Result<Wallpaper, LayoutError> {
        let grid = MonitorGrid::new(self.enabled.iter().copied())?;
        let plan = plan(&grid, &self.monitors, self.basis)?;
        Ok(Wallpaper {
            plan,
            fit: self.fit,
            anchor: self.anchor,
            output: self.output,
        })
    }
}

/// A validated, planned configuration. Holds no per-image state.
#[derive(Clone, Debug, PartialEq)]
pub struct Wallpaper {
    plan: LayoutPlan,
    fit: FitMode,
    anchor: Anchor,
    output: OutputMode,
}

impl Wallpaper {
    /// The image-independent layout.
    pub fn plan(&self) -> &LayoutPlan {
        &self.plan
    }

    pub fn fit_mode(&self) -> FitMode {
        self.fit
    }

    pub fn anchor(&self) -> Anchor {
        self.anchor
    }

    pub fn output_mode(&self) -> OutputMode {
        self.output
    }

    /// Crop rectangles for every monitor on an image of `image` size,
    /// in position order.
    pub fn sections(&self, image: Size) -> Result<Vec<SourceSection>, LayoutError> {
        self.plan
            .grid()
            .positions()
            .map(|pos| section_rect(&self.plan, pos, image))
            .collect()
    }

    /// Render one decoded, orientation-normalized image.
    #[cfg(feature = "std")]
    pub fn render(
        &self,
        image: &RgbImage,
        base_name: &str,
    ) -> Result<Vec<OutputImage>, LayoutError> {
        let mut parts = Vec::with_capacity(self.plan.grid().len());
        for (pos, spec) in self.plan.monitors() {
            let (_, section) = extract_section(image, &self.plan, pos)?;
            parts.push((pos, compose(&section, spec, self.fit, self.anchor)));
        }
        tracing::debug!(base_name, monitors = parts.len(), output = ?self.output, "rendered");
        Ok(assemble(parts, &self.plan, self.output, base_name))
    }

    /// Render several images. Each image is independent; with the `parallel`
    /// feature they are processed concurrently. Results keep input order.
    #[cfg(feature = "std")]
    pub fn render_batch(
        &self,
        images: &[(&str, &RgbImage)],
    ) -> Vec<Result<Vec<OutputImage>, LayoutError>> {
        #[cfg(feature = "parallel")]
        {
            use rayon::prelude::*;
            images
                .par_iter()
                .map(|(name, image)| self.render(image, name))
                .collect()
        }
        #[cfg(not(feature = "parallel"))]
        {
            images
                .iter()
                .map(|(name, image)| self.render(image, name))
                .collect()
        }
    }
}
