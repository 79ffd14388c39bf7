//! Row/column spans, partition ratios, and canvas placement.
//!
//! Two measurements drive the layout. The *basis* spans (physical inches by
//! default, or pixels) decide how much of the source image each row and
//! column receives, so monitors of different sizes show a contiguous
//! picture. The pixel spans decide the combined canvas.
//!
//! ```text
//!   basis spans → ratios → source crop per cell
//!   pixel spans → canvas size → paste position per monitor
//! ```
//!
//! # Example
//!
//! ```
//! use std::collections::BTreeMap;
//! use zenwall::{MonitorGrid, MonitorSpec, PartitionBasis, Position, plan};
//!
//! let grid = MonitorGrid::from_cells(&[(2, 2), (2, 3)]).unwrap();
//! let specs = BTreeMap::from([
//!     (Position::new(2, 2), MonitorSpec::new(1920, 1080)),
//!     (Position::new(2, 3), MonitorSpec::new(2560, 1440)),
//! ]);
//! let layout = plan(&grid, &specs, PartitionBasis::Pixel).unwrap();
//!
//! assert_eq!(layout.canvas_size().width, 1920 + 2560);
//! assert_eq!(layout.canvas_size().height, 1440);
//! ```

use alloc::collections::BTreeMap;
use alloc::vec;
use alloc::vec::Vec;

use crate::error::{ConfigurationError, LayoutError};
use crate::geometry::Size;
use crate::grid::{GridExtent, MonitorGrid, Position};
use crate::monitor::MonitorSpec;

/// Which measurement decides how the source image is partitioned.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum PartitionBasis {
    /// Physical inches. Monitors receive image content in proportion to
    /// their real size, so a picture stays continuous across panels with
    /// different pixel densities. Offsets are in inches.
    #[default]
    Physical,
    /// Pixel resolution. Offsets are in pixels.
    Pixel,
}

/// Per-row and per-column spans: the largest monitor in each.
#[derive(Clone, Debug, PartialEq)]
pub struct AxisProfile {
    pub col_pixel_widths: Vec<u32>,
    pub row_pixel_heights: Vec<u32>,
    pub col_physical_widths: Vec<f64>,
    pub row_physical_heights: Vec<f64>,
}

impl AxisProfile {
    fn build(extent: GridExtent, monitors: &BTreeMap<Position, MonitorSpec>) -> Self {
        let mut axes = Self {
            col_pixel_widths: vec![0; extent.col_count()],
            row_pixel_heights: vec![0; extent.row_count()],
            col_physical_widths: vec![0.0; extent.col_count()],
            row_physical_heights: vec![0.0; extent.row_count()],
        };
        for (&pos, spec) in monitors {
            let Some((r, c)) = extent.index_of(pos) else {
                continue;
            };
            let phys = spec.physical_size();
            if let Some(w) = axes.col_pixel_widths.get_mut(c) {
                *w = (*w).max(spec.resolution.width);
            }
            if let Some(h) = axes.row_pixel_heights.get_mut(r) {
                *h = (*h).max(spec.resolution.height);
            }
            if let Some(w) = axes.col_physical_widths.get_mut(c) {
                *w = w.max(phys.width);
            }
            if let Some(h) = axes.row_physical_heights.get_mut(r) {
                *h = h.max(phys.height);
            }
        }
        axes
    }

    /// Sum of column pixel widths.
    pub fn total_pixel_width(&self) -> u32 {
        self.col_pixel_widths.iter().fold(0u32, |a, &w| a.saturating_add(w))
    }

    /// Sum of row pixel heights.
    pub fn total_pixel_height(&self) -> u32 {
        self.row_pixel_heights.iter().fold(0u32, |a, &h| a.saturating_add(h))
    }
}

/// Normalized share of the total span per column and per row.
#[derive(Clone, Debug, PartialEq)]
pub struct PartitionRatios {
    pub cols: Vec<f64>,
    pub rows: Vec<f64>,
}

/// Cumulative spans along one axis: `edges[i]` is the sum of spans before
/// index `i`, and the last entry is the total.
#[derive(Clone, Debug, PartialEq)]
struct Edges(Vec<f64>);

impl Edges {
    fn new(spans: &[f64]) -> Self {
        let mut edges = Vec::with_capacity(spans.len() + 1);
        let mut acc = 0.0;
        edges.push(acc);
        for s in spans {
            acc += s;
            edges.push(acc);
        }
        Self(edges)
    }

    fn total(&self) -> f64 {
        self.0.last().copied().unwrap_or(0.0)
    }

    /// Start and end fraction of cell `i`. The last cell ends at exactly 1.0.
    fn fractions(&self, i: usize) -> Option<(f64, f64)> {
        let total = self.total();
        let start = *self.0.get(i)?;
        let end = *self.0.get(i + 1)?;
        Some((start / total, end / total))
    }

    fn ratios(&self) -> Vec<f64> {
        let total = self.total();
        self.0.windows(2).map(|w| (w[1] - w[0]) / total).collect()
    }
}

/// Fractional extent of a monitor's section within the source image.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct SectionFractions {
    pub left: f64,
    pub top: f64,
    pub right: f64,
    pub bottom: f64,
}

/// Layout for one configuration, independent of any particular image.
#[derive(Clone, Debug, PartialEq)]
pub struct LayoutPlan {
    grid: MonitorGrid,
    monitors: BTreeMap<Position, MonitorSpec>,
    basis: PartitionBasis,
    axes: AxisProfile,
    ratios: PartitionRatios,
    col_edges: Edges,
    row_edges: Edges,
    col_pixel_prefix: Vec<u32>,
    row_pixel_prefix: Vec<u32>,
}

/// Compute the layout for `grid` with per-monitor `specs`.
///
/// Specs for positions outside the grid are ignored. Fails with a
/// [`ConfigurationError`] when an enabled position has no spec or a
/// degenerate one.
pub fn plan(
    grid: &MonitorGrid,
    specs: &BTreeMap<Position, MonitorSpec>,
    basis: PartitionBasis,
) -> Result<LayoutPlan, LayoutError> {
    let mut monitors = BTreeMap::new();
    for pos in grid.positions() {
        let spec = specs
            .get(&pos)
            .ok_or(ConfigurationError::MissingSpec(pos))?;
        spec.validate(pos)?;
        monitors.insert(pos, *spec);
    }

    if basis == PartitionBasis::Physical {
        let explicit = monitors.values().filter(|m| m.size.is_explicit()).count();
        if explicit > 0 && explicit < monitors.len() {
            tracing::warn!(
                defaulted = monitors.len() - explicit,
                "some monitors use the default physical size while others are sized explicitly"
            );
        }
    }

    let extent = grid.extent();
    let axes = AxisProfile::build(extent, &monitors);

    let (col_spans, row_spans): (Vec<f64>, Vec<f64>) = match basis {
        PartitionBasis::Physical => (
            axes.col_physical_widths.clone(),
            axes.row_physical_heights.clone(),
        ),
        PartitionBasis::Pixel => (
            axes.col_pixel_widths.iter().map(|&w| w as f64).collect(),
            axes.row_pixel_heights.iter().map(|&h| h as f64).collect(),
        ),
    };
    let col_edges = Edges::new(&col_spans);
    let row_edges = Edges::new(&row_spans);
    for total in [col_edges.total(), row_edges.total()] {
        if !(total.is_finite() && total > 0.0) {
            return Err(ConfigurationError::ZeroTotalSpan.into());
        }
    }
    if axes.total_pixel_width() == 0 || axes.total_pixel_height() == 0 {
        return Err(ConfigurationError::ZeroTotalSpan.into());
    }

    let ratios = PartitionRatios {
        cols: col_edges.ratios(),
        rows: row_edges.ratios(),
    };
    tracing::debug!(
        ?basis,
        cols = ?ratios.cols,
        rows = ?ratios.rows,
        "planned monitor layout"
    );

    let col_pixel_prefix = prefix_sums(&axes.col_pixel_widths);
    let row_pixel_prefix = prefix_sums(&axes.row_pixel_heights);

    Ok(LayoutPlan {
        grid: grid.clone(),
        monitors,
        basis,
        axes,
        ratios,
        col_edges,
        row_edges,
        col_pixel_prefix,
        row_pixel_prefix,
    })
}

fn prefix_sums(spans: &[u32]) -> Vec<u32> {
    let mut acc = 0u32;
    spans
        .iter()
        .map(|&s| {
            let start = acc;
            acc = acc.saturating_add(s);
            start
        })
        .collect()
}

impl LayoutPlan {
    /// The validated grid.
    pub fn grid(&self) -> &MonitorGrid {
        &self.grid
    }

    /// Bounding box of the enabled positions.
    pub fn extent(&self) -> GridExtent {
        self.grid.extent()
    }

    /// Partition basis in effect.
    pub fn basis(&self) -> PartitionBasis {
        self.basis
    }

    /// Per-row/column spans.
    pub fn axes(&self) -> &AxisProfile {
        &self.axes
    }

    /// Partition ratios along each axis.
    pub fn ratios(&self) -> &PartitionRatios {
        &self.ratios
    }

    /// Settings of an enabled monitor.
    pub fn spec(&self, pos: Position) -> Option<&MonitorSpec> {
        self.monitors.get(&pos)
    }

    /// Enabled monitors in row-major order.
    pub fn monitors(&self) -> impl Iterator<Item = (Position, &MonitorSpec)> + '_ {
        self.monitors.iter().map(|(&p, s)| (p, s))
    }

    /// Total basis span as `(columns, rows)`, in inches or pixels.
    pub fn total_span(&self) -> (f64, f64) {
        (self.col_edges.total(), self.row_edges.total())
    }

    /// Size of the combined canvas.
    pub fn canvas_size(&self) -> Size {
        Size::new(self.axes.total_pixel_width(), self.axes.total_pixel_height())
    }

    /// Fraction of the source image covered by `pos`'s cell, before offsets.
    pub fn fractions(&self, pos: Position) -> Option<SectionFractions> {
        let (r, c) = self.extent().index_of(pos)?;
        let (left, right) = self.col_edges.fractions(c)?;
        let (top, bottom) = self.row_edges.fractions(r)?;
        Some(SectionFractions {
            left,
            top,
            right,
            bottom,
        })
    }

    /// Pixel cell `(x, y, width, height)` that `pos` occupies on the canvas.
    pub fn cell(&self, pos: Position) -> Option<(u32, u32, u32, u32)> {
        let (r, c) = self.extent().index_of(pos)?;
        Some((
            *self.col_pixel_prefix.get(c)?,
            *self.row_pixel_prefix.get(r)?,
            *self.axes.col_pixel_widths.get(c)?,
            *self.axes.row_pixel_heights.get(r)?,
        ))
    }

    /// Top-left corner where `pos`'s final image is pasted on the combined
    /// canvas: centered horizontally in its column, aligned vertically in
    /// its row, then shifted by the monitor's canvas offset.
    pub fn placement(&self, pos: Position) -> Option<(i64, i64)> {
        let spec = self.spec(pos)?;
        let (cx, cy, cw, ch) = self.cell(pos)?;
        let w = spec.resolution.width;
        let h = spec.resolution.height;
        let x = cx as i64 + (cw.saturating_sub(w) / 2) as i64;
        let y = cy as i64 + spec.align.offset(ch, h) as i64 + spec.canvas_offset_y as i64;
        Some((x, y))
    }
}
