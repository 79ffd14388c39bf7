//! Parsed representation of a configuration query string.

use alloc::collections::{BTreeMap, BTreeSet};

use crate::geometry::{Anchor, FitMode, Size};
use crate::grid::Position;
use crate::layout::PartitionBasis;
use crate::monitor::{MonitorSize, VerticalAlign};

/// Per-monitor keys (`m{row}.{col}.*`).
#[derive(Debug, Clone, Default, PartialEq)]
#[non_exhaustive]
pub struct MonitorInstructions {
    /// Resolution (`res`), preset already resolved through the catalog.
    pub resolution: Option<Size>,
    /// Physical size (`size`).
    pub size: Option<MonitorSize>,
    /// Vertical alignment (`align`).
    pub align: Option<VerticalAlign>,
    /// Viewport shift (`ox`, `oy`).
    pub offset_x: Option<i32>,
    pub offset_y: Option<i32>,
    /// Canvas nudge (`cy`).
    pub canvas_offset_y: Option<i32>,
}

/// Parsed configuration.
///
/// Produced by [`crate::query::parse()`], consumed by
/// [`to_settings()`](Self::to_settings).
#[derive(Debug, Clone, Default, PartialEq)]
#[non_exhaustive]
pub struct Instructions {
    /// Enabled positions (`monitors`). Absent means only the origin.
    pub monitors: Option<BTreeSet<Position>>,
    /// Fit mode (`fit`).
    pub fit: Option<FitMode>,
    /// Global anchor (`anchor`).
    pub anchor: Option<Anchor>,
    /// Split output (`split`).
    pub split: Option<bool>,
    /// Partition basis (`basis`).
    pub basis: Option<PartitionBasis>,
    /// Per-monitor settings, including for positions not enabled.
    pub per_monitor: BTreeMap<Position, MonitorInstructions>,
}

impl Instructions {
    /// Create empty instructions.
    pub fn new() -> Self {
        Self::default()
    }

    /// Settings for `pos`, if any key mentioned it.
    pub fn monitor(&self, pos: Position) -> Option<&MonitorInstructions> {
        self.per_monitor.get(&pos)
    }
}
