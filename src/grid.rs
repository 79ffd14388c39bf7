//! Monitor positions and grid connectivity.
//!
//! Monitors sit in cells of a notional grid (3×3 in the usual form, larger
//! grids are fine). The arrangement is valid when it contains the origin
//! cell `(2,2)` and every enabled cell is reachable from it through
//! edge-sharing neighbours. Diagonal contact does not connect two cells.

use alloc::collections::BTreeSet;
use alloc::vec::Vec;
use core::fmt;

use crate::error::LayoutError;

/// Cell of the monitor grid, `(row, col)`, 1-based in the usual 3×3 form.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Position {
    pub row: u32,
    pub col: u32,
}

impl Position {
    /// The cell that must always be enabled.
    pub const ORIGIN: Self = Self::new(2, 2);

    /// Create a position.
    pub const fn new(row: u32, col: u32) -> Self {
        Self { row, col }
    }

    /// Edge-sharing neighbours (up, down, left, right). Cells that would
    /// fall off the top or left edge are skipped.
    pub fn neighbours(self) -> impl Iterator<Item = Self> {
        let up = self.row.checked_sub(1).map(|r| Self::new(r, self.col));
        let down = self.row.checked_add(1).map(|r| Self::new(r, self.col));
        let left = self.col.checked_sub(1).map(|c| Self::new(self.row, c));
        let right = self.col.checked_add(1).map(|c| Self::new(self.row, c));
        [up, down, left, right].into_iter().flatten()
    }
}

impl From<(u32, u32)> for Position {
    fn from((row, col): (u32, u32)) -> Self {
        Self::new(row, col)
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({},{})", self.row, self.col)
    }
}

/// Whether `enabled` contains the origin and forms one 4-connected region.
pub fn is_valid_grid(enabled: &BTreeSet<Position>) -> bool {
    if !enabled.contains(&Position::ORIGIN) {
        return false;
    }
    let mut visited = BTreeSet::new();
    let mut stack = Vec::with_capacity(enabled.len());
    visited.insert(Position::ORIGIN);
    stack.push(Position::ORIGIN);
    while let Some(pos) = stack.pop() {
        for next in pos.neighbours() {
            if enabled.contains(&next) && visited.insert(next) {
                stack.push(next);
            }
        }
    }
    visited.len() == enabled.len()
}

/// Bounding box of the enabled positions.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct GridExtent {
    pub min_row: u32,
    pub max_row: u32,
    pub min_col: u32,
    pub max_col: u32,
}

impl GridExtent {
    /// Number of rows spanned, holes included.
    pub const fn row_count(&self) -> usize {
        (self.max_row - self.min_row) as usize + 1
    }

    /// Number of columns spanned, holes included.
    pub const fn col_count(&self) -> usize {
        (self.max_col - self.min_col) as usize + 1
    }

    /// Zero-based `(row, col)` index of `pos` within the extent.
    pub fn index_of(&self, pos: Position) -> Option<(usize, usize)> {
        let r = pos.row.checked_sub(self.min_row)?;
        let c = pos.col.checked_sub(self.min_col)?;
        (pos.row <= self.max_row && pos.col <= self.max_col).then_some((r as usize, c as usize))
    }
}

/// A validated set of enabled monitor positions.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct MonitorGrid {
    enabled: BTreeSet<Position>,
    extent: GridExtent,
}

impl MonitorGrid {
    /// Validate `positions`. Fails with [`LayoutError::InvalidGrid`] when the
    /// origin is missing or the positions are not one connected region.
    pub fn new(positions: impl IntoIterator<Item = Position>) -> Result<Self, LayoutError> {
        let enabled: BTreeSet<Position> = positions.into_iter().collect();
        if !is_valid_grid(&enabled) {
            tracing::debug!(count = enabled.len(), "rejected monitor grid");
            return Err(LayoutError::InvalidGrid);
        }
        // Non-empty: the origin is present.
        let mut extent = GridExtent {
            min_row: Position::ORIGIN.row,
            max_row: Position::ORIGIN.row,
            min_col: Position::ORIGIN.col,
            max_col: Position::ORIGIN.col,
        };
        for p in &enabled {
            extent.min_row = extent.min_row.min(p.row);
            extent.max_row = extent.max_row.max(p.row);
            extent.min_col = extent.min_col.min(p.col);
            extent.max_col = extent.max_col.max(p.col);
        }
        Ok(Self { enabled, extent })
    }

    /// Validate `(row, col)` pairs.
    pub fn from_cells(cells: &[(u32, u32)]) -> Result<Self, LayoutError> {
        Self::new(cells.iter().copied().map(Position::from))
    }

    /// A grid with only the origin monitor.
    pub fn single() -> Self {
        let mut enabled = BTreeSet::new();
        enabled.insert(Position::ORIGIN);
        Self {
            enabled,
            extent: GridExtent {
                min_row: 2,
                max_row: 2,
                min_col: 2,
                max_col: 2,
            },
        }
    }

    /// Enabled positions in row-major order.
    pub fn positions(&self) -> impl Iterator<Item = Position> + '_ {
        self.enabled.iter().copied()
    }

    /// Whether `pos` is enabled.
    pub fn contains(&self, pos: Position) -> bool {
        self.enabled.contains(&pos)
    }

    /// Number of enabled monitors.
    pub fn len(&self) -> usize {
        self.enabled.len()
    }

    /// Always false; a valid grid holds at least the origin.
    pub fn is_empty(&self) -> bool {
        self.enabled.is_empty()
    }

    /// Bounding box of the enabled positions.
    pub fn extent(&self) -> GridExtent {
        self.extent
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn set(cells: &[(u32, u32)]) -> BTreeSet<Position> {
        cells.iter().copied().map(Position::from).collect()
    }

    #[test]
    fn origin_alone_is_valid() {
        assert!(is_valid_grid(&set(&[(2, 2)])));
    }

    #[test]
    fn empty_is_invalid() {
        assert!(!is_valid_grid(&BTreeSet::new()));
    }

    #[test]
    fn missing_origin_is_invalid() {
        assert!(!is_valid_grid(&set(&[(1, 1), (1, 2)])));
    }

    #[test]
    fn horizontal_pair_is_valid() {
        assert!(is_valid_grid(&set(&[(2, 2), (2, 3)])));
    }

    #[test]
    fn vertical_strip_is_valid() {
        assert!(is_valid_grid(&set(&[(1, 2), (2, 2), (3, 2)])));
    }

    #[test]
    fn diagonal_contact_is_invalid() {
        assert!(!is_valid_grid(&set(&[(2, 2), (1, 3)])));
        assert!(!is_valid_grid(&set(&[(2, 2), (1, 1)])));
    }

    #[test]
    fn l_shape_through_neighbour_is_valid() {
        // (1,1) touches (2,1) by an edge, which touches the origin.
        assert!(is_valid_grid(&set(&[(2, 1), (2, 2), (2, 3), (1, 1)])));
    }

    #[test]
    fn island_is_invalid() {
        assert!(!is_valid_grid(&set(&[(2, 2), (2, 3), (3, 1)])));
    }

    #[test]
    fn full_three_by_three_is_valid() {
        let all: Vec<(u32, u32)> = (1..=3).flat_map(|r| (1..=3).map(move |c| (r, c))).collect();
        assert!(is_valid_grid(&set(&all)));
    }

    #[test]
    fn larger_grid_is_valid() {
        assert!(is_valid_grid(&set(&[(2, 2), (2, 3), (2, 4), (2, 5), (3, 5)])));
    }

    #[test]
    fn row_zero_neighbours_do_not_underflow() {
        let n: Vec<Position> = Position::new(0, 0).neighbours().collect();
        assert_eq!(n, [Position::new(1, 0), Position::new(0, 1)]);
    }

    #[test]
    fn monitor_grid_extent() {
        let g = MonitorGrid::from_cells(&[(1, 2), (2, 2), (2, 3)]).unwrap();
        let e = g.extent();
        assert_eq!((e.min_row, e.max_row, e.min_col, e.max_col), (1, 2, 2, 3));
        assert_eq!((e.row_count(), e.col_count()), (2, 2));
        assert_eq!(e.index_of(Position::new(2, 3)), Some((1, 1)));
        assert_eq!(e.index_of(Position::new(3, 3)), None);
        assert_eq!(e.index_of(Position::new(1, 1)), None);
    }

    #[test]
    fn monitor_grid_rejects_disconnected() {
        assert_eq!(
            MonitorGrid::from_cells(&[(2, 2), (1, 3)]),
            Err(LayoutError::InvalidGrid)
        );
    }

    #[test]
    fn single_matches_new() {
        assert_eq!(MonitorGrid::single(), MonitorGrid::new([Position::ORIGIN]).unwrap());
    }
}
