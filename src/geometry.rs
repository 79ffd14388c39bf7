//! Sizes, rectangles, anchors, and the fit computation used per monitor.
//!
//! Pure geometry, no pixel operations. [`FitMode::compute`] decides which
//! region of an extracted section to keep and what to resize it to; the
//! pixel work happens in [`compose`](crate::compose).
//!
//! # Example
//!
//! ```
//! use zenwall::{Anchor, FitMode, Size};
//!
//! let fit = FitMode::Fill
//!     .compute(Size::new(1000, 500), Size::new(400, 300), Anchor::Center.gravity());
//!
//! // Section cropped to 4:3, then resized to the monitor.
//! assert_eq!(fit.resize_to, Size::new(400, 300));
//! assert!(fit.source_crop.is_some());
//! ```

#[cfg(not(feature = "std"))]
use num_traits::Float;

/// How an extracted section is fitted to its monitor's resolution.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum FitMode {
    /// Scale to the exact monitor resolution, distorting aspect ratio.
    /// Never crops.
    Stretch,
    /// Scale uniformly to cover the monitor, crop the overflow at the
    /// configured [`Anchor`].
    #[default]
    Fill,
}

/// Where to position the kept region when cropping.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub enum Gravity {
    /// Center on both axes.
    #[default]
    Center,
    /// Position by fraction. `(0.0, 0.0)` = top-left, `(1.0, 1.0)` = bottom-right.
    Percentage(f32, f32),
}

/// Named focal point for [`FitMode::Fill`].
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum Anchor {
    #[default]
    Center,
    Top,
    Bottom,
    Left,
    Right,
    TopLeft,
    TopRight,
    BottomLeft,
    BottomRight,
}

impl Anchor {
    /// All anchors, in the order a picker would list them.
    pub const ALL: [Self; 9] = [
        Self::Center,
        Self::Top,
        Self::Bottom,
        Self::Left,
        Self::Right,
        Self::TopLeft,
        Self::TopRight,
        Self::BottomLeft,
        Self::BottomRight,
    ];

    /// Horizontal and vertical anchor fractions (0.0–1.0).
    pub const fn fractions(self) -> (f32, f32) {
        match self {
            Self::Center => (0.5, 0.5),
            Self::Top => (0.5, 0.0),
            Self::Bottom => (0.5, 1.0),
            Self::Left => (0.0, 0.5),
            Self::Right => (1.0, 0.5),
            Self::TopLeft => (0.0, 0.0),
            Self::TopRight => (1.0, 0.0),
            Self::BottomLeft => (0.0, 1.0),
            Self::BottomRight => (1.0, 1.0),
        }
    }

    /// Gravity used by the crop computation.
    pub fn gravity(self) -> Gravity {
        match self {
            Self::Center => Gravity::Center,
            other => {
                let (x, y) = other.fractions();
                Gravity::Percentage(x, y)
            }
        }
    }

    /// Display name, e.g. `"Top-Left"`.
    pub const fn name(self) -> &'static str {
        match self {
            Self::Center => "Center",
            Self::Top => "Top",
            Self::Bottom => "Bottom",
            Self::Left => "Left",
            Self::Right => "Right",
            Self::TopLeft => "Top-Left",
            Self::TopRight => "Top-Right",
            Self::BottomLeft => "Bottom-Left",
            Self::BottomRight => "Bottom-Right",
        }
    }

    /// Parse a display name. Case-insensitive; `-`, `_` and spaces are ignored,
    /// so `"top-left"`, `"TopLeft"` and `"top_left"` are all accepted.
    pub fn from_name(s: &str) -> Option<Self> {
        let mut key = [0u8; 16];
        let mut n = 0;
        for b in s.trim().bytes() {
            if matches!(b, b'-' | b'_' | b' ') {
                continue;
            }
            *key.get_mut(n)? = b.to_ascii_lowercase();
            n += 1;
        }
        match &key[..n] {
            b"center" | b"middle" => Some(Self::Center),
            b"top" => Some(Self::Top),
            b"bottom" => Some(Self::Bottom),
            b"left" => Some(Self::Left),
            b"right" => Some(Self::Right),
            b"topleft" => Some(Self::TopLeft),
            b"topright" => Some(Self::TopRight),
            b"bottomleft" => Some(Self::BottomLeft),
            b"bottomright" => Some(Self::BottomRight),
            _ => None,
        }
    }
}

/// Width × height dimensions in pixels.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct Size {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
}

impl Size {
    /// Create a new size.
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// Whether either dimension is zero.
    pub const fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }
}

/// Axis-aligned rectangle in pixel coordinates.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct Rect {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

impl Rect {
    /// Create a new rect.
    pub const fn new(x: u32, y: u32, width: u32, height: u32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Build from edge coordinates. `right`/`bottom` are exclusive.
    pub const fn from_edges(left: u32, top: u32, right: u32, bottom: u32) -> Self {
        Self {
            x: left,
            y: top,
            width: right.saturating_sub(left),
            height: bottom.saturating_sub(top),
        }
    }

    /// Exclusive right edge.
    pub const fn right(&self) -> u32 {
        self.x + self.width
    }

    /// Exclusive bottom edge.
    pub const fn bottom(&self) -> u32 {
        self.y + self.height
    }

    /// Whether this rect covers the full source (no actual crop).
    pub fn is_full(&self, source_w: u32, source_h: u32) -> bool {
        self.x == 0 && self.y == 0 && self.width == source_w && self.height == source_h
    }
}

/// Result of fitting a section to a monitor.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct Fit {
    /// Region of the section to keep. `None` = whole section.
    pub source_crop: Option<Rect>,
    /// Final dimensions; always the monitor resolution.
    pub resize_to: Size,
}

impl FitMode {
    /// Compute which part of a `source` sized section is kept and what it
    /// is resized to for a `target` sized monitor.
    ///
    /// Both sizes must be non-empty; empty inputs yield a 1×1 result so
    /// callers never see a zero-sized buffer.
    pub fn compute(self, source: Size, target: Size, gravity: Gravity) -> Fit {
        let source = Size::new(source.width.max(1), source.height.max(1));
        let target = Size::new(target.width.max(1), target.height.max(1));
        let source_crop = match self {
            Self::Stretch => None,
            Self::Fill => {
                let r = crop_to_aspect(
                    source.width,
                    source.height,
                    target.width,
                    target.height,
                    &gravity,
                );
                (!r.is_full(source.width, source.height)).then_some(r)
            }
        };
        Fit {
            source_crop,
            resize_to: target,
        }
    }
}

// ============================================================================
// Internal geometry
// ============================================================================

/// Crop source to match target aspect ratio.
fn crop_to_aspect(sw: u32, sh: u32, tw: u32, th: u32, gravity: &Gravity) -> Rect {
    // Cross-multiplication catches exact matches without float comparison.
    let cross_s = sw as u64 * th as u64;
    let cross_t = sh as u64 * tw as u64;
    if cross_s == cross_t {
        return Rect::new(0, 0, sw, sh);
    }

    if cross_s > cross_t {
        // Section is wider: keep full height, new_w = sh * tw / th.
        let new_w = proportional(tw, th, sh, false, sw, sh);
        if new_w >= sw {
            return Rect::new(0, 0, sw, sh);
        }
        let x = gravity_offset_1d(sw - new_w, gravity, true);
        Rect::new(x, 0, new_w, sh)
    } else {
        // Section is taller: keep full width, new_h = sw * th / tw.
        let new_h = proportional(tw, th, sw, true, sw, sh);
        if new_h >= sh {
            return Rect::new(0, 0, sw, sh);
        }
        let y = gravity_offset_1d(sh - new_h, gravity, false);
        Rect::new(0, y, sw, new_h)
    }
}

pub(crate) fn gravity_offset_1d(space: u32, gravity: &Gravity, horizontal: bool) -> u32 {
    if space == 0 {
        return 0;
    }
    match gravity {
        Gravity::Center => space / 2,
        Gravity::Percentage(x, y) => {
            let pct = if horizontal { *x } else { *y };
            (space as f64 * pct.clamp(0.0, 1.0) as f64).round() as u32
        }
    }
}

/// Compute the free dimension proportionally, with snap-aware rounding.
///
/// Given a ratio source (`ratio_w`×`ratio_h`), a fixed dimension (`basis`,
/// `basis_is_width`), and a snap target (`target_w`×`target_h`), snap to
/// whichever candidate has less rounding error so that e.g. a 3:1 ratio at
/// height 33 yields 100 rather than 99.
fn proportional(
    ratio_w: u32,
    ratio_h: u32,
    basis: u32,
    basis_is_width: bool,
    target_w: u32,
    target_h: u32,
) -> u32 {
    let ratio = ratio_w as f64 / ratio_h as f64;

    let snap_amount = if basis_is_width {
        rounding_loss_height(ratio_w, ratio_h, target_h)
    } else {
        rounding_loss_width(ratio_w, ratio_h, target_w)
    };

    let snap_a = if basis_is_width { ratio_h } else { ratio_w };
    let snap_b = if basis_is_width { target_h } else { target_w };

    let float = if basis_is_width {
        basis as f64 / ratio
    } else {
        ratio * basis as f64
    };

    let delta_a = (float - snap_a as f64).abs();
    let delta_b = (float - snap_b as f64).abs();

    let v = if delta_a <= snap_amount && delta_a <= delta_b {
        snap_a
    } else if delta_b <= snap_amount {
        snap_b
    } else {
        float.round() as u32
    };

    v.max(1)
}

fn rounding_loss_width(ratio_w: u32, ratio_h: u32, target_width: u32) -> f64 {
    let ratio = ratio_w as f64 / ratio_h as f64;
    let recreate_y = ratio_h as f64 * (target_width as f64 / ratio_w as f64);
    let recreate_x_from_rounded_y = recreate_y.round() * ratio;
    (target_width as f64 - recreate_x_from_rounded_y).abs()
}

fn rounding_loss_height(ratio_w: u32, ratio_h: u32, target_height: u32) -> f64 {
    let ratio = ratio_w as f64 / ratio_h as f64;
    let recreate_x = ratio_w as f64 * (target_height as f64 / ratio_h as f64);
    let recreate_y_from_rounded_x = recreate_x.round() / ratio;
    (target_height as f64 - recreate_y_from_rounded_x).abs()
}
