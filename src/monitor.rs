//! Per-monitor settings and the preset catalogs a configuration surface
//! offers.

use alloc::borrow::Cow;
use alloc::vec::Vec;

#[cfg(not(feature = "std"))]
use num_traits::Float;

use crate::error::ConfigurationError;
use crate::geometry::Size;
use crate::grid::Position;

/// Physical size used when a monitor's size is left at `Default`:
/// a 24" 16:9 panel.
pub const DEFAULT_PHYSICAL: PhysicalSize = PhysicalSize {
    width: 24.0,
    height: 13.5,
};

/// Vertical placement of a monitor within its row on the combined canvas.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum VerticalAlign {
    #[default]
    Top,
    Center,
    Bottom,
}

impl VerticalAlign {
    /// Offset of an image of height `h` inside a cell of height `cell_h`.
    pub const fn offset(self, cell_h: u32, h: u32) -> u32 {
        let space = cell_h.saturating_sub(h);
        match self {
            Self::Top => 0,
            Self::Center => space / 2,
            Self::Bottom => space,
        }
    }

    /// Parse `top`, `center`/`middle`, or `bottom`, case-insensitive.
    pub fn from_name(s: &str) -> Option<Self> {
        let s = s.trim();
        if s.eq_ignore_ascii_case("top") {
            Some(Self::Top)
        } else if s.eq_ignore_ascii_case("center") || s.eq_ignore_ascii_case("middle") {
            Some(Self::Center)
        } else if s.eq_ignore_ascii_case("bottom") {
            Some(Self::Bottom)
        } else {
            None
        }
    }
}

/// Physical panel dimensions in inches.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct PhysicalSize {
    pub width: f64,
    pub height: f64,
}

impl PhysicalSize {
    /// Create a physical size.
    pub const fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    /// Derive width and height from a diagonal and the resolution's aspect
    /// ratio, assuming square pixels.
    pub fn from_diagonal(resolution: Size, diagonal: f64) -> Self {
        let w = resolution.width as f64;
        let h = resolution.height as f64;
        let ppi = (w * w + h * h).sqrt() / diagonal;
        Self {
            width: w / ppi,
            height: h / ppi,
        }
    }

    fn is_valid(&self) -> bool {
        self.width.is_finite() && self.height.is_finite() && self.width > 0.0 && self.height > 0.0
    }
}

/// How a monitor's physical size is specified.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub enum MonitorSize {
    /// Not specified; [`DEFAULT_PHYSICAL`] is assumed.
    #[default]
    Default,
    /// Diagonal in inches.
    Diagonal(f64),
    /// Width and height in inches.
    Physical(PhysicalSize),
}

impl MonitorSize {
    /// Whether a size was given explicitly.
    pub fn is_explicit(&self) -> bool {
        !matches!(self, Self::Default)
    }
}

/// Settings for one monitor.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct MonitorSpec {
    /// Pixel resolution.
    pub resolution: Size,
    /// Physical size.
    pub size: MonitorSize,
    /// Vertical alignment within its row on the combined canvas.
    pub align: VerticalAlign,
    /// Viewport shift, in inches under the physical basis or pixels under
    /// the pixel basis. Positive values move the crop window left/up.
    pub offset_x: i32,
    /// See [`offset_x`](Self::offset_x).
    pub offset_y: i32,
    /// Extra vertical pixel shift when pasting onto the combined canvas.
    pub canvas_offset_y: i32,
}

impl MonitorSpec {
    /// A monitor with the given resolution and default everything else.
    pub const fn new(width: u32, height: u32) -> Self {
        Self {
            resolution: Size::new(width, height),
            size: MonitorSize::Default,
            align: VerticalAlign::Top,
            offset_x: 0,
            offset_y: 0,
            canvas_offset_y: 0,
        }
    }

    /// Set the diagonal size in inches.
    pub fn diagonal(mut self, inches: f64) -> Self {
        self.size = MonitorSize::Diagonal(inches);
        self
    }

    /// Set the physical width and height in inches.
    pub fn physical(mut self, width: f64, height: f64) -> Self {
        self.size = MonitorSize::Physical(PhysicalSize::new(width, height));
        self
    }

    /// Set vertical alignment.
    pub fn align(mut self, align: VerticalAlign) -> Self {
        self.align = align;
        self
    }

    /// Set the viewport shift.
    pub fn offset(mut self, x: i32, y: i32) -> Self {
        self.offset_x = x;
        self.offset_y = y;
        self
    }

    /// Set the extra vertical pixel shift on the combined canvas.
    pub fn canvas_offset_y(mut self, y: i32) -> Self {
        self.canvas_offset_y = y;
        self
    }

    /// Resolved physical size in inches.
    pub fn physical_size(&self) -> PhysicalSize {
        match self.size {
            MonitorSize::Default => DEFAULT_PHYSICAL,
            MonitorSize::Diagonal(d) => PhysicalSize::from_diagonal(self.resolution, d),
            MonitorSize::Physical(p) => p,
        }
    }

    /// Reject zero resolutions and non-positive or non-finite sizes.
    pub fn validate(&self, pos: Position) -> Result<(), ConfigurationError> {
        if self.resolution.is_empty() {
            return Err(ConfigurationError::ZeroResolution(pos));
        }
        let size_ok = match self.size {
            MonitorSize::Default => true,
            MonitorSize::Diagonal(d) => d.is_finite() && d > 0.0,
            MonitorSize::Physical(p) => p.is_valid(),
        };
        if !size_ok || !self.physical_size().is_valid() {
            return Err(ConfigurationError::InvalidPhysicalSize(pos));
        }
        Ok(())
    }
}

impl Default for MonitorSpec {
    fn default() -> Self {
        Self::new(1920, 1080)
    }
}

/// A named preset, e.g. `("FHD", 1920×1080)`.
#[derive(Clone, Debug, PartialEq)]
pub struct Preset<T> {
    /// Short lookup key, matched case-insensitively.
    pub key: Cow<'static, str>,
    /// Human-readable label.
    pub label: Cow<'static, str>,
    pub value: T,
}

/// Named resolutions offered to the user. Injectable so callers can ship
/// their own list.
#[derive(Clone, Debug, PartialEq)]
pub struct ResolutionCatalog {
    presets: Vec<Preset<Size>>,
}

const STANDARD_RESOLUTIONS: &[(&str, &str, u32, u32)] = &[
    ("hd", "HD (1280x720)", 1280, 720),
    ("fhd", "FHD (1920x1080)", 1920, 1080),
    ("qhd", "QHD (2560x1440)", 2560, 1440),
    ("2k", "2K (2048x1080)", 2048, 1080),
    ("4k", "4K (3840x2160)", 3840, 2160),
    ("5k", "5K (5120x2880)", 5120, 2880),
    ("6k", "6K (6144x3160)", 6144, 3160),
    ("8k", "8K (7680x4320)", 7680, 4320),
    ("16k", "16K (15360x8640)", 15360, 8640),
];

impl ResolutionCatalog {
    /// Build from arbitrary presets. The first one is the default.
    pub fn new(presets: Vec<Preset<Size>>) -> Self {
        Self { presets }
    }

    /// HD through 16K.
    pub fn standard() -> Self {
        Self::new(
            STANDARD_RESOLUTIONS
                .iter()
                .map(|&(key, label, w, h)| Preset {
                    key: Cow::Borrowed(key),
                    label: Cow::Borrowed(label),
                    value: Size::new(w, h),
                })
                .collect(),
        )
    }

    /// Look up a preset by key, case-insensitive.
    pub fn get(&self, key: &str) -> Option<Size> {
        let key = key.trim();
        self.presets
            .iter()
            .find(|p| p.key.eq_ignore_ascii_case(key))
            .map(|p| p.value)
    }

    /// Resolution used when none is configured: FHD if present, otherwise
    /// the first preset, otherwise 1920×1080.
    pub fn default_resolution(&self) -> Size {
        self.get("fhd")
            .or_else(|| self.presets.first().map(|p| p.value))
            .unwrap_or(Size::new(1920, 1080))
    }

    /// All presets in display order.
    pub fn presets(&self) -> &[Preset<Size>] {
        &self.presets
    }
}

impl Default for ResolutionCatalog {
    fn default() -> Self {
        Self::standard()
    }
}

/// Common panel diagonals offered to the user, in inches.
#[derive(Clone, Debug, PartialEq)]
pub struct SizeCatalog {
    diagonals: Vec<f64>,
}

impl SizeCatalog {
    /// Valid range for a custom diagonal.
    pub const CUSTOM_RANGE: (f64, f64) = (10.0, 100.0);

    /// Build from arbitrary diagonals.
    pub fn new(diagonals: Vec<f64>) -> Self {
        Self { diagonals }
    }

    /// 21.5" through 49".
    pub fn standard() -> Self {
        Self::new([21.5, 24.0, 27.0, 32.0, 34.0, 43.0, 49.0].to_vec())
    }

    /// Listed diagonals.
    pub fn diagonals(&self) -> &[f64] {
        &self.diagonals
    }

    /// Whether `inches` is a listed diagonal or inside [`CUSTOM_RANGE`](Self::CUSTOM_RANGE).
    pub fn accepts(&self, inches: f64) -> bool {
        let (lo, hi) = Self::CUSTOM_RANGE;
        self.diagonals.iter().any(|d| d.to_bits() == inches.to_bits())
            || (lo..=hi).contains(&inches)
    }
}

impl Default for SizeCatalog {
    fn default() -> Self {
        Self::standard()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn diagonal_27_qhd() {
        let p = PhysicalSize::from_diagonal(Size::new(2560, 1440), 27.0);
        assert!((p.width - 23.53).abs() < 0.01, "{p:?}");
        assert!((p.height - 13.24).abs() < 0.01, "{p:?}");
        // Aspect ratio preserved.
        assert!((p.width / p.height - 2560.0 / 1440.0).abs() < 1e-9);
    }

    #[test]
    fn default_size_is_fixed_pair() {
        let spec = MonitorSpec::new(3840, 2160);
        assert_eq!(spec.physical_size(), DEFAULT_PHYSICAL);
    }

    #[test]
    fn validate_rejects_zero_resolution() {
        let pos = Position::ORIGIN;
        assert_eq!(
            MonitorSpec::new(0, 1080).validate(pos),
            Err(ConfigurationError::ZeroResolution(pos))
        );
    }

    #[test]
    fn validate_rejects_bad_sizes() {
        let pos = Position::new(2, 3);
        for spec in [
            MonitorSpec::new(1920, 1080).diagonal(0.0),
            MonitorSpec::new(1920, 1080).diagonal(-5.0),
            MonitorSpec::new(1920, 1080).diagonal(f64::NAN),
            MonitorSpec::new(1920, 1080).physical(20.0, 0.0),
        ] {
            assert_eq!(
                spec.validate(pos),
                Err(ConfigurationError::InvalidPhysicalSize(pos)),
                "{spec:?}"
            );
        }
        assert!(MonitorSpec::new(1920, 1080).diagonal(24.0).validate(pos).is_ok());
    }

    #[test]
    fn align_offsets() {
        assert_eq!(VerticalAlign::Top.offset(1440, 1080), 0);
        assert_eq!(VerticalAlign::Center.offset(1440, 1080), 180);
        assert_eq!(VerticalAlign::Bottom.offset(1440, 1080), 360);
        assert_eq!(VerticalAlign::Bottom.offset(1080, 1440), 0);
        assert_eq!(VerticalAlign::from_name(" Middle "), Some(VerticalAlign::Center));
    }

    #[test]
    fn standard_catalog_lookup() {
        let c = ResolutionCatalog::standard();
        assert_eq!(c.get("QHD"), Some(Size::new(2560, 1440)));
        assert_eq!(c.get("2k"), Some(Size::new(2048, 1080)));
        assert_eq!(c.get("12k"), None);
        assert_eq!(c.default_resolution(), Size::new(1920, 1080));
        assert_eq!(c.presets().len(), 9);
    }

    #[test]
    fn injected_catalog_overrides_values() {
        let c = ResolutionCatalog::new(
            [Preset {
                key: Cow::Borrowed("qhd"),
                label: Cow::Borrowed("QHD (2563x1440)"),
                value: Size::new(2563, 1440),
            }]
            .to_vec(),
        );
        assert_eq!(c.get("qhd"), Some(Size::new(2563, 1440)));
        assert_eq!(c.default_resolution(), Size::new(2563, 1440));
    }

    #[test]
    fn size_catalog_accepts_custom_range() {
        let c = SizeCatalog::standard();
        assert!(c.accepts(21.5));
        assert!(c.accepts(55.0));
        assert!(!c.accepts(5.0));
        assert!(!c.accepts(120.0));
    }
}
