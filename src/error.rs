//! Errors raised before any pixels are touched.

use core::fmt;

use crate::grid::Position;

/// Fatal layout error. Nothing is rendered when one of these is returned.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum LayoutError {
    /// Enabled positions are empty, miss the origin `(2,2)`, or are not
    /// a single 4-connected region.
    InvalidGrid,
    /// Degenerate monitor measurements.
    Configuration(ConfigurationError),
    /// Source image has zero width or height.
    ZeroSourceDimension,
}

/// Degenerate configuration detected while planning.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum ConfigurationError {
    /// An enabled position has no [`MonitorSpec`](crate::MonitorSpec).
    MissingSpec(Position),
    /// Pixel width or height is zero.
    ZeroResolution(Position),
    /// Diagonal or physical width/height is zero, negative, or not finite.
    InvalidPhysicalSize(Position),
    /// Sum of spans along an axis is zero.
    ZeroTotalSpan,
}

impl From<ConfigurationError> for LayoutError {
    fn from(e: ConfigurationError) -> Self {
        Self::Configuration(e)
    }
}

impl fmt::Display for LayoutError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidGrid => f.write_str(
                "monitors must form one connected region that includes position (2,2)",
            ),
            Self::Configuration(e) => write!(f, "invalid monitor configuration: {e}"),
            Self::ZeroSourceDimension => f.write_str("source image has zero width or height"),
        }
    }
}

impl fmt::Display for ConfigurationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingSpec(p) => write!(f, "no settings for enabled monitor {p}"),
            Self::ZeroResolution(p) => write!(f, "monitor {p} has a zero pixel dimension"),
            Self::InvalidPhysicalSize(p) => write!(f, "monitor {p} has an invalid physical size"),
            Self::ZeroTotalSpan => f.write_str("total span along an axis is zero"),
        }
    }
}

impl core::error::Error for LayoutError {
    fn source(&self) -> Option<&(dyn core::error::Error + 'static)> {
        match self {
            Self::Configuration(e) => Some(e),
            _ => None,
        }
    }
}

impl core::error::Error for ConfigurationError {}
