//! Multi-monitor wallpaper layout: partition one image across a grid of
//! monitors with mixed resolutions and physical sizes.
//!
//! Monitors sit on a small grid around the primary at `(2,2)`. Each column is
//! as wide as its widest monitor and each row as tall as its tallest; the
//! source image is split in proportion to those spans, either in physical
//! inches (so a picture stays continuous across panels of different pixel
//! density) or in pixels. Every monitor's section is then fitted to its exact
//! resolution and either written out individually or pasted onto one
//! combined canvas.
//!
//! Layout math is `no_std` + `alloc`; pixel work needs the default `std`
//! feature.
//!
//! # Modules
//!
//! - [`grid`] — grid positions and connectivity validation
//! - [`monitor`] — per-monitor settings, resolution and size catalogs
//! - [`layout`] — column/row spans and partition ratios
//! - [`section`] — crop rectangle of each monitor on a source image
//! - [`compose`] — fit to resolution, split or combined output
//! - [`job`] — validated configuration snapshot that renders images
//! - [`geometry`] — sizes, rects, anchors, fit computation
//!
//! # Example
//!
//! ```
//! use zenwall::{MonitorSpec, Position, Settings, Size};
//!
//! let wallpaper = Settings::new()
//!     .monitor(Position::new(2, 2), MonitorSpec::new(1920, 1080))
//!     .monitor(Position::new(2, 3), MonitorSpec::new(1920, 1080))
//!     .build()
//!     .unwrap();
//!
//! let sections = wallpaper.sections(Size::new(4000, 1000)).unwrap();
//! assert_eq!((sections[0].left, sections[0].right), (0, 2000));
//! assert_eq!((sections[1].left, sections[1].right), (2000, 4000));
//! assert_eq!(wallpaper.plan().canvas_size(), Size::new(3840, 1080));
//! ```

#![cfg_attr(not(feature = "std"), no_std)]
#![forbid(unsafe_code)]

extern crate alloc;

pub mod compose;
pub mod error;
pub mod geometry;
pub mod grid;
pub mod job;
pub mod layout;
pub mod monitor;
#[cfg(feature = "query")]
pub mod query;
pub mod section;
#[cfg(feature = "svg")]
pub mod svg;

pub use compose::{OutputMode, combined_name, split_name};
#[cfg(feature = "std")]
pub use compose::{OutputImage, assemble, compose};
pub use error::{ConfigurationError, LayoutError};
pub use geometry::{Anchor, Fit, FitMode, Gravity, Rect, Size};
pub use grid::{GridExtent, MonitorGrid, Position, is_valid_grid};
pub use job::{Settings, Wallpaper};
pub use layout::{
    AxisProfile, LayoutPlan, PartitionBasis, PartitionRatios, SectionFractions, plan,
};
pub use monitor::{
    DEFAULT_PHYSICAL, MonitorSize, MonitorSpec, PhysicalSize, Preset, ResolutionCatalog,
    SizeCatalog, VerticalAlign,
};
#[cfg(feature = "std")]
pub use section::extract_section;
pub use section::{SourceSection, section_rect};
