//! Configuration from a `key=value&...` query string.
//!
//! This is the text form of the configuration form: which grid positions are
//! enabled, the global fit/anchor/output choices, and per-monitor settings
//! under `m{row}.{col}.*` keys.
//!
//! | key | value |
//! |-----|-------|
//! | `monitors` | `2.2,2.3` (row.col list) |
//! | `fit` | `fill` \| `stretch` |
//! | `anchor` | `center`, `top-left`, ... |
//! | `split` | `true` \| `false` |
//! | `basis` | `physical` \| `pixel` |
//! | `m2.3.res` | catalog key (`qhd`) or `2560x1440` |
//! | `m2.3.size` | `default`, diagonal (`27`, `27in`) or `23.5x13.2in` |
//! | `m2.3.align` | `top` \| `center` \| `bottom` |
//! | `m2.3.ox`, `m2.3.oy` | viewport offset |
//! | `m2.3.cy` | combined-canvas y nudge in pixels |
//!
//! # Example
//!
//! ```
//! use zenwall::query;
//! use zenwall::{Position, ResolutionCatalog, Size};
//!
//! let result = query::parse("monitors=2.2,2.3&fit=fill&m2.3.res=qhd&m2.3.size=27");
//! assert!(result.warnings.is_empty());
//!
//! let settings = result.instructions.to_settings(&ResolutionCatalog::standard());
//! let wallpaper = settings.build().expect("valid layout");
//! let spec = wallpaper.plan().spec(Position::new(2, 3)).unwrap();
//! assert_eq!(spec.resolution, Size::new(2560, 1440));
//! ```

mod convert;
pub mod instructions;
mod parse;

pub use instructions::{Instructions, MonitorInstructions};

use alloc::string::String;
use alloc::vec::Vec;

use crate::monitor::{ResolutionCatalog, SizeCatalog};

/// Result of parsing a configuration query string.
#[derive(Debug, Clone)]
pub struct ParseResult {
    /// Parsed configuration.
    pub instructions: Instructions,
    /// Non-fatal parse warnings.
    pub warnings: Vec<ParseWarning>,
}

/// Non-fatal warning from query string parsing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseWarning {
    /// A key appeared more than once (last value wins).
    DuplicateKey { key: String, value: String },
    /// A key was not recognized.
    KeyNotRecognized { key: String, value: String },
    /// A key was recognized but its value could not be parsed.
    ValueInvalid {
        key: String,
        value: String,
        reason: &'static str,
    },
}

/// Parse a query string (with or without leading `?`), resolving resolution
/// presets through the standard catalog.
pub fn parse(query: &str) -> ParseResult {
    parse_with_catalog(query, &ResolutionCatalog::standard())
}

/// Like [`parse`], with a caller-supplied resolution catalog.
pub fn parse_with_catalog(query: &str, catalog: &ResolutionCatalog) -> ParseResult {
    parse_with_catalogs(query, catalog, &SizeCatalog::standard())
}

/// Like [`parse`], with caller-supplied resolution and size catalogs.
/// Diagonals listed in `sizes` are accepted even outside
/// [`SizeCatalog::CUSTOM_RANGE`].
pub fn parse_with_catalogs(
    query: &str,
    resolutions: &ResolutionCatalog,
    sizes: &SizeCatalog,
) -> ParseResult {
    let catalogs = parse::Catalogs { resolutions, sizes };
    let (instructions, warnings) = parse::parse_query(query, catalogs);
    for w in &warnings {
        tracing::debug!(warning = ?w, "query");
    }
    ParseResult {
        instructions,
        warnings,
    }
}
