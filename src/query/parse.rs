//! Query string tokenizer and value parsers.

use alloc::collections::BTreeSet;
use alloc::string::String;
use alloc::vec::Vec;

use super::ParseWarning;
use super::instructions::{Instructions, MonitorInstructions};
use crate::geometry::{Anchor, FitMode, Size};
use crate::grid::Position;
use crate::layout::PartitionBasis;
use crate::monitor::{MonitorSize, PhysicalSize, ResolutionCatalog, SizeCatalog, VerticalAlign};

/// Catalogs consulted while parsing values.
#[derive(Clone, Copy)]
pub(crate) struct Catalogs<'a> {
    pub resolutions: &'a ResolutionCatalog,
    pub sizes: &'a SizeCatalog,
}

pub(crate) fn parse_query(
    query: &str,
    catalog: Catalogs<'_>,
) -> (Instructions, Vec<ParseWarning>) {
    let mut inst = Instructions::new();
    let mut warnings = Vec::new();

    for pair in split_query(query) {
        let (raw_key, raw_value) = split_pair(pair);
        let key = percent_decode(raw_key).to_ascii_lowercase();
        let value = percent_decode(raw_value);

        dispatch_key(&key, value.trim(), catalog, &mut inst, &mut warnings);
    }

    (inst, warnings)
}

fn dispatch_key(
    key: &str,
    value: &str,
    catalog: Catalogs<'_>,
    inst: &mut Instructions,
    warnings: &mut Vec<ParseWarning>,
) {
    let mut w = Warner {
        key,
        value,
        warnings,
    };
    match key {
        "monitors" => w.set(&mut inst.monitors, parse_positions(value), "expected row.col list"),
        "fit" => w.set(&mut inst.fit, parse_fit(value), "expected fill|stretch"),
        "anchor" => w.set(&mut inst.anchor, Anchor::from_name(value), "expected anchor name"),
        "split" => w.set(&mut inst.split, parse_bool(value), "expected true|false"),
        "basis" => w.set(&mut inst.basis, parse_basis(value), "expected physical|pixel"),
        _ => match parse_monitor_key(key) {
            Some((pos, field)) => {
                let m = inst.per_monitor.entry(pos).or_default();
                dispatch_monitor_key(field, catalog, m, &mut w);
                if *m == MonitorInstructions::default() {
                    inst.per_monitor.remove(&pos);
                }
            }
            None => w.unrecognized(),
        },
    }
}

fn dispatch_monitor_key(
    field: &str,
    catalog: Catalogs<'_>,
    m: &mut MonitorInstructions,
    w: &mut Warner<'_>,
) {
    let value = w.value;
    match field {
        "res" | "resolution" => w.set(
            &mut m.resolution,
            parse_resolution(value, catalog.resolutions),
            "expected catalog key or WxH",
        ),
        "size" => w.set(
            &mut m.size,
            parse_size(value, catalog.sizes),
            "expected default, inches in 10-100 or WxHin",
        ),
        "align" => w.set(
            &mut m.align,
            VerticalAlign::from_name(value),
            "expected top|center|bottom",
        ),
        "ox" => w.set(&mut m.offset_x, parse_i32(value), "expected integer"),
        "oy" => w.set(&mut m.offset_y, parse_i32(value), "expected integer"),
        "cy" => w.set(&mut m.canvas_offset_y, parse_i32(value), "expected integer"),
        _ => w.unrecognized(),
    }
}

/// Pushes warnings for one key/value pair.
struct Warner<'a> {
    key: &'a str,
    value: &'a str,
    warnings: &'a mut Vec<ParseWarning>,
}

impl Warner<'_> {
    /// Set a field, warning on duplicates and on unparseable values.
    fn set<T>(&mut self, field: &mut Option<T>, parsed: Option<T>, reason: &'static str) {
        match parsed {
            Some(v) => {
                if field.is_some() {
                    self.warnings.push(ParseWarning::DuplicateKey {
                        key: String::from(self.key),
                        value: String::from(self.value),
                    });
                }
                *field = Some(v);
            }
            None => self.warnings.push(ParseWarning::ValueInvalid {
                key: String::from(self.key),
                value: String::from(self.value),
                reason,
            }),
        }
    }

    fn unrecognized(&mut self) {
        self.warnings.push(ParseWarning::KeyNotRecognized {
            key: String::from(self.key),
            value: String::from(self.value),
        });
    }
}

// ---- Value parsers ----

/// `m{row}.{col}.{field}`
fn parse_monitor_key(key: &str) -> Option<(Position, &str)> {
    let rest = key.strip_prefix('m')?;
    let mut parts = rest.splitn(3, '.');
    let row = parts.next()?.parse().ok()?;
    let col = parts.next()?.parse().ok()?;
    let field = parts.next()?;
    Some((Position::new(row, col), field))
}

fn parse_position(s: &str) -> Option<Position> {
    let (row, col) = s.trim().split_once('.')?;
    Some(Position::new(row.trim().parse().ok()?, col.trim().parse().ok()?))
}

fn parse_positions(s: &str) -> Option<BTreeSet<Position>> {
    s.split(',').map(parse_position).collect()
}

fn parse_fit(s: &str) -> Option<FitMode> {
    match s.to_ascii_lowercase().as_str() {
        "fill" | "crop" => Some(FitMode::Fill),
        "stretch" => Some(FitMode::Stretch),
        _ => None,
    }
}

fn parse_basis(s: &str) -> Option<PartitionBasis> {
    match s.to_ascii_lowercase().as_str() {
        "physical" | "inches" => Some(PartitionBasis::Physical),
        "pixel" | "pixels" => Some(PartitionBasis::Pixel),
        _ => None,
    }
}

fn parse_bool(s: &str) -> Option<bool> {
    match s.to_ascii_lowercase().as_str() {
        "true" | "1" | "yes" | "on" => Some(true),
        "false" | "0" | "no" | "off" => Some(false),
        _ => None,
    }
}

fn parse_i32(s: &str) -> Option<i32> {
    s.parse().ok()
}

/// Split `WxH` on the `x`.
fn parse_dimensions(s: &str) -> Option<(&str, &str)> {
    s.split_once(['x', 'X'])
}

fn parse_resolution(s: &str, catalog: &ResolutionCatalog) -> Option<Size> {
    if let Some(size) = catalog.get(s) {
        return Some(size);
    }
    let (w, h) = parse_dimensions(s)?;
    let size = Size::new(w.trim().parse().ok()?, h.trim().parse().ok()?);
    (!size.is_empty()).then_some(size)
}

fn parse_inches(s: &str) -> Option<f64> {
    let s = s.trim();
    let s = s
        .strip_suffix("in")
        .or_else(|| s.strip_suffix('"'))
        .unwrap_or(s);
    let v: f64 = s.trim().parse().ok()?;
    (v.is_finite() && v > 0.0).then_some(v)
}

fn parse_size(s: &str, catalog: &SizeCatalog) -> Option<MonitorSize> {
    if s.eq_ignore_ascii_case("default") {
        return Some(MonitorSize::Default);
    }
    let lower = s.to_ascii_lowercase();
    if let Some((w, h)) = parse_dimensions(&lower) {
        let width = parse_inches(w)?;
        let height = parse_inches(h)?;
        return Some(MonitorSize::Physical(PhysicalSize::new(width, height)));
    }
    let diagonal = parse_inches(&lower)?;
    catalog
        .accepts(diagonal)
        .then_some(MonitorSize::Diagonal(diagonal))
}

// ---- Query string tokenizer ----

/// Split query string on '&'.
fn split_query(query: &str) -> impl Iterator<Item = &str> {
    let query = query.strip_prefix('?').unwrap_or(query);
    query.split('&').filter(|s| !s.is_empty())
}

/// Split a single "key=value" pair on the first '='.
fn split_pair(pair: &str) -> (&str, &str) {
    pair.split_once('=').unwrap_or((pair, ""))
}

/// Percent-decode a URL component. Also handles '+' as space.
fn percent_decode(s: &str) -> String {
    let bytes = s.as_bytes();
    let mut out = Vec::with_capacity(bytes.len());
    let mut i = 0;
    while i < bytes.len() {
        match bytes[i] {
            b'+' => {
                out.push(b' ');
                i += 1;
            }
            b'%' if i + 2 < bytes.len() => {
                match (hex_digit(bytes[i + 1]), hex_digit(bytes[i + 2])) {
                    (Some(hi), Some(lo)) => {
                        out.push(hi << 4 | lo);
                        i += 3;
                    }
                    _ => {
                        out.push(b'%');
                        i += 1;
                    }
                }
            }
            b => {
                out.push(b);
                i += 1;
            }
        }
    }
    String::from_utf8_lossy(&out).into_owned()
}

fn hex_digit(b: u8) -> Option<u8> {
    match b {
        b'0'..=b'9' => Some(b - b'0'),
        b'a'..=b'f' => Some(b - b'a' + 10),
        b'A'..=b'F' => Some(b - b'A' + 10),
        _ => None,
    }
}
