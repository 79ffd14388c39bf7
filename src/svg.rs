//! SVG preview of a monitor arrangement.
//!
//! Produces a vertical sequence of annotated panels:
//! physical setup (inches) → source split (fractions of the image) → combined
//! canvas (pixels). Each monitor is drawn as a labelled box.
//!
//! # Example
//!
//! ```
//! use zenwall::{MonitorSpec, Position, Settings, svg::render_arrangement_svg};
//!
//! let wallpaper = Settings::new()
//!     .monitor(Position::new(2, 2), MonitorSpec::new(1920, 1080).diagonal(24.0))
//!     .monitor(Position::new(2, 3), MonitorSpec::new(2560, 1440).diagonal(27.0))
//!     .build()
//!     .unwrap();
//!
//! let svg = render_arrangement_svg(wallpaper.plan());
//! assert!(svg.starts_with("<svg"));
//! ```

use alloc::format;
use alloc::string::String;
use alloc::vec::Vec;

use crate::layout::{LayoutPlan, PartitionBasis};
use crate::monitor::{MonitorSize, VerticalAlign};

/// Maximum width of a panel.
const MAX_PANEL_W: f64 = 360.0;
/// Maximum height of a panel.
const MAX_PANEL_H: f64 = 200.0;
/// Vertical gap between panels, arrow included.
const PANEL_GAP: f64 = 50.0;
const MARGIN_X: f64 = 40.0;
const MARGIN_TOP: f64 = 30.0;
/// Height of the label line above each panel.
const LABEL_H: f64 = 22.0;

/// One panel of the preview.
struct Panel {
    label: String,
    /// Extent of the panel in its own units (inches, basis units or pixels).
    outer: (f64, f64),
    boxes: Vec<MonitorBox>,
    annotation: String,
}

/// A monitor drawn inside a panel, in the panel's units.
struct MonitorBox {
    x: f64,
    y: f64,
    w: f64,
    h: f64,
    text: String,
}

/// Render the arrangement of `plan` as a complete SVG document.
pub fn render_arrangement_svg(plan: &LayoutPlan) -> String {
    let panels = [physical_panel(plan), source_panel(plan), canvas_panel(plan)];
    render_panels(&panels)
}

/// Monitors at their real size, columns and rows sized by the largest member
/// and each monitor centered in its column, aligned in its row.
fn physical_panel(plan: &LayoutPlan) -> Panel {
    let axes = plan.axes();
    let col_x = prefix(&axes.col_physical_widths);
    let row_y = prefix(&axes.row_physical_heights);
    let extent = plan.extent();

    let mut boxes = Vec::new();
    for (pos, spec) in plan.monitors() {
        let Some((r, c)) = extent.index_of(pos) else {
            continue;
        };
        let size = spec.physical_size();
        let cell_w = axes.col_physical_widths[c];
        let cell_h = axes.row_physical_heights[r];
        let space = (cell_h - size.height).max(0.0);
        let dy = match spec.align {
            VerticalAlign::Top => 0.0,
            VerticalAlign::Center => space / 2.0,
            VerticalAlign::Bottom => space,
        };
        let inches = match spec.size {
            MonitorSize::Default => String::from("default size"),
            MonitorSize::Diagonal(d) => format!("{d}\""),
            MonitorSize::Physical(p) => format!("{:.1}×{:.1}in", p.width, p.height),
        };
        boxes.push(MonitorBox {
            x: col_x[c] + (cell_w - size.width).max(0.0) / 2.0,
            y: row_y[r] + dy,
            w: size.width,
            h: size.height,
            text: format!("{pos} {inches}"),
        });
    }

    let total = (sum(&axes.col_physical_widths), sum(&axes.row_physical_heights));
    Panel {
        label: format!("Physical  {:.1}×{:.1}in", total.0, total.1),
        outer: total,
        boxes,
        annotation: String::new(),
    }
}

/// The share of the source image each monitor receives, before offsets.
fn source_panel(plan: &LayoutPlan) -> Panel {
    let (span_x, span_y) = plan.total_span();
    let boxes = plan
        .monitors()
        .filter_map(|(pos, spec)| {
            let f = plan.fractions(pos)?;
            let offset = if spec.offset_x != 0 || spec.offset_y != 0 {
                format!(" ({:+},{:+})", spec.offset_x, spec.offset_y)
            } else {
                String::new()
            };
            Some(MonitorBox {
                x: f.left * span_x,
                y: f.top * span_y,
                w: (f.right - f.left) * span_x,
                h: (f.bottom - f.top) * span_y,
                text: format!("{pos}{offset}"),
            })
        })
        .collect();
    let unit = match plan.basis() {
        PartitionBasis::Physical => "physical",
        PartitionBasis::Pixel => "pixel",
    };
    Panel {
        label: String::from("Source split"),
        outer: (span_x, span_y),
        boxes,
        annotation: format!("{unit} basis"),
    }
}

/// Final images pasted onto the combined canvas.
fn canvas_panel(plan: &LayoutPlan) -> Panel {
    let canvas = plan.canvas_size();
    let boxes = plan
        .monitors()
        .filter_map(|(pos, spec)| {
            let (x, y) = plan.placement(pos)?;
            Some(MonitorBox {
                x: x as f64,
                y: y as f64,
                w: spec.resolution.width as f64,
                h: spec.resolution.height as f64,
                text: format!("{pos} {}×{}", spec.resolution.width, spec.resolution.height),
            })
        })
        .collect();
    Panel {
        label: format!("Canvas  {}×{}", canvas.width, canvas.height),
        outer: (canvas.width as f64, canvas.height as f64),
        boxes,
        annotation: String::from("gaps stay black"),
    }
}

fn prefix(spans: &[f64]) -> Vec<f64> {
    let mut acc = 0.0;
    spans
        .iter()
        .map(|s| {
            let start = acc;
            acc += s;
            start
        })
        .collect()
}

fn sum(spans: &[f64]) -> f64 {
    spans.iter().sum()
}

/// Scale `(w, h)` to fit within MAX_PANEL_W × MAX_PANEL_H, preserving aspect ratio.
fn scale_to_fit((w, h): (f64, f64)) -> (f64, f64, f64) {
    if !(w > 0.0 && h > 0.0) {
        return (1.0, 1.0, 1.0);
    }
    let scale = (MAX_PANEL_W / w).min(MAX_PANEL_H / h);
    (w * scale, h * scale, scale)
}

fn render_panels(panels: &[Panel]) -> String {
    let n = panels.len() as f64;
    let total_h = 2.0 * MARGIN_TOP + n * (LABEL_H + MAX_PANEL_H) + (n - 1.0).max(0.0) * PANEL_GAP;
    let total_w = MAX_PANEL_W + 2.0 * MARGIN_X;

    let mut svg = String::with_capacity(4096);
    svg.push_str(&format!(
        r#"<svg xmlns="http://www.w3.org/2000/svg" width="{}" height="{}" viewBox="0 0 {} {}">"#,
        total_w as u32, total_h as u32, total_w, total_h
    ));
    svg.push('\n');

    svg.push_str(
        r#"<style>
  text { font-family: "DejaVu Sans", sans-serif; }
  .title { font-size: 13px; font-weight: 600; fill: #222; }
  .note { font-size: 11px; fill: #555; }
  .frame { fill: #000; stroke: #7a7a7a; }
  .screen { fill: #2f8f6f; fill-opacity: 0.85; stroke: #d8f0e6; stroke-width: 1.2; }
  .screen-name { font-size: 10px; fill: #f4fff9; }
  .link { stroke: #7a7a7a; stroke-width: 1.5; fill: none; }
  @media (prefers-color-scheme: dark) {
    .title { fill: #ececec; }
    .note { fill: #b0b0b0; }
  }
</style>
"#,
    );

    let center_x = total_w / 2.0;
    let mut y = MARGIN_TOP;

    for (i, panel) in panels.iter().enumerate() {
        svg.push_str(&format!(
            r#"<text x="{}" y="{}" class="title" text-anchor="middle">{}</text>"#,
            center_x,
            y + 14.0,
            escape_xml(&panel.label)
        ));
        svg.push('\n');
        y += LABEL_H;

        let (sw, sh, scale) = scale_to_fit(panel.outer);
        let px = center_x - sw / 2.0;
        let py = y;
        svg.push_str(&format!(
            r#"<rect x="{px:.1}" y="{py:.1}" width="{sw:.1}" height="{sh:.1}" class="frame"/>"#
        ));
        svg.push('\n');

        for b in &panel.boxes {
            let bx = px + b.x * scale;
            let by = py + b.y * scale;
            let bw = b.w * scale;
            let bh = b.h * scale;
            svg.push_str(&format!(
                r#"<rect x="{bx:.1}" y="{by:.1}" width="{bw:.1}" height="{bh:.1}" class="screen"/>"#
            ));
            svg.push('\n');
            svg.push_str(&format!(
                r#"<text x="{:.1}" y="{:.1}" class="screen-name" text-anchor="middle">{}</text>"#,
                bx + bw / 2.0,
                by + bh / 2.0 + 4.0,
                escape_xml(&b.text)
            ));
            svg.push('\n');
        }

        if !panel.annotation.is_empty() {
            svg.push_str(&format!(
                r#"<text x="{}" y="{:.1}" class="note" text-anchor="middle">{}</text>"#,
                center_x,
                py + sh + 14.0,
                escape_xml(&panel.annotation)
            ));
            svg.push('\n');
        }

        y += MAX_PANEL_H;

        if i + 1 < panels.len() {
            let (top, tip) = (y + 8.0, y + PANEL_GAP - 8.0);
            let (l, r, barb) = (center_x - 4.0, center_x + 4.0, tip - 5.0);
            let cx = center_x;
            svg.push_str(&format!(
                r#"<path d="M{cx} {top:.1} V{tip:.1} M{l} {barb:.1} L{cx} {tip:.1} L{r} {barb:.1}" class="link"/>"#
            ));
            svg.push('\n');
            y += PANEL_GAP;
        }
    }

    svg.push_str("</svg>\n");
    svg
}

/// Make `s` safe inside an XML text node or attribute.
fn escape_xml(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            _ => out.push(c),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::{MonitorGrid, Position};
    use crate::layout::plan;
    use crate::monitor::MonitorSpec;
    use alloc::collections::BTreeMap;

    fn three_up() -> LayoutPlan {
        let grid = MonitorGrid::from_cells(&[(2, 1), (2, 2), (2, 3)]).unwrap();
        let specs = BTreeMap::from([
            (Position::new(2, 1), MonitorSpec::new(1920, 1080).diagonal(24.0)),
            (
                Position::new(2, 2),
                MonitorSpec::new(2560, 1440).diagonal(27.0).offset(1, 0),
            ),
            (
                Position::new(2, 3),
                MonitorSpec::new(1080, 1920)
                    .physical(11.8, 21.0)
                    .align(VerticalAlign::Center),
            ),
        ]);
        plan(&grid, &specs, PartitionBasis::Physical).unwrap()
    }

    #[test]
    fn labels_every_monitor() {
        let svg = render_arrangement_svg(&three_up());
        for label in ["(2,1)", "(2,2)", "(2,3)"] {
            assert!(svg.contains(label), "missing {label}");
        }
        assert!(svg.contains("2560×1440"));
        assert!(svg.contains("27&quot;"));
        assert!(svg.contains("11.8×21.0in"));
        assert!(svg.contains("(+1,+0)"));
    }

    #[test]
    fn shows_canvas_size() {
        let p = three_up();
        let c = p.canvas_size();
        let svg = render_arrangement_svg(&p);
        assert!(svg.contains(&format!("Canvas  {}×{}", c.width, c.height)));
        assert!(svg.contains("physical basis"));
    }

    #[test]
    fn one_box_per_monitor_per_panel() {
        let svg = render_arrangement_svg(&three_up());
        assert_eq!(svg.matches(r#"class="screen""#).count(), 9);
    }

    #[test]
    fn svg_is_well_formed() {
        let svg = render_arrangement_svg(&three_up());
        assert!(svg.starts_with("<svg"));
        assert!(svg.ends_with("</svg>\n"));
        assert_eq!(svg.matches("<text").count(), svg.matches("</text>").count());
        assert!(!svg.contains("<<"));
        assert!(!svg.contains("NaN"));
        // One connector between each pair of panels.
        assert_eq!(svg.matches(r#"class="link""#).count(), 2);
    }

    #[test]
    fn escapes_text() {
        assert_eq!(escape_xml(r#"a<b>&"c""#), "a&lt;b&gt;&amp;&quot;c&quot;");
    }
}
