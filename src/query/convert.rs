//! Convert parsed [`Instructions`] into [`Settings`].

use alloc::collections::BTreeSet;

use crate::compose::OutputMode;
use crate::grid::Position;
use crate::job::Settings;
use crate::monitor::{MonitorSpec, ResolutionCatalog};

use super::instructions::Instructions;

impl Instructions {
    /// Build [`Settings`], filling unset values with defaults.
    ///
    /// Monitors without a `res` key get `catalog`'s default resolution.
    /// Per-monitor keys for positions that are not enabled are kept in
    /// [`Settings::monitors`] but not enabled. Validation happens in
    /// [`Settings::build`].
    pub fn to_settings(&self, catalog: &ResolutionCatalog) -> Settings {
        let enabled = self.monitors.clone().unwrap_or_else(|| {
            let mut s = BTreeSet::new();
            s.insert(Position::ORIGIN);
            s
        });

        let default_res = catalog.default_resolution();
        let mut settings = Settings {
            enabled: BTreeSet::new(),
            fit: self.fit.unwrap_or_default(),
            anchor: self.anchor.unwrap_or_default(),
            output: match self.split {
                Some(true) => OutputMode::Split,
                _ => OutputMode::Combined,
            },
            basis: self.basis.unwrap_or_default(),
            ..Settings::default()
        };

        let positions: BTreeSet<Position> = enabled
            .iter()
            .copied()
            .chain(self.per_monitor.keys().copied())
            .collect();
        for pos in positions {
            let m = self.per_monitor.get(&pos);
            let res = m.and_then(|m| m.resolution).unwrap_or(default_res);
            let mut spec = MonitorSpec::new(res.width, res.height);
            if let Some(m) = m {
                spec.size = m.size.unwrap_or(spec.size);
                spec.align = m.align.unwrap_or(spec.align);
                spec.offset_x = m.offset_x.unwrap_or(0);
                spec.offset_y = m.offset_y.unwrap_or(0);
                spec.canvas_offset_y = m.canvas_offset_y.unwrap_or(0);
            }
            settings = settings.monitor(pos, spec);
            if !enabled.contains(&pos) {
                settings = settings.disable(pos);
            }
        }
        settings
    }
}
