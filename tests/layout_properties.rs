//! Layout properties that must hold for any configuration.

use std::collections::BTreeSet;

use zenwall::*;

fn set(cells: &[(u32, u32)]) -> BTreeSet<Position> {
    cells.iter().map(|&(r, c)| Position::new(r, c)).collect()
}

/// Small deterministic generator so failures are reproducible.
struct Lcg(u64);

impl Lcg {
    fn next(&mut self) -> u32 {
        self.0 = self.0.wrapping_mul(6364136223846793005).wrapping_add(1442695040888963407);
        (self.0 >> 33) as u32
    }

    fn range(&mut self, lo: u32, hi: u32) -> u32 {
        lo + self.next() % (hi - lo + 1)
    }
}

// ---- Grid validation ----

#[test]
fn grid_examples() {
    assert!(is_valid_grid(&set(&[(2, 2)])));
    assert!(is_valid_grid(&set(&[(2, 2), (2, 3)])));
    assert!(!is_valid_grid(&set(&[(2, 2), (1, 3)])));
    assert!(is_valid_grid(&set(&[(1, 2), (2, 2), (3, 2)])));
    assert!(is_valid_grid(&set(&[(2, 1), (2, 2), (2, 3), (1, 1)])));
    assert!(!is_valid_grid(&set(&[(2, 2), (1, 1)])));
    assert!(!is_valid_grid(&set(&[])));
    assert!(!is_valid_grid(&set(&[(2, 3)])));
}

/// Reference connectivity by repeated expansion from the origin.
fn connected_from_origin(cells: &BTreeSet<Position>) -> bool {
    if !cells.contains(&Position::ORIGIN) {
        return false;
    }
    let mut reached = BTreeSet::from([Position::ORIGIN]);
    loop {
        let next: BTreeSet<Position> = cells
            .iter()
            .copied()
            .filter(|p| {
                reached.iter().any(|q| {
                    p.row.abs_diff(q.row) + p.col.abs_diff(q.col) == 1
                })
            })
            .chain(reached.iter().copied())
            .collect();
        if next.len() == reached.len() {
            return reached.len() == cells.len();
        }
        reached = next;
    }
}

#[test]
fn grid_validation_matches_reachability_for_every_3x3_subset() {
    let board: Vec<Position> = (1..=3)
        .flat_map(|r| (1..=3).map(move |c| Position::new(r, c)))
        .collect();
    for mask in 0u32..(1 << board.len()) {
        let cells: BTreeSet<Position> = board
            .iter()
            .enumerate()
            .filter(|(i, _)| mask & (1 << i) != 0)
            .map(|(_, &p)| p)
            .collect();
        assert_eq!(
            is_valid_grid(&cells),
            connected_from_origin(&cells),
            "{cells:?}"
        );
    }
}

// ---- Partition ratios ----

#[test]
fn ratios_sum_to_one() {
    let resolutions = ResolutionCatalog::standard();
    let diagonals = SizeCatalog::standard();
    let mut rng = Lcg(7);
    for _ in 0..200 {
        // Grow a random connected shape from the origin.
        let mut cells = BTreeSet::from([Position::ORIGIN]);
        for _ in 0..rng.range(0, 6) {
            let from: Vec<Position> = cells.iter().copied().collect();
            let base = from[rng.next() as usize % from.len()];
            let n: Vec<Position> = base
                .neighbours()
                .filter(|p| (1..=3).contains(&p.row) && (1..=3).contains(&p.col))
                .collect();
            cells.insert(n[rng.next() as usize % n.len()]);
        }

        let mut settings = Settings::new();
        for &pos in &cells {
            let presets = resolutions.presets();
            let res = presets[rng.next() as usize % presets.len()].value;
            let d = diagonals.diagonals();
            let mut spec = MonitorSpec::new(res.width, res.height);
            if rng.next() % 3 != 0 {
                spec = spec.diagonal(d[rng.next() as usize % d.len()]);
            }
            settings = settings.monitor(pos, spec);
        }
        for basis in [PartitionBasis::Physical, PartitionBasis::Pixel] {
            let w = settings.clone().basis(basis).build().unwrap();
            let r = w.plan().ratios();
            let cols: f64 = r.cols.iter().sum();
            let rows: f64 = r.rows.iter().sum();
            assert!((cols - 1.0).abs() < 1e-9, "{cols}");
            assert!((rows - 1.0).abs() < 1e-9, "{rows}");
            assert!(r.cols.iter().chain(&r.rows).all(|&v| v > 0.0));
        }
    }
}

#[test]
fn physical_basis_follows_inches() {
    let w = Settings::new()
        .monitor(Position::new(2, 2), MonitorSpec::new(1920, 1080).diagonal(24.0))
        .monitor(Position::new(2, 3), MonitorSpec::new(2560, 1440).diagonal(27.0))
        .build()
        .unwrap();
    let a = PhysicalSize::from_diagonal(Size::new(1920, 1080), 24.0).width;
    let b = PhysicalSize::from_diagonal(Size::new(2560, 1440), 27.0).width;
    let r = &w.plan().ratios().cols;
    assert!((r[0] - a / (a + b)).abs() < 1e-12);
    assert!((r[1] - b / (a + b)).abs() < 1e-12);
}

#[test]
fn pixel_basis_follows_resolution() {
    let w = Settings::new()
        .monitor(Position::new(2, 2), MonitorSpec::new(1920, 1080).diagonal(24.0))
        .monitor(Position::new(2, 3), MonitorSpec::new(2560, 1440).diagonal(27.0))
        .basis(PartitionBasis::Pixel)
        .build()
        .unwrap();
    let r = &w.plan().ratios().cols;
    assert!((r[0] - 1920.0 / 4480.0).abs() < 1e-12);
}

// ---- Sections ----

#[test]
fn single_monitor_spans_the_source() {
    let w = Settings::new()
        .monitor(Position::ORIGIN, MonitorSpec::new(1920, 1080))
        .build()
        .unwrap();
    assert_eq!(w.plan().ratios().cols, [1.0]);
    assert_eq!(w.plan().ratios().rows, [1.0]);
    assert_eq!(w.plan().canvas_size(), Size::new(1920, 1080));
    for (iw, ih) in [(1920, 1080), (4000, 3000), (7, 5)] {
        let s = w.sections(Size::new(iw, ih)).unwrap();
        assert_eq!(s[0].rect(), Rect::new(0, 0, iw, ih));
    }
}

#[test]
fn horizontal_pair_gets_halves() {
    for basis in [PartitionBasis::Physical, PartitionBasis::Pixel] {
        let w = Settings::new()
            .monitor(Position::new(2, 2), MonitorSpec::new(1920, 1080))
            .monitor(Position::new(2, 3), MonitorSpec::new(1920, 1080))
            .basis(basis)
            .build()
            .unwrap();
        for iw in [1000, 1001, 3841] {
            let s = w.sections(Size::new(iw, 600)).unwrap();
            let half = iw / 2;
            assert!(s[0].left == 0 && s[0].right.abs_diff(half) <= 1);
            assert!(s[1].left == s[0].right && s[1].right == iw);
            assert!(s.iter().all(|x| x.top == 0 && x.bottom == 600));
        }
    }
}

#[test]
fn offsets_are_clamped() {
    let mut rng = Lcg(99);
    for _ in 0..500 {
        let ox = rng.next() as i32 % 100_000 - 50_000;
        let oy = rng.next() as i32 % 100_000 - 50_000;
        let w = Settings::new()
            .monitor(Position::ORIGIN, MonitorSpec::new(1920, 1080))
            .monitor(Position::new(2, 3), MonitorSpec::new(1280, 1024).offset(ox, oy))
            .monitor(Position::new(1, 2), MonitorSpec::new(2560, 1440).offset(-oy, ox))
            .basis(if ox % 2 == 0 {
                PartitionBasis::Pixel
            } else {
                PartitionBasis::Physical
            })
            .build()
            .unwrap();
        let (iw, ih) = (rng.range(1, 900), rng.range(1, 900));
        for s in w.sections(Size::new(iw, ih)).unwrap() {
            assert!(s.right > s.left && s.right <= iw, "{s:?} on {iw}x{ih}");
            assert!(s.bottom > s.top && s.bottom <= ih, "{s:?} on {iw}x{ih}");
        }
    }
}

#[test]
fn near_zero_physical_size_with_offset_is_clamped() {
    let w = Settings::new()
        .monitor(
            Position::ORIGIN,
            MonitorSpec::new(1920, 1080)
                .physical(1e-300, 1e-300)
                .offset(-1, -1),
        )
        .build()
        .unwrap();
    let s = w.sections(Size::new(4000, 3000)).unwrap();
    assert_eq!(s[0].rect(), Rect::new(3999, 2999, 1, 1));
}

#[test]
fn fill_covers_and_stretch_never_crops() {
    let mut rng = Lcg(3);
    for _ in 0..300 {
        let src = Size::new(rng.range(1, 5000), rng.range(1, 5000));
        let dst = Size::new(rng.range(1, 4000), rng.range(1, 4000));
        let fit = FitMode::Fill.compute(src, dst, Gravity::Center);
        assert_eq!(fit.resize_to, dst);
        let kept = fit
            .source_crop
            .unwrap_or(Rect::new(0, 0, src.width, src.height));
        // Cover: one axis is kept whole, the other is trimmed to fit.
        assert!(
            kept.width == src.width || kept.height == src.height,
            "{src:?} -> {dst:?}: {kept:?}"
        );
        assert!(kept.right() <= src.width && kept.bottom() <= src.height);

        let stretch = FitMode::Stretch.compute(src, dst, Gravity::Center);
        assert_eq!(stretch.source_crop, None);
        assert_eq!(stretch.resize_to, dst);
    }
}

#[test]
fn planning_is_deterministic() {
    let settings = Settings::new()
        .monitor(Position::ORIGIN, MonitorSpec::new(3840, 2160).diagonal(32.0))
        .monitor(Position::new(2, 1), MonitorSpec::new(1080, 1920).diagonal(24.0))
        .monitor(Position::new(1, 2), MonitorSpec::new(1920, 1080).offset(2, 1));
    let a = settings.build().unwrap();
    let b = settings.build().unwrap();
    assert_eq!(a, b);
    assert_eq!(
        a.sections(Size::new(6001, 4003)).unwrap(),
        b.sections(Size::new(6001, 4003)).unwrap()
    );
}

#[cfg(feature = "std")]
#[test]
fn rendering_is_deterministic() {
    let img = image::RgbImage::from_fn(97, 61, |x, y| image::Rgb([(x as u8).wrapping_mul(3), (y as u8).wrapping_mul(5), 17]));
    let w = Settings::new()
        .monitor(Position::ORIGIN, MonitorSpec::new(40, 30))
        .monitor(Position::new(2, 3), MonitorSpec::new(25, 40).align(VerticalAlign::Center))
        .build()
        .unwrap();
    let a = w.render(&img, "x").unwrap();
    let b = w.render(&img, "x").unwrap();
    assert_eq!(a, b);
    assert_eq!(a[0].image.dimensions(), (65, 40));
}

// ---- Errors ----

#[test]
fn errors_are_reported_before_rendering() {
    let diagonal = Settings::new()
        .monitor(Position::ORIGIN, MonitorSpec::new(1920, 1080))
        .monitor(Position::new(1, 1), MonitorSpec::new(1920, 1080));
    assert_eq!(diagonal.build(), Err(LayoutError::InvalidGrid));

    let zero = Settings::new().monitor(Position::ORIGIN, MonitorSpec::new(0, 1080));
    assert_eq!(
        zero.build(),
        Err(LayoutError::Configuration(ConfigurationError::ZeroResolution(
            Position::ORIGIN
        )))
    );

    let w = Settings::new()
        .monitor(Position::ORIGIN, MonitorSpec::new(1920, 1080))
        .build()
        .unwrap();
    assert_eq!(w.sections(Size::new(0, 0)), Err(LayoutError::ZeroSourceDimension));
}
