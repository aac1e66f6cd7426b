//! The sketch inputs, all the way to an SVG file.
#![cfg(feature = "svg")]

use assert_matches::assert_matches;
use rand::{rngs::StdRng, SeedableRng};
use ridgeline::{
    cells::{hatch_cell, neighbor_stroke, CellGrid, CellLayout, HatchConfig, HslCell},
    clip::clip_to_margin,
    dash::expand_polyline,
    export::{export_svg, ExportOptions, PageSettings},
    plot_scene,
    waveform::{MountainLayout, Waveform},
    Error, PlotConfig, Point, Polyline,
};

#[test]
fn song_mountains() {
    let samples = (0..400).map(|i| ((i as f64 * 0.3).sin() * 100.0).round());
    let wave = Waveform::new(samples).unwrap();
    let layout = MountainLayout::default();
    let scene = wave.to_scene(&layout).unwrap();
    assert_eq!(scene.len(), layout.rows);

    let page = PageSettings::a4();
    let lines = plot_scene(&scene, &PlotConfig::default(), page.width, page.height).unwrap();
    assert!(!lines.is_empty());

    let svg = export_svg(&lines, &page, &ExportOptions::default()).unwrap();
    assert!(svg.contains("<svg"));
    assert_eq!(svg.matches("<path").count(), lines.len());
}

#[test]
fn silence_is_an_error() {
    assert_matches!(Waveform::new(vec![0.0; 100]), Err(Error::SilentInput));
}

#[test]
fn picture_cells() {
    let grid = CellGrid::new((0..8).map(|r| {
        (0..6).map(move |c| HslCell::new((r * 30 + c * 10) as f64, 50.0, (r * 12 + c) as f64))
    }))
    .unwrap();
    let page = PageSettings::a4();
    let margin = 0.5;
    let layout = CellLayout::new(&grid, page.width, page.height, margin);
    let mut rng = StdRng::seed_from_u64(1);
    let config = HatchConfig {
        randomize_offset: true,
        ..HatchConfig::default()
    };

    let mut lines: Vec<Polyline> = Vec::new();
    for (row, col, cell) in grid.iter() {
        let rect = layout.cell_rect(row, col);
        lines.extend(hatch_cell(rect, cell, &config, &mut rng));
        lines.extend(neighbor_stroke(&grid, row, col, rect, &mut rng));
    }
    let lines = clip_to_margin(&lines, page.width, page.height, margin, false);
    assert!(lines.len() > grid.rows() * grid.cols());
    for p in lines.iter().flat_map(|l| l.points()) {
        assert!(p.x >= margin && p.x <= page.width - margin);
        assert!(p.y >= margin && p.y <= page.height - margin);
    }
}

#[test]
fn dashed_border() {
    let border = Polyline::from_rect(kurbo::Rect::new(1.0, 1.0, 5.0, 5.0));
    let dashes = expand_polyline(border.points(), 4, 0.1);
    assert_eq!(dashes.len(), 16);
    assert_eq!(dashes[0].p0, Point::new(1.0, 1.0));
    let lines: Vec<_> = dashes.iter().map(Polyline::from_segment).collect();
    let svg = export_svg(&lines, &PageSettings::a4(), &ExportOptions::default()).unwrap();
    assert_eq!(svg.matches("<path").count(), 16);
}
