//! Circles expanding outward from the middle of the page, cropped twice: once
//! to the page margin and once to a window.

use std::path::PathBuf;

use clap::Parser;

use ridgeline::{
    clip::{clip, clip_to_margin},
    dash::expand_polyline,
    export::{export_svg, ExportOptions, PageSettings},
    generators::concentric_circles,
    Point, Polyline,
};

#[derive(Parser)]
struct Cli {
    #[arg(long)]
    output: PathBuf,

    /// How many sides each "circle" gets.
    #[arg(long, default_value_t = 7)]
    steps: usize,

    #[arg(long, default_value_t = 300)]
    count: usize,

    /// Draw dotted circles, with this many dots per side.
    #[arg(long)]
    dots: Option<usize>,
}

pub fn main() -> anyhow::Result<()> {
    env_logger::init();
    let args = Cli::parse();

    let page = PageSettings::a4();
    let (width, height) = (page.width, page.height);
    let unit = width.min(height) * 0.01;
    let mut lines = concentric_circles(
        Point::new(width / 2.0, height / 2.0),
        unit,
        unit,
        args.count,
        args.steps,
    );
    if let Some(dots) = args.dots {
        lines = lines
            .iter()
            .flat_map(|l| expand_polyline(l.points(), dots, 0.01))
            .map(|s| Polyline::from_segment(&s))
            .collect();
    }

    let lines = clip_to_margin(&lines, width, height, 1.0, true);
    let window = kurbo::Rect::new(width * 0.25, height * 0.25, width * 0.4, height * 0.6);
    let lines = clip(&lines, window);
    log::info!("{} polylines", lines.len());

    let svg = export_svg(&lines, &page, &ExportOptions::default())?;
    std::fs::write(&args.output, svg)?;
    Ok(())
}
