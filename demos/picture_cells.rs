//! Draws a grid of colored cells, shading each one with hatching or with a
//! stroke towards its darkest neighbor.
//!
//! The input is a JSON file holding an array of rows, each an array of
//! `{"h": .., "s": .., "l": ..}` cells. Without one, a synthetic gradient is used.

use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use rand::{rngs::StdRng, SeedableRng};

use ridgeline::{
    cells::{hatch_cell, neighbor_stroke, CellGrid, CellLayout, HatchConfig, HslCell},
    clip::clip_to_margin,
    export::{export_svg, ExportOptions, PageSettings},
    Polyline,
};

#[derive(Copy, Clone, Debug, clap::ValueEnum)]
enum Style {
    Hatching,
    Neighbors,
}

#[derive(Parser)]
struct Cli {
    #[arg(long)]
    output: PathBuf,

    #[arg(long)]
    input: Option<PathBuf>,

    #[arg(long, value_enum, default_value_t = Style::Hatching)]
    style: Style,

    /// Seed for the random offsets and stroke lengths.
    #[arg(long, default_value_t = 0)]
    seed: u64,

    #[arg(long)]
    randomize_offset: bool,

    #[arg(long)]
    cell_borders: bool,
}

fn gradient() -> Vec<Vec<HslCell>> {
    (0..34)
        .map(|r| {
            (0..26)
                .map(|c| HslCell::new((r * 5 + c * 3) as f64 % 180.0, 50.0, (r + c) as f64 * 1.6))
                .collect()
        })
        .collect()
}

pub fn main() -> anyhow::Result<()> {
    env_logger::init();
    let args = Cli::parse();

    let rows: Vec<Vec<HslCell>> = match &args.input {
        Some(path) => {
            let data = std::fs::read_to_string(path)
                .with_context(|| format!("reading {}", path.display()))?;
            serde_json::from_str(&data)?
        }
        None => gradient(),
    };
    let grid = CellGrid::new(rows)?;

    let page = PageSettings::a4();
    let margin = 0.5;
    let layout = CellLayout::new(&grid, page.width, page.height, margin);
    let config = HatchConfig {
        randomize_offset: args.randomize_offset,
        use_border: args.cell_borders,
        ..HatchConfig::default()
    };
    let mut rng = StdRng::seed_from_u64(args.seed);

    let mut lines: Vec<Polyline> = Vec::new();
    for (row, col, cell) in grid.iter() {
        let rect = layout.cell_rect(row, col);
        match args.style {
            Style::Hatching => lines.extend(hatch_cell(rect, cell, &config, &mut rng)),
            Style::Neighbors => {
                lines.extend(neighbor_stroke(&grid, row, col, rect, &mut rng));
                if args.cell_borders {
                    lines.push(Polyline::from_rect(rect));
                }
            }
        }
    }
    let lines = clip_to_margin(&lines, page.width, page.height, margin, false);
    log::info!("{} polylines", lines.len());

    let svg = export_svg(&lines, &page, &ExportOptions::default())?;
    std::fs::write(&args.output, svg)?;
    Ok(())
}
