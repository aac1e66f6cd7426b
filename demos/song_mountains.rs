//! Draws an audio waveform as rows of mountains, nearer rows hiding the ones behind.
//!
//! The input is a text file of amplitude samples in `[-128, 128]`, separated by
//! whitespace. Without one, a synthetic chirp is used instead.

use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;

use ridgeline::{
    export::{export_svg, ExportOptions, PageSettings},
    plot_scene,
    waveform::{MountainLayout, Waveform},
    PlotConfig, SceneConfig,
};

#[derive(Parser)]
struct Cli {
    #[arg(long)]
    output: PathBuf,

    #[arg(long)]
    input: Option<PathBuf>,

    #[arg(long, default_value_t = 24)]
    rows: usize,

    #[arg(long, default_value_t = 2)]
    lookback: usize,

    #[arg(long)]
    border: bool,
}

fn chirp() -> Vec<f64> {
    (0..4800)
        .map(|i| {
            let t = i as f64 / 4800.0;
            let envelope = (t * std::f64::consts::PI * 6.0).sin().abs();
            (100.0 * envelope * (t * t * 2000.0).sin()).round()
        })
        .collect()
}

pub fn main() -> anyhow::Result<()> {
    env_logger::init();
    let args = Cli::parse();

    let samples = match &args.input {
        Some(path) => std::fs::read_to_string(path)
            .with_context(|| format!("reading {}", path.display()))?
            .split_whitespace()
            .map(|s| s.parse::<f64>().with_context(|| format!("bad sample {s:?}")))
            .collect::<anyhow::Result<Vec<_>>>()?,
        None => chirp(),
    };
    let wave = Waveform::new(samples)?;

    let page = PageSettings::a4();
    let margin = 0.5;
    let rows = args.rows.max(1);
    let spacing = (page.height - 2.0 * margin - 4.0) / rows as f64;
    let layout = MountainLayout {
        rows,
        left: margin,
        top: margin,
        width: page.width - 2.0 * margin,
        row_height: 4.0,
        row_spacing: spacing,
    };
    let scene = wave.to_scene(&layout)?;

    let config = PlotConfig {
        scene: SceneConfig {
            lookback: args.lookback,
        },
        margin,
        with_border: args.border,
        ..PlotConfig::default()
    };
    let lines = plot_scene(&scene, &config, page.width, page.height)?;
    log::info!("{} rows, {} polylines", scene.len(), lines.len());

    let svg = export_svg(&lines, &page, &ExportOptions::default())?;
    std::fs::write(&args.output, svg)?;
    Ok(())
}
