#![deny(missing_docs)]
#![doc = include_str!("../README.md")]

#[macro_use]
mod typed_vec;

#[cfg(any(test, feature = "arbitrary"))]
pub mod arbitrary;
pub mod cells;
pub mod clip;
pub mod dash;
#[cfg(feature = "svg")]
pub mod export;
mod geom;
pub mod group;
pub mod num;
pub mod occlusion;
pub mod polyline;
pub mod scene;
pub mod waveform;

#[cfg(feature = "generators")]
pub mod generators;

pub use geom::{Intersection, Point, Segment, SlopeIntercept};
pub use polyline::Polyline;
pub use scene::{Row, Scene, SceneConfig};

use crate::{clip::clip_to_margin, group::group_segments, num::check_finite, scene::assemble};

/// The ways in which plotting can fail.
///
/// None of these are transient: the same input always gives the same error.
#[derive(Clone, Debug, PartialEq, thiserror::Error)]
pub enum Error {
    /// A slope was needed for a vertical segment.
    #[error("can't take the slope of a vertical segment")]
    DegenerateSegment,
    /// The scene has nothing in it to draw.
    #[error("empty scene: {reason}")]
    EmptyScene {
        /// What exactly was missing.
        reason: String,
    },
    /// Every sample of the input was zero.
    #[error("the input is silent")]
    SilentInput,
    /// At least one of the inputs was infinite.
    #[error("one of the inputs was infinite")]
    Infinity,
    /// At least one of the inputs was not a number.
    #[error("one of the inputs had a NaN")]
    NaN,
    /// An amplitude sample was too loud.
    #[error("sample {index} is {value}, outside of [-128, 128]")]
    SampleOutOfRange {
        /// The position of the bad sample.
        index: usize,
        /// The bad sample.
        value: f64,
    },
    /// A grid of cells wasn't rectangular, or was empty.
    #[error("row {row} of the grid has {found} cells, but {expected} were expected")]
    RaggedGrid {
        /// The first row with the wrong length.
        row: usize,
        /// The length of the first row (or 1, if the first row is the problem).
        expected: usize,
        /// The length of the bad row.
        found: usize,
    },
    /// The page units have no physical size.
    #[error("can't export in {0:?} units")]
    UnsupportedUnits(String),
}

/// Everything that controls [`plot_scene`].
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct PlotConfig {
    /// Hidden-line removal parameters.
    pub scene: SceneConfig,
    /// The unprintable strip around the edge of the page.
    pub margin: f64,
    /// Also draw the outline of the printable area.
    pub with_border: bool,
    /// Segment endpoints closer than this are considered to be the same point
    /// when joining segments into polylines.
    pub merge_epsilon: f64,
}

impl Default for PlotConfig {
    fn default() -> Self {
        PlotConfig {
            scene: SceneConfig::default(),
            margin: 0.5,
            with_border: false,
            merge_epsilon: 1e-9,
        }
    }
}

/// Turns a scene into pen strokes for a `width` by `height` page.
///
/// This removes the hidden parts of every row, joins the visible pieces into
/// polylines, and crops the polylines to the part of the page inside the
/// margin (see [`clip::clip_to_margin`]).
pub fn plot_scene(
    scene: &Scene,
    config: &PlotConfig,
    width: f64,
    height: f64,
) -> Result<Vec<Polyline>, Error> {
    check_finite([width, height, config.margin, config.merge_epsilon])?;

    let visible = assemble(scene, &config.scene)?;
    let segments: Vec<Segment> = visible
        .iter()
        .flat_map(|row| row.segments.iter().copied())
        .collect();
    let lines = group_segments(&segments, config.merge_epsilon);
    let lines = clip_to_margin(&lines, width, height, config.margin, config.with_border);

    log::info!(
        "plotted {} rows: {} visible segments in {} polylines",
        scene.len(),
        segments.len(),
        lines.len()
    );
    Ok(lines)
}
