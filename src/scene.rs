//! Rows of samples stacked in depth, and the pass that hides the parts of them
//! that are covered by nearer rows.

use crate::{
    geom::{Point, Segment},
    num::{check_finite, CheapOrderedFloat},
    occlusion::resolve_visibility,
    Error,
};

/// One horizontal layer of the scene.
///
/// Segment `i` of a row goes from sample `i - 1` to sample `i`, for `i >= 1`.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Row {
    /// Smaller depths are nearer the viewer, and hide rows with larger depths.
    pub depth: f64,
    /// The sample points, usually in increasing `x` order.
    pub samples: Vec<Point>,
}

impl Row {
    /// Creates a new row.
    pub fn new<P: Into<Point>>(depth: f64, samples: impl IntoIterator<Item = P>) -> Self {
        Row {
            depth,
            samples: samples.into_iter().map(Into::into).collect(),
        }
    }

    /// The segment ending at sample `idx`, if there is one and it isn't degenerate.
    pub fn segment(&self, idx: usize) -> Option<Segment> {
        if idx == 0 || idx >= self.samples.len() {
            return None;
        }
        let seg = Segment::new(self.samples[idx - 1], self.samples[idx]);
        (!seg.is_degenerate()).then_some(seg)
    }
}

/// An index into the rows of a [`Scene`], in nearest-first order.
#[derive(Clone, Copy, PartialOrd, Ord, PartialEq, Eq, Hash, serde::Serialize)]
pub struct RowIdx(pub usize);

impl std::fmt::Debug for RowIdx {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "r_{}", self.0)
    }
}

/// A collection of rows, sorted nearest-first.
///
/// A scene is validated on construction: there is at least one row, every
/// row has at least two samples, and all the numbers are finite.
#[derive(Clone, Debug, serde::Serialize)]
pub struct Scene {
    rows: Vec<Row>,
}

impl Scene {
    /// Builds a scene from rows in any order. The rows are sorted by depth,
    /// keeping the given order for rows of equal depth.
    pub fn new(rows: impl IntoIterator<Item = Row>) -> Result<Self, Error> {
        let mut rows: Vec<Row> = rows.into_iter().collect();
        if rows.is_empty() {
            return Err(Error::EmptyScene {
                reason: "there are no rows".to_owned(),
            });
        }
        for (idx, row) in rows.iter().enumerate() {
            check_finite(std::iter::once(row.depth))?;
            check_finite(row.samples.iter().flat_map(|p| [p.x, p.y]))?;
            if row.samples.len() < 2 {
                return Err(Error::EmptyScene {
                    reason: format!("row {idx} has {} samples", row.samples.len()),
                });
            }
        }
        rows.sort_by_key(|r| CheapOrderedFloat::from(r.depth));
        Ok(Scene { rows })
    }

    /// The rows, nearest first.
    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    /// Iterates over the row indices, nearest first.
    pub fn indices(&self) -> impl Iterator<Item = RowIdx> {
        (0..self.rows.len()).map(RowIdx)
    }

    /// The number of rows.
    #[allow(clippy::len_without_is_empty)]
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// The rows whose segments can hide those of `row`: up to `lookback` of
    /// the rows just in front of it, nearest to `row` first.
    pub fn lookback(&self, row: RowIdx, lookback: usize) -> impl Iterator<Item = &Row> + '_ {
        self.rows[row.0.saturating_sub(lookback)..row.0].iter().rev()
    }
}

impl std::ops::Index<RowIdx> for Scene {
    type Output = Row;

    fn index(&self, index: RowIdx) -> &Self::Output {
        &self.rows[index.0]
    }
}

/// Parameters for hidden-line removal.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct SceneConfig {
    /// How many of the nearer rows are allowed to hide parts of a row.
    ///
    /// Rows further in front than this never affect a row's visibility. This
    /// bounds the work per segment, at the price of letting very tall near
    /// rows fail to hide distant ones.
    pub lookback: usize,
}

impl Default for SceneConfig {
    fn default() -> Self {
        SceneConfig { lookback: 2 }
    }
}

/// The visible segments of one row.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct VisibleRow {
    /// The row that these segments came from.
    pub row: RowIdx,
    /// The depth of that row.
    pub depth: f64,
    /// The visible (possibly trimmed) segments, in sample order.
    pub segments: Vec<Segment>,
}

/// Works out which parts of every row are visible.
///
/// Rows are processed nearest first. For each segment of a row, the
/// occluders are the segments spanning the same pair of sample indices in the
/// `config.lookback` rows just in front of it. The occluders are always taken
/// from the raw samples of those rows, not from their visible parts, so the
/// result for a row doesn't depend on how its neighbors were trimmed.
pub fn assemble(scene: &Scene, config: &SceneConfig) -> Result<Vec<VisibleRow>, Error> {
    let mut ret = Vec::with_capacity(scene.len());
    let mut occluders = Vec::with_capacity(config.lookback);

    for row_idx in scene.indices() {
        let row = &scene[row_idx];
        let mut segments = Vec::with_capacity(row.samples.len() - 1);
        let mut hidden = 0;

        for i in 1..row.samples.len() {
            let Some(seg) = row.segment(i) else {
                continue;
            };

            occluders.clear();
            occluders.extend(
                scene
                    .lookback(row_idx, config.lookback)
                    .filter_map(|nearer| nearer.segment(i)),
            );

            match resolve_visibility(&seg, &occluders)? {
                Some(visible) => segments.push(visible),
                None => hidden += 1,
            }
        }

        log::debug!(
            "{row_idx:?} (depth {}): {} visible segments, {hidden} hidden",
            row.depth,
            segments.len()
        );
        ret.push(VisibleRow {
            row: row_idx,
            depth: row.depth,
            segments,
        });
    }
    Ok(ret)
}
