//! Sketches built from a grid of colored cells, like a heavily downsampled
//! picture.
//!
//! Each cell of a [`CellGrid`] gets its own little box on the page (see
//! [`CellLayout`]), and something is drawn in that box based on the cell's
//! color: [`hatch_cell`] shades it with parallel lines, and
//! [`neighbor_stroke`] points it at its darkest neighbor.

use arrayvec::ArrayVec;
use kurbo::{Rect, Vec2};
use rand::Rng;

use crate::{
    clip::clip_segment,
    geom::{Point, Segment},
    num::{check_finite, normalize},
    polyline::Polyline,
    Error,
};

/// The fraction of a cell's width left empty on each side of it.
const CELL_INNER_MARGIN: f64 = 0.1;

/// A color in hue-saturation-lightness form.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct HslCell {
    /// Hue, in degrees.
    pub h: f64,
    /// Saturation, from 0 to 100.
    pub s: f64,
    /// Lightness, from 0 (black) to 100 (white).
    pub l: f64,
}

impl HslCell {
    /// Creates a new cell.
    pub fn new(h: f64, s: f64, l: f64) -> Self {
        HslCell { h, s, l }
    }
}

/// A rectangular grid of cells, stored row by row.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct CellGrid {
    rows: usize,
    cols: usize,
    cells: Vec<HslCell>,
}

impl CellGrid {
    /// Builds a grid from its rows.
    ///
    /// # Errors
    ///
    /// Every row needs to have as many cells as the first one, and there needs
    /// to be at least one cell; otherwise this fails with
    /// [`Error::RaggedGrid`]. Non-finite values are also rejected.
    pub fn new<R>(rows: impl IntoIterator<Item = R>) -> Result<Self, Error>
    where
        R: IntoIterator<Item = HslCell>,
    {
        let mut cells = Vec::new();
        let mut cols = None;
        let mut row_count = 0;
        for (row, r) in rows.into_iter().enumerate() {
            let before = cells.len();
            cells.extend(r);
            let found = cells.len() - before;
            let expected = *cols.get_or_insert(found);
            if found != expected || found == 0 {
                return Err(Error::RaggedGrid {
                    row,
                    expected: expected.max(1),
                    found,
                });
            }
            row_count += 1;
        }
        let Some(cols) = cols else {
            return Err(Error::RaggedGrid {
                row: 0,
                expected: 1,
                found: 0,
            });
        };
        check_finite(cells.iter().flat_map(|c| [c.h, c.s, c.l]))?;
        Ok(CellGrid {
            rows: row_count,
            cols,
            cells,
        })
    }

    /// The number of rows.
    pub fn rows(&self) -> usize {
        self.rows
    }

    /// The number of columns.
    pub fn cols(&self) -> usize {
        self.cols
    }

    /// The cell at `(row, col)`, if it's in the grid.
    pub fn get(&self, row: usize, col: usize) -> Option<&HslCell> {
        (row < self.rows && col < self.cols).then(|| &self.cells[row * self.cols + col])
    }

    /// Iterates over `(row, col, cell)`, row by row.
    pub fn iter(&self) -> impl Iterator<Item = (usize, usize, &HslCell)> + '_ {
        self.cells
            .iter()
            .enumerate()
            .map(|(i, c)| (i / self.cols, i % self.cols, c))
    }
}

/// The position of every cell of a grid on the page.
///
/// The part of the page inside the margin is divided evenly into one "outer"
/// box per cell. Each cell's drawing box is its outer box shrunk by 10% of the
/// outer width on every side, so neighboring cells don't touch.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct CellLayout {
    margin: f64,
    outer_width: f64,
    outer_height: f64,
    inner_margin: f64,
}

impl CellLayout {
    /// Lays out `grid` on a `width` by `height` page.
    pub fn new(grid: &CellGrid, width: f64, height: f64, margin: f64) -> Self {
        let outer_width = (width - 2.0 * margin) / grid.cols() as f64;
        let outer_height = (height - 2.0 * margin) / grid.rows() as f64;
        if (outer_width - outer_height).abs() > 1e-9 * outer_width.abs().max(outer_height.abs()) {
            log::warn!(
                "the {}x{} grid doesn't have the page's aspect ratio; cells will be {outer_width}x{outer_height}",
                grid.cols(),
                grid.rows(),
            );
        }
        CellLayout {
            margin,
            outer_width,
            outer_height,
            inner_margin: outer_width * CELL_INNER_MARGIN,
        }
    }

    /// The drawing box of the cell at `(row, col)`.
    pub fn cell_rect(&self, row: usize, col: usize) -> Rect {
        let x = self.margin + self.inner_margin + col as f64 * self.outer_width;
        let y = self.margin + self.inner_margin + row as f64 * self.outer_height;
        Rect::new(
            x,
            y,
            x + self.outer_width - 2.0 * self.inner_margin,
            y + self.outer_height - 2.0 * self.inner_margin,
        )
    }
}

/// Parameters for [`hatch_cell`].
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct HatchConfig {
    /// Use the cell's hue as the angle of the lines. Otherwise, use `default_angle`.
    pub use_hue_as_angle: bool,
    /// The angle (in degrees, counter-clockwise from horizontal) to use when
    /// not using the hue.
    pub default_angle: f64,
    /// Shift each cell's lines by a random fraction of the spacing.
    pub randomize_offset: bool,
    /// Draw the outline of the cell too.
    pub use_border: bool,
    /// The most lines a single cell can get.
    pub line_count: usize,
    /// The line spacing for a black cell.
    pub min_spacing: f64,
    /// The line spacing for a white cell.
    pub max_spacing: f64,
}

impl Default for HatchConfig {
    fn default() -> Self {
        HatchConfig {
            use_hue_as_angle: true,
            default_angle: 45.0,
            randomize_offset: false,
            use_border: false,
            line_count: 100,
            min_spacing: 0.02,
            max_spacing: 0.1,
        }
    }
}

/// Shades the box `rect` with parallel lines, darker cells getting denser lines.
///
/// The spacing between lines goes linearly from `min_spacing` (lightness 0)
/// to `max_spacing` (lightness 100). The lines are laid out starting from the
/// corner of `rect` that's furthest "behind" them, so that they cover the box
/// whatever their angle, as long as there are enough of them.
///
/// `rng` is only consulted if `config.randomize_offset` is set.
pub fn hatch_cell(
    rect: Rect,
    cell: &HslCell,
    config: &HatchConfig,
    rng: &mut impl Rng,
) -> Vec<Polyline> {
    let angle = if config.use_hue_as_angle {
        cell.h
    } else {
        config.default_angle
    }
    .to_radians();
    let spacing = normalize(cell.l, 0.0, 100.0, config.min_spacing, config.max_spacing);
    debug_assert!(spacing > 0.0);
    let offset = if config.randomize_offset {
        -rng.gen::<f64>() * spacing
    } else {
        0.0
    };

    // Page coordinates point down, so a positive angle goes up the page.
    let dir = Vec2::new(angle.cos(), -angle.sin());
    let normal = Vec2::new(-dir.y, dir.x);
    let center = rect.center().to_vec2();
    let lo = [
        Vec2::new(rect.x0, rect.y0),
        Vec2::new(rect.x1, rect.y0),
        Vec2::new(rect.x0, rect.y1),
        Vec2::new(rect.x1, rect.y1),
    ]
    .into_iter()
    .map(|c| (c - center).dot(normal))
    .fold(f64::INFINITY, f64::min);
    let reach = rect.width() + rect.height();

    let mut ret: Vec<Polyline> = (0..config.line_count)
        .filter_map(|i| {
            let d = lo + spacing * (i + 1) as f64 + offset;
            let foot = center + normal * d;
            let line = Segment::new(
                (foot - dir * reach).to_point(),
                (foot + dir * reach).to_point(),
            );
            clip_segment(&line, &rect).map(|s| Polyline::from_segment(&s))
        })
        .collect();

    if config.use_border {
        ret.push(Polyline::from_rect(rect));
    }
    ret
}

/// A cell next to some other cell.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Neighbor {
    /// The neighbor's row.
    pub row: usize,
    /// The neighbor's column.
    pub col: usize,
    /// The neighbor's color.
    pub cell: HslCell,
}

/// The (up to eight) cells surrounding `(row, col)`, row by row.
pub fn neighbors(grid: &CellGrid, row: usize, col: usize) -> ArrayVec<Neighbor, 8> {
    const OFFSETS: [(isize, isize); 8] = [
        (-1, -1),
        (-1, 0),
        (-1, 1),
        (0, -1),
        (0, 1),
        (1, -1),
        (1, 0),
        (1, 1),
    ];

    OFFSETS
        .iter()
        .filter_map(|&(dr, dc)| {
            let r = row.checked_add_signed(dr)?;
            let c = col.checked_add_signed(dc)?;
            grid.get(r, c).map(|&cell| Neighbor { row: r, col: c, cell })
        })
        .collect()
}

/// A single stroke from the center of the cell at `(row, col)` toward its
/// darkest neighbor.
///
/// The stroke goes left or right if the darkest neighbor is in a different
/// column, and up or down if it's in a different row, by a random amount of
/// up to twice the size of `rect`. Ties go to the first neighbor in the order
/// of [`neighbors`]. Returns `None` if the cell has no neighbors.
pub fn neighbor_stroke(
    grid: &CellGrid,
    row: usize,
    col: usize,
    rect: Rect,
    rng: &mut impl Rng,
) -> Option<Polyline> {
    let darkest = neighbors(grid, row, col)
        .into_iter()
        .reduce(|best, n| if n.cell.l < best.cell.l { n } else { best })?;

    let start = Point::from(rect.center());
    let dx = rect.width() * 2.0 * rng.gen::<f64>();
    let dy = rect.height() * 2.0 * rng.gen::<f64>();
    let step = |delta: f64, towards: usize, from: usize| match towards.cmp(&from) {
        std::cmp::Ordering::Less => -delta,
        std::cmp::Ordering::Equal => 0.0,
        std::cmp::Ordering::Greater => delta,
    };
    let end = Point::new(
        start.x + step(dx, darkest.col, col),
        start.y + step(dy, darkest.row, row),
    );
    Polyline::new([start, end])
}
