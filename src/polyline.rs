//! Polylines, the unit of work for a pen plotter.

use kurbo::{BezPath, Rect};

use crate::geom::{Point, Segment};

/// A sequence of points meant to be drawn as one continuous pen stroke.
///
/// A polyline always has at least two points. A closed loop is represented by
/// repeating the first point at the end.
#[derive(Clone, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(transparent)]
pub struct Polyline {
    points: Vec<Point>,
}

impl std::fmt::Debug for Polyline {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_list().entries(&self.points).finish()
    }
}

impl Polyline {
    /// Creates a polyline, or returns `None` if there are fewer than two points.
    pub fn new<P: Into<Point>>(points: impl IntoIterator<Item = P>) -> Option<Self> {
        let points: Vec<Point> = points.into_iter().map(Into::into).collect();
        (points.len() >= 2).then_some(Polyline { points })
    }

    /// The polyline consisting of a single segment.
    pub fn from_segment(seg: &Segment) -> Self {
        Polyline {
            points: vec![seg.p0, seg.p1],
        }
    }

    /// The closed rectangle around `rect`, starting and ending at its top-left corner.
    pub fn from_rect(rect: Rect) -> Self {
        Polyline {
            points: vec![
                Point::new(rect.x0, rect.y0),
                Point::new(rect.x1, rect.y0),
                Point::new(rect.x1, rect.y1),
                Point::new(rect.x0, rect.y1),
                Point::new(rect.x0, rect.y0),
            ],
        }
    }

    /// The points of this polyline.
    pub fn points(&self) -> &[Point] {
        &self.points
    }

    /// The number of points.
    #[allow(clippy::len_without_is_empty)]
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// The first point.
    pub fn first(&self) -> Point {
        self.points[0]
    }

    /// The last point.
    pub fn last(&self) -> Point {
        self.points[self.points.len() - 1]
    }

    /// Do we start and end at the same point?
    pub fn is_closed(&self) -> bool {
        self.first() == self.last()
    }

    /// Iterates over the straight pieces of this polyline.
    pub fn segments(&self) -> impl Iterator<Item = Segment> + '_ {
        self.points.windows(2).map(|w| Segment::new(w[0], w[1]))
    }

    /// The same polyline, drawn in the opposite direction.
    ///
    /// This returns a new polyline and leaves `self` alone.
    pub fn reversed(&self) -> Self {
        Polyline {
            points: self.points.iter().rev().copied().collect(),
        }
    }

    /// The total length of the pen stroke.
    pub fn length(&self) -> f64 {
        self.segments().map(|s| s.length()).sum()
    }

    /// The smallest rectangle containing every point.
    pub fn bounding_box(&self) -> Rect {
        self.points
            .iter()
            .fold(Rect::from_points(self.first().to_kurbo(), self.first().to_kurbo()), |r, p| {
                r.union_pt(p.to_kurbo())
            })
    }

    /// Converts to a `kurbo` path, for handing to a renderer.
    pub fn to_bez_path(&self) -> BezPath {
        let mut ret = BezPath::new();
        ret.move_to(self.first().to_kurbo());
        for p in &self.points[1..] {
            ret.line_to(p.to_kurbo());
        }
        ret
    }

    pub(crate) fn from_points_unchecked(points: Vec<Point>) -> Self {
        debug_assert!(points.len() >= 2);
        Polyline { points }
    }
}

/// Converts a collection of polylines into a single `kurbo` path, one sub-path each.
pub fn to_bez_path<'a>(polylines: impl IntoIterator<Item = &'a Polyline>) -> BezPath {
    let mut ret = BezPath::new();
    for p in polylines {
        ret.extend(p.to_bez_path().elements().iter().copied());
    }
    ret
}

#[cfg(test)]
mod tests {
    use super::*;
    use kurbo::PathEl;

    fn p(x: f64, y: f64) -> Point {
        Point::new(x, y)
    }

    #[test]
    fn too_short() {
        assert!(Polyline::new([p(0.0, 0.0)]).is_none());
        assert!(Polyline::new(Vec::<Point>::new()).is_none());
        assert!(Polyline::new([(0.0, 0.0), (1.0, 1.0)]).is_some());
    }

    #[test]
    fn reversal_leaves_original_alone() {
        let line = Polyline::new([p(0.0, 0.0), p(1.0, 0.0), p(1.0, 1.0)]).unwrap();
        let rev = line.reversed();
        assert_eq!(rev.points(), &[p(1.0, 1.0), p(1.0, 0.0), p(0.0, 0.0)]);
        assert_eq!(line.points(), &[p(0.0, 0.0), p(1.0, 0.0), p(1.0, 1.0)]);
        assert_eq!(rev.reversed(), line);
    }

    #[test]
    fn rect_border() {
        let border = Polyline::from_rect(Rect::new(1.0, 2.0, 3.0, 4.0));
        assert!(border.is_closed());
        assert_eq!(border.len(), 5);
        assert_eq!(border.length(), 8.0);
        assert_eq!(border.bounding_box(), Rect::new(1.0, 2.0, 3.0, 4.0));
    }

    #[test]
    fn bez_path() {
        let line = Polyline::new([p(0.0, 0.0), p(1.0, 0.0), p(1.0, 1.0)]).unwrap();
        assert_eq!(
            line.to_bez_path().elements(),
            &[
                PathEl::MoveTo(kurbo::Point::new(0.0, 0.0)),
                PathEl::LineTo(kurbo::Point::new(1.0, 0.0)),
                PathEl::LineTo(kurbo::Point::new(1.0, 1.0)),
            ]
        );
        let both = to_bez_path([&line, &line.reversed()]);
        assert_eq!(both.elements().len(), 6);
    }
}
