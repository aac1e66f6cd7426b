//! Geometric primitives, like points and line segments.

use kurbo::Vec2;

use crate::Error;

/// Relative tolerance used to decide that two directions are parallel.
const PARALLEL_TOLERANCE: f64 = 1e-12;

/// A two-dimensional point, in page units.
///
/// Although it isn't important for most of the functionality, the
/// documentation and method naming assume that larger `y` values are further
/// down the page, so "above" means "smaller `y`".
#[derive(Clone, Copy, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Point {
    /// Horizontal component.
    pub x: f64,
    /// Vertical component.
    pub y: f64,
}

impl std::fmt::Debug for Point {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({:?}, {:?})", self.x, self.y)
    }
}

impl Point {
    /// Create a new point.
    pub fn new(x: f64, y: f64) -> Self {
        debug_assert!(x.is_finite());
        debug_assert!(y.is_finite());
        Point { x, y }
    }

    /// Compute an affine combination between `self` and `other`; that is, `(1 - t) * self + t * other`.
    ///
    /// `t == 0.0` and `t == 1.0` reproduce the endpoints exactly.
    pub fn affine(&self, other: &Self, t: f64) -> Self {
        Point {
            x: (1.0 - t) * self.x + t * other.x,
            y: (1.0 - t) * self.y + t * other.y,
        }
    }

    /// The Euclidean distance between two points.
    pub fn distance(&self, other: &Self) -> f64 {
        (other.x - self.x).hypot(other.y - self.y)
    }

    /// Are we within `eps` of `other`, in both coordinates?
    pub fn close_to(&self, other: &Self, eps: f64) -> bool {
        (self.x - other.x).abs() <= eps && (self.y - other.y).abs() <= eps
    }

    /// Convert to a `kurbo` point.
    pub fn to_kurbo(self) -> kurbo::Point {
        kurbo::Point::new(self.x, self.y)
    }
}

impl From<(f64, f64)> for Point {
    fn from((x, y): (f64, f64)) -> Self {
        Self { x, y }
    }
}

impl From<[f64; 2]> for Point {
    fn from([x, y]: [f64; 2]) -> Self {
        Self { x, y }
    }
}

impl From<kurbo::Point> for Point {
    fn from(p: kurbo::Point) -> Self {
        Self { x: p.x, y: p.y }
    }
}

/// A straight line segment from `p0` to `p1`.
///
/// The direction matters for dash generation and for trimming (a trimmed
/// segment keeps its direction), but not for intersection tests.
#[derive(Clone, Copy, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Segment {
    /// The start point.
    pub p0: Point,
    /// The end point.
    pub p1: Point,
}

impl std::fmt::Debug for Segment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?} -- {:?}", self.p0, self.p1)
    }
}

/// The slope-intercept form `y = slope * x + intercept` of a non-vertical line.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize)]
pub struct SlopeIntercept {
    /// How much `y` changes per unit of `x`.
    pub slope: f64,
    /// The value of `y` at `x = 0`.
    pub intercept: f64,
}

/// The outcome of intersecting two segments.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Intersection {
    /// The segments don't meet.
    None,
    /// The segments cross (or touch) at a single point.
    Point {
        /// The meeting point. It lies on both segments, not just on their extensions.
        point: Point,
        /// The parameter of `point` along the first segment, in `[0, 1]`.
        t: f64,
    },
    /// The segments lie on distinct parallel lines.
    Parallel,
    /// The segments lie on the same line and overlap.
    ///
    /// There's no single meeting point in this case, so there's nothing usable
    /// for breaking ties.
    Collinear,
}

impl Segment {
    /// Create a new segment.
    pub fn new(p0: impl Into<Point>, p1: impl Into<Point>) -> Self {
        Self {
            p0: p0.into(),
            p1: p1.into(),
        }
    }

    /// Returns true if the two endpoints coincide.
    pub fn is_degenerate(&self) -> bool {
        self.p0 == self.p1
    }

    /// The length of this segment.
    pub fn length(&self) -> f64 {
        self.p0.distance(&self.p1)
    }

    /// The point at parameter `t`, where `t = 0` is `p0` and `t = 1` is `p1`.
    pub fn point_at(&self, t: f64) -> Point {
        self.p0.affine(&self.p1, t)
    }

    /// The same segment, traversed in the other direction.
    pub fn reversed(&self) -> Self {
        Self {
            p0: self.p1,
            p1: self.p0,
        }
    }

    /// The vector from `p0` to `p1`.
    pub fn direction(&self) -> Vec2 {
        self.p1.to_kurbo() - self.p0.to_kurbo()
    }

    /// Returns true if this segment is exactly vertical.
    pub fn is_vertical(&self) -> bool {
        self.p0.x == self.p1.x
    }

    /// Computes the slope and intercept of the line through this segment.
    ///
    /// Fails with [`Error::DegenerateSegment`] if the segment is vertical,
    /// because then there is no slope to speak of.
    pub fn slope_intercept(&self) -> Result<SlopeIntercept, Error> {
        if self.is_vertical() {
            return Err(Error::DegenerateSegment);
        }
        let slope = (self.p1.y - self.p0.y) / (self.p1.x - self.p0.x);
        let intercept = self.p0.y - slope * self.p0.x;
        Ok(SlopeIntercept { slope, intercept })
    }

    /// The slope of the line through this segment.
    pub fn slope(&self) -> Result<f64, Error> {
        self.slope_intercept().map(|si| si.slope)
    }

    /// Convert to a `kurbo` line.
    pub fn to_kurbo(&self) -> kurbo::Line {
        kurbo::Line::new(self.p0.to_kurbo(), self.p1.to_kurbo())
    }

    /// Intersects this segment with `other`.
    ///
    /// This is the usual parametric intersection: a crossing is only reported
    /// if it lies within both segments (endpoints included).
    pub fn intersect(&self, other: &Segment) -> Intersection {
        let r = self.direction();
        let s = other.direction();
        let qp = other.p0.to_kurbo() - self.p0.to_kurbo();

        let denom = r.cross(s);
        if denom.abs() <= PARALLEL_TOLERANCE * r.hypot() * s.hypot() {
            if qp.cross(r).abs() > PARALLEL_TOLERANCE * r.hypot() * qp.hypot() {
                return Intersection::Parallel;
            }

            // Same line. Project `other` onto our parametrization to see whether
            // the two actually overlap.
            let rr = r.dot(r);
            if rr == 0.0 {
                return Intersection::None;
            }
            let t0 = qp.dot(r) / rr;
            let t1 = t0 + s.dot(r) / rr;
            let (lo, hi) = if t0 <= t1 { (t0, t1) } else { (t1, t0) };
            return if hi >= 0.0 && lo <= 1.0 {
                Intersection::Collinear
            } else {
                Intersection::None
            };
        }

        let t = qp.cross(s) / denom;
        let u = qp.cross(r) / denom;
        if (0.0..=1.0).contains(&t) && (0.0..=1.0).contains(&u) {
            Intersection::Point {
                point: self.point_at(t),
                t,
            }
        } else {
            Intersection::None
        }
    }
}

impl From<(Point, Point)> for Segment {
    fn from((p0, p1): (Point, Point)) -> Self {
        Self { p0, p1 }
    }
}
