//! Dashed and dotted strokes.
//!
//! A dashed line from `p1` to `p2` looks like this:
//!
//! ```text
//! __   __   __   __   .
//! ^                   ^
//! p1                  p2
//! ```
//!
//! The first dash starts exactly at `p1`, and no dash starts at `p2`. That
//! way, dashed lines can be chained together without doubling up the dash
//! on the shared point.

use crate::geom::{Point, Segment};

/// Splits the line from `p1` to `p2` into `dash_count` evenly spaced dashes.
///
/// Dash `i` starts at `i / dash_count` of the way from `p1` to `p2`, and is
/// `dash_length` long, measured along the line. For a dotted line, supply a
/// really small `dash_length`. If `dash_length` is longer than the spacing
/// between dash starts, the dashes will overlap; that's up to the caller.
///
/// Returns no dashes if `dash_count` is zero or if `p1 == p2` (there's no
/// direction to draw the dashes in).
pub fn expand(p1: Point, p2: Point, dash_count: usize, dash_length: f64) -> Vec<Segment> {
    debug_assert!(dash_length > 0.0);

    let len = p1.distance(&p2);
    if dash_count == 0 || len == 0.0 {
        return Vec::new();
    }
    let dx = (p2.x - p1.x) / len * dash_length;
    let dy = (p2.y - p1.y) / len * dash_length;

    (0..dash_count)
        .map(|i| {
            let start = p1.affine(&p2, i as f64 / dash_count as f64);
            let end = Point::new(start.x + dx, start.y + dy);
            Segment::new(start, end)
        })
        .collect()
}

/// Dashes every step of a polyline, with `dash_count` dashes per step.
///
/// Because [`expand`] never puts a dash at the end of a step, the shared
/// points between consecutive steps only get stroked once.
pub fn expand_polyline(points: &[Point], dash_count: usize, dash_length: f64) -> Vec<Segment> {
    points
        .windows(2)
        .flat_map(|w| expand(w[0], w[1], dash_count, dash_length))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn dotted_horizontal_line() {
        let dashes = expand(Point::new(0.0, 0.0), Point::new(5.0, 0.0), 5, 0.01);
        assert_eq!(dashes.len(), 5);
        for (i, d) in dashes.iter().enumerate() {
            assert_abs_diff_eq!(d.p0.x, i as f64, epsilon = 1e-9);
            assert_abs_diff_eq!(d.p0.y, 0.0, epsilon = 1e-9);
            assert_abs_diff_eq!(d.p1.x, i as f64 + 0.01, epsilon = 1e-9);
            assert_abs_diff_eq!(d.p1.y, 0.0, epsilon = 1e-9);
        }
        assert_eq!(dashes[0].p0, Point::new(0.0, 0.0));
    }

    #[test]
    fn dash_length_is_along_the_line() {
        let dashes = expand(Point::new(0.0, 0.0), Point::new(3.0, 4.0), 2, 0.5);
        assert_eq!(dashes.len(), 2);
        for d in &dashes {
            assert_abs_diff_eq!(d.length(), 0.5, epsilon = 1e-12);
        }
        assert_abs_diff_eq!(dashes[1].p0.x, 1.5, epsilon = 1e-12);
        assert_abs_diff_eq!(dashes[1].p0.y, 2.0, epsilon = 1e-12);
    }

    #[test]
    fn never_starts_at_the_end() {
        let p2 = Point::new(1.0, 1.0);
        let dashes = expand(Point::new(0.0, 0.0), p2, 7, 0.01);
        assert!(dashes.iter().all(|d| d.p0 != p2));
    }

    #[test]
    fn degenerate_inputs() {
        let p = Point::new(1.0, 2.0);
        assert!(expand(p, p, 3, 0.1).is_empty());
        assert!(expand(p, Point::new(2.0, 2.0), 0, 0.1).is_empty());
    }

    #[test]
    fn chained_polyline() {
        let points = [
            Point::new(0.0, 0.0),
            Point::new(2.0, 0.0),
            Point::new(2.0, 2.0),
        ];
        let dashes = expand_polyline(&points, 2, 0.1);
        let starts: Vec<_> = dashes.iter().map(|d| d.p0).collect();
        assert_eq!(
            starts,
            vec![
                Point::new(0.0, 0.0),
                Point::new(1.0, 0.0),
                Point::new(2.0, 0.0),
                Point::new(2.0, 1.0),
            ]
        );
    }
}
