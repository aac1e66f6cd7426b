//! Utilities for fuzz and/or property testing using `arbitrary`.
//!
//! The generators here are biased towards the awkward cases: points that
//! share coordinates, rows that touch, and segments that nearly coincide.
//! The [`checks`] module bundles the invariants that the fuzz targets (and
//! our `arbtest` tests) assert on the generated inputs.

use arbitrary::Unstructured;

use crate::{
    geom::{Point, Segment},
    polyline::Polyline,
    scene::{Row, Scene},
};

/// Generate an arbitrary float in some range.
pub fn float_in_range(
    start: f64,
    end: f64,
    u: &mut Unstructured<'_>,
) -> Result<f64, arbitrary::Error> {
    let num: u32 = u.arbitrary()?;
    let t = num as f64 / u32::MAX as f64;
    Ok((1.0 - t) * start + t * end)
}

fn float(u: &mut Unstructured<'_>) -> Result<f64, arbitrary::Error> {
    // Mostly small integers, so that coincidences are common.
    if u.ratio(1, 2)? {
        Ok(u.int_in_range(-8..=8)? as f64)
    } else {
        float_in_range(-1e3, 1e3, u)
    }
}

/// Generate an arbitrary point.
pub fn point(u: &mut Unstructured<'_>) -> Result<Point, arbitrary::Error> {
    Ok(Point::new(float(u)?, float(u)?))
}

/// Generate an arbitrary non-degenerate segment.
pub fn segment(u: &mut Unstructured<'_>) -> Result<Segment, arbitrary::Error> {
    let p0 = point(u)?;
    let mut p1 = point(u)?;
    if p0 == p1 {
        p1.x += 1.0;
    }
    Ok(Segment::new(p0, p1))
}

/// Generate a segment that has a good chance of sharing an endpoint with `other`.
pub fn another_segment(
    u: &mut Unstructured<'_>,
    other: &Segment,
) -> Result<Segment, arbitrary::Error> {
    let p0 = match u.int_in_range(0..=2)? {
        0 => other.p0,
        1 => other.p1,
        _ => point(u)?,
    };
    let mut p1 = point(u)?;
    if p0 == p1 {
        p1.y += 1.0;
    }
    Ok(Segment::new(p0, p1))
}

/// Generate a bunch of segments, many of which touch one another.
pub fn segments(u: &mut Unstructured<'_>) -> Result<Vec<Segment>, arbitrary::Error> {
    let n = u.int_in_range(0..=24)?;
    let mut ret: Vec<Segment> = Vec::with_capacity(n);
    for _ in 0..n {
        let seg = match ret.last() {
            Some(last) if u.arbitrary()? => another_segment(u, last)?,
            _ => segment(u)?,
        };
        ret.push(seg);
    }
    Ok(ret)
}

/// Generate an arbitrary polyline.
pub fn polyline(u: &mut Unstructured<'_>) -> Result<Polyline, arbitrary::Error> {
    let n = u.int_in_range(2..=10)?;
    let points = (0..n).map(|_| point(u)).collect::<Result<Vec<_>, _>>()?;
    Ok(Polyline::from_points_unchecked(points))
}

/// Generate a scene whose rows all share the same `x` coordinates.
///
/// Shared `x` coordinates are what the scene assembler expects: segment `i`
/// of every row spans the same horizontal interval.
pub fn scene(u: &mut Unstructured<'_>) -> Result<Scene, arbitrary::Error> {
    let samples = u.int_in_range(2..=12)?;
    let row_count = u.int_in_range(1..=6)?;
    let mut rows = Vec::with_capacity(row_count);
    for depth in 0..row_count {
        let ys = (0..samples)
            .map(|_| float_in_range(0.0, 10.0, u))
            .collect::<Result<Vec<_>, _>>()?;
        rows.push(Row::new(
            depth as f64,
            ys.into_iter().enumerate().map(|(x, y)| (x as f64, y)),
        ));
    }
    Scene::new(rows).map_err(|_| arbitrary::Error::IncorrectFormat)
}

/// Invariant checks on arbitrary inputs, shared between fuzz targets and tests.
pub mod checks {
    use super::*;
    use kurbo::ParamCurveNearest as _;

    use crate::{
        clip::clip,
        group::group_segments,
        occlusion::resolve_visibility,
        scene::{assemble, SceneConfig},
    };

    /// The visible part of a segment is a piece of that segment, and doesn't
    /// depend on which way the segment runs.
    pub fn visibility(u: &mut Unstructured<'_>) -> Result<(), arbitrary::Error> {
        let seg = segment(u)?;
        let occluders = segments(u)?;
        let result = resolve_visibility(&seg, &occluders);
        assert_eq!(
            result.clone().map(|v| v.map(|v| v.reversed())),
            resolve_visibility(&seg.reversed(), &occluders)
        );
        if let Ok(Some(visible)) = result {
            let tol = 1e-6 * (1.0 + seg.length());
            assert!(visible.length() <= seg.length() + tol);
            for p in [visible.p0, visible.p1] {
                let dist = seg.to_kurbo().nearest(p.to_kurbo(), 1e-12).distance_sq.sqrt();
                assert!(dist <= tol, "{p:?} is {dist} away from {seg:?}");
            }
        }
        Ok(())
    }

    /// Grouping keeps every segment, and never produces a polyline that's too short.
    pub fn grouping(u: &mut Unstructured<'_>) -> Result<(), arbitrary::Error> {
        let segs = segments(u)?;
        let lines = group_segments(&segs, 1e-9);
        let edges: usize = lines.iter().map(|l| l.len() - 1).sum();
        // Segments shorter than the merge distance may collapse to a point.
        let long = segs.iter().filter(|s| !s.p0.close_to(&s.p1, 2e-9)).count();
        assert!(long <= edges && edges <= segs.len());
        assert!(lines.iter().all(|l| l.len() >= 2));
        Ok(())
    }

    /// Clipped output lies inside the box, and clipping again changes nothing.
    pub fn clipping(u: &mut Unstructured<'_>) -> Result<(), arbitrary::Error> {
        let n = u.int_in_range(0..=6)?;
        let lines = (0..n).map(|_| polyline(u)).collect::<Result<Vec<_>, _>>()?;
        let rect = kurbo::Rect::new(-4.0, -4.0, 4.0, 4.0);
        let once = clip(&lines, rect);
        for p in once.iter().flat_map(|l| l.points()) {
            assert!(rect.x0 <= p.x && p.x <= rect.x1 && rect.y0 <= p.y && p.y <= rect.y1);
        }
        assert_eq!(clip(&once, rect), once);
        Ok(())
    }

    /// The nearest row is never trimmed, and nothing in the scene makes assembly fail.
    pub fn assembly(u: &mut Unstructured<'_>) -> Result<(), arbitrary::Error> {
        let scene = scene(u)?;
        let lookback = u.int_in_range(0..=4)?;
        let visible = assemble(&scene, &SceneConfig { lookback })
            .map_err(|_| arbitrary::Error::IncorrectFormat)?;
        assert_eq!(visible.len(), scene.len());
        let front: Vec<_> = (1..scene.rows()[0].samples.len())
            .filter_map(|i| scene.rows()[0].segment(i))
            .collect();
        assert_eq!(visible[0].segments, front);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::checks;

    #[test]
    fn visibility() {
        arbtest::arbtest(checks::visibility);
    }

    #[test]
    fn grouping() {
        arbtest::arbtest(checks::grouping);
    }

    #[test]
    fn clipping() {
        arbtest::arbtest(checks::clipping);
    }

    #[test]
    fn assembly() {
        arbtest::arbtest(checks::assembly);
    }
}
