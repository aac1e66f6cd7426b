//! Hidden-line removal for a single segment.
//!
//! A segment belongs to some row, and the segments from nearer rows that
//! cover the same horizontal span are its potential occluders. We work in
//! page coordinates, where smaller `y` is nearer the viewer: an occluder that
//! sits entirely above the segment hides it completely.
//!
//! Segments are short (one sample-to-sample step) so we only model a single
//! contiguous visible piece. An occluder that crosses the segment either
//! marks the point where the segment comes out from behind it (a
//! "visible-from" point) or where it disappears behind it (a "visible-until"
//! point), depending on which of the two is steeper.
//!
//! ```text
//!            visible-from
//!                 v
//!   occluder ----x-------
//!               /
//!    segment   /
//! ```

use crate::{
    geom::{Intersection, Point, Segment},
    Error,
};

/// The candidate trim points gathered from all the occluders.
///
/// Points are stored together with their parameter along the segment, which is
/// what we use to pick the extremal ones. The segment is always oriented
/// left-to-right first, so a larger parameter means a larger `x`.
#[derive(Clone, Copy, Debug, Default)]
struct Trims {
    /// The furthest-along point where the segment emerges from behind an occluder.
    visible_from: Option<(f64, Point)>,
    /// The earliest point where the segment goes behind an occluder.
    visible_until: Option<(f64, Point)>,
}

impl Trims {
    fn add_visible_from(&mut self, t: f64, p: Point) {
        if self.visible_from.map_or(true, |(old_t, _)| t > old_t) {
            self.visible_from = Some((t, p));
        }
    }

    fn add_visible_until(&mut self, t: f64, p: Point) {
        if self.visible_until.map_or(true, |(old_t, _)| t < old_t) {
            self.visible_until = Some((t, p));
        }
    }

    fn apply(self, seg: &Segment) -> Option<Segment> {
        let (t0, p0) = self.visible_from.unwrap_or((0.0, seg.p0));
        let (t1, p1) = self.visible_until.unwrap_or((1.0, seg.p1));
        if t0 >= t1 || p0 == p1 {
            None
        } else {
            Some(Segment { p0, p1 })
        }
    }
}

/// Orients `seg` left-to-right (bottom-to-top if it's vertical), and says
/// whether that meant flipping it.
fn oriented(seg: &Segment) -> (Segment, bool) {
    let flip = seg.p0.x > seg.p1.x || (seg.p0.x == seg.p1.x && seg.p0.y > seg.p1.y);
    if flip {
        (seg.reversed(), true)
    } else {
        (*seg, false)
    }
}

/// Is `occluder` strictly above `seg` at both ends?
///
/// The occluder is assumed to span the same sample indices as `seg`, so once
/// both are oriented the same way their endpoints correspond to one another.
fn totally_above(occluder: &Segment, seg: &Segment) -> bool {
    let (occluder, _) = oriented(occluder);
    occluder.p0.y < seg.p0.y && occluder.p1.y < seg.p1.y
}

/// Computes the visible part of `seg`, given the segments that might hide it.
///
/// Returns `Ok(None)` if `seg` is completely hidden, and otherwise the visible
/// piece of it. The visible piece keeps the direction of `seg` and its
/// endpoints always lie on `seg`. With no occluders at all, `seg` comes back
/// unchanged. Which part is visible doesn't depend on the direction of `seg`:
/// trims are picked by their `x` coordinate.
///
/// # Errors
///
/// Slopes are only compared where an occluder actually crosses `seg`. If one of
/// the two segments involved in such a crossing is vertical, this fails with
/// [`Error::DegenerateSegment`].
pub fn resolve_visibility(seg: &Segment, occluders: &[Segment]) -> Result<Option<Segment>, Error> {
    if occluders.is_empty() {
        return Ok(Some(*seg));
    }

    let (seg_lr, flipped) = oriented(seg);

    let mut trims = Trims::default();
    let mut seg_slope = None;
    for occ in occluders {
        match seg_lr.intersect(occ) {
            Intersection::Point { point, t } => {
                let slope = match seg_slope {
                    Some(s) => s,
                    None => *seg_slope.insert(seg_lr.slope()?),
                };
                if slope > occ.slope()? {
                    trims.add_visible_from(t, point);
                } else {
                    trims.add_visible_until(t, point);
                }
            }
            Intersection::None | Intersection::Parallel | Intersection::Collinear => {
                if totally_above(occ, &seg_lr) {
                    return Ok(None);
                }
            }
        }
    }

    let visible = trims.apply(&seg_lr);
    Ok(if flipped {
        visible.map(|v| v.reversed())
    } else {
        visible
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::num::tests::Reasonable;
    use assert_matches::assert_matches;
    use kurbo::ParamCurveNearest as _;
    use proptest::prelude::*;

    fn seg(x0: f64, y0: f64, x1: f64, y1: f64) -> Segment {
        Segment::new((x0, y0), (x1, y1))
    }

    #[track_caller]
    fn assert_visible(actual: Option<Segment>, expected: Segment) {
        let actual = actual.expect("segment should be visible");
        assert!(
            actual.p0.close_to(&expected.p0, 1e-12) && actual.p1.close_to(&expected.p1, 1e-12),
            "{actual:?} != {expected:?}"
        );
    }

    #[test]
    fn no_occluders() {
        let s = seg(0.0, 0.0, 10.0, 3.0);
        assert_eq!(resolve_visibility(&s, &[]).unwrap(), Some(s));
    }

    #[test]
    fn fully_hidden() {
        let s = seg(0.0, 5.0, 10.0, 5.0);
        let o = seg(0.0, 0.0, 10.0, 0.0);
        assert_eq!(resolve_visibility(&s, &[o]).unwrap(), None);
    }

    #[test]
    fn occluder_below_does_nothing() {
        let s = seg(0.0, 5.0, 10.0, 5.0);
        let o = seg(0.0, 7.0, 10.0, 8.0);
        assert_eq!(resolve_visibility(&s, &[o]).unwrap(), Some(s));
    }

    #[test]
    fn nearly_parallel_occluder_above_hides() {
        let s = seg(0.0, 5.0, 10.0, 5.0);
        let o = seg(0.0, 4.0, 10.0, 4.0 + 1e-9);
        assert_eq!(s.intersect(&o), Intersection::None);
        assert_eq!(resolve_visibility(&s, &[o]).unwrap(), None);
    }

    #[test]
    fn trimmed_start() {
        let s = seg(0.0, 0.0, 10.0, 10.0);
        let o = seg(0.0, 5.0, 10.0, 5.0);
        assert_visible(resolve_visibility(&s, &[o]).unwrap(), seg(5.0, 5.0, 10.0, 10.0));
    }

    #[test]
    fn trimmed_end() {
        let s = seg(0.0, 10.0, 10.0, 0.0);
        let o = seg(0.0, 5.0, 10.0, 5.0);
        assert_visible(resolve_visibility(&s, &[o]).unwrap(), seg(0.0, 10.0, 5.0, 5.0));
    }

    #[test]
    fn extremal_trims_win() {
        let s = seg(0.0, 0.0, 10.0, 10.0);
        // Both flatter than `s`, so both give visible-from points: (2, 2) and (6, 6).
        let a = seg(0.0, 2.0, 10.0, 2.0);
        let b = seg(0.0, 6.0, 10.0, 6.0);
        assert_visible(resolve_visibility(&s, &[a, b]).unwrap(), seg(6.0, 6.0, 10.0, 10.0));
        assert_visible(resolve_visibility(&s, &[b, a]).unwrap(), seg(6.0, 6.0, 10.0, 10.0));

        // Both steeper than `s`: visible-until points at (4, 4) and (8, 8).
        let s = seg(0.0, 0.0, 10.0, 0.0);
        let c = seg(0.0, -4.0, 8.0, 4.0);
        let d = seg(4.0, -4.0, 12.0, 4.0);
        assert_visible(resolve_visibility(&s, &[d, c]).unwrap(), seg(0.0, 0.0, 4.0, 0.0));
    }

    #[test]
    fn inverted_trims_hide_everything() {
        let s = seg(0.0, 0.0, 10.0, 0.0);
        // Visible until x = 2 ...
        let until = seg(0.0, -2.0, 4.0, 2.0);
        // ... and visible from x = 8.
        let from = seg(0.0, 8.0, 10.0, -2.0);
        assert_eq!(resolve_visibility(&s, &[until, from]).unwrap(), None);
    }

    #[test]
    fn both_trims() {
        let s = seg(0.0, 0.0, 10.0, 0.0);
        let from = seg(0.0, 2.0, 4.0, -2.0);
        let until = seg(6.0, -2.0, 10.0, 2.0);
        assert_visible(resolve_visibility(&s, &[until, from]).unwrap(), seg(2.0, 0.0, 8.0, 0.0));
    }

    #[test]
    fn touching_at_the_start_hides() {
        // The segment only meets its occluder at its very start, and goes behind it there.
        let s = seg(0.0, 0.0, 10.0, 0.0);
        let o = seg(-1.0, -1.0, 0.0, 0.0);
        assert_eq!(resolve_visibility(&s, &[o]).unwrap(), None);
    }

    #[test]
    fn direction_does_not_matter() {
        let s = seg(0.0, 0.0, 10.0, 10.0);
        let o = seg(0.0, 5.0, 10.0, 5.0);
        let forward = resolve_visibility(&s, &[o]).unwrap();
        let backward = resolve_visibility(&s.reversed(), &[o.reversed()]).unwrap();
        assert_visible(forward, seg(5.0, 5.0, 10.0, 10.0));
        assert_visible(backward, seg(10.0, 10.0, 5.0, 5.0));

        // Only the segment runs backwards.
        let backward = resolve_visibility(&s.reversed(), &[o]).unwrap();
        assert_visible(backward, seg(10.0, 10.0, 5.0, 5.0));
    }

    #[test]
    fn extremal_trims_right_to_left() {
        let s = seg(10.0, 10.0, 0.0, 0.0);
        let a = seg(10.0, 2.0, 0.0, 2.0);
        let b = seg(10.0, 6.0, 0.0, 6.0);
        assert_visible(resolve_visibility(&s, &[a, b]).unwrap(), seg(10.0, 10.0, 6.0, 6.0));
        assert_visible(resolve_visibility(&s, &[b, a]).unwrap(), seg(10.0, 10.0, 6.0, 6.0));

        let s = seg(10.0, 0.0, 0.0, 0.0);
        let c = seg(0.0, -4.0, 8.0, 4.0);
        let d = seg(4.0, -4.0, 12.0, 4.0);
        assert_visible(resolve_visibility(&s, &[d, c]).unwrap(), seg(4.0, 0.0, 0.0, 0.0));
    }

    #[test]
    fn vertical_crossing_fails() {
        let s = seg(0.0, 0.0, 10.0, 0.0);
        let o = seg(5.0, -1.0, 5.0, 1.0);
        assert_matches!(resolve_visibility(&s, &[o]), Err(Error::DegenerateSegment));
    }

    proptest! {
    #[test]
    fn no_occluders_passes_through(s in Segment::reasonable()) {
        prop_assert_eq!(resolve_visibility(&s, &[]).unwrap(), Some(s));
    }

    #[test]
    fn reversing_gives_the_same_piece(s in Segment::reasonable(), occs in prop::collection::vec(Segment::reasonable(), 0..4)) {
        let forward = resolve_visibility(&s, &occs).map(|v| v.map(|v| v.reversed()));
        let backward = resolve_visibility(&s.reversed(), &occs);
        prop_assert_eq!(forward, backward);
    }

    #[test]
    fn result_lies_on_input(s in Segment::reasonable(), occs in prop::collection::vec(Segment::reasonable(), 0..4)) {
        if let Ok(Some(v)) = resolve_visibility(&s, &occs) {
            let tol = 1e-6 * (1.0 + s.length());
            for p in [v.p0, v.p1] {
                let d = s.to_kurbo().nearest(p.to_kurbo(), 1e-9).distance_sq.sqrt();
                prop_assert!(d <= tol);
            }
            prop_assert!(v.length() <= s.length() + tol);
        }
    }
    }
}
