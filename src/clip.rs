//! Cropping polylines to the printable part of the page.
//!
//! Every segment is clipped separately (using the Liang-Barsky parametrization)
//! and the surviving pieces are glued back together whenever one piece starts
//! exactly where the previous one ended. Unlike `kurbo::Rect::contains`, the box
//! here is closed: points on its boundary count as inside.

use kurbo::Rect;

use crate::{
    geom::{Point, Segment},
    polyline::Polyline,
};

fn contains(rect: &Rect, p: Point) -> bool {
    rect.x0 <= p.x && p.x <= rect.x1 && rect.y0 <= p.y && p.y <= rect.y1
}

fn clamp_into(rect: &Rect, p: Point) -> Point {
    Point::new(p.x.clamp(rect.x0, rect.x1), p.y.clamp(rect.y0, rect.y1))
}

/// Clips a single segment to the closed rectangle `rect`.
///
/// Endpoints that were already inside `rect` come back bit-for-bit unchanged.
/// New endpoints on the boundary are clamped into the rectangle, so rounding
/// can't push them just outside. Returns `None` if nothing of positive length
/// survives.
pub fn clip_segment(seg: &Segment, rect: &Rect) -> Option<Segment> {
    debug_assert!(rect.x0 <= rect.x1 && rect.y0 <= rect.y1);

    let dx = seg.p1.x - seg.p0.x;
    let dy = seg.p1.y - seg.p0.y;
    let mut t0 = 0.0f64;
    let mut t1 = 1.0f64;
    let constraints = [
        (-dx, seg.p0.x - rect.x0),
        (dx, rect.x1 - seg.p0.x),
        (-dy, seg.p0.y - rect.y0),
        (dy, rect.y1 - seg.p0.y),
    ];
    for (p, q) in constraints {
        if p == 0.0 {
            if q < 0.0 {
                return None;
            }
        } else {
            let r = q / p;
            if p < 0.0 {
                t0 = t0.max(r);
            } else {
                t1 = t1.min(r);
            }
        }
    }
    if t0 >= t1 {
        return None;
    }

    let p0 = if t0 == 0.0 {
        seg.p0
    } else {
        clamp_into(rect, seg.point_at(t0))
    };
    let p1 = if t1 == 1.0 {
        seg.p1
    } else {
        clamp_into(rect, seg.point_at(t1))
    };
    debug_assert!(contains(rect, p0) && contains(rect, p1));
    (p0 != p1).then_some(Segment { p0, p1 })
}

fn flush(run: &mut Vec<Point>, ret: &mut Vec<Polyline>) {
    if let Some(line) = Polyline::new(run.drain(..)) {
        ret.push(line);
    }
}

/// Clips polylines to the closed rectangle `rect`.
///
/// Polylines that are completely outside disappear. Polylines that leave and
/// re-enter the rectangle get split into several pieces. Points that were
/// inside the rectangle are kept exactly, so clipping twice gives the same
/// result as clipping once.
pub fn clip(polylines: &[Polyline], rect: Rect) -> Vec<Polyline> {
    let rect = rect.abs();
    let mut ret = Vec::new();
    let mut run: Vec<Point> = Vec::new();

    for line in polylines {
        for seg in line.segments() {
            if seg.is_degenerate() {
                continue;
            }
            match clip_segment(&seg, &rect) {
                Some(c) if run.last() == Some(&c.p0) => run.push(c.p1),
                Some(c) => {
                    flush(&mut run, &mut ret);
                    run.extend([c.p0, c.p1]);
                }
                None => flush(&mut run, &mut ret),
            }
        }
        flush(&mut run, &mut ret);
    }
    ret
}

/// The printable box of a `width` by `height` page, `margin` in from every edge.
///
/// Returns `None` if the margins leave no room at all.
pub fn margin_box(width: f64, height: f64, margin: f64) -> Option<Rect> {
    let rect = Rect::new(margin, margin, width - margin, height - margin);
    (rect.x0 <= rect.x1 && rect.y0 <= rect.y1).then_some(rect)
}

/// Clips polylines to the printable box of a `width` by `height` page.
///
/// If `with_border` is set, the outline of the printable box is added at the
/// end as a closed polyline. If the margins don't leave any room, nothing is
/// printable and the result is empty.
pub fn clip_to_margin(
    polylines: &[Polyline],
    width: f64,
    height: f64,
    margin: f64,
    with_border: bool,
) -> Vec<Polyline> {
    let Some(rect) = margin_box(width, height, margin) else {
        log::warn!("a margin of {margin} leaves nothing of a {width}x{height} page");
        return Vec::new();
    };
    let mut ret = clip(polylines, rect);
    if with_border {
        ret.push(Polyline::from_rect(rect));
    }
    ret
}
