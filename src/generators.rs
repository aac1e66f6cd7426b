//! Synthetic inputs, for demos, benchmarks and tests.

use crate::{
    geom::Point,
    polyline::Polyline,
    scene::{Row, Scene},
    Error,
};

/// `count` circles around `center`, each one `spacing` bigger than the last.
///
/// The smallest circle has radius `radius`. Each circle is approximated by a
/// closed polyline with `steps` sides; with few steps you get polygons
/// instead of circles, which is sometimes the point.
pub fn concentric_circles(
    center: Point,
    radius: f64,
    spacing: f64,
    count: usize,
    steps: usize,
) -> Vec<Polyline> {
    let steps = steps.max(3);
    (0..count)
        .map(|j| {
            let r = radius + j as f64 * spacing;
            let mut points: Vec<Point> = (0..steps)
                .map(|i| {
                    let angle = std::f64::consts::TAU * i as f64 / steps as f64;
                    Point::new(center.x + angle.cos() * r, center.y + angle.sin() * r)
                })
                .collect();
            points.push(points[0]);
            Polyline::from_points_unchecked(points)
        })
        .collect()
}

/// `count` horizontal rows of `samples` samples each, one unit apart in `x`.
///
/// Row `i` sits at `y = i * spacing` with depth `i`. With a positive
/// `spacing`, every row is completely hidden by the one in front of it; with a
/// negative one, nothing is hidden at all.
pub fn flat_rows(count: usize, samples: usize, spacing: f64) -> Result<Scene, Error> {
    Scene::new((0..count).map(|i| {
        let y = i as f64 * spacing;
        Row::new(i as f64, (0..samples).map(|x| (x as f64, y)))
    }))
}

/// A range of `count` wavy ridges with `samples` samples each.
///
/// Row `i` is centered on `y = i * spacing` and wiggles up and down by up to
/// `amplitude`. The wiggles change from row to row, so ridges poke out from
/// behind each other and the hidden-line pass has real work to do.
pub fn ridges(
    count: usize,
    samples: usize,
    spacing: f64,
    amplitude: f64,
) -> Result<Scene, Error> {
    Scene::new((0..count).map(|i| {
        let phase = i as f64 * 0.7;
        let freq = 0.15 + 0.05 * (i % 5) as f64;
        let base = i as f64 * spacing;
        Row::new(
            i as f64,
            (0..samples).map(|s| {
                let x = s as f64;
                let wiggle = (x * freq + phase).sin() + 0.5 * (x * freq * 2.3 - phase).cos();
                (x, base - amplitude * wiggle / 1.5)
            }),
        )
    }))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn circles_are_closed() {
        let circles = concentric_circles(Point::new(5.0, 5.0), 1.0, 0.5, 4, 16);
        assert_eq!(circles.len(), 4);
        for (j, c) in circles.iter().enumerate() {
            assert!(c.is_closed());
            assert_eq!(c.len(), 17);
            let r = c.first().distance(&Point::new(5.0, 5.0));
            approx::assert_relative_eq!(r, 1.0 + 0.5 * j as f64);
        }
    }

    #[test]
    fn scenes() {
        assert_eq!(flat_rows(4, 10, 1.0).unwrap().len(), 4);
        let scene = ridges(6, 50, 1.0, 3.0).unwrap();
        assert_eq!(scene.len(), 6);
        assert!(scene.rows().iter().all(|r| r.samples.len() == 50));
    }
}
