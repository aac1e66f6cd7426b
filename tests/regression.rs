//! End-to-end cases, declared in `cases.json`.
//!
//! Each case is a scene, a page size and a (partial) plot configuration,
//! together with the number of polylines and points we expect to come out.

use ridgeline::{plot_scene, PlotConfig, Row, Scene};
use serde::Deserialize;

#[derive(Deserialize, Debug)]
struct RowDeclaration {
    depth: f64,
    samples: Vec<[f64; 2]>,
}

#[derive(Deserialize, Debug)]
struct Expectation {
    polylines: usize,
    points: usize,
}

#[derive(Deserialize, Debug)]
struct RegressionCase {
    name: String,
    rows: Vec<RowDeclaration>,
    page: [f64; 2],
    config: PlotConfig,
    expect: Expectation,
}

impl RegressionCase {
    fn scene(&self) -> Scene {
        Scene::new(
            self.rows
                .iter()
                .map(|r| Row::new(r.depth, r.samples.iter().copied())),
        )
        .unwrap()
    }
}

fn cases() -> Vec<RegressionCase> {
    serde_json::from_str(include_str!("cases.json")).unwrap()
}

#[test]
fn declared_cases() {
    let cases = cases();
    assert!(!cases.is_empty());
    for case in cases {
        let [width, height] = case.page;
        let lines = plot_scene(&case.scene(), &case.config, width, height)
            .unwrap_or_else(|e| panic!("{}: {e}", case.name));
        let points: usize = lines.iter().map(|l| l.len()).sum();
        assert_eq!(
            (lines.len(), points),
            (case.expect.polylines, case.expect.points),
            "{}: got {lines:?}",
            case.name
        );

        // Every point stays inside the printable area.
        let m = case.config.margin;
        for p in lines.iter().flat_map(|l| l.points()) {
            assert!(
                m <= p.x && p.x <= width - m && m <= p.y && p.y <= height - m,
                "{}: {p:?} is in the margin",
                case.name
            );
        }
    }
}

#[test]
fn plotting_is_deterministic() {
    for case in cases() {
        let [width, height] = case.page;
        let scene = case.scene();
        let a = plot_scene(&scene, &case.config, width, height).unwrap();
        let b = plot_scene(&scene, &case.config, width, height).unwrap();
        assert_eq!(a, b, "{}", case.name);
    }
}
