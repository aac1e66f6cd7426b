//! Turning audio amplitudes into a stack of mountain ridges.
//!
//! The samples are split into equal consecutive windows, and every window
//! becomes one row of the scene. The first window is the nearest row, drawn
//! at the top of the page, and each further window sits `row_spacing` lower.
//! Louder samples make taller peaks (smaller `y`), so a loud passage in a
//! near row can hide the quieter rows behind it.

use crate::{
    geom::Point,
    num::check_finite,
    scene::{Row, Scene},
    Error,
};

/// The largest magnitude an amplitude sample can have.
pub const MAX_AMPLITUDE: f64 = 128.0;

/// A validated sequence of amplitude samples, each in `[-128, 128]`.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(transparent)]
pub struct Waveform {
    samples: Vec<f64>,
}

/// Where the mountain rows go on the page.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct MountainLayout {
    /// The number of rows to split the waveform into.
    pub rows: usize,
    /// The `x` coordinate where every row starts.
    pub left: f64,
    /// The top of the nearest row's band.
    pub top: f64,
    /// The horizontal extent of every row.
    pub width: f64,
    /// The height of the band a single row can occupy.
    pub row_height: f64,
    /// The vertical distance between the tops of consecutive rows.
    pub row_spacing: f64,
}

impl Default for MountainLayout {
    fn default() -> Self {
        MountainLayout {
            rows: 12,
            left: 0.5,
            top: 0.5,
            width: 20.0,
            row_height: 4.0,
            row_spacing: 2.0,
        }
    }
}

impl Waveform {
    /// Validates a sequence of samples.
    ///
    /// # Errors
    ///
    /// Non-finite samples give [`Error::NaN`] or [`Error::Infinity`], samples
    /// outside `[-128, 128]` give [`Error::SampleOutOfRange`], and a sequence
    /// without any non-zero sample gives [`Error::SilentInput`].
    pub fn new(samples: impl IntoIterator<Item = f64>) -> Result<Self, Error> {
        let samples: Vec<f64> = samples.into_iter().collect();
        check_finite(samples.iter().copied())?;
        if let Some((index, &value)) = samples
            .iter()
            .enumerate()
            .find(|(_, s)| s.abs() > MAX_AMPLITUDE)
        {
            return Err(Error::SampleOutOfRange { index, value });
        }
        if samples.iter().all(|&s| s == 0.0) {
            return Err(Error::SilentInput);
        }
        Ok(Waveform { samples })
    }

    /// The samples.
    pub fn samples(&self) -> &[f64] {
        &self.samples
    }

    /// The number of samples.
    #[allow(clippy::len_without_is_empty)]
    pub fn len(&self) -> usize {
        self.samples.len()
    }

    /// Lays the waveform out as rows of mountains.
    ///
    /// The samples are cut into `layout.rows` windows of equal length (any
    /// leftover samples at the end are dropped). Row `r` has depth `r` and its
    /// band starts at `top + r * row_spacing`. Within a row, the samples are
    /// spread evenly over `[left, left + width]`, and a sample `s` lands at
    /// `band_top + h - (s + 128) * h / 256`, with `h` the row height.
    ///
    /// # Errors
    ///
    /// Fails with [`Error::EmptyScene`] if there are no rows, or if the
    /// windows would have fewer than two samples each.
    pub fn to_scene(&self, layout: &MountainLayout) -> Result<Scene, Error> {
        if layout.rows == 0 {
            return Err(Error::EmptyScene {
                reason: "the layout has no rows".to_owned(),
            });
        }
        let window = self.samples.len() / layout.rows;
        if window < 2 {
            return Err(Error::EmptyScene {
                reason: format!(
                    "{} samples is not enough for {} rows",
                    self.samples.len(),
                    layout.rows
                ),
            });
        }

        let h = layout.row_height;
        let rows = self
            .samples
            .chunks_exact(window)
            .take(layout.rows)
            .enumerate()
            .map(|(r, chunk)| {
                let base = layout.top + r as f64 * layout.row_spacing;
                let samples = chunk.iter().enumerate().map(|(i, &s)| {
                    let x = layout.left + i as f64 / (window - 1) as f64 * layout.width;
                    let y = base + h - (s + MAX_AMPLITUDE) * h / (2.0 * MAX_AMPLITUDE);
                    Point::new(x, y)
                });
                Row::new(r as f64, samples)
            });
        Scene::new(rows)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use assert_matches::assert_matches;

    #[test]
    fn validation() {
        assert_matches!(Waveform::new([0.0, 0.0, 0.0]), Err(Error::SilentInput));
        assert_matches!(Waveform::new([]), Err(Error::SilentInput));
        assert_matches!(
            Waveform::new([0.0, 12.0, -129.0]),
            Err(Error::SampleOutOfRange { index: 2, .. })
        );
        assert_matches!(Waveform::new([0.0, f64::NAN]), Err(Error::NaN));
        assert_matches!(Waveform::new([-128.0, 128.0]), Ok(_));
    }

    #[test]
    fn amplitude_mapping() {
        let wave = Waveform::new([-128.0, 0.0, 128.0]).unwrap();
        let layout = MountainLayout {
            rows: 1,
            left: 1.0,
            top: 2.0,
            width: 10.0,
            row_height: 4.0,
            row_spacing: 1.0,
        };
        let scene = wave.to_scene(&layout).unwrap();
        let row = &scene.rows()[0];
        assert_eq!(row.depth, 0.0);
        let ys: Vec<_> = row.samples.iter().map(|p| p.y).collect();
        // Silence sits in the middle of the band, peaks reach its top.
        assert_abs_diff_eq!(ys[0], 6.0);
        assert_abs_diff_eq!(ys[1], 4.0);
        assert_abs_diff_eq!(ys[2], 2.0);
        let xs: Vec<_> = row.samples.iter().map(|p| p.x).collect();
        assert_eq!(xs, vec![1.0, 6.0, 11.0]);
    }

    #[test]
    fn windows() {
        let wave = Waveform::new((0..10).map(|i| i as f64)).unwrap();
        let layout = MountainLayout {
            rows: 3,
            ..MountainLayout::default()
        };
        let scene = wave.to_scene(&layout).unwrap();
        assert_eq!(scene.len(), 3);
        for (r, row) in scene.rows().iter().enumerate() {
            assert_eq!(row.depth, r as f64);
            assert_eq!(row.samples.len(), 3);
            assert_eq!(row.samples[0].x, layout.left);
            assert_abs_diff_eq!(row.samples[2].x, layout.left + layout.width);
        }

        assert_matches!(
            wave.to_scene(&MountainLayout {
                rows: 6,
                ..MountainLayout::default()
            }),
            Err(Error::EmptyScene { .. })
        );
        assert_matches!(
            wave.to_scene(&MountainLayout {
                rows: 0,
                ..MountainLayout::default()
            }),
            Err(Error::EmptyScene { .. })
        );
    }
}
