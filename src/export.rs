//! Writing polylines out as an SVG file for a plotter driver.
//!
//! Coordinates are given in physical units (centimeters, millimeters or
//! inches). In the SVG they get converted to CSS pixels at 35.43307 pixels per
//! centimeter, with the document's `width` and `height` carrying the physical
//! size, so that plotting software draws everything at its true size.

use std::str::FromStr;

use svg::{
    node::element::{Group, Path},
    Document,
};

use crate::{num::check_finite, polyline::Polyline, Error};

/// CSS pixels per centimeter (96 pixels per inch).
pub const PX_PER_CM: f64 = 35.43307;

/// The physical unit that page coordinates are measured in.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub enum Units {
    /// Centimeters.
    #[serde(rename = "cm")]
    Centimeters,
    /// Millimeters.
    #[serde(rename = "mm")]
    Millimeters,
    /// Inches.
    #[serde(rename = "in")]
    Inches,
    /// Screen pixels. These have no physical size, so they can't be exported.
    #[serde(rename = "px")]
    Pixels,
}

impl Units {
    /// How many centimeters one of these units is, if that makes sense.
    pub fn in_cm(self) -> Option<f64> {
        match self {
            Units::Centimeters => Some(1.0),
            Units::Millimeters => Some(0.1),
            Units::Inches => Some(2.54),
            Units::Pixels => None,
        }
    }

    /// The CSS suffix for this unit.
    pub fn suffix(self) -> &'static str {
        match self {
            Units::Centimeters => "cm",
            Units::Millimeters => "mm",
            Units::Inches => "in",
            Units::Pixels => "px",
        }
    }
}

impl FromStr for Units {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "cm" => Ok(Units::Centimeters),
            "mm" => Ok(Units::Millimeters),
            "in" => Ok(Units::Inches),
            "px" => Ok(Units::Pixels),
            _ => Err(Error::UnsupportedUnits(s.to_owned())),
        }
    }
}

/// The size of the page.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct PageSettings {
    /// Page width, in `units`.
    pub width: f64,
    /// Page height, in `units`.
    pub height: f64,
    /// The units of the page size and of every coordinate.
    pub units: Units,
}

impl PageSettings {
    /// A4 paper, in portrait orientation.
    pub fn a4() -> Self {
        PageSettings {
            width: 21.0,
            height: 29.7,
            units: Units::Centimeters,
        }
    }
}

impl Default for PageSettings {
    fn default() -> Self {
        PageSettings::a4()
    }
}

/// How the strokes look.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct ExportOptions {
    /// The pen width, in centimeters, regardless of the page units.
    pub stroke_width_cm: f64,
    /// The stroke color, as a CSS color.
    pub stroke: String,
    /// The number of decimal places to keep in coordinates.
    pub precision: i32,
}

impl Default for ExportOptions {
    fn default() -> Self {
        ExportOptions {
            stroke_width_cm: 0.03,
            stroke: "black".to_owned(),
            precision: 5,
        }
    }
}

fn round_to(x: f64, precision: i32) -> f64 {
    let scale = 10f64.powi(precision);
    (x * scale).round() / scale
}

/// Renders `polylines` as an SVG document, one `<path>` per polyline.
///
/// # Errors
///
/// Fails with [`Error::UnsupportedUnits`] if the page is measured in pixels,
/// and with [`Error::NaN`] or [`Error::Infinity`] on non-finite coordinates.
pub fn export_svg(
    polylines: &[Polyline],
    page: &PageSettings,
    options: &ExportOptions,
) -> Result<String, Error> {
    let cm = page
        .units
        .in_cm()
        .ok_or_else(|| Error::UnsupportedUnits(page.units.suffix().to_owned()))?;
    check_finite([page.width, page.height])?;
    check_finite(
        polylines
            .iter()
            .flat_map(|l| l.points())
            .flat_map(|p| [p.x, p.y]),
    )?;

    let px = |x: f64| round_to(x * cm * PX_PER_CM, options.precision);
    let stroke_width = round_to(options.stroke_width_cm * PX_PER_CM, options.precision);

    let mut group = Group::new()
        .set("fill", "none")
        .set("stroke", options.stroke.as_str())
        .set("stroke-width", stroke_width)
        .set("stroke-linecap", "round")
        .set("stroke-linejoin", "round");
    for line in polylines {
        let mut d = String::new();
        for (i, p) in line.points().iter().enumerate() {
            let cmd = if i == 0 { 'M' } else { 'L' };
            if i > 0 {
                d.push(' ');
            }
            d.push_str(&format!("{cmd}{} {}", px(p.x), px(p.y)));
        }
        group = group.add(Path::new().set("d", d));
    }

    let document = Document::new()
        .set("width", format!("{}{}", page.width, page.units.suffix()))
        .set("height", format!("{}{}", page.height, page.units.suffix()))
        .set(
            "viewBox",
            format!("0 0 {} {}", px(page.width), px(page.height)),
        )
        .add(group);

    log::debug!("exported {} polylines", polylines.len());
    Ok(document.to_string())
}
