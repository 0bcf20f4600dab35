//! Per-region style descriptors for a choropleth map layer.

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::color::Hex;
use crate::error::{Error, Result};
use crate::mapper::ColorMapper;

/// Region outlines.
pub const DEFAULT_BORDER_COLOR: Hex = Hex::BLACK;
pub const DEFAULT_BORDER_WEIGHT: f64 = 1.;
/// Fill opacity of the choropleth (map) view.
pub const MAP_FILL_OPACITY: f64 = 0.9;
/// Fill opacity of the marker view.
pub const MARKER_FILL_OPACITY: f64 = 0.7;
/// Fill of regions without data; gray is not part of any catalogued
/// palette.
pub const NO_DATA_COLOR: Hex = Hex::new(0x80, 0x80, 0x80);
/// Tooltip of regions without data.
pub const NO_DATA_TOOLTIP: &str = "No Data";

/// A named region and its population, if known.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Region {
    pub name: String,
    pub population: Option<f64>,
}

impl Region {
    pub fn new(name: impl Into<String>, population: Option<f64>) -> Self {
        Region { name: name.into(), population }
    }
}

/// Constants applied to every region.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct StyleConfig {
    pub border_color: Hex,
    pub border_weight: f64,
    pub fill_opacity: f64,
    pub no_data_color: Hex,
}

impl Default for StyleConfig {
    fn default() -> Self {
        StyleConfig {
            border_color: DEFAULT_BORDER_COLOR,
            border_weight: DEFAULT_BORDER_WEIGHT,
            fill_opacity: MAP_FILL_OPACITY,
            no_data_color: NO_DATA_COLOR,
        }
    }
}

impl StyleConfig {
    /// The marker view's settings.
    pub fn markers() -> Self {
        StyleConfig { fill_opacity: MARKER_FILL_OPACITY, ..Self::default() }
    }

    pub fn validate(&self) -> Result<()> {
        if !(self.border_weight > 0.) || !self.border_weight.is_finite() {
            return Err(Error::InvalidStyle(
                format!("border weight must be positive, got {}", self.border_weight)))
        }
        if !(0. ..=1.).contains(&self.fill_opacity) {
            return Err(Error::InvalidStyle(
                format!("fill opacity must be in [0, 1], got {}", self.fill_opacity)))
        }
        Ok(())
    }
}

/// How a renderer should draw one region.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StyleDescriptor {
    pub fill_color: Hex,
    pub border_color: Hex,
    pub border_weight: f64,
    pub fill_opacity: f64,
    pub tooltip: String,
    /// Whether `fill_color` is the no-data color.
    #[serde(skip)]
    pub no_data: bool,
}

/// Builds [`StyleDescriptor`]s from a validated [`StyleConfig`].
#[derive(Clone, Debug, Default)]
pub struct RegionStyler {
    config: StyleConfig,
}

impl RegionStyler {
    pub fn new(config: StyleConfig) -> Result<Self> {
        config.validate()?;
        Ok(RegionStyler { config })
    }

    pub fn config(&self) -> &StyleConfig { &self.config }

    /// Style of `region` colored by `mapper`.
    ///
    /// ```
    /// use choropleth_brewery::{ColorMapper, Hex, Region, RegionStyler, ValueRange};
    /// let range = ValueRange::new(0., 1e7).unwrap();
    /// let mapper = ColorMapper::build(&[Hex::BLACK, Hex::WHITE], range, false).unwrap();
    /// let style = RegionStyler::default().style(&Region::new("Ontario", Some(1e7)), &mapper);
    /// assert_eq!(style.tooltip, "Ontario: 10,000,000");
    /// assert_eq!(style.fill_color, Hex::WHITE);
    /// ```
    pub fn style(&self, region: &Region, mapper: &ColorMapper) -> StyleDescriptor {
        let fill = mapper.color_for(region.population);
        let tooltip = match region.population {
            Some(p) if !p.is_nan() => format!("{}: {}", region.name, format_thousands(p)),
            _ => NO_DATA_TOOLTIP.to_string(),
        };
        StyleDescriptor {
            fill_color: fill.or(self.config.no_data_color),
            border_color: self.config.border_color,
            border_weight: self.config.border_weight,
            fill_opacity: self.config.fill_opacity,
            tooltip,
            no_data: fill.is_no_data(),
        }
    }

    /// Styles of all `regions`, in order.
    pub fn style_all(&self, regions: &[Region], mapper: &ColorMapper)
                     -> Vec<StyleDescriptor> {
        let styles: Vec<_> = regions.iter().map(|r| self.style(r, mapper)).collect();
        let missing = styles.iter().filter(|s| s.no_data).count();
        if missing > 0 {
            warn!(missing, total = regions.len(), "regions without data");
        }
        styles
    }
}

/// Format `x` with `,` between groups of three integer digits.  A
/// fractional part, if any, is kept as `Display` prints it.
///
/// ```
/// use choropleth_brewery::format_thousands;
/// assert_eq!(format_thousands(14734014.), "14,734,014");
/// assert_eq!(format_thousands(-1234.5), "-1,234.5");
/// ```
pub fn format_thousands(x: f64) -> String {
    if !x.is_finite() {
        return x.to_string()
    }
    let s = x.abs().to_string();
    let (int, frac) = match s.split_once('.') {
        Some((i, f)) => (i, Some(f)),
        None => (s.as_str(), None),
    };
    let mut out = String::with_capacity(s.len() + int.len() / 3 + 1);
    if x < 0. { out.push('-') }
    for (i, d) in int.chars().enumerate() {
        if i > 0 && (int.len() - i) % 3 == 0 { out.push(',') }
        out.push(d);
    }
    if let Some(f) = frac {
        out.push('.');
        out.push_str(f);
    }
    out
}
