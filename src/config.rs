//! Dashboard settings, read from JSON.
//!
//! ```json
//! {
//!   "palette": "cividis",
//!   "view": "map",
//!   "log_scale": true,
//!   "style": { "fillOpacity": 0.7, "noDataColor": "lightgray" },
//!   "marker_style": { "borderWeight": 2 }
//! }
//! ```
//!
//! Every field is optional.

use std::fs;
use std::path::Path;
use serde::Deserialize;

use crate::color::{Hex, Palette};
use crate::error::Result;
use crate::legend::Legend;
use crate::palettes::PaletteChoice;
use crate::style::StyleConfig;

/// What to render.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum View {
    #[default]
    Map,
    /// Provinces as points at their centroids.
    Markers,
    BarChart,
    Table,
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct DashboardConfig {
    pub palette: PaletteChoice,
    /// Stops used instead of `palette` when present.
    pub custom_palette: Option<Palette>,
    pub view: View,
    pub log_scale: bool,
    pub style: StyleConfig,
    /// Style of the marker view.  Fields left out take the map
    /// defaults, except that an absent `marker_style` uses
    /// [`StyleConfig::markers`].
    pub marker_style: StyleConfig,
    pub legend_stops: usize,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        DashboardConfig {
            palette: PaletteChoice::default(),
            custom_palette: None,
            view: View::default(),
            log_scale: false,
            style: StyleConfig::default(),
            marker_style: StyleConfig::markers(),
            legend_stops: 6,
        }
    }
}

impl DashboardConfig {
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        Self::from_json(&fs::read_to_string(path)?)
    }

    pub fn from_json(json: &str) -> Result<Self> {
        let config: DashboardConfig = serde_json::from_str(json)?;
        config.style.validate()?;
        config.marker_style.validate()?;
        Ok(config)
    }

    /// The normalized palette in effect.
    pub fn palette_hex(&self) -> Result<Vec<Hex>> {
        match &self.custom_palette {
            Some(p) => p.normalize(),
            None => self.palette.hex(),
        }
    }

    pub fn legend_caption(&self) -> String {
        match self.custom_palette {
            Some(_) => "Population Density (custom)".to_string(),
            None => Legend::caption_for(self.palette),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;

    #[test]
    fn empty_object_gives_defaults() {
        let c = DashboardConfig::from_json("{}").unwrap();
        assert_eq!(c, DashboardConfig::default());
        assert_eq!(c.style.fill_opacity, crate::style::MAP_FILL_OPACITY);
        assert_eq!(c.marker_style.fill_opacity, crate::style::MARKER_FILL_OPACITY);
    }

    #[test]
    fn full_config() {
        let c = DashboardConfig::from_json(r#"{
            "palette": "cividis",
            "view": "bar_chart",
            "log_scale": true,
            "style": { "fillOpacity": 0.7, "noDataColor": "lightgray" },
            "legend_stops": 3
        }"#).unwrap();
        assert_eq!(c.palette, PaletteChoice::Cividis);
        assert_eq!(c.view, View::BarChart);
        assert!(c.log_scale);
        assert_eq!(c.style.no_data_color, Hex::new(0xD3, 0xD3, 0xD3));
        assert_eq!(c.style.border_weight, 1.);
        assert_eq!(c.legend_stops, 3);
    }

    #[test]
    fn markers_view() {
        let c = DashboardConfig::from_json(
            r#"{ "view": "markers", "marker_style": { "fillOpacity": 0.5 } }"#).unwrap();
        assert_eq!(c.view, View::Markers);
        assert_eq!(c.marker_style.fill_opacity, 0.5);
        assert!(matches!(DashboardConfig::from_json(
            r#"{ "marker_style": { "borderWeight": -1 } }"#), Err(Error::InvalidStyle(_))));
    }

    #[test]
    fn custom_palette_wins() {
        let c = DashboardConfig::from_json(
            r##"{ "custom_palette": ["#000000", [255, 255, 255]] }"##).unwrap();
        assert_eq!(c.palette_hex().unwrap(), [Hex::BLACK, Hex::WHITE]);
        assert_eq!(c.legend_caption(), "Population Density (custom)");
    }

    #[test]
    fn invalid_settings_are_rejected() {
        assert!(matches!(DashboardConfig::from_json(r#"{ "style": { "fillOpacity": 2 } }"#),
                         Err(Error::InvalidStyle(_))));
        assert!(matches!(DashboardConfig::from_json(r#"{ "palette": "rainbow" }"#),
                         Err(Error::Json(_))));
        assert!(matches!(DashboardConfig::from_json(r#"{ "custom_palette": [] }"#),
                         Err(Error::Json(_))));
    }
}
