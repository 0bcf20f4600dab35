//! Complete map layers: one style per region (choropleth) or per
//! located province (markers), plus a legend.

use serde::Serialize;
use tracing::info;

use crate::color::Hex;
use crate::dataset::Province;
use crate::error::{Error, Result};
use crate::legend::Legend;
use crate::mapper::{ColorMapper, ValueRange};
use crate::style::{Region, RegionStyler, StyleDescriptor};

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Feature {
    pub region: String,
    pub style: StyleDescriptor,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct MapLayer {
    pub features: Vec<Feature>,
    pub legend: Legend,
}

/// Mapper over the range of `populations`.
fn mapper_for<I>(populations: I, palette: &[Hex], log_scale: bool) -> Result<ColorMapper>
where I: IntoIterator<Item = f64> {
    let range = ValueRange::of(populations)
        .ok_or_else(|| Error::Dataset("no region has population data".into()))?;
    ColorMapper::build(palette, range, log_scale)
}

impl MapLayer {
    /// Color `regions` with `palette`, over the range of the regions'
    /// populations.
    ///
    /// Fails with [`Error::Dataset`] if no region has a population.
    pub fn build(regions: &[Region], palette: &[Hex], log_scale: bool,
                 styler: &RegionStyler, caption: impl Into<String>,
                 legend_stops: usize) -> Result<Self> {
        let mapper = mapper_for(regions.iter().filter_map(|r| r.population),
                                palette, log_scale)?;
        let features = regions.iter()
            .zip(styler.style_all(regions, &mapper))
            .map(|(r, style)| Feature { region: r.name.clone(), style })
            .collect();
        info!(regions = regions.len(), "built choropleth layer");
        Ok(MapLayer { features, legend: Legend::new(caption, &mapper, legend_stops) })
    }
}

/// A province drawn as a point at its centroid.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Marker {
    pub region: String,
    pub latitude: f64,
    pub longitude: f64,
    pub style: StyleDescriptor,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct MarkerLayer {
    pub markers: Vec<Marker>,
    pub legend: Legend,
}

impl MarkerLayer {
    /// One marker per province with both coordinates, colored over the
    /// range of those provinces' populations.  Provinces without
    /// coordinates are left out.
    ///
    /// Fails with [`Error::Dataset`] if no located province has a
    /// population.
    pub fn build(provinces: &[Province], palette: &[Hex], log_scale: bool,
                 styler: &RegionStyler, caption: impl Into<String>,
                 legend_stops: usize) -> Result<Self> {
        let located: Vec<(&Province, (f64, f64))> = provinces.iter()
            .filter_map(|p| p.location().map(|loc| (p, loc)))
            .collect();
        let mapper = mapper_for(located.iter().filter_map(|(p, _)| p.population),
                                palette, log_scale)?;
        let regions: Vec<Region> = located.iter().map(|(p, _)| p.region()).collect();
        let markers = located.iter()
            .zip(styler.style_all(&regions, &mapper))
            .map(|(&(p, (latitude, longitude)), style)| Marker {
                region: p.name.clone(), latitude, longitude, style,
            })
            .collect();
        info!(markers = located.len(), skipped = provinces.len() - located.len(),
              "built marker layer");
        Ok(MarkerLayer { markers, legend: Legend::new(caption, &mapper, legend_stops) })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::style::{StyleConfig, MARKER_FILL_OPACITY, NO_DATA_COLOR};

    fn province(name: &str, population: Option<f64>, loc: Option<(f64, f64)>) -> Province {
        Province { name: name.into(), population,
                   latitude: loc.map(|l| l.0), longitude: loc.map(|l| l.1) }
    }

    #[test]
    fn layer_of_three_regions() {
        let regions = [Region::new("A", Some(100.)), Region::new("B", None),
                       Region::new("C", Some(900.))];
        let layer = MapLayer::build(&regions, &[Hex::BLACK, Hex::WHITE], false,
                                    &RegionStyler::default(), "Population", 2)
            .unwrap();
        let fills: Vec<_> = layer.features.iter().map(|f| f.style.fill_color).collect();
        assert_eq!(fills, [Hex::BLACK, NO_DATA_COLOR, Hex::WHITE]);
        assert_eq!(layer.features[1].style.tooltip, "No Data");
        assert_eq!(layer.legend.stops.len(), 2);
        assert_eq!(layer.legend.stops[1].value, 900.);
    }

    #[test]
    fn layer_without_data() {
        let regions = [Region::new("B", None)];
        let r = MapLayer::build(&regions, &[Hex::BLACK], false,
                                &RegionStyler::default(), "", 2);
        assert!(matches!(r, Err(Error::Dataset(_))));
    }

    #[test]
    fn markers_at_province_centroids() {
        let provinces = [province("A", Some(100.), Some((45., -75.))),
                         province("B", Some(5000.), None),
                         province("C", Some(900.), Some((50., -100.))),
                         province("D", None, Some((60., -120.)))];
        let styler = RegionStyler::new(StyleConfig::markers()).unwrap();
        let layer = MarkerLayer::build(&provinces, &[Hex::BLACK, Hex::WHITE], false,
                                       &styler, "Population", 2).unwrap();
        let names: Vec<_> = layer.markers.iter().map(|m| m.region.as_str()).collect();
        assert_eq!(names, ["A", "C", "D"]);
        assert_eq!((layer.markers[1].latitude, layer.markers[1].longitude), (50., -100.));
        // B has no location, so C holds the maximum.
        assert_eq!(layer.markers[1].style.fill_color, Hex::WHITE);
        assert_eq!(layer.markers[2].style.fill_color, NO_DATA_COLOR);
        assert!(layer.markers.iter().all(|m| m.style.fill_opacity == MARKER_FILL_OPACITY));
        assert_eq!(layer.legend.stops[1].value, 900.);
    }

    #[test]
    fn markers_without_locations() {
        let provinces = [province("B", Some(5000.), None)];
        let r = MarkerLayer::build(&provinces, &[Hex::BLACK], false,
                                   &RegionStyler::default(), "", 2);
        assert!(matches!(r, Err(Error::Dataset(_))));
    }
}
