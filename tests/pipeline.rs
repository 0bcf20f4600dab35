use std::io::Write;

use choropleth_brewery::dataset::{self, CANADA_REGIONS};
use choropleth_brewery::*;

fn hex_strings(colors: &[Hex]) -> Vec<String> {
    colors.iter().map(|c| c.to_string()).collect()
}

#[test]
fn test_three_region_scenario() {
    let palette = normalize(&["#000000".into(), "#FFFFFF".into()]).unwrap();
    let mapper = ColorMapper::build(&palette, ValueRange::new(100., 900.).unwrap(), false)
        .unwrap();
    let regions = [Region::new("A", Some(100.)), Region::new("B", None),
                   Region::new("C", Some(900.))];
    let styles = RegionStyler::default().style_all(&regions, &mapper);

    assert_eq!(styles[0].fill_color.to_string(), "#000000");
    assert_eq!(styles[0].tooltip, "A: 100");
    assert_eq!(styles[1].fill_color, style::NO_DATA_COLOR);
    assert!(styles[1].no_data);
    assert_eq!(styles[1].tooltip, "No Data");
    assert_eq!(styles[2].fill_color.to_string(), "#FFFFFF");
    assert_eq!(styles[2].tooltip, "C: 900");
    for s in &styles {
        assert_eq!(s.border_color, Hex::BLACK);
        assert_eq!(s.border_weight, 1.);
    }
}

#[test]
fn test_invalid_palette_entry_aborts() {
    let specs: Vec<ColorSpec> = vec!["red".into(), (0u8, 0u8, 255u8).into(),
                                     "notacolor123".into()];
    let err = normalize(&specs).unwrap_err();
    let msg = err.to_string();
    assert!(msg.contains("position 2"), "{msg}");
    assert!(msg.contains("notacolor123"), "{msg}");
}

#[test]
fn test_normalization_is_idempotent() {
    for choice in PaletteChoice::ALL {
        let once = choice.hex().unwrap();
        let specs: Vec<ColorSpec> = once.iter().map(|&c| c.into()).collect();
        assert_eq!(normalize(&specs).unwrap(), once);
    }
}

#[test]
fn test_sample_map_with_every_palette() {
    let provinces = SampleProvinces.provinces().unwrap();
    let regions = dataset::join(&CANADA_REGIONS, &provinces).unwrap();
    for choice in PaletteChoice::ALL {
        let hex = choice.hex().unwrap();
        for log_scale in [false, true] {
            let layer = MapLayer::build(&regions, &hex, log_scale, &RegionStyler::default(),
                                        Legend::caption_for(choice), 5).unwrap();
            let ontario = &layer.features[0].style;
            let pei = &layer.features[9].style;
            assert_eq!(ontario.fill_color, *hex.last().unwrap());
            assert_eq!(pei.fill_color, hex[0]);
            assert_eq!(layer.features[10].style.tooltip, "No Data");
            assert_eq!(layer.legend.stops.len(), 5);
        }
    }
}

#[test]
fn test_log_scale_separates_small_provinces() {
    let provinces = SampleProvinces.provinces().unwrap();
    let range = dataset::population_range(&provinces).unwrap();
    let hex = [Hex::BLACK, Hex::WHITE];
    let lin = ColorMapper::build(&hex, range, false).unwrap();
    let log = ColorMapper::build(&hex, range, true).unwrap();
    // Nova Scotia and New Brunswick sit close together near the bottom.
    let gap = |m: &ColorMapper| m.position(969383.) - m.position(794300.);
    assert!(gap(&log) > gap(&lin));
}

#[test]
fn test_csv_source() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(file, "Province,Population,Latitude,Longitude").unwrap();
    writeln!(file, "Yukon,43964,64.28,-135.0").unwrap();
    writeln!(file, "Nunavut,,70.3,-83.1").unwrap();
    let provinces = CsvProvinces::new(file.path()).provinces().unwrap();
    assert_eq!(provinces.len(), 2);
    assert_eq!(provinces[0].population, Some(43964.));
    assert_eq!(provinces[1].population, None);
    assert_eq!(provinces[1].longitude, Some(-83.1));
}

#[test]
fn test_missing_csv_is_io_error() {
    let r = CsvProvinces::new("/nonexistent/provinces.csv").provinces();
    assert!(matches!(r, Err(Error::Io(_))));
}

#[test]
fn test_config_file() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    write!(file, r#"{{ "palette": "plasma", "log_scale": true }}"#).unwrap();
    let config = DashboardConfig::load(file.path()).unwrap();
    assert_eq!(config.palette, PaletteChoice::Plasma);
    assert!(config.log_scale);
    assert_eq!(hex_strings(&config.palette_hex().unwrap())[0], "#0D0887");
    assert_eq!(config.legend_caption(), "Population Density (Soft Contrast: For Accessibility)");
}
