//! Population data per province.
//!
//! The styling code never loads data itself; callers pick a
//! [`RegionSource`] and hand its provinces down.

use std::collections::HashSet;
use std::fs::File;
use std::io;
use std::path::PathBuf;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::error::{Error, Result};
use crate::mapper::ValueRange;
use crate::style::Region;

/// One row of the dataset.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Province {
    #[serde(rename = "Province")]
    pub name: String,
    #[serde(rename = "Population")]
    pub population: Option<f64>,
    #[serde(rename = "Latitude", default)]
    pub latitude: Option<f64>,
    #[serde(rename = "Longitude", default)]
    pub longitude: Option<f64>,
}

impl Province {
    pub fn region(&self) -> Region {
        Region::new(self.name.clone(), self.population)
    }

    /// `(latitude, longitude)` when both are known.
    pub fn location(&self) -> Option<(f64, f64)> {
        Some((self.latitude?, self.longitude?))
    }
}

/// Supplier of the dataset.
pub trait RegionSource {
    fn provinces(&self) -> Result<Vec<Province>>;
}

/// Boundary names of the Canadian provinces and territories, as a
/// map layer knows them.  Territories have no population in
/// [`SampleProvinces`].
pub const CANADA_REGIONS: [&str; 13] = [
    "Ontario", "Quebec", "British Columbia", "Alberta", "Manitoba",
    "Saskatchewan", "Nova Scotia", "New Brunswick",
    "Newfoundland and Labrador", "Prince Edward Island", "Yukon",
    "Northwest Territories", "Nunavut",
];

/// The built-in sample: ten provinces with population and centroid.
#[derive(Clone, Copy, Debug, Default)]
pub struct SampleProvinces;

const SAMPLE: [(&str, f64, f64, f64); 10] = [
    ("Ontario", 14734014., 50.0, -85.0),
    ("Quebec", 8574571., 52.0, -71.0),
    ("British Columbia", 5241058., 53.7267, -127.6476),
    ("Alberta", 4666101., 53.9333, -116.5765),
    ("Manitoba", 1386335., 49.8951, -97.1384),
    ("Saskatchewan", 1178681., 52.9399, -106.4509),
    ("Nova Scotia", 969383., 44.6819, -63.7443),
    ("New Brunswick", 794300., 46.5653, -66.4619),
    ("Newfoundland and Labrador", 510550., 53.1355, -57.6604),
    ("Prince Edward Island", 167680., 46.5107, -63.4168),
];

impl RegionSource for SampleProvinces {
    fn provinces(&self) -> Result<Vec<Province>> {
        Ok(SAMPLE.iter()
           .map(|&(name, population, latitude, longitude)| Province {
               name: name.to_string(),
               population: Some(population),
               latitude: Some(latitude),
               longitude: Some(longitude),
           })
           .collect())
    }
}

/// Provinces read from a CSV file with a header row
/// `Province,Population[,Latitude,Longitude]`.
#[derive(Clone, Debug)]
pub struct CsvProvinces {
    path: PathBuf,
}

impl CsvProvinces {
    pub fn new(path: impl Into<PathBuf>) -> Self { CsvProvinces { path: path.into() } }
}

impl RegionSource for CsvProvinces {
    fn provinces(&self) -> Result<Vec<Province>> {
        debug!(path = %self.path.display(), "reading provinces");
        read_provinces(File::open(&self.path)?)
    }
}

/// Read provinces from CSV.  Header names are matched ignoring case
/// (`name` is accepted for `Province`).  Empty population cells are
/// absent values; malformed rows and duplicate names are rejected.
pub fn read_provinces<R: io::Read>(rdr: R) -> Result<Vec<Province>> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::All)
        .from_reader(rdr);
    let headers: csv::StringRecord = reader.headers()?
        .iter()
        .map(canonical_header)
        .collect();
    reader.set_headers(headers);
    let mut provinces = Vec::new();
    for (i, record) in reader.deserialize().enumerate() {
        let p: Province = record
            .map_err(|e| Error::Dataset(format!("row {}: {e}", i + 1)))?;
        provinces.push(p);
    }
    if provinces.is_empty() {
        return Err(Error::Dataset("CSV must contain at least one data row".into()))
    }
    check_unique(provinces.iter().map(|p| p.name.as_str()), "province")?;
    Ok(provinces)
}

fn canonical_header(h: &str) -> &str {
    match h.to_ascii_lowercase().as_str() {
        "province" | "name" => "Province",
        "population" => "Population",
        "latitude" => "Latitude",
        "longitude" => "Longitude",
        _ => h,
    }
}

fn check_unique<'a>(names: impl IntoIterator<Item = &'a str>, what: &str) -> Result<()> {
    let mut seen = HashSet::new();
    for name in names {
        if !seen.insert(name) {
            return Err(Error::Dataset(format!("duplicate {what} {name:?}")))
        }
    }
    Ok(())
}

/// Regions of the provinces, in order.
pub fn regions(provinces: &[Province]) -> Vec<Region> {
    provinces.iter().map(Province::region).collect()
}

/// One region per boundary name, joined with the provinces by name.
/// Names without a matching province get no population.  Boundary
/// names must be unique.
pub fn join<S: AsRef<str>>(boundaries: &[S], provinces: &[Province]) -> Result<Vec<Region>> {
    check_unique(boundaries.iter().map(|b| b.as_ref()), "boundary")?;
    check_unique(provinces.iter().map(|p| p.name.as_str()), "province")?;
    let regions: Vec<_> = boundaries.iter()
        .map(|b| {
            let name = b.as_ref();
            let population = provinces.iter()
                .find(|p| p.name == name)
                .and_then(|p| p.population);
            Region::new(name, population)
        })
        .collect();
    let unmatched = provinces.iter()
        .filter(|p| !boundaries.iter().any(|b| b.as_ref() == p.name))
        .count();
    if unmatched > 0 {
        warn!(unmatched, "provinces without a boundary");
    }
    Ok(regions)
}

/// Range of the known populations.
pub fn population_range(provinces: &[Province]) -> Option<ValueRange> {
    ValueRange::of(provinces.iter().filter_map(|p| p.population))
}
