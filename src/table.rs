//! Plain-text table view of the dataset.

use crate::dataset::Province;
use crate::style::{format_thousands, NO_DATA_TOOLTIP};

/// Two columns, province and population; coordinates are left out.
pub fn render_table(provinces: &[Province]) -> String {
    let rows: Vec<(&str, String)> = provinces.iter()
        .map(|p| (p.name.as_str(),
                  p.population.map_or_else(|| NO_DATA_TOOLTIP.to_string(),
                                           format_thousands)))
        .collect();
    let w0 = rows.iter().map(|(n, _)| n.chars().count())
        .chain(Some("Province".len())).max().unwrap_or(0);
    let w1 = rows.iter().map(|(_, p)| p.len())
        .chain(Some("Population".len())).max().unwrap_or(0);
    let mut out = format!("{:<w0$}  {:>w1$}\n", "Province", "Population");
    out.push_str(&format!("{}  {}\n", "-".repeat(w0), "-".repeat(w1)));
    for (name, pop) in &rows {
        out.push_str(&format!("{name:<w0$}  {pop:>w1$}\n"));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dataset::{RegionSource, SampleProvinces};

    #[test]
    fn sample_table() {
        let t = render_table(&SampleProvinces.provinces().unwrap());
        let lines: Vec<_> = t.lines().collect();
        assert_eq!(lines.len(), 12);
        assert!(lines[0].starts_with("Province"));
        assert!(lines[0].ends_with("Population"));
        assert!(lines[2].starts_with("Ontario"));
        assert!(lines[2].ends_with("14,734,014"));
        assert!(!t.contains("Latitude"));
        // Columns line up.
        assert!(lines.iter().all(|l| l.len() == lines[0].len()));
    }

    #[test]
    fn missing_population() {
        let p = Province { name: "Nunavut".into(), population: None,
                           latitude: None, longitude: None };
        assert!(render_table(&[p]).contains("No Data"));
    }
}
