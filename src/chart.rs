//! Bar chart of population by province, rendered to SVG.

use anyhow::{Context, Result};
use plotters::prelude::*;

use crate::color::Hex;
use crate::dataset::Province;
use crate::style::format_thousands;

/// Fill of the bars (a muted blue).
pub const BAR_COLOR: Hex = Hex::new(0x4C, 0x72, 0xB0);

pub struct BarChartConfig {
    pub title: String,
    pub width: u32,
    pub height: u32,
    pub color: Hex,
}

impl Default for BarChartConfig {
    fn default() -> Self {
        BarChartConfig {
            title: "Population by Province".to_string(),
            width: 800,
            height: 600,
            color: BAR_COLOR,
        }
    }
}

/// Render one bar per province.  Provinces without population get
/// an empty slot.
pub fn render_bar_chart(provinces: &[Province], config: &BarChartConfig)
                        -> Result<String> {
    if provinces.is_empty() {
        anyhow::bail!("Cannot create a bar chart with no provinces");
    }
    let n = provinces.len();
    let names: Vec<&str> = provinces.iter().map(|p| p.name.as_str()).collect();
    let y_max = provinces.iter()
        .filter_map(|p| p.population)
        .fold(0., f64::max);
    let y_max = if y_max > 0. { y_max * 1.05 } else { 1. };

    let mut svg = String::new();
    {
        let root = SVGBackend::with_string(&mut svg, (config.width, config.height))
            .into_drawing_area();

        root.fill(&WHITE)
            .context("Failed to fill background")?;

        let mut chart = ChartBuilder::on(&root)
            .margin(10)
            .caption(&config.title, ("sans-serif", 20))
            .x_label_area_size(60)
            .y_label_area_size(90)
            .build_cartesian_2d(-0.5..(n as f64 - 0.5), 0f64..y_max)
            .context("Failed to build chart")?;

        chart
            .configure_mesh()
            .disable_x_mesh()
            .x_labels(n)
            .x_label_formatter(&|x: &f64| {
                let i = x.round();
                if (x - i).abs() < 1e-6 && i >= 0. && (i as usize) < n {
                    names[i as usize].to_string()
                } else {
                    String::new()
                }
            })
            .y_label_formatter(&|y: &f64| format_thousands(y.round()))
            .x_desc("Province")
            .y_desc("Population")
            .draw()
            .context("Failed to draw mesh")?;

        let c = config.color.rgb();
        let style = RGBColor(c.r, c.g, c.b).filled();
        chart
            .draw_series(provinces.iter().enumerate()
                .filter_map(|(i, p)| p.population.map(|v| (i as f64, v)))
                .map(|(x, v)| Rectangle::new([(x - 0.4, 0.), (x + 0.4, v)], style)))
            .context("Failed to draw bars")?;

        root.present()
            .context("Failed to finalize chart")?;
    }

    Ok(svg)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dataset::{RegionSource, SampleProvinces};

    #[test]
    fn sample_chart_is_svg() {
        let provinces = SampleProvinces.provinces().unwrap();
        let svg = render_bar_chart(&provinces, &BarChartConfig::default()).unwrap();
        assert!(svg.contains("<svg"));
        assert!(svg.contains("Population by Province"));
        assert!(svg.to_ascii_uppercase().contains("#4C72B0"));
    }

    #[test]
    fn empty_chart_is_an_error() {
        assert!(render_bar_chart(&[], &BarChartConfig::default()).is_err());
    }
}
