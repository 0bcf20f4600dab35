use std::{env,
          io::{BufWriter, Write},
          fs::File,
          error::Error};
use choropleth_brewery::dataset::{self, CANADA_REGIONS};
use choropleth_brewery::{ColorMapper, ColorRange, Hex, Legend, LinearGradient,
                         MapLayer, PaletteChoice, RegionSource, RegionStyler,
                         SampleProvinces};

type Err = Box<dyn Error>;

/// Luminance, to preview how a palette survives grayscale printing.
fn to_gray(c: Hex) -> Hex {
    let c = c.rgb();
    let x = 0.299 * c.r as f64 + 0.587 * c.g as f64 + 0.114 * c.b as f64;
    let x = x.round() as u8;
    Hex::new(x, x, x)
}

fn table_of_colors(fh: &mut impl Write, colors: &[Hex],
                   width: u32, comment: &str) -> Result<(), Err> {
    writeln!(fh, "<table style=\"border: 0px;  border-spacing: 0px\"><tr>")?;
    for &c in colors {
        writeln!(fh, "  <td style=\"width: {width}px; height: 30px; \
                      background-color: {c}\"></td>")?;
    }
    writeln!(fh, "<td rowspan=\"2\" style=\"padding-left: 7px\">\
                  {comment}</td></tr><tr>")?;
    for &c in colors {
        writeln!(fh, "  <td style=\"width: {width}px; height: 12px; \
                      background-color: {}\"></td>", to_gray(c))?;
    }
    writeln!(fh, "</tr></table><br/>")?;
    Ok(())
}

fn palette(fh: &mut impl Write, p: PaletteChoice, n: usize,
           width: u32) -> Result<(), Err> {
    let hex = p.hex()?;
    table_of_colors(fh, &hex, 40, &format!("{} ({} colors)", p.key(), hex.len()))?;
    let g = LinearGradient::new(&hex)?;
    let colors: Vec<_> = g.range(0., 1., n).map(|(_, c)| c).collect();
    table_of_colors(fh, &colors, width, &format!("{} (interpolated)", p.label()))
}

fn legend(fh: &mut impl Write, legend: &Legend) -> Result<(), Err> {
    let colors: Vec<_> = legend.stops.iter().map(|s| s.color).collect();
    let values: Vec<_> = legend.stops.iter()
        .map(|s| choropleth_brewery::format_thousands(s.value.round()))
        .collect();
    table_of_colors(fh, &colors, 90, &format!("{}<br/>{}", legend.caption,
                                              values.join(" · ")))
}

fn main() -> Result<(), Err> {
    let mut fh = BufWriter::new(File::create("legend.html")?);
    writeln!(fh, "<html>\n\
                  <head>\n\
                  <title>Choropleth brewery: test {}</title>\n\
                  </head>\n\
                  <body>",
             env::args().next().unwrap_or_default())?;

    writeln!(fh, "<h3>Palettes</h3>")?;
    for p in PaletteChoice::ALL {
        palette(&mut fh, p, 128, 3)?;
    }

    let provinces = SampleProvinces.provinces()?;
    let range = dataset::population_range(&provinces).ok_or("no population data")?;
    for log_scale in [false, true] {
        writeln!(fh, "<h3>Legends ({} scale)</h3>",
                 if log_scale { "log" } else { "linear" })?;
        for p in PaletteChoice::ALL {
            let mapper = ColorMapper::build(&p.hex()?, range, log_scale)?;
            legend(&mut fh, &Legend::new(Legend::caption_for(p), &mapper, 8))?;
        }
    }

    writeln!(fh, "<h3>Provinces (cividis, log scale)</h3>")?;
    let regions = dataset::join(&CANADA_REGIONS, &provinces)?;
    let layer = MapLayer::build(&regions, &PaletteChoice::Cividis.hex()?, true,
                                &RegionStyler::default(), "", 2)?;
    for f in &layer.features {
        table_of_colors(&mut fh, &[f.style.fill_color], 40, &f.style.tooltip)?;
    }

    writeln!(fh, "</body>\n\
                  </html>")?;
    Ok(())
}
