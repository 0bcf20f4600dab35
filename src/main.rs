use std::fs;
use std::io::{self, Write};
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use choropleth_brewery::chart::{self, BarChartConfig};
use choropleth_brewery::dataset::{self, CANADA_REGIONS};
use choropleth_brewery::{table, CsvProvinces, DashboardConfig, MapLayer, MarkerLayer,
                         PaletteChoice, Province, RegionSource, RegionStyler,
                         SampleProvinces, Trivalent, View};

#[derive(Parser, Debug)]
#[command(name = "choropleth")]
#[command(about = "Population by province as a map layer, bar chart or table", long_about = None)]
struct Args {
    #[arg(short = 'c', long = "config", help = "JSON settings file")]
    config: Option<PathBuf>,

    #[arg(short = 'p', long = "palette", help = "Palette (turbo, inferno, cividis, magma, plasma)")]
    palette: Option<String>,

    #[arg(long = "log-scale", help = "Color populations on a log(1 + x) scale")]
    log_scale: bool,

    #[arg(short = 'd', long = "data", help = "CSV with Province,Population columns (defaults to the built-in sample)")]
    data: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// List the available palettes
    Palettes {
        #[arg(long = "colorblind-safe", help = "Only palettes safe for colorblind viewers")]
        colorblind_safe: bool,
    },
    /// Print the choropleth layer (styles and legend) as JSON
    Map {
        #[arg(long = "region", help = "Boundary names to style (defaults to Canada's provinces and territories)")]
        regions: Vec<String>,
        #[arg(long = "markers", conflicts_with = "regions", help = "Style provinces as markers at their centroids instead")]
        markers: bool,
    },
    /// Render the population bar chart as SVG
    Bar {
        #[arg(short = 'o', long = "output", help = "Write to this file instead of stdout")]
        output: Option<PathBuf>,
        #[arg(long = "width", default_value = "800", help = "Output width in pixels")]
        width: u32,
        #[arg(long = "height", default_value = "600", help = "Output height in pixels")]
        height: u32,
    },
    /// Print the population table
    Table,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .init();

    let args = Args::parse();

    let mut config = match &args.config {
        Some(path) => DashboardConfig::load(path)
            .with_context(|| format!("Failed to load config {}", path.display()))?,
        None => DashboardConfig::default(),
    };
    if let Some(p) = &args.palette {
        config.palette = p.parse().context("Failed to select palette")?;
        config.custom_palette = None;
    }
    config.log_scale |= args.log_scale;

    let command = args.command.unwrap_or_else(|| match config.view {
        View::Map => Command::Map { regions: Vec::new(), markers: false },
        View::Markers => Command::Map { regions: Vec::new(), markers: true },
        View::BarChart => {
            let BarChartConfig { width, height, .. } = BarChartConfig::default();
            Command::Bar { output: None, width, height }
        }
        View::Table => Command::Table,
    });

    let load = || load_provinces(args.data.as_ref()).context("Failed to load provinces");

    let output: String = match command {
        Command::Palettes { colorblind_safe } => {
            let wanted = if colorblind_safe { Trivalent::Yes } else { Trivalent::No };
            PaletteChoice::find(wanted)
                .map(|p| format!("{:<8}  {}\n", p.key(), p.label()))
                .collect()
        }
        Command::Map { regions, markers } => {
            let provinces = load()?;
            let palette = config.palette_hex().context("Failed to normalize palette")?;
            let mut json = if markers {
                let styler = RegionStyler::new(config.marker_style.clone())?;
                let layer = MarkerLayer::build(&provinces, &palette, config.log_scale, &styler,
                                               config.legend_caption(), config.legend_stops)
                    .context("Failed to build marker layer")?;
                serde_json::to_string_pretty(&layer)?
            } else {
                let regions = if regions.is_empty() {
                    dataset::join(&CANADA_REGIONS, &provinces)
                } else {
                    dataset::join(&regions, &provinces)
                };
                let regions = regions.context("Failed to match regions")?;
                let styler = RegionStyler::new(config.style.clone())?;
                let layer = MapLayer::build(&regions, &palette, config.log_scale, &styler,
                                            config.legend_caption(), config.legend_stops)
                    .context("Failed to build map layer")?;
                serde_json::to_string_pretty(&layer)?
            };
            json.push('\n');
            json
        }
        Command::Bar { output, width, height } => {
            let provinces = load()?;
            let chart_config = BarChartConfig { width, height, ..BarChartConfig::default() };
            let svg = chart::render_bar_chart(&provinces, &chart_config)
                .context("Failed to generate chart")?;
            if let Some(path) = output {
                fs::write(&path, svg)
                    .with_context(|| format!("Failed to write {}", path.display()))?;
                return Ok(())
            }
            svg
        }
        Command::Table => table::render_table(&load()?),
    };

    let stdout = io::stdout();
    let mut handle = stdout.lock();
    handle
        .write_all(output.as_bytes())
        .context("Failed to write output to stdout")?;
    handle.flush().context("Failed to flush stdout")?;

    Ok(())
}

fn load_provinces(path: Option<&PathBuf>) -> choropleth_brewery::Result<Vec<Province>> {
    match path {
        Some(path) => CsvProvinces::new(path).provinces(),
        None => SampleProvinces.provinces(),
    }
}
