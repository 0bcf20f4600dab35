//! Color legend accompanying a choropleth.

use serde::Serialize;

use crate::color::Hex;
use crate::mapper::ColorMapper;
use crate::palettes::PaletteChoice;
use crate::ColorRange;

/// A caption and colors sampled at evenly spaced values.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Legend {
    pub caption: String,
    pub stops: Vec<LegendStop>,
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct LegendStop {
    pub value: f64,
    pub color: Hex,
}

impl Legend {
    /// Sample `n` values from the mapper's minimum to its maximum.
    pub fn new(caption: impl Into<String>, mapper: &ColorMapper, n: usize) -> Self {
        let range = mapper.value_range();
        let stops = ColorRange::range(mapper, range.min(), range.max(), n)
            .map(|(value, color)| LegendStop { value, color })
            .collect();
        Legend { caption: caption.into(), stops }
    }

    /// Caption naming the palette in use.
    pub fn caption_for(palette: PaletteChoice) -> String {
        format!("Population Density ({})", palette.label())
    }
}
