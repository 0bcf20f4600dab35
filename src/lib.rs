//! Colorblind-friendly palettes and choropleth styling.
//!
//! The pipeline goes from a palette to region styles:
//!
//! - [`normalize`] turns [`ColorSpec`]s in mixed notations into [`Hex`]
//!   colors;
//! - [`ColorMapper`] maps population values onto those colors,
//!   linearly or through `ln(1 + x)`;
//! - [`RegionStyler`] produces a [`StyleDescriptor`] per [`Region`].
//!
//! [`PaletteChoice`] lists the palettes offered to users (Matplotlib's
//! [Turbo](PaletteChoice::Turbo), [Inferno](PaletteChoice::Inferno),
//! [Cividis](PaletteChoice::Cividis), [Magma](PaletteChoice::Magma)
//! and [Plasma](PaletteChoice::Plasma)).  Region data comes from a
//! [`RegionSource`].
//!
//! ```
//! use choropleth_brewery::*;
//! let hex = normalize(&["#000000".into(), "white".into()]).unwrap();
//! let range = ValueRange::new(100., 900.).unwrap();
//! let mapper = ColorMapper::build(&hex, range, false).unwrap();
//! let styler = RegionStyler::default();
//! let style = styler.style(&Region::new("A", Some(100.)), &mapper);
//! assert_eq!(style.fill_color.to_string(), "#000000");
//! assert_eq!(style.tooltip, "A: 100");
//! ```

use std::marker::PhantomData;

mod names;
pub mod error;
pub mod color;
pub mod palettes;
pub mod mapper;
pub mod style;
pub mod legend;
pub mod dataset;
pub mod layer;
pub mod table;
pub mod chart;
pub mod config;

pub use error::{Error, Result};
pub use color::{normalize, ColorSpec, Hex, Palette};
pub use palettes::{PaletteChoice, PaletteType, Trivalent};
pub use mapper::{ColorMapper, Fill, LinearGradient, ValueRange};
pub use style::{format_thousands, Region, RegionStyler, StyleConfig,
                StyleDescriptor};
pub use legend::Legend;
pub use dataset::{CsvProvinces, Province, RegionSource, SampleProvinces};
pub use layer::{Feature, MapLayer, Marker, MarkerLayer};
pub use config::{DashboardConfig, View};

/// Colors indexed by a position `t` in \[0, 1\].
pub trait ColorRange<Color> {
    /// Returns the color at `t` ∈ \[0., 1.\].
    fn rgb(&self, t: f64) -> Color;

    /// Samples `n` evenly spaced values from `a` to `b`, both ends
    /// included, each paired with its color.  `a` may exceed `b`.
    ///
    /// ```
    /// use choropleth_brewery::{ColorRange, Hex, LinearGradient};
    /// let g = LinearGradient::new(&[Hex::BLACK, Hex::WHITE]).unwrap();
    /// let samples: Vec<_> = g.range(0., 10., 3).collect();
    /// assert_eq!(samples[0], (0., Hex::BLACK));
    /// assert_eq!(samples[2], (10., Hex::WHITE));
    /// ```
    fn range(self, a: f64, b: f64, n: usize) -> Range<Self, Color>
    where Self: Sized {
        Range { colors: self, color: PhantomData,
                a: a.clamp(f64::MIN, f64::MAX), b: b.clamp(f64::MIN, f64::MAX),
                n, front: 0, back: n }
    }
}

impl<Color, R> ColorRange<Color> for &R
where R: ColorRange<Color> + ?Sized {
    #[inline]
    fn rgb(&self, t: f64) -> Color { R::rgb(*self, t) }
}

/// Samples of a [`ColorRange`], see [`ColorRange::range`].
pub struct Range<R, Color> {
    colors: R,
    color: PhantomData<Color>,
    a: f64,
    b: f64,
    n: usize,
    // Samples `front .. back` remain.
    front: usize,
    back: usize,
}

impl<R, Color> Range<R, Color> where R: ColorRange<Color> {
    fn sample(&self, k: usize) -> (f64, Color) {
        if k == 0 {
            return (self.a, self.colors.rgb(0.))
        }
        if k + 1 == self.n {
            return (self.b, self.colors.rgb(1.))
        }
        let t = k as f64 / (self.n - 1) as f64;
        let x = self.a + t * (self.b - self.a);
        let x = if x.is_finite() { x } else { (1. - t) * self.a + t * self.b };
        (x, self.colors.rgb(t))
    }
}

impl<R, Color> Iterator for Range<R, Color>
where R: ColorRange<Color> {
    type Item = (f64, Color);

    fn next(&mut self) -> Option<Self::Item> {
        if self.front == self.back { return None }
        let item = self.sample(self.front);
        self.front += 1;
        Some(item)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let len = self.back - self.front;
        (len, Some(len))
    }
}

impl<R, Color> ExactSizeIterator for Range<R, Color>
where R: ColorRange<Color> {}

impl<R, Color> DoubleEndedIterator for Range<R, Color>
where R: ColorRange<Color> {
    fn next_back(&mut self) -> Option<Self::Item> {
        if self.front == self.back { return None }
        self.back -= 1;
        Some(self.sample(self.back))
    }
}
