//! Mapping of numeric values to palette colors.

use rgb::RGB;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::color::Hex;
use crate::error::{Error, Result};
use crate::ColorRange;

/// A closed interval `[min, max]` of finite reals.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "(f64, f64)", into = "(f64, f64)")]
pub struct ValueRange {
    min: f64,
    max: f64,
}

impl ValueRange {
    pub fn new(min: f64, max: f64) -> Result<Self> {
        if !min.is_finite() || !max.is_finite() || min > max {
            return Err(Error::InvalidRange { min, max })
        }
        Ok(ValueRange { min, max })
    }

    /// The smallest range containing all finite `values`, or `None`
    /// if there are none.
    pub fn of<I>(values: I) -> Option<Self>
    where I: IntoIterator<Item = f64> {
        values.into_iter()
            .filter(|x| x.is_finite())
            .fold(None, |r, x| match r {
                None => Some(ValueRange { min: x, max: x }),
                Some(ValueRange { min, max }) =>
                    Some(ValueRange { min: min.min(x), max: max.max(x) }),
            })
    }

    #[inline]
    pub fn min(&self) -> f64 { self.min }

    #[inline]
    pub fn max(&self) -> f64 { self.max }

    pub fn is_degenerate(&self) -> bool { self.min == self.max }

    #[inline]
    fn clamp(&self, x: f64) -> f64 { x.clamp(self.min, self.max) }
}

impl TryFrom<(f64, f64)> for ValueRange {
    type Error = Error;

    fn try_from((min, max): (f64, f64)) -> Result<Self> { ValueRange::new(min, max) }
}

impl From<ValueRange> for (f64, f64) {
    fn from(r: ValueRange) -> Self { (r.min, r.max) }
}

/// Piecewise linear interpolation in RGB space between equally
/// spaced color stops.
#[derive(Clone, Debug)]
pub struct LinearGradient {
    stops: Vec<Hex>, // Invariant: non-empty
}

impl LinearGradient {
    pub fn new(stops: &[Hex]) -> Result<Self> {
        if stops.is_empty() {
            return Err(Error::EmptyPalette)
        }
        Ok(LinearGradient { stops: stops.to_vec() })
    }

    pub fn stops(&self) -> &[Hex] { &self.stops }
}

fn to_f64(c: Hex) -> RGB<f64> {
    let c = c.rgb();
    RGB { r: c.r as f64, g: c.g as f64, b: c.b as f64 }
}

/// Byte of a channel in \[0, 255\].  Integer inputs map to
/// themselves; anything in between is truncated.
#[inline]
fn to_byte(x: f64) -> u8 { (x / 255. * 255.9999) as u8 }

fn mix(c0: Hex, c1: Hex, p: f64) -> Hex {
    let (c0, c1) = (to_f64(c0), to_f64(c1));
    let lerp = |a: f64, b: f64| to_byte((1. - p) * a + p * b);
    Hex::new(lerp(c0.r, c1.r), lerp(c0.g, c1.g), lerp(c0.b, c1.b))
}

impl ColorRange<Hex> for LinearGradient {
    /// Returns the color at `t` ∈ \[0, 1\]; `t` outside that interval
    /// is clamped.
    fn rgb(&self, t: f64) -> Hex {
        let n = self.stops.len();
        if n == 1 { return self.stops[0] }
        let tn = t.clamp(0., 1.) * (n - 1) as f64;
        let i = tn.trunc() as usize;
        if i >= n - 1 { self.stops[n - 1] }
        else { mix(self.stops[i], self.stops[i + 1], tn.fract()) }
    }
}

/// The color a value maps to.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Fill {
    Color(Hex),
    /// No value to map.  Never produced for an actual number.
    NoData,
}

impl Fill {
    /// The color, with `no_data` standing in for [`Fill::NoData`].
    pub fn or(self, no_data: Hex) -> Hex {
        match self {
            Fill::Color(c) => c,
            Fill::NoData => no_data,
        }
    }

    pub fn is_no_data(&self) -> bool { matches!(self, Fill::NoData) }
}

/// Maps values of a [`ValueRange`] onto a [`LinearGradient`],
/// optionally through the transform `x ↦ ln(1 + x)`.
///
/// ```
/// use choropleth_brewery::{ColorMapper, Fill, Hex, ValueRange};
/// let range = ValueRange::new(0., 100.).unwrap();
/// let m = ColorMapper::build(&[Hex::BLACK, Hex::WHITE], range, false).unwrap();
/// assert_eq!(m.color_for(Some(100.)), Fill::Color(Hex::WHITE));
/// assert_eq!(m.color_for(None), Fill::NoData);
/// ```
#[derive(Clone, Debug)]
pub struct ColorMapper {
    gradient: LinearGradient,
    range: ValueRange,
    log_scale: bool,
    lo: f64, // transformed `range.min`
    hi: f64, // transformed `range.max`
}

impl ColorMapper {
    /// Build a mapper for `range` whose stops are `palette`, spread
    /// evenly from `range.min()` to `range.max()`.
    ///
    /// With `log_scale`, both bounds must exceed -1, otherwise
    /// [`Error::Domain`] is returned.
    pub fn build(palette: &[Hex], range: ValueRange, log_scale: bool)
                 -> Result<Self> {
        let gradient = LinearGradient::new(palette)?;
        if log_scale && range.min <= -1. {
            return Err(Error::Domain { value: range.min })
        }
        let transform = |x: f64| if log_scale { x.ln_1p() } else { x };
        let (lo, hi) = (transform(range.min), transform(range.max));
        debug!(stops = palette.len(), min = range.min, max = range.max,
               log_scale, "built color mapper");
        Ok(ColorMapper { gradient, range, log_scale, lo, hi })
    }

    pub fn value_range(&self) -> ValueRange { self.range }

    pub fn log_scale(&self) -> bool { self.log_scale }

    pub fn stops(&self) -> &[Hex] { self.gradient.stops() }

    /// Position of `value` in \[0, 1\] along the gradient.  Values
    /// outside the range are clamped; a degenerate range puts every
    /// value at 0.
    pub fn position(&self, value: f64) -> f64 {
        let v = self.range.clamp(value);
        let v = if self.log_scale { v.ln_1p() } else { v };
        if self.hi == self.lo { return 0. }
        let span = self.hi - self.lo;
        let t = if span.is_finite() {
            (v - self.lo) / span
        } else {
            // The span overflows; halve everything.
            (v / 2. - self.lo / 2.) / (self.hi / 2. - self.lo / 2.)
        };
        t.clamp(0., 1.)
    }

    /// The color of `value`.  An absent (or NaN) value yields
    /// [`Fill::NoData`] whatever the configuration.
    pub fn color_for(&self, value: Option<f64>) -> Fill {
        match value {
            Some(v) if !v.is_nan() => Fill::Color(self.gradient.rgb(self.position(v))),
            _ => Fill::NoData,
        }
    }
}

impl ColorRange<Hex> for ColorMapper {
    /// Color of the value at fraction `t` of the raw range, so that
    /// [`ColorRange::range`] over `min..=max` samples actual values.
    fn rgb(&self, t: f64) -> Hex {
        let ValueRange { min, max } = self.range;
        let v = min + t.clamp(0., 1.) * (max - min);
        self.gradient.rgb(self.position(v))
    }
}
