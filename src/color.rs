//! Color specifications and their normalization to `#RRGGBB`.
//!
//! Palettes found in the wild mix several notations: RGB triples,
//! hex strings, CSS `rgb(r, g, b)` strings and color names.
//! [`normalize`] turns such a list into uniform [`Hex`] colors,
//! keeping order and length, or fails on the first entry it cannot
//! interpret.

use std::fmt;
use std::str::FromStr;
use lazy_static::lazy_static;
use regex::Regex;
use rgb::RGB8;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use tracing::debug;

use crate::error::{Error, Result};
use crate::names;

/// A normalized color, displayed as uppercase `#RRGGBB`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Hex(RGB8);

impl Hex {
    pub const BLACK: Hex = Hex::new(0, 0, 0);
    pub const WHITE: Hex = Hex::new(255, 255, 255);

    #[inline]
    pub const fn new(r: u8, g: u8, b: u8) -> Self { Hex(RGB8 { r, g, b }) }

    /// The red, green and blue components.
    #[inline]
    pub fn rgb(&self) -> RGB8 { self.0 }

    /// Parse a single color in any of the notations accepted by
    /// [`normalize`].
    ///
    /// ```
    /// use choropleth_brewery::Hex;
    /// let c = Hex::parse("rgb(255, 128, 0)").unwrap();
    /// assert_eq!(c.to_string(), "#FF8000");
    /// ```
    pub fn parse(s: &str) -> Result<Self> {
        ColorSpec::parse(s).to_hex().ok_or_else(|| Error::InvalidColorFormat {
            position: 0,
            value: s.to_string(),
        })
    }
}

impl From<RGB8> for Hex {
    fn from(c: RGB8) -> Self { Hex(c) }
}

impl fmt::Display for Hex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let RGB8 { r, g, b } = self.0;
        write!(f, "#{r:02X}{g:02X}{b:02X}")
    }
}

impl FromStr for Hex {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> { Hex::parse(s) }
}

impl Serialize for Hex {
    fn serialize<S: Serializer>(&self, s: S) -> std::result::Result<S::Ok, S::Error> {
        s.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Hex {
    fn deserialize<D: Deserializer<'de>>(d: D) -> std::result::Result<Self, D::Error> {
        let spec = ColorSpec::deserialize(d)?;
        spec.to_hex().ok_or_else(|| serde::de::Error::custom(
            format!("invalid color format: {spec}")))
    }
}

/// One color in one of the supported notations.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(from = "RawSpec")]
pub enum ColorSpec {
    /// Channels in \[0, 255\].
    Tuple([f64; 3]),
    /// `#RRGGBB` or `#RGB`.
    Hex(String),
    /// `rgb(r, g, b)` with integer channels.
    CssRgb(String),
    /// A color name such as `"red"` or `"tab:blue"`.
    Named(String),
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawSpec {
    Tuple([f64; 3]),
    Text(String),
}

impl From<RawSpec> for ColorSpec {
    fn from(raw: RawSpec) -> Self {
        match raw {
            RawSpec::Tuple(c) => ColorSpec::Tuple(c),
            RawSpec::Text(s) => ColorSpec::parse(&s),
        }
    }
}

lazy_static! {
    static ref CSS_RGB: Regex = Regex::new(
        r"(?i)^\s*rgb\(\s*(\d{1,3})\s*,\s*(\d{1,3})\s*,\s*(\d{1,3})\s*\)\s*$")
        .expect("valid rgb() pattern");
}

impl ColorSpec {
    /// Classify a string.  Classification never fails; whether the
    /// string denotes a color is only decided by [`ColorSpec::to_hex`].
    pub fn parse(s: &str) -> Self {
        let t = s.trim_start();
        if t.starts_with('#') {
            ColorSpec::Hex(s.to_string())
        } else if t.get(..4).map_or(false, |p| p.eq_ignore_ascii_case("rgb(")) {
            ColorSpec::CssRgb(s.to_string())
        } else {
            ColorSpec::Named(s.to_string())
        }
    }

    /// Resolve to a [`Hex`] color, or `None` if the entry is malformed.
    pub fn to_hex(&self) -> Option<Hex> {
        match self {
            ColorSpec::Tuple(c) => from_channels(*c),
            ColorSpec::Hex(s) => parse_hex(s.trim()),
            ColorSpec::CssRgb(s) => {
                let caps = CSS_RGB.captures(s)?;
                let mut c = [0.; 3];
                for (i, ci) in c.iter_mut().enumerate() {
                    *ci = caps[i + 1].parse::<u16>().ok()? as f64;
                }
                from_channels(c)
            }
            ColorSpec::Named(name) => names::lookup(name).map(Hex),
        }
    }
}

impl fmt::Display for ColorSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ColorSpec::Tuple([r, g, b]) => write!(f, "({r}, {g}, {b})"),
            ColorSpec::Hex(s) | ColorSpec::CssRgb(s) | ColorSpec::Named(s) =>
                f.write_str(s),
        }
    }
}

impl From<(u8, u8, u8)> for ColorSpec {
    fn from((r, g, b): (u8, u8, u8)) -> Self {
        ColorSpec::Tuple([r as f64, g as f64, b as f64])
    }
}

impl From<[f64; 3]> for ColorSpec {
    fn from(c: [f64; 3]) -> Self { ColorSpec::Tuple(c) }
}

impl From<&str> for ColorSpec {
    fn from(s: &str) -> Self { ColorSpec::parse(s) }
}

impl From<Hex> for ColorSpec {
    fn from(c: Hex) -> Self { ColorSpec::Hex(c.to_string()) }
}

fn from_channels(c: [f64; 3]) -> Option<Hex> {
    if c.iter().any(|x| !x.is_finite() || *x < 0. || *x > 255.) {
        return None
    }
    // Scale to [0, 1] and back, rounding to the nearest byte.
    let byte = |x: f64| ((x / 255.) * 255.).round() as u8;
    Some(Hex::new(byte(c[0]), byte(c[1]), byte(c[2])))
}

fn parse_hex(s: &str) -> Option<Hex> {
    let digits = s.strip_prefix('#')?;
    if !digits.bytes().all(|b| b.is_ascii_hexdigit()) {
        return None
    }
    match digits.len() {
        6 => {
            let channel = |i: usize| u8::from_str_radix(&digits[i..i + 2], 16).ok();
            Some(Hex::new(channel(0)?, channel(2)?, channel(4)?))
        }
        3 => {
            let channel = |i: usize| {
                u8::from_str_radix(&digits[i..i + 1], 16).ok().map(|d| d * 17)
            };
            Some(Hex::new(channel(0)?, channel(1)?, channel(2)?))
        }
        _ => None,
    }
}

/// Convert every entry to a [`Hex`] color, preserving order and
/// length.
///
/// The first entry that does not denote a color aborts the whole
/// call with [`Error::InvalidColorFormat`] carrying its position; no
/// partial list is returned.
///
/// ```
/// use choropleth_brewery::{normalize, ColorSpec};
/// let hex = normalize(&["red".into(), (0u8, 128u8, 255u8).into(),
///                       "rgb(1, 2, 3)".into(), "#abcdef".into()]).unwrap();
/// let hex: Vec<_> = hex.iter().map(|c| c.to_string()).collect();
/// assert_eq!(hex, ["#FF0000", "#0080FF", "#010203", "#ABCDEF"]);
/// ```
pub fn normalize(colors: &[ColorSpec]) -> Result<Vec<Hex>> {
    if colors.is_empty() {
        return Err(Error::EmptyPalette)
    }
    let hex = colors.iter().enumerate()
        .map(|(position, c)| c.to_hex().ok_or_else(|| {
            Error::InvalidColorFormat { position, value: c.to_string() }
        }))
        .collect::<Result<Vec<_>>>()?;
    debug!(colors = hex.len(), "normalized palette");
    Ok(hex)
}

/// An ordered, non-empty list of color specifications.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(try_from = "Vec<ColorSpec>")]
pub struct Palette(Vec<ColorSpec>);

impl Palette {
    pub fn new(colors: Vec<ColorSpec>) -> Result<Self> {
        if colors.is_empty() { Err(Error::EmptyPalette) }
        else { Ok(Palette(colors)) }
    }

    pub fn len(&self) -> usize { self.0.len() }

    /// Always `false`: palettes hold at least one color.
    pub fn is_empty(&self) -> bool { self.0.is_empty() }

    pub fn specs(&self) -> &[ColorSpec] { &self.0 }

    pub fn normalize(&self) -> Result<Vec<Hex>> { normalize(&self.0) }
}

impl TryFrom<Vec<ColorSpec>> for Palette {
    type Error = Error;

    fn try_from(colors: Vec<ColorSpec>) -> Result<Self> { Palette::new(colors) }
}
