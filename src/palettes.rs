//! Palettes offered to the user.  The stops are Plotly's sequential
//! scales, kept in the notation Plotly ships them in.

use std::fmt;
use std::str::FromStr;
use lazy_static::lazy_static;
use serde::Deserialize;

pub(crate) mod ty;
use ty::*;
pub use ty::{PaletteType, Trivalent};

use crate::color::{normalize, ColorSpec, Hex};
use crate::error::{Error, Result};

fn specs(stops: &[&str]) -> Vec<ColorSpec> {
    stops.iter().map(|&s| ColorSpec::parse(s)).collect()
}

lazy_static! {
  pub(crate) static ref TURBO: PaletteData = {
  PaletteData {
    label: "Normal Vision (Categorical)",
    typ: PaletteType::Seq,
    blind: Trivalent::No,
    specs: specs(&[
      "#30123b", "#4145ab", "#4675ed", "#39a2fc", "#1bcfd4",
      "#24eca6", "#61fc6c", "#a4fc3b", "#d1e834", "#f3c63a",
      "#fe9b2d", "#f36315", "#d93806", "#b11901", "#7a0402",
    ])}
  };
}

lazy_static! {
  pub(crate) static ref INFERNO: PaletteData = {
  PaletteData {
    label: "Color Universal Design (CUD): For General Colorblindness",
    typ: PaletteType::Seq,
    blind: Trivalent::Yes,
    specs: specs(&[
      "#000004", "#1b0c41", "#4a0c6b", "#781c6d", "#a52c60",
      "#cf4446", "#ed6925", "#fb9b06", "#f7d13d", "#fcffa4",
    ])}
  };
}

lazy_static! {
  pub(crate) static ref CIVIDIS: PaletteData = {
  PaletteData {
    label: "Deuteranopia & Protanopia: For Red-Green Colorblindness",
    typ: PaletteType::Seq,
    blind: Trivalent::Yes,
    specs: specs(&[
      "rgb(0,32,76)", "rgb(0,42,102)", "rgb(0,52,110)",
      "rgb(39,63,108)", "rgb(60,74,107)", "rgb(76,85,107)",
      "rgb(91,95,109)", "rgb(104,106,112)", "rgb(117,117,117)",
      "rgb(131,129,120)", "rgb(146,140,120)", "rgb(161,152,118)",
      "rgb(176,165,114)", "rgb(192,177,109)", "rgb(209,191,102)",
      "rgb(225,204,92)", "rgb(243,219,79)", "rgb(255,233,69)",
    ])}
  };
}

lazy_static! {
  pub(crate) static ref MAGMA: PaletteData = {
  PaletteData {
    label: "Tritanopia: For Blue-Yellow Colorblindness",
    typ: PaletteType::Seq,
    blind: Trivalent::Yes,
    specs: specs(&[
      "#000004", "#180f3d", "#440f76", "#721f81", "#9e2f7f",
      "#cd4071", "#f1605d", "#fd9668", "#feca8d", "#fcfdbf",
    ])}
  };
}

lazy_static! {
  pub(crate) static ref PLASMA: PaletteData = {
  PaletteData {
    label: "Soft Contrast: For Accessibility",
    typ: PaletteType::Seq,
    blind: Trivalent::Maybe,
    specs: specs(&[
      "#0d0887", "#46039f", "#7201a8", "#9c179e", "#bd3786",
      "#d8576b", "#ed7953", "#fb9f3a", "#fdca26", "#f0f921",
    ])}
  };
}

/// The palettes a user may pick from.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PaletteChoice {
    #[default]
    Turbo,
    Inferno,
    Cividis,
    Magma,
    Plasma,
}

impl PaletteChoice {
    /// All choices, in the order they are presented.
    pub const ALL: [PaletteChoice; 5] = [
        PaletteChoice::Turbo, PaletteChoice::Inferno, PaletteChoice::Cividis,
        PaletteChoice::Magma, PaletteChoice::Plasma];

    fn data(self) -> &'static PaletteData {
        match self {
            PaletteChoice::Turbo => &TURBO,
            PaletteChoice::Inferno => &INFERNO,
            PaletteChoice::Cividis => &CIVIDIS,
            PaletteChoice::Magma => &MAGMA,
            PaletteChoice::Plasma => &PLASMA,
        }
    }

    /// Short identifier, as accepted by [`FromStr`].
    pub fn key(self) -> &'static str {
        match self {
            PaletteChoice::Turbo => "turbo",
            PaletteChoice::Inferno => "inferno",
            PaletteChoice::Cividis => "cividis",
            PaletteChoice::Magma => "magma",
            PaletteChoice::Plasma => "plasma",
        }
    }

    /// Text shown to the user, naming the vision it caters for.
    pub fn label(self) -> &'static str { self.data().label }

    pub fn typ(self) -> PaletteType { self.data().typ }

    /// Says whether the palette is colorblind safe.
    pub fn blind(self) -> Trivalent { self.data().blind }

    /// The raw color stops, low to high.
    pub fn specs(self) -> &'static [ColorSpec] { &self.data().specs }

    /// The stops normalized to [`Hex`].
    ///
    /// ```
    /// use choropleth_brewery::PaletteChoice;
    /// let hex = PaletteChoice::Cividis.hex().unwrap();
    /// assert_eq!(hex[0].to_string(), "#00204C");
    /// ```
    pub fn hex(self) -> Result<Vec<Hex>> { normalize(self.specs()) }

    /// Choices that are colorblind safe at least to the degree `blind`.
    pub fn find(blind: Trivalent) -> impl Iterator<Item = PaletteChoice> {
        Self::ALL.into_iter().filter(move |p| p.blind().satisfies(blind))
    }
}

impl fmt::Display for PaletteChoice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for PaletteChoice {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let s = s.trim();
        Self::ALL.into_iter()
            .find(|p| p.key().eq_ignore_ascii_case(s) || p.label() == s)
            .ok_or_else(|| Error::UnknownPalette(s.to_string()))
    }
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_palette_normalizes() {
        for p in PaletteChoice::ALL {
            let hex = p.hex().unwrap();
            assert_eq!(hex.len(), p.specs().len(), "{}", p.key());
            assert!(hex.len() >= 2);
        }
    }

    #[test]
    fn mixed_notations_survive_normalization() {
        assert!(matches!(PaletteChoice::Cividis.specs()[0], ColorSpec::CssRgb(_)));
        let last = PaletteChoice::Cividis.hex().unwrap().pop().unwrap();
        assert_eq!(last.to_string(), "#FFE945");
        let first = PaletteChoice::Inferno.hex().unwrap()[0];
        assert_eq!(first.to_string(), "#000004");
    }

    #[test]
    fn parse_by_key_or_label() {
        assert_eq!("MAGMA".parse::<PaletteChoice>().unwrap(), PaletteChoice::Magma);
        assert_eq!("Soft Contrast: For Accessibility".parse::<PaletteChoice>().unwrap(),
                   PaletteChoice::Plasma);
        assert!("rainbow".parse::<PaletteChoice>().is_err());
    }

    #[test]
    fn find_colorblind_safe() {
        let safe: Vec<_> = PaletteChoice::find(Trivalent::Yes).collect();
        assert_eq!(safe, [PaletteChoice::Inferno, PaletteChoice::Cividis,
                          PaletteChoice::Magma]);
        assert_eq!(PaletteChoice::find(Trivalent::Maybe).count(), 4);
        assert_eq!(PaletteChoice::find(Trivalent::No).count(), 5);
    }
}
