use crate::color::ColorSpec;

/// A catalogued palette together with its characteristics.
pub(crate) struct PaletteData {
    pub(crate) label: &'static str,
    pub(crate) specs: Vec<ColorSpec>, // Invariant: length ≥ 2
    pub(crate) typ: PaletteType,
    pub(crate) blind: Trivalent,
}

/// Type of Palette.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PaletteType {
    /// Sequential color scheme, suited to ordered data that progress
    /// from low to high.  Lightness steps dominate the look of these
    /// schemes.
    Seq,
    /// Divergent color scheme.  They put equal emphasis on mid-range
    /// critical values and extremes at both ends of the data range.
    Div,
    /// Qualitative color scheme.  Hues are used to create the primary
    /// visual differences between classes; best suited to nominal or
    /// categorical data.
    Qual
}

/// Trivalent logic.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Trivalent {
    Yes,
    Maybe,
    No,
}

impl Trivalent {
    /// Whether a property with value `self` meets the requirement
    /// `wanted`.  `No` means "not necessarily wanted".
    pub(crate) fn satisfies(self, wanted: Trivalent) -> bool {
        use Trivalent::*;
        match wanted {
            Yes => matches!(self, Yes),
            No => true,
            Maybe => matches!(self, Yes | Maybe),
        }
    }
}
