//! Errors raised while building palettes, mappers and styles.

/// Errors of this crate.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// A palette entry could not be interpreted as a color.
    #[error("invalid color format at position {position}: {value:?}")]
    InvalidColorFormat { position: usize, value: String },
    /// A mapper needs at least one color stop.
    #[error("palette must contain at least one color")]
    EmptyPalette,
    /// Logarithmic scaling requires every bound to be ≥ -1.
    #[error("value {value} is outside the domain of log(1 + x)")]
    Domain { value: f64 },
    #[error("invalid value range [{min}, {max}]")]
    InvalidRange { min: f64, max: f64 },
    #[error("invalid style: {0}")]
    InvalidStyle(String),
    #[error("dataset error: {0}")]
    Dataset(String),
    #[error("unknown palette: {0}")]
    UnknownPalette(String),
    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),
    #[error("csv error: {0}")]
    Csv(#[from] csv::Error),
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
