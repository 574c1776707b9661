use thiserror::Error;

/// Errors raised while building the pieces a [`TextBox`](crate::layout::TextBox)
/// needs: loading fonts and validating configuration. Fitting itself never fails.
#[derive(Error, Debug)]
pub enum TextBoxError {
    #[error(transparent)]
    /// An I/O error occurred
    Io(#[from] std::io::Error),

    #[error(transparent)]
    /// [owned_ttf_parser] failed to parse the font
    FaceParsing(#[from] owned_ttf_parser::FaceParsingError),

    #[error(transparent)]
    /// [image] failed to encode or write a layer
    Image(#[from] image::ImageError),

    #[error("fill range must satisfy 0 < low <= high <= 1, got [{low}, {high}]")]
    /// A fill range outside of `(0, 1]` or with its bounds reversed
    InvalidFillRange { low: f32, high: f32 },
}

/// Why a [`Shaper`](crate::Shaper) could not produce a layer for a string.
///
/// These are recovered from locally by the fitter and never reach its caller.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum RenderError {
    #[error("nothing to render")]
    EmptyText,

    #[error("invalid font size {0}")]
    InvalidSize(u32),

    #[error("font has no glyph for {0:?}")]
    MissingGlyph(char),

    #[error("cannot lay out {0:?} in isolation")]
    UnsupportedSequence(String),

    #[error("rasterisation failed: {0}")]
    Raster(String),
}
