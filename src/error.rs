use thiserror::Error;

/// All errors that the crate can generate
#[derive(Error, Debug)]
pub enum LayoutError {
    #[error(transparent)]
    /// An I/O error occurred
    Io(#[from] std::io::Error),

    #[error(transparent)]
    /// [owned_ttf_parser] failed to parse the font
    FaceParsing(#[from] owned_ttf_parser::FaceParsingError),

    #[error(transparent)]
    /// [image] failed to parse the image
    Image(#[from] image::ImageError),

    /// A text run contained a value that is not a Unicode scalar, so bidi levels
    /// could not be computed for it
    #[error("invalid codepoint {0:#06x}")]
    InvalidCodepoint(u32),

    /// A text run was measured before its text was shaped into glyphs
    #[error("text run has not been shaped")]
    UnshapedText,
}
