//! Error types for the retex-core library.

use thiserror::Error;

/// Main error type for the retex library.
#[derive(Error, Debug)]
pub enum RetexError {
    /// Content decoding error.
    #[error("decode error: {0}")]
    Decode(#[from] DecodeError),

    /// Image processing error.
    #[error("image error: {0}")]
    Image(#[from] image::ImageError),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration error.
    #[error("configuration error: {0}")]
    Config(String),
}

/// Errors raised while turning raw document bytes into text.
///
/// Extraction misses are never errors; a `DecodeError` means every
/// applicable decoding strategy was exhausted.
#[derive(Error, Debug)]
pub enum DecodeError {
    /// Failed to parse a PDF container.
    #[error("failed to parse PDF: {0}")]
    PdfParse(String),

    /// A parseable PDF yielded no text by any strategy.
    #[error("failed to extract text from PDF: {0}")]
    PdfText(String),

    /// The image bytes could not be decoded.
    #[error("invalid image: {0}")]
    InvalidImage(String),

    /// Failed to load OCR models.
    #[error("failed to load OCR model: {0}")]
    OcrModelLoad(String),

    /// Text recognition failed on a decodable image.
    #[error("text recognition failed: {0}")]
    OcrRecognition(String),
}

/// Result type for the retex library.
pub type Result<T> = std::result::Result<T, RetexError>;
