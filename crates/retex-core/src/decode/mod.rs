//! Content decoding: raw document bytes to normalized text.
//!
//! Upstream sources routinely mislabel media types, so dispatch sniffs
//! the buffer as well as trusting the declared type. Every strategy
//! catches its own failure and falls through; the plain-text fallback
//! always succeeds, so `decode_content` produces some text for any
//! recognizable-or-not input.

mod html;
mod pdf;

pub use html::extract_html_text;
pub use pdf::{extract_pdf_text, PdfDocument};

use tracing::{debug, warn};

use crate::error::DecodeError;
use crate::models::config::DecodeConfig;

/// PDF magic header.
const PDF_MAGIC: &[u8] = b"%PDF";

/// Result type for decoding operations.
pub type Result<T> = std::result::Result<T, DecodeError>;

/// Decode raw document bytes into plain text.
///
/// Strategies are tried in a fixed order: PDF text extraction, HTML
/// visible-text extraction, then a lossy UTF-8 fallback. Image input
/// is not auto-dispatched here; route photographed receipts through
/// [`crate::ocr::OcrEngine::decode_image`] instead.
pub fn decode_content(
    content: &[u8],
    declared_media_type: &str,
    config: &DecodeConfig,
) -> Result<String> {
    let media_type = declared_media_type.to_lowercase();
    debug!("Decoding {} bytes, declared type: {}", content.len(), media_type);

    if media_type.contains("pdf") || content.starts_with(PDF_MAGIC) {
        match extract_pdf_text(content, config) {
            Ok(text) => return Ok(text),
            Err(e) => warn!("PDF extraction failed, trying next strategy: {}", e),
        }
    }

    if media_type.contains("html") || sniff_html(content) {
        match extract_html_text(content) {
            Ok(text) => return Ok(text),
            Err(e) => warn!("HTML extraction failed, trying next strategy: {}", e),
        }
    }

    // Plain-text fallback: lossy decode always succeeds, extraction on
    // useless text will simply find no fields and report invalid.
    let text = String::from_utf8_lossy(content).into_owned();
    debug!("Decoded {} characters as plain text", text.len());
    Ok(text)
}

/// Content sniff for HTML: a root tag or doctype declaration anywhere
/// in the lowercased buffer.
fn sniff_html(content: &[u8]) -> bool {
    let lowered = content.to_ascii_lowercase();
    contains_subslice(&lowered, b"<html") || contains_subslice(&lowered, b"<!doctype")
}

fn contains_subslice(haystack: &[u8], needle: &[u8]) -> bool {
    haystack.windows(needle.len()).any(|w| w == needle)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn decode(content: &[u8], media_type: &str) -> String {
        decode_content(content, media_type, &DecodeConfig::default()).unwrap()
    }

    #[test]
    fn test_plain_text_fallback() {
        assert_eq!(
            decode(b"Transaction ID: ABC123", "text/plain"),
            "Transaction ID: ABC123"
        );
    }

    #[test]
    fn test_binary_garbage_degrades_to_text() {
        // Invalid UTF-8 is replaced, never a hard failure.
        let text = decode(&[0xff, 0xfe, b'E', b'T', b'B'], "application/octet-stream");
        assert!(text.contains("ETB"));
    }

    #[test]
    fn test_html_sniffed_without_declared_type() {
        let html = b"<!DOCTYPE html><html><body>Amount: 500 ETB</body></html>";
        assert_eq!(decode(html, "application/octet-stream"), "Amount: 500 ETB");
    }

    #[test]
    fn test_html_declared_type() {
        let html = b"<div>Reference No: FT123</div>";
        assert_eq!(decode(html, "text/html; charset=utf-8"), "Reference No: FT123");
    }

    #[test]
    fn test_mislabeled_pdf_falls_through() {
        // Declared as PDF but not a PDF container: falls through to
        // the plain-text fallback rather than failing.
        assert_eq!(decode(b"just some text", "application/pdf"), "just some text");
    }

    #[test]
    fn test_empty_buffer() {
        assert_eq!(decode(b"", ""), "");
    }
}
