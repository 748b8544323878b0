//! PDF text extraction using lopdf and pdf-extract.

use std::borrow::Cow;

use lopdf::Document;
use tracing::{debug, warn};

use super::Result;
use crate::error::DecodeError;
use crate::models::config::DecodeConfig;

/// A loaded PDF receipt.
///
/// The raw buffer is retained for the whole-document fallback and is
/// borrowed from the caller; it is only copied when empty-password
/// decryption has to rewrite the document.
#[derive(Debug)]
pub struct PdfDocument<'a> {
    document: Document,
    raw_data: Cow<'a, [u8]>,
}

impl<'a> PdfDocument<'a> {
    /// Load a PDF from bytes.
    pub fn load(data: &'a [u8]) -> Result<Self> {
        let mut doc =
            Document::load_mem(data).map_err(|e| DecodeError::PdfParse(e.to_string()))?;

        // Handle PDFs with empty password encryption
        let raw_data = if doc.is_encrypted() {
            if doc.decrypt("").is_err() {
                return Err(DecodeError::PdfParse("PDF is encrypted".to_string()));
            }
            debug!("Decrypted PDF with empty password");

            let mut decrypted = Vec::new();
            doc.save_to(&mut decrypted)
                .map_err(|e| DecodeError::PdfParse(format!("failed to save decrypted PDF: {}", e)))?;
            Cow::Owned(decrypted)
        } else {
            Cow::Borrowed(data)
        };

        if doc.get_pages().is_empty() {
            return Err(DecodeError::PdfParse("PDF has no pages".to_string()));
        }

        Ok(Self {
            document: doc,
            raw_data,
        })
    }

    /// Number of pages in the document.
    pub fn page_count(&self) -> u32 {
        self.document.get_pages().len() as u32
    }

    /// Extract text page by page, concatenated with a separating
    /// space. A page that fails to yield text contributes nothing.
    /// Honors `max_pages` from the config; 0 means no limit.
    pub fn extract_text(&self, config: &DecodeConfig) -> Result<String> {
        let mut full_text = String::new();

        let pages = self.document.get_pages();
        let page_limit = if config.max_pages == 0 {
            pages.len()
        } else {
            config.max_pages
        };

        for &page_num in pages.keys().take(page_limit) {
            match self.document.extract_text(&[page_num]) {
                Ok(page_text) => {
                    let page_text = page_text.trim();
                    if !page_text.is_empty() {
                        if !full_text.is_empty() {
                            full_text.push(' ');
                        }
                        full_text.push_str(page_text);
                    }
                }
                Err(e) => {
                    warn!("Skipping page {}: {}", page_num, e);
                }
            }
        }

        // Some generators emit text streams lopdf cannot decode;
        // pdf-extract handles a wider range of encodings.
        if full_text.is_empty() {
            if !config.pdf_whole_document_fallback {
                return Err(DecodeError::PdfText(
                    "per-page extraction yielded no text".to_string(),
                ));
            }
            debug!("Per-page extraction yielded no text, trying whole-document extraction");
            full_text = pdf_extract::extract_text_from_mem(&self.raw_data)
                .map_err(|e| DecodeError::PdfText(e.to_string()))?;
        }

        Ok(full_text)
    }
}

/// Extract text from PDF bytes.
pub fn extract_pdf_text(data: &[u8], config: &DecodeConfig) -> Result<String> {
    let doc = PdfDocument::load(data)?;
    let text = doc.extract_text(config)?;
    debug!(
        "Extracted {} characters from {} PDF pages",
        text.len(),
        doc.page_count()
    );
    Ok(text)
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Build a minimal PDF with one Helvetica text run per page.
    fn pdf_with_pages(texts: &[&str]) -> Vec<u8> {
        use lopdf::content::{Content, Operation};
        use lopdf::{dictionary, Object, Stream};

        let mut doc = Document::with_version("1.5");
        let pages_id = doc.new_object_id();
        let font_id = doc.add_object(dictionary! {
            "Type" => "Font",
            "Subtype" => "Type1",
            "BaseFont" => "Helvetica",
        });
        let resources_id = doc.add_object(dictionary! {
            "Font" => dictionary! { "F1" => font_id },
        });

        let mut kids: Vec<Object> = Vec::new();
        for text in texts {
            let content = Content {
                operations: vec![
                    Operation::new("BT", vec![]),
                    Operation::new("Tf", vec!["F1".into(), 12.into()]),
                    Operation::new("Td", vec![100.into(), 700.into()]),
                    Operation::new("Tj", vec![Object::string_literal(*text)]),
                    Operation::new("ET", vec![]),
                ],
            };
            let content_id =
                doc.add_object(Stream::new(dictionary! {}, content.encode().unwrap()));
            let page_id = doc.add_object(dictionary! {
                "Type" => "Page",
                "Parent" => pages_id,
                "Contents" => content_id,
            });
            kids.push(page_id.into());
        }

        doc.objects.insert(
            pages_id,
            Object::Dictionary(dictionary! {
                "Type" => "Pages",
                "Kids" => kids,
                "Count" => texts.len() as i64,
                "Resources" => resources_id,
                "MediaBox" => vec![0.into(), 0.into(), 612.into(), 792.into()],
            }),
        );
        let catalog_id = doc.add_object(dictionary! {
            "Type" => "Catalog",
            "Pages" => pages_id,
        });
        doc.trailer.set("Root", catalog_id);

        let mut buf = Vec::new();
        doc.save_to(&mut buf).unwrap();
        buf
    }

    #[test]
    fn test_load_rejects_non_pdf() {
        let err = PdfDocument::load(b"not a pdf").unwrap_err();
        assert!(matches!(err, DecodeError::PdfParse(_)));
    }

    #[test]
    fn test_load_rejects_truncated_header() {
        let err = PdfDocument::load(b"%PDF-1.7").unwrap_err();
        assert!(matches!(err, DecodeError::PdfParse(_)));
    }

    #[test]
    fn test_extract_text_from_generated_pdf() {
        let data = pdf_with_pages(&["Amount: 500 ETB"]);
        let doc = PdfDocument::load(&data).unwrap();

        assert_eq!(doc.page_count(), 1);
        let text = doc.extract_text(&DecodeConfig::default()).unwrap();
        assert!(text.contains("Amount: 500 ETB"));
    }

    #[test]
    fn test_max_pages_limits_extraction() {
        let data = pdf_with_pages(&["PAGE ONE", "PAGE TWO"]);
        let doc = PdfDocument::load(&data).unwrap();
        assert_eq!(doc.page_count(), 2);

        let config = DecodeConfig {
            max_pages: 1,
            ..Default::default()
        };
        let text = doc.extract_text(&config).unwrap();
        assert!(text.contains("PAGE ONE"));
        assert!(!text.contains("PAGE TWO"));

        let unlimited = DecodeConfig {
            max_pages: 0,
            ..Default::default()
        };
        let text = doc.extract_text(&unlimited).unwrap();
        assert!(text.contains("PAGE ONE"));
        assert!(text.contains("PAGE TWO"));
    }
}
