//! Core library for bank receipt processing.
//!
//! This crate provides:
//! - Content decoding (PDF text, HTML visible text, plain-text fallback)
//! - OCR for photographed receipts (grayscale + Otsu binarization)
//! - Bank-specific transaction field extraction with a generic fallback
//! - The structured transaction record consumed by presentation layers
//!
//! Each extraction request (decode, select, extract) is a pure,
//! synchronous computation: no shared mutable state, no caching across
//! requests. The extractor registry is built once and may be shared
//! across concurrently processed requests.

pub mod decode;
pub mod error;
pub mod extract;
pub mod models;
pub mod ocr;

pub use decode::{decode_content, extract_html_text, extract_pdf_text};
pub use error::{DecodeError, Result, RetexError};
pub use extract::{
    AwashExtractor, BankExtractor, CbeExtractor, ExtractorManager, FieldPatterns, GenericExtractor,
};
pub use models::{RetexConfig, TransactionRecord, NO_EXTRACTOR};
pub use ocr::OcrEngine;
