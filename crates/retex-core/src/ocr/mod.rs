//! OCR path for photographed receipts.
//!
//! Unlike [`crate::decode::decode_content`], image input is not
//! auto-dispatched by content sniffing; callers route photos here
//! explicitly. There is no secondary OCR strategy: a decoder error or
//! an unreadable image surfaces as a [`crate::error::DecodeError`].

mod engine;
mod preprocessing;

pub use engine::OcrEngine;
pub use preprocessing::{binarize_otsu, otsu_threshold, prepare_for_recognition};
