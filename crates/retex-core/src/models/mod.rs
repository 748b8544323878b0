//! Data models for receipt processing.

pub mod config;
pub mod record;

pub use config::{DecodeConfig, OcrConfig, RetexConfig};
pub use record::{TransactionRecord, NO_EXTRACTOR};
