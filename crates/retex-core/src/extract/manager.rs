//! Extractor selection.

use tracing::{debug, info, warn};

use super::{AwashExtractor, BankExtractor, CbeExtractor, GenericExtractor};
use crate::models::record::TransactionRecord;

/// Ordered registry of bank extractors.
///
/// Bank-specific extractors come first in priority order; the generic
/// fallback is always last. The registry is built once, is read-only
/// during extraction, and is safe to share across threads.
pub struct ExtractorManager {
    extractors: Vec<Box<dyn BankExtractor>>,
}

impl ExtractorManager {
    /// Build the default registry: all supported banks, then the
    /// generic fallback.
    pub fn new() -> Self {
        let manager = Self::with_extractors(vec![
            Box::new(AwashExtractor::new()),
            Box::new(CbeExtractor::new()),
            Box::new(GenericExtractor::new()),
        ]);
        info!(
            "Initialized ExtractorManager with {} extractors",
            manager.extractors.len()
        );
        manager
    }

    /// Build a manager over a custom registry. The last entry is
    /// treated as the fallback and is excluded from
    /// [`list_supported_banks`](Self::list_supported_banks).
    pub fn with_extractors(extractors: Vec<Box<dyn BankExtractor>>) -> Self {
        Self { extractors }
    }

    /// Register a new bank extractor, preserving the fallback's
    /// terminal position.
    pub fn register(&mut self, extractor: Box<dyn BankExtractor>) {
        info!("Registering extractor: {}", extractor.bank_name());
        let insert_at = self.extractors.len().saturating_sub(1);
        self.extractors.insert(insert_at, extractor);
    }

    /// Extract transaction data using the best matching extractor.
    ///
    /// Never fails: when no extractor admits the document, a
    /// structured failure record is returned rather than an error.
    /// Callers branch on `is_valid`/`error`, not on exception
    /// handling.
    pub fn extract_transaction(&self, text: &str, url: &str) -> TransactionRecord {
        debug!("Selecting extractor for URL: {:.50}", url);

        match self.find_extractor(url, text) {
            Some(extractor) => {
                info!("Using {} extractor", extractor.bank_name());
                extractor.extract(text, url)
            }
            None => {
                warn!("No suitable extractor found");
                TransactionRecord::no_match(text)
            }
        }
    }

    /// First admissible bank-specific extractor in registration order,
    /// else the generic fallback if it admits, else none. Selection
    /// short-circuits: once one matches, no other is consulted.
    fn find_extractor(&self, url: &str, text: &str) -> Option<&dyn BankExtractor> {
        let (fallback, specific) = self.extractors.split_last()?;

        for extractor in specific {
            if extractor.can_handle(url, text) {
                debug!("Found specific extractor: {}", extractor.bank_name());
                return Some(extractor.as_ref());
            }
        }

        if fallback.can_handle(url, text) {
            debug!("Using {} as fallback", fallback.bank_name());
            return Some(fallback.as_ref());
        }

        None
    }

    /// Names of the supported banks, in registration order, excluding
    /// the generic fallback.
    pub fn list_supported_banks(&self) -> Vec<String> {
        let count = self.extractors.len().saturating_sub(1);
        self.extractors
            .iter()
            .take(count)
            .map(|e| e.bank_name().to_string())
            .collect()
    }
}

impl Default for ExtractorManager {
    fn default() -> Self {
        Self::new()
    }
}
