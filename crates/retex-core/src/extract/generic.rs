//! Generic fallback extractor for unknown bank formats.
//!
//! Loose patterns intended to catch any receipt-like document: an 8+
//! character alphanumeric token as a candidate id, any ETB-suffixed or
//! decimal-looking number as a candidate amount. Known tradeoff: these
//! can false-positive on unrelated numeric content, so results from
//! this extractor are logged as lower-confidence.

use tracing::{debug, warn};

use super::patterns::{GENERIC_INDICATORS, GENERIC_MIN_INDICATORS};
use super::{normalize_amount, BankExtractor, FieldPatterns};
use crate::models::record::TransactionRecord;

const BANK_NAME: &str = "Generic Bank";

pub struct GenericExtractor {
    patterns: FieldPatterns,
}

impl GenericExtractor {
    pub fn new() -> Self {
        let patterns = FieldPatterns::compile(&[
            (
                "transaction_id",
                &[
                    r"(?:Transaction|Txn|Ref|Reference|ID)(?:\s+)?(?:ID|No|Number|:)[:\s]*([A-Z0-9]{6,})",
                    r"(?:^|\s)([A-Z0-9]{8,})(?:\s|$)",
                    r"ID[:\s]*([A-Z0-9]+)",
                    r"REF[:\s]*([A-Z0-9]+)",
                ],
            ),
            (
                "amount",
                &[
                    r"([\d,]+(?:\.\d{2})?)\s*ETB",
                    r"ETB[:\s]*([\d,]+(?:\.\d{2})?)",
                    r"Amount[:\s]*([\d,]+(?:\.\d{2})?)",
                    r"Total[:\s]*([\d,]+(?:\.\d{2})?)",
                    r"([\d,]+\.\d{2})",
                ],
            ),
            (
                "date",
                &[
                    r"(\d{4}-\d{2}-\d{2}\s+\d{1,2}:\d{2}:\d{2})",
                    r"(\d{1,2}[/\-]\d{1,2}[/\-]\d{2,4})",
                    r"(\d{4}-\d{2}-\d{2})",
                ],
            ),
            (
                "payer_name",
                &[
                    r"(?:From|Payer|Sender|Name)[:\s]+([A-Z][A-Z ]{2,})",
                    r"(?:Customer|Account\s+Holder)[:\s]+([A-Z][A-Z ]{2,})",
                ],
            ),
            (
                "receiver",
                &[
                    r"(?:To|Receiver|Beneficiary)[:\s]+([A-Z][A-Z ]{2,})",
                    r"(?:Beneficiary\s+name)[:\s]+([A-Z][A-Z ]{2,})",
                ],
            ),
            (
                "account",
                &[
                    r"(?:Account|Acc)[:\s]*(\d+[\*\-]*\d*)",
                    r"Account\s+(?:No|Number)[:\s]*(\d+[\*\-]*\d*)",
                ],
            ),
        ]);

        Self { patterns }
    }
}

impl Default for GenericExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl BankExtractor for GenericExtractor {
    fn bank_name(&self) -> &str {
        BANK_NAME
    }

    /// Fallback admissibility: at least two of five transaction
    /// keyword indicators must be present. This keeps the fallback
    /// from claiming completely unrelated text while still acting as
    /// a safety net.
    fn can_handle(&self, _url: &str, text: &str) -> bool {
        let text = text.to_lowercase();
        let hits = GENERIC_INDICATORS
            .iter()
            .filter(|keyword| text.contains(*keyword))
            .count();

        hits >= GENERIC_MIN_INDICATORS
    }

    fn extract(&self, text: &str, _url: &str) -> TransactionRecord {
        debug!("[{}] Extracting from text length: {}", BANK_NAME, text.len());

        let mut fields = self.patterns.extract_all(text, BANK_NAME);

        let record = TransactionRecord {
            transaction_id: fields.remove("transaction_id"),
            amount: fields
                .remove("amount")
                .and_then(|raw| normalize_amount(&raw)),
            date: fields.remove("date"),
            payer_name: fields.remove("payer_name"),
            receiver: fields.remove("receiver"),
            account: fields.remove("account"),
            payment_method: Some("Bank Transfer".to_string()),
            status: Some("Completed".to_string()),
            extractor_used: BANK_NAME.to_string(),
            raw_text: text.to_string(),
            ..Default::default()
        }
        .validated();

        if record.is_valid {
            warn!(
                "[{}] Accepted via loose fallback patterns; treat as lower-confidence",
                BANK_NAME
            );
        }

        record
    }
}
