//! Structured transaction record produced by extraction.

use serde::{Deserialize, Serialize};

/// Sentinel value for `extractor_used` when no extractor matched.
pub const NO_EXTRACTOR: &str = "None";

/// The result of running extraction over a normalized receipt text.
///
/// All semantic fields are optional; a missed field is an omission,
/// not an error. `is_valid` is true only when both `transaction_id`
/// and `amount` were recovered.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TransactionRecord {
    /// Bank transaction identifier.
    pub transaction_id: Option<String>,

    /// Transferred amount, normalized (no thousands separators).
    pub amount: Option<String>,

    /// Transaction date/time as printed on the receipt.
    pub date: Option<String>,

    /// Name of the paying party.
    pub payer_name: Option<String>,

    /// Name of the receiving party.
    pub receiver: Option<String>,

    /// Sender-side account number (often partially masked).
    pub account: Option<String>,

    /// Receiver-side account number.
    pub receiver_account: Option<String>,

    /// Receiving bank, for interbank transfers.
    pub receiver_bank: Option<String>,

    /// Transaction type as labeled by the bank.
    pub transaction_type: Option<String>,

    /// Service charge.
    pub charge: Option<String>,

    /// Originating branch.
    pub branch: Option<String>,

    /// Payment method; banks under this system only issue transfers.
    pub payment_method: Option<String>,

    /// Settlement status; receipts are only published once settled.
    pub status: Option<String>,

    /// Whether the record passed validation.
    pub is_valid: bool,

    /// Name of the extractor that produced this record, or
    /// [`NO_EXTRACTOR`] when none matched.
    pub extractor_used: String,

    /// Populated only on the no-match path.
    pub error: Option<String>,

    /// The full normalized text, retained for downstream audit.
    pub raw_text: String,
}

impl TransactionRecord {
    /// Apply the shared validation policy: a record is valid iff both
    /// a transaction id and an amount were recovered.
    pub fn validated(mut self) -> Self {
        self.is_valid = self
            .transaction_id
            .as_deref()
            .is_some_and(|v| !v.is_empty())
            && self.amount.as_deref().is_some_and(|v| !v.is_empty());
        self
    }

    /// Terminal failure record for the case where no extractor admits
    /// the document. This is a normal outcome, not an error path.
    pub fn no_match(raw_text: &str) -> Self {
        Self {
            is_valid: false,
            extractor_used: NO_EXTRACTOR.to_string(),
            error: Some("No suitable extractor found for this transaction format".to_string()),
            raw_text: raw_text.to_string(),
            ..Self::default()
        }
    }
}
