//! Awash Bank extractor.
//!
//! Handles receipts published at awashpay.awashbank.com. The layout is
//! a label/value table that surfaces either pipe-delimited
//! (`Label | : | Value |`) or as plain `Label: Value` lines depending
//! on how the page was rendered to text.

use tracing::debug;

use super::patterns::AWASH_URL_ID;
use super::{normalize_amount, BankExtractor, FieldPatterns};
use crate::models::record::TransactionRecord;

const BANK_NAME: &str = "Awash Bank";

pub struct AwashExtractor {
    patterns: FieldPatterns,
}

impl AwashExtractor {
    pub fn new() -> Self {
        let patterns = FieldPatterns::compile(&[
            (
                "transaction_id",
                &[
                    r"Transaction ID\s*[:\|]*\s*([A-Z0-9]+)",
                    r"Transaction ID\s*\|\s*:\s*\|\s*([A-Z0-9]+)",
                    r"Transaction ID.*?([A-Z0-9]{8,})",
                    r"ID\s*[:\|]*\s*([A-Z0-9]+)",
                    r"([A-Z0-9]{8,})",
                ],
            ),
            (
                "amount",
                &[
                    r"Amount\s*[:\|]*\s*([\d,]+(?:\.\d{2})?)\s*ETB",
                    r"Amount\s*\|\s*:\s*\|\s*([\d,]+(?:\.\d{2})?)\s*ETB",
                    r"([\d,]+(?:\.\d{2})?)\s*ETB",
                    r"Amount.*?([\d,]+)",
                ],
            ),
            (
                "date",
                &[
                    r"Transaction Time\s*:\s*(\d{4}-\d{2}-\d{2}\s+\d{1,2}:\d{2}:\d{2}\s*(?:AM|PM)?)",
                    r"Transaction Time\s*\|\s*:\s*\|\s*(\d{4}-\d{2}-\d{2}\s+\d{1,2}:\d{2}:\d{2}\s*(?:AM|PM)?)",
                    r"(\d{4}-\d{2}-\d{2}\s+\d{1,2}:\d{2}:\d{2})",
                    r"(\d{1,2}/\d{1,2}/\d{4})",
                ],
            ),
            (
                "payer_name",
                &[
                    r"Sender Name\s*:\s*([A-Z][A-Z ]+)",
                    r"Sender Name\s*\|\s*:\s*\|\s*([A-Z][A-Z ]+)",
                    r"Customer Name\s*:\s*([A-Z][A-Z ]+)",
                    r"Customer Name\s*\|\s*:\s*\|\s*([A-Z][A-Z ]+)",
                ],
            ),
            (
                "receiver",
                &[
                    r"Beneficiary name\s*:\s*([A-Z][A-Z ]+)",
                    r"Beneficiary name\s*\|\s*:\s*\|\s*([A-Z][A-Z ]+)",
                    r"Beneficiary\s*:\s*([A-Z][A-Z ]+)",
                ],
            ),
            (
                "sender_account",
                &[
                    r"Sender Account\s*:\s*([0-9\*]+)",
                    r"Sender Account\s*\|\s*:\s*\|\s*([0-9\*]+)",
                    r"Account No\s*:\s*([0-9\*/A-Z]+)",
                    r"Account No\s*\|\s*:\s*\|\s*([0-9\*/A-Z]+)",
                ],
            ),
            (
                "receiver_account",
                &[
                    r"Beneficiary Account\s*:\s*([0-9]+)",
                    r"Beneficiary Account\s*\|\s*:\s*\|\s*([0-9]+)",
                ],
            ),
            (
                "receiver_bank",
                &[
                    r"Beneficiary Bank\s*:\s*([A-Z][A-Z ]+)",
                    r"Beneficiary Bank\s*\|\s*:\s*\|\s*([A-Z][A-Z ]+)",
                ],
            ),
            (
                "transaction_type",
                &[
                    r"Transaction Type\s*:\s*([A-Z][A-Z ]+)",
                    r"Transaction Type\s*\|\s*:\s*\|\s*([A-Z][A-Z ]+)",
                ],
            ),
            (
                "charge",
                &[
                    r"Charge\s*:\s*([\d,]+(?:\.\d{2})?)\s*ETB",
                    r"Charge\s*\|\s*:\s*\|\s*([\d,]+(?:\.\d{2})?)\s*ETB",
                ],
            ),
            (
                "branch",
                &[
                    r"Branch\s*:\s*([A-Z][A-Z ]+)",
                    r"Branch\s*\|\s*:\s*\|\s*([A-Z][A-Z ]+)",
                ],
            ),
        ]);

        Self { patterns }
    }
}

impl Default for AwashExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl BankExtractor for AwashExtractor {
    fn bank_name(&self) -> &str {
        BANK_NAME
    }

    fn can_handle(&self, url: &str, text: &str) -> bool {
        let url = url.to_lowercase();
        let text = text.to_lowercase();

        url.contains("awashpay.awashbank.com")
            || text.contains("awash bank")
            || (text.contains("transaction time") && text.contains("beneficiary"))
    }

    fn extract(&self, text: &str, url: &str) -> TransactionRecord {
        debug!("[{}] Extracting from text length: {}", BANK_NAME, text.len());

        let mut fields = self.patterns.extract_all(text, BANK_NAME);

        // Receipt bodies sometimes omit the id; the Awash URL carries
        // it as a dash-delimited token.
        if !fields.contains_key("transaction_id") && !url.is_empty() {
            if let Some(caps) = AWASH_URL_ID.captures(url) {
                debug!("[{}] Found transaction ID in URL: {}", BANK_NAME, &caps[1]);
                fields.insert("transaction_id", caps[1].to_string());
            }
        }

        TransactionRecord {
            transaction_id: fields.remove("transaction_id"),
            amount: fields
                .remove("amount")
                .and_then(|raw| normalize_amount(&raw)),
            date: fields.remove("date"),
            payer_name: fields.remove("payer_name"),
            receiver: fields.remove("receiver"),
            account: fields.remove("sender_account"),
            receiver_account: fields.remove("receiver_account"),
            receiver_bank: fields.remove("receiver_bank"),
            transaction_type: fields.remove("transaction_type"),
            charge: fields.remove("charge"),
            branch: fields.remove("branch"),
            payment_method: Some("Bank Transfer".to_string()),
            status: Some("Completed".to_string()),
            extractor_used: BANK_NAME.to_string(),
            raw_text: text.to_string(),
            ..Default::default()
        }
        .validated()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    const PIPE_TABLE_RECEIPT: &str = "\
Awash Bank Share Company
| Transaction ID | : | E43406CDD679 |
| Amount | : | 1,000 ETB |
| Charge | : | 5.00 ETB |
| Transaction Time | : | 2025-01-15 10:30:45 |
| Sender Name | : | ABEBE KEBEDE |
| Beneficiary name | : | ALMAZ TESFAYE |
| Sender Account | : | 0134**8765 |
| Beneficiary Account | : | 01320987654 |
| Beneficiary Bank | : | DASHEN |
| Transaction Type | : | TRANSFER |
| Branch | : | BOLE |
";

    #[test]
    fn test_can_handle_url_and_text() {
        let extractor = AwashExtractor::new();
        assert!(extractor.can_handle("https://awashpay.awashbank.com:8225/-ABC-", ""));
        assert!(extractor.can_handle("", "receipt from Awash Bank Share Company"));
        assert!(extractor.can_handle("", "Transaction Time: x\nBeneficiary: y"));
        assert!(!extractor.can_handle("https://example.com", "hello world"));
    }

    #[test]
    fn test_extract_pipe_table() {
        let extractor = AwashExtractor::new();
        let record = extractor.extract(
            PIPE_TABLE_RECEIPT,
            "https://awashpay.awashbank.com:8225/-E43406CDD679-2CQJIP",
        );

        assert!(record.is_valid);
        assert_eq!(record.extractor_used, "Awash Bank");
        assert_eq!(record.transaction_id.as_deref(), Some("E43406CDD679"));
        assert_eq!(record.amount.as_deref(), Some("1000"));
        assert_eq!(record.charge.as_deref(), Some("5.00"));
        assert_eq!(record.payer_name.as_deref(), Some("ABEBE KEBEDE"));
        assert_eq!(record.receiver.as_deref(), Some("ALMAZ TESFAYE"));
        assert_eq!(record.account.as_deref(), Some("0134**8765"));
        assert_eq!(record.receiver_account.as_deref(), Some("01320987654"));
        assert_eq!(record.receiver_bank.as_deref(), Some("DASHEN"));
        assert_eq!(record.transaction_type.as_deref(), Some("TRANSFER"));
        assert_eq!(record.branch.as_deref(), Some("BOLE"));
    }

    #[test]
    fn test_extract_colon_layout() {
        let extractor = AwashExtractor::new();
        let text = "Awash Bank\nTransaction ID: ABCD1234EF\nAmount: 2,500.50 ETB\n";
        let record = extractor.extract(text, "");

        assert!(record.is_valid);
        assert_eq!(record.transaction_id.as_deref(), Some("ABCD1234EF"));
        assert_eq!(record.amount.as_deref(), Some("2500.50"));
    }

    #[test]
    fn test_transaction_id_recovered_from_url() {
        let extractor = AwashExtractor::new();
        let text = "Awash Bank\nAmount: 300 ETB\n";
        let record = extractor.extract(
            text,
            "https://awashpay.awashbank.com:8225/-E43406CDD679-2CQJIP",
        );

        assert!(record.is_valid);
        assert_eq!(record.transaction_id.as_deref(), Some("E43406CDD679"));
    }
}
