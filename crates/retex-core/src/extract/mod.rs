//! Rule-based transaction field extraction.
//!
//! Each supported bank gets one extractor bound to that bank's receipt
//! layout; the [`ExtractorManager`] probes them in priority order and
//! falls back to the [`GenericExtractor`] for layouts it has never
//! seen. Patterns are declarative data compiled once at construction:
//! adding a bank means adding pattern lists plus at most a small
//! URL-fallback rule, not new control flow.

mod awash;
mod cbe;
mod generic;
mod manager;
pub mod patterns;

pub use awash::AwashExtractor;
pub use cbe::CbeExtractor;
pub use generic::GenericExtractor;
pub use manager::ExtractorManager;

use std::collections::HashMap;
use std::str::FromStr;

use regex::Regex;
use rust_decimal::Decimal;
use tracing::debug;

use crate::models::record::TransactionRecord;

/// A bank-specific extraction strategy.
///
/// `can_handle` must be cheap and side-effect-free: the manager may
/// probe several extractors per request. An extractor that claims a
/// document always returns a structured record, valid or not; it
/// never raises for a fully-handled document.
pub trait BankExtractor: Send + Sync {
    /// Human-readable bank name identifying this extractor.
    fn bank_name(&self) -> &str;

    /// Admissibility test from URL shape and/or text content.
    fn can_handle(&self, url: &str, text: &str) -> bool;

    /// Run the field pattern set over `text` and produce a record.
    fn extract(&self, text: &str, url: &str) -> TransactionRecord;
}

/// Per-extractor mapping of semantic field name to an ordered list of
/// pattern rules. Ordering is significant: the first rule that matches
/// wins for that field. Immutable once built.
pub struct FieldPatterns {
    fields: Vec<(&'static str, Vec<Regex>)>,
}

impl FieldPatterns {
    /// Compile a pattern set from declarative data. Patterns are
    /// matched case-insensitively with per-line `^`/`$` anchoring.
    ///
    /// Panics on an invalid pattern; pattern sets are static data and
    /// a bad rule is a programming error.
    pub fn compile(table: &[(&'static str, &[&str])]) -> Self {
        let fields = table
            .iter()
            .map(|(name, rules)| {
                let compiled = rules
                    .iter()
                    .map(|rule| {
                        Regex::new(&format!("(?im){}", rule))
                            .unwrap_or_else(|e| panic!("invalid pattern for {}: {}", name, e))
                    })
                    .collect();
                (*name, compiled)
            })
            .collect();
        Self { fields }
    }

    /// Extract every declared field independently; fields never
    /// influence each other's matches. Missing fields are omitted.
    pub fn extract_all(&self, text: &str, bank_name: &str) -> HashMap<&'static str, String> {
        let mut extracted = HashMap::new();
        for (field_name, rules) in &self.fields {
            if let Some(value) = extract_field(text, rules) {
                debug!("[{}] Found {}: {}", bank_name, field_name, value);
                extracted.insert(*field_name, value);
            }
        }
        extracted
    }
}

/// Try each pattern in order and return the first capturing-group
/// match, trimmed of surrounding whitespace.
pub fn extract_field(text: &str, rules: &[Regex]) -> Option<String> {
    for rule in rules {
        if let Some(caps) = rule.captures(text) {
            if let Some(group) = caps.get(1) {
                let value = group.as_str().trim();
                if !value.is_empty() {
                    return Some(value.to_string());
                }
            }
        }
    }
    None
}

/// Normalize a raw amount string: strip thousands separators and keep
/// the decimal point. A value that does not parse as a decimal after
/// cleanup is treated as not extracted.
pub fn normalize_amount(raw: &str) -> Option<String> {
    let cleaned = raw.replace(',', "");
    Decimal::from_str(&cleaned).ok()?;
    Some(cleaned)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_extract_field_first_match_wins() {
        let rules = vec![
            Regex::new(r"(?im)Amount\s*:\s*(\d+)").unwrap(),
            Regex::new(r"(?im)(\d+)\s*ETB").unwrap(),
        ];
        // Both rules would match; the first in order wins.
        assert_eq!(
            extract_field("Amount: 500\n750 ETB", &rules),
            Some("500".to_string())
        );
        // First rule misses, second catches.
        assert_eq!(
            extract_field("You sent 750 ETB", &rules),
            Some("750".to_string())
        );
        assert_eq!(extract_field("nothing here", &rules), None);
    }

    #[test]
    fn test_extract_field_case_insensitive_multiline() {
        let rules = vec![Regex::new(r"(?im)^ref:\s*([A-Z0-9]+)$").unwrap()];
        assert_eq!(
            extract_field("line one\nREF: AB12CD34\nline three", &rules),
            Some("AB12CD34".to_string())
        );
    }

    #[test]
    fn test_normalize_amount() {
        assert_eq!(normalize_amount("1,234.56"), Some("1234.56".to_string()));
        assert_eq!(normalize_amount("1,000"), Some("1000".to_string()));
        assert_eq!(normalize_amount("500.00"), Some("500.00".to_string()));
        assert_eq!(normalize_amount("not a number"), None);
    }

    #[test]
    fn test_field_patterns_independent_fields() {
        let patterns = FieldPatterns::compile(&[
            ("transaction_id", &[r"ID\s*:\s*([A-Z0-9]+)"]),
            ("amount", &[r"([\d,]+)\s*ETB"]),
        ]);
        let fields = patterns.extract_all("ID: XYZ987\nTotal 2,500 ETB", "Test Bank");
        assert_eq!(fields.get("transaction_id").map(String::as_str), Some("XYZ987"));
        assert_eq!(fields.get("amount").map(String::as_str), Some("2,500"));
    }
}
