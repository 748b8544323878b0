//! Shared regex patterns for transaction extraction.

use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    /// Awash receipt URLs embed the transaction code between dashes,
    /// e.g. `/-E43406CDD679-2CQJIP`.
    pub static ref AWASH_URL_ID: Regex = Regex::new(r"-([A-Z0-9]+)-").unwrap();

    /// CBE receipt URLs carry the reference as a query parameter,
    /// e.g. `?id=FT252528MLNG86227914`.
    pub static ref CBE_URL_ID: Regex = Regex::new(r"id=([A-Z0-9]+)").unwrap();
}

/// Keyword indicators used by the generic fallback's admissibility
/// test. At least [`GENERIC_MIN_INDICATORS`] must appear (anywhere,
/// case-insensitive) for the fallback to claim a document.
pub const GENERIC_INDICATORS: [&str; 5] = ["transaction", "amount", "etb", "bank", "transfer"];

/// Minimum indicator count for the generic fallback.
pub const GENERIC_MIN_INDICATORS: usize = 2;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_awash_url_id() {
        let caps = AWASH_URL_ID
            .captures("https://awashpay.awashbank.com:8225/-E43406CDD679-2CQJIP")
            .unwrap();
        assert_eq!(&caps[1], "E43406CDD679");
    }

    #[test]
    fn test_cbe_url_id() {
        let caps = CBE_URL_ID
            .captures("https://apps.cbe.com.et:100/?id=FT252528MLNG86227914")
            .unwrap();
        assert_eq!(&caps[1], "FT252528MLNG86227914");
    }
}
