//! Stream reference and view-model types.

use serde::{Deserialize, Serialize};

use crate::error::{Result, StreamboardError};
use crate::types::StreamSummary;

/// Returns true if `s` is a 0x-prefixed, 40-hex-digit Ethereum address.
pub fn is_hex_address(s: &str) -> bool {
    let Some(body) = s.strip_prefix("0x").or_else(|| s.strip_prefix("0X")) else {
        return false;
    };
    body.len() == 40 && body.bytes().all(|b| b.is_ascii_hexdigit())
}

// ═══════════════════════════════════════════════════════════════════════════════
// STREAM REFERENCE
// ═══════════════════════════════════════════════════════════════════════════════

/// Identifies one deployed stream contract and its parties.
///
/// References are supplied by the indexer (or any [`crate::traits::StreamIndex`])
/// and are immutable; Streamboard never mutates them, only decorates them with
/// derived summaries.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct StreamReference {
    /// Stream contract address (0x-prefixed).
    pub address: String,
    /// Address that created the stream.
    pub owner: String,
    /// Address the stream releases tokens to.
    pub recipient: String,
}

impl StreamReference {
    /// Creates a new stream reference.
    pub fn new(
        address: impl Into<String>,
        owner: impl Into<String>,
        recipient: impl Into<String>,
    ) -> Self {
        Self {
            address: address.into(),
            owner: owner.into(),
            recipient: recipient.into(),
        }
    }

    /// Validates the reference's address fields.
    pub fn validate(&self) -> Result<()> {
        for (field, value) in [
            ("address", &self.address),
            ("owner", &self.owner),
            ("recipient", &self.recipient),
        ] {
            if !is_hex_address(value) {
                return Err(StreamboardError::InvalidAddress(format!(
                    "{field}: {value}"
                )));
            }
        }
        Ok(())
    }
}

// ═══════════════════════════════════════════════════════════════════════════════
// STREAM VIEW
// ═══════════════════════════════════════════════════════════════════════════════

/// One element of the published view model: a reference plus its summary.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct StreamView {
    /// Stream contract address (0x-prefixed).
    pub address: String,
    /// Address that created the stream.
    pub owner: String,
    /// Address the stream releases tokens to.
    pub recipient: String,
    /// Total capacity in whole tokens.
    pub cap: f64,
    /// Balance as a percentage of cap; non-finite when cap is zero.
    pub percent: f64,
}

impl StreamView {
    /// Merges a reference with its resolved summary.
    pub fn new(reference: StreamReference, summary: StreamSummary) -> Self {
        Self {
            address: reference.address,
            owner: reference.owner,
            recipient: reference.recipient,
            cap: summary.cap,
            percent: summary.percent,
        }
    }

    /// The percent if it is a finite number, else `None` ("unknown").
    ///
    /// Rendering layers must go through this; a non-finite percent is never
    /// displayed as a number.
    pub fn known_percent(&self) -> Option<f64> {
        self.percent.is_finite().then_some(self.percent)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    const ADDR_A: &str = "0x1111111111111111111111111111111111111111";
    const ADDR_B: &str = "0x2222222222222222222222222222222222222222";
    const ADDR_C: &str = "0x3333333333333333333333333333333333333333";

    #[test_case("0x1111111111111111111111111111111111111111", true; "lowercase hex")]
    #[test_case("0xAbCdEf1234567890aBcDeF1234567890abCDef12", true; "mixed case hex")]
    #[test_case("1111111111111111111111111111111111111111", false; "missing prefix")]
    #[test_case("0x1111", false; "too short")]
    #[test_case("0xzz11111111111111111111111111111111111111", false; "non hex digits")]
    #[test_case("", false; "empty")]
    fn test_is_hex_address(input: &str, expected: bool) {
        assert_eq!(is_hex_address(input), expected);
    }

    #[test]
    fn test_reference_validate() {
        let valid = StreamReference::new(ADDR_A, ADDR_B, ADDR_C);
        assert!(valid.validate().is_ok());

        let invalid = StreamReference::new("not-an-address", ADDR_B, ADDR_C);
        assert!(matches!(
            invalid.validate(),
            Err(crate::error::StreamboardError::InvalidAddress(_))
        ));
    }

    #[test]
    fn test_view_merges_reference_and_summary() {
        let reference = StreamReference::new(ADDR_A, ADDR_B, ADDR_C);
        let summary = StreamSummary {
            cap: 10.0,
            percent: 42.5,
        };

        let view = StreamView::new(reference, summary);
        assert_eq!(view.address, ADDR_A);
        assert_eq!(view.owner, ADDR_B);
        assert_eq!(view.recipient, ADDR_C);
        assert_eq!(view.cap, 10.0);
        assert_eq!(view.known_percent(), Some(42.5));
    }

    #[test]
    fn test_view_unknown_percent() {
        let reference = StreamReference::new(ADDR_A, ADDR_B, ADDR_C);
        let summary = StreamSummary::from_raw(0, 250);

        let view = StreamView::new(reference, summary);
        assert_eq!(view.known_percent(), None);
    }
}
