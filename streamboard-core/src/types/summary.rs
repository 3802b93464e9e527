//! Derived per-stream summary numbers.

use serde::{Deserialize, Serialize};

use crate::constants::TOKEN_UNIT;

/// Converts a raw integer amount (smallest token unit) to whole tokens.
pub fn to_whole_tokens(raw: u128) -> f64 {
    raw as f64 / TOKEN_UNIT
}

/// Derived numbers for one stream: total capacity and fill percentage.
///
/// Computed from two contract reads and memoized in the summary cache;
/// never persisted anywhere else.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct StreamSummary {
    /// Total capacity in whole tokens.
    pub cap: f64,
    /// Current balance as a percentage of cap (0-100, may exceed 100).
    ///
    /// Non-finite when cap is zero; use [`StreamSummary::known_percent`]
    /// before displaying.
    pub percent: f64,
}

impl StreamSummary {
    /// Derives a summary from raw cap and balance amounts.
    ///
    /// A zero cap yields a non-finite percent, which consumers must treat
    /// as "unknown".
    pub fn from_raw(cap_raw: u128, balance_raw: u128) -> Self {
        let cap = to_whole_tokens(cap_raw);
        let percent = (to_whole_tokens(balance_raw) / cap) * 100.0;
        Self { cap, percent }
    }

    /// The percent if it is a finite number, else `None` ("unknown").
    pub fn known_percent(&self) -> Option<f64> {
        self.percent.is_finite().then_some(self.percent)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::RAW_PER_TOKEN;

    #[test]
    fn test_quarter_filled() {
        let summary = StreamSummary::from_raw(1000, 250);
        assert!((summary.percent - 25.0).abs() < 1e-9);
        assert_eq!(summary.known_percent(), Some(summary.percent));
    }

    #[test]
    fn test_whole_token_conversion() {
        let summary = StreamSummary::from_raw(RAW_PER_TOKEN, RAW_PER_TOKEN / 2);
        assert!((summary.cap - 1.0).abs() < 1e-12);
        assert!((summary.percent - 50.0).abs() < 1e-9);
    }

    #[test]
    fn test_zero_cap_is_unknown() {
        let summary = StreamSummary::from_raw(0, 250);
        assert!(!summary.percent.is_finite());
        assert_eq!(summary.known_percent(), None);

        // Zero over zero is NaN, also unknown
        let empty = StreamSummary::from_raw(0, 0);
        assert_eq!(empty.known_percent(), None);
    }

    #[test]
    fn test_percent_may_exceed_hundred() {
        let summary = StreamSummary::from_raw(1000, 1500);
        assert!((summary.percent - 150.0).abs() < 1e-9);
        assert_eq!(summary.known_percent(), Some(summary.percent));
    }
}
