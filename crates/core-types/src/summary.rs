use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

/// Baseline used for every percentage when no summary provides one.
pub const DEFAULT_INITIAL_CAPITAL: Decimal = dec!(10000);

/// The scalar run summary written alongside the time series.
///
/// The `final_*` values and the counts are only consulted when the time series
/// is empty. `start_time`, `duration_seconds` and `total_steps` are descriptive.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RunSummary {
    pub initial_capital: Option<Decimal>,
    pub final_portfolio_value: Option<Decimal>,
    pub final_buyhold_value: Option<Decimal>,
    pub total_trades: Option<u64>,
    pub winning_trades: Option<u64>,
    pub losing_trades: Option<u64>,
    pub start_time: Option<String>,
    pub duration_seconds: Option<Decimal>,
    pub total_steps: Option<u64>,
}

impl RunSummary {
    /// The capital baseline, falling back to [`DEFAULT_INITIAL_CAPITAL`] when the
    /// field is missing. Non-positive values are returned as-is; callers treat
    /// them as "no usable denominator".
    pub fn initial_capital_or_default(&self) -> Decimal {
        self.initial_capital.unwrap_or(DEFAULT_INITIAL_CAPITAL)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_fields_deserialize_as_none() {
        let summary: RunSummary =
            serde_json::from_str(r#"{"initial_capital": 5000, "total_trades": 3}"#).unwrap();
        assert_eq!(summary.initial_capital, Some(dec!(5000)));
        assert_eq!(summary.total_trades, Some(3));
        assert_eq!(summary.final_portfolio_value, None);
        assert_eq!(summary.start_time, None);
    }

    #[test]
    fn initial_capital_defaults_to_ten_thousand() {
        assert_eq!(
            RunSummary::default().initial_capital_or_default(),
            dec!(10000)
        );
    }

    #[test]
    fn unknown_fields_are_ignored() {
        let summary: RunSummary =
            serde_json::from_str(r#"{"strategy": "momentum", "total_steps": 120}"#).unwrap();
        assert_eq!(summary.total_steps, Some(120));
    }
}
