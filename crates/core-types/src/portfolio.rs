use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// One row of the portfolio time series.
///
/// Counts are cumulative as of `timestamp`. The producer does not guarantee
/// `winning_trades + losing_trades <= total_trades` and nothing here checks it.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PortfolioSnapshot {
    pub timestamp: Option<DateTime<Utc>>,
    pub portfolio_value: Option<Decimal>,
    pub buyhold_value: Option<Decimal>,
    pub total_trades: Option<u64>,
    pub winning_trades: Option<u64>,
    pub losing_trades: Option<u64>,
}

/// The full portfolio time series, in file order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PortfolioHistory {
    pub snapshots: Vec<PortfolioSnapshot>,
    /// Whether the source table had a `buyhold_value` column at all.
    pub has_buyhold: bool,
}

impl PortfolioHistory {
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.snapshots.is_empty()
    }

    pub fn len(&self) -> usize {
        self.snapshots.len()
    }

    /// The last snapshot by sequence order. The file is assumed to already be
    /// time-ordered, so timestamps are not compared.
    pub fn latest(&self) -> Option<&PortfolioSnapshot> {
        self.snapshots.last()
    }
}
