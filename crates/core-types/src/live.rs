use crate::{PortfolioHistory, RunSummary, TradeLog};
use serde::{Deserialize, Serialize};

/// Everything read from the live data directory in one pass.
///
/// Each part is loaded independently; an empty series or a missing summary
/// means that artifact was absent or could not be parsed.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LiveData {
    pub portfolio: PortfolioHistory,
    pub trades: TradeLog,
    pub summary: Option<RunSummary>,
}

impl LiveData {
    /// True when there is neither a time series nor a summary to show.
    pub fn has_no_data(&self) -> bool {
        self.portfolio.is_empty() && self.summary.is_none()
    }
}
