use chrono::{DateTime, Utc};
use core_types::{LiveData, Trade, TradeColumn};
use rust_decimal::Decimal;
use serde::Serialize;

/// The headline values before any percentage is derived.
///
/// Missing inputs are already defaulted to zero here.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LatestValues {
    pub portfolio_value: Decimal,
    pub buyhold_value: Decimal,
    pub total_trades: u64,
    pub winning_trades: u64,
    pub losing_trades: u64,
}

/// Where the headline values come from.
#[derive(Debug, Clone, PartialEq)]
pub enum LatestSource {
    /// Neither a time series nor a summary: nothing to render.
    Empty,
    /// The last row of the portfolio time series.
    FromSeries(LatestValues),
    /// The run summary, used only when the time series is empty.
    FromSummary(LatestValues),
}

impl LatestSource {
    pub fn resolve(data: &LiveData) -> Self {
        if let Some(last) = data.portfolio.latest() {
            return LatestSource::FromSeries(LatestValues {
                portfolio_value: last.portfolio_value.unwrap_or_default(),
                buyhold_value: last.buyhold_value.unwrap_or_default(),
                total_trades: last.total_trades.unwrap_or_default(),
                winning_trades: last.winning_trades.unwrap_or_default(),
                losing_trades: last.losing_trades.unwrap_or_default(),
            });
        }

        match &data.summary {
            Some(summary) => LatestSource::FromSummary(LatestValues {
                portfolio_value: summary.final_portfolio_value.unwrap_or_default(),
                buyhold_value: summary.final_buyhold_value.unwrap_or_default(),
                total_trades: summary.total_trades.unwrap_or_default(),
                winning_trades: summary.winning_trades.unwrap_or_default(),
                losing_trades: summary.losing_trades.unwrap_or_default(),
            }),
            None => LatestSource::Empty,
        }
    }
}

/// Serializable tag for the non-empty [`LatestSource`] variants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum MetricsSource {
    Series,
    Summary,
}

/// The five header scalars and the values they were derived from.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HeaderMetrics {
    pub source: MetricsSource,
    pub initial_capital: Decimal,
    pub portfolio_value: Decimal,
    pub buyhold_value: Decimal,
    pub total_trades: u64,
    pub winning_trades: u64,
    pub losing_trades: u64,
    pub total_return_pct: Decimal,
    pub buyhold_return_pct: Decimal,
    pub alpha_pct: Decimal,
    pub win_rate_pct: Decimal,
}

/// Descriptive run information taken from the summary.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SessionInfo {
    /// The first 19 characters of `start_time`, or `N/A`.
    pub start_time: String,
    pub total_steps: u64,
    pub duration_seconds: u64,
}

/// One row of the per-row return series.
///
/// `None` marks a cell that was empty in the source table, so charts can leave
/// a gap instead of plotting a fabricated zero.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReturnPoint {
    pub timestamp: Option<DateTime<Utc>>,
    pub portfolio_value: Option<Decimal>,
    pub buyhold_value: Option<Decimal>,
    pub return_pct: Option<Decimal>,
    pub bh_return_pct: Option<Decimal>,
    pub alpha_pct: Option<Decimal>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct PerformanceSeries {
    pub points: Vec<ReturnPoint>,
    /// Whether the benchmark column existed; without it `bh_return_pct` is 0.
    pub has_buyhold: bool,
    /// Every point has a timestamp. When false, charts plot against row position.
    pub timed: bool,
}

impl PerformanceSeries {
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FrequencyCount {
    pub label: String,
    pub count: u64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct TradeSummary {
    /// Number of rows in the trade log.
    pub logged: usize,
    pub columns: Vec<TradeColumn>,
    /// The most recent trades by file order, newest timestamp first.
    pub recent: Vec<Trade>,
    /// `None` when the log has no `symbol` column.
    pub by_symbol: Option<Vec<FrequencyCount>>,
    /// `None` when the log has no `side` column.
    pub by_side: Option<Vec<FrequencyCount>>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DashboardData {
    pub header: HeaderMetrics,
    pub session: Option<SessionInfo>,
    pub series: PerformanceSeries,
    pub trades: TradeSummary,
}

/// The derived state handed to a presentation layer.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", content = "data", rename_all = "snake_case")]
pub enum Dashboard {
    /// Nothing has been written yet; render a placeholder and stop.
    NoData,
    Ready(Box<DashboardData>),
}

impl Dashboard {
    pub fn is_no_data(&self) -> bool {
        matches!(self, Dashboard::NoData)
    }

    pub fn data(&self) -> Option<&DashboardData> {
        match self {
            Dashboard::NoData => None,
            Dashboard::Ready(data) => Some(data),
        }
    }
}
