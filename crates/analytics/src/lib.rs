//! # Evolutis Analytics
//!
//! Turns a loaded [`core_types::LiveData`] bundle into presentation-ready numbers.
//!
//! ## Architectural Principles
//!
//! - **Pure Logic:** No I/O. The `MetricsDeriver` takes the bundle by reference
//!   and returns a [`Dashboard`], so two passes over the same data give the
//!   same result.
//! - **One Baseline:** Every percentage uses the same `initial_capital`
//!   denominator. A non-positive denominator yields 0 instead of a division.
//! - **Explicit Fallback:** The "last row, else summary, else nothing" choice
//!   is the [`LatestSource`] enum, matched exhaustively.
//!
//! ## Public API
//!
//! - `MetricsDeriver`: builds the `Dashboard` state.
//! - `Dashboard` / `DashboardData`: the derived state consumed by both the web
//!   page and the terminal report.
//! - `format` and `view`: shared display formatting.

pub mod dashboard;
pub mod deriver;
pub mod format;
pub mod view;

pub use dashboard::{
    Dashboard, DashboardData, FrequencyCount, HeaderMetrics, LatestSource, LatestValues,
    MetricsSource, PerformanceSeries, ReturnPoint, SessionInfo, TradeSummary,
};
pub use deriver::{
    DEFAULT_RECENT_TRADES, MetricsDeriver, alpha_pct, frequency_counts, recent_trades,
    return_pct, win_rate_pct,
};
