//! Display-ready text for the derived metrics, shared by every presentation surface.

use crate::dashboard::{HeaderMetrics, SessionInfo};
use crate::format;
use core_types::{Trade, TradeColumn};
use rust_decimal::Decimal;
use serde::Serialize;

pub const NO_DATA_MESSAGE: &str = "No live trading data available yet. Check back soon.";

pub const DISCLAIMER: &str = "This dashboard shows simulated paper trading results. \
Past performance does not guarantee future results. \
Not financial advice. For research and educational purposes only.";

/// Direction of a card's delta line, read from its leading sign.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Trend {
    Up,
    Down,
}

impl Trend {
    fn of(delta: &str) -> Self {
        if delta.starts_with('-') {
            Trend::Down
        } else {
            Trend::Up
        }
    }
}

/// One of the five header metric cards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HeaderCard {
    pub label: &'static str,
    pub value: String,
    pub delta: String,
    pub trend: Trend,
}

impl HeaderCard {
    fn new(label: &'static str, value: String, delta: String) -> Self {
        let trend = Trend::of(&delta);
        Self {
            label,
            value,
            delta,
            trend,
        }
    }
}

/// Builds the header cards in display order. `logged_trades` is the length of
/// the trade log, shown under the cumulative trade count.
pub fn header_cards(header: &HeaderMetrics, logged_trades: usize) -> [HeaderCard; 5] {
    [
        HeaderCard::new(
            "Portfolio Value",
            format::usd(header.portfolio_value),
            format::signed_pct(header.total_return_pct),
        ),
        HeaderCard::new(
            "Buy & Hold",
            format::usd(header.buyhold_value),
            format::signed_pct(header.buyhold_return_pct),
        ),
        HeaderCard::new(
            "Alpha",
            format::signed_pct(header.alpha_pct),
            "vs Buy & Hold".to_string(),
        ),
        HeaderCard::new(
            "Win Rate",
            format::pct(header.win_rate_pct, 1),
            format!("{}W / {}L", header.winning_trades, header.losing_trades),
        ),
        HeaderCard::new(
            "Total Trades",
            header.total_trades.to_string(),
            format!("{logged_trades} logged"),
        ),
    ]
}

pub fn session_caption(session: &SessionInfo) -> String {
    format!(
        "Session started: {}  |  Steps: {}  |  Duration: {}",
        session.start_time,
        session.total_steps,
        format::duration(session.duration_seconds)
    )
}

/// Annotation for the initial-capital reference line.
pub fn initial_capital_label(initial_capital: Decimal) -> String {
    format!("Initial ({})", format::usd_whole(initial_capital))
}

/// Text for one cell of the recent-trades table. Empty cells render as `-`.
pub fn trade_cell(trade: &Trade, column: TradeColumn) -> String {
    let text = match column {
        TradeColumn::Timestamp => trade
            .timestamp
            .map(|ts| ts.format("%Y-%m-%d %H:%M:%S").to_string()),
        TradeColumn::Symbol => trade.symbol.clone(),
        TradeColumn::Side => trade.side.clone(),
        TradeColumn::Quantity => trade.quantity.map(|d| d.to_string()),
        TradeColumn::Price => trade.price.map(|d| d.to_string()),
        TradeColumn::ValueUsd => trade.value_usd.map(|d| d.to_string()),
        TradeColumn::Fee => trade.fee.map(|d| d.to_string()),
    };
    text.unwrap_or_else(|| "-".to_string())
}
