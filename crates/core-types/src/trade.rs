use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A single executed trade from the append-only log.
///
/// `side` is kept as the producer wrote it (usually `buy` or `sell`), not
/// narrowed to an enum, so an unexpected value still shows up in the
/// distribution instead of failing the whole log.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Trade {
    pub timestamp: Option<DateTime<Utc>>,
    pub symbol: Option<String>,
    pub side: Option<String>,
    pub quantity: Option<Decimal>,
    pub price: Option<Decimal>,
    pub value_usd: Option<Decimal>,
    pub fee: Option<Decimal>,
}

/// The known trade-log columns, in display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TradeColumn {
    Timestamp,
    Symbol,
    Side,
    Quantity,
    Price,
    ValueUsd,
    Fee,
}

impl TradeColumn {
    pub const ALL: [TradeColumn; 7] = [
        TradeColumn::Timestamp,
        TradeColumn::Symbol,
        TradeColumn::Side,
        TradeColumn::Quantity,
        TradeColumn::Price,
        TradeColumn::ValueUsd,
        TradeColumn::Fee,
    ];

    /// The header name used in `trades.csv`.
    pub fn as_str(&self) -> &'static str {
        match self {
            TradeColumn::Timestamp => "timestamp",
            TradeColumn::Symbol => "symbol",
            TradeColumn::Side => "side",
            TradeColumn::Quantity => "quantity",
            TradeColumn::Price => "price",
            TradeColumn::ValueUsd => "value_usd",
            TradeColumn::Fee => "fee",
        }
    }

    /// Looks up a column by its exact header name.
    pub fn from_header(header: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|c| c.as_str() == header)
    }
}

/// The trade log plus the subset of known columns that were present in the file.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TradeLog {
    pub trades: Vec<Trade>,
    /// Present columns, always in [`TradeColumn::ALL`] order.
    pub columns: Vec<TradeColumn>,
}

impl TradeLog {
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.trades.is_empty()
    }

    pub fn len(&self) -> usize {
        self.trades.len()
    }

    pub fn has_column(&self, column: TradeColumn) -> bool {
        self.columns.contains(&column)
    }
}
