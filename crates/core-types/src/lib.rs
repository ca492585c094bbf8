//! # Evolutis Core Types
//!
//! The shared vocabulary of the dashboard: the three artifacts written by the
//! external paper-trading process and the bundle that carries them from the
//! loader to the deriver.
//!
//! Every field that comes from an external file is optional. The producer is a
//! separate process that may lag behind or be mid-write, so "no value" is a
//! normal state rather than an error.

pub mod live;
pub mod portfolio;
pub mod summary;
pub mod trade;

// Re-export the core types to provide a clean public API.
pub use live::LiveData;
pub use portfolio::{PortfolioHistory, PortfolioSnapshot};
pub use summary::{DEFAULT_INITIAL_CAPITAL, RunSummary};
pub use trade::{Trade, TradeColumn, TradeLog};
