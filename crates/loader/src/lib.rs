//! # Evolutis Live Data Loader
//!
//! Reads the three artifacts the paper-trading process drops into the live data
//! directory and bundles them into a [`LiveData`].
//!
//! ## Failure Policy
//!
//! Each artifact is loaded on its own. A missing file is "absent"; a file that
//! cannot be read or parsed (including one caught mid-write) is logged and also
//! treated as absent. The parsers return `Result<_, LoadError>` and
//! [`LiveDataLoader`] is the single place those results are collapsed, so no
//! error ever reaches the caller.

pub mod error;
pub mod portfolio;
pub mod summary;
pub mod table;
pub mod timestamp;
pub mod trades;

pub use error::LoadError;
pub use portfolio::parse_portfolio;
pub use summary::parse_summary;
pub use trades::parse_trades;

use core_types::{LiveData, PortfolioHistory, RunSummary, TradeLog};
use std::fs::File;
use std::io::{self, BufReader};
use std::path::{Path, PathBuf};

pub const PORTFOLIO_FILE: &str = "portfolio_history.csv";
pub const TRADES_FILE: &str = "trades.csv";
pub const SUMMARY_FILE: &str = "summary.json";

/// Loads the live artifacts from one directory. Holds no state besides the path,
/// so every call re-reads what is currently on disk.
#[derive(Debug, Clone)]
pub struct LiveDataLoader {
    data_dir: PathBuf,
}

impl LiveDataLoader {
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
        }
    }

    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    /// Loads all three artifacts independently.
    pub fn load(&self) -> LiveData {
        let data = LiveData {
            portfolio: self.load_portfolio(),
            trades: self.load_trades(),
            summary: self.load_summary(),
        };

        tracing::debug!(
            data_dir = %self.data_dir.display(),
            snapshots = data.portfolio.len(),
            trades = data.trades.len(),
            has_summary = data.summary.is_some(),
            "Loaded live data."
        );

        data
    }

    pub fn load_portfolio(&self) -> PortfolioHistory {
        load_artifact(&self.data_dir.join(PORTFOLIO_FILE), parse_portfolio)
            .unwrap_or_else(PortfolioHistory::empty)
    }

    pub fn load_trades(&self) -> TradeLog {
        load_artifact(&self.data_dir.join(TRADES_FILE), parse_trades)
            .unwrap_or_else(TradeLog::empty)
    }

    pub fn load_summary(&self) -> Option<RunSummary> {
        load_artifact(&self.data_dir.join(SUMMARY_FILE), parse_summary).flatten()
    }
}

/// Convenience wrapper for a one-off load.
pub fn load_live_data(data_dir: impl AsRef<Path>) -> LiveData {
    LiveDataLoader::new(data_dir.as_ref()).load()
}

/// Opens and parses one artifact, collapsing every failure to `None`.
fn load_artifact<T>(
    path: &Path,
    parse: impl FnOnce(BufReader<File>) -> Result<T, LoadError>,
) -> Option<T> {
    let file = match File::open(path) {
        Ok(file) => file,
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            tracing::debug!(path = %path.display(), "Artifact not present.");
            return None;
        }
        Err(e) => {
            tracing::warn!(
                path = %path.display(),
                error = %LoadError::Io(e),
                "Artifact unreadable; treating it as absent."
            );
            return None;
        }
    };

    match parse(BufReader::new(file)) {
        Ok(value) => Some(value),
        Err(e) => {
            tracing::warn!(
                path = %path.display(),
                error = %e,
                "Artifact could not be parsed; treating it as absent."
            );
            None
        }
    }
}
