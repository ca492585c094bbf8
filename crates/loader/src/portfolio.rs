use crate::error::LoadError;
use crate::table::CsvTable;
use core_types::{PortfolioHistory, PortfolioSnapshot};
use std::io::Read;

/// Parses `portfolio_history.csv`. Columns other than the six known ones are ignored.
pub fn parse_portfolio<R: Read>(reader: R) -> Result<PortfolioHistory, LoadError> {
    let table = CsvTable::from_reader(reader)?;

    let snapshots = (0..table.len())
        .map(|row| {
            Ok(PortfolioSnapshot {
                timestamp: table.timestamp(row, "timestamp")?,
                portfolio_value: table.decimal(row, "portfolio_value")?,
                buyhold_value: table.decimal(row, "buyhold_value")?,
                total_trades: table.count(row, "total_trades")?,
                winning_trades: table.count(row, "winning_trades")?,
                losing_trades: table.count(row, "losing_trades")?,
            })
        })
        .collect::<Result<Vec<_>, LoadError>>()?;

    Ok(PortfolioHistory {
        snapshots,
        has_buyhold: table.has_column("buyhold_value"),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn parses_full_rows_in_file_order() {
        let csv = "\
timestamp,portfolio_value,buyhold_value,total_trades,winning_trades,losing_trades,cash
2024-05-01 00:00:00,10000,10000,0,0,0,10000
2024-05-01 01:00:00,10120.5,10050,2,1,1,4000
";
        let history = parse_portfolio(csv.as_bytes()).unwrap();
        assert_eq!(history.len(), 2);
        assert!(history.has_buyhold);

        let latest = history.latest().unwrap();
        assert_eq!(latest.portfolio_value, Some(dec!(10120.5)));
        assert_eq!(latest.buyhold_value, Some(dec!(10050)));
        assert_eq!(latest.total_trades, Some(2));
        assert!(latest.timestamp.is_some());
    }

    #[test]
    fn missing_buyhold_column_is_recorded() {
        let csv = "timestamp,portfolio_value\n2024-05-01,10000\n";
        let history = parse_portfolio(csv.as_bytes()).unwrap();
        assert!(!history.has_buyhold);
        assert_eq!(history.snapshots[0].buyhold_value, None);
        assert_eq!(history.snapshots[0].total_trades, None);
    }

    #[test]
    fn bad_timestamp_rejects_the_table() {
        let csv = "timestamp,portfolio_value\nnot-a-time,10000\n";
        assert!(parse_portfolio(csv.as_bytes()).is_err());
    }
}
