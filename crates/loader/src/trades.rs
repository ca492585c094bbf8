use crate::error::LoadError;
use crate::table::CsvTable;
use core_types::{Trade, TradeColumn, TradeLog};
use std::io::Read;

/// Parses `trades.csv`. Any subset of the known columns may be present.
pub fn parse_trades<R: Read>(reader: R) -> Result<TradeLog, LoadError> {
    let table = CsvTable::from_reader(reader)?;

    let columns = TradeColumn::ALL
        .into_iter()
        .filter(|c| table.has_column(c.as_str()))
        .collect();

    let trades = (0..table.len())
        .map(|row| {
            Ok(Trade {
                timestamp: table.timestamp(row, "timestamp")?,
                symbol: table.text(row, "symbol").map(str::to_string),
                side: table.text(row, "side").map(str::to_string),
                quantity: table.decimal(row, "quantity")?,
                price: table.decimal(row, "price")?,
                value_usd: table.decimal(row, "value_usd")?,
                fee: table.decimal(row, "fee")?,
            })
        })
        .collect::<Result<Vec<_>, LoadError>>()?;

    Ok(TradeLog { trades, columns })
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn records_available_columns_in_display_order() {
        let csv = "price,symbol,note\n101.5,BTC,first\n";
        let log = parse_trades(csv.as_bytes()).unwrap();
        assert_eq!(log.columns, vec![TradeColumn::Symbol, TradeColumn::Price]);
        assert_eq!(log.trades[0].symbol.as_deref(), Some("BTC"));
        assert_eq!(log.trades[0].price, Some(dec!(101.5)));
        assert_eq!(log.trades[0].side, None);
    }

    #[test]
    fn side_is_kept_verbatim() {
        let csv = "side\nBUY\nshort\n";
        let log = parse_trades(csv.as_bytes()).unwrap();
        let sides: Vec<_> = log.trades.iter().map(|t| t.side.clone()).collect();
        assert_eq!(sides, vec![Some("BUY".to_string()), Some("short".to_string())]);
    }

    #[test]
    fn unparsable_cells_reject_the_whole_log() {
        let bad_price = "timestamp,symbol,price\n2024-05-01,BTC,60000\n2024-05-01,ETH,abc\n";
        assert!(matches!(
            parse_trades(bad_price.as_bytes()),
            Err(LoadError::InvalidValue { ref column, row: 1, .. }) if column == "price"
        ));

        let bad_timestamp = "timestamp,symbol\nyesterday,BTC\n";
        assert!(matches!(
            parse_trades(bad_timestamp.as_bytes()),
            Err(LoadError::InvalidValue { ref column, row: 0, .. }) if column == "timestamp"
        ));
    }

    #[test]
    fn ragged_rows_are_a_csv_error() {
        let csv = "symbol,side\nBTC,buy\nETH\n";
        assert!(matches!(parse_trades(csv.as_bytes()), Err(LoadError::Csv(_))));
    }
}
