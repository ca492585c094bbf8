use crate::error::LoadError;
use crate::timestamp::parse_timestamp;
use chrono::{DateTime, Utc};
use csv::{ReaderBuilder, StringRecord, Trim};
use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;
use std::io::Read;
use std::str::FromStr;

/// A header-addressed CSV table with typed cell accessors.
///
/// Every accessor returns `Ok(None)` for an absent column or an empty cell and
/// an error for a cell that is present but not of the expected type.
#[derive(Debug)]
pub struct CsvTable {
    headers: StringRecord,
    rows: Vec<StringRecord>,
}

impl CsvTable {
    /// Reads the whole table. A row whose field count differs from the header
    /// (typically a partially written last line) fails the read.
    pub fn from_reader<R: Read>(reader: R) -> Result<Self, LoadError> {
        let mut rdr = ReaderBuilder::new()
            .has_headers(true)
            .trim(Trim::All)
            .from_reader(reader);

        let headers = rdr.headers()?.clone();
        let rows = rdr.records().collect::<Result<Vec<_>, _>>()?;

        Ok(Self { headers, rows })
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn has_column(&self, name: &str) -> bool {
        self.column_index(name).is_some()
    }

    fn column_index(&self, name: &str) -> Option<usize> {
        self.headers.iter().position(|h| h == name)
    }

    /// The raw cell text, `None` when the column is absent or the cell is empty.
    pub fn text(&self, row: usize, column: &str) -> Option<&str> {
        let index = self.column_index(column)?;
        let value = self.rows.get(row)?.get(index)?;
        if is_missing(value) { None } else { Some(value) }
    }

    pub fn decimal(&self, row: usize, column: &str) -> Result<Option<Decimal>, LoadError> {
        self.text(row, column)
            .map(|raw| parse_decimal(raw).ok_or_else(|| invalid(column, row, raw)))
            .transpose()
    }

    /// A non-negative integer count. Integral decimals such as `12.0` are accepted.
    pub fn count(&self, row: usize, column: &str) -> Result<Option<u64>, LoadError> {
        self.text(row, column)
            .map(|raw| parse_count(raw).ok_or_else(|| invalid(column, row, raw)))
            .transpose()
    }

    pub fn timestamp(
        &self,
        row: usize,
        column: &str,
    ) -> Result<Option<DateTime<Utc>>, LoadError> {
        self.text(row, column)
            .map(|raw| parse_timestamp(raw).ok_or_else(|| invalid(column, row, raw)))
            .transpose()
    }
}

/// Empty cells and the `NaN` spelling some tabular writers use for them.
fn is_missing(value: &str) -> bool {
    value.is_empty() || value.eq_ignore_ascii_case("nan")
}

fn parse_decimal(raw: &str) -> Option<Decimal> {
    Decimal::from_str(raw)
        .or_else(|_| Decimal::from_scientific(raw))
        .ok()
}

fn parse_count(raw: &str) -> Option<u64> {
    if let Ok(n) = raw.parse::<u64>() {
        return Some(n);
    }
    let value = parse_decimal(raw)?;
    if (value.is_sign_negative() && !value.is_zero()) || !value.fract().is_zero() {
        return None;
    }
    value.to_u64()
}

fn invalid(column: &str, row: usize, raw: &str) -> LoadError {
    LoadError::InvalidValue {
        column: column.to_string(),
        row,
        value: raw.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn table(csv: &str) -> CsvTable {
        CsvTable::from_reader(csv.as_bytes()).unwrap()
    }

    #[test]
    fn reads_cells_by_header_name() {
        let t = table("a,b\n1.5,x\n");
        assert_eq!(t.len(), 1);
        assert_eq!(t.decimal(0, "a").unwrap(), Some(dec!(1.5)));
        assert_eq!(t.text(0, "b"), Some("x"));
        assert_eq!(t.text(0, "missing"), None);
    }

    #[test]
    fn empty_and_nan_cells_are_missing() {
        let t = table("a,b\n,NaN\n");
        assert_eq!(t.decimal(0, "a").unwrap(), None);
        assert_eq!(t.decimal(0, "b").unwrap(), None);
    }

    #[test]
    fn non_numeric_cell_is_an_error() {
        let t = table("a\nabc\n");
        assert!(matches!(
            t.decimal(0, "a"),
            Err(LoadError::InvalidValue { row: 0, .. })
        ));
    }

    #[test]
    fn counts_accept_integral_floats_only() {
        let t = table("n\n12.0\n3.5\n-1\n7\n");
        assert_eq!(t.count(0, "n").unwrap(), Some(12));
        assert!(t.count(1, "n").is_err());
        assert!(t.count(2, "n").is_err());
        assert_eq!(t.count(3, "n").unwrap(), Some(7));
    }

    #[test]
    fn scientific_notation_is_accepted() {
        let t = table("v\n1.05e4\n");
        assert_eq!(t.decimal(0, "v").unwrap(), Some(dec!(10500)));
    }

    #[test]
    fn ragged_rows_fail_the_whole_table() {
        assert!(CsvTable::from_reader("a,b\n1,2\n3\n".as_bytes()).is_err());
    }

    #[test]
    fn header_only_and_zero_byte_inputs_are_empty() {
        assert!(table("a,b\n").is_empty());
        assert!(table("").is_empty());
    }
}
