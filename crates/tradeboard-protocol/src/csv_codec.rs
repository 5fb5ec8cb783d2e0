// crates/tradeboard-protocol/src/csv_codec.rs

//! CSV datasets and exports.
//!
//! Input: a header row naming the columns, in any order:
//!
//! `id?, date, trade_code, high, low, open, close, volume`
//!
//! `id` is optional; header names are matched case-insensitively and
//! cells are trimmed. Values get the same leniency as JSON datasets.
//!
//! Output ([`write_records_csv`]): a fixed header
//! `id,trade_code,date,open,high,low,close,volume`, one record per line.

use csv::{ReaderBuilder, StringRecord, Trim, WriterBuilder};

use tradeboard_core::TradeRecord;

use crate::dataset::{finish_rows, TextRow};
use crate::error::ProtocolError;

/// Column order of exported files.
pub const EXPORT_HEADER: [&str; 8] = [
    "id",
    "trade_code",
    "date",
    "open",
    "high",
    "low",
    "close",
    "volume",
];

/// Decode a CSV dataset into records.
pub fn read_records_csv(text: &str) -> Result<Vec<TradeRecord>, ProtocolError> {
    finish_rows(read_rows(text)?, true)
}

/// Positions of each known column in the header.
struct Columns {
    id: Option<usize>,
    trade_code: usize,
    date: usize,
    open: usize,
    high: usize,
    low: usize,
    close: usize,
    volume: usize,
}

impl Columns {
    fn from_header(header: &StringRecord) -> Result<Self, ProtocolError> {
        let find = |name: &str| {
            header
                .iter()
                .position(|h| h.trim().eq_ignore_ascii_case(name))
        };
        let require = |name: &'static str| {
            find(name).ok_or(ProtocolError::MissingField {
                row: 0,
                field: name,
            })
        };
        Ok(Columns {
            id: find("id"),
            trade_code: require("trade_code")?,
            date: require("date")?,
            open: require("open")?,
            high: require("high")?,
            low: require("low")?,
            close: require("close")?,
            volume: require("volume")?,
        })
    }

    fn row(&self, record: &StringRecord) -> TextRow {
        let cell = |idx: usize| record.get(idx).unwrap_or_default().to_string();
        TextRow {
            id: self.id.map(cell),
            trade_code: cell(self.trade_code),
            date: cell(self.date),
            open: cell(self.open),
            high: cell(self.high),
            low: cell(self.low),
            close: cell(self.close),
            volume: cell(self.volume),
        }
    }
}

pub(crate) fn read_rows(text: &str) -> Result<Vec<TextRow>, ProtocolError> {
    let mut reader = ReaderBuilder::new()
        .trim(Trim::All)
        .flexible(true)
        .from_reader(text.as_bytes());

    let columns = Columns::from_header(reader.headers()?)?;

    let mut rows = Vec::new();
    for record in reader.records() {
        let record = record?;
        if record.iter().all(|c| c.is_empty()) {
            continue;
        }
        rows.push(columns.row(&record));
    }
    Ok(rows)
}

/// Encode records as CSV text, header first.
pub fn write_records_csv<'a, I>(records: I) -> Result<String, ProtocolError>
where
    I: IntoIterator<Item = &'a TradeRecord>,
{
    let mut writer = WriterBuilder::new().from_writer(Vec::new());
    writer.write_record(EXPORT_HEADER)?;
    for r in records {
        writer.write_record([
            r.id.to_string(),
            r.trade_code.clone(),
            r.date_label(),
            r.open.to_string(),
            r.high.to_string(),
            r.low.to_string(),
            r.close.to_string(),
            r.volume.to_string(),
        ])?;
    }
    let bytes = writer
        .into_inner()
        .map_err(|e| ProtocolError::Csv(e.into_error().into()))?;
    Ok(String::from_utf8_lossy(&bytes).into_owned())
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = "\
date,trade_code,high,low,open,close,volume
2020-08-10,1JANATAMF,4.3,4.1,4.2,4.1,\"2,285,416\"
2020-08-10, 1STPRIMFMF ,17.5,16.4,16.5,17.3,1009

";

    #[test]
    fn reads_any_column_order_without_ids() {
        let records = read_records_csv(SAMPLE).unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].id, 1);
        assert_eq!(records[0].volume, 2_285_416);
        assert_eq!(records[1].trade_code, "1STPRIMFMF");
        assert_eq!(records[1].open, 16.5);
    }

    #[test]
    fn missing_column_is_reported() {
        let err = read_records_csv("date,trade_code,high,low,open,close\n").unwrap_err();
        assert!(matches!(
            err,
            ProtocolError::MissingField { field: "volume", .. }
        ));
    }

    #[test]
    fn export_has_fixed_header_and_reads_back() {
        let records = read_records_csv(SAMPLE).unwrap();
        let text = write_records_csv(&records).unwrap();
        assert!(text.starts_with("id,trade_code,date,open,high,low,close,volume\n"));
        assert!(text.contains("1,1JANATAMF,2020-08-10,4.2,4.3,4.1,4.1,2285416"));
        assert_eq!(read_records_csv(&text).unwrap(), records);
    }
}
