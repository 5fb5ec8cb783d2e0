// crates/tradeboard-protocol/src/dataset.rs

//! Lenient trade-record decoding.
//!
//! Datasets in the wild are not as tidy as the API:
//!
//! - numeric fields may be JSON numbers or strings (`"13.5"`)
//! - volume strings may carry thousands separators (`"2,285,416"`)
//! - `id` may be missing, in which case the 1-based row position is used
//! - dates may be full timestamps; only the date part is kept
//!
//! Both the JSON and the CSV paths normalise into a [`TextRow`] first and
//! share one conversion into [`TradeRecord`].

use std::collections::HashSet;
use std::path::Path;

use serde::Deserialize;

use tradeboard_core::form::{parse_price, parse_volume};
use tradeboard_core::record::iso_date;
use tradeboard_core::{TradeId, TradeRecord};

use crate::csv_codec;
use crate::error::ProtocolError;

/// On-disk dataset encodings.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum DatasetFormat {
    Json,
    Csv,
}

impl DatasetFormat {
    /// Pick the format from the file extension (case-insensitive).
    pub fn from_path(path: &Path) -> Result<Self, ProtocolError> {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_ascii_lowercase)
            .unwrap_or_default();
        match ext.as_str() {
            "json" => Ok(DatasetFormat::Json),
            "csv" => Ok(DatasetFormat::Csv),
            _ => Err(ProtocolError::UnsupportedFormat(path.display().to_string())),
        }
    }
}

/// Decode a whole dataset.
///
/// Missing ids are filled with the row position; ids must end up unique.
pub fn parse_dataset(text: &str, format: DatasetFormat) -> Result<Vec<TradeRecord>, ProtocolError> {
    let rows = match format {
        DatasetFormat::Json => json_rows(text)?,
        DatasetFormat::Csv => csv_codec::read_rows(text)?,
    };
    finish_rows(rows, true)
}

/// A JSON value that may be a number or a string.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub(crate) enum Scalar {
    Number(serde_json::Number),
    Text(String),
}

impl Scalar {
    fn into_text(self) -> String {
        match self {
            Scalar::Number(n) => n.to_string(),
            Scalar::Text(s) => s,
        }
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct JsonRow {
    #[serde(default)]
    id: Option<Scalar>,
    trade_code: Scalar,
    date: String,
    open: Scalar,
    high: Scalar,
    low: Scalar,
    close: Scalar,
    volume: Scalar,
}

impl From<JsonRow> for TextRow {
    fn from(row: JsonRow) -> Self {
        TextRow {
            id: row.id.map(Scalar::into_text),
            trade_code: row.trade_code.into_text(),
            date: row.date,
            open: row.open.into_text(),
            high: row.high.into_text(),
            low: row.low.into_text(),
            close: row.close.into_text(),
            volume: row.volume.into_text(),
        }
    }
}

/// Every field as text, before validation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub(crate) struct TextRow {
    pub id: Option<String>,
    pub trade_code: String,
    pub date: String,
    pub open: String,
    pub high: String,
    pub low: String,
    pub close: String,
    pub volume: String,
}

impl TextRow {
    /// Convert one row; `row` is its 1-based position.
    ///
    /// Without `assign_ids`, a missing id is an error.
    fn into_record(self, row: usize, assign_ids: bool) -> Result<TradeRecord, ProtocolError> {
        let invalid = |field: &'static str, value: &str| ProtocolError::InvalidField {
            row,
            field,
            value: value.to_string(),
        };

        let id = match self.id.as_deref().map(str::trim).filter(|s| !s.is_empty()) {
            Some(raw) => parse_id(raw).ok_or_else(|| invalid("id", raw))?,
            None if assign_ids => row as TradeId,
            None => return Err(ProtocolError::MissingField { row, field: "id" }),
        };

        let trade_code = self.trade_code.trim().to_string();
        if trade_code.is_empty() {
            return Err(ProtocolError::MissingField {
                row,
                field: "trade_code",
            });
        }

        let date = iso_date::parse(&self.date).ok_or_else(|| invalid("date", &self.date))?;
        let price = |field: &'static str, raw: &str| parse_price(raw).ok_or_else(|| invalid(field, raw));
        let open = price("open", &self.open)?;
        let high = price("high", &self.high)?;
        let low = price("low", &self.low)?;
        let close = price("close", &self.close)?;

        let volume = parse_volume(&self.volume.replace(',', ""))
            .ok_or_else(|| invalid("volume", &self.volume))?;

        Ok(TradeRecord {
            id,
            trade_code,
            date,
            open,
            high,
            low,
            close,
            volume,
        })
    }
}

fn parse_id(raw: &str) -> Option<TradeId> {
    raw.parse::<TradeId>().ok().or_else(|| {
        let v = raw.parse::<f64>().ok()?;
        (v.is_finite() && v.fract() == 0.0).then_some(v as TradeId)
    })
}

pub(crate) fn json_rows(text: &str) -> Result<Vec<TextRow>, ProtocolError> {
    let rows: Vec<JsonRow> = serde_json::from_str(text)?;
    Ok(rows.into_iter().map(TextRow::from).collect())
}

pub(crate) fn json_row(text: &str) -> Result<TextRow, ProtocolError> {
    let row: JsonRow = serde_json::from_str(text)?;
    Ok(row.into())
}

/// Validate rows in order and reject duplicate ids.
pub(crate) fn finish_rows(rows: Vec<TextRow>, assign_ids: bool) -> Result<Vec<TradeRecord>, ProtocolError> {
    let mut seen = HashSet::with_capacity(rows.len());
    let mut records = Vec::with_capacity(rows.len());
    for (idx, row) in rows.into_iter().enumerate() {
        let record = row.into_record(idx + 1, assign_ids)?;
        if !seen.insert(record.id) {
            return Err(ProtocolError::DuplicateId(record.id));
        }
        records.push(record);
    }
    Ok(records)
}

pub(crate) fn finish_row(row: TextRow) -> Result<TradeRecord, ProtocolError> {
    row.into_record(1, false)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn string_numbers_and_grouped_volume() {
        let text = r#"[
            {"date":"2020-08-10","trade_code":"1JANATAMF","high":"4.3","low":"4.1","open":"4.2","close":"4.1","volume":"2,285,416"},
            {"date":"2020-08-10","trade_code":"1STPRIMFMF","high":17.5,"low":16.4,"open":16.5,"close":17.3,"volume":1009}
        ]"#;
        let records = parse_dataset(text, DatasetFormat::Json).unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].id, 1);
        assert_eq!(records[0].volume, 2_285_416);
        assert_eq!(records[0].high, 4.3);
        assert_eq!(records[1].id, 2);
        assert_eq!(records[1].close, 17.3);
    }

    #[test]
    fn explicit_ids_are_kept_and_must_be_unique() {
        let row = |id: i64| {
            format!(
                r#"{{"id":{id},"date":"2024-01-01","trade_code":"X","high":1,"low":1,"open":1,"close":1,"volume":1}}"#
            )
        };
        let text = format!("[{},{}]", row(7), row(3));
        let ids: Vec<_> = parse_dataset(&text, DatasetFormat::Json)
            .unwrap()
            .iter()
            .map(|r| r.id)
            .collect();
        assert_eq!(ids, vec![7, 3]);

        let text = format!("[{},{}]", row(7), row(7));
        assert!(matches!(
            parse_dataset(&text, DatasetFormat::Json),
            Err(ProtocolError::DuplicateId(7))
        ));
    }

    #[test]
    fn bad_field_names_row_and_field() {
        let text = r#"[{"date":"2024-13-01","trade_code":"X","high":1,"low":1,"open":1,"close":1,"volume":1}]"#;
        let err = parse_dataset(text, DatasetFormat::Json).unwrap_err();
        assert!(matches!(
            err,
            ProtocolError::InvalidField { row: 1, field: "date", .. }
        ));
    }

    #[test]
    fn timestamps_keep_date_part() {
        let text = r#"[{"date":"2024-02-03T00:00:00+00:00","trade_code":"X","high":1,"low":1,"open":1,"close":1,"volume":"12.0"}]"#;
        let records = parse_dataset(text, DatasetFormat::Json).unwrap();
        assert_eq!(records[0].date_label(), "2024-02-03");
        assert_eq!(records[0].volume, 12);
    }

    #[test]
    fn format_from_extension() {
        assert_eq!(
            DatasetFormat::from_path(Path::new("data/Stock.JSON")).unwrap(),
            DatasetFormat::Json
        );
        assert_eq!(
            DatasetFormat::from_path(Path::new("trades.csv")).unwrap(),
            DatasetFormat::Csv
        );
        assert!(DatasetFormat::from_path(Path::new("trades.xlsx")).is_err());
    }
}
