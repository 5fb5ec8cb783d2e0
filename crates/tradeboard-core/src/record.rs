//! Trade records as held in the working set.
//!
//! A [`TradeRecord`] is one observation of an instrument on a calendar
//! date. Records are created by the data source (the backend assigns
//! `id`); the view-model only reads them, or replaces / removes them
//! after the data source confirms a mutation.
//!
//! [`NewTrade`] is the same shape without `id`: what the add form
//! produces and what gets submitted for creation.

use std::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Server-assigned record identifier.
pub type TradeId = i64;

/// A single trade record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TradeRecord {
    pub id: TradeId,
    pub trade_code: String,
    #[serde(with = "iso_date")]
    pub date: NaiveDate,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
    pub volume: u64,
}

/// A validated record that has not been assigned an `id` yet.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewTrade {
    pub trade_code: String,
    #[serde(with = "iso_date")]
    pub date: NaiveDate,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
    pub volume: u64,
}

impl NewTrade {
    /// Attach an identifier, producing a full record.
    pub fn with_id(self, id: TradeId) -> TradeRecord {
        TradeRecord {
            id,
            trade_code: self.trade_code,
            date: self.date,
            open: self.open,
            high: self.high,
            low: self.low,
            close: self.close,
            volume: self.volume,
        }
    }
}

impl TradeRecord {
    /// `YYYY-MM-DD` label used by the table and the charts.
    pub fn date_label(&self) -> String {
        self.date.format(iso_date::FORMAT).to_string()
    }

    /// Read one of the four price fields.
    pub fn price(&self, field: PriceField) -> f64 {
        match field {
            PriceField::Open => self.open,
            PriceField::High => self.high,
            PriceField::Low => self.low,
            PriceField::Close => self.close,
        }
    }
}

/// The four price columns of a record.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum PriceField {
    Open,
    High,
    Low,
    Close,
}

impl PriceField {
    /// Validation order of the add/edit form.
    pub const ALL: [PriceField; 4] = [
        PriceField::Open,
        PriceField::High,
        PriceField::Low,
        PriceField::Close,
    ];

    pub fn name(self) -> &'static str {
        match self {
            PriceField::Open => "open",
            PriceField::High => "high",
            PriceField::Low => "low",
            PriceField::Close => "close",
        }
    }
}

impl fmt::Display for PriceField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// `YYYY-MM-DD` (de)serialization for record dates.
///
/// Backends that store a timestamp column send `2024-01-02T00:00:00`;
/// anything after the `T` is dropped on input.
pub mod iso_date {
    use chrono::NaiveDate;
    use serde::{de, Deserialize, Deserializer, Serializer};

    pub const FORMAT: &str = "%Y-%m-%d";

    /// Parse a calendar date, ignoring a trailing time component.
    pub fn parse(raw: &str) -> Option<NaiveDate> {
        let raw = raw.trim();
        let day = raw.split_once('T').map_or(raw, |(day, _)| day);
        NaiveDate::parse_from_str(day, FORMAT).ok()
    }

    pub fn serialize<S>(date: &NaiveDate, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_str(&date.format(FORMAT))
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<NaiveDate, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        parse(&raw).ok_or_else(|| de::Error::custom(format!("invalid date: {raw:?}")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_plain_and_timestamped_dates() {
        let expected = NaiveDate::from_ymd_opt(2024, 1, 2);
        assert_eq!(iso_date::parse("2024-01-02"), expected);
        assert_eq!(iso_date::parse(" 2024-01-02T00:00:00 "), expected);
        assert_eq!(iso_date::parse("2024-02-30"), None);
        assert_eq!(iso_date::parse(""), None);
    }

    #[test]
    fn new_trade_keeps_fields_when_id_attached() {
        let trade = NewTrade {
            trade_code: "ACI".to_string(),
            date: NaiveDate::from_ymd_opt(2020, 8, 10).unwrap(),
            open: 1.0,
            high: 2.0,
            low: 0.5,
            close: 1.5,
            volume: 42,
        };
        let record = trade.with_id(7);
        assert_eq!(record.id, 7);
        assert_eq!(record.trade_code, "ACI");
        assert_eq!(record.date_label(), "2020-08-10");
        assert_eq!(record.price(PriceField::Low), 0.5);
    }
}
