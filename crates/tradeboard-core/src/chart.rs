//! Chart series derived from the working set.
//!
//! - [`price_volume_series`]: close + volume of one instrument, daily
//!   or aggregated per month / year.
//! - [`comparison_series`]: daily open/high/low/close of two
//!   instruments over the union of their dates.
//!
//! Charts always read the whole working set; the table filter does not
//! apply to them.

use std::collections::BTreeMap;

use chrono::{Datelike, NaiveDate};
use indexmap::IndexMap;

use crate::record::{PriceField, TradeRecord};
use crate::time_frame::{GroupOrder, TimeFrame};

/// One point of the price & volume chart.
#[derive(Debug, Clone, PartialEq)]
pub struct SeriesPoint {
    /// `YYYY-MM-DD`, `YYYY-MM` or `YYYY` depending on the time-frame.
    pub label: String,
    pub close: f64,
    pub volume: u64,
}

/// Aligned close and volume series.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct PriceVolumeSeries {
    pub points: Vec<SeriesPoint>,
}

impl PriceVolumeSeries {
    pub fn labels(&self) -> Vec<&str> {
        self.points.iter().map(|p| p.label.as_str()).collect()
    }

    pub fn closes(&self) -> Vec<f64> {
        self.points.iter().map(|p| p.close).collect()
    }

    pub fn volumes(&self) -> Vec<u64> {
        self.points.iter().map(|p| p.volume).collect()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }
}

/// Calendar bucket used for month / year aggregation.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
enum Period {
    Month { year: i32, month: u32 },
    Year(i32),
}

impl Period {
    fn of(date: NaiveDate, frame: TimeFrame) -> Self {
        match frame {
            TimeFrame::Year => Period::Year(date.year()),
            _ => Period::Month {
                year: date.year(),
                month: date.month(),
            },
        }
    }

    fn label(self) -> String {
        match self {
            Period::Month { year, month } => format!("{year:04}-{month:02}"),
            Period::Year(year) => format!("{year:04}"),
        }
    }
}

#[derive(Debug, Default)]
struct Bucket {
    close_sum: f64,
    volume: u64,
    count: usize,
}

/// Daily close/volume of `code`, ascending by date.
///
/// Records sharing a date keep their working-set order.
pub fn daily_series(records: &[TradeRecord], code: &str) -> PriceVolumeSeries {
    let mut rows: Vec<&TradeRecord> = records.iter().filter(|r| r.trade_code == code).collect();
    rows.sort_by_key(|r| r.date);

    PriceVolumeSeries {
        points: rows
            .into_iter()
            .map(|r| SeriesPoint {
                label: r.date_label(),
                close: r.close,
                volume: r.volume,
            })
            .collect(),
    }
}

/// Close/volume of `code` at the requested granularity.
///
/// Month and year points carry the mean close and the summed volume of
/// their member days.
pub fn price_volume_series(
    records: &[TradeRecord],
    code: &str,
    frame: TimeFrame,
    order: GroupOrder,
) -> PriceVolumeSeries {
    if frame == TimeFrame::Day {
        return daily_series(records, code);
    }

    let mut buckets: IndexMap<Period, Bucket> = IndexMap::new();
    for r in records.iter().filter(|r| r.trade_code == code) {
        let bucket = buckets.entry(Period::of(r.date, frame)).or_default();
        bucket.close_sum += r.close;
        bucket.volume = bucket.volume.saturating_add(r.volume);
        bucket.count += 1;
    }

    if order == GroupOrder::Chronological {
        buckets.sort_keys();
    }

    PriceVolumeSeries {
        points: buckets
            .into_iter()
            .map(|(period, bucket)| SeriesPoint {
                label: period.label(),
                close: bucket.close_sum / bucket.count as f64,
                volume: bucket.volume,
            })
            .collect(),
    }
}

/// Open/high/low/close of one record.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Ohlc {
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
}

impl Ohlc {
    pub fn get(&self, field: PriceField) -> f64 {
        match field {
            PriceField::Open => self.open,
            PriceField::High => self.high,
            PriceField::Low => self.low,
            PriceField::Close => self.close,
        }
    }
}

impl From<&TradeRecord> for Ohlc {
    fn from(r: &TradeRecord) -> Self {
        Ohlc {
            open: r.open,
            high: r.high,
            low: r.low,
            close: r.close,
        }
    }
}

/// One date of the comparison chart. `None` marks a missing value.
#[derive(Debug, Clone, PartialEq)]
pub struct ComparisonPoint {
    pub date: NaiveDate,
    pub a: Option<Ohlc>,
    pub b: Option<Ohlc>,
}

/// Two instruments overlaid on a shared date axis.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ComparisonSeries {
    pub code_a: String,
    pub code_b: String,
    pub points: Vec<ComparisonPoint>,
}

impl ComparisonSeries {
    pub fn labels(&self) -> Vec<String> {
        self.points
            .iter()
            .map(|p| p.date.format(crate::record::iso_date::FORMAT).to_string())
            .collect()
    }

    /// Values of one field of instrument A, aligned with [`labels`](Self::labels).
    pub fn values_a(&self, field: PriceField) -> Vec<Option<f64>> {
        self.points
            .iter()
            .map(|p| p.a.map(|v| v.get(field)))
            .collect()
    }

    /// Values of one field of instrument B, aligned with [`labels`](Self::labels).
    pub fn values_b(&self, field: PriceField) -> Vec<Option<f64>> {
        self.points
            .iter()
            .map(|p| p.b.map(|v| v.get(field)))
            .collect()
    }
}

/// Daily OHLC of `code_a` and `code_b` over the union of their dates.
///
/// Dates are ascending. When an instrument has several records on one
/// date, the first one in the working set wins. No interpolation.
pub fn comparison_series(records: &[TradeRecord], code_a: &str, code_b: &str) -> ComparisonSeries {
    let mut by_date: BTreeMap<NaiveDate, (Option<Ohlc>, Option<Ohlc>)> = BTreeMap::new();

    for r in records {
        let is_a = r.trade_code == code_a;
        let is_b = r.trade_code == code_b;
        if !is_a && !is_b {
            continue;
        }
        let slot = by_date.entry(r.date).or_default();
        if is_a && slot.0.is_none() {
            slot.0 = Some(Ohlc::from(r));
        }
        if is_b && slot.1.is_none() {
            slot.1 = Some(Ohlc::from(r));
        }
    }

    ComparisonSeries {
        code_a: code_a.to_string(),
        code_b: code_b.to_string(),
        points: by_date
            .into_iter()
            .map(|(date, (a, b))| ComparisonPoint { date, a, b })
            .collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(id: i64, code: &str, date: &str, close: f64, volume: u64) -> TradeRecord {
        TradeRecord {
            id,
            trade_code: code.to_string(),
            date: crate::record::iso_date::parse(date).unwrap(),
            open: close - 1.0,
            high: close + 1.0,
            low: close - 2.0,
            close,
            volume,
        }
    }

    #[test]
    fn daily_series_sorts_by_date_and_ignores_other_codes() {
        let records = vec![
            record(1, "FOO", "2024-01-03", 30.0, 3),
            record(2, "BAR", "2024-01-01", 99.0, 9),
            record(3, "FOO", "2024-01-01", 10.0, 1),
        ];
        let series = daily_series(&records, "FOO");
        assert_eq!(series.labels(), vec!["2024-01-01", "2024-01-03"]);
        assert_eq!(series.closes(), vec![10.0, 30.0]);
        assert_eq!(series.volumes(), vec![1, 3]);
    }

    #[test]
    fn monthly_mean_close_and_summed_volume() {
        let records = vec![
            record(1, "FOO", "2024-01-01", 10.0, 100),
            record(2, "FOO", "2024-01-15", 20.0, 200),
            record(3, "FOO", "2024-01-31", 30.0, 300),
        ];
        let series = price_volume_series(&records, "FOO", TimeFrame::Month, GroupOrder::Chronological);
        assert_eq!(series.len(), 1);
        assert_eq!(series.points[0].label, "2024-01");
        assert_eq!(series.points[0].close, 20.0);
        assert_eq!(series.points[0].volume, 600);
    }

    #[test]
    fn group_order_chronological_vs_first_seen() {
        let records = vec![
            record(1, "FOO", "2023-06-01", 5.0, 1),
            record(2, "FOO", "2021-02-01", 7.0, 1),
            record(3, "FOO", "2022-09-01", 9.0, 1),
            record(4, "FOO", "2021-03-01", 9.0, 1),
        ];
        let chrono = price_volume_series(&records, "FOO", TimeFrame::Year, GroupOrder::Chronological);
        assert_eq!(chrono.labels(), vec!["2021", "2022", "2023"]);
        assert_eq!(chrono.closes(), vec![8.0, 9.0, 5.0]);

        let first_seen = price_volume_series(&records, "FOO", TimeFrame::Year, GroupOrder::FirstSeen);
        assert_eq!(first_seen.labels(), vec!["2023", "2021", "2022"]);
    }

    #[test]
    fn comparison_marks_missing_dates() {
        let records = vec![
            record(1, "A", "2024-01-02", 10.0, 1),
            record(2, "B", "2024-01-01", 20.0, 1),
            record(3, "A", "2024-01-01", 11.0, 1),
            record(4, "B", "2024-01-03", 21.0, 1),
        ];
        let series = comparison_series(&records, "A", "B");
        assert_eq!(series.labels(), vec!["2024-01-01", "2024-01-02", "2024-01-03"]);
        assert_eq!(
            series.values_a(PriceField::Close),
            vec![Some(11.0), Some(10.0), None]
        );
        assert_eq!(
            series.values_b(PriceField::Close),
            vec![Some(20.0), None, Some(21.0)]
        );
        assert_eq!(series.values_a(PriceField::High)[0], Some(12.0));
    }

    #[test]
    fn comparison_first_record_wins_on_duplicate_dates() {
        let records = vec![
            record(1, "A", "2024-01-01", 10.0, 1),
            record(2, "A", "2024-01-01", 99.0, 1),
        ];
        let series = comparison_series(&records, "A", "A");
        assert_eq!(series.points.len(), 1);
        assert_eq!(series.points[0].a.map(|o| o.close), Some(10.0));
        assert_eq!(series.points[0].b.map(|o| o.close), Some(10.0));
    }
}
