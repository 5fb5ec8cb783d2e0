//! Filter → sort → paginate over the working set.
//!
//! Everything here is a pure recomputation from a record slice and a
//! [`ViewState`]; nothing is cached between calls. Rows are borrowed
//! from the working set, so a projection is cheap to rebuild on every
//! frame.

use indexmap::IndexSet;

use crate::record::TradeRecord;
use crate::view_state::{SortState, ViewState, PAGE_SIZE};

/// Render-ready table page.
#[derive(Debug, Clone, PartialEq)]
pub struct TableView<'a> {
    /// Rows of the current page, in display order.
    pub rows: Vec<&'a TradeRecord>,
    /// 1-based page actually shown (already clamped).
    pub page_index: usize,
    pub total_pages: usize,
    /// Number of records that passed the filter.
    pub filtered_count: usize,
    /// Size of the working set.
    pub total_count: usize,
}

/// Number of pages needed for `count` rows; never less than 1.
pub fn total_pages(count: usize) -> usize {
    count.div_ceil(PAGE_SIZE).max(1)
}

/// Keep the records whose trade code equals `code` exactly.
///
/// An empty `code` keeps everything. Relative order is preserved.
pub fn filter_records<'a>(records: &'a [TradeRecord], code: &str) -> Vec<&'a TradeRecord> {
    records
        .iter()
        .filter(|r| code.is_empty() || r.trade_code == code)
        .collect()
}

/// Stable sort by the given column; `None` leaves the order alone.
pub fn sort_records(rows: &mut [&TradeRecord], sort: Option<SortState>) {
    if let Some(SortState { column, direction }) = sort {
        rows.sort_by(|a, b| direction.apply(column.compare(a, b)));
    }
}

/// Rows of a 1-based page. Out-of-range pages yield an empty slice.
pub fn page_slice<T>(rows: &[T], page_index: usize) -> &[T] {
    let start = page_index.saturating_sub(1).saturating_mul(PAGE_SIZE);
    if start >= rows.len() {
        return &[];
    }
    let end = (start + PAGE_SIZE).min(rows.len());
    &rows[start..end]
}

/// Filtered and sorted rows, all pages.
pub fn filtered_sorted<'a>(records: &'a [TradeRecord], view: &ViewState) -> Vec<&'a TradeRecord> {
    let mut rows = filter_records(records, &view.filter_code);
    sort_records(&mut rows, view.sort);
    rows
}

/// Full projection of the table for the given view.
pub fn project_table<'a>(records: &'a [TradeRecord], view: &ViewState) -> TableView<'a> {
    let rows = filtered_sorted(records, view);
    let filtered_count = rows.len();
    let total_pages = total_pages(filtered_count);
    let page_index = view.page_index.clamp(1, total_pages);

    TableView {
        rows: page_slice(&rows, page_index).to_vec(),
        page_index,
        total_pages,
        filtered_count,
        total_count: records.len(),
    }
}

/// Distinct trade codes in first-seen order.
pub fn trade_codes(records: &[TradeRecord]) -> Vec<String> {
    records
        .iter()
        .map(|r| r.trade_code.as_str())
        .collect::<IndexSet<_>>()
        .into_iter()
        .map(str::to_string)
        .collect()
}

/// Step through `codes` starting from `current`.
///
/// With `include_empty`, the empty string ("all codes") sits before the
/// first code, as in the filter selector. An unknown `current` restarts
/// from the beginning.
pub fn cycle_code(codes: &[String], current: &str, forward: bool, include_empty: bool) -> String {
    let mut options: Vec<&str> = Vec::with_capacity(codes.len() + 1);
    if include_empty {
        options.push("");
    }
    options.extend(codes.iter().map(String::as_str));

    if options.is_empty() {
        return String::new();
    }

    let len = options.len();
    let next = match options.iter().position(|c| *c == current) {
        Some(idx) if forward => (idx + 1) % len,
        Some(idx) => (idx + len - 1) % len,
        None => 0,
    };
    options[next].to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::column::Column;
    use chrono::NaiveDate;

    fn record(id: i64, code: &str, day: u32, close: f64) -> TradeRecord {
        TradeRecord {
            id,
            trade_code: code.to_string(),
            date: NaiveDate::from_ymd_opt(2024, 1, day).unwrap(),
            open: close,
            high: close,
            low: close,
            close,
            volume: 100 * id as u64,
        }
    }

    #[test]
    fn total_pages_is_at_least_one() {
        assert_eq!(total_pages(0), 1);
        assert_eq!(total_pages(1), 1);
        assert_eq!(total_pages(10), 1);
        assert_eq!(total_pages(11), 2);
        assert_eq!(total_pages(30), 3);
    }

    #[test]
    fn filter_is_exact_and_case_sensitive() {
        let records = vec![
            record(1, "ACI", 1, 1.0),
            record(2, "aci", 2, 2.0),
            record(3, "ACIFL", 3, 3.0),
            record(4, "ACI", 4, 4.0),
        ];
        let ids: Vec<i64> = filter_records(&records, "ACI").iter().map(|r| r.id).collect();
        assert_eq!(ids, vec![1, 4]);
        assert_eq!(filter_records(&records, "").len(), 4);
    }

    #[test]
    fn equal_keys_keep_input_order_in_both_directions() {
        let records = vec![
            record(1, "B", 1, 5.0),
            record(2, "A", 2, 5.0),
            record(3, "C", 3, 1.0),
        ];
        let view = ViewState::default().sorted_by(Column::Close);
        let ids: Vec<i64> = filtered_sorted(&records, &view).iter().map(|r| r.id).collect();
        assert_eq!(ids, vec![3, 1, 2]);

        let view = view.sorted_by(Column::Close);
        let ids: Vec<i64> = filtered_sorted(&records, &view).iter().map(|r| r.id).collect();
        assert_eq!(ids, vec![1, 2, 3]);
    }

    #[test]
    fn projection_clamps_a_stale_page() {
        let records: Vec<TradeRecord> = (1..=25).map(|i| record(i, "X", 1, i as f64)).collect();
        let view = ViewState::default().last_page(3);
        let table = project_table(&records, &view);
        assert_eq!(table.page_index, 3);
        assert_eq!(table.rows.len(), 5);

        let view = view.with_filter("X").last_page(3);
        let table = project_table(&records[..12], &view);
        assert_eq!(table.total_pages, 2);
        assert_eq!(table.page_index, 2);
        assert_eq!(table.rows.len(), 2);
    }

    #[test]
    fn page_slice_out_of_range_is_empty() {
        let rows = [1, 2, 3];
        assert_eq!(page_slice(&rows, 1), &[1, 2, 3]);
        assert!(page_slice(&rows, 2).is_empty());
    }

    #[test]
    fn trade_codes_are_distinct_in_first_seen_order() {
        let records = vec![
            record(1, "GP", 1, 1.0),
            record(2, "ACI", 1, 1.0),
            record(3, "GP", 2, 1.0),
        ];
        assert_eq!(trade_codes(&records), vec!["GP", "ACI"]);
    }

    #[test]
    fn cycle_code_wraps_and_includes_all() {
        let codes = vec!["GP".to_string(), "ACI".to_string()];
        assert_eq!(cycle_code(&codes, "", true, true), "GP");
        assert_eq!(cycle_code(&codes, "ACI", true, true), "");
        assert_eq!(cycle_code(&codes, "", false, true), "ACI");
        assert_eq!(cycle_code(&codes, "ACI", true, false), "GP");
        assert_eq!(cycle_code(&codes, "MISSING", true, false), "GP");
        assert_eq!(cycle_code(&[], "", true, false), "");
    }
}
