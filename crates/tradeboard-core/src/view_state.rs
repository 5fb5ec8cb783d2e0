//! View parameters of the dashboard.
//!
//! [`ViewState`] is a plain value. Every UI action maps to one of the
//! by-value transitions below, which return a new state instead of
//! mutating shared fields. The table and chart projections are then
//! recomputed from the latest state (see [`crate::pipeline`] and
//! [`crate::chart`]).

use crate::column::{Column, SortDirection};
use crate::time_frame::TimeFrame;

/// Fixed number of rows per table page.
pub const PAGE_SIZE: usize = 10;

/// Active sort column and direction.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct SortState {
    pub column: Column,
    pub direction: SortDirection,
}

/// All view parameters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ViewState {
    /// Trade-code equality filter; empty means no filter.
    pub filter_code: String,
    /// `None` keeps working-set order.
    pub sort: Option<SortState>,
    /// 1-based page index.
    pub page_index: usize,
    pub chart_trade_code: String,
    pub chart_time_frame: TimeFrame,
    pub compare_code_a: String,
    pub compare_code_b: String,
}

impl Default for ViewState {
    fn default() -> Self {
        ViewState {
            filter_code: String::new(),
            sort: None,
            page_index: 1,
            chart_trade_code: String::new(),
            chart_time_frame: TimeFrame::Day,
            compare_code_a: String::new(),
            compare_code_b: String::new(),
        }
    }
}

impl ViewState {
    /// Change the filter. Always returns to page 1; the sort is kept.
    pub fn with_filter(self, code: impl Into<String>) -> Self {
        ViewState {
            filter_code: code.into(),
            page_index: 1,
            ..self
        }
    }

    /// Sort by `column`.
    ///
    /// Selecting the active column toggles its direction; any other
    /// column starts ascending.
    pub fn sorted_by(self, column: Column) -> Self {
        let direction = match self.sort {
            Some(current) if current.column == column => current.direction.toggled(),
            _ => SortDirection::Ascending,
        };
        ViewState {
            sort: Some(SortState { column, direction }),
            ..self
        }
    }

    /// Clamp the page index into `[1, total_pages]`.
    pub fn clamped(self, total_pages: usize) -> Self {
        let last = total_pages.max(1);
        ViewState {
            page_index: self.page_index.clamp(1, last),
            ..self
        }
    }

    /// Advance one page; a no-op on the last page.
    pub fn next_page(self, total_pages: usize) -> Self {
        let page_index = self.page_index.saturating_add(1);
        ViewState { page_index, ..self }.clamped(total_pages)
    }

    /// Go back one page; a no-op on the first page.
    pub fn prev_page(self) -> Self {
        let page_index = self.page_index.saturating_sub(1).max(1);
        ViewState { page_index, ..self }
    }

    pub fn first_page(self) -> Self {
        ViewState {
            page_index: 1,
            ..self
        }
    }

    pub fn last_page(self, total_pages: usize) -> Self {
        ViewState {
            page_index: total_pages.max(1),
            ..self
        }
    }

    pub fn with_chart_code(self, code: impl Into<String>) -> Self {
        ViewState {
            chart_trade_code: code.into(),
            ..self
        }
    }

    pub fn with_time_frame(self, chart_time_frame: TimeFrame) -> Self {
        ViewState {
            chart_time_frame,
            ..self
        }
    }

    pub fn with_compare_a(self, code: impl Into<String>) -> Self {
        ViewState {
            compare_code_a: code.into(),
            ..self
        }
    }

    pub fn with_compare_b(self, code: impl Into<String>) -> Self {
        ViewState {
            compare_code_b: code.into(),
            ..self
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn same_column_toggles_other_column_resets() {
        let view = ViewState::default().sorted_by(Column::Close);
        assert_eq!(
            view.sort,
            Some(SortState {
                column: Column::Close,
                direction: SortDirection::Ascending
            })
        );

        let view = view.sorted_by(Column::Close);
        assert_eq!(view.sort.map(|s| s.direction), Some(SortDirection::Descending));

        let view = view.sorted_by(Column::Close);
        assert_eq!(view.sort.map(|s| s.direction), Some(SortDirection::Ascending));

        let view = view.sorted_by(Column::Close).sorted_by(Column::Date);
        assert_eq!(
            view.sort,
            Some(SortState {
                column: Column::Date,
                direction: SortDirection::Ascending
            })
        );
    }

    #[test]
    fn filter_change_resets_page_but_keeps_sort() {
        let view = ViewState::default()
            .sorted_by(Column::Volume)
            .next_page(5)
            .next_page(5);
        assert_eq!(view.page_index, 3);

        let view = view.with_filter("ACI");
        assert_eq!(view.page_index, 1);
        assert_eq!(view.sort.map(|s| s.column), Some(Column::Volume));
    }

    #[test]
    fn paging_stops_at_boundaries() {
        let view = ViewState::default().prev_page();
        assert_eq!(view.page_index, 1);

        let view = view.next_page(2).next_page(2).next_page(2);
        assert_eq!(view.page_index, 2);

        let view = view.last_page(0);
        assert_eq!(view.page_index, 1);
    }

    #[test]
    fn clamp_pulls_page_back_into_range() {
        let view = ViewState::default().last_page(9).clamped(3);
        assert_eq!(view.page_index, 3);

        let view = ViewState {
            page_index: 0,
            ..ViewState::default()
        }
        .clamped(3);
        assert_eq!(view.page_index, 1);
    }
}
