//! Table columns and sort direction.

use std::cmp::Ordering;

use crate::record::TradeRecord;

/// A sortable column of the trade table.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum Column {
    Id,
    TradeCode,
    Date,
    Open,
    High,
    Low,
    Close,
    Volume,
}

impl Column {
    /// Display order of the table.
    pub const ALL: [Column; 8] = [
        Column::Id,
        Column::TradeCode,
        Column::Date,
        Column::Open,
        Column::High,
        Column::Low,
        Column::Close,
        Column::Volume,
    ];

    /// Header text.
    pub fn label(self) -> &'static str {
        match self {
            Column::Id => "ID",
            Column::TradeCode => "Trade Code",
            Column::Date => "Date",
            Column::Open => "Open",
            Column::High => "High",
            Column::Low => "Low",
            Column::Close => "Close",
            Column::Volume => "Volume",
        }
    }

    /// Column for a 1-based position in [`Column::ALL`].
    pub fn from_position(position: usize) -> Option<Self> {
        position
            .checked_sub(1)
            .and_then(|idx| Column::ALL.get(idx).copied())
    }

    /// Natural ascending order of this column's values.
    ///
    /// Strings compare lexicographically, dates chronologically and
    /// numbers numerically (`total_cmp` for prices, so NaN never breaks
    /// the sort).
    pub fn compare(self, a: &TradeRecord, b: &TradeRecord) -> Ordering {
        match self {
            Column::Id => a.id.cmp(&b.id),
            Column::TradeCode => a.trade_code.cmp(&b.trade_code),
            Column::Date => a.date.cmp(&b.date),
            Column::Open => a.open.total_cmp(&b.open),
            Column::High => a.high.total_cmp(&b.high),
            Column::Low => a.low.total_cmp(&b.low),
            Column::Close => a.close.total_cmp(&b.close),
            Column::Volume => a.volume.cmp(&b.volume),
        }
    }
}

/// Sort direction.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Default)]
pub enum SortDirection {
    #[default]
    Ascending,
    Descending,
}

impl SortDirection {
    pub fn toggled(self) -> Self {
        match self {
            SortDirection::Ascending => SortDirection::Descending,
            SortDirection::Descending => SortDirection::Ascending,
        }
    }

    /// Orient an ascending comparison result.
    pub fn apply(self, ordering: Ordering) -> Ordering {
        match self {
            SortDirection::Ascending => ordering,
            SortDirection::Descending => ordering.reverse(),
        }
    }

    /// Header marker.
    pub fn arrow(self) -> char {
        match self {
            SortDirection::Ascending => '▲',
            SortDirection::Descending => '▼',
        }
    }
}
