//! Message types flowing through the dashboard reducer.
//!
//! These are **transport-agnostic** logical messages:
//! - [`Action`]: what the reducer consumes (UI input, or a data source
//!   reporting back).
//! - [`Effect`]: what the reducer asks the data source to do.
//!
//! The client turns key presses into actions and effects into HTTP
//! requests (or dataset reloads); this module knows about neither.

use crate::column::Column;
use crate::record::{NewTrade, TradeId, TradeRecord};
use crate::time_frame::TimeFrame;

/// A single state transition request.
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    // ---- view parameters -------------------------------------------------
    /// Trade-code filter; empty string clears it.
    SetFilter(String),
    /// Sort by a column (toggles direction when already active).
    SortBy(Column),
    NextPage,
    PrevPage,
    FirstPage,
    LastPage,
    SetChartCode(String),
    SetTimeFrame(TimeFrame),
    SetCompareA(String),
    SetCompareB(String),

    // ---- forms -----------------------------------------------------------
    OpenAddForm,
    StartEdit(TradeId),
    FormInput(char),
    FormBackspace,
    FormFocusNext,
    FormFocusPrev,
    SubmitForm,
    CancelForm,

    // ---- mutations and housekeeping --------------------------------------
    Delete(TradeId),
    Refresh,
    DismissNotice,
    /// Show an informational notice (e.g. an export finished).
    Notify(String),

    // ---- data source completions -----------------------------------------
    /// Full working set fetched.
    Loaded(Vec<TradeRecord>),
    LoadFailed(String),
    Created(TradeRecord),
    Updated(TradeRecord),
    Deleted(TradeId),
    MutationFailed(String),
    /// Result of the backend health check.
    BackendStatus(bool),
}

/// A request for the data source.
#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    /// Fetch the full working set.
    Fetch,
    /// Insert a new record; the source assigns its id.
    Create(NewTrade),
    /// Replace the stored record with the same id.
    Update(TradeRecord),
    Delete(TradeId),
}
