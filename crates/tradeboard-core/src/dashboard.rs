//! Dashboard reducer.
//!
//! [`Dashboard`] owns the working set and every piece of derived UI
//! state. All changes go through [`Dashboard::process_action`], one
//! action at a time; each call runs to completion and returns the
//! [`Effect`]s the data source should perform.
//!
//! The working set only changes when the data source reports back
//! (`Loaded`, `Created`, `Updated`, `Deleted`), so a failed mutation
//! never needs rolling back.

use crate::chart::{comparison_series, price_volume_series, ComparisonSeries, PriceVolumeSeries};
use crate::form::{FormMode, TradeForm};
use crate::messages::{Action, Effect};
use crate::pipeline::{self, TableView};
use crate::record::{TradeId, TradeRecord};
use crate::time_frame::GroupOrder;
use crate::view_state::ViewState;

/// Notice shown when a read-only source is asked to mutate.
pub const READ_ONLY_NOTICE: &str = "This dataset is read-only.";

/// Where the working set currently stands.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum LoadStatus {
    #[default]
    Loading,
    Ready,
    /// Fetch failed; table and charts are hidden.
    Failed(String),
}

/// View-model of the whole dashboard.
#[derive(Debug, Clone)]
pub struct Dashboard {
    records: Vec<TradeRecord>,
    view: ViewState,
    status: LoadStatus,
    form: Option<TradeForm>,
    /// Blocking notice (mutation failures, read-only rejections).
    notice: Option<String>,
    editable: bool,
    group_order: GroupOrder,
    backend_online: Option<bool>,
    /// Delete sent to the data source and not yet answered.
    pending_delete: Option<TradeId>,
}

impl Dashboard {
    /// Create an empty dashboard.
    ///
    /// `editable` is false for read-only sources such as a bundled
    /// dataset.
    pub fn new(editable: bool) -> Self {
        Dashboard {
            records: Vec::new(),
            view: ViewState::default(),
            status: LoadStatus::Loading,
            form: None,
            notice: None,
            editable,
            group_order: GroupOrder::default(),
            backend_online: None,
            pending_delete: None,
        }
    }

    pub fn with_group_order(mut self, group_order: GroupOrder) -> Self {
        self.group_order = group_order;
        self
    }

    /// Apply one action and return the resulting effects.
    pub fn process_action(&mut self, action: Action) -> Vec<Effect> {
        match action {
            Action::SetFilter(code) => {
                self.update_view(|v| v.with_filter(code));
                self.reclamp();
                Vec::new()
            }
            Action::SortBy(column) => {
                self.update_view(|v| v.sorted_by(column));
                Vec::new()
            }
            Action::NextPage => {
                let total = self.total_pages();
                self.update_view(|v| v.next_page(total));
                Vec::new()
            }
            Action::PrevPage => {
                self.update_view(ViewState::prev_page);
                Vec::new()
            }
            Action::FirstPage => {
                self.update_view(ViewState::first_page);
                Vec::new()
            }
            Action::LastPage => {
                let total = self.total_pages();
                self.update_view(|v| v.last_page(total));
                Vec::new()
            }
            Action::SetChartCode(code) => {
                self.update_view(|v| v.with_chart_code(code));
                Vec::new()
            }
            Action::SetTimeFrame(frame) => {
                self.update_view(|v| v.with_time_frame(frame));
                Vec::new()
            }
            Action::SetCompareA(code) => {
                self.update_view(|v| v.with_compare_a(code));
                Vec::new()
            }
            Action::SetCompareB(code) => {
                self.update_view(|v| v.with_compare_b(code));
                Vec::new()
            }

            Action::OpenAddForm => {
                if self.reject_if_read_only() {
                    return Vec::new();
                }
                self.form = Some(TradeForm::add());
                Vec::new()
            }
            Action::StartEdit(id) => {
                if self.reject_if_read_only() {
                    return Vec::new();
                }
                if let Some(record) = self.find(id) {
                    self.form = Some(TradeForm::edit(record));
                }
                Vec::new()
            }
            Action::FormInput(c) => {
                if let Some(form) = self.form.as_mut().filter(|f| !f.pending) {
                    form.push_char(c);
                }
                Vec::new()
            }
            Action::FormBackspace => {
                if let Some(form) = self.form.as_mut().filter(|f| !f.pending) {
                    form.pop_char();
                }
                Vec::new()
            }
            Action::FormFocusNext => {
                if let Some(form) = self.form.as_mut() {
                    form.focus_next();
                }
                Vec::new()
            }
            Action::FormFocusPrev => {
                if let Some(form) = self.form.as_mut() {
                    form.focus_prev();
                }
                Vec::new()
            }
            Action::SubmitForm => self.submit_form(),
            Action::CancelForm => {
                self.form = None;
                Vec::new()
            }

            Action::Delete(id) => {
                if self.reject_if_read_only()
                    || self.pending_delete.is_some()
                    || self.find(id).is_none()
                {
                    return Vec::new();
                }
                self.pending_delete = Some(id);
                vec![Effect::Delete(id)]
            }
            Action::Refresh => {
                self.status = LoadStatus::Loading;
                vec![Effect::Fetch]
            }
            Action::DismissNotice => {
                self.notice = None;
                Vec::new()
            }
            Action::Notify(message) => {
                self.notice = Some(message);
                Vec::new()
            }

            Action::Loaded(records) => {
                self.records = records;
                self.status = LoadStatus::Ready;
                self.pending_delete = None;
                self.default_selectors();
                self.reclamp();
                Vec::new()
            }
            Action::LoadFailed(message) => {
                self.status = LoadStatus::Failed(message);
                Vec::new()
            }
            Action::Created(record) => {
                self.records.insert(0, record);
                self.close_form_if(|mode| mode == FormMode::Add);
                self.default_selectors();
                self.reclamp();
                Vec::new()
            }
            Action::Updated(record) => {
                let id = record.id;
                if let Some(slot) = self.records.iter_mut().find(|r| r.id == id) {
                    *slot = record;
                }
                self.close_form_if(|mode| mode == FormMode::Edit(id));
                self.default_selectors();
                self.reclamp();
                Vec::new()
            }
            Action::Deleted(id) => {
                self.records.retain(|r| r.id != id);
                if self.pending_delete == Some(id) {
                    self.pending_delete = None;
                }
                self.close_form_if(|mode| mode == FormMode::Edit(id));
                self.default_selectors();
                self.reclamp();
                Vec::new()
            }
            Action::MutationFailed(message) => {
                if let Some(form) = self.form.as_mut() {
                    form.pending = false;
                }
                self.pending_delete = None;
                self.notice = Some(message);
                Vec::new()
            }
            Action::BackendStatus(online) => {
                self.backend_online = Some(online);
                Vec::new()
            }
        }
    }

    // -------------------------------------------------------------------------
    // Projections
    // -------------------------------------------------------------------------

    /// Current table page.
    pub fn table(&self) -> TableView<'_> {
        pipeline::project_table(&self.records, &self.view)
    }

    /// Filtered and sorted rows across all pages.
    pub fn filtered_rows(&self) -> Vec<&TradeRecord> {
        pipeline::filtered_sorted(&self.records, &self.view)
    }

    /// Price & volume series for the selected chart code and time-frame.
    pub fn price_series(&self) -> PriceVolumeSeries {
        price_volume_series(
            &self.records,
            &self.view.chart_trade_code,
            self.view.chart_time_frame,
            self.group_order,
        )
    }

    /// Comparison series for the two selected codes.
    pub fn comparison(&self) -> ComparisonSeries {
        comparison_series(
            &self.records,
            &self.view.compare_code_a,
            &self.view.compare_code_b,
        )
    }

    /// Distinct trade codes, first-seen order.
    pub fn trade_codes(&self) -> Vec<String> {
        pipeline::trade_codes(&self.records)
    }

    // -------------------------------------------------------------------------
    // Accessors
    // -------------------------------------------------------------------------

    pub fn records(&self) -> &[TradeRecord] {
        &self.records
    }

    pub fn view(&self) -> &ViewState {
        &self.view
    }

    pub fn status(&self) -> &LoadStatus {
        &self.status
    }

    pub fn form(&self) -> Option<&TradeForm> {
        self.form.as_ref()
    }

    pub fn notice(&self) -> Option<&str> {
        self.notice.as_deref()
    }

    pub fn is_editable(&self) -> bool {
        self.editable
    }

    pub fn group_order(&self) -> GroupOrder {
        self.group_order
    }

    /// Id of a delete still awaiting confirmation.
    pub fn pending_delete(&self) -> Option<TradeId> {
        self.pending_delete
    }

    /// `None` until a health check has reported.
    pub fn backend_online(&self) -> Option<bool> {
        self.backend_online
    }

    // -------------------------------------------------------------------------
    // Helpers
    // -------------------------------------------------------------------------

    fn update_view(&mut self, transition: impl FnOnce(ViewState) -> ViewState) {
        let current = std::mem::take(&mut self.view);
        self.view = transition(current);
    }

    fn total_pages(&self) -> usize {
        let filtered = pipeline::filter_records(&self.records, &self.view.filter_code).len();
        pipeline::total_pages(filtered)
    }

    /// Keep the page index valid after the filtered set changed size.
    fn reclamp(&mut self) {
        let total = self.total_pages();
        self.update_view(|v| v.clamped(total));
    }

    fn find(&self, id: TradeId) -> Option<&TradeRecord> {
        self.records.iter().find(|r| r.id == id)
    }

    fn reject_if_read_only(&mut self) -> bool {
        if !self.editable {
            self.notice = Some(READ_ONLY_NOTICE.to_string());
        }
        !self.editable
    }

    fn close_form_if(&mut self, matches: impl Fn(FormMode) -> bool) {
        if self.form.as_ref().is_some_and(|f| matches(f.mode)) {
            self.form = None;
        }
    }

    fn submit_form(&mut self) -> Vec<Effect> {
        let Some(form) = self.form.as_mut() else {
            return Vec::new();
        };
        if form.pending {
            return Vec::new();
        }

        match form.draft.validate() {
            Err(err) => {
                form.focus = err.field();
                form.error = Some(err);
                Vec::new()
            }
            Ok(trade) => {
                form.draft.trade_code = trade.trade_code.clone();
                form.error = None;
                form.pending = true;
                match form.mode {
                    FormMode::Add => vec![Effect::Create(trade)],
                    FormMode::Edit(id) => vec![Effect::Update(trade.with_id(id))],
                }
            }
        }
    }

    /// Pick chart and comparison codes when unset or no longer present.
    ///
    /// Chart and comparison A default to the first record's code,
    /// comparison B to the second record's code.
    fn default_selectors(&mut self) {
        let codes = self.trade_codes();
        let first = self.records.first().map(|r| r.trade_code.clone());
        let second = self
            .records
            .get(1)
            .map(|r| r.trade_code.clone())
            .or_else(|| first.clone());

        let (Some(first), Some(second)) = (first, second) else {
            return;
        };

        let known = |code: &str| codes.iter().any(|c| c == code);
        let view = std::mem::take(&mut self.view);
        let view = if known(&view.chart_trade_code) {
            view
        } else {
            view.with_chart_code(first.clone())
        };
        let view = if known(&view.compare_code_a) {
            view
        } else {
            view.with_compare_a(first)
        };
        let view = if known(&view.compare_code_b) {
            view
        } else {
            view.with_compare_b(second)
        };
        self.view = view;
    }
}
