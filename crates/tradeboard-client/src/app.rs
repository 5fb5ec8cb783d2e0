// crates/tradeboard-client/src/app.rs

use std::path::{Path, PathBuf};

use chrono::Local;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use tokio::sync::mpsc::UnboundedSender;
use tracing::{debug, info, warn};

use tradeboard_core::pipeline::cycle_code;
use tradeboard_core::{Action, Column, Dashboard, Effect, PriceField, TradeRecord};
use tradeboard_protocol::write_records_csv;

use crate::theme::Theme;

/// Which layer receives key presses.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum InputMode {
    Normal,
    Help,
    /// Add/edit form is open.
    Editing,
    /// A blocking notice waits for acknowledgement.
    Notice,
}

pub struct App {
    pub dashboard: Dashboard,
    pub theme: Theme,
    /// Data source shown in the header.
    pub source_label: String,
    pub export_dir: PathBuf,

    pub show_help: bool,
    pub should_quit: bool,

    /// Row index within the current page.
    pub selected_row: usize,
    /// Price field drawn in the comparison chart.
    pub compare_field: PriceField,

    effect_tx: Option<UnboundedSender<Effect>>,
}

impl App {
    pub fn new(dashboard: Dashboard, source_label: impl Into<String>, theme: Theme) -> Self {
        Self {
            dashboard,
            theme,
            source_label: source_label.into(),
            export_dir: PathBuf::from("."),
            show_help: false,
            should_quit: false,
            selected_row: 0,
            compare_field: PriceField::Close,
            effect_tx: None,
        }
    }

    pub fn with_export_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.export_dir = dir.into();
        self
    }

    pub fn set_effect_sender(&mut self, tx: UnboundedSender<Effect>) {
        self.effect_tx = Some(tx);
    }

    pub fn input_mode(&self) -> InputMode {
        if self.dashboard.notice().is_some() {
            InputMode::Notice
        } else if self.dashboard.form().is_some() {
            InputMode::Editing
        } else if self.show_help {
            InputMode::Help
        } else {
            InputMode::Normal
        }
    }

    /// Feed one action through the dashboard and forward its effects.
    pub fn dispatch(&mut self, action: Action) {
        let effects = self.dashboard.process_action(action);
        for effect in effects {
            debug!(?effect, "queueing effect");
            match &self.effect_tx {
                Some(tx) => {
                    if let Err(e) = tx.send(effect) {
                        warn!("Data worker is gone, dropping effect: {}", e);
                    }
                }
                None => warn!("No data worker attached, dropping {:?}", effect),
            }
        }
        self.clamp_selection();
    }

    pub fn selected_record(&self) -> Option<&TradeRecord> {
        self.dashboard.table().rows.get(self.selected_row).copied()
    }

    pub fn handle_key(&mut self, key: KeyEvent) {
        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
            self.should_quit = true;
            return;
        }

        match self.input_mode() {
            InputMode::Notice => match key.code {
                KeyCode::Enter | KeyCode::Esc | KeyCode::Char(' ') => {
                    self.dispatch(Action::DismissNotice)
                }
                _ => {}
            },
            InputMode::Editing => match key.code {
                KeyCode::Esc => self.dispatch(Action::CancelForm),
                KeyCode::Enter => self.dispatch(Action::SubmitForm),
                KeyCode::Tab | KeyCode::Down => self.dispatch(Action::FormFocusNext),
                KeyCode::BackTab | KeyCode::Up => self.dispatch(Action::FormFocusPrev),
                KeyCode::Backspace => self.dispatch(Action::FormBackspace),
                KeyCode::Char(c) => self.dispatch(Action::FormInput(c)),
                _ => {}
            },
            InputMode::Help => match key.code {
                KeyCode::Esc | KeyCode::F(1) | KeyCode::Char('?') | KeyCode::Char('q') => {
                    self.show_help = false;
                }
                _ => {}
            },
            InputMode::Normal => self.handle_normal_key(key.code),
        }
    }

    fn handle_normal_key(&mut self, code: KeyCode) {
        match code {
            // Global hotkeys
            KeyCode::Char('q') | KeyCode::Char('Q') => {
                self.should_quit = true;
            }
            KeyCode::F(1) | KeyCode::Char('?') => {
                self.show_help = true;
            }
            KeyCode::Char('r') => self.dispatch(Action::Refresh),
            KeyCode::Char('x') => self.export_filtered(),

            // Navigation
            KeyCode::Down | KeyCode::Char('j') => self.move_selection_down(),
            KeyCode::Up | KeyCode::Char('k') => self.move_selection_up(),
            KeyCode::Right | KeyCode::PageDown | KeyCode::Char('n') => {
                self.change_page(Action::NextPage)
            }
            KeyCode::Left | KeyCode::PageUp | KeyCode::Char('p') => {
                self.change_page(Action::PrevPage)
            }
            KeyCode::Home | KeyCode::Char('g') => self.change_page(Action::FirstPage),
            KeyCode::End | KeyCode::Char('G') => self.change_page(Action::LastPage),

            // Table parameters
            KeyCode::Char('f') => self.cycle_filter(true),
            KeyCode::Char('F') => self.cycle_filter(false),
            KeyCode::Char(c @ '1'..='8') => {
                let position = c.to_digit(10).unwrap_or_default() as usize;
                if let Some(column) = Column::from_position(position) {
                    self.dispatch(Action::SortBy(column));
                }
            }

            // Chart parameters
            KeyCode::Char('c') => self.cycle_chart_code(true),
            KeyCode::Char('C') => self.cycle_chart_code(false),
            KeyCode::Char('t') => {
                let next = self.dashboard.view().chart_time_frame.next();
                self.dispatch(Action::SetTimeFrame(next));
            }
            KeyCode::Char('a') => self.cycle_compare(true, true),
            KeyCode::Char('A') => self.cycle_compare(true, false),
            KeyCode::Char('b') => self.cycle_compare(false, true),
            KeyCode::Char('B') => self.cycle_compare(false, false),
            KeyCode::Char('o') => self.cycle_compare_field(),

            // Mutations
            KeyCode::Char('+') => self.dispatch(Action::OpenAddForm),
            KeyCode::Char('e') => {
                if let Some(id) = self.selected_record().map(|r| r.id) {
                    self.dispatch(Action::StartEdit(id));
                }
            }
            KeyCode::Char('d') | KeyCode::Delete => {
                if let Some(id) = self.selected_record().map(|r| r.id) {
                    info!(id, "Requesting delete");
                    self.dispatch(Action::Delete(id));
                }
            }
            _ => {}
        }
    }

    fn move_selection_down(&mut self) {
        let rows = self.dashboard.table().rows.len();
        if self.selected_row + 1 < rows {
            self.selected_row += 1;
        }
    }

    fn move_selection_up(&mut self) {
        self.selected_row = self.selected_row.saturating_sub(1);
    }

    fn change_page(&mut self, action: Action) {
        self.dispatch(action);
        self.selected_row = 0;
    }

    fn clamp_selection(&mut self) {
        let rows = self.dashboard.table().rows.len();
        self.selected_row = self.selected_row.min(rows.saturating_sub(1));
    }

    fn cycle_filter(&mut self, forward: bool) {
        let codes = self.dashboard.trade_codes();
        let next = cycle_code(&codes, &self.dashboard.view().filter_code, forward, true);
        self.dispatch(Action::SetFilter(next));
        self.selected_row = 0;
    }

    fn cycle_chart_code(&mut self, forward: bool) {
        let codes = self.dashboard.trade_codes();
        let next = cycle_code(&codes, &self.dashboard.view().chart_trade_code, forward, false);
        self.dispatch(Action::SetChartCode(next));
    }

    fn cycle_compare(&mut self, first: bool, forward: bool) {
        let codes = self.dashboard.trade_codes();
        let view = self.dashboard.view();
        let current = if first {
            &view.compare_code_a
        } else {
            &view.compare_code_b
        };
        let next = cycle_code(&codes, current, forward, false);
        let action = if first {
            Action::SetCompareA(next)
        } else {
            Action::SetCompareB(next)
        };
        self.dispatch(action);
    }

    fn cycle_compare_field(&mut self) {
        let all = PriceField::ALL;
        let idx = all
            .iter()
            .position(|f| *f == self.compare_field)
            .unwrap_or_default();
        self.compare_field = all[(idx + 1) % all.len()];
    }

    /// Write the filtered, sorted table (all pages) to a timestamped CSV file.
    pub fn export_filtered(&mut self) {
        let rows = self.dashboard.filtered_rows();
        let count = rows.len();
        let file_name = format!("trades-{}.csv", Local::now().format("%Y%m%d-%H%M%S"));
        let path = self.export_dir.join(file_name);

        let message = match write_export(&path, rows) {
            Ok(()) => {
                info!(count, path = %path.display(), "Exported trades");
                format!("Exported {count} rows to {}", path.display())
            }
            Err(e) => {
                warn!("Export failed: {}", e);
                format!("Export failed: {e}")
            }
        };
        self.dispatch(Action::Notify(message));
    }
}

fn write_export(path: &Path, rows: Vec<&TradeRecord>) -> anyhow::Result<()> {
    let text = write_records_csv(rows)?;
    std::fs::write(path, text)?;
    Ok(())
}
