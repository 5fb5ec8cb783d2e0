// crates/tradeboard-client/src/components/status_bar.rs

use ratatui::{
    layout::{Alignment, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use crate::app::{App, InputMode};

pub fn draw_status_bar(f: &mut Frame, area: Rect, app: &App) {
    let theme = &app.theme;
    let key = |k: &'static str| {
        Span::styled(k, Style::default().fg(theme.accent).add_modifier(Modifier::BOLD))
    };

    let (msg, style) = match app.input_mode() {
        InputMode::Normal => {
            let view = app.dashboard.view();
            let mut shortcuts = vec![
                key("[f]"),
                Span::raw("ilter "),
                key("[1-8]"),
                Span::raw("Sort "),
                key("[t]"),
                Span::raw(format!("{} ", view.chart_time_frame.label())),
            ];
            if app.dashboard.is_editable() {
                shortcuts.extend([
                    key("[+]"),
                    Span::raw("Add "),
                    key("[e]"),
                    Span::raw("dit "),
                    key("[d]"),
                    Span::raw("elete "),
                ]);
            }
            shortcuts.extend([
                key("[x]"),
                Span::raw("Export "),
                key("[r]"),
                Span::raw("eload "),
                key("[q]"),
                Span::raw("uit"),
            ]);
            (Line::from(shortcuts), Style::default())
        }
        InputMode::Editing => {
            let line = Line::from(vec![
                Span::raw("Editing: "),
                key("[Tab]"),
                Span::raw(" Next field "),
                key("[Enter]"),
                Span::raw(" Save "),
                key("[Esc]"),
                Span::raw(" Cancel"),
            ]);
            (line, Style::default().fg(theme.warning))
        }
        InputMode::Help => (
            Line::from(vec![key("[Esc]"), Span::raw(" Close help")]),
            Style::default(),
        ),
        InputMode::Notice => (
            Line::from(vec![key("[Enter]"), Span::raw(" Dismiss")]),
            Style::default().fg(theme.warning),
        ),
    };

    let status_block = Block::default()
        .borders(Borders::ALL)
        .border_style(style);

    let paragraph = Paragraph::new(msg)
        .block(status_block)
        .alignment(Alignment::Center);

    f.render_widget(paragraph, area);
}
