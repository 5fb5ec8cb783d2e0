// crates/tradeboard-client/src/components/trade_form.rs

use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};

use tradeboard_core::{FormField, FormMode, TradeForm};

use crate::theme::Theme;

pub fn draw_trade_form(f: &mut Frame, area: Rect, form: &TradeForm, theme: &Theme) {
    // Clear the area first for the overlay
    f.render_widget(Clear, area);

    let title = match form.mode {
        FormMode::Add => " Add Trade ".to_string(),
        FormMode::Edit(id) => format!(" Edit Trade #{id} "),
    };
    let block = Block::default()
        .title(title)
        .borders(Borders::ALL)
        .border_style(Style::default().fg(theme.accent));

    let inner = block.inner(area);
    f.render_widget(block, area);

    let mut constraints = vec![Constraint::Length(1); FormField::ALL.len()];
    constraints.push(Constraint::Length(1)); // spacer
    constraints.push(Constraint::Min(1));    // error / pending
    constraints.push(Constraint::Length(1)); // actions
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints(constraints)
        .split(inner);

    for (i, field) in FormField::ALL.iter().enumerate() {
        let focused = *field == form.focus;
        let has_error = form.error.as_ref().is_some_and(|e| e.field() == *field);

        let label_style = if has_error {
            Style::default().fg(theme.negative).add_modifier(Modifier::BOLD)
        } else if focused {
            Style::default().fg(theme.accent).add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(theme.muted)
        };

        let mut spans = vec![
            Span::styled(format!("{:>11}: ", field.label()), label_style),
            Span::styled(form.draft.field(*field), Style::default().fg(theme.text)),
        ];
        if focused && !form.pending {
            spans.push(Span::styled("_", Style::default().add_modifier(Modifier::SLOW_BLINK)));
        }
        f.render_widget(Paragraph::new(Line::from(spans)), chunks[i]);
    }

    let n = FormField::ALL.len();
    let status = if form.pending {
        Line::from(Span::styled("Saving...", Style::default().fg(theme.warning)))
    } else if let Some(err) = &form.error {
        Line::from(Span::styled(err.to_string(), Style::default().fg(theme.negative)))
    } else {
        Line::from("")
    };
    f.render_widget(Paragraph::new(status).alignment(Alignment::Center), chunks[n + 1]);

    let actions = Paragraph::new("[Tab] Next field  [Enter] Save  [Esc] Cancel")
        .style(Style::default().fg(theme.muted))
        .alignment(Alignment::Center);
    f.render_widget(actions, chunks[n + 2]);
}
