// crates/tradeboard-client/src/components/notice.rs

use ratatui::{
    layout::{Alignment, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};

use crate::theme::Theme;

/// Blocking message box; dismissed with Enter or Esc.
pub fn draw_notice(f: &mut Frame, area: Rect, message: &str, theme: &Theme) {
    f.render_widget(Clear, area);

    let lines = vec![
        Line::from(Span::styled(
            message,
            Style::default().fg(theme.text).add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        Line::from(Span::styled("[Enter] OK", Style::default().fg(theme.muted))),
    ];

    let paragraph = Paragraph::new(lines)
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true })
        .block(
            Block::default()
                .title(" Notice ")
                .borders(Borders::ALL)
                .border_style(Style::default().fg(theme.warning)),
        );

    f.render_widget(paragraph, area);
}
