// crates/tradeboard-client/src/components/help.rs

use ratatui::{
    layout::{Alignment, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, List, ListItem, Paragraph},
    Frame,
};

use crate::app::App;

const SHORTCUTS: &[(&str, &str)] = &[
    ("j/k ↓/↑", "Select row"),
    ("n/p →/←", "Next / previous page"),
    ("g/G", "First / last page"),
    ("f/F", "Cycle trade-code filter"),
    ("1-8", "Sort by column (again to reverse)"),
    ("c/C", "Cycle chart trade code"),
    ("t", "Cycle time-frame (day, month, year)"),
    ("a/A b/B", "Cycle comparison codes"),
    ("o", "Compare open/close/high/low, one field at a time"),
    ("+", "Add trade"),
    ("e", "Edit selected trade"),
    ("d", "Delete selected trade"),
    ("r", "Reload trades"),
    ("x", "Export filtered rows to CSV"),
    ("F1/?", "Toggle help"),
    ("q", "Quit"),
];

pub fn draw_help(f: &mut Frame, area: Rect, app: &App) {
    let theme = &app.theme;

    // Clear the area first for the overlay
    f.render_widget(Clear, area);

    let help_items: Vec<ListItem> = SHORTCUTS
        .iter()
        .map(|(keys, description)| {
            ListItem::new(Line::from(vec![
                Span::styled(
                    format!("{keys:>9}"),
                    Style::default().fg(theme.accent).add_modifier(Modifier::BOLD),
                ),
                Span::raw(format!(" - {description}")),
            ]))
        })
        .collect();

    let help_list = List::new(help_items).block(
        Block::default()
            .title(" Help - Keyboard Shortcuts ")
            .borders(Borders::ALL)
            .border_style(Style::default().fg(theme.accent)),
    );

    f.render_widget(help_list, area);

    // Add footer with close instruction
    let footer = Paragraph::new("Press F1 or ESC to close help")
        .style(Style::default().fg(theme.muted))
        .alignment(Alignment::Center);

    let footer_area = Rect {
        x: area.x,
        y: area.y + area.height.saturating_sub(1),
        width: area.width,
        height: 1,
    };

    f.render_widget(footer, footer_area);
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::{backend::TestBackend, Terminal};
    use tradeboard_core::Dashboard;

    use crate::theme::Theme;

    #[test]
    fn help_explains_compared_field_key() {
        let app = App::new(Dashboard::new(true), "test", Theme::default());
        let mut terminal = Terminal::new(TestBackend::new(90, 24)).unwrap();
        terminal
            .draw(|f| {
                let area = f.size();
                draw_help(f, area, &app);
            })
            .unwrap();

        let screen: String = terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|cell| cell.symbol())
            .collect();
        assert!(screen.contains("Compare open/close/high/low, one field at a time"));
    }
}
