// crates/tradeboard-client/src/ui.rs

use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

use tradeboard_core::LoadStatus;

use crate::app::App;
use crate::components::{
    compare_chart::draw_compare_chart,
    help::draw_help,
    notice::draw_notice,
    price_chart::draw_price_chart,
    status_bar::draw_status_bar,
    trade_form::draw_trade_form,
    trade_table::draw_trade_table,
};

pub fn draw(f: &mut Frame, app: &App) {
    // Main layout
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),       // Header
            Constraint::Percentage(45),  // Charts
            Constraint::Min(8),          // Table
            Constraint::Length(3),       // Status bar
        ])
        .split(f.size());

    draw_header(f, chunks[0], app);

    match app.dashboard.status() {
        LoadStatus::Ready => {
            draw_charts(f, chunks[1], app);
            draw_trade_table(f, chunks[2], app);
        }
        LoadStatus::Loading => {
            let body = chunks[1].union(chunks[2]);
            draw_message(f, body, app, "Loading trades...", false);
        }
        LoadStatus::Failed(message) => {
            let body = chunks[1].union(chunks[2]);
            draw_message(f, body, app, message, true);
        }
    }

    draw_status_bar(f, chunks[3], app);

    // Overlays, lowest first
    if app.show_help {
        draw_help(f, centered_rect(60, 70, f.size()), app);
    }
    if let Some(form) = app.dashboard.form() {
        draw_trade_form(f, centered_rect(50, 60, f.size()), form, &app.theme);
    }
    if let Some(notice) = app.dashboard.notice() {
        draw_notice(f, centered_rect(50, 25, f.size()), notice, &app.theme);
    }
}

fn draw_header(f: &mut Frame, area: Rect, app: &App) {
    let theme = &app.theme;
    let header_chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage(40),
            Constraint::Percentage(35),
            Constraint::Percentage(25),
        ])
        .split(area);

    // Left: data source and backend status
    let (status_symbol, status_color, status_text) = match app.dashboard.backend_online() {
        Some(true) => ("✓", theme.positive, "online"),
        Some(false) => ("✗", theme.negative, "offline"),
        None if app.dashboard.is_editable() => ("…", theme.muted, "checking"),
        None => ("■", theme.muted, "read-only"),
    };
    let left_text = vec![
        Span::styled(
            "TradeBoard",
            Style::default().fg(theme.accent).add_modifier(Modifier::BOLD),
        ),
        Span::raw(" - "),
        Span::raw(app.source_label.as_str()),
        Span::raw(" "),
        Span::styled(status_symbol, Style::default().fg(status_color)),
        Span::styled(format!(" {status_text}"), Style::default().fg(theme.muted)),
    ];
    let left = Paragraph::new(Line::from(left_text)).block(Block::default().borders(Borders::ALL));
    f.render_widget(left, header_chunks[0]);

    // Center: counts
    let table = app.dashboard.table();
    let center_text = format!(
        "Records: {} | Shown: {} | Codes: {}",
        table.total_count,
        table.filtered_count,
        app.dashboard.trade_codes().len()
    );
    let center = Paragraph::new(center_text)
        .style(Style::default().fg(theme.warning))
        .block(Block::default().borders(Borders::ALL));
    f.render_widget(center, header_chunks[1]);

    // Right: help hint
    let right = Paragraph::new("[F1]Help [q]Quit")
        .style(Style::default().fg(theme.muted))
        .block(Block::default().borders(Borders::ALL));
    f.render_widget(right, header_chunks[2]);
}

fn draw_charts(f: &mut Frame, area: Rect, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(area);

    draw_compare_chart(f, chunks[0], app);
    draw_price_chart(f, chunks[1], app);
}

fn draw_message(f: &mut Frame, area: Rect, app: &App, message: &str, is_error: bool) {
    let (title, color) = if is_error {
        (" Error ", app.theme.negative)
    } else {
        (" Status ", app.theme.muted)
    };
    let mut lines = vec![Line::from(Span::styled(message, Style::default().fg(color)))];
    if is_error {
        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled(
            "Press r to retry",
            Style::default().fg(app.theme.muted),
        )));
    }
    let paragraph = Paragraph::new(lines)
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true })
        .block(
            Block::default()
                .title(title)
                .borders(Borders::ALL)
                .border_style(Style::default().fg(color)),
        );
    f.render_widget(paragraph, area);
}

pub(crate) fn centered_rect(percent_x: u16, percent_y: u16, r: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(r);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}

pub(crate) fn format_volume(volume: u64) -> String {
    if volume >= 1_000_000 {
        format!("{:.1}M", volume as f64 / 1_000_000.0)
    } else if volume >= 1_000 {
        format!("{:.1}K", volume as f64 / 1_000.0)
    } else {
        volume.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::{backend::TestBackend, Terminal};
    use tradeboard_core::{Action, Dashboard, TradeRecord};

    use crate::theme::Theme;

    fn render(app: &App) -> String {
        let backend = TestBackend::new(120, 40);
        let mut terminal = Terminal::new(backend).unwrap();
        terminal.draw(|f| draw(f, app)).unwrap();
        terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|cell| cell.symbol())
            .collect::<String>()
    }

    fn sample_app() -> App {
        let mut dashboard = Dashboard::new(true);
        let records = (1..=3)
            .map(|i| TradeRecord {
                id: i,
                trade_code: "GP".into(),
                date: chrono::NaiveDate::from_ymd_opt(2024, 2, i as u32).unwrap(),
                open: 300.0,
                high: 310.0,
                low: 295.0,
                close: 300.0 + i as f64,
                volume: 1_500_000,
            })
            .collect();
        dashboard.process_action(Action::Loaded(records));
        App::new(dashboard, "http://localhost:8000/api", Theme::default())
    }

    #[test]
    fn ready_dashboard_renders_table_and_charts() {
        let screen = render(&sample_app());
        assert!(screen.contains("Trade Code"));
        assert!(screen.contains("2024-02-03"));
        assert!(screen.contains("Page 1/1"));
        assert!(screen.contains("Price & Volume"));
    }

    #[test]
    fn failed_fetch_hides_table() {
        let mut app = sample_app();
        app.dispatch(Action::LoadFailed("Failed to fetch trades".into()));
        let screen = render(&app);
        assert!(screen.contains("Failed to fetch trades"));
        assert!(!screen.contains("Trade Code"));
    }

    #[test]
    fn volumes_are_abbreviated() {
        assert_eq!(format_volume(999), "999");
        assert_eq!(format_volume(2_285_416), "2.3M");
        assert_eq!(format_volume(88_120), "88.1K");
    }
}
