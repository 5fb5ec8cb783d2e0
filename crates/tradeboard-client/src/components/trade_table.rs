// crates/tradeboard-client/src/components/trade_table.rs

use ratatui::{
    layout::{Constraint, Rect},
    style::{Modifier, Style},
    widgets::{Block, Borders, Cell, Row, Table},
    Frame,
};

use tradeboard_core::{Column, TradeRecord};

use crate::app::App;

pub fn draw_trade_table(f: &mut Frame, area: Rect, app: &App) {
    let theme = &app.theme;
    let view = app.dashboard.view();
    let table = app.dashboard.table();

    // Header with the active sort arrow
    let header_cells: Vec<Cell> = Column::ALL
        .iter()
        .enumerate()
        .map(|(i, column)| {
            let arrow = match view.sort {
                Some(sort) if sort.column == *column => format!(" {}", sort.direction.arrow()),
                _ => String::new(),
            };
            Cell::from(format!("{}:{}{}", i + 1, column.label(), arrow))
        })
        .collect();
    let header = Row::new(header_cells)
        .style(Style::default().fg(theme.muted).add_modifier(Modifier::BOLD));

    let rows: Vec<Row> = table
        .rows
        .iter()
        .enumerate()
        .map(|(i, record)| {
            let style = if i == app.selected_row {
                Style::default().bg(theme.highlight)
            } else {
                Style::default()
            };
            let close_style = if record.close >= record.open {
                style.fg(theme.positive)
            } else {
                style.fg(theme.negative)
            };

            Row::new(cells(record, style, close_style))
        })
        .collect();

    let widths = [
        Constraint::Length(6),   // ID
        Constraint::Min(12),     // Trade code
        Constraint::Length(12),  // Date
        Constraint::Length(10),  // Open
        Constraint::Length(10),  // High
        Constraint::Length(10),  // Low
        Constraint::Length(10),  // Close
        Constraint::Length(12),  // Volume
    ];

    let filter = if view.filter_code.is_empty() {
        "All".to_string()
    } else {
        view.filter_code.clone()
    };
    let title = format!(
        " Trades [{}] | Page {}/{} | {} of {} ",
        filter, table.page_index, table.total_pages, table.filtered_count, table.total_count
    );

    let widget = Table::new(rows, widths).header(header).block(
        Block::default()
            .title(title)
            .borders(Borders::ALL)
            .border_style(Style::default().fg(theme.accent)),
    );

    f.render_widget(widget, area);
}

fn cells(record: &TradeRecord, style: Style, close_style: Style) -> Vec<Cell<'static>> {
    vec![
        Cell::from(record.id.to_string()).style(style),
        Cell::from(record.trade_code.clone()).style(style),
        Cell::from(record.date_label()).style(style),
        Cell::from(format_price(record.open)).style(style),
        Cell::from(format_price(record.high)).style(style),
        Cell::from(format_price(record.low)).style(style),
        Cell::from(format_price(record.close)).style(close_style),
        Cell::from(record.volume.to_string()).style(style),
    ]
}

fn format_price(price: f64) -> String {
    format!("{price:.2}")
}
