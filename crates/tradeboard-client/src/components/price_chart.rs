// crates/tradeboard-client/src/components/price_chart.rs

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    symbols,
    text::Span,
    widgets::{Axis, BarChart, Block, Borders, Chart, Dataset, GraphType, Paragraph},
    Frame,
};

use tradeboard_core::PriceVolumeSeries;

use crate::app::App;
use crate::ui::format_volume;

/// Close line over volume bars for the selected code and time-frame.
pub fn draw_price_chart(f: &mut Frame, area: Rect, app: &App) {
    let theme = &app.theme;
    let view = app.dashboard.view();
    let series = app.dashboard.price_series();

    let title = format!(
        " Price & Volume | {} | {} ",
        view.chart_trade_code,
        view.chart_time_frame.label()
    );
    let block = Block::default()
        .title(title)
        .borders(Borders::ALL)
        .border_style(Style::default().fg(theme.accent));

    if series.is_empty() {
        let empty = Paragraph::new("No data for this trade code")
            .style(Style::default().fg(theme.muted))
            .block(block);
        f.render_widget(empty, area);
        return;
    }

    let inner = block.inner(area);
    f.render_widget(block, area);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Percentage(65), Constraint::Percentage(35)])
        .split(inner);

    draw_close_line(f, chunks[0], app, &series);
    draw_volume_bars(f, chunks[1], app, &series);
}

fn draw_close_line(f: &mut Frame, area: Rect, app: &App, series: &PriceVolumeSeries) {
    let theme = &app.theme;
    let data: Vec<(f64, f64)> = series
        .closes()
        .into_iter()
        .enumerate()
        .map(|(i, close)| (i as f64, close))
        .collect();

    let (y_min, y_max) = bounds(data.iter().map(|&(_, v)| v));
    let x_max = (data.len().saturating_sub(1)).max(1) as f64;

    let labels = series.labels();
    let first = labels.first().copied().unwrap_or_default();
    let last = labels.last().copied().unwrap_or_default();

    let datasets = vec![Dataset::default()
        .name("Close")
        .marker(symbols::Marker::Braille)
        .graph_type(GraphType::Line)
        .style(Style::default().fg(theme.series_a))
        .data(&data)];

    let chart = Chart::new(datasets)
        .x_axis(
            Axis::default()
                .style(Style::default().fg(theme.muted))
                .bounds([0.0, x_max])
                .labels(vec![Span::raw(first.to_string()), Span::raw(last.to_string())]),
        )
        .y_axis(
            Axis::default()
                .style(Style::default().fg(theme.muted))
                .bounds([y_min, y_max])
                .labels(vec![
                    Span::raw(format!("{y_min:.2}")),
                    Span::styled(
                        format!("{y_max:.2}"),
                        Style::default().add_modifier(Modifier::BOLD),
                    ),
                ]),
        );

    f.render_widget(chart, area);
}

fn draw_volume_bars(f: &mut Frame, area: Rect, app: &App, series: &PriceVolumeSeries) {
    const BAR_WIDTH: u16 = 3;
    const BAR_GAP: u16 = 1;

    // Only the most recent points that fit.
    let fits = (area.width / (BAR_WIDTH + BAR_GAP)).max(1) as usize;
    let skip = series.len().saturating_sub(fits);
    let bars: Vec<(&str, u64)> = series
        .points
        .iter()
        .skip(skip)
        .map(|p| ("", p.volume))
        .collect();
    let peak = bars.iter().map(|&(_, v)| v).max().unwrap_or_default();

    let chart = BarChart::default()
        .block(Block::default().title(format!("Volume (max {})", format_volume(peak))))
        .data(bars.as_slice())
        .bar_width(BAR_WIDTH)
        .bar_gap(BAR_GAP)
        .bar_style(Style::default().fg(app.theme.series_b))
        .value_style(Style::default().fg(app.theme.series_b));

    f.render_widget(chart, area);
}

/// Padded `[min, max]` for a y axis.
pub(crate) fn bounds(values: impl Iterator<Item = f64>) -> (f64, f64) {
    let (min, max) = values.fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), v| {
        (lo.min(v), hi.max(v))
    });
    if !min.is_finite() || !max.is_finite() {
        return (0.0, 1.0);
    }
    let pad = if max > min { (max - min) * 0.05 } else { 1.0 };
    (min - pad, max + pad)
}

#[cfg(test)]
mod tests {
    use super::bounds;

    #[test]
    fn bounds_pad_flat_and_empty_series() {
        assert_eq!(bounds([5.0, 5.0].into_iter()), (4.0, 6.0));
        assert_eq!(bounds(std::iter::empty()), (0.0, 1.0));
        let (lo, hi) = bounds([10.0, 30.0].into_iter());
        assert!(lo < 10.0 && hi > 30.0);
    }
}
