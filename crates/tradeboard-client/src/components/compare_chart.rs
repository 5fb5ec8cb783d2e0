// crates/tradeboard-client/src/components/compare_chart.rs

use ratatui::{
    layout::Rect,
    style::Style,
    symbols,
    text::Span,
    widgets::{Axis, Block, Borders, Chart, Dataset, GraphType, Paragraph},
    Frame,
};

use crate::app::App;
use crate::components::price_chart::bounds;

/// Two instruments on a shared date axis. Missing values leave gaps.
pub fn draw_compare_chart(f: &mut Frame, area: Rect, app: &App) {
    let theme = &app.theme;
    let field = app.compare_field;
    let series = app.dashboard.comparison();

    let title = format!(
        " Compare {} vs {} | {} ",
        series.code_a, series.code_b, field
    );
    let block = Block::default()
        .title(title)
        .borders(Borders::ALL)
        .border_style(Style::default().fg(theme.accent));

    if series.points.is_empty() {
        let empty = Paragraph::new("Nothing to compare")
            .style(Style::default().fg(theme.muted))
            .block(block);
        f.render_widget(empty, area);
        return;
    }

    let runs_a = runs(&series.values_a(field));
    let runs_b = runs(&series.values_b(field));

    let (y_min, y_max) = bounds(
        runs_a
            .iter()
            .chain(runs_b.iter())
            .flatten()
            .map(|&(_, v)| v),
    );
    let x_max = series.points.len().saturating_sub(1).max(1) as f64;

    let labels = series.labels();
    let first = labels.first().cloned().unwrap_or_default();
    let last = labels.last().cloned().unwrap_or_default();

    let mut datasets = Vec::with_capacity(runs_a.len() + runs_b.len());
    datasets.extend(line_datasets(
        &runs_a,
        &series.code_a,
        symbols::Marker::Braille,
        Style::default().fg(theme.series_a),
    ));
    datasets.extend(line_datasets(
        &runs_b,
        &series.code_b,
        symbols::Marker::Dot,
        Style::default().fg(theme.series_b),
    ));

    let chart = Chart::new(datasets)
        .block(block)
        .x_axis(
            Axis::default()
                .style(Style::default().fg(theme.muted))
                .bounds([0.0, x_max])
                .labels(vec![Span::raw(first), Span::raw(last)]),
        )
        .y_axis(
            Axis::default()
                .style(Style::default().fg(theme.muted))
                .bounds([y_min, y_max])
                .labels(vec![
                    Span::raw(format!("{y_min:.2}")),
                    Span::raw(format!("{y_max:.2}")),
                ]),
        );

    f.render_widget(chart, area);
}

/// Split aligned values into contiguous runs of `(x, value)` points.
///
/// A `None` ends the current run, so no line segment spans a date the
/// instrument has no record for.
pub(crate) fn runs(values: &[Option<f64>]) -> Vec<Vec<(f64, f64)>> {
    let mut runs = Vec::new();
    let mut current = Vec::new();
    for (i, value) in values.iter().enumerate() {
        match value {
            Some(v) => current.push((i as f64, *v)),
            None if !current.is_empty() => runs.push(std::mem::take(&mut current)),
            None => {}
        }
    }
    if !current.is_empty() {
        runs.push(current);
    }
    runs
}

/// One line dataset per run; only the first carries the legend name.
fn line_datasets<'a>(
    runs: &'a [Vec<(f64, f64)>],
    name: &str,
    marker: symbols::Marker,
    style: Style,
) -> Vec<Dataset<'a>> {
    runs.iter()
        .enumerate()
        .map(|(i, run)| {
            let dataset = Dataset::default()
                .marker(marker)
                .graph_type(GraphType::Line)
                .style(style)
                .data(run);
            if i == 0 {
                dataset.name(name.to_string())
            } else {
                dataset
            }
        })
        .collect()
}
