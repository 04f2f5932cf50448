//! Preview pane — KPI entries, asset breakdown, chart series.

use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::Style;
use ratatui::symbols;
use ratatui::text::{Line, Span};
use ratatui::widgets::{Axis, Chart, Dataset, GraphType, Paragraph};
use ratatui::Frame;

use serde_json::Value;

use crate::app::AppState;
use crate::theme;

pub fn render(f: &mut Frame, area: Rect, app: &AppState) {
    if app.preview.is_empty() {
        render_empty(f, area);
        return;
    }

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(6), Constraint::Percentage(55)])
        .split(area);

    render_tables(f, rows[0], app);
    render_chart(f, rows[1], app);
}

fn render_empty(f: &mut Frame, area: Rect) {
    let lines = vec![
        Line::from(""),
        Line::from(Span::styled(
            "No preview loaded.",
            theme::muted(),
        )),
        Line::from(""),
        Line::from(Span::styled(
            "Open a product with Enter, pick an asset %, press r to run.",
            theme::muted(),
        )),
    ];
    f.render_widget(Paragraph::new(lines), area);
}

fn render_tables(f: &mut Frame, area: Rect, app: &AppState) {
    let preview = &app.preview;
    let mut lines: Vec<Line> = Vec::new();

    lines.push(Line::from(Span::styled(
        preview.label.clone(),
        theme::accent_bold(),
    )));
    lines.push(Line::from(""));

    if let Some(kpis) = &preview.kpis {
        lines.push(Line::from(Span::styled("KPIs", theme::accent_bold())));
        if kpis.is_empty() {
            lines.push(Line::from(Span::styled("  (none)", theme::muted())));
        }
        for (name, value) in kpis.entries() {
            entry_line(&mut lines, name, value);
        }
        lines.push(Line::from(""));
    }

    if let Some(assets) = &preview.assets {
        lines.push(Line::from(Span::styled("Assets", theme::accent_bold())));
        if assets.is_empty() {
            lines.push(Line::from(Span::styled("  (none)", theme::muted())));
        }
        for (name, value) in assets.entries() {
            entry_line(&mut lines, name, value);
        }
    }

    f.render_widget(Paragraph::new(lines), area);
}

/// Render one opaque JSON entry. Numbers get sign coloring; everything else
/// is relayed as compact JSON text.
fn entry_line<'a>(lines: &mut Vec<Line<'a>>, name: &str, value: &Value) {
    let (display, style) = match value {
        Value::Number(n) => {
            let v = n.as_f64().unwrap_or(0.0);
            (format!("{v:.2}"), theme::metric_color(v))
        }
        Value::String(s) => (s.clone(), theme::accent()),
        other => (other.to_string(), theme::neutral()),
    };
    lines.push(Line::from(vec![
        Span::styled(format!("  {:>18}: ", truncate(name, 18)), theme::muted()),
        Span::styled(display, style),
    ]));
}

fn render_chart(f: &mut Frame, area: Rect, app: &AppState) {
    let Some(chart_data) = &app.preview.chart else {
        return;
    };
    if chart_data.is_empty() {
        f.render_widget(
            Paragraph::new(Span::styled("No chart data.", theme::muted())),
            area,
        );
        return;
    }

    // BTreeMap ordering gives a stable x axis (labels sort lexicographically,
    // which for ISO dates is chronological).
    let series: Vec<(f64, f64)> = chart_data
        .values()
        .enumerate()
        .map(|(i, &v)| (i as f64, v))
        .collect();

    let min_y = series.iter().map(|&(_, y)| y).fold(f64::INFINITY, f64::min);
    let max_y = series
        .iter()
        .map(|&(_, y)| y)
        .fold(f64::NEG_INFINITY, f64::max);
    let padding = (max_y - min_y).abs() * 0.05;
    let y_min = min_y - padding;
    let y_max = max_y + padding;
    let x_max = series.len().saturating_sub(1) as f64;

    let first_label = chart_data.keys().next().cloned().unwrap_or_default();
    let last_label = chart_data.keys().next_back().cloned().unwrap_or_default();

    let dataset = Dataset::default()
        .name("backtest")
        .marker(symbols::Marker::Braille)
        .style(Style::default().fg(theme::ACCENT))
        .graph_type(GraphType::Line)
        .data(&series);

    let chart = Chart::new(vec![dataset])
        .x_axis(
            Axis::default()
                .style(theme::muted())
                .bounds([0.0, x_max.max(1.0)])
                .labels(vec![
                    Span::styled(first_label, theme::muted()),
                    Span::styled(last_label, theme::muted()),
                ]),
        )
        .y_axis(
            Axis::default()
                .style(theme::muted())
                .bounds([y_min, y_max])
                .labels(vec![
                    Span::styled(format!("{y_min:.1}"), theme::muted()),
                    Span::styled(format!("{y_max:.1}"), theme::muted()),
                ]),
        );

    f.render_widget(chart, area);
}

fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        s.to_string()
    } else {
        let head: String = s.chars().take(max.saturating_sub(1)).collect();
        format!("{head}…")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn truncate_preserves_short_names() {
        assert_eq!(truncate("total value", 18), "total value");
    }

    #[test]
    fn truncate_elides_long_names() {
        let out = truncate("a very long kpi name indeed", 10);
        assert_eq!(out.chars().count(), 10);
        assert!(out.ends_with('…'));
    }
}
