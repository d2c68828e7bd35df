use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    Frame,
    layout::Rect,
    style::{Color, Modifier, Style},
    symbols,
    text::{Line, Span},
    widgets::{Axis, BarChart, Block, Borders, Chart, Dataset, GraphType, Paragraph},
};

use querydeck_engine::{ChartKind, ChartView, color_for};
use querydeck_types::QueryResult;

const PIE_BAR_WIDTH: usize = 24;

/// Chart panel; `b`/`l`/`p` switch the kind without touching the data.
pub struct ChartComponent {
    view: ChartView,
}

impl ChartComponent {
    pub fn from_result(result: &QueryResult) -> Option<Self> {
        ChartView::from_config(result.chart_config.as_ref()).map(|view| Self { view })
    }

    pub fn handle_input(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Char('b') => self.view.set_type(ChartKind::Bar),
            KeyCode::Char('l') => self.view.set_type(ChartKind::Line),
            KeyCode::Char('p') => self.view.set_type(ChartKind::Pie),
            _ => {}
        }
    }

    pub fn render(&mut self, f: &mut Frame, area: Rect, focused: bool) {
        let border = if focused {
            Style::default().fg(Color::Cyan)
        } else {
            Style::default()
        };
        let block = Block::default()
            .title(format!(" Chart ({})  b/l/p to switch ", self.view.active().label()))
            .borders(Borders::ALL)
            .border_style(border);
        let inner = block.inner(area);
        f.render_widget(block, area);
        if inner.height == 0 {
            return;
        }

        match self.view.active() {
            ChartKind::Bar => self.render_bar(f, inner),
            ChartKind::Line => self.render_line(f, inner),
            ChartKind::Pie => self.render_pie(f, inner),
        }
    }

    fn render_bar(&self, f: &mut Frame, area: Rect) {
        let primary = self.view.primary_series();
        let pairs: Vec<(String, u64)> = self
            .view
            .labels()
            .iter()
            .zip(primary.values.iter())
            .map(|(label, value)| (label.clone(), value.max(0.0).round() as u64))
            .collect();
        let data: Vec<(&str, u64)> = pairs.iter().map(|(l, v)| (l.as_str(), *v)).collect();

        let (r, g, b) = color_for(0);
        let chart = BarChart::default()
            .data(data.as_slice())
            .bar_width(7)
            .bar_gap(1)
            .bar_style(Style::default().fg(Color::Rgb(r, g, b)))
            .value_style(Style::default().add_modifier(Modifier::BOLD));
        f.render_widget(chart, area);
    }

    fn render_line(&self, f: &mut Frame, area: Rect) {
        let primary = self.view.primary_series();
        let points: Vec<(f64, f64)> = primary
            .values
            .iter()
            .enumerate()
            .map(|(i, v)| (i as f64, *v))
            .collect();
        if points.is_empty() {
            return;
        }

        let (r, g, b) = color_for(0);
        let dataset = Dataset::default()
            .name(primary.label.clone())
            .marker(symbols::Marker::Braille)
            .graph_type(GraphType::Line)
            .style(Style::default().fg(Color::Rgb(r, g, b)))
            .data(&points);

        let max_y = self.view.max_value().max(1.0);
        let labels = self.view.labels();
        let x_labels: Vec<Span> = vec![
            Span::raw(labels.first().cloned().unwrap_or_default()),
            Span::raw(labels.last().cloned().unwrap_or_default()),
        ];
        let y_labels: Vec<Span> = vec![
            Span::raw("0"),
            Span::raw(format!("{:.0}", max_y)),
        ];

        let chart = Chart::new(vec![dataset])
            .x_axis(
                Axis::default()
                    .bounds([0.0, (points.len() - 1).max(1) as f64])
                    .labels(x_labels),
            )
            .y_axis(Axis::default().bounds([0.0, max_y]).labels(y_labels));
        f.render_widget(chart, area);
    }

    /// Pie as a legend of proportion bars; no axes, matching the engine's
    /// `uses_axes` contract.
    fn render_pie(&self, f: &mut Frame, area: Rect) {
        let lines: Vec<Line> = self
            .view
            .slices()
            .into_iter()
            .map(|(label, value, share, (r, g, b))| {
                let filled = (share * PIE_BAR_WIDTH as f64).round() as usize;
                Line::from(vec![
                    Span::styled(
                        "█".repeat(filled.max(usize::from(share > 0.0))),
                        Style::default().fg(Color::Rgb(r, g, b)),
                    ),
                    Span::raw(format!(" {} — {} ({:.1}%)", label, value, share * 100.0)),
                ])
            })
            .collect();
        f.render_widget(Paragraph::new(lines), area);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::{KeyEventKind, KeyEventState, KeyModifiers};
    use querydeck_types::{ChartConfig, ChartDataset, ChartType};
    use serde_json::json;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent {
            code,
            modifiers: KeyModifiers::NONE,
            kind: KeyEventKind::Press,
            state: KeyEventState::NONE,
        }
    }

    fn result_with_chart() -> QueryResult {
        QueryResult {
            chart_config: Some(ChartConfig {
                chart_type: ChartType::Bar,
                labels: vec!["A".to_string(), "B".to_string()],
                datasets: vec![ChartDataset {
                    label: "count".to_string(),
                    values: vec![json!(3), json!(1)],
                }],
            }),
            ..QueryResult::default()
        }
    }

    #[test]
    fn test_keys_switch_chart_kind() {
        let mut chart = ChartComponent::from_result(&result_with_chart()).unwrap();
        assert_eq!(chart.view.active(), ChartKind::Bar);
        chart.handle_input(key(KeyCode::Char('p')));
        assert_eq!(chart.view.active(), ChartKind::Pie);
        chart.handle_input(key(KeyCode::Char('l')));
        assert_eq!(chart.view.active(), ChartKind::Line);
        chart.handle_input(key(KeyCode::Char('b')));
        assert_eq!(chart.view.active(), ChartKind::Bar);
    }

    #[test]
    fn test_absent_config_builds_no_component() {
        assert!(ChartComponent::from_result(&QueryResult::default()).is_none());
    }
}
