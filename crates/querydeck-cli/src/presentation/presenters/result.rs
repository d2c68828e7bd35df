//! Result interpretation: which sections a `QueryResult` renders as.
//!
//! Pure function, no terminal access. Section order is fixed
//! (answer, SQL, metrics, table, chart, panels) and each predicate is
//! evaluated on its own field group, never inferred from another.

use querydeck_engine::{ChartView, TableView, cell_display};
use querydeck_types::{AnswerMode, QueryResult};

use crate::presentation::formatters::{number, table};
use crate::presentation::view_models::{
    ChartEntry, ChartSection, MetricCard, ResultViewModel, Section, StatusBadge, TableSection,
};

pub fn present_result(result: &QueryResult) -> ResultViewModel {
    let mut sections = Vec::new();

    if let Some(answer) = result.answer.as_deref().filter(|s| !s.trim().is_empty()) {
        sections.push(Section::Answer {
            badge: mode_badge(result.mode),
            text: answer.to_string(),
        });
    }

    if let Some(sql) = result.sql_query.as_deref().filter(|s| !s.trim().is_empty()) {
        sections.push(Section::Sql {
            query: sql.to_string(),
        });
    }

    if let Some(metrics) = &result.metrics {
        let headline = metrics.kpis.headline.as_ref();
        sections.push(Section::Metrics {
            column: headline.map(|h| h.column.clone()),
            cards: vec![
                MetricCard {
                    label: "Total Records".to_string(),
                    value: headline
                        .and_then(|h| h.total_records)
                        .map(number::format_count)
                        .unwrap_or_else(|| number::format_count(metrics.kpis.total_rows)),
                },
                MetricCard {
                    label: "Average".to_string(),
                    value: number::format_stat(headline.and_then(|h| h.avg)),
                },
                MetricCard {
                    label: "Maximum".to_string(),
                    value: number::format_stat(headline.and_then(|h| h.max)),
                },
                MetricCard {
                    label: "Minimum".to_string(),
                    value: number::format_stat(headline.and_then(|h| h.min)),
                },
            ],
        });
    }

    if let (Some(columns), Some(data)) = (&result.columns, &result.data) {
        sections.push(Section::Table(build_table_section(
            columns.clone(),
            data.clone(),
            result.total_rows,
        )));
    }

    if let Some(chart) = ChartView::from_config(result.chart_config.as_ref()) {
        sections.push(Section::Chart(build_chart_section(&chart)));
    }

    let insights = result.insights.clone().unwrap_or_default();
    let suggestions = result.suggestions.clone().unwrap_or_default();
    if !insights.is_empty() || !suggestions.is_empty() {
        sections.push(Section::Panels {
            insights,
            suggestions,
        });
    }

    ResultViewModel { sections }
}

fn mode_badge(mode: AnswerMode) -> StatusBadge {
    match mode {
        AnswerMode::Chat | AnswerMode::Rag => StatusBadge::info(mode.label()),
        AnswerMode::Sql | AnswerMode::Hybrid => StatusBadge::success(mode.label()),
    }
}

/// Snapshot of the first page; the dashboard keeps a live `TableView`
/// instead, but both read the same engine.
fn build_table_section(
    columns: Vec<String>,
    data: Vec<querydeck_types::Row>,
    total_rows: Option<u64>,
) -> TableSection {
    let view = TableView::new(columns.clone(), data, total_rows);
    let rows = view
        .visible_rows()
        .iter()
        .map(|row| {
            columns
                .iter()
                .map(|column| cell_display(row.get(column)))
                .collect()
        })
        .collect();
    TableSection {
        summary: table::format_summary(&view.summary()),
        page_line: table::format_page_line(view.page(), view.total_pages_displayed()),
        columns,
        rows,
    }
}

fn build_chart_section(chart: &ChartView) -> ChartSection {
    ChartSection {
        kind: chart.active().label().to_string(),
        entries: chart
            .slices()
            .into_iter()
            .map(|(label, value, share, color)| ChartEntry {
                label,
                value,
                share,
                color,
            })
            .collect(),
    }
}
