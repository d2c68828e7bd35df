//! Console rendering of an interpreted result.

use std::fmt;

use owo_colors::OwoColorize;

use crate::presentation::formatters::text;
use crate::presentation::view_models::{
    ChartSection, MetricCard, ResultViewModel, Section, StatusBadge, StatusLevel, TableSection,
};

const MAX_CELL_WIDTH: usize = 24;
const CHART_BAR_WIDTH: usize = 30;

pub struct ResultView<'a> {
    data: &'a ResultViewModel,
    width: usize,
}

impl<'a> ResultView<'a> {
    pub fn new(data: &'a ResultViewModel, width: usize) -> Self {
        Self { data, width }
    }
}

impl fmt::Display for ResultView<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.data.sections.is_empty() {
            writeln!(f, "{}", "The backend returned an empty result.".dimmed())?;
            return Ok(());
        }

        for (i, section) in self.data.sections.iter().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            match section {
                Section::Answer { badge, text } => render_answer(f, badge, text)?,
                Section::Sql { query } => render_sql(f, query)?,
                Section::Metrics { column, cards } => render_metrics(f, column.as_deref(), cards)?,
                Section::Table(table) => render_table(f, table, self.width)?,
                Section::Chart(chart) => render_chart(f, chart)?,
                Section::Panels {
                    insights,
                    suggestions,
                } => render_panels(f, insights, suggestions)?,
            }
        }
        Ok(())
    }
}

fn render_badge(badge: &StatusBadge) -> String {
    let label = format!("[{}]", badge.label);
    match badge.level {
        StatusLevel::Success => label.green().to_string(),
        StatusLevel::Info => label.blue().to_string(),
        StatusLevel::Warning => label.yellow().to_string(),
        StatusLevel::Error => label.red().to_string(),
    }
}

fn render_answer(f: &mut fmt::Formatter<'_>, badge: &StatusBadge, answer: &str) -> fmt::Result {
    writeln!(f, "{} {}", render_badge(badge), answer)
}

fn render_sql(f: &mut fmt::Formatter<'_>, query: &str) -> fmt::Result {
    writeln!(f, "{}", "SQL".dimmed())?;
    for line in query.lines() {
        writeln!(f, "  {}", line.cyan())?;
    }
    Ok(())
}

fn render_metrics(
    f: &mut fmt::Formatter<'_>,
    column: Option<&str>,
    cards: &[MetricCard],
) -> fmt::Result {
    match column {
        Some(column) => writeln!(f, "{} {}", "Metrics for".dimmed(), column.bold())?,
        None => writeln!(f, "{}", "Metrics".dimmed())?,
    }
    let line = cards
        .iter()
        .map(|card| format!("{}: {}", card.label, card.value.bold()))
        .collect::<Vec<_>>()
        .join("  |  ");
    writeln!(f, "  {}", line)
}

fn render_table(f: &mut fmt::Formatter<'_>, table: &TableSection, width: usize) -> fmt::Result {
    // cap per-column width so wide results degrade instead of wrapping
    let cap = MAX_CELL_WIDTH.min(width / table.columns.len().max(1)).max(6);
    let widths: Vec<usize> = table
        .columns
        .iter()
        .enumerate()
        .map(|(i, column)| {
            table
                .rows
                .iter()
                .map(|row| row[i].chars().count())
                .chain([column.chars().count()])
                .max()
                .unwrap_or(0)
                .min(cap)
        })
        .collect();

    let header = table
        .columns
        .iter()
        .zip(&widths)
        .map(|(column, w)| format!("{:<1$}", text::truncate(column, *w), *w))
        .collect::<Vec<_>>()
        .join("  ");
    writeln!(f, "{}", header.bold())?;
    writeln!(f, "{}", "-".repeat(header.chars().count()).dimmed())?;

    if table.rows.is_empty() {
        writeln!(f, "{}", "(no matching rows)".dimmed())?;
    }
    for row in &table.rows {
        let line = row
            .iter()
            .zip(&widths)
            .map(|(cell, w)| format!("{:<1$}", text::truncate(cell, *w), *w))
            .collect::<Vec<_>>()
            .join("  ");
        writeln!(f, "{}", line)?;
    }
    writeln!(f, "{}", table.summary.dimmed())?;
    writeln!(f, "{}", table.page_line.dimmed())
}

fn render_chart(f: &mut fmt::Formatter<'_>, chart: &ChartSection) -> fmt::Result {
    writeln!(f, "{} ({})", "Chart".dimmed(), chart.kind)?;

    let label_width = chart
        .entries
        .iter()
        .map(|e| e.label.chars().count())
        .max()
        .unwrap_or(0)
        .min(MAX_CELL_WIDTH);
    let max_value = chart.entries.iter().map(|e| e.value).fold(0.0_f64, f64::max);

    for entry in &chart.entries {
        let filled = if max_value > 0.0 {
            ((entry.value / max_value) * CHART_BAR_WIDTH as f64).round() as usize
        } else {
            0
        };
        let (r, g, b) = entry.color;
        let bar = "█".repeat(filled.max(usize::from(entry.value > 0.0)));
        write!(
            f,
            "  {:<width$}  {}",
            text::truncate(&entry.label, label_width),
            bar.truecolor(r, g, b),
            width = label_width
        )?;
        if chart.kind == "pie" {
            writeln!(f, " {} ({:.1}%)", entry.value, entry.share * 100.0)?;
        } else {
            writeln!(f, " {}", entry.value)?;
        }
    }
    Ok(())
}

fn render_panels(
    f: &mut fmt::Formatter<'_>,
    insights: &[String],
    suggestions: &[String],
) -> fmt::Result {
    if !insights.is_empty() {
        writeln!(f, "{}", "Insights".dimmed())?;
        for insight in insights {
            writeln!(f, "  - {}", insight)?;
        }
    }
    if !suggestions.is_empty() {
        writeln!(f, "{}", "Suggested follow-ups".dimmed())?;
        for (i, suggestion) in suggestions.iter().enumerate() {
            writeln!(f, "  {}. {}", i + 1, suggestion)?;
        }
    }
    Ok(())
}
