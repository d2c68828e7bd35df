//! View model for one interpreted query result.
//!
//! A result renders as an ordered list of sections; each section exists
//! independently of the others, so a chat answer, a bare table, or a full
//! answer+SQL+metrics+table+chart+panels stack all flow through the same
//! shape.

use serde::Serialize;

use super::common::StatusBadge;

#[derive(Debug, Clone, Serialize)]
pub struct ResultViewModel {
    pub sections: Vec<Section>,
}

impl ResultViewModel {
    pub fn suggestions(&self) -> &[String] {
        for section in &self.sections {
            if let Section::Panels { suggestions, .. } = section {
                return suggestions;
            }
        }
        &[]
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(tag = "section", rename_all = "snake_case")]
pub enum Section {
    /// Mode badge plus the natural-language answer.
    Answer { badge: StatusBadge, text: String },
    /// The SQL the backend generated and ran.
    Sql { query: String },
    /// Headline metric cards (total / avg / max / min).
    Metrics {
        column: Option<String>,
        cards: Vec<MetricCard>,
    },
    Table(TableSection),
    Chart(ChartSection),
    /// Insights and follow-up suggestions; two columns when both present.
    Panels {
        insights: Vec<String>,
        suggestions: Vec<String>,
    },
}

#[derive(Debug, Clone, Serialize)]
pub struct MetricCard {
    pub label: String,
    pub value: String,
}

/// First page of the result table, cells already display-formatted.
#[derive(Debug, Clone, Serialize)]
pub struct TableSection {
    pub columns: Vec<String>,
    pub rows: Vec<Vec<String>>,
    pub summary: String,
    pub page_line: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct ChartSection {
    pub kind: String,
    pub entries: Vec<ChartEntry>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ChartEntry {
    pub label: String,
    pub value: f64,
    /// Fraction of the category total, 0 when the total is 0.
    pub share: f64,
    pub color: (u8, u8, u8),
}
