//! The query response contract.
//!
//! One `QueryResult` arrives per question as a single self-contained JSON
//! message. Every optional group is independent: consumers must never infer
//! one field's presence from another. The SQL-bearing group (`sql_query`,
//! `columns`, `data`, `total_rows`, `metrics`) is all-or-nothing by
//! construction on the backend, but the presentation predicates still check
//! each field on its own.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// One row of tabular data, keyed by column name.
pub type Row = serde_json::Map<String, Value>;

/// How the backend classified and answered a question.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AnswerMode {
    #[default]
    Chat,
    Sql,
    Rag,
    Hybrid,
}

impl AnswerMode {
    pub fn label(&self) -> &'static str {
        match self {
            AnswerMode::Chat => "CHAT",
            AnswerMode::Sql => "SQL",
            AnswerMode::Rag => "DOCUMENT",
            AnswerMode::Hybrid => "HYBRID",
        }
    }
}

/// The polymorphic answer to one question.
///
/// Created fresh per query submission and fully discarded when a new query
/// starts; interactive view state (table page, chart type) must never
/// outlive the result that produced it.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct QueryResult {
    #[serde(default)]
    pub mode: AnswerMode,

    /// Natural-language answer, possible in any mode.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub answer: Option<String>,

    /// Generated SQL, present only for sql/hybrid answers.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sql_query: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub columns: Option<Vec<String>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<Vec<Row>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total_rows: Option<u64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metrics: Option<Metrics>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub chart_config: Option<ChartConfig>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub insights: Option<Vec<String>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub suggestions: Option<Vec<String>>,
}

/// Statistical KPIs computed by the backend over the SQL result set.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Metrics {
    pub kpis: Kpis,

    /// Per-column numeric statistics, kept as raw data for JSON output.
    #[serde(default, skip_serializing_if = "serde_json::Map::is_empty")]
    pub numeric_stats: serde_json::Map<String, Value>,

    #[serde(default, skip_serializing_if = "serde_json::Map::is_empty")]
    pub text_stats: serde_json::Map<String, Value>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Kpis {
    pub total_rows: u64,

    #[serde(default)]
    pub total_columns: u64,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub numeric_columns: Option<u64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text_columns: Option<u64>,

    /// Single aggregate over the first numeric column, shown as summary cards.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub headline: Option<HeadlineMetric>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HeadlineMetric {
    pub column: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total_records: Option<u64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub avg: Option<f64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max: Option<f64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min: Option<f64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sum: Option<f64>,
}

/// Chart payload attached to a result.
///
/// The backend also sends per-dataset styling hints (colors, border radius);
/// those are presentation concerns of the web frontend and are ignored here.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ChartConfig {
    #[serde(default)]
    pub chart_type: ChartType,

    #[serde(default)]
    pub labels: Vec<String>,

    #[serde(default)]
    pub datasets: Vec<ChartDataset>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ChartDataset {
    #[serde(default)]
    pub label: String,

    /// Raw values; non-numeric or null entries are treated as 0 downstream.
    #[serde(rename = "data", default)]
    pub values: Vec<Value>,
}

/// Chart kinds the client can draw.
///
/// Anything else on the wire (the backend has historically emitted
/// `doughnut`) deserializes as `Unknown` instead of failing the whole
/// result, and behaves as `bar`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChartType {
    #[default]
    Bar,
    Line,
    Pie,
    #[serde(other)]
    Unknown,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_chat_result_with_all_optionals_absent() {
        let json = r#"{"mode": "chat", "answer": "There are 5 tables."}"#;
        let result: QueryResult = serde_json::from_str(json).unwrap();
        assert_eq!(result.mode, AnswerMode::Chat);
        assert_eq!(result.answer.as_deref(), Some("There are 5 tables."));
        assert!(result.sql_query.is_none());
        assert!(result.data.is_none());
        assert!(result.chart_config.is_none());
        assert!(result.suggestions.is_none());
    }

    #[test]
    fn test_full_sql_result_wire_shape() {
        let json = r##"{
            "mode": "sql",
            "answer": "Average marks per standard.",
            "sql_query": "SELECT standard, AVG(marks) FROM students GROUP BY standard",
            "columns": ["standard", "avg_marks"],
            "data": [{"standard": "A", "avg_marks": 72.5}, {"standard": "B", "avg_marks": null}],
            "total_rows": 2,
            "metrics": {
                "kpis": {
                    "total_rows": 2,
                    "total_columns": 2,
                    "numeric_columns": 1,
                    "text_columns": 1,
                    "headline": {"column": "avg_marks", "avg": 72.5, "max": 72.5, "min": 72.5, "sum": 72.5}
                },
                "numeric_stats": {"avg_marks": {"count": 1}},
                "text_stats": {}
            },
            "chart_config": {
                "chart_type": "bar",
                "labels": ["A", "B"],
                "datasets": [{"label": "avg_marks", "data": [72.5, 0], "backgroundColor": "#6c47ff"}]
            },
            "insights": ["Standard A leads on average marks."],
            "suggestions": ["Show the lowest scoring students"]
        }"##;
        let result: QueryResult = serde_json::from_str(json).unwrap();
        assert_eq!(result.mode, AnswerMode::Sql);
        assert_eq!(result.total_rows, Some(2));
        assert!(result.data.as_ref().unwrap()[1]["avg_marks"].is_null());

        let metrics = result.metrics.unwrap();
        let headline = metrics.kpis.headline.unwrap();
        assert_eq!(headline.column, "avg_marks");
        assert_eq!(headline.avg, Some(72.5));

        let chart = result.chart_config.unwrap();
        assert_eq!(chart.chart_type, ChartType::Bar);
        assert_eq!(chart.datasets[0].values.len(), 2);
    }

    #[test]
    fn test_unknown_chart_type_does_not_fail_the_result() {
        let json = r#"{"mode": "sql", "chart_config": {"chart_type": "doughnut", "labels": ["x"], "datasets": []}}"#;
        let result: QueryResult = serde_json::from_str(json).unwrap();
        assert_eq!(result.chart_config.unwrap().chart_type, ChartType::Unknown);
    }
}
