//! Chart-type state and series derivation from a result's chart payload.
//!
//! A `ChartView` is built once per result. The user may toggle the chart
//! kind afterwards; toggling only changes presentation and never recomputes
//! the series. When a new chart payload arrives the view is rebuilt, so a
//! stale chart type cannot survive into an unrelated result.

use querydeck_types::{ChartConfig, ChartType};

/// Category palette from the product's house style, indexed by category
/// position modulo the palette size. Same label position, same color, for
/// the lifetime of one result.
pub const PALETTE: [(u8, u8, u8); 15] = [
    (108, 71, 255), // #6c47ff
    (34, 197, 94),  // #22c55e
    (59, 130, 246), // #3b82f6
    (249, 115, 22), // #f97316
    (168, 85, 247), // #a855f7
    (20, 184, 166), // #14b8a6
    (244, 63, 94),  // #f43f5e
    (234, 179, 8),  // #eab308
    (14, 165, 233), // #0ea5e9
    (139, 92, 246), // #8b5cf6
    (236, 72, 153), // #ec4899
    (132, 204, 22), // #84cc16
    (6, 182, 212),  // #06b6d4
    (245, 158, 11), // #f59e0b
    (16, 185, 129), // #10b981
];

pub fn color_for(index: usize) -> (u8, u8, u8) {
    PALETTE[index % PALETTE.len()]
}

/// Chart kinds the user can switch between.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ChartKind {
    #[default]
    Bar,
    Line,
    Pie,
}

impl From<ChartType> for ChartKind {
    fn from(value: ChartType) -> Self {
        match value {
            ChartType::Bar | ChartType::Unknown => ChartKind::Bar,
            ChartType::Line => ChartKind::Line,
            ChartType::Pie => ChartKind::Pie,
        }
    }
}

impl ChartKind {
    pub fn label(&self) -> &'static str {
        match self {
            ChartKind::Bar => "bar",
            ChartKind::Line => "line",
            ChartKind::Pie => "pie",
        }
    }
}

/// One named series of numeric values, aligned with the labels.
#[derive(Debug, Clone, PartialEq)]
pub struct Series {
    pub label: String,
    pub values: Vec<f64>,
}

#[derive(Debug, Clone)]
pub struct ChartView {
    active: ChartKind,
    labels: Vec<String>,
    series: Vec<Series>,
}

impl ChartView {
    /// Build the view from a result's chart payload.
    ///
    /// Returns `None` when the payload is absent or has empty labels or
    /// datasets; such a payload is equivalent to no chart at all.
    pub fn from_config(config: Option<&ChartConfig>) -> Option<Self> {
        let config = config?;
        if config.labels.is_empty() || config.datasets.is_empty() {
            return None;
        }

        let series = config
            .datasets
            .iter()
            .map(|dataset| Series {
                label: dataset.label.clone(),
                values: dataset
                    .values
                    .iter()
                    .map(|v| v.as_f64().unwrap_or(0.0))
                    .collect(),
            })
            .collect();

        Some(Self {
            active: ChartKind::from(config.chart_type),
            labels: config.labels.clone(),
            series,
        })
    }

    pub fn active(&self) -> ChartKind {
        self.active
    }

    /// Local presentation toggle; data is untouched.
    pub fn set_type(&mut self, kind: ChartKind) {
        self.active = kind;
    }

    pub fn labels(&self) -> &[String] {
        &self.labels
    }

    pub fn series(&self) -> &[Series] {
        &self.series
    }

    /// The series drawn by single-series kinds (bar, pie).
    pub fn primary_series(&self) -> &Series {
        &self.series[0]
    }

    /// Pie ignores axis configuration entirely; bar and line share it.
    pub fn uses_axes(&self) -> bool {
        self.active != ChartKind::Pie
    }

    pub fn max_value(&self) -> f64 {
        self.series
            .iter()
            .flat_map(|s| s.values.iter().copied())
            .fold(0.0_f64, f64::max)
    }

    /// Pie slices over the primary series: label, value, share of the total
    /// and the category color. Shares are 0 when the series sums to 0.
    pub fn slices(&self) -> Vec<(String, f64, f64, (u8, u8, u8))> {
        let primary = self.primary_series();
        let sum: f64 = primary.values.iter().copied().filter(|v| *v > 0.0).sum();
        self.labels
            .iter()
            .zip(primary.values.iter())
            .enumerate()
            .map(|(i, (label, value))| {
                let share = if sum > 0.0 && *value > 0.0 {
                    value / sum
                } else {
                    0.0
                };
                (label.clone(), *value, share, color_for(i))
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use querydeck_types::ChartDataset;
    use serde_json::json;

    fn config(chart_type: ChartType) -> ChartConfig {
        ChartConfig {
            chart_type,
            labels: vec!["A".to_string(), "B".to_string(), "C".to_string()],
            datasets: vec![ChartDataset {
                label: "count".to_string(),
                values: vec![json!(4), json!(1), json!(null)],
            }],
        }
    }

    #[test]
    fn test_initializes_from_declared_chart_type() {
        let view = ChartView::from_config(Some(&config(ChartType::Line))).unwrap();
        assert_eq!(view.active(), ChartKind::Line);
        assert!(view.uses_axes());
    }

    #[test]
    fn test_unrecognized_type_defaults_to_bar() {
        let view = ChartView::from_config(Some(&config(ChartType::Unknown))).unwrap();
        assert_eq!(view.active(), ChartKind::Bar);
    }

    #[test]
    fn test_empty_labels_or_datasets_equivalent_to_absent() {
        assert!(ChartView::from_config(None).is_none());

        let mut empty_labels = config(ChartType::Bar);
        empty_labels.labels.clear();
        assert!(ChartView::from_config(Some(&empty_labels)).is_none());

        let mut empty_datasets = config(ChartType::Bar);
        empty_datasets.datasets.clear();
        assert!(ChartView::from_config(Some(&empty_datasets)).is_none());
    }

    #[test]
    fn test_toggle_changes_presentation_only() {
        let mut view = ChartView::from_config(Some(&config(ChartType::Bar))).unwrap();
        let before = view.primary_series().clone();

        view.set_type(ChartKind::Pie);
        assert_eq!(view.active(), ChartKind::Pie);
        assert!(!view.uses_axes());
        assert_eq!(view.primary_series(), &before);
    }

    #[test]
    fn test_null_values_read_as_zero() {
        let view = ChartView::from_config(Some(&config(ChartType::Bar))).unwrap();
        assert_eq!(view.primary_series().values, vec![4.0, 1.0, 0.0]);
        assert_eq!(view.max_value(), 4.0);
    }

    #[test]
    fn test_palette_is_stable_per_position() {
        assert_eq!(color_for(0), color_for(PALETTE.len()));
        assert_eq!(color_for(2), PALETTE[2]);

        let view = ChartView::from_config(Some(&config(ChartType::Pie))).unwrap();
        let slices = view.slices();
        assert_eq!(slices[1].3, PALETTE[1]);
        // shares: 4/5 and 1/5, null slice contributes nothing
        assert!((slices[0].2 - 0.8).abs() < f64::EPSILON);
        assert!((slices[1].2 - 0.2).abs() < f64::EPSILON);
        assert_eq!(slices[2].2, 0.0);
    }
}
