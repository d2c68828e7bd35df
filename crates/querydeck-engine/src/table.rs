//! Search + pagination engine over one result's tabular data.
//!
//! A `TableView` is derived entirely from a single `QueryResult`'s
//! `columns`/`data` and is recreated whenever a new result arrives, so no
//! search term or page position ever survives into an unrelated result.

use querydeck_types::Row;
use serde_json::Value;

/// Fixed page size, matching the backend's row preview window.
pub const PAGE_SIZE: usize = 10;

/// Row-count summary for the table header line.
///
/// `start`/`end` are 1-based positions within the filtered set (both 0 when
/// the filter matched nothing). `filtered_down` is set only when searching
/// actually reduced the set below the result's declared total, which is what
/// decides whether "filtered from T" is shown.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableSummary {
    pub start: usize,
    pub end: usize,
    pub filtered: usize,
    pub total: u64,
    pub filtered_down: bool,
}

#[derive(Debug, Clone)]
pub struct TableView {
    columns: Vec<String>,
    rows: Vec<Row>,
    total_rows: u64,
    search: String,
    page: usize,
}

impl TableView {
    /// Snapshot the rows of one result. `total_rows` is the result's declared
    /// total; when absent the local row count stands in.
    pub fn new(columns: Vec<String>, rows: Vec<Row>, total_rows: Option<u64>) -> Self {
        let local_count = rows.len() as u64;
        Self {
            columns,
            rows,
            total_rows: total_rows.unwrap_or(local_count),
            search: String::new(),
            page: 0,
        }
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn search(&self) -> &str {
        &self.search
    }

    pub fn page(&self) -> usize {
        self.page
    }

    /// Update the search term. Always resets to the first page: a changed
    /// filter must never leave the view on an out-of-range page.
    pub fn set_search(&mut self, term: impl Into<String>) {
        self.search = term.into();
        self.page = 0;
    }

    /// Jump to page `n`, clamped to `[0, total_pages - 1]`. With no pages at
    /// all the page is forced to 0.
    pub fn set_page(&mut self, n: usize) {
        let pages = self.total_pages();
        self.page = if pages == 0 { 0 } else { n.min(pages - 1) };
    }

    pub fn next_page(&mut self) {
        self.set_page(self.page.saturating_add(1));
    }

    pub fn prev_page(&mut self) {
        self.set_page(self.page.saturating_sub(1));
    }

    /// Rows matching the current search term, in result order.
    ///
    /// Case-insensitive substring match against the string form of every
    /// cell; a row matches if any cell matches. An empty or whitespace-only
    /// term matches all rows. Pure function of state + data.
    pub fn filtered_rows(&self) -> Vec<&Row> {
        let term = self.search.trim().to_lowercase();
        if term.is_empty() {
            return self.rows.iter().collect();
        }
        self.rows
            .iter()
            .filter(|row| {
                self.columns
                    .iter()
                    .any(|col| match_text(row.get(col)).contains(&term))
            })
            .collect()
    }

    /// The current page slice of `filtered_rows()`, at most `PAGE_SIZE` rows.
    pub fn visible_rows(&self) -> Vec<&Row> {
        let filtered = self.filtered_rows();
        filtered
            .into_iter()
            .skip(self.page * PAGE_SIZE)
            .take(PAGE_SIZE)
            .collect()
    }

    /// Number of pages the filtered set actually fills. Can be 0.
    pub fn total_pages(&self) -> usize {
        self.filtered_rows().len().div_ceil(PAGE_SIZE)
    }

    /// Page count for display: never below 1, so an empty table reads
    /// "Page 1 of 1" rather than "Page 1 of 0".
    pub fn total_pages_displayed(&self) -> usize {
        self.total_pages().max(1)
    }

    pub fn summary(&self) -> TableSummary {
        let filtered = self.filtered_rows().len();
        let (start, end) = if filtered == 0 {
            (0, 0)
        } else {
            (
                self.page * PAGE_SIZE + 1,
                ((self.page + 1) * PAGE_SIZE).min(filtered),
            )
        };
        TableSummary {
            start,
            end,
            filtered,
            total: self.total_rows,
            filtered_down: (filtered as u64) < self.total_rows,
        }
    }
}

/// String form of a cell for search matching. Null matches as the empty
/// string, not the literal word "null"; only the display layer prints
/// "null".
fn match_text(value: Option<&Value>) -> String {
    match value {
        None | Some(Value::Null) => String::new(),
        Some(Value::String(s)) => s.to_lowercase(),
        Some(other) => other.to_string().to_lowercase(),
    }
}

/// String form of a cell for display.
pub fn cell_display(value: Option<&Value>) -> String {
    match value {
        None | Some(Value::Null) => "null".to_string(),
        Some(Value::String(s)) => s.clone(),
        Some(other) => other.to_string(),
    }
}
