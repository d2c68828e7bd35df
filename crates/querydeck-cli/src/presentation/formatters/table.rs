use querydeck_engine::TableSummary;

use super::number::format_count;

/// Row-count line under a table: "1-10 of 15 results (filtered from 500)".
/// The filter note only appears when searching actually narrowed the data.
pub fn format_summary(summary: &TableSummary) -> String {
    if summary.filtered == 0 {
        return if summary.filtered_down {
            format!("0 results (filtered from {})", format_count(summary.total))
        } else {
            "0 results".to_string()
        };
    }
    let mut line = format!(
        "{}-{} of {} results",
        format_count(summary.start as u64),
        format_count(summary.end as u64),
        format_count(summary.filtered as u64),
    );
    if summary.filtered_down {
        line.push_str(&format!(" (filtered from {})", format_count(summary.total)));
    }
    line
}

/// "Page 2 of 5" with the 1-based current page.
pub fn format_page_line(page: usize, total_pages_displayed: usize) -> String {
    format!("Page {} of {}", page + 1, total_pages_displayed)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_summary_without_filtering() {
        let summary = TableSummary {
            start: 1,
            end: 10,
            filtered: 15,
            total: 15,
            filtered_down: false,
        };
        assert_eq!(format_summary(&summary), "1-10 of 15 results");
    }

    #[test]
    fn test_summary_with_filtering() {
        let summary = TableSummary {
            start: 1,
            end: 7,
            filtered: 7,
            total: 500,
            filtered_down: true,
        };
        assert_eq!(format_summary(&summary), "1-7 of 7 results (filtered from 500)");
    }

    #[test]
    fn test_summary_empty() {
        let summary = TableSummary {
            start: 0,
            end: 0,
            filtered: 0,
            total: 15,
            filtered_down: true,
        };
        assert_eq!(format_summary(&summary), "0 results (filtered from 15)");
    }

    #[test]
    fn test_page_line_is_one_based() {
        assert_eq!(format_page_line(0, 1), "Page 1 of 1");
        assert_eq!(format_page_line(2, 5), "Page 3 of 5");
    }
}
