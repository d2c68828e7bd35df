use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    Frame,
    layout::{Constraint, Rect},
    style::{Color, Modifier, Style},
    text::Line,
    widgets::{Block, Borders, Cell, Paragraph, Row, Table},
};

use querydeck_engine::{TableView, cell_display};
use querydeck_types::QueryResult;

use crate::presentation::formatters::table as table_fmt;

/// Result table with live search and pagination.
///
/// Owns the engine `TableView`; `/` enters search entry, arrows page. Built
/// from one result and discarded with it.
pub struct TableComponent {
    view: TableView,
    searching: bool,
}

impl TableComponent {
    pub fn from_result(result: &QueryResult) -> Option<Self> {
        let columns = result.columns.clone()?;
        let rows = result.data.clone()?;
        Some(Self {
            view: TableView::new(columns, rows, result.total_rows),
            searching: false,
        })
    }

    /// While true the component consumes character keys for the search term.
    pub fn searching(&self) -> bool {
        self.searching
    }

    pub fn handle_input(&mut self, key: KeyEvent) {
        if self.searching {
            match key.code {
                KeyCode::Char(c) => {
                    let mut term = self.view.search().to_string();
                    term.push(c);
                    self.view.set_search(term);
                }
                KeyCode::Backspace => {
                    let mut term = self.view.search().to_string();
                    term.pop();
                    self.view.set_search(term);
                }
                KeyCode::Enter => self.searching = false,
                KeyCode::Esc => {
                    self.view.set_search("");
                    self.searching = false;
                }
                _ => {}
            }
            return;
        }

        match key.code {
            KeyCode::Char('/') => self.searching = true,
            KeyCode::Left | KeyCode::PageUp | KeyCode::Char('h') => self.view.prev_page(),
            KeyCode::Right | KeyCode::PageDown | KeyCode::Char('l') => self.view.next_page(),
            KeyCode::Home => self.view.set_page(0),
            KeyCode::End => self.view.set_page(usize::MAX),
            _ => {}
        }
    }

    pub fn render(&mut self, f: &mut Frame, area: Rect, focused: bool) {
        let border = if focused {
            Style::default().fg(Color::Cyan)
        } else {
            Style::default()
        };
        let title = if self.searching || !self.view.search().is_empty() {
            format!(" Results  /{} ", self.view.search())
        } else {
            " Results ".to_string()
        };
        let block = Block::default()
            .title(title)
            .borders(Borders::ALL)
            .border_style(border);
        let inner = block.inner(area);
        f.render_widget(block, area);

        if inner.height < 2 {
            return;
        }
        // reserve the last line for the summary
        let table_area = Rect {
            height: inner.height - 1,
            ..inner
        };
        let summary_area = Rect {
            y: inner.y + inner.height - 1,
            height: 1,
            ..inner
        };

        let columns = self.view.columns().to_vec();
        let visible = self.view.visible_rows();

        if visible.is_empty() {
            let empty = Paragraph::new("no matching rows")
                .style(Style::default().add_modifier(Modifier::DIM));
            f.render_widget(empty, table_area);
        } else {
            let header = Row::new(
                columns
                    .iter()
                    .map(|c| Cell::from(c.as_str()))
                    .collect::<Vec<_>>(),
            )
            .style(Style::default().add_modifier(Modifier::BOLD));

            let rows: Vec<Row> = visible
                .iter()
                .map(|row| {
                    Row::new(
                        columns
                            .iter()
                            .map(|column| {
                                let is_null = row
                                    .get(column)
                                    .map(|v| v.is_null())
                                    .unwrap_or(true);
                                let cell = Cell::from(cell_display(row.get(column)));
                                if is_null {
                                    cell.style(Style::default().add_modifier(Modifier::ITALIC | Modifier::DIM))
                                } else {
                                    cell
                                }
                            })
                            .collect::<Vec<_>>(),
                    )
                })
                .collect();

            let widths = vec![Constraint::Fill(1); columns.len().max(1)];
            f.render_widget(Table::new(rows, widths).header(header), table_area);
        }

        let summary = Line::from(format!(
            "{}  {}",
            table_fmt::format_summary(&self.view.summary()),
            table_fmt::format_page_line(self.view.page(), self.view.total_pages_displayed()),
        ))
        .style(Style::default().add_modifier(Modifier::DIM));
        f.render_widget(Paragraph::new(summary), summary_area);
    }
}
