use std::fmt;

use owo_colors::OwoColorize;

use crate::presentation::formatters::number;
use crate::presentation::view_models::SchemaViewModel;

pub struct SchemaView<'a> {
    data: &'a SchemaViewModel,
    /// Print column lists, not just table names and row counts.
    verbose: bool,
}

impl<'a> SchemaView<'a> {
    pub fn new(data: &'a SchemaViewModel) -> Self {
        Self {
            data,
            verbose: true,
        }
    }

    pub fn summary_only(mut self) -> Self {
        self.verbose = false;
        self
    }
}

impl fmt::Display for SchemaView<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.data.tables.is_empty() {
            writeln!(f, "No tables found.")?;
            return Ok(());
        }

        for table in &self.data.tables {
            writeln!(
                f,
                "{} ({} rows)",
                table.name.bold(),
                number::format_count(table.row_count)
            )?;
            if self.verbose {
                for column in &table.columns {
                    writeln!(f, "  {}  {}", column.name, column.data_type.dimmed())?;
                }
            }
        }
        writeln!(
            f,
            "{}",
            format!(
                "{} tables, {} rows total",
                self.data.tables.len(),
                number::format_count(self.data.total_rows)
            )
            .dimmed()
        )
    }
}
