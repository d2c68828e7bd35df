//! Console output routing.
//!
//! Plain output goes through the Display views; JSON output prints the raw
//! wire data so scripts get the unmodified backend contract (this is the
//! terminal equivalent of the web UI's copy button).

use anyhow::Result;
use serde::Serialize;

use querydeck_types::QueryResult;

use crate::args::OutputFormat;
use crate::presentation::view_models::{ResultViewModel, SchemaViewModel};
use crate::presentation::views::{ResultView, SchemaView};

const FALLBACK_WIDTH: usize = 100;

fn terminal_width() -> usize {
    terminal_size::terminal_size()
        .map(|(terminal_size::Width(w), _)| w as usize)
        .unwrap_or(FALLBACK_WIDTH)
}

pub fn print_json<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

pub fn render_result(
    vm: &ResultViewModel,
    raw: &QueryResult,
    format: OutputFormat,
) -> Result<()> {
    match format {
        OutputFormat::Json => print_json(raw),
        OutputFormat::Plain => {
            print!("{}", ResultView::new(vm, terminal_width()));
            Ok(())
        }
    }
}

pub fn render_schema(
    vm: &SchemaViewModel,
    raw: &querydeck_types::SchemaInfo,
    format: OutputFormat,
    verbose: bool,
) -> Result<()> {
    match format {
        OutputFormat::Json => print_json(raw),
        OutputFormat::Plain => {
            let view = SchemaView::new(vm);
            let view = if verbose { view } else { view.summary_only() };
            print!("{}", view);
            Ok(())
        }
    }
}
