use std::path::Path;

use anyhow::Result;
use owo_colors::OwoColorize;

use querydeck_client::BackendClient;
use querydeck_runtime::Config;

use crate::args::{ConnectionArgs, OutputFormat};
use crate::presentation::formatters::number;
use crate::presentation::renderers::console;

pub fn handle(
    client: &BackendClient,
    config: &Config,
    args: &ConnectionArgs,
    file: &Path,
    format: OutputFormat,
) -> Result<()> {
    let connection = args.resolve(config)?;
    let outcome = client.upload(file, &connection)?;

    match format {
        OutputFormat::Json => console::print_json(&outcome)?,
        OutputFormat::Plain => {
            let table = outcome.table.as_deref().unwrap_or("(unknown table)");
            match outcome.rows {
                Some(rows) => println!(
                    "{} Ingested {} rows into {}",
                    "OK".green().bold(),
                    number::format_count(rows),
                    table.bold()
                ),
                None => println!("{} Ingested into {}", "OK".green().bold(), table.bold()),
            }
            if let Some(kind) = &outcome.kind {
                println!("  type: {}", kind);
            }
        }
    }

    // the new table only becomes visible through a fresh schema snapshot;
    // failure here is not an upload failure
    match client.refresh_schema(&connection) {
        Ok(schema) => {
            if format == OutputFormat::Plain {
                println!("  schema now has {} tables", schema.len());
            }
        }
        Err(err) => eprintln!("warning: schema refresh failed: {}", err),
    }
    Ok(())
}
