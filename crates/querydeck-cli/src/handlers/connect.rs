use anyhow::Result;
use owo_colors::OwoColorize;

use querydeck_client::BackendClient;
use querydeck_runtime::Config;

use crate::args::{ConnectionArgs, OutputFormat};
use crate::presentation::presenters::present_schema;
use crate::presentation::renderers::console;

pub fn handle(
    client: &BackendClient,
    mut config: Config,
    args: &ConnectionArgs,
    no_save: bool,
    format: OutputFormat,
) -> Result<()> {
    let connection = args.resolve(&config)?;
    let schema = client.connect(&connection)?;

    if !no_save {
        config.remember(&connection);
        config.backend_url = Some(client.base_url().to_string());
        config.save()?;
    }

    if format == OutputFormat::Plain {
        println!(
            "{} Connected to {} on {}",
            "OK".green().bold(),
            connection.database.bold(),
            connection.host
        );
    }
    let vm = present_schema(&schema);
    console::render_schema(&vm, &schema, format, false)
}
