use anyhow::Result;

use querydeck_client::BackendClient;
use querydeck_runtime::Config;

use crate::args::{ConnectionArgs, OutputFormat};
use crate::presentation::presenters::present_schema;
use crate::presentation::renderers::console;

pub fn handle(
    client: &BackendClient,
    config: &Config,
    args: &ConnectionArgs,
    format: OutputFormat,
) -> Result<()> {
    let connection = args.resolve(config)?;
    let schema = client.refresh_schema(&connection)?;
    let vm = present_schema(&schema);
    console::render_schema(&vm, &schema, format, true)
}
