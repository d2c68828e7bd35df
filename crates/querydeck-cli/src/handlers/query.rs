use anyhow::Result;

use querydeck_client::BackendClient;
use querydeck_runtime::Config;

use crate::args::{ConnectionArgs, OutputFormat};
use crate::presentation::presenters::present_result;
use crate::presentation::renderers::console;

/// One-shot question: ask, interpret, print.
pub fn handle(
    client: &BackendClient,
    config: &Config,
    args: &ConnectionArgs,
    question: &str,
    format: OutputFormat,
) -> Result<()> {
    anyhow::ensure!(!question.trim().is_empty(), "question must not be blank");

    let connection = args.resolve(config)?;
    let result = client.query(&connection, question)?;
    let vm = present_result(&result);
    console::render_result(&vm, &result, format)
}
