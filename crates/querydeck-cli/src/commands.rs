use anyhow::Result;

use querydeck_client::{BackendClient, DEFAULT_BACKEND_URL};
use querydeck_runtime::Config;

use super::args::{Cli, Commands};
use super::handlers;

pub fn run(cli: Cli) -> Result<()> {
    let config = Config::load()?;

    let backend_url = cli
        .backend_url
        .clone()
        .or_else(|| config.backend_url.clone())
        .unwrap_or_else(|| DEFAULT_BACKEND_URL.to_string());
    let client = BackendClient::new(backend_url)?;

    match cli.command {
        Commands::Connect {
            connection,
            no_save,
        } => handlers::connect::handle(&client, config, &connection, no_save, cli.format),

        Commands::Schema { connection } => {
            handlers::schema::handle(&client, &config, &connection, cli.format)
        }

        Commands::Query {
            question,
            connection,
        } => handlers::query::handle(&client, &config, &connection, &question, cli.format),

        Commands::Upload { file, connection } => {
            handlers::upload::handle(&client, &config, &connection, &file, cli.format)
        }

        Commands::Dash { connection } => handlers::dash::handle(client, &config, &connection),
    }
}
