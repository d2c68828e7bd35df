use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

use querydeck_runtime::Config;
use querydeck_types::{ConnectionConfig, Driver};

#[derive(Parser)]
#[command(name = "querydeck")]
#[command(about = "Ask your database questions in plain language", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Backend service URL (falls back to the config file, then localhost)
    #[arg(long, global = true)]
    pub backend_url: Option<String>,

    #[arg(long, default_value = "plain", global = true)]
    pub format: OutputFormat,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Plain,
    Json,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Test the database connection and save it as the default
    Connect {
        #[command(flatten)]
        connection: ConnectionArgs,

        /// Do not write the connection to the config file
        #[arg(long)]
        no_save: bool,
    },

    /// Show the schema of the connected database
    Schema {
        #[command(flatten)]
        connection: ConnectionArgs,
    },

    /// Ask one question and print the interpreted result
    Query {
        /// Natural-language question (quote it)
        question: String,

        #[command(flatten)]
        connection: ConnectionArgs,
    },

    /// Upload a CSV/Excel/document file for ingestion
    Upload {
        /// File to upload
        file: PathBuf,

        #[command(flatten)]
        connection: ConnectionArgs,
    },

    /// Open the interactive dashboard
    Dash {
        #[command(flatten)]
        connection: ConnectionArgs,
    },
}

/// Connection flags shared by every subcommand. Omitted flags fall back to
/// the saved connection in the config file; the password additionally falls
/// back to `QUERYDECK_PASSWORD`.
#[derive(Debug, Args)]
pub struct ConnectionArgs {
    /// Database driver: mysql or postgresql
    #[arg(long)]
    pub driver: Option<String>,

    #[arg(long)]
    pub host: Option<String>,

    #[arg(long)]
    pub port: Option<u16>,

    #[arg(long, short = 'u')]
    pub username: Option<String>,

    /// Database password (prefer QUERYDECK_PASSWORD over the flag)
    #[arg(long, short = 'p')]
    pub password: Option<String>,

    #[arg(long, short = 'd')]
    pub database: Option<String>,
}

impl ConnectionArgs {
    /// Merge flags over the saved connection into a full config.
    pub fn resolve(&self, config: &Config) -> anyhow::Result<ConnectionConfig> {
        let saved = config.connection.as_ref();

        let driver: Driver = match self.driver.as_deref() {
            Some(name) => name.parse()?,
            None => match saved {
                Some(saved) => saved.driver.parse()?,
                None => anyhow::bail!(
                    "no connection configured; pass --driver/--host/--database or run 'querydeck connect' first"
                ),
            },
        };

        let host = self
            .host
            .clone()
            .or_else(|| saved.map(|s| s.host.clone()))
            .unwrap_or_else(|| "localhost".to_string());

        let port = self
            .port
            .or_else(|| saved.map(|s| s.port))
            .unwrap_or_else(|| driver.default_port());

        let username = self
            .username
            .clone()
            .or_else(|| saved.map(|s| s.username.clone()))
            .unwrap_or_default();

        let password = self
            .password
            .clone()
            .or_else(|| std::env::var("QUERYDECK_PASSWORD").ok())
            .unwrap_or_default();

        let database = match self.database.clone().or_else(|| saved.map(|s| s.database.clone())) {
            Some(database) => database,
            None => anyhow::bail!("no database selected; pass --database"),
        };

        let resolved = ConnectionConfig {
            driver,
            host,
            port,
            username,
            password,
            database,
        };
        resolved.validate()?;
        Ok(resolved)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use querydeck_runtime::SavedConnection;

    #[test]
    fn test_flags_override_saved_connection() {
        let mut config = Config::default();
        config.connection = Some(SavedConnection {
            driver: "mysql".to_string(),
            host: "db.internal".to_string(),
            port: 3306,
            username: "root".to_string(),
            database: "school".to_string(),
        });

        let args = ConnectionArgs {
            driver: None,
            host: Some("other-host".to_string()),
            port: None,
            username: None,
            password: Some("pw".to_string()),
            database: Some("erp".to_string()),
        };

        let resolved = args.resolve(&config).unwrap();
        assert_eq!(resolved.driver, Driver::Mysql);
        assert_eq!(resolved.host, "other-host");
        assert_eq!(resolved.port, 3306);
        assert_eq!(resolved.database, "erp");
    }

    #[test]
    fn test_resolve_without_any_connection_fails() {
        let args = ConnectionArgs {
            driver: None,
            host: None,
            port: None,
            username: None,
            password: None,
            database: None,
        };
        assert!(args.resolve(&Config::default()).is_err());
    }

    #[test]
    fn test_port_defaults_from_driver() {
        let args = ConnectionArgs {
            driver: Some("postgresql".to_string()),
            host: Some("localhost".to_string()),
            port: None,
            username: None,
            password: None,
            database: Some("erp".to_string()),
        };
        let resolved = args.resolve(&Config::default()).unwrap();
        assert_eq!(resolved.port, 5432);
    }
}
