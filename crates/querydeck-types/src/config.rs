use serde::{Deserialize, Serialize};

use crate::{Error, Result};

/// Supported database drivers.
///
/// Serialized with the backend's `db_type` vocabulary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Driver {
    Mysql,
    Postgresql,
}

impl Driver {
    /// Conventional port for the driver, used when the user omits one.
    pub fn default_port(&self) -> u16 {
        match self {
            Driver::Mysql => 3306,
            Driver::Postgresql => 5432,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Driver::Mysql => "mysql",
            Driver::Postgresql => "postgresql",
        }
    }
}

impl std::str::FromStr for Driver {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "mysql" => Ok(Driver::Mysql),
            "postgresql" | "postgres" => Ok(Driver::Postgresql),
            other => Err(Error::Config(format!(
                "unknown driver '{}' (expected mysql or postgresql)",
                other
            ))),
        }
    }
}

/// Connection parameters for the backend's database session.
///
/// Immutable once connected; the session owns one of these for its whole
/// lifetime and discards it on disconnect.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConnectionConfig {
    #[serde(rename = "db_type")]
    pub driver: Driver,
    pub host: String,
    pub port: u16,
    pub username: String,
    pub password: String,
    pub database: String,
}

impl ConnectionConfig {
    pub fn new(driver: Driver, host: impl Into<String>, database: impl Into<String>) -> Self {
        Self {
            driver,
            host: host.into(),
            port: driver.default_port(),
            username: String::new(),
            password: String::new(),
            database: database.into(),
        }
    }

    /// Reject configs the backend would refuse anyway, before any network
    /// round-trip happens.
    pub fn validate(&self) -> Result<()> {
        if self.database.trim().is_empty() {
            return Err(Error::Connection("database name is required".to_string()));
        }
        if self.host.trim().is_empty() {
            return Err(Error::Connection("host is required".to_string()));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_ports() {
        assert_eq!(Driver::Mysql.default_port(), 3306);
        assert_eq!(Driver::Postgresql.default_port(), 5432);
    }

    #[test]
    fn test_driver_serializes_as_db_type() {
        let config = ConnectionConfig::new(Driver::Mysql, "localhost", "school");
        let json = serde_json::to_value(&config).unwrap();
        assert_eq!(json["db_type"], "mysql");
        assert_eq!(json["port"], 3306);
    }

    #[test]
    fn test_validate_requires_database() {
        let config = ConnectionConfig::new(Driver::Postgresql, "localhost", "  ");
        assert!(config.validate().is_err());

        let config = ConnectionConfig::new(Driver::Postgresql, "localhost", "erp");
        assert!(config.validate().is_ok());
    }
}
