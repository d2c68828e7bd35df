//! Blocking HTTP client for the analytics backend.
//!
//! Every call exchanges one self-contained JSON message; there is no
//! streaming and no retry. Transport-level connect/timeout failures map to
//! `Error::BackendDown` so the caller can flip the persistent backend
//! status; everything else maps to the error variant of the operation that
//! raised it. HTTP error bodies carry `{"detail": "..."}`.

use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use querydeck_types::{ConnectionConfig, Error, QueryResult, Result, SchemaInfo};

pub const DEFAULT_BACKEND_URL: &str = "http://localhost:8001";

const REQUEST_TIMEOUT: Duration = Duration::from_secs(120);

#[derive(Debug, Serialize)]
struct QueryRequest<'a> {
    db_config: &'a ConnectionConfig,
    question: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    sql_override: Option<&'a str>,
}

#[derive(Debug, Deserialize)]
struct ConnectResponse {
    schema: SchemaInfo,
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    detail: String,
}

/// Outcome of a file upload. The caller must re-fetch the schema to observe
/// the new table.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UploadOutcome {
    /// Table the file was ingested into.
    pub table: Option<String>,
    /// "structured" (tabular) or "unstructured" (document text).
    #[serde(rename = "type")]
    pub kind: Option<String>,
    pub rows: Option<u64>,
}

pub struct BackendClient {
    base_url: String,
    http: reqwest::blocking::Client,
}

impl BackendClient {
    pub fn new(base_url: impl Into<String>) -> Result<Self> {
        let http = reqwest::blocking::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(|e| Error::Config(format!("failed to build HTTP client: {}", e)))?;
        Ok(Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            http,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Liveness probe against the backend root. Only distinguishes
    /// reachable from unreachable.
    pub fn health(&self) -> Result<()> {
        self.http
            .get(self.url("/"))
            .send()
            .map_err(|e| transport(e, Error::BackendDown))?;
        Ok(())
    }

    /// Test the database connection and fetch the initial schema snapshot.
    pub fn connect(&self, config: &ConnectionConfig) -> Result<SchemaInfo> {
        config.validate()?;
        let response = self
            .http
            .post(self.url("/api/connect"))
            .json(config)
            .send()
            .map_err(|e| transport(e, Error::Connection))?;
        let response = check_status(response, Error::Connection)?;
        let body: ConnectResponse = response
            .json()
            .map_err(|e| Error::Connection(format!("malformed connect response: {}", e)))?;
        Ok(body.schema)
    }

    /// Re-fetch the schema under the current config. The snapshot replaces
    /// the previous one wholesale.
    pub fn refresh_schema(&self, config: &ConnectionConfig) -> Result<SchemaInfo> {
        let response = self
            .http
            .post(self.url("/api/schema"))
            .json(config)
            .send()
            .map_err(|e| transport(e, Error::Connection))?;
        let response = check_status(response, Error::Connection)?;
        let body: ConnectResponse = response
            .json()
            .map_err(|e| Error::Connection(format!("malformed schema response: {}", e)))?;
        Ok(body.schema)
    }

    /// Submit one natural-language question and receive one `QueryResult`.
    pub fn query(&self, config: &ConnectionConfig, question: &str) -> Result<QueryResult> {
        let request = QueryRequest {
            db_config: config,
            question,
            sql_override: None,
        };
        let response = self
            .http
            .post(self.url("/api/query"))
            .json(&request)
            .send()
            .map_err(|e| transport(e, Error::Query))?;
        let response = check_status(response, Error::Query)?;
        response
            .json()
            .map_err(|e| Error::Query(format!("malformed query response: {}", e)))
    }

    /// Upload a tabular or document file for ingestion into the connected
    /// database.
    pub fn upload(&self, path: &Path, config: &ConnectionConfig) -> Result<UploadOutcome> {
        let db_config = serde_json::to_string(config)
            .map_err(|e| Error::Upload(format!("failed to encode connection config: {}", e)))?;
        let form = reqwest::blocking::multipart::Form::new()
            .file("file", path)
            .map_err(|e| Error::Upload(format!("cannot read {}: {}", path.display(), e)))?
            .text("db_config", db_config);
        let response = self
            .http
            .post(self.url("/api/upload"))
            .multipart(form)
            .send()
            .map_err(|e| transport(e, Error::Upload))?;
        let response = check_status(response, Error::Upload)?;
        response
            .json()
            .map_err(|e| Error::Upload(format!("malformed upload response: {}", e)))
    }
}

/// Map a transport failure: unreachable backends are their own category,
/// everything else belongs to the operation that failed.
fn transport(err: reqwest::Error, make: fn(String) -> Error) -> Error {
    if err.is_connect() || err.is_timeout() {
        Error::BackendDown(err.to_string())
    } else {
        make(err.to_string())
    }
}

/// Turn a non-2xx response into the operation's error, preferring the
/// backend's `detail` message over the bare status code.
fn check_status(
    response: reqwest::blocking::Response,
    make: fn(String) -> Error,
) -> Result<reqwest::blocking::Response> {
    if response.status().is_success() {
        return Ok(response);
    }
    let status = response.status();
    let detail = response
        .json::<ErrorBody>()
        .map(|body| body.detail)
        .unwrap_or_else(|_| format!("backend returned {}", status));
    Err(make(detail))
}

#[cfg(test)]
mod tests {
    use super::*;
    use querydeck_types::Driver;

    #[test]
    fn test_base_url_trailing_slash_is_normalized() {
        let client = BackendClient::new("http://localhost:8001/").unwrap();
        assert_eq!(client.url("/api/query"), "http://localhost:8001/api/query");
    }

    #[test]
    fn test_query_request_wire_shape() {
        let config = ConnectionConfig::new(Driver::Mysql, "localhost", "school");
        let request = QueryRequest {
            db_config: &config,
            question: "how many students?",
            sql_override: None,
        };
        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(json["db_config"]["db_type"], "mysql");
        assert_eq!(json["question"], "how many students?");
        assert!(json.get("sql_override").is_none());
    }

    #[test]
    fn test_connect_rejects_invalid_config_before_network() {
        let client = BackendClient::new("http://localhost:1").unwrap();
        let config = ConnectionConfig::new(Driver::Mysql, "localhost", "");
        match client.connect(&config) {
            Err(Error::Connection(msg)) => assert!(msg.contains("database")),
            other => panic!("expected Connection error, got {:?}", other.map(|_| ())),
        }
    }
}
