//! The session state machine.
//!
//! One `Session` owns all mutable dashboard state: connection config, schema
//! snapshot, the current result or error, and the in-flight markers. Every
//! transition happens through a method here; there is no ambient/global
//! state anywhere in the workspace.
//!
//! Network calls are performed elsewhere (a handler thread) and fed back as
//! `complete_*` calls carrying the ticket issued by the matching `begin_*`.
//! Tickets are epoch-tagged: any completion whose epoch is no longer current
//! is discarded, which is how results of abandoned flows (disconnect,
//! resubmit) are prevented from ever being applied. Stale interactive
//! sub-state must never be attributable to the wrong result; view components
//! key off `revision()` and rebuild whenever it changes.

use chrono::{DateTime, Utc};

use querydeck_types::{ConnectionConfig, Error, QueryResult, Result, SchemaInfo};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Disconnected,
    Connecting,
    /// Connected, no query outstanding.
    Idle,
    /// Connected with exactly one query in flight.
    Querying,
}

/// Proof that a completion belongs to the flow that started it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QueryTicket {
    epoch: u64,
}

#[derive(Debug, Default)]
pub struct Session {
    phase: PhaseState,
    config: Option<ConnectionConfig>,
    schema: Option<SchemaInfo>,
    result: Option<QueryResult>,
    error: Option<String>,
    backend_down: bool,
    upload_pending: bool,
    connected_at: Option<DateTime<Utc>>,
    /// Bumped whenever the current flow is superseded; stale tickets fail
    /// the epoch check and their completions are dropped.
    epoch: u64,
    /// Identity of the applied result; view sub-state resets when it moves.
    revision: u64,
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
enum PhaseState {
    #[default]
    Disconnected,
    Connecting,
    Idle,
    Querying,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn phase(&self) -> Phase {
        match self.phase {
            PhaseState::Disconnected => Phase::Disconnected,
            PhaseState::Connecting => Phase::Connecting,
            PhaseState::Idle => Phase::Idle,
            PhaseState::Querying => Phase::Querying,
        }
    }

    pub fn is_connected(&self) -> bool {
        matches!(self.phase, PhaseState::Idle | PhaseState::Querying)
    }

    pub fn in_flight(&self) -> bool {
        matches!(self.phase, PhaseState::Connecting | PhaseState::Querying)
    }

    pub fn config(&self) -> Option<&ConnectionConfig> {
        self.config.as_ref()
    }

    pub fn schema(&self) -> Option<&SchemaInfo> {
        self.schema.as_ref()
    }

    pub fn result(&self) -> Option<&QueryResult> {
        self.result.as_ref()
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Persistent backend status, flipped by `BackendDown` failures and
    /// cleared by the next successful completion.
    pub fn backend_down(&self) -> bool {
        self.backend_down
    }

    pub fn upload_pending(&self) -> bool {
        self.upload_pending
    }

    pub fn connected_at(&self) -> Option<DateTime<Utc>> {
        self.connected_at
    }

    /// Identity of the currently applied result. Moves exactly when a new
    /// result replaces the old one.
    pub fn revision(&self) -> u64 {
        self.revision
    }

    /// Start connecting. Fails fast on an invalid config; rejected when a
    /// session is already established or being established.
    pub fn begin_connect(&mut self, config: ConnectionConfig) -> Result<QueryTicket> {
        if self.phase != PhaseState::Disconnected {
            return Err(Error::Connection("already connected".to_string()));
        }
        config.validate()?;
        self.config = Some(config);
        self.phase = PhaseState::Connecting;
        self.epoch += 1;
        Ok(QueryTicket { epoch: self.epoch })
    }

    /// Apply a connect outcome. Returns false when the ticket is stale
    /// (the user disconnected while the request was out) and nothing was
    /// applied.
    pub fn complete_connect(
        &mut self,
        ticket: QueryTicket,
        outcome: std::result::Result<SchemaInfo, Error>,
    ) -> bool {
        if ticket.epoch != self.epoch || self.phase != PhaseState::Connecting {
            return false;
        }
        match outcome {
            Ok(schema) => {
                self.schema = Some(schema);
                self.phase = PhaseState::Idle;
                self.connected_at = Some(Utc::now());
                self.error = None;
                self.backend_down = false;
            }
            Err(err) => {
                self.backend_down = err.is_backend_down();
                self.error = Some(err.to_string());
                self.phase = PhaseState::Disconnected;
                self.config = None;
            }
        }
        true
    }

    /// Start a query. Returns `None` (a no-op, not an error) when the
    /// question is blank, a query is already in flight, the session is not
    /// connected, or an upload against this connection is still pending.
    ///
    /// Any previous result and error are cleared up front, so the old
    /// table/chart state is gone before the new answer arrives and the two
    /// are never rendered together.
    pub fn begin_query(&mut self, question: &str) -> Option<QueryTicket> {
        if self.phase != PhaseState::Idle || self.upload_pending {
            return None;
        }
        if question.trim().is_empty() {
            return None;
        }
        self.result = None;
        self.error = None;
        self.phase = PhaseState::Querying;
        self.epoch += 1;
        Some(QueryTicket { epoch: self.epoch })
    }

    /// Apply a query outcome: either a whole new result or an error message,
    /// never both, never a partial mix. Stale tickets are discarded.
    pub fn complete_query(
        &mut self,
        ticket: QueryTicket,
        outcome: std::result::Result<QueryResult, Error>,
    ) -> bool {
        if ticket.epoch != self.epoch || self.phase != PhaseState::Querying {
            return false;
        }
        self.phase = PhaseState::Idle;
        match outcome {
            Ok(result) => {
                self.result = Some(result);
                self.error = None;
                self.backend_down = false;
                self.revision += 1;
            }
            Err(err) => {
                self.backend_down = err.is_backend_down();
                self.result = None;
                self.error = Some(err.to_string());
            }
        }
        true
    }

    /// Replace the schema snapshot wholesale. Refresh failures are the
    /// caller's to log; they never reach session state because schema
    /// display is best-effort.
    pub fn apply_schema(&mut self, schema: SchemaInfo) {
        if self.is_connected() {
            self.schema = Some(schema);
        }
    }

    /// Mark an upload against the current connection as outstanding; query
    /// submission is disabled until `finish_upload`, since ingestion can
    /// change the schema the next query depends on.
    pub fn start_upload(&mut self) -> bool {
        if self.phase != PhaseState::Idle || self.upload_pending {
            return false;
        }
        self.upload_pending = true;
        true
    }

    pub fn finish_upload(&mut self) {
        self.upload_pending = false;
    }

    /// Unconditional reset to `Disconnected`. Config, schema, result, error
    /// and upload markers are all discarded; the epoch moves so any still
    /// outstanding completion lands in the void.
    pub fn disconnect(&mut self) {
        let epoch = self.epoch + 1;
        *self = Session {
            epoch,
            ..Session::default()
        };
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use querydeck_types::{AnswerMode, ConnectionConfig, Driver};

    fn config() -> ConnectionConfig {
        ConnectionConfig::new(Driver::Mysql, "localhost", "school")
    }

    fn connected() -> Session {
        let mut session = Session::new();
        let ticket = session.begin_connect(config()).unwrap();
        assert_eq!(session.phase(), Phase::Connecting);
        assert!(session.complete_connect(ticket, Ok(SchemaInfo::new())));
        session
    }

    fn chat_result(answer: &str) -> QueryResult {
        QueryResult {
            mode: AnswerMode::Chat,
            answer: Some(answer.to_string()),
            ..QueryResult::default()
        }
    }

    #[test]
    fn test_connect_success_reaches_idle() {
        let session = connected();
        assert_eq!(session.phase(), Phase::Idle);
        assert!(session.is_connected());
        assert!(session.schema().is_some());
        assert!(session.connected_at().is_some());
    }

    #[test]
    fn test_connect_failure_returns_to_disconnected() {
        let mut session = Session::new();
        let ticket = session.begin_connect(config()).unwrap();
        assert!(session.complete_connect(
            ticket,
            Err(Error::Connection("access denied".to_string()))
        ));
        assert_eq!(session.phase(), Phase::Disconnected);
        assert!(session.error().unwrap().contains("access denied"));
        assert!(!session.backend_down());
    }

    #[test]
    fn test_unreachable_backend_sets_persistent_status() {
        let mut session = Session::new();
        let ticket = session.begin_connect(config()).unwrap();
        session.complete_connect(ticket, Err(Error::BackendDown("refused".to_string())));
        assert!(session.backend_down());
    }

    #[test]
    fn test_invalid_config_is_rejected_before_any_flight() {
        let mut session = Session::new();
        let bad = ConnectionConfig::new(Driver::Mysql, "localhost", "");
        assert!(session.begin_connect(bad).is_err());
        assert_eq!(session.phase(), Phase::Disconnected);
    }

    #[test]
    fn test_blank_question_is_a_noop() {
        let mut session = connected();
        assert!(session.begin_query("   ").is_none());
        assert_eq!(session.phase(), Phase::Idle);
    }

    #[test]
    fn test_single_query_in_flight() {
        let mut session = connected();
        let first = session.begin_query("how many students?");
        assert!(first.is_some());
        assert_eq!(session.phase(), Phase::Querying);

        // second submission while in flight: no-op, no second ticket
        assert!(session.begin_query("and teachers?").is_none());

        assert!(session.complete_query(first.unwrap(), Ok(chat_result("42"))));
        assert_eq!(session.phase(), Phase::Idle);
        assert!(session.begin_query("and teachers?").is_some());
    }

    #[test]
    fn test_new_query_clears_previous_result_before_completion() {
        let mut session = connected();
        let ticket = session.begin_query("first").unwrap();
        session.complete_query(ticket, Ok(chat_result("one")));
        assert!(session.result().is_some());

        let _ticket = session.begin_query("second").unwrap();
        assert!(session.result().is_none());
        assert!(session.error().is_none());
    }

    #[test]
    fn test_result_application_bumps_revision() {
        let mut session = connected();
        assert_eq!(session.revision(), 0);

        let ticket = session.begin_query("first").unwrap();
        session.complete_query(ticket, Ok(chat_result("one")));
        assert_eq!(session.revision(), 1);

        let ticket = session.begin_query("second").unwrap();
        session.complete_query(ticket, Err(Error::Query("boom".to_string())));
        // errors do not mint a new result identity
        assert_eq!(session.revision(), 1);
        assert!(session.result().is_none());
        assert!(session.error().is_some());
    }

    #[test]
    fn test_stale_completion_after_resubmit_is_discarded() {
        let mut session = connected();
        let first = session.begin_query("first").unwrap();
        session.complete_query(first, Ok(chat_result("one")));

        let second = session.begin_query("second").unwrap();
        // a duplicate completion for the already-superseded first query
        assert!(!session.complete_query(first, Ok(chat_result("stale"))));
        assert!(session.result().is_none());
        assert_eq!(session.phase(), Phase::Querying);

        assert!(session.complete_query(second, Ok(chat_result("two"))));
        assert_eq!(session.result().unwrap().answer.as_deref(), Some("two"));
    }

    #[test]
    fn test_stale_completion_after_disconnect_is_discarded() {
        let mut session = connected();
        let ticket = session.begin_query("first").unwrap();
        session.disconnect();

        assert!(!session.complete_query(ticket, Ok(chat_result("ghost"))));
        assert_eq!(session.phase(), Phase::Disconnected);
        assert!(session.result().is_none());
        assert!(session.error().is_none());
    }

    #[test]
    fn test_disconnect_discards_everything() {
        let mut session = connected();
        let ticket = session.begin_query("q").unwrap();
        session.complete_query(ticket, Ok(chat_result("a")));
        session.start_upload();

        session.disconnect();
        assert_eq!(session.phase(), Phase::Disconnected);
        assert!(session.config().is_none());
        assert!(session.schema().is_none());
        assert!(session.result().is_none());
        assert!(session.error().is_none());
        assert!(!session.upload_pending());
        assert!(session.connected_at().is_none());
    }

    #[test]
    fn test_upload_pending_blocks_query_submission() {
        let mut session = connected();
        assert!(session.start_upload());
        assert!(session.begin_query("blocked").is_none());

        session.finish_upload();
        assert!(session.begin_query("unblocked").is_some());
    }

    #[test]
    fn test_schema_refresh_replaces_wholesale() {
        let mut session = connected();
        let mut schema = SchemaInfo::new();
        schema.insert(
            "uploads".to_string(),
            querydeck_types::TableInfo {
                row_count: 1,
                columns: vec![],
            },
        );
        session.apply_schema(schema);
        assert_eq!(session.schema().unwrap().len(), 1);
        assert!(session.schema().unwrap().contains_key("uploads"));
    }
}
