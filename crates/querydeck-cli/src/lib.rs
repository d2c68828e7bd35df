// NOTE: querydeck Architecture Rationale
//
// Why a presentation layer (presenters -> view models -> views)?
// - The backend's QueryResult is a bag of independent optionals; every
//   surface (console text, console JSON, TUI) needs the same interpretation
//   of which sections exist and in what order
// - Presenters are pure functions over the result, so section predicates are
//   testable without a terminal or a backend
// - Views only format; they never decide what to show
//
// Why one worker thread per dashboard (not async)?
// - The backend exposes four request/response endpoints; there is nothing to
//   multiplex
// - A single job channel serializes network calls, which matches the
//   session's single-in-flight rule by construction
// - Stale completions are discarded by ticket, not by cancellation

mod args;
mod commands;
mod handlers;
pub mod presentation;

pub use args::{Cli, Commands, ConnectionArgs, OutputFormat};
pub use commands::run;
