//! # sift-query
//!
//! Query engine for sift. Filters an injected record collection by a
//! case-insensitive substring match on name or category and ranks the
//! matches by score.
//!
//! Includes:
//! - [`QueryEngine`] — the pure `search` operation
//! - [`SearchSession`] — memoizes the last submitted query
//! - Result formatter (Table, JSON, Markdown)

pub mod engine;
pub mod formatter;
pub mod session;

pub use engine::{normalize_query, QueryEngine, QueryResult};
pub use formatter::{format_result, OutputFormat};
pub use session::SearchSession;
