//! Export filename construction.

use chrono::{Local, NaiveDateTime};

/// Segment used when the query is empty.
pub const DEFAULT_EMPTY_QUERY_TOKEN: &str = "all";

const TIMESTAMP_FORMAT: &str = "%Y%m%d-%H%M%S";

/// Build `<prefix>_<query-or-placeholder>_<YYYYMMDD-HHMMSS>.csv`.
///
/// `at` is local wall-clock time. The query is trimmed; if nothing is left,
/// `empty_token` stands in so the name never has a blank segment. Characters
/// that cannot appear in a file name, and runs of whitespace, become `-`.
#[must_use]
pub fn export_filename(prefix: &str, query: &str, empty_token: &str, at: NaiveDateTime) -> String {
    let query = query.trim();
    let segment = if query.is_empty() {
        sanitize(empty_token)
    } else {
        sanitize(query)
    };
    format!(
        "{}_{}_{}.csv",
        sanitize(prefix),
        segment,
        at.format(TIMESTAMP_FORMAT)
    )
}

/// [`export_filename`] stamped with the current local time.
#[must_use]
pub fn export_filename_now(prefix: &str, query: &str, empty_token: &str) -> String {
    export_filename(prefix, query, empty_token, Local::now().naive_local())
}

fn sanitize(segment: &str) -> String {
    let mut out = String::with_capacity(segment.len());
    let mut last_dash = false;
    for c in segment.chars() {
        let bad = c.is_whitespace()
            || c.is_control()
            || matches!(c, '/' | '\\' | ':' | '*' | '?' | '"' | '<' | '>' | '|');
        if bad {
            if !last_dash {
                out.push('-');
            }
            last_dash = true;
        } else {
            out.push(c);
            last_dash = false;
        }
    }
    out
}
