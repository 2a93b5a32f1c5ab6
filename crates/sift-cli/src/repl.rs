//! Line-oriented query loop.
//!
//! Each input line is a query, except for `:export`, `:all`, `:help` and
//! `:quit`. Exports release their staged files in the background; the loop
//! waits for all of them before returning.

use std::io::{BufRead, Write};

use anyhow::Result;
use sift_export::ScheduledRelease;
use sift_query::{format_result, OutputFormat, QueryEngine, SearchSession};

use crate::export::Exporter;

const HELP: &str = "\
Type a query to search. Commands:
  :export  export the current results as CSV
  :all     export every record as CSV
  :help    show this help
  :quit    exit";

/// Run the loop until `:quit` or end of input. `interactive` prints the help
/// banner first.
pub fn run<R: BufRead, W: Write>(
    engine: QueryEngine<'_>,
    exporter: &Exporter,
    input: R,
    mut out: W,
    interactive: bool,
) -> Result<()> {
    let mut session = SearchSession::new(engine);
    let mut pending: Vec<ScheduledRelease> = Vec::new();

    if interactive {
        writeln!(out, "{HELP}")?;
    }

    for line in input.lines() {
        let line = line?;
        match line.trim() {
            ":quit" | ":q" => break,
            ":help" => writeln!(out, "{HELP}")?,
            ":export" => {
                let Some(query) = session.current_query().map(str::to_string) else {
                    writeln!(out, "Nothing to export yet; run a query first.")?;
                    continue;
                };
                let items = session.current().map(|r| r.items.clone()).unwrap_or_default();
                match exporter.results(&query, &items, &[]) {
                    Ok(receipt) => {
                        writeln!(out, "Exported to {}", receipt.delivered_to.display())?;
                        pending.push(receipt.release);
                    }
                    Err(e) => writeln!(out, "Export failed: {e:#}")?,
                }
            }
            ":all" => match exporter.records(engine.records(), &[]) {
                Ok(receipt) => {
                    writeln!(out, "Exported to {}", receipt.delivered_to.display())?;
                    pending.push(receipt.release);
                }
                Err(e) => writeln!(out, "Export failed: {e:#}")?,
            },
            _ => {
                let result = session.submit(&line);
                write!(out, "{}", format_result(result, OutputFormat::Table))?;
            }
        }
        out.flush()?;
    }

    for release in pending {
        if let Err(e) = release.wait() {
            tracing::warn!(error = %e, "staged export was not released cleanly");
        }
    }
    Ok(())
}
