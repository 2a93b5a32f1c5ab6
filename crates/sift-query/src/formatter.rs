//! Result formatting: Table, JSON, and Markdown output.

use sift_core::{format_score, Record, RECORD_COLUMNS};

use crate::engine::QueryResult;

/// Output format for query results.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    #[default]
    Table,
    Json,
    Markdown,
}

/// Format a query result in the specified output format.
#[must_use]
pub fn format_result(result: &QueryResult, format: OutputFormat) -> String {
    match format {
        OutputFormat::Json => format_json(result),
        OutputFormat::Table => format_table(result),
        OutputFormat::Markdown => format_markdown(result),
    }
}

fn format_json(result: &QueryResult) -> String {
    serde_json::to_string_pretty(result).unwrap_or_else(|_| "{}".to_string())
}

fn cells(record: &Record) -> [String; 4] {
    [
        record.id.to_string(),
        record.name.clone(),
        record.category.clone(),
        format_score(record.score),
    ]
}

fn format_table(result: &QueryResult) -> String {
    let mut output = String::new();

    if result.items.is_empty() {
        output.push_str("(no results)\n");
    } else {
        let rows: Vec<[String; 4]> = result.items.iter().map(cells).collect();

        // Calculate column widths
        let mut widths: Vec<usize> = RECORD_COLUMNS.iter().map(|c| c.chars().count()).collect();
        for row in &rows {
            for (i, val) in row.iter().enumerate() {
                widths[i] = widths[i].max(val.chars().count());
            }
        }

        let header: Vec<String> = RECORD_COLUMNS
            .iter()
            .enumerate()
            .map(|(i, c)| format!("{:width$}", c, width = widths[i]))
            .collect();
        output.push_str(header.join(" | ").trim_end());
        output.push('\n');

        let sep: Vec<String> = widths.iter().map(|w| "-".repeat(*w)).collect();
        output.push_str(&sep.join("-+-"));
        output.push('\n');

        for row in &rows {
            let vals: Vec<String> = row
                .iter()
                .enumerate()
                .map(|(i, v)| format!("{:width$}", v, width = widths[i]))
                .collect();
            output.push_str(vals.join(" | ").trim_end());
            output.push('\n');
        }
    }

    output.push('\n');
    output.push_str(&result.explanation);
    output.push('\n');
    for tip in &result.tips {
        output.push_str("  - ");
        output.push_str(tip);
        output.push('\n');
    }

    output
}

fn format_markdown(result: &QueryResult) -> String {
    let mut output = String::new();

    if result.items.is_empty() {
        output.push_str("*No results*\n");
    } else {
        output.push_str("| ");
        output.push_str(&RECORD_COLUMNS.join(" | "));
        output.push_str(" |\n");

        output.push_str("| ");
        let seps: Vec<&str> = RECORD_COLUMNS.iter().map(|_| "---").collect();
        output.push_str(&seps.join(" | "));
        output.push_str(" |\n");

        for record in &result.items {
            let vals: Vec<String> = cells(record)
                .iter()
                .map(|v| v.replace('|', "\\|"))
                .collect();
            output.push_str("| ");
            output.push_str(&vals.join(" | "));
            output.push_str(" |\n");
        }
    }

    output.push('\n');
    output.push_str(&result.explanation);
    output.push_str("\n\n");
    for tip in &result.tips {
        output.push_str("- ");
        output.push_str(tip);
        output.push('\n');
    }

    output
}
