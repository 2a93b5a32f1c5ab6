//! CSV text generation.
//!
//! Fields are quoted RFC 4180 style, with one extension: a value with
//! leading or trailing whitespace is quoted too, so spreadsheet tools do not
//! trim it. Lines are joined with CRLF regardless of platform.

use serde_json::Value;
use sift_core::{canonical_number, Row};

/// MIME type of the exported payload.
pub const CSV_MIME_TYPE: &str = "text/csv;charset=utf-8";

const BOM: char = '\u{feff}';
const LINE_END: &str = "\r\n";

/// Stringify a cell value. `null` becomes the empty string.
#[must_use]
pub fn cell_to_string(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(s) => s.clone(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => canonical_number(n),
        other => other.to_string(),
    }
}

/// Whether a field must be wrapped in double quotes.
#[must_use]
pub fn needs_quotes(field: &str) -> bool {
    field.contains(['"', ',', '\r', '\n'])
        || field.starts_with(char::is_whitespace)
        || field.ends_with(char::is_whitespace)
}

/// Escape a single field: embedded quotes are doubled, and the result is
/// wrapped in quotes only if [`needs_quotes`] says so.
#[must_use]
pub fn escape_field(field: &str) -> String {
    let escaped = field.replace('"', "\"\"");
    if needs_quotes(field) {
        format!("\"{escaped}\"")
    } else {
        escaped
    }
}

/// Render rows as CSV text.
///
/// A non-empty `columns` list is used verbatim. Otherwise the columns are
/// the keys of the first row in insertion order; with no rows either, the
/// output is a single empty header line. Missing cells are empty. There is
/// no trailing line terminator.
#[must_use]
pub fn to_csv<S: AsRef<str>>(rows: &[Row], columns: &[S]) -> String {
    let columns: Vec<&str> = if columns.is_empty() {
        rows.first()
            .map(|row| row.keys().map(String::as_str).collect())
            .unwrap_or_default()
    } else {
        columns.iter().map(AsRef::as_ref).collect()
    };

    let mut lines = Vec::with_capacity(rows.len() + 1);
    lines.push(
        columns
            .iter()
            .map(|c| escape_field(c))
            .collect::<Vec<_>>()
            .join(","),
    );

    for row in rows {
        let line = columns
            .iter()
            .map(|col| escape_field(&row.get(*col).map(cell_to_string).unwrap_or_default()))
            .collect::<Vec<_>>()
            .join(",");
        lines.push(line);
    }

    lines.join(LINE_END)
}

/// Encode CSV text as UTF-8 bytes with a leading byte-order mark.
#[must_use]
pub fn encode_payload(csv: &str) -> Vec<u8> {
    let mut text = String::with_capacity(csv.len() + BOM.len_utf8());
    text.push(BOM);
    text.push_str(csv);
    text.into_bytes()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use sift_core::Record;

    fn row(pairs: &[(&str, Value)]) -> Row {
        pairs
            .iter()
            .map(|(k, v)| ((*k).to_string(), v.clone()))
            .collect()
    }

    #[test]
    fn empty_rows_and_columns_give_single_empty_line() {
        assert_eq!(to_csv::<&str>(&[], &[]), "");
    }

    #[test]
    fn explicit_columns_without_rows_give_header_only() {
        assert_eq!(to_csv::<&str>(&[], &["id", "name"]), "id,name");
    }

    #[test]
    fn comma_value_is_quoted() {
        let rows = vec![row(&[("company", json!("Acme, Inc."))])];
        assert_eq!(to_csv::<&str>(&rows, &[]), "company\r\n\"Acme, Inc.\"");
    }

    #[test]
    fn embedded_quotes_are_doubled() {
        let rows = vec![row(&[("greeting", json!("Say \"hi\""))])];
        assert_eq!(to_csv(&rows, &["greeting"]), "greeting\r\n\"Say \"\"hi\"\"\"");
    }

    #[test]
    fn edge_whitespace_and_line_breaks_are_quoted() {
        assert_eq!(escape_field(" padded"), "\" padded\"");
        assert_eq!(escape_field("padded\t"), "\"padded\t\"");
        assert_eq!(escape_field("two\nlines"), "\"two\nlines\"");
        assert_eq!(escape_field("cr\rhere"), "\"cr\rhere\"");
        assert_eq!(escape_field("inner space"), "inner space");
        assert_eq!(escape_field(""), "");
    }

    #[test]
    fn header_names_are_escaped_like_values() {
        let rows = vec![row(&[("a,b", json!(1))])];
        assert_eq!(to_csv::<&str>(&rows, &[]), "\"a,b\"\r\n1");
    }

    #[test]
    fn columns_follow_requested_order_and_missing_cells_are_empty() {
        let rows = vec![
            row(&[("id", json!(1)), ("name", json!("North")), ("score", json!(9.5))]),
            row(&[("id", json!(2)), ("name", json!(null))]),
        ];
        let csv = to_csv(&rows, &["score", "name", "missing", "id"]);
        assert_eq!(csv, "score,name,missing,id\r\n9.5,North,,1\r\n,,,2");
    }

    #[test]
    fn derived_columns_use_first_row_key_order() {
        let rows = vec![
            row(&[("zeta", json!("z")), ("alpha", json!("a"))]),
            row(&[("alpha", json!("b")), ("extra", json!("ignored"))]),
        ];
        assert_eq!(to_csv::<&str>(&rows, &[]), "zeta,alpha\r\nz,a\r\n,b");
    }

    #[test]
    fn cell_values_stringify_canonically() {
        assert_eq!(cell_to_string(&json!(null)), "");
        assert_eq!(cell_to_string(&json!(true)), "true");
        assert_eq!(cell_to_string(&json!(42)), "42");
        assert_eq!(cell_to_string(&json!(92.0)), "92");
        assert_eq!(cell_to_string(&json!(0.25)), "0.25");
        assert_eq!(cell_to_string(&json!([1, 2])), "[1,2]");
    }

    #[test]
    fn large_and_non_finite_scores_export_as_text() {
        let rows = vec![
            Record::new(1, "Big", "x", 1e15).to_row(),
            Record::new(2, "Bigger", "x", 1e20).to_row(),
            Record::new(3, "Unknown", "x", f64::NAN).to_row(),
        ];
        assert_eq!(
            to_csv(&rows, &["score"]),
            "score\r\n1000000000000000\r\n100000000000000000000\r\nNaN"
        );
    }

    #[test]
    fn payload_starts_with_bom() {
        let bytes = encode_payload("név\r\nÁrvíztűrő");
        assert_eq!(&bytes[..3], &[0xEF, 0xBB, 0xBF]);
        assert_eq!(std::str::from_utf8(&bytes[3..]).unwrap(), "név\r\nÁrvíztűrő");
    }
}
