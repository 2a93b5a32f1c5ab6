//! Record type — the unit the query engine filters and ranks.

use serde::{Deserialize, Serialize};
use std::fmt;

/// An ordered column name → value mapping. Key order is insertion order,
/// which is what CSV export uses when no explicit column list is given.
pub type Row = serde_json::Map<String, serde_json::Value>;

/// Column names of a [`Record`] in their canonical export order.
pub const RECORD_COLUMNS: [&str; 4] = ["id", "name", "category", "score"];

/// Unique identifier of a record: either numeric or textual.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RecordId {
    Int(i64),
    Text(String),
}

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RecordId::Int(n) => write!(f, "{n}"),
            RecordId::Text(s) => f.write_str(s),
        }
    }
}

impl From<i64> for RecordId {
    fn from(n: i64) -> Self {
        RecordId::Int(n)
    }
}

impl From<i32> for RecordId {
    fn from(n: i32) -> Self {
        RecordId::Int(i64::from(n))
    }
}

impl From<&str> for RecordId {
    fn from(s: &str) -> Self {
        RecordId::Text(s.to_string())
    }
}

impl From<RecordId> for serde_json::Value {
    fn from(id: RecordId) -> Self {
        match id {
            RecordId::Int(n) => serde_json::Value::from(n),
            RecordId::Text(s) => serde_json::Value::String(s),
        }
    }
}

/// A searchable entity. Records are never mutated after construction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Record {
    pub id: RecordId,
    pub name: String,
    pub category: String,
    pub score: f64,
}

impl Record {
    #[must_use]
    pub fn new(
        id: impl Into<RecordId>,
        name: impl Into<String>,
        category: impl Into<String>,
        score: f64,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            category: category.into(),
            score,
        }
    }

    /// Convert to an export row with keys in [`RECORD_COLUMNS`] order.
    ///
    /// Non-finite scores have no JSON number form; they are stored as their
    /// text (`NaN`, `Infinity`, `-Infinity`).
    #[must_use]
    pub fn to_row(&self) -> Row {
        let mut row = Row::new();
        row.insert("id".to_string(), self.id.clone().into());
        row.insert("name".to_string(), self.name.clone().into());
        row.insert("category".to_string(), self.category.clone().into());
        let score = match serde_json::Number::from_f64(self.score) {
            Some(n) => serde_json::Value::Number(n),
            None => serde_json::Value::String(format_score(self.score)),
        };
        row.insert("score".to_string(), score);
        row
    }
}

/// Display text for a score, e.g. `92`, `58.5`, `NaN`, `Infinity`.
#[must_use]
pub fn format_score(score: f64) -> String {
    if score.is_nan() {
        "NaN".to_string()
    } else if score.is_infinite() {
        if score > 0.0 { "Infinity" } else { "-Infinity" }.to_string()
    } else {
        serde_json::Number::from_f64(score)
            .map(|n| canonical_number(&n))
            .unwrap_or_default()
    }
}

/// Canonical text for a JSON number: integral floats print without a
/// fractional part, so a score of `92.0` renders as `92`.
#[must_use]
pub fn canonical_number(n: &serde_json::Number) -> String {
    match n.as_f64() {
        Some(f) if n.is_f64() && f == 0.0 => "0".to_string(),
        Some(f) if n.is_f64() && f.fract() == 0.0 && f.abs() < 1e21 => format!("{f}"),
        _ => n.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn to_row_keeps_canonical_column_order() {
        let record = Record::new(7, "Churn Analytics", "Analytics", 88.0);
        let row = record.to_row();
        let keys: Vec<&str> = row.keys().map(String::as_str).collect();
        assert_eq!(keys, RECORD_COLUMNS);
        assert_eq!(row["id"], serde_json::json!(7));
        assert_eq!(row["name"], serde_json::json!("Churn Analytics"));
    }

    #[test]
    fn to_row_keeps_text_for_non_finite_scores() {
        let nan = Record::new("x-1", "Broken", "Misc", f64::NAN);
        assert_eq!(nan.to_row()["score"], serde_json::json!("NaN"));

        let inf = Record::new("x-2", "Huge", "Misc", f64::INFINITY);
        assert_eq!(inf.to_row()["score"], serde_json::json!("Infinity"));

        let neg = Record::new("x-3", "Tiny", "Misc", f64::NEG_INFINITY);
        assert_eq!(neg.to_row()["score"], serde_json::json!("-Infinity"));
    }

    #[test]
    fn format_score_matches_canonical_number() {
        assert_eq!(format_score(92.0), "92");
        assert_eq!(format_score(58.5), "58.5");
        assert_eq!(format_score(f64::NAN), "NaN");
    }

    #[test]
    fn canonical_number_drops_integral_fraction() {
        let n = |f: f64| serde_json::Number::from_f64(f).unwrap();
        assert_eq!(canonical_number(&n(92.0)), "92");
        assert_eq!(canonical_number(&n(58.5)), "58.5");
        assert_eq!(canonical_number(&n(-3.0)), "-3");
        assert_eq!(canonical_number(&n(-0.0)), "0");
        assert_eq!(canonical_number(&n(1e15)), "1000000000000000");
        assert_eq!(canonical_number(&n(1e20)), "100000000000000000000");
        assert_eq!(canonical_number(&serde_json::Number::from(7u64)), "7");
    }

    #[test]
    fn record_id_displays_without_decoration() {
        assert_eq!(RecordId::from(42).to_string(), "42");
        assert_eq!(RecordId::from("rec-9").to_string(), "rec-9");
    }

    #[test]
    fn record_id_deserializes_untagged() {
        let int: RecordId = serde_json::from_str("3").unwrap();
        let text: RecordId = serde_json::from_str("\"a\"").unwrap();
        assert_eq!(int, RecordId::Int(3));
        assert_eq!(text, RecordId::Text("a".to_string()));
    }
}
