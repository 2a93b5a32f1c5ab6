//! The compiled-in record collection.

use std::sync::OnceLock;

use crate::record::Record;

/// Returns the fixed record collection shipped with the binary.
///
/// The collection is built once and shared read-only for the life of the
/// process. Callers pass it into the query engine explicitly.
#[must_use]
pub fn default_records() -> &'static [Record] {
    static RECORDS: OnceLock<Vec<Record>> = OnceLock::new();
    RECORDS.get_or_init(|| {
        vec![
            Record::new(1, "Revenue Analytics Dashboard", "Analytics", 92.0),
            Record::new(2, "Customer Churn Model", "Machine Learning", 88.0),
            Record::new(3, "Web Traffic Analytics", "Marketing", 75.0),
            Record::new(4, "Inventory Tracker", "Operations", 64.0),
            Record::new(5, "Sales Forecast", "Analytics", 88.0),
            Record::new(6, "Support Ticket Triage", "Customer Success", 71.0),
            Record::new(7, "Product Analytics Pipeline", "Data Engineering", 75.0),
            Record::new(8, "Onboarding Survey, Q3", "Research", 58.5),
        ]
    })
}
