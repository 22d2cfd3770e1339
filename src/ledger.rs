//! Transaction ledger queries
//!
//! The ledger is scanned in full; each provided filter is an
//! independent AND predicate. Timestamps are ISO-8601 strings, so the
//! range check is a plain lexicographic comparison.

use crate::models::{Ledger, TransactionRecord};

/// Optional filters for a ledger query
///
/// The time range only applies when both bounds are present, and both
/// bounds are inclusive.
#[derive(Debug, Clone, Default)]
pub struct TransactionFilter {
    pub product_id: Option<String>,
    pub operator: Option<String>,
    pub start: Option<String>,
    pub end: Option<String>,
}

impl TransactionFilter {
    pub fn is_empty(&self) -> bool {
        self.product_id.is_none()
            && self.operator.is_none()
            && self.start.is_none()
            && self.end.is_none()
    }

    fn matches(&self, record: &TransactionRecord) -> bool {
        if let Some(id) = &self.product_id {
            if &record.product_id != id {
                return false;
            }
        }
        if let Some(operator) = &self.operator {
            if &record.operator != operator {
                return false;
            }
        }
        if let (Some(start), Some(end)) = (&self.start, &self.end) {
            if record.timestamp < *start || record.timestamp > *end {
                return false;
            }
        }
        true
    }
}

/// All ledger entries matching the filter, in original ledger order
pub fn filter_transactions(ledger: &Ledger, filter: &TransactionFilter) -> Vec<TransactionRecord> {
    ledger
        .iter()
        .filter(|record| filter.matches(record))
        .cloned()
        .collect()
}
