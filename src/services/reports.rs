//! Report filtering: predicate composition over an in-memory transaction
//! list. All predicates AND together in one pass; an unset field passes
//! everything.

use crate::models::transaction::Transaction;

#[derive(Debug, Clone, Default)]
pub struct ReportFilter {
    /// Inclusive lower date bound (lexicographic on `YYYY-MM-DD`).
    pub from: Option<String>,
    /// Inclusive upper date bound.
    pub to: Option<String>,
    pub txn_type: Option<String>,
    pub category: Option<String>,
}

impl ReportFilter {
    /// Collapse the UI's wildcard sentinels ("all", empty string) into unset
    /// fields so `matches` only ever sees real constraints.
    pub fn normalized(self) -> Self {
        fn scrub(value: Option<String>) -> Option<String> {
            value.filter(|v| !v.is_empty() && v != "all")
        }

        Self {
            from: scrub(self.from),
            to: scrub(self.to),
            txn_type: scrub(self.txn_type),
            category: scrub(self.category),
        }
    }

    pub fn matches(&self, t: &Transaction) -> bool {
        if let Some(from) = &self.from {
            if t.date < *from {
                return false;
            }
        }
        if let Some(to) = &self.to {
            if t.date > *to {
                return false;
            }
        }
        if let Some(txn_type) = &self.txn_type {
            if t.txn_type != *txn_type {
                return false;
            }
        }
        if let Some(category) = &self.category {
            if t.category != *category {
                return false;
            }
        }
        true
    }

    pub fn apply(&self, mut transactions: Vec<Transaction>) -> Vec<Transaction> {
        transactions.retain(|t| self.matches(t));
        transactions
    }
}
