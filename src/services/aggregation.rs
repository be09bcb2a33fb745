//! Pure aggregation over an in-memory transaction list.
//!
//! Everything here is deterministic and side-effect free; handlers load a
//! user's transactions once and derive totals and chart series from the same
//! slice. Recompute-on-change is fine at personal-ledger volumes (a few
//! hundred rows), so nothing is cached or updated incrementally.

use std::cmp::Ordering;
use std::collections::HashMap;

use serde::Serialize;

use crate::models::category::OTHER_CATEGORY;
use crate::models::transaction::{Transaction, TransactionType};

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Totals {
    pub debit: f64,
    pub credit: f64,
    pub cash: f64,
    pub balance: f64,
}

#[derive(Debug, Clone, Serialize)]
pub struct DailySpending {
    pub date: String,
    pub amount: f64,
}

#[derive(Debug, Clone, Serialize)]
pub struct CategorySpending {
    pub category: String,
    pub amount: f64,
}

#[derive(Debug, Clone, Serialize)]
pub struct BalancePoint {
    pub date: String,
    pub balance: f64,
}

/// Sum amounts per type bucket. Balance is credit minus debit; cash is
/// tracked on its own and stays out of the balance (off-books by policy).
/// Rows with an unrecognized type contribute to no bucket.
pub fn compute_totals(transactions: &[Transaction]) -> Totals {
    let mut totals = Totals::default();

    for t in transactions {
        match t.kind() {
            Some(TransactionType::Debit) => totals.debit += t.amount,
            Some(TransactionType::Credit) => totals.credit += t.amount,
            Some(TransactionType::Cash) => totals.cash += t.amount,
            None => {}
        }
    }

    totals.balance = totals.credit - totals.debit;
    totals
}

/// Sum amounts per category label; blank labels count toward "Other".
pub fn group_by_category(transactions: &[Transaction]) -> HashMap<String, f64> {
    let mut map: HashMap<String, f64> = HashMap::new();

    for t in transactions {
        let category = if t.category.trim().is_empty() {
            OTHER_CATEGORY
        } else {
            t.category.as_str()
        };
        *map.entry(category.to_string()).or_insert(0.0) += t.amount;
    }

    map
}

/// Sum amounts per exact date string.
pub fn group_by_date(transactions: &[Transaction]) -> HashMap<String, f64> {
    let mut map: HashMap<String, f64> = HashMap::new();

    for t in transactions {
        *map.entry(t.date.clone()).or_insert(0.0) += t.amount;
    }

    map
}

/// Debit spending per day, ascending by date, trimmed to the most recent
/// `window` days so chart width stays bounded.
pub fn daily_series(transactions: &[Transaction], window: usize) -> Vec<DailySpending> {
    let debits: Vec<Transaction> = transactions
        .iter()
        .filter(|t| t.kind() == Some(TransactionType::Debit))
        .cloned()
        .collect();

    let map = group_by_date(&debits);
    let mut dates: Vec<String> = map.keys().cloned().collect();
    dates.sort();

    let skip = dates.len().saturating_sub(window);
    dates
        .into_iter()
        .skip(skip)
        .map(|date| {
            let amount = map[&date];
            DailySpending { date, amount }
        })
        .collect()
}

/// Debit spending per category, largest first, trimmed to `top_n` entries.
/// Grouping preserves first-seen order and the sort is stable, so equal sums
/// keep that order.
pub fn category_series(transactions: &[Transaction], top_n: usize) -> Vec<CategorySpending> {
    let mut order: Vec<CategorySpending> = Vec::new();
    let mut index: HashMap<String, usize> = HashMap::new();

    for t in transactions {
        if t.kind() != Some(TransactionType::Debit) {
            continue;
        }
        let category = if t.category.trim().is_empty() {
            OTHER_CATEGORY
        } else {
            t.category.as_str()
        };
        if let Some(&i) = index.get(category) {
            order[i].amount += t.amount;
        } else {
            index.insert(category.to_string(), order.len());
            order.push(CategorySpending {
                category: category.to_string(),
                amount: t.amount,
            });
        }
    }

    order.sort_by(|a, b| b.amount.partial_cmp(&a.amount).unwrap_or(Ordering::Equal));
    order.truncate(top_n);
    order
}

/// Running balance per transaction in chronological order. Credits add,
/// debits subtract, cash carries the balance forward unchanged. The sort is
/// stable: same-date transactions keep their relative input order.
pub fn balance_series(transactions: &[Transaction]) -> Vec<BalancePoint> {
    let mut sorted: Vec<&Transaction> = transactions.iter().collect();
    sorted.sort_by(|a, b| a.date.cmp(&b.date));

    let mut balance = 0.0;
    let mut points = Vec::with_capacity(sorted.len());

    for t in sorted {
        match t.kind() {
            Some(TransactionType::Credit) => balance += t.amount,
            Some(TransactionType::Debit) => balance -= t.amount,
            _ => {}
        }
        points.push(BalancePoint {
            date: t.date.clone(),
            balance,
        });
    }

    points
}
