//! CSV report download. Pure formatting over an already-filtered list; the
//! csv writer handles quoting, so descriptions may contain commas.

use crate::error::{AppError, AppResult};
use crate::models::transaction::Transaction;

pub fn transactions_csv(transactions: &[Transaction]) -> AppResult<Vec<u8>> {
    let mut writer = csv::Writer::from_writer(Vec::new());

    writer.write_record(["date", "description", "category", "type", "amount"])?;
    for t in transactions {
        let amount = t.amount_display();
        writer.write_record([
            t.date.as_str(),
            t.description.as_str(),
            t.category.as_str(),
            t.txn_type.as_str(),
            amount.as_str(),
        ])?;
    }

    writer
        .into_inner()
        .map_err(|e| AppError::Internal(format!("CSV buffer error: {}", e)))
}
