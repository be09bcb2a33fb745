use crate::models::transaction::{NewTransaction, Transaction};
use rusqlite::{params, Connection, OptionalExtension, Row};
use tracing::{debug, warn};
use uuid::Uuid;

const COLUMNS: &str = "id, date, txn_type, amount, category, description, created_at";

fn row_to_transaction(row: &Row) -> rusqlite::Result<Transaction> {
    Ok(Transaction {
        id: row.get(0)?,
        date: row.get(1)?,
        txn_type: row.get(2)?,
        amount: row.get(3)?,
        category: row.get(4)?,
        description: row.get(5)?,
        created_at: row.get(6)?,
    })
}

/// List a user's transactions, newest first (`created_at`, then insertion
/// order for same-second ties).
pub fn list_transactions(
    conn: &Connection,
    username: &str,
    limit: Option<i64>,
) -> rusqlite::Result<Vec<Transaction>> {
    let mut sql = format!(
        "SELECT {COLUMNS} FROM transactions
         WHERE username = ?
         ORDER BY created_at DESC, rowid DESC"
    );
    let mut params_vec: Vec<Box<dyn rusqlite::ToSql>> = vec![Box::new(username.to_string())];

    if let Some(limit) = limit {
        sql.push_str(" LIMIT ?");
        params_vec.push(Box::new(limit));
    }

    let params_refs: Vec<&dyn rusqlite::ToSql> = params_vec.iter().map(|p| p.as_ref()).collect();
    let mut stmt = conn.prepare(&sql)?;

    let transactions: Vec<Transaction> = stmt
        .query_map(params_refs.as_slice(), row_to_transaction)?
        .filter_map(|t| t.ok())
        .collect();

    debug!(count = transactions.len(), "Listed transactions");
    Ok(transactions)
}

/// Fetch the transactions whose denormalized category label equals `category`.
/// The consistency operation's read phase; matching is by exact stored name.
pub fn query_by_category(
    conn: &Connection,
    username: &str,
    category: &str,
) -> rusqlite::Result<Vec<Transaction>> {
    let mut stmt = conn.prepare(&format!(
        "SELECT {COLUMNS} FROM transactions
         WHERE username = ? AND category = ?
         ORDER BY created_at DESC, rowid DESC"
    ))?;

    let transactions = stmt
        .query_map(params![username, category], row_to_transaction)?
        .filter_map(|t| t.ok())
        .collect();

    Ok(transactions)
}

pub fn get_transaction(
    conn: &Connection,
    username: &str,
    id: &str,
) -> rusqlite::Result<Option<Transaction>> {
    conn.query_row(
        &format!("SELECT {COLUMNS} FROM transactions WHERE username = ? AND id = ?"),
        params![username, id],
        row_to_transaction,
    )
    .optional()
}

pub fn create_transaction(
    conn: &Connection,
    username: &str,
    transaction: &NewTransaction,
) -> rusqlite::Result<String> {
    let id = Uuid::new_v4().to_string();
    conn.execute(
        "INSERT INTO transactions (id, username, date, txn_type, amount, category, description)
         VALUES (?, ?, ?, ?, ?, ?, ?)",
        params![
            id,
            username,
            transaction.date,
            transaction.txn_type,
            transaction.amount,
            transaction.category,
            transaction.description,
        ],
    )?;

    debug!(
        transaction_id = %id,
        amount = transaction.amount,
        "Created transaction"
    );
    Ok(id)
}

pub fn update_transaction(
    conn: &Connection,
    username: &str,
    id: &str,
    transaction: &NewTransaction,
) -> rusqlite::Result<bool> {
    let rows = conn.execute(
        "UPDATE transactions SET date = ?, txn_type = ?, amount = ?, category = ?, description = ?
         WHERE username = ? AND id = ?",
        params![
            transaction.date,
            transaction.txn_type,
            transaction.amount,
            transaction.category,
            transaction.description,
            username,
            id,
        ],
    )?;
    if rows > 0 {
        debug!(transaction_id = %id, "Updated transaction");
    }
    Ok(rows > 0)
}

/// Relabel a single transaction's category. Used inside the consistency
/// operation's write batch; the row set was already scoped in the read phase.
pub fn set_category(conn: &Connection, id: &str, category: &str) -> rusqlite::Result<()> {
    conn.execute(
        "UPDATE transactions SET category = ? WHERE id = ?",
        params![category, id],
    )?;
    Ok(())
}

pub fn delete_transaction(conn: &Connection, username: &str, id: &str) -> rusqlite::Result<bool> {
    let rows = conn.execute(
        "DELETE FROM transactions WHERE username = ? AND id = ?",
        params![username, id],
    )?;
    if rows > 0 {
        debug!(transaction_id = %id, "Deleted transaction");
    }
    Ok(rows > 0)
}

pub fn delete_all_transactions(conn: &Connection, username: &str) -> rusqlite::Result<usize> {
    let rows = conn.execute("DELETE FROM transactions WHERE username = ?", [username])?;
    warn!(count = rows, "Deleted all transactions");
    Ok(rows)
}
