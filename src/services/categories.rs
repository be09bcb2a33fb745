//! Category rename/delete cascades and default seeding.
//!
//! `Transaction.category` is a denormalized copy of the category name, not a
//! foreign key, so renaming or deleting a category has to relabel every
//! referencing transaction itself. Each operation here runs in two phases:
//! a read phase that resolves the category and collects the affected
//! transactions, and a write phase that applies every mutation inside one
//! SQLite transaction, so readers observe all of it or none of it.

use std::collections::HashSet;

use rusqlite::Connection;
use tracing::{debug, info};

use crate::db::queries::{categories, transactions};
use crate::error::{AppError, AppResult};
use crate::models::category::{NewCategory, DEFAULT_CATEGORIES, OTHER_CATEGORY};

/// Rename a category and relabel every transaction carrying the old name.
/// Returns the number of transactions updated.
pub fn rename_category(
    conn: &mut Connection,
    username: &str,
    id: &str,
    new_name: &str,
) -> AppResult<usize> {
    let new_name = new_name.trim();
    if new_name.is_empty() {
        return Err(AppError::Validation("Category name is required".into()));
    }

    let category = categories::get_category(conn, username, id)?
        .ok_or_else(|| AppError::NotFound("Category not found".into()))?;

    let duplicate = categories::list_categories(conn, username)?
        .iter()
        .any(|c| c.id != category.id && c.name.to_lowercase() == new_name.to_lowercase());
    if duplicate {
        return Err(AppError::Validation(format!(
            "Category \"{}\" already exists",
            new_name
        )));
    }

    // Read phase. The lookup must use the pre-rename name: the denormalized
    // field only carries the name, so filtering after the category row has
    // changed would match nothing.
    let affected = transactions::query_by_category(conn, username, &category.name)?;

    // Write phase, one atomic batch.
    let tx = conn.transaction()?;
    categories::rename_category(&tx, &category.id, new_name)?;
    for t in &affected {
        transactions::set_category(&tx, &t.id, new_name)?;
    }
    tx.commit()?;

    info!(
        old_name = %category.name,
        new_name = %new_name,
        transactions = affected.len(),
        "Renamed category"
    );
    Ok(affected.len())
}

/// Delete a category, reassigning every referencing transaction to "Other".
/// Transactions themselves are never deleted. Returns the number reassigned.
pub fn delete_category(conn: &mut Connection, username: &str, id: &str) -> AppResult<usize> {
    let category = categories::get_category(conn, username, id)?
        .ok_or_else(|| AppError::NotFound("Category not found".into()))?;

    let affected = transactions::query_by_category(conn, username, &category.name)?;

    let tx = conn.transaction()?;
    for t in &affected {
        transactions::set_category(&tx, &t.id, OTHER_CATEGORY)?;
    }
    categories::delete_category(&tx, &category.id)?;
    tx.commit()?;

    info!(
        name = %category.name,
        transactions = affected.len(),
        "Deleted category, transactions moved to Other"
    );
    Ok(affected.len())
}

/// Create any of the default categories the user does not already have
/// (compared case-insensitively). Idempotent: a second run adds nothing and
/// returns 0, which callers report as "already loaded" rather than an error.
pub fn seed_default_categories(conn: &mut Connection, username: &str) -> AppResult<usize> {
    let existing: HashSet<String> = categories::list_categories(conn, username)?
        .iter()
        .map(|c| c.name.trim().to_lowercase())
        .collect();

    let missing: Vec<&str> = DEFAULT_CATEGORIES
        .iter()
        .copied()
        .filter(|name| !existing.contains(&name.to_lowercase()))
        .collect();

    if missing.is_empty() {
        debug!("Default categories already present");
        return Ok(0);
    }

    let tx = conn.transaction()?;
    for name in &missing {
        categories::create_category(
            &tx,
            username,
            &NewCategory {
                name: (*name).to_string(),
            },
        )?;
    }
    tx.commit()?;

    info!(count = missing.len(), "Seeded default categories");
    Ok(missing.len())
}
