use crate::models::category::{Category, NewCategory};
use rusqlite::{params, Connection, OptionalExtension, Row};
use tracing::debug;
use uuid::Uuid;

fn row_to_category(row: &Row) -> rusqlite::Result<Category> {
    Ok(Category {
        id: row.get(0)?,
        name: row.get(1)?,
        created_at: row.get(2)?,
    })
}

pub fn list_categories(conn: &Connection, username: &str) -> rusqlite::Result<Vec<Category>> {
    let mut stmt = conn.prepare(
        "SELECT id, name, created_at FROM categories
         WHERE username = ?
         ORDER BY name",
    )?;

    let categories = stmt
        .query_map([username], row_to_category)?
        .filter_map(|c| c.ok())
        .collect();

    Ok(categories)
}

pub fn get_category(
    conn: &Connection,
    username: &str,
    id: &str,
) -> rusqlite::Result<Option<Category>> {
    conn.query_row(
        "SELECT id, name, created_at FROM categories WHERE username = ? AND id = ?",
        params![username, id],
        row_to_category,
    )
    .optional()
}

/// Case-insensitive name lookup; returns the canonically spelled record.
pub fn find_by_name(
    conn: &Connection,
    username: &str,
    name: &str,
) -> rusqlite::Result<Option<Category>> {
    conn.query_row(
        "SELECT id, name, created_at FROM categories
         WHERE username = ? AND name = ? COLLATE NOCASE",
        params![username, name],
        row_to_category,
    )
    .optional()
}

pub fn create_category(
    conn: &Connection,
    username: &str,
    category: &NewCategory,
) -> rusqlite::Result<String> {
    let id = Uuid::new_v4().to_string();
    conn.execute(
        "INSERT INTO categories (id, username, name) VALUES (?, ?, ?)",
        params![id, username, category.name],
    )?;
    debug!(category_id = %id, name = %category.name, "Created category");
    Ok(id)
}

pub fn rename_category(conn: &Connection, id: &str, new_name: &str) -> rusqlite::Result<bool> {
    let rows = conn.execute(
        "UPDATE categories SET name = ? WHERE id = ?",
        params![new_name, id],
    )?;
    if rows > 0 {
        debug!(category_id = %id, name = %new_name, "Renamed category");
    }
    Ok(rows > 0)
}

pub fn delete_category(conn: &Connection, id: &str) -> rusqlite::Result<bool> {
    let rows = conn.execute("DELETE FROM categories WHERE id = ?", [id])?;
    if rows > 0 {
        debug!(category_id = %id, "Deleted category");
    }
    Ok(rows > 0)
}
