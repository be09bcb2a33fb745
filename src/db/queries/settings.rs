use rusqlite::{params, Connection, OptionalExtension};

pub fn get_setting(
    conn: &Connection,
    username: &str,
    key: &str,
) -> rusqlite::Result<Option<String>> {
    conn.query_row(
        "SELECT value FROM settings WHERE username = ? AND key = ?",
        params![username, key],
        |row| row.get(0),
    )
    .optional()
}

pub fn set_setting(
    conn: &Connection,
    username: &str,
    key: &str,
    value: &str,
) -> rusqlite::Result<()> {
    conn.execute(
        "INSERT INTO settings (username, key, value) VALUES (?, ?, ?)
         ON CONFLICT(username, key) DO UPDATE SET value = excluded.value",
        params![username, key, value],
    )?;
    Ok(())
}
