use rusqlite::Connection;
use tracing::debug;

/// Create the preferences table if it does not exist yet
pub fn ensure_schema(conn: &Connection) -> Result<(), rusqlite::Error> {
    debug!("Creating preferences table if not exists");

    conn.execute(
        "CREATE TABLE IF NOT EXISTS preferences (
            key TEXT PRIMARY KEY,
            value BLOB NOT NULL,
            updated_at TEXT NOT NULL
        )",
        [],
    )?;

    Ok(())
}
