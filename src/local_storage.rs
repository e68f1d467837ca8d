//! A durable key-value namespace backed by a single SQLite table.
//!
//! Values are opaque strings. Callers are responsible for serializing and
//! deserializing whatever they store, and every write replaces the previous
//! value for the key in full.

use rusqlite::{Connection, OptionalExtension};

use crate::Error;

/// Create the table that holds the key-value pairs.
///
/// # Errors
/// Returns an [Error::SqlError] if the table could not be created.
pub fn create_local_storage_table(connection: &Connection) -> Result<(), Error> {
    connection.execute(
        "CREATE TABLE IF NOT EXISTS local_storage (
            key TEXT PRIMARY KEY NOT NULL,
            value TEXT NOT NULL
        )",
        (),
    )?;

    Ok(())
}

/// Get the value stored under `key`, or `None` if nothing has been stored yet.
///
/// # Errors
/// Returns an [Error::SqlError] if the query fails.
pub fn get_item(key: &str, connection: &Connection) -> Result<Option<String>, Error> {
    let value = connection
        .query_row(
            "SELECT value FROM local_storage WHERE key = ?1",
            (key,),
            |row| row.get(0),
        )
        .optional()?;

    Ok(value)
}

/// Store `value` under `key`, overwriting any existing value.
///
/// # Errors
/// Returns an [Error::SqlError] if the write fails.
pub fn set_item(key: &str, value: &str, connection: &Connection) -> Result<(), Error> {
    connection.execute(
        "INSERT INTO local_storage (key, value) VALUES (?1, ?2)
         ON CONFLICT(key) DO UPDATE SET value = excluded.value",
        (key, value),
    )?;

    Ok(())
}
