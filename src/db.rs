//! Database setup for the application's durable storage.

use rusqlite::{Connection, Transaction as SqlTransaction};

use crate::{Error, local_storage::create_local_storage_table};

/// Create all the tables the application needs, if they do not exist yet.
///
/// The tables are created inside a single exclusive transaction so a
/// partially initialized database is never left behind.
///
/// # Errors
/// Returns an [Error::SqlError] if any of the tables could not be created.
pub fn initialize(connection: &Connection) -> Result<(), Error> {
    let transaction =
        SqlTransaction::new_unchecked(connection, rusqlite::TransactionBehavior::Exclusive)?;

    create_local_storage_table(&transaction)?;

    transaction.commit()?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use rusqlite::Connection;

    use crate::local_storage::{get_item, set_item};

    use super::initialize;

    #[test]
    fn initialize_creates_local_storage() {
        let connection = Connection::open_in_memory().unwrap();

        initialize(&connection).unwrap();

        set_item("key", "value", &connection).unwrap();
        assert_eq!(get_item("key", &connection), Ok(Some("value".to_owned())));
    }

    #[test]
    fn initialize_is_idempotent() {
        let connection = Connection::open_in_memory().unwrap();

        initialize(&connection).unwrap();
        set_item("key", "value", &connection).unwrap();
        initialize(&connection).unwrap();

        assert_eq!(get_item("key", &connection), Ok(Some("value".to_owned())));
    }
}
