//! Opening and initializing the application's SQLite database.

use rusqlite::{Connection, Transaction as SqlTransaction};

use crate::{Error, expense::create_expense_table};

/// Open the SQLite database at `database_url`.
///
/// `database_url` is a file path, optionally prefixed with `sqlite://` or
/// `sqlite:`. The special path `:memory:` opens an in-memory database.
///
/// # Errors
/// Returns an [Error::SqlError] if the database cannot be opened.
pub fn open(database_url: &str) -> Result<Connection, Error> {
    let path = database_url
        .strip_prefix("sqlite://")
        .or_else(|| database_url.strip_prefix("sqlite:"))
        .unwrap_or(database_url);

    tracing::debug!("Opening SQLite database at {path:?}");

    Connection::open(path).map_err(|error| error.into())
}

/// Create the tables for the domain models if they do not exist.
///
/// # Errors
/// Returns an [Error::SqlError] if a table cannot be created.
pub fn initialize(connection: &Connection) -> Result<(), Error> {
    let transaction =
        SqlTransaction::new_unchecked(connection, rusqlite::TransactionBehavior::Exclusive)?;

    create_expense_table(&transaction)?;

    transaction.commit()?;

    Ok(())
}

#[cfg(test)]
mod db_tests {
    use crate::expense::get_all_expenses;

    use super::{initialize, open};

    #[test]
    fn open_in_memory_with_prefix() {
        let connection = open("sqlite://:memory:").expect("Could not open database");

        assert_eq!(Ok(()), initialize(&connection));
        assert_eq!(get_all_expenses(&connection), Ok(Vec::new()));
    }

    #[test]
    fn initialize_is_idempotent() {
        let connection = open(":memory:").unwrap();

        initialize(&connection).unwrap();

        assert_eq!(Ok(()), initialize(&connection));
    }
}
