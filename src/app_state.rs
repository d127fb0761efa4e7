//! Implements a struct that holds the state of the REST server.

use std::sync::{Arc, Mutex};

use rusqlite::Connection;

use crate::{
    Error,
    db::initialize,
    expense::{ExpenseService, SQLiteExpenseService},
};

/// The state of the REST server.
#[derive(Debug, Clone)]
pub struct AppState<S>
where
    S: ExpenseService,
{
    /// The service the route handlers use to manage expenses.
    pub expense_service: S,
}

impl AppState<SQLiteExpenseService> {
    /// Create a new [AppState] with a SQLite database connection.
    ///
    /// This function will initialize the database by adding the expenses table.
    ///
    /// # Errors
    /// Returns an error if the database cannot be initialized.
    pub fn new(db_connection: Connection) -> Result<Self, Error> {
        initialize(&db_connection)?;

        let connection = Arc::new(Mutex::new(db_connection));

        Ok(Self {
            expense_service: SQLiteExpenseService::new(connection),
        })
    }
}
