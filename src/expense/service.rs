//! The expense service used by the route handlers.
//!
//! The service wraps the database functions with the name of the failed
//! operation and turns an update of a missing expense into a not found error.

use std::{
    ffi::c_int,
    future::Future,
    sync::{
        Arc, Mutex,
        atomic::{AtomicBool, Ordering},
    },
};

use rusqlite::Connection;

use crate::{
    Error,
    expense::{
        Expense, ExpenseData, ExpenseId, create_expense, get_all_expenses, get_expense,
        update_expense,
    },
};

/// Creates, retrieves and updates expenses.
///
/// Errors are wrapped with [Error::Context], use [Error::is_not_found] to
/// check for missing expenses.
pub trait ExpenseService: Clone + Send + Sync + 'static {
    /// Create an expense from `data` and return it with its new ID.
    fn save(&self, data: ExpenseData) -> impl Future<Output = Result<Expense, Error>> + Send;

    /// Replace the amount, title, note and tags of the expense `id` with `data`.
    ///
    /// Returns the updated expense, or a not found error if there is no expense `id`.
    fn update(
        &self,
        id: ExpenseId,
        data: ExpenseData,
    ) -> impl Future<Output = Result<Expense, Error>> + Send;

    /// Get the expense `id`.
    fn get_by_id(&self, id: ExpenseId) -> impl Future<Output = Result<Expense, Error>> + Send;

    /// Get all expenses, newest first.
    fn list(&self) -> impl Future<Output = Result<Vec<Expense>, Error>> + Send;
}

/// How many SQLite virtual machine instructions run between cancellation checks.
const CANCELLATION_CHECK_PERIOD: c_int = 1_000;

/// An [ExpenseService] backed by a SQLite database.
#[derive(Debug, Clone)]
pub struct SQLiteExpenseService {
    connection: Arc<Mutex<Connection>>,
}

impl SQLiteExpenseService {
    /// Create a new expense service with a SQLite database.
    ///
    /// The database must already have the expenses table, see [crate::initialize_db].
    pub fn new(connection: Arc<Mutex<Connection>>) -> Self {
        Self { connection }
    }

    /// Run `operation` with the database connection on the blocking thread pool.
    ///
    /// If the returned future is dropped before it completes, e.g. because
    /// the client disconnected, the running SQL statement is interrupted and
    /// an operation that has not started yet is skipped.
    async fn run<T, F>(&self, operation: F) -> Result<T, Error>
    where
        T: Send + 'static,
        F: FnOnce(&Connection) -> Result<T, Error> + Send + 'static,
    {
        let connection = self.connection.clone();
        let cancel_on_drop = CancelOnDrop::default();
        let cancelled = cancel_on_drop.flag.clone();

        let task = tokio::task::spawn_blocking(move || {
            run_cancellable(&connection, &cancelled, operation)
        });

        let result = task
            .await
            .map_err(|error| Error::TaskFailed(error.to_string()))?;
        cancel_on_drop.disarm();

        result
    }
}

/// Lock `connection` and run `operation` unless `cancelled` is raised.
///
/// Raising `cancelled` while `operation` runs interrupts its current SQL
/// statement, which then fails with [Error::Cancelled].
fn run_cancellable<T, F>(
    connection: &Mutex<Connection>,
    cancelled: &Arc<AtomicBool>,
    operation: F,
) -> Result<T, Error>
where
    F: FnOnce(&Connection) -> Result<T, Error>,
{
    let connection = connection
        .lock()
        .inspect_err(|error| tracing::error!("could not acquire database lock: {error}"))
        .map_err(|_| Error::DatabaseLockError)?;

    if cancelled.load(Ordering::Relaxed) {
        return Err(Error::Cancelled);
    }

    let flag = cancelled.clone();
    connection.progress_handler(
        CANCELLATION_CHECK_PERIOD,
        Some(move || flag.load(Ordering::Relaxed)),
    );
    let result = operation(&connection);
    connection.progress_handler(0, None::<fn() -> bool>);

    result
}

impl ExpenseService for SQLiteExpenseService {
    async fn save(&self, data: ExpenseData) -> Result<Expense, Error> {
        self.run(move |connection| create_expense(&data, connection))
            .await
            .map_err(|error| error.context("create_expense()"))
    }

    async fn update(&self, id: ExpenseId, data: ExpenseData) -> Result<Expense, Error> {
        self.run(move |connection| {
            let mut expense = get_expense(id, connection)
                .map_err(|error| error.context(format!("get_expense({id})")))?;

            expense.amount = data.amount;
            expense.title = data.title;
            expense.note = data.note;
            expense.tags = data.tags;

            update_expense(&expense, connection)
                .map_err(|error| error.context("update_expense()"))?;

            Ok(expense)
        })
        .await
    }

    async fn get_by_id(&self, id: ExpenseId) -> Result<Expense, Error> {
        self.run(move |connection| get_expense(id, connection))
            .await
            .map_err(|error| error.context(format!("get_expense({id})")))
    }

    async fn list(&self) -> Result<Vec<Expense>, Error> {
        self.run(get_all_expenses)
            .await
            .map_err(|error| error.context("get_all_expenses()"))
    }
}

/// Raises the cancellation flag when dropped unless disarmed first.
#[derive(Debug, Default)]
struct CancelOnDrop {
    flag: Arc<AtomicBool>,
    disarmed: bool,
}

impl CancelOnDrop {
    fn disarm(mut self) {
        self.disarmed = true;
    }
}

impl Drop for CancelOnDrop {
    fn drop(&mut self) {
        if !self.disarmed {
            tracing::debug!("Request dropped, cancelling database operation.");
            self.flag.store(true, Ordering::Relaxed);
        }
    }
}
