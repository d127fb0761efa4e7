//! Database operations for expenses.
//!
//! Every read selects the columns `id, amount, title, note, tags` in that
//! order and [map_row] relies on it.

use rusqlite::{Connection, Row, types::Type};

use crate::{
    Error,
    expense::{Expense, ExpenseData, ExpenseId},
};

/// Insert a new expense and return it with its generated ID.
///
/// # Errors
/// Returns an [Error::SqlError] if the insert fails.
pub fn create_expense(data: &ExpenseData, connection: &Connection) -> Result<Expense, Error> {
    let tags = encode_tags(&data.tags)?;

    connection
        .prepare(
            "INSERT INTO expenses (amount, title, note, tags) VALUES (?1, ?2, ?3, ?4)
            RETURNING id, amount, title, note, tags;",
        )?
        .query_row((data.amount, &data.title, &data.note, tags), map_row)
        .map_err(|error| error.into())
}

/// Retrieve a single expense by ID.
///
/// # Errors
/// Returns an [Error::NotFound] if no expense has the ID `expense_id`, or
/// an [Error::SqlError] for any other SQL error.
pub fn get_expense(expense_id: ExpenseId, connection: &Connection) -> Result<Expense, Error> {
    connection
        .prepare("SELECT id, amount, title, note, tags FROM expenses WHERE id = :id LIMIT 1;")?
        .query_row(&[(":id", &expense_id)], map_row)
        .map_err(|error| error.into())
}

/// Retrieve all expenses, newest (highest ID) first.
///
/// An empty table gives an empty list.
pub fn get_all_expenses(connection: &Connection) -> Result<Vec<Expense>, Error> {
    connection
        .prepare("SELECT id, amount, title, note, tags FROM expenses ORDER BY id DESC;")?
        .query_map([], map_row)?
        .map(|maybe_expense| maybe_expense.map_err(|error| error.into()))
        .collect()
}

/// Overwrite the amount, title, note and tags of the expense with `expense.id`.
///
/// This does not check that the expense exists, updating a missing ID changes nothing.
pub fn update_expense(expense: &Expense, connection: &Connection) -> Result<(), Error> {
    let tags = encode_tags(&expense.tags)?;

    connection.execute(
        "UPDATE expenses SET amount = ?1, title = ?2, note = ?3, tags = ?4 WHERE id = ?5",
        (expense.amount, &expense.title, &expense.note, tags, expense.id),
    )?;

    Ok(())
}

/// Initialize the expenses table.
///
/// Tags are stored as a JSON array of strings since SQLite has no array type.
pub fn create_expense_table(connection: &Connection) -> Result<(), rusqlite::Error> {
    connection.execute(
        "CREATE TABLE IF NOT EXISTS expenses (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            amount REAL,
            title TEXT,
            note TEXT,
            tags TEXT
        )",
        (),
    )?;

    Ok(())
}

fn encode_tags(tags: &[String]) -> Result<String, Error> {
    serde_json::to_string(tags).map_err(|error| Error::TagsEncoding(error.to_string()))
}

fn map_row(row: &Row) -> Result<Expense, rusqlite::Error> {
    let id = row.get(0)?;
    let amount = row.get(1)?;
    let title = row.get(2)?;
    let note = row.get(3)?;

    let raw_tags: Option<String> = row.get(4)?;
    let tags = match raw_tags {
        Some(raw_tags) => serde_json::from_str(&raw_tags).map_err(|error| {
            rusqlite::Error::FromSqlConversionFailure(4, Type::Text, Box::new(error))
        })?,
        None => Vec::new(),
    };

    Ok(Expense {
        id,
        amount,
        title,
        note,
        tags,
    })
}
