use rusqlite::Connection;

use crate::expense::{Expense, ExpenseId, create_expense_table};

pub(crate) fn get_test_connection() -> Connection {
    let connection =
        Connection::open_in_memory().expect("Could not initialise in-memory SQLite database");
    create_expense_table(&connection).expect("Could not create expenses table");

    connection
}

/// Insert an expense with a fixed `id`, bypassing the application code.
pub(crate) fn insert_test_expense(
    connection: &Connection,
    id: ExpenseId,
    amount: f64,
    title: &str,
    note: &str,
    tags: &[&str],
) -> Expense {
    let tags: Vec<String> = tags.iter().map(|tag| tag.to_string()).collect();

    connection
        .execute(
            "INSERT INTO expenses (id, amount, title, note, tags) VALUES (?1, ?2, ?3, ?4, ?5)",
            (
                id,
                amount,
                title,
                note,
                serde_json::to_string(&tags).expect("Could not encode test tags"),
            ),
        )
        .expect("Could not insert test expense");

    Expense {
        id,
        amount,
        title: title.to_owned(),
        note: note.to_owned(),
        tags,
    }
}
