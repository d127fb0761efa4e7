//! Expenses: the record type, its storage and the routes that expose it.

mod db;
mod domain;
mod endpoints;
mod service;

pub use db::{create_expense, create_expense_table, get_all_expenses, get_expense, update_expense};
pub use domain::{Expense, ExpenseData, ExpenseId, ValidationError};
pub use endpoints::{
    create_expense_endpoint, get_expense_endpoint, list_expenses_endpoint,
    update_expense_endpoint,
};
pub use service::{ExpenseService, SQLiteExpenseService};
