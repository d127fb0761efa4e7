//! The API endpoints URIs.
//!
//! For endpoints that take a parameter, e.g., '/expenses/{expense_id}', use [format_endpoint].

use std::fmt::Display;

/// The route to list and create expenses.
pub const EXPENSES: &str = "/expenses";
/// The route to get and update a single expense.
pub const EXPENSE: &str = "/expenses/{expense_id}";

/// Replace the parameter in `endpoint_path` with `param`.
///
/// A parameter is the text from a left brace up to and including the
/// following right brace, e.g. '{expense_id}' in '/expenses/{expense_id}'.
/// Only the first parameter is replaced.
///
/// If no parameter is found in `endpoint_path`, the function returns the
/// original `endpoint_path`.
pub fn format_endpoint(endpoint_path: &str, param: impl Display) -> String {
    let Some(param_start) = endpoint_path.find('{') else {
        return endpoint_path.to_owned();
    };

    let param_end = endpoint_path[param_start..]
        .find('}')
        .map(|end| param_start + end + 1)
        .unwrap_or(endpoint_path.len());

    format!(
        "{}{}{}",
        &endpoint_path[..param_start],
        param,
        &endpoint_path[param_end..]
    )
}
