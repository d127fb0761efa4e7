//! Application router configuration.

use axum::{Router, middleware, routing::get};

use crate::{
    AppState,
    auth::auth_guard,
    endpoints,
    expense::{
        ExpenseService, create_expense_endpoint, get_expense_endpoint, list_expenses_endpoint,
        update_expense_endpoint,
    },
};

/// Return a router with all the app's routes.
///
/// Every route is behind the [auth guard](crate::auth::auth_guard).
pub fn build_router<S: ExpenseService>(state: AppState<S>) -> Router {
    Router::new()
        .route(
            endpoints::EXPENSES,
            get(list_expenses_endpoint::<S>).post(create_expense_endpoint::<S>),
        )
        .route(
            endpoints::EXPENSE,
            get(get_expense_endpoint::<S>).put(update_expense_endpoint::<S>),
        )
        .route_layer(middleware::from_fn(auth_guard))
        .with_state(state)
}
