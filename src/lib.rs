//! An expense tracker REST API.
//!
//! Expenses have an amount, a title, a note and a list of tags. Clients can
//! create, update, fetch and list expenses as JSON over HTTP. Every request
//! must carry a date token in the `Authorization` header,
//! e.g. `January 02, 2006`.

#![warn(missing_docs)]

use std::{net::SocketAddr, time::Duration};

use axum_server::Handle;
use tokio::signal;

mod app_state;
mod auth;
mod db;
mod endpoints;
mod error;
mod expense;
mod logging;
mod routing;
#[cfg(test)]
mod test_utils;

pub use app_state::AppState;
pub use auth::{auth_guard, parse_token};
pub use db::{initialize as initialize_db, open as open_db};
pub use error::{Error, INTERNAL_SERVER_ERROR_MESSAGE};
pub use expense::{
    Expense, ExpenseData, ExpenseId, ExpenseService, SQLiteExpenseService, ValidationError,
    create_expense,
};
pub use logging::{LOG_BODY_LENGTH_LIMIT, MAX_REQUEST_BODY_SIZE, logging_middleware};
pub use routing::build_router;

/// How long in-flight requests get to finish once shutdown starts.
pub const SHUTDOWN_GRACE_PERIOD: Duration = Duration::from_secs(15);

/// An async task that waits for either the ctrl+c or terminate signal, whichever comes first, and
/// then signals the server to shut down gracefully.
///
/// `handle` is a handle to an Axum `Server`. Connections still open after
/// `grace_period` are closed.
pub async fn graceful_shutdown(handle: Handle<SocketAddr>, grace_period: Duration) {
    let ctrl_c = async {
        if let Err(error) = signal::ctrl_c().await {
            tracing::error!("Could not listen for Ctrl+C: {error}");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
            }
            Err(error) => {
                tracing::error!("Could not install terminate signal handler: {error}");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::info!("Received ctrl+c signal, shutting down.");
        },
        _ = terminate => {
            tracing::info!("Received terminate signal, shutting down.");
        },
    }

    handle.graceful_shutdown(Some(grace_period));
}
