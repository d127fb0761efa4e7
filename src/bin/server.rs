use std::{fs::OpenOptions, net::SocketAddr, path::PathBuf, process::exit, sync::Arc};

use axum::{
    Router,
    extract::{MatchedPath, Request},
    middleware,
};
use axum_server::Handle;
use clap::Parser;
use tower_http::trace::TraceLayer;
use tracing_subscriber::{EnvFilter, Layer, layer::SubscriberExt, util::SubscriberInitExt};

use expense_tracker::{
    AppState, SHUTDOWN_GRACE_PERIOD, build_router, graceful_shutdown, logging_middleware, open_db,
};

/// The REST API server for the expense tracker.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// The SQLite database to store expenses in, e.g. `sqlite://expenses.db`.
    #[arg(long, env = "DATABASE_URL")]
    database_url: String,

    /// The port to serve the API from.
    #[arg(short, long, env = "PORT", default_value_t = 3001)]
    port: u16,

    /// Also write debug logs to this file.
    #[arg(long)]
    log_path: Option<PathBuf>,
}

#[tokio::main]
async fn main() {
    let args = Args::parse();

    setup_logging(args.log_path.as_ref());

    let connection = match open_db(&args.database_url) {
        Ok(connection) => connection,
        Err(error) => {
            tracing::error!("Could not open database {}: {error}", args.database_url);
            exit(1);
        }
    };

    let state = match AppState::new(connection) {
        Ok(state) => state,
        Err(error) => {
            tracing::error!("Could not initialize database: {error}");
            exit(1);
        }
    };

    let router = add_tracing_layer(build_router(state))
        .layer(middleware::from_fn(logging_middleware));

    let handle = Handle::new();
    tokio::spawn(graceful_shutdown(handle.clone(), SHUTDOWN_GRACE_PERIOD));

    let addr = SocketAddr::from(([0, 0, 0, 0], args.port));
    tracing::info!("HTTP server listening on {}", addr);

    if let Err(error) = axum_server::bind(addr)
        .handle(handle)
        .serve(router.into_make_service())
        .await
    {
        tracing::error!("Server error: {error}");
        exit(1);
    }

    tracing::info!("Server stopped.");
}

fn setup_logging(log_path: Option<&PathBuf>) {
    let stdout_log = tracing_subscriber::fmt::layer()
        .pretty()
        .with_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()));

    let debug_log = log_path.and_then(|path| {
        match OpenOptions::new().create(true).append(true).open(path) {
            Ok(log_file) => Some(
                tracing_subscriber::fmt::layer()
                    .with_ansi(false)
                    .with_writer(Arc::new(log_file))
                    .with_filter(EnvFilter::new("debug")),
            ),
            Err(error) => {
                eprintln!("Could not open log file {path:?}: {error}");
                None
            }
        }
    });

    tracing_subscriber::registry()
        .with(stdout_log)
        .with(debug_log)
        .init();
}

fn add_tracing_layer(router: Router) -> Router {
    let tracing_layer = TraceLayer::new_for_http()
        .make_span_with(|req: &Request| {
            let method = req.method();
            let uri = req.uri();

            let matched_path = req
                .extensions()
                .get::<MatchedPath>()
                .map(|matched_path| matched_path.as_str());

            tracing::debug_span!("request", %method, %uri, matched_path)
        })
        // By default, `TraceLayer` will log 5xx responses but we're doing our specific
        // logging of errors so disable that
        .on_failure(());

    router.layer(tracing_layer)
}
