use std::{
    fs::OpenOptions,
    net::SocketAddr,
    path::{Path, PathBuf},
    process::exit,
    sync::{Arc, Mutex},
};

use axum::{
    Router,
    extract::{MatchedPath, Request},
    middleware,
};
use axum_server::Handle;
use clap::Parser;
use rusqlite::Connection;
use tower_http::trace::TraceLayer;

#[cfg(debug_assertions)]
use tower_livereload::LiveReloadLayer;

use tracing_subscriber::{EnvFilter, Layer, filter, layer::SubscriberExt, util::SubscriberInitExt};

use sadaqa_reminder::{
    AppState, BalancePolicy, EphemeralStore, SqlitePreferences, build_router, graceful_shutdown,
    initialize_db, logging_middleware,
};

/// The web server for Sadaqa Reminder.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// File path to the application SQLite database.
    ///
    /// If omitted, the amount due is only kept in memory and is lost when the
    /// server stops.
    #[arg(long)]
    db_path: Option<PathBuf>,

    /// Let the amount due go below zero when removing more than is due.
    #[arg(long)]
    allow_negative: bool,

    /// The port to serve the app from.
    #[arg(short, long, default_value_t = 3000)]
    port: u16,

    /// File path to write debug logs to.
    #[arg(long, default_value = "debug.log")]
    log_path: PathBuf,
}

#[tokio::main]
async fn main() {
    let args = Args::parse();

    setup_logging(&args.log_path);

    let policy = if args.allow_negative {
        BalancePolicy::Unbounded
    } else {
        BalancePolicy::Clamped
    };

    let state = match &args.db_path {
        Some(db_path) => create_persistent_state(db_path, policy),
        None => {
            tracing::warn!("No database path given, the amount due will not be saved.");
            AppState::new(EphemeralStore, policy)
        }
    };

    let state = state.unwrap_or_else(|error| {
        tracing::error!("Could not create app state: {error}");
        exit(1);
    });

    let handle = Handle::new();
    tokio::spawn(graceful_shutdown(handle.clone()));

    let router = add_tracing_layer(build_router(state))
        .layer(middleware::from_fn(logging_middleware));

    #[cfg(debug_assertions)]
    let router = router.layer(LiveReloadLayer::new());

    let addr = SocketAddr::from(([127, 0, 0, 1], args.port));
    tracing::info!("HTTP server listening on {}", addr);

    if let Err(error) = axum_server::bind(addr)
        .handle(handle)
        .serve(router.into_make_service())
        .await
    {
        tracing::error!("Server stopped with an error: {error}");
        exit(1);
    }
}

fn create_persistent_state(
    db_path: &Path,
    policy: BalancePolicy,
) -> Result<AppState, sadaqa_reminder::Error> {
    let connection = Connection::open(db_path)?;
    initialize_db(&connection)?;
    tracing::info!("Using database at {}", db_path.display());

    let store = SqlitePreferences::new(Arc::new(Mutex::new(connection)));

    AppState::new(store, policy)
}

fn setup_logging(log_path: &Path) {
    let stdout_log = tracing_subscriber::fmt::layer()
        .pretty()
        .with_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")));

    let log_file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(log_path)
        .unwrap_or_else(|error| {
            eprintln!("Could not open log file {}: {error}", log_path.display());
            exit(1);
        });

    let debug_log = tracing_subscriber::fmt::layer()
        .with_ansi(false)
        .with_writer(Arc::new(log_file))
        .with_filter(filter::LevelFilter::DEBUG);

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
