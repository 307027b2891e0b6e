//! Sadaqa Reminder keeps track of how much sadaqa you owe.
//!
//! This library provides a small web app that directly serves HTML pages: a
//! single page shows the amount due and lets you add to it, remove from it, or
//! clear it. The amount due is saved in a SQLite database between runs.

#![warn(missing_docs)]

use std::{net::SocketAddr, time::Duration};

use axum_server::Handle;
use tokio::signal;

mod alert;
mod amount;
mod app_state;
mod balance;
mod db;
mod endpoints;
mod error;
mod html;
mod internal_server_error;
mod logging;
mod not_found;
mod preferences;
mod routing;
#[cfg(test)]
mod test_utils;

pub use amount::{AmountInput, MAX_DIGITS_AFTER_DOT, MAX_DIGITS_BEFORE_DOT, parse_amount};
pub use app_state::AppState;
pub use balance::{BalanceController, BalancePolicy};
pub use db::initialize as initialize_db;
pub use error::Error;
pub use html::format_currency;
pub use logging::{LOG_BODY_LENGTH_LIMIT, logging_middleware};
pub use preferences::{AMOUNT_KEY, AmountStore, EphemeralStore, SqlitePreferences};
pub use routing::build_router;

/// An async task that waits for either the ctrl+c or terminate signal, whichever comes first, and
/// then signals the server to shut down gracefully.
///
/// `handle` is a handle to an Axum `Server`.
pub async fn graceful_shutdown(handle: Handle<SocketAddr>) {
    let ctrl_c = async {
        if let Err(error) = signal::ctrl_c().await {
            tracing::error!("failed to listen for Ctrl+C: {error}");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(error) => {
                tracing::error!("failed to install terminate signal handler: {error}");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::debug!("Received ctrl+c signal.");
            handle.graceful_shutdown(Some(Duration::from_secs(1)));
        },
        _ = terminate => {
            tracing::debug!("Received terminate signal.");
            handle.graceful_shutdown(Some(Duration::from_secs(1)));
        },
    }
}
