//! Defines the endpoints for adding to and removing from the amount due.
//!
//! Each endpoint responds with the re-rendered balance panel, or with an alert
//! if the amount could not be parsed or saved.

use axum::{
    Form,
    extract::State,
    response::{IntoResponse, Response},
};
use maud::html;
use serde::{Deserialize, Serialize};

use crate::{
    Error,
    alert::Alert,
    amount::AmountInput,
    balance::{
        BalanceController,
        page::{BalanceState, BalanceView, balance_panel_view},
    },
    html::format_currency,
};

/// The smallest amount that displays as at least one cent.
const HALF_CENT: f64 = 0.005;

/// The amount field submitted with the add and remove buttons.
#[derive(Debug, Default, Serialize, Deserialize)]
pub struct AmountForm {
    /// The text in the amount field. Missing or blank text is zero.
    #[serde(default)]
    pub amount: Option<String>,
}

/// A route handler for adding the submitted amount to the amount due.
///
/// Responds with the re-rendered balance panel, or an error alert if the
/// amount is invalid or could not be saved.
pub async fn add_amount_endpoint(
    State(state): State<BalanceState>,
    Form(form): Form<AmountForm>,
) -> Response {
    update_balance(&state, form.amount.as_deref(), BalanceController::add)
}

/// A route handler for removing the submitted amount from the amount due.
///
/// Responds the same way as [add_amount_endpoint].
pub async fn remove_amount_endpoint(
    State(state): State<BalanceState>,
    Form(form): Form<AmountForm>,
) -> Response {
    update_balance(&state, form.amount.as_deref(), BalanceController::remove)
}

/// A route handler for clearing the amount due.
///
/// A success alert listing the removed amount accompanies the panel when at
/// least one cent was removed.
pub async fn remove_all_amount_endpoint(State(state): State<BalanceState>) -> Response {
    let mut balance = match state.balance.lock() {
        Ok(balance) => balance,
        Err(error) => {
            tracing::error!("could not acquire balance lock: {error}");
            return Error::DatabaseLockError.into_alert_response();
        }
    };

    let removed = balance.amount_due();

    if let Err(error) = balance.remove_all() {
        tracing::error!("Could not remove the amount due: {error}");
        return error.into_alert_response();
    }

    let panel = balance_panel_view(BalanceView::from(&*balance));

    if removed >= HALF_CENT {
        let alert = Alert::Success {
            message: "Amount due cleared".to_owned(),
            details: format!("Removed {}.", format_currency(removed)),
        };

        html!((panel) (alert.into_html())).into_response()
    } else {
        panel.into_response()
    }
}

fn update_balance(
    state: &BalanceState,
    amount_text: Option<&str>,
    operation: fn(&mut BalanceController, f64) -> Result<(), Error>,
) -> Response {
    let amount = match AmountInput::parse(amount_text) {
        Ok(amount) => amount.value(),
        Err(error) => {
            tracing::debug!("rejected amount {amount_text:?}: {error}");
            return error.into_alert_response();
        }
    };

    let mut balance = match state.balance.lock() {
        Ok(balance) => balance,
        Err(error) => {
            tracing::error!("could not acquire balance lock: {error}");
            return Error::DatabaseLockError.into_alert_response();
        }
    };

    match operation(&mut *balance, amount) {
        Ok(()) => balance_panel_view(BalanceView::from(&*balance)).into_response(),
        Err(error) => {
            tracing::error!("Could not update the amount due by {amount}: {error}");
            error.into_alert_response()
        }
    }
}
