//! Displays the amount due and the controls for changing it.

use std::sync::{Arc, Mutex};

use axum::{
    extract::{FromRef, State},
    response::{IntoResponse, Response},
};
use maud::{Markup, html};

use crate::{
    AppState, Error,
    amount::AMOUNT_INPUT_PATTERN,
    balance::{BalanceController, BalancePolicy},
    endpoints,
    html::{
        BUTTON_PRIMARY_STYLE, BUTTON_SECONDARY_STYLE, FORM_CONTAINER_STYLE, FORM_LABEL_STYLE,
        FORM_TEXT_INPUT_STYLE, PAGE_CONTAINER_STYLE, base, dollar_input_styles, format_currency,
    },
};

/// The state needed to display and change the amount due.
#[derive(Debug, Clone)]
pub struct BalanceState {
    pub balance: Arc<Mutex<BalanceController>>,
}

impl FromRef<AppState> for BalanceState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            balance: state.balance.clone(),
        }
    }
}

/// The values needed to render the balance panel.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(super) struct BalanceView {
    pub(super) amount_due: f64,
    pub(super) can_remove: bool,
    pub(super) policy: BalancePolicy,
}

impl From<&BalanceController> for BalanceView {
    fn from(controller: &BalanceController) -> Self {
        Self {
            amount_due: controller.amount_due(),
            can_remove: controller.can_remove(),
            policy: controller.policy(),
        }
    }
}

pub(super) const BALANCE_PANEL_ID: &str = "balance-panel";
const AMOUNT_FORM_ID: &str = "amount-form";

/// The amount due and the buttons that change it.
///
/// The remove buttons are disabled when there is nothing left to remove.
pub(super) fn balance_panel_view(balance: BalanceView) -> Markup {
    let include_form = format!("#{AMOUNT_FORM_ID}");
    let target = format!("#{BALANCE_PANEL_ID}");

    html!(
        div id=(BALANCE_PANEL_ID) class="w-full space-y-4"
        {
            div class="text-center"
            {
                p class="text-sm text-gray-500 dark:text-gray-400" { "Sadaqa due" }
                p id="amount-due" class="text-4xl font-bold tabular-nums"
                {
                    (format_currency(balance.amount_due))
                }

                @if balance.policy == BalancePolicy::Unbounded {
                    p class="text-xs text-gray-500 dark:text-gray-400"
                    {
                        "Removing more than is due will leave a negative balance."
                    }
                }
            }

            div class="grid grid-cols-3 gap-2"
            {
                button
                    type="button"
                    id="add-amount"
                    hx-post=(endpoints::ADD_AMOUNT)
                    hx-include=(include_form)
                    hx-target=(target)
                    hx-swap="outerHTML"
                    class=(BUTTON_PRIMARY_STYLE)
                {
                    "Add"
                }

                button
                    type="button"
                    id="remove-amount"
                    hx-post=(endpoints::REMOVE_AMOUNT)
                    hx-include=(include_form)
                    hx-target=(target)
                    hx-swap="outerHTML"
                    disabled[!balance.can_remove]
                    class=(BUTTON_SECONDARY_STYLE)
                {
                    "Remove"
                }

                button
                    type="button"
                    id="remove-all-amount"
                    hx-post=(endpoints::REMOVE_ALL_AMOUNT)
                    hx-target=(target)
                    hx-swap="outerHTML"
                    hx-confirm="Remove the entire amount due?"
                    disabled[!balance.can_remove]
                    class=(BUTTON_SECONDARY_STYLE)
                {
                    "Remove all"
                }
            }
        }
    )
}

fn balance_page_view(balance: BalanceView) -> Markup {
    let content = html!(
        main class=(PAGE_CONTAINER_STYLE)
        {
            section class=(FORM_CONTAINER_STYLE)
            {
                h1 class="text-xl font-bold mb-6" { "Sadaqa Reminder" }

                form id=(AMOUNT_FORM_ID) class="w-full mb-4" onsubmit="return false"
                {
                    label for="amount" class=(FORM_LABEL_STYLE) { "Amount" }

                    div class="input-wrapper"
                    {
                        input
                            type="text"
                            inputmode="decimal"
                            name="amount"
                            id="amount"
                            placeholder="0.00"
                            autocomplete="off"
                            pattern=(AMOUNT_INPUT_PATTERN)
                            class=(FORM_TEXT_INPUT_STYLE);
                    }
                }

                (balance_panel_view(balance))
            }
        }
    );

    base("Sadaqa", &[dollar_input_styles()], &content)
}

/// Renders the page showing the amount due.
pub async fn get_balance_page(State(state): State<BalanceState>) -> Result<Response, Error> {
    let balance = state
        .balance
        .lock()
        .inspect_err(|error| tracing::error!("could not acquire balance lock: {error}"))
        .map_err(|_| Error::DatabaseLockError)?;

    Ok(balance_page_view(BalanceView::from(&*balance)).into_response())
}
