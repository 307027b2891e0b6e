//! Implements a struct that holds the state of the server.

use std::sync::{Arc, Mutex};

use crate::{
    Error,
    balance::{BalanceController, BalancePolicy},
    preferences::AmountStore,
};

/// The state of the server.
#[derive(Debug, Clone)]
pub struct AppState {
    /// The amount of sadaqa due, shared by every request handler.
    pub balance: Arc<Mutex<BalanceController>>,
}

impl AppState {
    /// Create a new [AppState] that keeps the amount due in `store`.
    ///
    /// # Errors
    /// Returns an error if the saved amount cannot be loaded from `store`.
    pub fn new(store: impl AmountStore + 'static, policy: BalancePolicy) -> Result<Self, Error> {
        let controller = BalanceController::new(store, policy)?;

        Ok(Self {
            balance: Arc::new(Mutex::new(controller)),
        })
    }
}
