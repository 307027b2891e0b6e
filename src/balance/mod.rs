mod core;
mod endpoints;
mod page;

pub use core::{BalanceController, BalancePolicy};
pub use endpoints::{add_amount_endpoint, remove_all_amount_endpoint, remove_amount_endpoint};
pub use page::get_balance_page;

#[cfg(test)]
pub(crate) use core::test_store::RecordingStore;
