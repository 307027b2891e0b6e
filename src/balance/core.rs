use crate::{Error, preferences::AmountStore};

/// How removals that exceed the amount due are handled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BalancePolicy {
    /// The amount due never drops below zero.
    ///
    /// Removing at least the amount due sets it to zero.
    #[default]
    Clamped,
    /// Removals are always subtracted, so the amount due may become negative.
    Unbounded,
}

impl BalancePolicy {
    /// Bring `amount` within the range this policy allows.
    fn limit(self, amount: f64) -> f64 {
        match self {
            BalancePolicy::Clamped => amount.max(0.0),
            BalancePolicy::Unbounded => amount,
        }
    }
}

/// Owns the amount of sadaqa due and saves it after every change.
pub struct BalanceController {
    amount_due: f64,
    policy: BalancePolicy,
    store: Box<dyn AmountStore>,
}

impl std::fmt::Debug for BalanceController {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BalanceController")
            .field("amount_due", &self.amount_due)
            .field("policy", &self.policy)
            .finish_non_exhaustive()
    }
}

impl BalanceController {
    /// Create a controller, starting from the amount saved in `store` or zero.
    ///
    /// Under [BalancePolicy::Clamped], a negative saved amount starts at zero.
    ///
    /// # Errors
    /// Returns an error if `store` fails to load the saved amount.
    pub fn new(store: impl AmountStore + 'static, policy: BalancePolicy) -> Result<Self, Error> {
        let amount_due = policy.limit(store.load()?.unwrap_or(0.0));
        tracing::debug!("loaded amount due {amount_due} with policy {policy:?}");

        Ok(Self {
            amount_due,
            policy,
            store: Box::new(store),
        })
    }

    /// The amount of sadaqa currently due.
    pub fn amount_due(&self) -> f64 {
        self.amount_due
    }

    /// The policy used for removals.
    pub fn policy(&self) -> BalancePolicy {
        self.policy
    }

    /// Whether there is anything left to remove.
    pub fn can_remove(&self) -> bool {
        self.amount_due > 0.0
    }

    /// Add `amount` to the amount due.
    ///
    /// Adding zero does nothing and does not touch the store. Under
    /// [BalancePolicy::Clamped], adding a negative amount never takes the
    /// amount due below zero.
    ///
    /// # Errors
    /// Returns an error if the new amount could not be saved, in which case
    /// the amount due is left unchanged.
    pub fn add(&mut self, amount: f64) -> Result<(), Error> {
        if amount == 0.0 {
            return Ok(());
        }

        self.update(self.policy.limit(self.amount_due + amount))
    }

    /// Remove `amount` from the amount due.
    ///
    /// Removing zero does nothing and does not touch the store. Under
    /// [BalancePolicy::Clamped], removing at least the amount due sets it to
    /// exactly zero.
    ///
    /// # Errors
    /// Returns an error if the new amount could not be saved, in which case
    /// the amount due is left unchanged.
    pub fn remove(&mut self, amount: f64) -> Result<(), Error> {
        if amount == 0.0 {
            return Ok(());
        }

        let new_amount = match self.policy {
            BalancePolicy::Clamped if amount >= self.amount_due => 0.0,
            policy => policy.limit(self.amount_due - amount),
        };

        self.update(new_amount)
    }

    /// Remove the entire amount due.
    ///
    /// # Errors
    /// Returns an error if the new amount could not be saved.
    pub fn remove_all(&mut self) -> Result<(), Error> {
        self.remove(self.amount_due)
    }

    fn update(&mut self, new_amount: f64) -> Result<(), Error> {
        self.store
            .store(new_amount)
            .inspect_err(|error| tracing::error!("could not save amount due {new_amount}: {error}"))?;

        tracing::debug!("amount due changed from {} to {new_amount}", self.amount_due);
        self.amount_due = new_amount;

        Ok(())
    }
}
