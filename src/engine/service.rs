use std::sync::Arc;

use tracing::{debug, warn};

use super::error::EngineError;
use crate::aggregate::{Aggregator, Progress, ProgressStream};
use crate::domain::{
    Account, DomainError, Favorite, Money, Payment, PaymentCategory, PaymentStatus, Phone,
    apply_deposit, apply_payment, apply_refund,
};
use crate::storage::{
    AccountEntry, AccountStore, ConcurrentAccountStore, FavoriteStore, PaymentStore, RecordStore,
    Snapshot, StorageError,
};

/// The wallet ledger: accounts, payments and favorites behind one handle
///
/// Every operation takes `&self`; the stores synchronise internally, so a
/// service can be shared across threads behind an `Arc`.
pub struct WalletService<A = ConcurrentAccountStore, P = PaymentStore, F = FavoriteStore>
where
    A: AccountStore + Snapshot<Item = Account>,
    P: RecordStore<Payment> + Snapshot<Item = Payment>,
    F: RecordStore<Favorite> + Snapshot<Item = Favorite>,
{
    accounts: A,
    payments: P,
    favorites: F,
    aggregator: Aggregator,
}

impl WalletService {
    /// Create an empty ledger backed by the concurrent in-memory stores
    pub fn new() -> Self {
        Self::with_stores(
            ConcurrentAccountStore::new(),
            PaymentStore::new(),
            FavoriteStore::new(),
        )
    }
}

impl Default for WalletService {
    fn default() -> Self {
        Self::new()
    }
}

impl<A, P, F> WalletService<A, P, F>
where
    A: AccountStore + Snapshot<Item = Account>,
    P: RecordStore<Payment> + Snapshot<Item = Payment>,
    F: RecordStore<Favorite> + Snapshot<Item = Favorite>,
{
    /// Create a ledger over caller-supplied stores
    pub fn with_stores(accounts: A, payments: P, favorites: F) -> Self {
        Self {
            accounts,
            payments,
            favorites,
            aggregator: Aggregator::new(),
        }
    }

    /// Replace the aggregator used by the payment sums
    pub fn with_aggregator(mut self, aggregator: Aggregator) -> Self {
        self.aggregator = aggregator;
        self
    }

    pub fn aggregator(&self) -> &Aggregator {
        &self.aggregator
    }

    pub fn account_store(&self) -> &A {
        &self.accounts
    }

    pub fn payment_store(&self) -> &P {
        &self.payments
    }

    pub fn favorite_store(&self) -> &F {
        &self.favorites
    }

    /// Register a new account with zero balance
    pub fn register_account(&self, phone: Phone) -> Result<Account, EngineError> {
        let account = self.accounts.register(phone)?;
        debug!(account_id = account.id(), phone = %account.phone(), "Registered account");
        Ok(account)
    }

    /// Add funds to an account
    pub fn deposit(&self, account_id: i64, amount: Money) -> Result<(), EngineError> {
        if !amount.is_positive() {
            return Err(DomainError::InvalidAmount.into());
        }

        debug!(account_id, %amount, "Processing deposit");
        let mut entry = self.accounts.entry(account_id)?;
        entry.try_update(|account| apply_deposit(account, amount))?;
        Ok(())
    }

    /// Debit an account and record an in-progress payment
    pub fn pay(
        &self,
        account_id: i64,
        amount: Money,
        category: PaymentCategory,
    ) -> Result<Payment, EngineError> {
        if !amount.is_positive() {
            return Err(DomainError::InvalidAmount.into());
        }

        debug!(account_id, %amount, %category, "Processing payment");
        let mut entry = self.accounts.entry(account_id)?;
        entry.try_update(|account| apply_payment(account, amount))?;

        let payment = Payment::new(account_id, amount, category);
        self.payments.insert(payment.clone());
        Ok(payment)
    }

    pub fn find_account_by_id(&self, account_id: i64) -> Result<Account, EngineError> {
        self.accounts
            .get(account_id)
            .ok_or(EngineError::AccountNotFound(account_id))
    }

    pub fn find_payment_by_id(&self, payment_id: &str) -> Result<Payment, EngineError> {
        self.payments
            .get(payment_id)
            .ok_or_else(|| EngineError::PaymentNotFound(payment_id.to_string()))
    }

    pub fn find_favorite_by_id(&self, favorite_id: &str) -> Result<Favorite, EngineError> {
        self.favorites
            .get(favorite_id)
            .ok_or_else(|| EngineError::FavoriteNotFound(favorite_id.to_string()))
    }

    /// Mark a payment failed and refund its amount
    ///
    /// Rejecting an already failed payment is a no-op, so a payment is never
    /// refunded twice. Earlier versions of the ledger refunded on every call;
    /// callers that relied on repeated refunds must deposit explicitly.
    pub fn reject(&self, payment_id: &str) -> Result<(), EngineError> {
        let payment = self.find_payment_by_id(payment_id)?;
        let mut entry = self.accounts.entry(payment.account_id)?;

        let mut previous = PaymentStatus::Fail;
        self.payments
            .try_update(payment_id, |p| {
                previous = p.status;
                p.status = PaymentStatus::Fail;
                Ok(())
            })
            .map_err(|err| payment_not_found(err, payment_id))?;

        if previous == PaymentStatus::Fail {
            debug!(payment_id, "Payment already rejected");
            return Ok(());
        }

        debug!(payment_id, account_id = payment.account_id, "Rejecting payment");
        if let Err(err) = entry.try_update(|account| apply_refund(account, payment.amount)) {
            warn!(payment_id, %err, "Refund failed, restoring payment status");
            self.payments
                .try_update(payment_id, |p| {
                    p.status = previous;
                    Ok(())
                })
                .map_err(|err| payment_not_found(err, payment_id))?;
            return Err(err.into());
        }

        Ok(())
    }

    /// Make a new payment with the same account, amount and category
    pub fn repeat(&self, payment_id: &str) -> Result<Payment, EngineError> {
        let original = self.find_payment_by_id(payment_id)?;
        let account = self.find_account_by_id(original.account_id)?;

        debug!(payment_id, account_id = account.id(), "Repeating payment");
        self.pay(account.id(), original.amount, original.category)
    }

    /// Save a payment as a named template
    pub fn favorite_payment(&self, payment_id: &str, name: &str) -> Result<Favorite, EngineError> {
        let payment = self.find_payment_by_id(payment_id)?;
        self.find_account_by_id(payment.account_id)?;

        let favorite = Favorite::from_payment(&payment, name);
        self.favorites.insert(favorite.clone());
        debug!(payment_id, favorite_id = %favorite.id, "Saved favorite");
        Ok(favorite)
    }

    /// Pay again from a saved template
    pub fn pay_from_favorite(&self, favorite_id: &str) -> Result<Payment, EngineError> {
        let favorite = self.find_favorite_by_id(favorite_id)?;
        let account = self.find_account_by_id(favorite.account_id)?;

        debug!(favorite_id, account_id = account.id(), "Paying from favorite");
        self.pay(account.id(), favorite.amount, favorite.category)
    }

    /// Accounts ordered by id
    pub fn accounts(&self) -> Vec<Account> {
        self.accounts.snapshot()
    }

    /// Payments in the order they were made or imported
    pub fn payments(&self) -> Vec<Payment> {
        self.payments.snapshot()
    }

    /// Favorites in the order they were saved or imported
    pub fn favorites(&self) -> Vec<Favorite> {
        self.favorites.snapshot()
    }

    /// Insert or overwrite an account read back from a dump
    pub fn restore_account(&self, account: Account) {
        self.accounts.restore(account);
    }

    /// Insert or overwrite a payment by id. Returns true if it was new.
    pub fn restore_payment(&self, payment: Payment) -> bool {
        self.payments.upsert(payment)
    }

    /// Insert or overwrite a favorite by id. Returns true if it was new.
    pub fn restore_favorite(&self, favorite: Favorite) -> bool {
        self.favorites.upsert(favorite)
    }

    /// Total of every payment made from one account
    pub fn sum_payments(&self, account_id: i64) -> Result<Money, EngineError> {
        let payments: Vec<Payment> = self
            .payments
            .snapshot()
            .into_iter()
            .filter(|p| p.account_id == account_id)
            .collect();

        debug!(account_id, payments = payments.len(), "Summing payments");
        Ok(self.aggregator.simple_sum(&payments)?)
    }

    /// Total of all payments, reporting each partition's partial sum to
    /// `sink` in completion order
    pub fn sum_payments_with_progress<S>(&self, sink: S) -> Result<Money, EngineError>
    where
        S: FnMut(Progress),
    {
        let payments = self.payments.snapshot();

        debug!(payments = payments.len(), "Summing payments with progress");
        Ok(self.aggregator.sum_with_progress(&payments, sink)?)
    }

    /// Async variant of [`Self::sum_payments_with_progress`] over a snapshot
    /// of all payment amounts. Must be called inside a tokio runtime.
    pub fn progress_stream(&self) -> ProgressStream {
        let amounts: Arc<[Money]> = self.payments.snapshot().iter().map(|p| p.amount).collect();
        self.aggregator.progress_stream(amounts)
    }
}

fn payment_not_found(err: StorageError, payment_id: &str) -> EngineError {
    match err {
        StorageError::RecordNotFound(_) => EngineError::PaymentNotFound(payment_id.to_string()),
        other => other.into(),
    }
}
