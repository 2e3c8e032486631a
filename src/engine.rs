use rust_decimal::Decimal;

use crate::listing::Listing;
use crate::stores::AccountsStore;
use crate::{Account, Error};

/// Account operations over an [`AccountsStore`].
///
/// Every operation loads the whole store, applies its change, and saves the
/// whole store back. Nothing is cached between calls.
pub struct Ledger {
    store: AccountsStore,
}

impl Ledger {
    pub fn new(store: AccountsStore) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &AccountsStore {
        &self.store
    }

    /// Opens a new account. Fails with [`Error::DuplicateId`] if `id` is
    /// taken, in which case the store is not written.
    pub fn create_account(
        &self,
        name: &str,
        id: &str,
        initial_balance: Decimal,
    ) -> Result<Account, Error> {
        let mut accounts = self.store.load()?;
        if accounts.iter().any(|account| account.id == id) {
            return Err(Error::DuplicateId(id.to_string()));
        }
        let account = Account::new(name, id, initial_balance);
        accounts.push(account.clone());
        self.store.save(&accounts)?;
        tracing::info!(id, %initial_balance, "account created");
        Ok(account)
    }

    /// Adds `amount` to the balance of account `id`.
    /// Negative amounts are accepted and act as corrections.
    pub fn deposit(&self, id: &str, amount: Decimal) -> Result<Account, Error> {
        if amount.is_sign_negative() && !amount.is_zero() {
            tracing::warn!(id, %amount, "negative deposit");
        }
        self.update(id, |account| {
            account.balance = account
                .balance
                .checked_add(amount)
                .ok_or_else(|| Error::BalanceOverflow {
                    id: id.to_string(),
                    amount,
                })?;
            Ok(())
        })
        .inspect(|account| tracing::info!(id, %amount, balance = %account.balance, "deposit"))
    }

    /// Takes `amount` from the balance of account `id`. Fails with
    /// [`Error::InsufficientFunds`] if the balance is lower than `amount`.
    pub fn withdraw(&self, id: &str, amount: Decimal) -> Result<Account, Error> {
        if amount.is_sign_negative() && !amount.is_zero() {
            tracing::warn!(id, %amount, "negative withdrawal");
        }
        self.update(id, |account| {
            if account.balance < amount {
                return Err(Error::InsufficientFunds {
                    balance: account.balance,
                    requested: amount,
                });
            }
            account.balance = account
                .balance
                .checked_sub(amount)
                .ok_or_else(|| Error::BalanceOverflow {
                    id: id.to_string(),
                    amount,
                })?;
            Ok(())
        })
        .inspect(|account| tracing::info!(id, %amount, balance = %account.balance, "withdrawal"))
    }

    pub fn find_account(&self, id: &str) -> Result<Option<Account>, Error> {
        Ok(self
            .store
            .load()?
            .into_iter()
            .find(|account| account.id == id))
    }

    pub fn listing(&self) -> Result<Listing, Error> {
        Ok(Listing::new(self.store.load()?))
    }

    /// Applies `change` to the first account matching `id` and saves.
    /// The store is left alone if `change` fails.
    fn update<F>(&self, id: &str, change: F) -> Result<Account, Error>
    where
        F: FnOnce(&mut Account) -> Result<(), Error>,
    {
        let mut accounts = self.store.load()?;
        let account = accounts
            .iter_mut()
            .find(|account| account.id == id)
            .ok_or_else(|| Error::AccountNotFound(id.to_string()))?;
        change(account)?;
        let updated = account.clone();
        self.store.save(&accounts)?;
        Ok(updated)
    }
}
