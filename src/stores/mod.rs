//! Storage layer for the ledger.
//!
//! [`AccountsStore`] keeps every account in one flat text file and always
//! reads or rewrites it whole.

mod accounts;

pub use accounts::AccountsStore;
