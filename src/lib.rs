mod csv_utils;
mod dto;
mod engine;
mod error;
pub mod listing;
pub mod shell;
pub mod stores;
#[cfg(test)]
mod test_utils;

pub use dto::{parse_amount, Account};
pub use engine::Ledger;
pub use error::Error;
pub use listing::Listing;
pub use shell::{Shell, ShellOptions};
pub use stores::AccountsStore;
