//! Errors for the account ledger.
//!
//! Two families share one enum:
//! - Operation failures (duplicate id, unknown account, insufficient funds or
//!   overflowing balance, bad numeric input). The shell reports these and
//!   keeps running.
//! - Storage failures (I/O, malformed backing file). These end the session.

use rust_decimal::Decimal;

use crate::listing::two_places;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("an account with id {0} already exists")]
    DuplicateId(String),

    #[error("account {0} not found")]
    AccountNotFound(String),

    #[error(
        "insufficient funds: balance is {}, requested {}",
        money(.balance),
        money(.requested)
    )]
    InsufficientFunds { balance: Decimal, requested: Decimal },

    /// Applying `amount` would take the balance outside the representable range.
    #[error("amount {} would overflow the balance of account {id}", money(.amount))]
    BalanceOverflow { id: String, amount: Decimal },

    #[error("invalid value {0:?}, expected a number")]
    InvalidNumericInput(String),

    /// A line of the backing file could not be parsed into an account.
    /// `line` is 1-based when the reader could determine it.
    #[error("malformed record{}: {reason}", on_line(.line))]
    MalformedRecord { line: Option<u64>, reason: String },

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Csv(#[from] csv::Error),
}

fn money(amount: &Decimal) -> String {
    two_places(*amount)
}

fn on_line(line: &Option<u64>) -> String {
    line.map(|l| format!(" on line {l}")).unwrap_or_default()
}

impl Error {
    /// Whether the interactive shell can report this error and carry on.
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            Error::DuplicateId(_)
                | Error::AccountNotFound(_)
                | Error::InsufficientFunds { .. }
                | Error::BalanceOverflow { .. }
                | Error::InvalidNumericInput(_)
        )
    }
}
