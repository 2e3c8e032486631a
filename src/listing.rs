//! Human-readable dump of the ledger.

use rust_decimal::RoundingStrategy;
use std::fmt;

use crate::Account;

pub const NO_ACCOUNTS: &str = "No accounts found.";
const HEADING: &str = "--- Registered accounts ---";

/// Snapshot of all accounts, rendered one line per account.
#[derive(Debug)]
pub struct Listing {
    accounts: Vec<Account>,
}

impl Listing {
    pub fn new(accounts: Vec<Account>) -> Self {
        Self { accounts }
    }

    pub fn is_empty(&self) -> bool {
        self.accounts.is_empty()
    }

    pub fn lines(&self) -> impl Iterator<Item = String> + '_ {
        self.accounts.iter().map(account_line)
    }
}

impl fmt::Display for Listing {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_empty() {
            return writeln!(f, "{NO_ACCOUNTS}");
        }
        writeln!(f, "{HEADING}")?;
        for line in self.lines() {
            writeln!(f, "{line}")?;
        }
        Ok(())
    }
}

/// `Holder: <name> | ID: <id> | Balance: <balance to 2dp>`
pub fn account_line(account: &Account) -> String {
    format!(
        "Holder: {} | ID: {} | Balance: {}",
        account.name,
        account.id,
        two_places(account.balance)
    )
}

pub fn two_places(amount: rust_decimal::Decimal) -> String {
    let mut rounded = amount.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
    rounded.rescale(2);
    rounded.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_empty_listing() {
        let listing = Listing::new(Vec::new());
        assert!(listing.is_empty());
        assert_eq!(listing.to_string(), "No accounts found.\n");
    }

    #[test]
    fn test_single_account_line() {
        let listing = Listing::new(vec![Account::new("Ana", "111", dec!(200.0))]);
        let lines: Vec<_> = listing.lines().collect();

        assert_eq!(lines.len(), 1);
        assert!(lines[0].contains("Ana"));
        assert!(lines[0].contains("111"));
        assert!(lines[0].contains("200.00"));
    }

    #[test]
    fn test_listing_keeps_store_order() {
        let listing = Listing::new(vec![
            Account::new("Bob", "222", dec!(1)),
            Account::new("Ana", "111", dec!(2)),
        ]);

        assert_eq!(
            listing.to_string(),
            "--- Registered accounts ---\n\
             Holder: Bob | ID: 222 | Balance: 1.00\n\
             Holder: Ana | ID: 111 | Balance: 2.00\n"
        );
    }

    #[test]
    fn test_two_places() {
        assert_eq!(two_places(dec!(0)), "0.00");
        assert_eq!(two_places(dec!(12.5)), "12.50");
        assert_eq!(two_places(dec!(1.005)), "1.01");
        assert_eq!(two_places(dec!(-3.14159)), "-3.14");
    }
}
