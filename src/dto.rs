use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::Error;

/// One line of the backing file: `name,id,balance`.
///
/// Balance goes through its string form in both directions so the value
/// written is exactly the value read back.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Account {
    pub name: String,
    pub id: String,
    #[serde(with = "rust_decimal::serde::str")]
    pub balance: Decimal,
}

impl Account {
    pub fn new(name: impl Into<String>, id: impl Into<String>, balance: Decimal) -> Self {
        Self {
            name: name.into(),
            id: id.into(),
            balance,
        }
    }
}

/// Parses an operator-typed amount. Accepts plain decimals and scientific
/// notation; anything else is [`Error::InvalidNumericInput`].
pub fn parse_amount(input: &str) -> Result<Decimal, Error> {
    let trimmed = input.trim();
    Decimal::from_str(trimmed)
        .or_else(|_| Decimal::from_scientific(trimmed))
        .map_err(|_| Error::InvalidNumericInput(trimmed.to_string()))
}
