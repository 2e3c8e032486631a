//! CSV serialization and deserialization utilities.
//!
//! The ledger file carries no header row, so both directions work
//! positionally: field order follows the struct's field order.

use serde::de::DeserializeOwned;
use serde::Serialize;
use std::io::{Read, Write};

/// Creates an iterator that reads header-less CSV records from a reader.
/// Each record is deserialized into type T. Fields are trimmed and blank
/// lines skipped.
pub fn read_csv<T, R>(reader: R) -> impl Iterator<Item = csv::Result<T>>
where
    T: DeserializeOwned,
    R: Read,
{
    csv::ReaderBuilder::new()
        .has_headers(false)
        .trim(csv::Trim::All)
        .from_reader(reader)
        .into_deserialize()
}

/// Writes an iterator of records to a CSV writer, without a header row.
/// Each record must implement Serialize.
pub fn write_csv<T, W>(writer: W, records: impl Iterator<Item = T>) -> csv::Result<()>
where
    T: Serialize,
    W: Write,
{
    let mut wtr = csv::WriterBuilder::new()
        .has_headers(false)
        .from_writer(writer);
    for record in records {
        wtr.serialize(record)?;
    }
    wtr.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Account;
    use rust_decimal_macros::dec;

    #[test]
    fn test_read_csv() -> csv::Result<()> {
        let input = "Ana,111,200.0\n\n  Bob , 222 , 15.5  \n";
        let accounts: Vec<Account> = read_csv(input.as_bytes()).collect::<Result<_, _>>()?;

        assert_eq!(
            accounts,
            vec![
                Account::new("Ana", "111", dec!(200.0)),
                Account::new("Bob", "222", dec!(15.5)),
            ]
        );
        Ok(())
    }

    #[test]
    fn test_write_csv_has_no_header() -> Result<(), Box<dyn std::error::Error>> {
        let mut output = Vec::new();
        let accounts = vec![
            Account::new("Ana", "111", dec!(200.0)),
            Account::new("Silva, Jr.", "333", dec!(0)),
        ];
        write_csv(&mut output, accounts.iter())?;

        assert_eq!(
            String::from_utf8(output)?,
            "Ana,111,200.0\n\"Silva, Jr.\",333,0\n"
        );
        Ok(())
    }
}
