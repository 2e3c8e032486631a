use std::fs::{self, File};
use std::io::{self, BufReader, BufWriter};
use std::path::{Path, PathBuf};

use crate::csv_utils::{read_csv, write_csv};
use crate::{Account, Error};

/// File-backed store holding every account as one `name,id,balance` line.
///
/// The whole file is the unit of persistence: [`AccountsStore::load`] reads
/// all of it and [`AccountsStore::save`] replaces all of it.
#[derive(Debug, Clone)]
pub struct AccountsStore {
    path: PathBuf,
}

impl AccountsStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Reads all accounts in file order.
    /// A missing file is an empty store. The first malformed record aborts
    /// the load with [`Error::MalformedRecord`].
    pub fn load(&self) -> Result<Vec<Account>, Error> {
        let file = match File::open(&self.path) {
            Ok(file) => file,
            Err(err) if err.kind() == io::ErrorKind::NotFound => {
                tracing::debug!(path = %self.path.display(), "no backing file yet");
                return Ok(Vec::new());
            }
            Err(err) => return Err(err.into()),
        };

        let accounts = read_csv::<Account, _>(BufReader::new(file))
            .collect::<csv::Result<Vec<_>>>()
            .map_err(malformed)?;
        tracing::debug!(path = %self.path.display(), count = accounts.len(), "loaded accounts");
        Ok(accounts)
    }

    /// Replaces the backing file with `accounts`, in the order given.
    /// Records go to a scratch file next to the target which is then
    /// renamed over it, so a failed write never truncates the old file.
    pub fn save(&self, accounts: &[Account]) -> Result<(), Error> {
        let scratch = self.scratch_path();
        if let Err(err) = self.write_scratch(&scratch, accounts) {
            let _ = fs::remove_file(&scratch);
            return Err(err);
        }
        fs::rename(&scratch, &self.path)?;
        tracing::debug!(path = %self.path.display(), count = accounts.len(), "saved accounts");
        Ok(())
    }

    fn write_scratch(&self, scratch: &Path, accounts: &[Account]) -> Result<(), Error> {
        let mut writer = BufWriter::new(File::create(scratch)?);
        write_csv(&mut writer, accounts.iter())?;
        let file = writer.into_inner().map_err(|err| err.into_error())?;
        file.sync_all()?;
        Ok(())
    }

    fn scratch_path(&self) -> PathBuf {
        let mut name = self
            .path
            .file_name()
            .map(|name| name.to_os_string())
            .unwrap_or_default();
        name.push(".tmp");
        self.path.with_file_name(name)
    }
}

/// I/O failures stay I/O failures; anything else the reader rejects is a
/// malformed record.
fn malformed(err: csv::Error) -> Error {
    if err.is_io_error() {
        return Error::Csv(err);
    }
    let line = err.position().map(|pos| pos.line());
    let reason = match err.kind() {
        csv::ErrorKind::UnequalLengths {
            expected_len, len, ..
        } => format!("expected {expected_len} fields, found {len}"),
        csv::ErrorKind::Deserialize { err: de, .. } => de.to_string(),
        _ => err.to_string(),
    };
    Error::MalformedRecord { line, reason }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::scratch_file;
    use rust_decimal_macros::dec;

    #[test]
    fn test_missing_file_is_empty() -> Result<(), Error> {
        let store = AccountsStore::new(scratch_file("missing"));
        assert!(store.load()?.is_empty());
        Ok(())
    }

    #[test]
    fn test_save_then_load_round_trip() -> Result<(), Error> {
        let store = AccountsStore::new(scratch_file("round_trip"));
        let accounts = vec![
            Account::new("Ana", "111", dec!(200.0)),
            Account::new("Bob", "222", dec!(0.1)),
            Account::new("Silva, Jr.", "333", dec!(-12.345)),
        ];

        store.save(&accounts)?;
        assert_eq!(store.load()?, accounts);
        Ok(())
    }

    #[test]
    fn test_save_writes_plain_lines() -> Result<(), Box<dyn std::error::Error>> {
        let store = AccountsStore::new(scratch_file("plain_lines"));
        store.save(&[
            Account::new("Ana", "111", dec!(150.0)),
            Account::new("Bob", "222", dec!(7)),
        ])?;

        assert_eq!(fs::read_to_string(store.path())?, "Ana,111,150.0\nBob,222,7\n");
        Ok(())
    }

    #[test]
    fn test_save_overwrites_previous_contents() -> Result<(), Error> {
        let store = AccountsStore::new(scratch_file("overwrite"));
        store.save(&[
            Account::new("Ana", "111", dec!(1)),
            Account::new("Bob", "222", dec!(2)),
        ])?;
        store.save(&[Account::new("Cid", "333", dec!(3))])?;

        assert_eq!(store.load()?, vec![Account::new("Cid", "333", dec!(3))]);
        Ok(())
    }

    #[test]
    fn test_save_leaves_no_scratch_file() -> Result<(), Error> {
        let store = AccountsStore::new(scratch_file("no_scratch"));
        store.save(&[Account::new("Ana", "111", dec!(1))])?;

        assert!(store.path().exists());
        assert!(!store.scratch_path().exists());
        Ok(())
    }

    #[test]
    fn test_load_reads_hand_written_file() -> Result<(), Box<dyn std::error::Error>> {
        let store = AccountsStore::new(scratch_file("hand_written"));
        fs::write(store.path(), "Ana,111,200.0\n\nBob ,222, 50\n")?;

        assert_eq!(
            store.load()?,
            vec![
                Account::new("Ana", "111", dec!(200.0)),
                Account::new("Bob", "222", dec!(50)),
            ]
        );
        Ok(())
    }

    #[test]
    fn test_load_rejects_wrong_field_count() -> Result<(), Box<dyn std::error::Error>> {
        let store = AccountsStore::new(scratch_file("field_count"));
        fs::write(store.path(), "Ana,111,200.0\nBob,222\n")?;

        let err = store.load().unwrap_err();
        assert!(matches!(err, Error::MalformedRecord { line: Some(2), .. }));
        Ok(())
    }

    #[test]
    fn test_load_rejects_non_numeric_balance() -> Result<(), Box<dyn std::error::Error>> {
        let store = AccountsStore::new(scratch_file("non_numeric"));
        fs::write(store.path(), "Ana,111,lots\n")?;

        let err = store.load().unwrap_err();
        assert!(matches!(err, Error::MalformedRecord { line: Some(1), .. }));
        assert!(!err.is_recoverable());
        Ok(())
    }
}
