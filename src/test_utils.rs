//! Helpers shared by the unit tests.

use std::fs;
use std::path::PathBuf;

/// A fresh path under the OS temp dir, unique to this process and `name`.
/// Any leftover file from an earlier run is removed first.
pub fn scratch_file(name: &str) -> PathBuf {
    let path = std::env::temp_dir().join(format!(
        "rusty-ledger-{}-{}.txt",
        std::process::id(),
        name
    ));
    let _ = fs::remove_file(&path);
    path
}
