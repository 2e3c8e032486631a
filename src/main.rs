use std::error::Error;
use std::io;
use std::path::PathBuf;
use std::process;
use std::time::Duration;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use rusty_ledger::{AccountsStore, Ledger, Shell, ShellOptions};

/// Interactive account ledger backed by a flat text file.
#[derive(Parser, Debug)]
#[command(version)]
struct Args {
    /// File holding one `name,id,balance` line per account.
    #[arg(long, env = "LEDGER_DATA_FILE", default_value = "accounts.txt")]
    data_file: PathBuf,

    /// Pause shown after choosing exit, in milliseconds.
    #[arg(long, default_value_t = 1500)]
    exit_delay_ms: u64,

    /// Do not clear the terminal before each menu.
    #[arg(long)]
    no_clear: bool,
}

fn main() {
    let args = Args::parse();
    init_tracing();

    if let Err(err) = run(args) {
        eprintln!("Error: {}", err);
        process::exit(1);
    }
}

/// Logs go to stderr so they never interleave with the menu on stdout.
/// `RUST_LOG` overrides the default `warn` filter.
fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(io::stderr)
        .init();
}

fn run(args: Args) -> Result<(), Box<dyn Error>> {
    tracing::info!(data_file = %args.data_file.display(), "starting ledger");
    let ledger = Ledger::new(AccountsStore::new(args.data_file));
    let options = ShellOptions {
        clear_screen: !args.no_clear,
        exit_delay: Duration::from_millis(args.exit_delay_ms),
    };

    let stdin = io::stdin();
    Shell::new(ledger, stdin.lock(), io::stdout(), options).run()?;
    Ok(())
}
