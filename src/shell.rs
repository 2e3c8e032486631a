//! Interactive menu loop.
//!
//! The shell reads from any [`BufRead`] and writes to any [`Write`], so the
//! binary hands it stdin/stdout while tests script whole sessions.

use std::io::{BufRead, Write};
use std::thread;
use std::time::Duration;

use crate::dto::parse_amount;
use crate::listing::two_places;
use crate::{Error, Ledger};

const RULE: &str = "══════════════════════════════";
const CLEAR_SCREEN: &str = "\x1B[2J\x1B[1;1H";

#[derive(Debug, Clone)]
pub struct ShellOptions {
    /// Clear the terminal before drawing the menu.
    pub clear_screen: bool,
    /// Pause after the goodbye message on the exit choice.
    pub exit_delay: Duration,
}

impl Default for ShellOptions {
    fn default() -> Self {
        Self {
            clear_screen: true,
            exit_delay: Duration::from_millis(1500),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
enum MenuChoice {
    Create,
    List,
    Deposit,
    Withdraw,
    Exit,
}

impl MenuChoice {
    fn parse(input: &str) -> Option<Self> {
        match input.trim() {
            "1" => Some(Self::Create),
            "2" => Some(Self::List),
            "3" => Some(Self::Deposit),
            "4" => Some(Self::Withdraw),
            "5" => Some(Self::Exit),
            _ => None,
        }
    }
}

/// Whether the loop keeps going after a step. `Quit` means input ran out.
enum Flow {
    Continue,
    Quit,
}

pub struct Shell<R, W> {
    ledger: Ledger,
    input: R,
    output: W,
    options: ShellOptions,
}

impl<R, W> Shell<R, W>
where
    R: BufRead,
    W: Write,
{
    pub fn new(ledger: Ledger, input: R, output: W, options: ShellOptions) -> Self {
        Self {
            ledger,
            input,
            output,
            options,
        }
    }

    /// Runs until the exit choice or end of input.
    ///
    /// # Errors
    /// Only storage failures end the loop with an error. Operation failures
    /// are printed and the menu is shown again.
    pub fn run(&mut self) -> Result<(), Error> {
        loop {
            self.clear_screen()?;
            self.print_menu()?;
            let Some(choice) = self.prompt("Choose an option: ")? else {
                return Ok(());
            };

            let step = match MenuChoice::parse(&choice) {
                Some(MenuChoice::Create) => self.create(),
                Some(MenuChoice::List) => self.list(),
                Some(MenuChoice::Deposit) => self.deposit(),
                Some(MenuChoice::Withdraw) => self.withdraw(),
                Some(MenuChoice::Exit) => {
                    writeln!(self.output, "\nShutting down... Goodbye!")?;
                    self.output.flush()?;
                    thread::sleep(self.options.exit_delay);
                    return Ok(());
                }
                None => {
                    tracing::debug!(choice = %choice, "unknown menu choice");
                    writeln!(self.output, "\nInvalid option. Try again.")?;
                    Ok(Flow::Continue)
                }
            };

            match step {
                Ok(Flow::Continue) => {}
                Ok(Flow::Quit) => return Ok(()),
                Err(err) if err.is_recoverable() => writeln!(self.output, "\nError: {err}")?,
                Err(err) => return Err(err),
            }

            if self.prompt("\nPress Enter to continue...")?.is_none() {
                return Ok(());
            }
        }
    }

    fn create(&mut self) -> Result<Flow, Error> {
        let Some(name) = self.prompt("\nAccount holder name: ")? else {
            return Ok(Flow::Quit);
        };
        let Some(id) = self.prompt("Account ID: ")? else {
            return Ok(Flow::Quit);
        };
        let Some(balance) = self.prompt("Initial balance: ")? else {
            return Ok(Flow::Quit);
        };
        let balance = parse_amount(&balance)?;

        let account = self.ledger.create_account(&name, &id, balance)?;
        writeln!(
            self.output,
            "\nAccount created for {} (ID: {}).",
            account.name, account.id
        )?;
        Ok(Flow::Continue)
    }

    fn list(&mut self) -> Result<Flow, Error> {
        let listing = self.ledger.listing()?;
        write!(self.output, "\n{listing}")?;
        Ok(Flow::Continue)
    }

    fn deposit(&mut self) -> Result<Flow, Error> {
        let Some((id, amount)) = self.prompt_transfer("deposit")? else {
            return Ok(Flow::Quit);
        };
        let account = self.ledger.deposit(&id, amount)?;
        writeln!(
            self.output,
            "\nDeposit of {} made for {} (ID: {}). New balance: {}",
            two_places(amount),
            account.name,
            account.id,
            two_places(account.balance)
        )?;
        Ok(Flow::Continue)
    }

    fn withdraw(&mut self) -> Result<Flow, Error> {
        let Some((id, amount)) = self.prompt_transfer("withdrawal")? else {
            return Ok(Flow::Quit);
        };
        let account = self.ledger.withdraw(&id, amount)?;
        writeln!(
            self.output,
            "\nWithdrawal of {} made for {} (ID: {}). New balance: {}",
            two_places(amount),
            account.name,
            account.id,
            two_places(account.balance)
        )?;
        Ok(Flow::Continue)
    }

    /// Asks for an account ID, checks it exists, then asks for the amount.
    /// `None` when input runs out.
    fn prompt_transfer(
        &mut self,
        kind: &str,
    ) -> Result<Option<(String, rust_decimal::Decimal)>, Error> {
        let Some(id) = self.prompt(&format!("\nAccount ID for {kind}: "))? else {
            return Ok(None);
        };
        if self.ledger.find_account(&id)?.is_none() {
            return Err(Error::AccountNotFound(id));
        }
        let Some(amount) = self.prompt(&format!("Amount of {kind}: "))? else {
            return Ok(None);
        };
        Ok(Some((id, parse_amount(&amount)?)))
    }

    /// Prints `label` and reads one trimmed line. `None` at end of input.
    fn prompt(&mut self, label: &str) -> Result<Option<String>, Error> {
        write!(self.output, "{label}")?;
        self.output.flush()?;
        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        Ok(Some(line.trim().to_string()))
    }

    fn print_menu(&mut self) -> Result<(), Error> {
        writeln!(self.output, "{RULE}")?;
        writeln!(self.output, "  ACCOUNT LEDGER")?;
        writeln!(self.output, "{RULE}")?;
        writeln!(self.output, "1. Create account")?;
        writeln!(self.output, "2. List accounts")?;
        writeln!(self.output, "3. Deposit")?;
        writeln!(self.output, "4. Withdraw")?;
        writeln!(self.output, "5. Exit")?;
        writeln!(self.output, "{RULE}")?;
        Ok(())
    }

    fn clear_screen(&mut self) -> Result<(), Error> {
        if !self.options.clear_screen {
            return Ok(());
        }
        if cfg!(windows) {
            if let Err(err) = std::process::Command::new("cmd").args(["/C", "cls"]).status() {
                tracing::debug!(%err, "could not clear the console");
            }
            return Ok(());
        }
        write!(self.output, "{CLEAR_SCREEN}")?;
        Ok(())
    }
}
