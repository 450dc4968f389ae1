//! The interactive menu loop.
//!
//! A `Session` reads answers line by line from any `BufRead` and writes prompts and results to any
//! `Write`, so the same loop drives a terminal in `main` and a scripted `Cursor` in tests. Every
//! operation is delegated to `crate::commands`; this module only gathers input and prints output.
//!
//! Errors from an operation are printed and the menu carries on. The loop ends when the user picks
//! Exit or when the input runs out.

mod console;

use crate::commands::{self, Out};
use crate::error::{ErrorType, IntoResult, Res, Result};
use crate::model::Transaction;
use crate::store::{CredentialStore, Ledger, PasswordScheme, Plaintext, TransactionStore};
use crate::Config;
use console::{Console, InputClosed};
use serde::Serialize;
use std::fmt::Debug;
use std::io::{BufRead, Write};
use tracing::{debug, warn};

const TOP_MENU: &str = "\n== Pocket Ledger ==\n\
    1. Register\n\
    2. Login\n\
    3. Exit";

const USER_MENU: &str = "1. Add transaction\n\
    2. View transactions\n\
    3. Summarize\n\
    4. Detailed summary\n\
    5. Category chart\n\
    6. Export to spreadsheet\n\
    7. Logout";

const DATE_PROMPT: &str = "Date (YYYY-MM-DD): ";

/// Opens the stores named by `config` and runs the menu loop until Exit or end of input.
pub fn run<R, W>(config: &Config, input: R, output: W) -> Result<()>
where
    R: BufRead,
    W: Write,
{
    Session::open(config, input, output)?.run()
}

/// One run of the menu loop over a credential store and a loaded ledger.
pub struct Session<'a, R, W, S = Plaintext>
where
    S: PasswordScheme,
{
    config: &'a Config,
    credentials: CredentialStore<S>,
    ledger: Ledger,
    console: Console<R, W>,
}

impl<'a, R, W> Session<'a, R, W, Plaintext>
where
    R: BufRead,
    W: Write,
{
    /// Opens the credential and transaction files named by `config`, creating them if needed, and
    /// loads every transaction.
    pub fn open(config: &'a Config, input: R, output: W) -> Result<Self> {
        let credentials = CredentialStore::open(config.users_path())?;
        let ledger = Ledger::open(TransactionStore::open(config.transactions_path())?)?;
        debug!(
            "Loaded {} transactions from {}",
            ledger.records().len(),
            ledger.store().path().display()
        );
        Ok(Self::with_stores(config, credentials, ledger, input, output))
    }
}

impl<'a, R, W, S> Session<'a, R, W, S>
where
    R: BufRead,
    W: Write,
    S: PasswordScheme,
{
    pub fn with_stores(
        config: &'a Config,
        credentials: CredentialStore<S>,
        ledger: Ledger,
        input: R,
        output: W,
    ) -> Self {
        Self {
            config,
            credentials,
            ledger,
            console: Console::new(input, output),
        }
    }

    /// Runs the top-level menu. Returns `Ok` on Exit or end of input. Only a failure to read from
    /// or write to the console is returned as an error.
    pub fn run(&mut self) -> Result<()> {
        match self.top_menu() {
            Ok(()) => Ok(()),
            Err(e) if e.is::<InputClosed>() => {
                debug!("Input closed, leaving the menu");
                Ok(())
            }
            Err(e) => Err(e).pub_result(ErrorType::Io),
        }
    }

    fn top_menu(&mut self) -> Res<()> {
        loop {
            self.console.say(TOP_MENU)?;
            match self.console.choice("Choose an option: ", 3)? {
                1 => self.register()?,
                2 => {
                    if let Some(user) = self.login()? {
                        self.user_menu(&user)?;
                    }
                }
                _ => {
                    self.console.say("Goodbye!")?;
                    return Ok(());
                }
            }
        }
    }

    /// Asks for a new username and a confirmed password. A blank username goes back to the menu.
    fn register(&mut self) -> Res<()> {
        loop {
            let username = self.console.trimmed("New username (blank to cancel): ")?;
            if username.is_empty() {
                return Ok(());
            }
            match self.credentials.contains(&username) {
                Ok(false) => {}
                Ok(true) => {
                    self.console.error(format_args!(
                        "The username '{username}' is already taken, choose another"
                    ))?;
                    continue;
                }
                Err(e) => return self.console.error(e),
            }

            loop {
                let password = self.console.line("Password: ")?;
                let confirmation = self.console.line("Confirm password: ")?;
                match commands::register(&self.credentials, &username, &password, &confirmation) {
                    Ok(out) => return report(&mut self.console, &out),
                    Err(e) if e.error_type() == ErrorType::Validation => self.console.error(e)?,
                    Err(e) if e.error_type() == ErrorType::DuplicateUser => {
                        self.console.error(e)?;
                        break;
                    }
                    Err(e) => return self.console.error(e),
                }
            }
        }
    }

    /// Asks for credentials until they match. A blank username goes back to the menu.
    fn login(&mut self) -> Res<Option<String>> {
        loop {
            let username = self.console.trimmed("Username (blank to cancel): ")?;
            if username.is_empty() {
                return Ok(None);
            }
            let password = self.console.line("Password: ")?;
            match commands::login(&self.credentials, &username, &password) {
                Ok(out) => {
                    report(&mut self.console, &out)?;
                    return Ok(out.into_structure());
                }
                Err(e) if e.error_type() == ErrorType::InvalidCredentials => {
                    self.console.error(e)?
                }
                Err(e) => {
                    self.console.error(e)?;
                    return Ok(None);
                }
            }
        }
    }

    fn user_menu(&mut self, user: &str) -> Res<()> {
        loop {
            self.console.say(format_args!("\n== Logged in as {user} =="))?;
            self.console.say(USER_MENU)?;
            match self.console.choice("Choose an option: ", 7)? {
                1 => self.add(user)?,
                2 => self.view(user)?,
                3 => self.summarize(user)?,
                4 => self.detailed_summary(user)?,
                5 => {
                    let res = commands::chart(self.config, &self.ledger, user);
                    outcome(&mut self.console, res)?
                }
                6 => {
                    let res = commands::export(self.config, &self.ledger, user);
                    outcome(&mut self.console, res)?
                }
                _ => {
                    self.console.say(format_args!("Logged out {user}"))?;
                    return Ok(());
                }
            }
        }
    }

    fn add(&mut self, user: &str) -> Res<()> {
        let date = self.console.date(DATE_PROMPT)?;
        let amount = self.console.amount("Amount: ")?;
        let description = self.console.trimmed("Description: ")?;
        let category = self.console.trimmed("Category: ")?;
        let account = self.console.trimmed("Account: ")?;
        match Transaction::new(date, amount, description, category, account, user) {
            Ok(transaction) => {
                let res = commands::add_transaction(&mut self.ledger, transaction);
                outcome(&mut self.console, res)
            }
            Err(e) => self.console.error(e),
        }
    }

    fn view(&mut self, user: &str) -> Res<()> {
        let out = commands::view(&self.ledger, user);
        report(&mut self.console, &out)?;
        match out.structure() {
            Some(transactions) if !transactions.is_empty() => {
                self.console.transactions(transactions)
            }
            _ => Ok(()),
        }
    }

    fn summarize(&mut self, user: &str) -> Res<()> {
        let out = match commands::summarize(&self.ledger, user) {
            Ok(out) => out,
            Err(e) => return self.console.error(e),
        };
        report(&mut self.console, &out)?;
        match out.structure() {
            Some(summary) if summary.aggregate().is_some() => self.console.summary(summary),
            _ => Ok(()),
        }
    }

    fn detailed_summary(&mut self, user: &str) -> Res<()> {
        let start = self.console.date("Start date (YYYY-MM-DD): ")?;
        let end = loop {
            let end = self.console.date("End date (YYYY-MM-DD): ")?;
            if end < start {
                self.console.error(format_args!(
                    "The end date {end} is before the start date {start}"
                ))?;
            } else {
                break end;
            }
        };
        let category = self.console.trimmed("Category (blank for all): ")?;
        let category = (!category.is_empty()).then_some(category.as_str());

        match commands::detailed_summary(&self.ledger, user, start, end, category) {
            Ok(out) => {
                report(&mut self.console, &out)?;
                if let Some(detail) = out.structure() {
                    if detail.summary.aggregate().is_some() {
                        self.console.transactions(&detail.transactions)?;
                        self.console.summary(&detail.summary)?;
                    }
                }
                Ok(())
            }
            Err(e) => self.console.error(e),
        }
    }
}

/// Prints and logs a command's message.
fn report<R, W, T>(console: &mut Console<R, W>, out: &Out<T>) -> Res<()>
where
    R: BufRead,
    W: Write,
    T: Serialize + Clone + Debug,
{
    out.log();
    console.say(out.message())
}

/// Prints either the command's message or its error.
fn outcome<R, W, T>(console: &mut Console<R, W>, res: Result<Out<T>>) -> Res<()>
where
    R: BufRead,
    W: Write,
    T: Serialize + Clone + Debug,
{
    match res {
        Ok(out) => report(console, &out),
        Err(e) => {
            if !e.is_recoverable() {
                warn!("{e}");
            }
            console.error(e)
        }
    }
}
