//! Line-oriented prompting over any `BufRead`/`Write` pair.

use crate::error::Res;
use crate::model::{parse_date, Amount, Transaction};
use crate::query::Summary;
use chrono::NaiveDate;
use std::fmt::{Display, Formatter};
use std::io::{BufRead, Write};
use std::str::FromStr;

/// Raised when the input reaches end of file while a prompt is waiting for a line.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub(crate) struct InputClosed;

impl Display for InputClosed {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str("The input was closed")
    }
}

impl std::error::Error for InputClosed {}

pub(crate) struct Console<R, W> {
    input: R,
    output: W,
}

impl<R, W> Console<R, W>
where
    R: BufRead,
    W: Write,
{
    pub(crate) fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    /// Writes `text` followed by a newline.
    pub(crate) fn say(&mut self, text: impl Display) -> Res<()> {
        writeln!(self.output, "{text}")?;
        Ok(())
    }

    pub(crate) fn error(&mut self, e: impl Display) -> Res<()> {
        self.say(format_args!("Error: {e}"))
    }

    /// Shows `prompt` and returns the next line without its line ending. Bytes that are not valid
    /// UTF-8 are replaced, so the answer is rejected by whatever validates it.
    pub(crate) fn line(&mut self, prompt: &str) -> Res<String> {
        write!(self.output, "{prompt}")?;
        self.output.flush()?;
        let mut buf = Vec::new();
        if self.input.read_until(b'\n', &mut buf)? == 0 {
            return Err(InputClosed.into());
        }
        Ok(String::from_utf8_lossy(&buf)
            .trim_end_matches(['\r', '\n'])
            .to_string())
    }

    /// Like `line` but with surrounding whitespace removed.
    pub(crate) fn trimmed(&mut self, prompt: &str) -> Res<String> {
        Ok(self.line(prompt)?.trim().to_string())
    }

    /// Prompts until a number from `1` to `max` is entered.
    pub(crate) fn choice(&mut self, prompt: &str, max: usize) -> Res<usize> {
        loop {
            match self.trimmed(prompt)?.parse::<usize>() {
                Ok(n) if (1..=max).contains(&n) => return Ok(n),
                _ => self.error(format_args!("Please enter a number from 1 to {max}"))?,
            }
        }
    }

    /// Prompts until a `YYYY-MM-DD` date is entered.
    pub(crate) fn date(&mut self, prompt: &str) -> Res<NaiveDate> {
        loop {
            match parse_date(&self.line(prompt)?) {
                Ok(date) => return Ok(date),
                Err(e) => self.error(e)?,
            }
        }
    }

    /// Prompts until an amount greater than zero is entered.
    pub(crate) fn amount(&mut self, prompt: &str) -> Res<Amount> {
        loop {
            match Amount::from_str(&self.line(prompt)?) {
                Ok(amount) if amount.is_positive() => return Ok(amount),
                Ok(amount) => {
                    self.error(format_args!("The amount must be greater than zero, got {amount}"))?
                }
                Err(e) => self.error(e)?,
            }
        }
    }

    pub(crate) fn transactions(&mut self, transactions: &[&Transaction]) -> Res<()> {
        writeln!(
            self.output,
            "{:<10}  {:>12}  {:<24}  {:<16}  {:<12}",
            "Date", "Amount", "Description", "Category", "Account"
        )?;
        for t in transactions {
            writeln!(
                self.output,
                "{:<10}  {:>12}  {:<24}  {:<16}  {:<12}",
                t.date().to_string(),
                t.amount().currency().to_string(),
                t.description(),
                t.category(),
                t.account()
            )?;
        }
        Ok(())
    }

    pub(crate) fn summary(&mut self, summary: &Summary) -> Res<()> {
        let aggregate = match summary {
            Summary::Empty => return self.say("Nothing to summarize"),
            Summary::Totals(aggregate) => aggregate,
        };
        for category in aggregate.categories() {
            writeln!(
                self.output,
                "  {:<24}  {:>12}",
                category.category(),
                category.amount().currency().to_string()
            )?;
        }
        writeln!(
            self.output,
            "  {:<24}  {:>12}",
            "Total",
            aggregate.total().currency().to_string()
        )?;
        Ok(())
    }
}
