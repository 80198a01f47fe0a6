//! Interactive command loop over a [`Marina`].
//!
//! The session reads single-letter commands from its input, calls into the
//! store, and writes prompts and results to its output. Input and output are
//! generic so the loop can be driven by scripted text.

use crate::core::store::Marina;
use crate::domain::model::RateTable;
use crate::domain::ports::{ConfigProvider, Storage};
use crate::utils::error::{MarinaError, ParseError, PaymentError, Result, StoreError};
use std::io::{BufRead, Write};

const PROMPT: &str = "(I)nventory, (A)dd, (R)emove, (P)ayment, (M)onth, e(X)it : ";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Inventory,
    Add,
    Remove,
    Payment,
    Month,
    Exit,
    Invalid(char),
}

impl Command {
    pub fn from_char(c: char) -> Self {
        match c.to_ascii_lowercase() {
            'i' => Command::Inventory,
            'a' => Command::Add,
            'r' => Command::Remove,
            'p' => Command::Payment,
            'm' => Command::Month,
            'x' => Command::Exit,
            other => Command::Invalid(other),
        }
    }
}

pub struct Session<S: Storage, R: BufRead, W: Write> {
    marina: Marina,
    rates: RateTable,
    storage: S,
    input: R,
    output: W,
}

impl<S: Storage, R: BufRead, W: Write> Session<S, R, W> {
    pub fn new<C: ConfigProvider>(config: &C, storage: S, input: R, output: W) -> Self {
        Self {
            marina: Marina::with_capacity(config.capacity()),
            rates: config.rates(),
            storage,
            input,
            output,
        }
    }

    pub fn marina(&self) -> &Marina {
        &self.marina
    }

    /// Loads the data file. A file that cannot be opened is reported and the
    /// session carries on with an empty marina; a read failure part way is
    /// reported and the boats read before it are kept.
    pub fn load(&mut self) -> Result<()> {
        let reader = match self.storage.open_reader() {
            Ok(reader) => reader,
            Err(e) => {
                tracing::warn!("Could not open {}: {}", self.storage.location(), e);
                writeln!(
                    self.output,
                    "Error opening file {} for reading.",
                    self.storage.location()
                )?;
                return Ok(());
            }
        };

        let report = match self.marina.load(reader) {
            Ok(report) => report,
            Err(e) => {
                tracing::error!("Load of {} stopped early: {}", self.storage.location(), e);
                writeln!(
                    self.output,
                    "Error reading file {}: {}. Continuing with {} boats.",
                    self.storage.location(),
                    e,
                    self.marina.len()
                )?;
                return Ok(());
            }
        };
        for skipped in &report.skipped {
            writeln!(
                self.output,
                "Error parsing line {}: {}",
                skipped.line, skipped.reason
            )?;
        }
        Ok(())
    }

    /// Runs commands until `x` or the end of input, then saves.
    pub fn run(&mut self) -> Result<()> {
        writeln!(self.output, "\nWelcome to the Boat Management System")?;
        writeln!(self.output, "-------------------------------------")?;

        loop {
            write!(self.output, "\n{}", PROMPT)?;
            self.output.flush()?;

            let command = match self.read_command()? {
                Some(command) => command,
                None => {
                    tracing::debug!("End of input, exiting");
                    writeln!(self.output)?;
                    Command::Exit
                }
            };

            self.execute(command)?;
            if command == Command::Exit {
                break;
            }
        }
        Ok(())
    }

    pub fn execute(&mut self, command: Command) -> Result<()> {
        tracing::debug!("Executing {:?}", command);
        match command {
            Command::Inventory => self.display_inventory(),
            Command::Add => self.add_boat(),
            Command::Remove => self.remove_boat(),
            Command::Payment => self.accept_payment(),
            Command::Month => {
                self.marina.apply_monthly_charges(&self.rates);
                writeln!(self.output, "Monthly charges updated for all boats.")?;
                Ok(())
            }
            Command::Exit => {
                writeln!(self.output, "Exiting the Boat Management System")?;
                self.save()
            }
            Command::Invalid(c) => {
                writeln!(self.output, "Invalid option {}", c)?;
                Ok(())
            }
        }
    }

    fn display_inventory(&mut self) -> Result<()> {
        writeln!(self.output, "\nBoat Inventory:")?;
        for boat in self.marina.list() {
            writeln!(self.output, "{}", boat)?;
        }
        Ok(())
    }

    fn add_boat(&mut self) -> Result<()> {
        if self.marina.len() >= self.marina.capacity() {
            writeln!(
                self.output,
                "Cannot add more boats, maximum capacity reached."
            )?;
            return Ok(());
        }

        let Some(line) = self.prompt(
            "Enter the boat data in CSV format (name,length,place,info,amount): ",
        )?
        else {
            writeln!(self.output, "Error reading input.")?;
            return Ok(());
        };

        match self.marina.add_line(&line) {
            Ok(()) => writeln!(self.output, "Boat added successfully!")?,
            Err(e) => writeln!(self.output, "{}", add_failure_message(&e))?,
        }
        Ok(())
    }

    fn remove_boat(&mut self) -> Result<()> {
        let Some(name) = self.prompt("Please enter the boat name to remove: ")? else {
            writeln!(self.output, "Error reading boat name.")?;
            return Ok(());
        };

        match self.marina.remove(&name) {
            Ok(_) => writeln!(self.output, "Boat removed successfully!")?,
            Err(e) => writeln!(self.output, "{}.", e)?,
        }
        Ok(())
    }

    fn accept_payment(&mut self) -> Result<()> {
        let Some(name) = self.prompt("Please enter the boat name: ")? else {
            writeln!(self.output, "Error reading input.")?;
            return Ok(());
        };

        if self.marina.find(&name).is_none() {
            writeln!(self.output, "No boat with name '{}' found.", name)?;
            return Ok(());
        }

        let amount = self
            .prompt("Enter the payment amount: ")?
            .and_then(|text| text.parse::<f64>().ok())
            .filter(|amount| amount.is_finite());
        let Some(amount) = amount else {
            writeln!(self.output, "Error reading payment amount.")?;
            return Ok(());
        };

        match self.marina.accept_payment(&name, amount) {
            Ok(balance) => writeln!(
                self.output,
                "Payment accepted. New balance: ${:.2}",
                balance
            )?,
            Err(PaymentError::ExceedsOwed { owed, .. }) => writeln!(
                self.output,
                "Payment exceeds amount owed of ${:.2}.",
                owed
            )?,
            Err(e) => writeln!(self.output, "{}.", e)?,
        }
        Ok(())
    }

    fn save(&mut self) -> Result<()> {
        let location = self.storage.location().to_string();
        let writer = match self.storage.open_writer() {
            Ok(writer) => writer,
            Err(e) => {
                tracing::error!("Could not open {} for writing: {}", location, e);
                writeln!(self.output, "Error opening file {} for writing.", location)?;
                return Ok(());
            }
        };

        match self.marina.save(writer) {
            Ok(count) => {
                tracing::info!("Saved {} boats to {}", count, location);
                writeln!(self.output, "Data saved successfully to {}", location)?;
            }
            Err(e) => writeln!(self.output, "Error writing data to {}: {}", location, e)?,
        }
        Ok(())
    }

    fn prompt(&mut self, text: &str) -> Result<Option<String>> {
        write!(self.output, "{}", text)?;
        self.output.flush()?;
        self.read_non_blank_line()
    }

    fn read_command(&mut self) -> Result<Option<Command>> {
        let line = self.read_non_blank_line()?;
        Ok(line
            .and_then(|line| line.chars().next())
            .map(Command::from_char))
    }

    /// Next line with surrounding whitespace removed, skipping blank lines.
    /// `None` at end of input.
    fn read_non_blank_line(&mut self) -> Result<Option<String>> {
        let mut buffer = String::new();
        loop {
            buffer.clear();
            if self.input.read_line(&mut buffer)? == 0 {
                return Ok(None);
            }
            let trimmed = buffer.trim();
            if !trimmed.is_empty() {
                return Ok(Some(trimmed.to_string()));
            }
        }
    }
}

fn add_failure_message(error: &MarinaError) -> String {
    match error {
        MarinaError::Parse(ParseError::Malformed { .. }) => {
            "Error: Invalid input format.".to_string()
        }
        MarinaError::Parse(ParseError::InvalidField(field)) => format!("{}.", field),
        MarinaError::Store(StoreError::AtCapacity { .. }) => {
            "Cannot add more boats, maximum capacity reached.".to_string()
        }
        MarinaError::Store(e) => format!("{}.", e),
        other => format!("{}.", other),
    }
}
