//! Interactive menu for peoplebook.
//!
//! The [`Shell`] moves between three states: showing the menu, running the
//! chosen operation, and exiting. Every operation loads the collection from
//! the store, works on it through a [`Roster`], and saves it back when it
//! changed. Problems with one operation are reported and the menu is shown
//! again.
//!
//! The shell reads from any [`BufRead`] and writes to any [`Write`], so the
//! whole dialogue can be scripted:
//!
//! ```
//! use std::io::Cursor;
//! use peoplebook::{Config, Shell};
//!
//! let dir = tempfile::tempdir().unwrap();
//! let mut config = Config::default();
//! config.storage.data_path = Some(dir.path().join("people.json"));
//! config.storage.result_path = Some(dir.path().join("result.json"));
//!
//! let mut output = Vec::new();
//! {
//!     let input = Cursor::new("4\nbondar\n6\n");
//!     let mut shell = Shell::from_config(&config, input, &mut output).unwrap();
//!     shell.run().unwrap();
//! }
//!
//! let text = String::from_utf8(output).unwrap();
//! assert!(text.contains("Name: Maksym Bondar, Gender: m, Height: 190 cm"));
//! ```

pub mod menu;

use std::io::{BufRead, Write};

use tracing::{debug, error, warn};

use crate::config::Config;
use crate::error::{Error, Result};
use crate::record::{format_height, Gender, Record};
use crate::roster::Roster;
use crate::storage::{Recovery, Store};
use crate::validate::Validator;

pub use menu::MenuChoice;

/// Prompt shown under the menu.
const CHOICE_PROMPT: &str = "Choose an option (1–6): ";

/// Where the shell is in its loop.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    /// Showing the menu and waiting for a choice.
    Menu,
    /// Running the chosen operation.
    Running(MenuChoice),
    /// Leaving the loop.
    Exit,
}

/// Interactive menu over a [`Store`].
#[derive(Debug)]
pub struct Shell<R, W> {
    store: Store,
    validator: Validator,
    report_gender: Gender,
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> Shell<R, W> {
    /// Create a shell from its parts.
    pub fn new(
        store: Store,
        validator: Validator,
        report_gender: Gender,
        input: R,
        output: W,
    ) -> Self {
        Self {
            store,
            validator,
            report_gender,
            input,
            output,
        }
    }

    /// Create a shell using the store paths and validation rules in `config`.
    ///
    /// # Errors
    ///
    /// Returns an error if the validator cannot be built.
    pub fn from_config(config: &Config, input: R, output: W) -> Result<Self> {
        Ok(Self::new(
            Store::from_config(config),
            Validator::new(&config.records)?,
            config.report.gender,
            input,
            output,
        ))
    }

    /// Run the menu loop until the user exits or input ends.
    ///
    /// # Errors
    ///
    /// Returns an error only if the console itself fails. Problems inside an
    /// operation are reported to the user and the loop continues.
    pub fn run(&mut self) -> Result<()> {
        let mut state = State::Menu;
        loop {
            state = match state {
                State::Menu => self.show_menu()?,
                State::Running(choice) => self.run_operation(choice)?,
                State::Exit => break,
            };
        }
        debug!("Shell finished");
        Ok(())
    }

    fn show_menu(&mut self) -> Result<State> {
        write!(self.output, "{}", menu::render(self.report_gender))?;
        let Some(line) = self.read_line(CHOICE_PROMPT)? else {
            return Ok(State::Exit);
        };

        match MenuChoice::parse(&line) {
            Some(MenuChoice::Exit) => {
                writeln!(self.output, "Exiting program.")?;
                Ok(State::Exit)
            }
            Some(choice) => Ok(State::Running(choice)),
            None => {
                writeln!(self.output, "Invalid choice! Enter a number from 1 to 6.")?;
                Ok(State::Menu)
            }
        }
    }

    fn run_operation(&mut self, choice: MenuChoice) -> Result<State> {
        debug!("Running {:?}", choice);
        let result = match choice {
            MenuChoice::ShowData => self.show_data(),
            MenuChoice::AddRecord => self.add_record(),
            MenuChoice::DeleteRecord => self.delete_record(),
            MenuChoice::Search => self.search(),
            MenuChoice::AverageHeight => self.average_height(),
            MenuChoice::Exit => return Ok(State::Exit),
        };

        match result {
            Ok(()) => Ok(State::Menu),
            Err(Error::InputClosed) => {
                writeln!(self.output)?;
                Ok(State::Exit)
            }
            Err(Error::Io(e)) => Err(Error::Io(e)),
            Err(e) => {
                error!("{:?} failed: {}", choice, e);
                writeln!(self.output, "Error: {e}")?;
                Ok(State::Menu)
            }
        }
    }

    /// Load the collection, telling the user if it had to be regenerated.
    fn load(&mut self) -> Result<Roster> {
        let loaded = self.store.load()?;
        match loaded.recovery {
            Some(Recovery::Missing) => {
                writeln!(self.output, "File not found. Creating new file...")?;
            }
            Some(Recovery::Corrupt { .. }) => {
                writeln!(self.output, "Error reading JSON. Creating new file...")?;
            }
            None => {}
        }
        Ok(Roster::new(loaded.records))
    }

    fn show_data(&mut self) -> Result<()> {
        let roster = self.load()?;
        writeln!(self.output, "\nCurrent data:")?;
        for record in roster.records() {
            writeln!(self.output, "{record}")?;
        }
        Ok(())
    }

    fn add_record(&mut self) -> Result<()> {
        let mut roster = self.load()?;

        let name_prompt = self.validator.policy().prompt();
        let name = self.ask(name_prompt, Validator::name)?;
        let gender = self.ask("Gender (m - male / f - female): ", Validator::gender)?;
        let height = self.ask("Height (cm): ", Validator::height)?;

        match roster.add(Record::new(name.clone(), gender, height)) {
            Ok(()) => {}
            Err(Error::DuplicateRecord { name }) => {
                warn!("Rejected duplicate record {}", name);
                writeln!(self.output, "Error: person with this name already exists.")?;
                return Ok(());
            }
            Err(e) => return Err(e),
        }

        self.store.save(roster.records())?;
        writeln!(self.output, "Record for {name} added!")?;
        Ok(())
    }

    fn delete_record(&mut self) -> Result<()> {
        let mut roster = self.load()?;
        let name = self.prompt(self.validator.policy().delete_prompt())?;
        let name = name.trim();

        if roster.remove(name) == 0 {
            writeln!(self.output, "Person not found.")?;
            return Ok(());
        }

        self.store.save(roster.records())?;
        writeln!(self.output, "Record for {name} deleted.")?;
        Ok(())
    }

    fn search(&mut self) -> Result<()> {
        let roster = self.load()?;
        let needle = self.prompt("Enter Name or Surname to search: ")?;
        let results = roster.search(needle.trim());

        if results.is_empty() {
            writeln!(self.output, "Nothing found.")?;
            return Ok(());
        }

        writeln!(self.output, "\nSearch results:")?;
        for record in results {
            writeln!(self.output, "{record}")?;
        }
        Ok(())
    }

    fn average_height(&mut self) -> Result<()> {
        let roster = self.load()?;
        let Some(average) = roster.average_height(self.report_gender) else {
            writeln!(
                self.output,
                "No {} data available.",
                self.report_gender.adjective()
            )?;
            return Ok(());
        };

        self.store.write_result(&average)?;
        writeln!(
            self.output,
            "Average {} height = {:.2} cm (saved in {})",
            self.report_gender.adjective(),
            average.mean,
            self.store.result_path().display()
        )?;
        Ok(())
    }

    /// Ask until `check` accepts the answer, printing a hint after each
    /// rejection.
    fn ask<T>(&mut self, prompt: &str, check: fn(&Validator, &str) -> Result<T>) -> Result<T> {
        loop {
            let line = self.prompt(prompt)?;
            match check(&self.validator, &line) {
                Ok(value) => return Ok(value),
                Err(e) if e.is_validation_error() => {
                    debug!("Re-prompting after: {}", e);
                    let hint = self.hint(&e);
                    writeln!(self.output, "{hint}")?;
                }
                Err(e) => return Err(e),
            }
        }
    }

    /// Text shown after a rejected answer.
    fn hint(&self, err: &Error) -> String {
        match err {
            Error::InvalidName { .. } => self.validator.policy().hint().to_string(),
            Error::InvalidGender { .. } => "Enter only 'm' or 'f'!".to_string(),
            Error::HeightNotNumber { .. } => "Error: enter a number!".to_string(),
            Error::HeightOutOfRange { .. } => {
                let (min, max) = self.validator.height_range();
                format!(
                    "Unrealistic height. Enter value between {}-{} cm.",
                    format_height(min),
                    format_height(max)
                )
            }
            other => other.to_string(),
        }
    }

    /// Print `text` and read one answer.
    ///
    /// Returns [`Error::InputClosed`] at end of input.
    fn prompt(&mut self, text: &str) -> Result<String> {
        self.read_line(text)?.ok_or(Error::InputClosed)
    }

    /// Print `text` and read one line, without its line ending.
    ///
    /// Returns `None` at end of input.
    fn read_line(&mut self, text: &str) -> Result<Option<String>> {
        write!(self.output, "{text}")?;
        self.output.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        let trimmed_len = line.trim_end_matches(['\r', '\n']).len();
        line.truncate(trimmed_len);
        Ok(Some(line))
    }
}
