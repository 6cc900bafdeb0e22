//! Interactive shell
//!
//! The numbered menu loop. Reads choices and fields line by line, runs
//! them against a catalog and prints the result. Failures are printed and
//! the loop keeps going; choosing Exit (or reaching end of input) flushes
//! the catalog and returns.

use std::io::{self, BufRead, Write};

use crate::catalog::Catalog;
use crate::command::{Command, MenuChoice, Outcome};
use crate::error::{LibraryError, Result};

/// Menu title
pub const BANNER: &str = "--- City Library Digital System ---";

/// Why a command could not be read from the input
#[derive(Debug)]
enum PromptError {
    /// Input ended
    Eof,

    /// A numeric field held something else
    InvalidNumber(String),

    /// Reading or writing the terminal failed
    Failed(LibraryError),
}

impl From<io::Error> for PromptError {
    fn from(e: io::Error) -> Self {
        PromptError::Failed(e.into())
    }
}

/// Menu loop over any line reader and writer
pub struct Shell<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> Shell<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    /// Run until Exit or end of input
    pub fn run(&mut self, catalog: &mut Catalog) -> Result<()> {
        loop {
            self.print_menu()?;

            let choice = match self.read_line()? {
                Some(line) => line.parse::<MenuChoice>(),
                None => return self.finish(catalog),
            };
            let Ok(choice) = choice else {
                writeln!(self.output, "Invalid!")?;
                continue;
            };

            let command = match self.prompt_command(choice) {
                Ok(command) => command,
                Err(PromptError::Eof) => return self.finish(catalog),
                Err(PromptError::InvalidNumber(raw)) => {
                    writeln!(self.output, "Invalid number: {:?}", raw)?;
                    continue;
                }
                Err(PromptError::Failed(e)) => return Err(e),
            };

            let exiting = command == Command::Exit;
            match catalog.execute(command) {
                Ok(outcome) => self.print_outcome(&outcome)?,
                Err(e) => self.report(&e)?,
            }
            if exiting {
                return Ok(());
            }
        }
    }

    /// Give the reader and writer back
    pub fn into_inner(self) -> (R, W) {
        (self.input, self.output)
    }

    // =========================================================================
    // Output
    // =========================================================================

    fn print_menu(&mut self) -> Result<()> {
        writeln!(self.output)?;
        writeln!(self.output, "{}", BANNER)?;
        for choice in MenuChoice::ALL {
            writeln!(self.output, "{}. {}", choice.number(), choice.label())?;
        }
        write!(self.output, "Choice: ")?;
        self.output.flush()?;
        Ok(())
    }

    fn print_outcome(&mut self, outcome: &Outcome) -> Result<()> {
        if let Outcome::Books(books) = outcome {
            if books.is_empty() {
                return Ok(());
            }
        }
        writeln!(self.output, "{}", outcome)?;
        Ok(())
    }

    fn report(&mut self, error: &LibraryError) -> Result<()> {
        match error {
            LibraryError::InvalidIds { .. } => writeln!(self.output, "Invalid IDs!")?,
            LibraryError::AlreadyIssued(_) => writeln!(self.output, "Already issued!")?,
            LibraryError::BookNotFound(_) | LibraryError::MemberNotFound(_) => {
                writeln!(self.output, "{}", error)?
            }
            other => {
                tracing::error!(error = %other, "Catalog operation failed");
                writeln!(self.output, "Error: {}", other)?;
            }
        }
        Ok(())
    }

    /// Flush on end of input, the same as choosing Exit
    fn finish(&mut self, catalog: &mut Catalog) -> Result<()> {
        writeln!(self.output)?;
        match catalog.execute(Command::Exit) {
            Ok(outcome) => self.print_outcome(&outcome),
            Err(e) => self.report(&e),
        }
    }

    // =========================================================================
    // Input
    // =========================================================================

    fn prompt_command(&mut self, choice: MenuChoice) -> std::result::Result<Command, PromptError> {
        let command = match choice {
            MenuChoice::AddBook => Command::AddBook {
                id: self.prompt_id("Book ID")?,
                title: self.prompt("Title")?,
                author: self.prompt("Author")?,
                category: self.prompt("Category")?,
            },
            MenuChoice::AddMember => Command::AddMember {
                id: self.prompt_id("Member ID")?,
                name: self.prompt("Name")?,
                email: self.prompt("Email")?,
            },
            MenuChoice::IssueBook => Command::IssueBook {
                book_id: self.prompt_id("Book ID")?,
                member_id: self.prompt_id("Member ID")?,
            },
            MenuChoice::ReturnBook => Command::ReturnBook {
                book_id: self.prompt_id("Book ID")?,
                member_id: self.prompt_id("Member ID")?,
            },
            MenuChoice::SearchBooks => Command::SearchBooks {
                keyword: self.prompt("Keyword")?,
            },
            MenuChoice::SortBooks => Command::SortBooks,
            MenuChoice::Exit => Command::Exit,
        };
        Ok(command)
    }

    fn prompt(&mut self, label: &str) -> std::result::Result<String, PromptError> {
        write!(self.output, "{}: ", label)?;
        self.output.flush()?;
        self.read_line()
            .map_err(PromptError::Failed)?
            .ok_or(PromptError::Eof)
    }

    fn prompt_id(&mut self, label: &str) -> std::result::Result<i32, PromptError> {
        let raw = self.prompt(label)?;
        raw.trim()
            .parse()
            .map_err(|_| PromptError::InvalidNumber(raw.trim().to_string()))
    }

    /// Next line without its terminator, or `None` at end of input
    fn read_line(&mut self) -> Result<Option<String>> {
        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        let trimmed = line.trim_end_matches(['\r', '\n']).len();
        line.truncate(trimmed);
        Ok(Some(line))
    }
}
