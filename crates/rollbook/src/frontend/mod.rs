//! Interactive front ends.
//!
//! Both front ends are thin drivers over a [`Registrar`](crate::Registrar):
//! they collect operator input, call one record operation, and report the
//! outcome. Neither holds roster state between operations.

pub mod form;
pub mod menu;
pub mod table;

use std::fmt::Display;
use std::io::{BufRead, Write};

use crate::error::Result;
use crate::student::{Department, Student, StudentId};

pub use form::FormView;
pub use menu::Menu;

/// An interactive front end that runs until the operator exits.
pub trait Interface {
    /// Name of this front end (for logging).
    fn name(&self) -> &'static str;

    /// Drive the front end until the operator exits or input ends.
    ///
    /// # Errors
    ///
    /// Returns an error only if the terminal itself fails or the roster
    /// cannot be saved; invalid operator input is reported and re-requested.
    fn run(&mut self) -> Result<()>;
}

/// Line-oriented terminal I/O.
#[derive(Debug)]
pub struct Console<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> Console<R, W> {
    /// Wrap an input and output stream.
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    /// Print `message` without a newline and read one line.
    ///
    /// Returns the line with surrounding whitespace trimmed, or `None` at end
    /// of input.
    ///
    /// # Errors
    ///
    /// Returns an error if reading or writing the terminal fails.
    pub fn prompt(&mut self, message: &str) -> Result<Option<String>> {
        write!(self.output, "{message}")?;
        self.output.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            writeln!(self.output)?;
            return Ok(None);
        }
        Ok(Some(line.trim().to_string()))
    }

    /// Print one line.
    ///
    /// # Errors
    ///
    /// Returns an error if writing the terminal fails.
    pub fn say(&mut self, message: impl Display) -> Result<()> {
        writeln!(self.output, "{message}")?;
        Ok(())
    }

    /// Print the numbered department list.
    ///
    /// # Errors
    ///
    /// Returns an error if writing the terminal fails.
    pub fn show_departments(&mut self) -> Result<()> {
        for dept in Department::ALL {
            writeln!(self.output, "{}. {}", dept.choice(), dept)?;
        }
        Ok(())
    }

    /// Print a record as labelled lines.
    ///
    /// # Errors
    ///
    /// Returns an error if writing the terminal fails.
    pub fn show_student(&mut self, id: &StudentId, student: &Student) -> Result<()> {
        writeln!(self.output, "Student ID: {id}")?;
        writeln!(self.output, "Name: {}", student.name)?;
        writeln!(self.output, "Age: {}", student.age)?;
        writeln!(self.output, "Department: {}", student.department)?;
        Ok(())
    }

    /// Consume the console, returning the output stream.
    pub fn into_output(self) -> W {
        self.output
    }
}
