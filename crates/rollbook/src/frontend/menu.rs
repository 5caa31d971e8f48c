//! Numbered text menu front end.
//!
//! Add re-prompts each field until it is valid. Search, Update and Delete
//! report a bad ID and return to the main menu. End of input exits.

use std::io::{BufRead, Write};

use tracing::debug;

use super::{Console, Interface};
use crate::error::{Error, Result};
use crate::registrar::Registrar;
use crate::storage::RosterStore;
use crate::student::{Department, Field, Student, StudentId};
use crate::validate;

const ID_FORMAT_HINT: &str = "Must be like CU-0000-YYYY";

/// Whether the menu loop should keep going.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Flow {
    Continue,
    Exit,
}

/// Read a line or leave the current action at end of input.
macro_rules! read_or_exit {
    ($console:expr, $message:expr) => {
        match $console.prompt($message)? {
            Some(line) => line,
            None => return Ok(Flow::Exit),
        }
    };
}

/// A numbered choice: ASCII digits only, leading zeros allowed.
fn menu_choice(raw: &str) -> Option<usize> {
    if raw.is_empty() || !raw.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    raw.parse().ok()
}

/// The numbered text menu.
#[derive(Debug)]
pub struct Menu<'a, S, R, W> {
    registrar: &'a Registrar<S>,
    console: Console<R, W>,
}

impl<'a, S: RosterStore, R: BufRead, W: Write> Menu<'a, S, R, W> {
    /// Create a menu over `registrar` talking to `console`.
    pub fn new(registrar: &'a Registrar<S>, console: Console<R, W>) -> Self {
        Self { registrar, console }
    }

    /// Consume the menu, returning the console.
    pub fn into_console(self) -> Console<R, W> {
        self.console
    }

    fn main_menu(&mut self) -> Result<Flow> {
        self.console.say("")?;
        self.console.say("====== Student Management System ======")?;
        self.console.say("1. Add Student")?;
        self.console.say("2. View All Students")?;
        self.console.say("3. Search Student")?;
        self.console.say("4. Update Student")?;
        self.console.say("5. Delete Student")?;
        self.console.say("6. Exit")?;

        let choice = read_or_exit!(self.console, "Enter your choice (1-6): ");
        match menu_choice(&choice) {
            Some(1) => self.add_student(),
            Some(2) => self.view_students(),
            Some(3) => self.search_student(),
            Some(4) => self.update_student(),
            Some(5) => self.delete_student(),
            Some(6) => {
                self.console.say("Exiting program...")?;
                Ok(Flow::Exit)
            }
            _ => {
                self.console
                    .say("Invalid choice! Enter a number between 1-6.")?;
                Ok(Flow::Continue)
            }
        }
    }

    fn add_student(&mut self) -> Result<Flow> {
        let id = loop {
            let raw = read_or_exit!(self.console, "Enter Student ID (CU-0000-YYYY): ");
            match StudentId::parse(&raw) {
                Ok(id) if self.registrar.roster().contains(&id) => {
                    self.console.say("Student ID already exists!")?;
                }
                Ok(id) => break id,
                Err(_) => {
                    self.console
                        .say("Invalid ID! Must be like 'CU-0001-2026', CU/cu accepted.")?;
                }
            }
        };

        let name = loop {
            let raw = read_or_exit!(self.console, "Enter Name: ");
            match validate::parse_name(&raw) {
                Ok(name) => break name,
                Err(_) => self.console.say("Invalid name! Only alphabets allowed.")?,
            }
        };

        let age = loop {
            let raw = read_or_exit!(self.console, "Enter Age: ");
            match validate::parse_age(&raw) {
                Ok(age) => break age,
                Err(_) => self
                    .console
                    .say("Invalid age! Enter digits only between 5-100.")?,
            }
        };

        let Some(department) = self.choose_department("\nSelect Department:")? else {
            return Ok(Flow::Exit);
        };

        match self
            .registrar
            .add(id.clone(), Student::new(name, age, department))
        {
            Ok(()) => {
                self.console
                    .say(format!("Student added successfully! Student ID: {id}"))?;
            }
            Err(err @ Error::DuplicateId(_)) => self.console.say(err)?,
            Err(err) => return Err(err),
        }
        Ok(Flow::Continue)
    }

    fn view_students(&mut self) -> Result<Flow> {
        let students = self.registrar.list();
        if students.is_empty() {
            self.console.say("No student records found.")?;
            return Ok(Flow::Continue);
        }

        for (id, student) in &students {
            self.console.say("\n----------------------")?;
            self.console.show_student(id, student)?;
        }
        Ok(Flow::Continue)
    }

    fn search_student(&mut self) -> Result<Flow> {
        let raw = read_or_exit!(self.console, "Enter Student ID to search: ");
        match self.registrar.search(&raw) {
            Ok((id, student)) => {
                self.console.say("\nStudent Found:")?;
                self.console.show_student(&id, &student)?;
            }
            Err(err) => self.report_lookup_error(&err)?,
        }
        Ok(Flow::Continue)
    }

    fn update_student(&mut self) -> Result<Flow> {
        let raw = read_or_exit!(self.console, "Enter Student ID to update: ");
        let (mut id, mut student) = match self.registrar.search(&raw) {
            Ok(found) => found,
            Err(err) => {
                self.report_lookup_error(&err)?;
                return Ok(Flow::Continue);
            }
        };

        loop {
            self.console.say("\nStudent Found:")?;
            self.console.show_student(&id, &student)?;

            self.console.say("\nWhich field do you want to update?")?;
            self.console.say("1. Name")?;
            self.console.say("2. Age")?;
            self.console.say("3. Department")?;
            self.console.say("4. Student ID")?;
            self.console.say("5. Cancel")?;

            let choice = read_or_exit!(self.console, "Enter your choice (1-5): ");
            let (field, value) = match menu_choice(&choice) {
                Some(1) => (Field::Name, read_or_exit!(self.console, "Enter new Name: ")),
                Some(2) => (Field::Age, read_or_exit!(self.console, "Enter new Age: ")),
                Some(3) => {
                    let Some(dept) = self.choose_department("\nSelect new Department:")? else {
                        return Ok(Flow::Exit);
                    };
                    (Field::Department, dept.choice().to_string())
                }
                Some(4) => (
                    Field::Id,
                    read_or_exit!(self.console, "Enter new Student ID (CU-0000-YYYY): "),
                ),
                Some(5) => {
                    self.console.say("Update cancelled.")?;
                    return Ok(Flow::Continue);
                }
                _ => {
                    self.console.say("Invalid choice! Update cancelled.")?;
                    return Ok(Flow::Continue);
                }
            };

            match self.registrar.update(&id, field, &value) {
                Ok(updated) => {
                    debug!(id = %updated, field = %field, "Menu update applied");
                    id = updated;
                    student = self.registrar.get(&id)?;
                    self.console.say("Student record updated successfully!")?;
                }
                Err(
                    err @ (Error::InvalidFormat { .. } | Error::DuplicateId(_) | Error::NotFound(_)),
                ) => {
                    self.console.say(format!("{err}. Update cancelled."))?;
                    return Ok(Flow::Continue);
                }
                Err(err) => return Err(err),
            }

            let another = read_or_exit!(
                self.console,
                "\nDo you want to update another field for this student? (y/n): "
            );
            if !another.eq_ignore_ascii_case("y") {
                return Ok(Flow::Continue);
            }
        }
    }

    fn delete_student(&mut self) -> Result<Flow> {
        let raw = read_or_exit!(self.console, "Enter Student ID to delete: ");
        let result = StudentId::parse(&raw).and_then(|id| self.registrar.delete(&id));
        match result {
            Ok(_) => self.console.say("Student deleted successfully!")?,
            Err(err) => self.report_lookup_error(&err)?,
        }
        Ok(Flow::Continue)
    }

    /// Show the department list and re-prompt until a valid choice.
    ///
    /// Returns `None` at end of input.
    fn choose_department(&mut self, heading: &str) -> Result<Option<Department>> {
        self.console.say(heading)?;
        self.console.show_departments()?;
        loop {
            let Some(raw) = self.console.prompt("Enter choice number: ")? else {
                return Ok(None);
            };
            let choice = menu_choice(&raw).unwrap_or(0);
            if validate::is_valid_department(choice) {
                return Ok(Department::from_choice(choice));
            }
            self.console
                .say("Invalid choice! Enter a number corresponding to a department.")?;
        }
    }

    fn report_lookup_error(&mut self, err: &Error) -> Result<()> {
        match err {
            Error::InvalidFormat { .. } => self
                .console
                .say(format!("Invalid ID format! {ID_FORMAT_HINT}")),
            Error::NotFound(_) => self.console.say("Student not found!"),
            other => self.console.say(format!("Error: {other}")),
        }
    }
}

impl<S: RosterStore, R: BufRead, W: Write> Interface for Menu<'_, S, R, W> {
    fn name(&self) -> &'static str {
        "menu"
    }

    fn run(&mut self) -> Result<()> {
        debug!("Starting text menu");
        while self.main_menu()? == Flow::Continue {}
        Ok(())
    }
}
