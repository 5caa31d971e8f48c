//! Form-and-table front end.
//!
//! The operator fills labelled fields (ID, Name, Age, Department), then runs
//! an action: `add` registers the student, `delete` removes the selected
//! table row, `clear` resets the fields. The table is redrawn from storage
//! after every change.

use std::io::{BufRead, Write};

use tracing::debug;

use super::{table, Console, Interface};
use crate::error::{Error, Result};
use crate::registrar::Registrar;
use crate::storage::RosterStore;
use crate::student::{Department, Student, StudentId};
use crate::validate;

const PROMPT: &str = "form> ";
const DEPARTMENT_PLACEHOLDER: &str = "Select Department";

const HELP: &str = "\
Commands:
  id <CU-0000-2026>     set the Student ID field
  name <full name>      set the Full Name field
  age <5-100>           set the Age field
  dept <1-7 | name>     choose the Department
  select <row | ID>     select a table row
  add                   register the student in the fields
  delete                delete the selected row
  clear                 clear all fields
  refresh               redraw the form and table
  help                  show this help
  quit                  leave the form";

/// The editable fields of the form.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormFields {
    /// Raw Student ID input.
    pub id: String,
    /// Raw Full Name input.
    pub name: String,
    /// Raw Age input.
    pub age: String,
    /// Selected department, if any.
    pub department: Option<Department>,
}

/// One line of operator input, parsed.
#[derive(Debug, Clone, PartialEq, Eq)]
enum Command {
    SetId(String),
    SetName(String),
    SetAge(String),
    SetDepartment(String),
    Select(String),
    Add,
    Delete,
    Clear,
    Refresh,
    Help,
    Quit,
    Unknown(String),
}

impl Command {
    fn parse(line: &str) -> Self {
        let (verb, rest) = line
            .split_once(char::is_whitespace)
            .map_or((line, ""), |(verb, rest)| (verb, rest.trim()));
        let value = rest.to_string();

        match verb.to_ascii_lowercase().as_str() {
            "id" => Self::SetId(value),
            "name" => Self::SetName(value),
            "age" => Self::SetAge(value),
            "dept" | "department" => Self::SetDepartment(value),
            "select" => Self::Select(value),
            "add" => Self::Add,
            "delete" => Self::Delete,
            "clear" => Self::Clear,
            "refresh" | "" => Self::Refresh,
            "help" | "?" => Self::Help,
            "quit" | "exit" => Self::Quit,
            _ => Self::Unknown(line.to_string()),
        }
    }
}

/// The form-and-table view.
#[derive(Debug)]
pub struct FormView<'a, S, R, W> {
    registrar: &'a Registrar<S>,
    console: Console<R, W>,
    fields: FormFields,
    selected: Option<StudentId>,
    confirm_delete: bool,
}

impl<'a, S: RosterStore, R: BufRead, W: Write> FormView<'a, S, R, W> {
    /// Create a form view over `registrar` talking to `console`.
    pub fn new(registrar: &'a Registrar<S>, console: Console<R, W>) -> Self {
        Self {
            registrar,
            console,
            fields: FormFields::default(),
            selected: None,
            confirm_delete: true,
        }
    }

    /// Ask before deleting the selected row (on by default).
    #[must_use]
    pub fn confirm_delete(mut self, confirm: bool) -> Self {
        self.confirm_delete = confirm;
        self
    }

    /// Current field contents.
    pub fn fields(&self) -> &FormFields {
        &self.fields
    }

    /// Consume the view, returning the console.
    pub fn into_console(self) -> Console<R, W> {
        self.console
    }

    fn render(&mut self) -> Result<()> {
        self.render_fields()?;
        let rows = self.registrar.list();
        let selected = self.selected.as_ref();
        self.console.say(table::render(&rows, selected))
    }

    fn render_fields(&mut self) -> Result<()> {
        let department = self
            .fields
            .department
            .map_or(DEPARTMENT_PLACEHOLDER, Department::name);

        self.console.say("")?;
        self.console.say("====== Student Management System ======")?;
        self.console.say(" Register New Student")?;
        self.console.say(format!(
            "   ID (CU-0000-2026): [{}]   Full Name: [{}]",
            self.fields.id, self.fields.name
        ))?;
        self.console.say(format!(
            "   Age: [{}]   Department: [{department}]",
            self.fields.age
        ))?;
        self.console
            .say(" Actions: add | delete | clear   (type 'help' for all commands)")
    }

    fn set_department(&mut self, value: &str) -> Result<()> {
        match validate::parse_department(value) {
            Ok(dept) => {
                self.fields.department = Some(dept);
                self.render_fields()
            }
            Err(err) => {
                self.console.say(format!("Error: {err}"))?;
                self.console.show_departments()
            }
        }
    }

    fn select(&mut self, target: &str) -> Result<()> {
        let rows = self.registrar.list();
        let by_row = target
            .parse::<usize>()
            .ok()
            .and_then(|n| n.checked_sub(1))
            .and_then(|index| rows.get(index))
            .map(|(id, _)| id.clone());
        let by_id = StudentId::parse(target)
            .ok()
            .filter(|id| rows.iter().any(|(row_id, _)| row_id == id));

        match by_row.or(by_id) {
            Some(id) => {
                self.selected = Some(id);
                self.render()
            }
            None => self
                .console
                .say(format!("Warning: no row matches {target:?}")),
        }
    }

    fn add(&mut self) -> Result<()> {
        let Ok(id) = StudentId::parse(&self.fields.id) else {
            return self
                .console
                .say("Error: ID must follow format: CU-0000-2026");
        };

        if self.registrar.roster().contains(&id) {
            return self.console.say(format!("Error: ID {id} already exists!"));
        }

        let Some(department) = self.fields.department else {
            return self.console.say("Error: Please fill all fields!");
        };
        if self.fields.name.is_empty() || self.fields.age.is_empty() {
            return self.console.say("Error: Please fill all fields!");
        }

        let fields = &self.fields;
        let student = match Student::from_input(&fields.name, &fields.age, department.name()) {
            Ok(student) => student,
            Err(err) => return self.console.say(format!("Error: {err}")),
        };

        match self.registrar.add(id, student) {
            Ok(()) => {
                self.fields = FormFields::default();
                self.render()?;
                self.console.say("Success: Student Added!")
            }
            Err(err @ Error::DuplicateId(_)) => self.console.say(format!("Error: {err}")),
            Err(err) => Err(err),
        }
    }

    /// Returns `false` if input ended while asking for confirmation.
    fn delete(&mut self) -> Result<bool> {
        let Some(id) = self.selected.clone() else {
            self.console.say("Warning: Select a row first!")?;
            return Ok(true);
        };

        if self.confirm_delete {
            let Some(answer) = self.console.prompt(&format!("Delete {id}? (y/n): "))? else {
                return Ok(false);
            };
            if !answer.eq_ignore_ascii_case("y") {
                return Ok(true);
            }
        }

        match self.registrar.delete(&id) {
            Ok(_) => {}
            Err(err @ Error::NotFound(_)) => self.console.say(format!("Error: {err}"))?,
            Err(err) => return Err(err),
        }
        self.selected = None;
        self.render()?;
        Ok(true)
    }

    fn clear(&mut self) -> Result<()> {
        self.fields = FormFields::default();
        self.render_fields()
    }

    /// Handle one command. Returns `false` when the form should close.
    fn handle(&mut self, command: Command) -> Result<bool> {
        match command {
            Command::SetId(value) => {
                self.fields.id = value;
                self.render_fields()?;
            }
            Command::SetName(value) => {
                self.fields.name = value;
                self.render_fields()?;
            }
            Command::SetAge(value) => {
                self.fields.age = value;
                self.render_fields()?;
            }
            Command::SetDepartment(value) => self.set_department(&value)?,
            Command::Select(target) => self.select(&target)?,
            Command::Add => self.add()?,
            Command::Delete => return self.delete(),
            Command::Clear => self.clear()?,
            Command::Refresh => self.render()?,
            Command::Help => self.console.say(HELP)?,
            Command::Quit => return Ok(false),
            Command::Unknown(line) => {
                self.console
                    .say(format!("Unknown command {line:?}. Type 'help' for commands."))?;
            }
        }
        Ok(true)
    }
}

impl<S: RosterStore, R: BufRead, W: Write> Interface for FormView<'_, S, R, W> {
    fn name(&self) -> &'static str {
        "form"
    }

    fn run(&mut self) -> Result<()> {
        debug!("Starting form view");
        self.render()?;
        while let Some(line) = self.console.prompt(PROMPT)? {
            if !self.handle(Command::parse(&line))? {
                break;
            }
        }
        Ok(())
    }
}
