//! `rollbook` - CLI for the student record keeper
//!
//! This binary opens one of the interactive front ends, or runs a single
//! record operation for scripting.

#![warn(missing_debug_implementations)]
#![deny(unsafe_code)]

use std::io;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::debug;

use rollbook::cli::{
    AddCommand, Cli, Command, ConfigCommand, ListCommand, OutputFormat, ShowCommand,
    UpdateCommand,
};
use rollbook::config::FrontEnd;
use rollbook::frontend::{table, Console, FormView, Interface, Menu};
use rollbook::{init_logging, Config, Registrar, Storage, Student, StudentId};

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging based on verbosity
    init_logging(cli.verbosity());

    // Load configuration, then let --data-file win over it
    let mut config =
        Config::load_from(cli.config.clone()).context("failed to load configuration")?;
    if let Some(path) = cli.data_file.clone() {
        config.set_data_path(path);
    }

    let registrar = Registrar::new(Storage::new(config.data_path()));
    debug!(path = %registrar.store().path().display(), "Using roster document");

    match cli.command {
        None => handle_interactive(&registrar, &config, config.interface.default_front_end),
        Some(Command::Menu) => handle_interactive(&registrar, &config, FrontEnd::Menu),
        Some(Command::Form) => handle_interactive(&registrar, &config, FrontEnd::Form),
        Some(Command::Add(cmd)) => handle_add(&registrar, &cmd),
        Some(Command::List(cmd)) => handle_list(&registrar, &cmd),
        Some(Command::Show(cmd)) => handle_show(&registrar, &cmd),
        Some(Command::Update(cmd)) => handle_update(&registrar, &cmd),
        Some(Command::Delete(cmd)) => {
            let id = StudentId::parse(&cmd.id)?;
            registrar.delete(&id)?;
            println!("Deleted {id}");
            Ok(())
        }
        Some(Command::Status(cmd)) => handle_status(&registrar, cmd.json),
        Some(Command::Config(cmd)) => handle_config(&config, cmd),
    }
}

fn handle_interactive(
    registrar: &Registrar<Storage>,
    config: &Config,
    front_end: FrontEnd,
) -> Result<()> {
    let stdin = io::stdin();
    let console = Console::new(stdin.lock(), io::stdout());

    let mut interface: Box<dyn Interface + '_> = match front_end {
        FrontEnd::Menu => Box::new(Menu::new(registrar, console)),
        FrontEnd::Form => Box::new(
            FormView::new(registrar, console).confirm_delete(config.interface.confirm_delete),
        ),
    };

    debug!(front_end = interface.name(), "Starting interactive session");
    interface
        .run()
        .with_context(|| format!("{} front end failed", interface.name()))
}

fn handle_add(registrar: &Registrar<Storage>, cmd: &AddCommand) -> Result<()> {
    let id = StudentId::parse(&cmd.id)?;
    let student = Student::from_input(&cmd.name, &cmd.age, &cmd.department)?;
    registrar.add(id.clone(), student)?;
    println!("Added {id}");
    Ok(())
}

fn handle_list(registrar: &Registrar<Storage>, cmd: &ListCommand) -> Result<()> {
    let rows = registrar.list();
    match cmd.format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&registrar.roster())?);
        }
        OutputFormat::Table => print!("{}", table::render(&rows, None)),
        OutputFormat::Plain => {
            if rows.is_empty() {
                println!("No student records found.");
            }
            for (id, student) in &rows {
                println!(
                    "{id}\t{}\t{}\t{}",
                    student.name, student.age, student.department
                );
            }
        }
    }
    Ok(())
}

fn handle_show(registrar: &Registrar<Storage>, cmd: &ShowCommand) -> Result<()> {
    let (id, student) = registrar.search(&cmd.id)?;
    if cmd.json {
        let mut doc = serde_json::Map::new();
        doc.insert(id.to_string(), serde_json::to_value(&student)?);
        println!("{}", serde_json::to_string_pretty(&doc)?);
    } else {
        println!("Student ID: {id}");
        println!("Name:       {}", student.name);
        println!("Age:        {}", student.age);
        println!("Department: {}", student.department);
    }
    Ok(())
}

fn handle_update(registrar: &Registrar<Storage>, cmd: &UpdateCommand) -> Result<()> {
    let id = StudentId::parse(&cmd.id)?;
    let new_id = registrar.update(&id, cmd.field.into(), &cmd.value)?;
    if new_id == id {
        println!("Updated {id}");
    } else {
        println!("Renamed {id} to {new_id}");
    }
    Ok(())
}

fn handle_status(registrar: &Registrar<Storage>, json: bool) -> Result<()> {
    let stats = registrar.store().stats();
    if json {
        let by_department: serde_json::Map<String, serde_json::Value> = stats
            .by_department
            .iter()
            .map(|(dept, count)| (dept.to_string(), (*count).into()))
            .collect();
        let status = serde_json::json!({
            "data_path": stats.path,
            "exists": stats.exists,
            "total_records": stats.total_records,
            "unreadable_records": stats.unreadable_records,
            "file_size_bytes": stats.file_size_bytes,
            "by_department": by_department,
        });
        println!("{}", serde_json::to_string_pretty(&status)?);
    } else {
        println!("rollbook status");
        println!("---------------");
        println!("Records file:  {}", stats.path.display());
        if !stats.exists {
            println!("               (not created yet)");
        }
        println!("Records:       {}", stats.total_records);
        if stats.unreadable_records > 0 {
            println!(
                "Unreadable:    {} (kept as is; fix them in the file)",
                stats.unreadable_records
            );
        }
        println!("File size:     {} bytes", stats.file_size_bytes);
        if stats.total_records > 0 {
            println!();
            for (dept, count) in &stats.by_department {
                println!("  {:<18} {count}", dept.name());
            }
        }
    }
    Ok(())
}

fn handle_config(config: &Config, cmd: ConfigCommand) -> Result<()> {
    match cmd {
        ConfigCommand::Show { json } => {
            if json {
                println!("{}", serde_json::to_string_pretty(config)?);
            } else {
                println!("Current Configuration");
                println!("=====================");
                println!();
                println!("[Storage]");
                println!("  Data path:          {}", config.data_path().display());
                println!();
                println!("[Interface]");
                println!(
                    "  Default front end:  {:?}",
                    config.interface.default_front_end
                );
                println!("  Confirm delete:     {}", config.interface.confirm_delete);
            }
        }
        ConfigCommand::Path => {
            println!("{}", Config::default_config_path().display());
        }
        ConfigCommand::Validate { file } => {
            let path = file.unwrap_or_else(Config::default_config_path);
            println!("Validating configuration: {}", path.display());
            match Config::load_from(Some(path)) {
                Ok(_) => println!("Configuration is valid."),
                Err(e) => println!("Configuration error: {e}"),
            }
        }
    }
    Ok(())
}
