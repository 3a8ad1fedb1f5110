//! `roster` - CLI for the student roster
//!
//! This binary is the presentation layer: it parses arguments, asks for
//! confirmation before destructive actions, and prints results. All record
//! handling goes through [`roster::Store`].

#![warn(missing_debug_implementations)]
#![deny(unsafe_code)]

use std::fs::File;
use std::io::{self, BufReader};
use std::process::ExitCode;

use clap::Parser;

use roster::analytics::{bottom_performers, top_performers};
use roster::cli::{render, Cli, Command, ConfigCommand, OutputFormat};
use roster::{init_logging, Config, LoadStatus, Store};

type CliResult = Result<ExitCode, Box<dyn std::error::Error>>;

fn main() -> CliResult {
    let cli = Cli::parse();

    // Initialize logging based on verbosity
    init_logging(cli.verbosity());

    // Load configuration
    let config = Config::load_from(cli.config.clone())?;
    let store = Store::new(cli.data.clone().unwrap_or_else(|| config.data_path()));

    match cli.command {
        Command::Add(cmd) => {
            let student = cmd.to_student();
            if store.add(student.clone())? {
                println!("Student added: {}", render::plain(&student));
                Ok(ExitCode::SUCCESS)
            } else {
                eprintln!(
                    "Student ID {} already exists. Use a unique ID or update the existing record.",
                    student.id
                );
                Ok(ExitCode::FAILURE)
            }
        }
        Command::List(cmd) => handle_list(&store, cmd.format),
        Command::Show(cmd) => match store.get(cmd.id) {
            Some(student) => {
                print!("{}", render::students(&[student], cmd.format)?);
                Ok(ExitCode::SUCCESS)
            }
            None => {
                eprintln!("No student with ID {}.", cmd.id);
                Ok(ExitCode::FAILURE)
            }
        },
        Command::Update(cmd) => {
            if store.update(cmd.id, &cmd.to_update())? {
                println!("Student {} updated.", cmd.id);
                Ok(ExitCode::SUCCESS)
            } else {
                eprintln!("Failed to update student: no student with ID {}.", cmd.id);
                Ok(ExitCode::FAILURE)
            }
        }
        Command::Delete(cmd) => handle_delete(&store, cmd.id, cmd.yes),
        Command::Search(cmd) => {
            let results = store.search(&cmd.query);
            if results.is_empty() && cmd.format != OutputFormat::Json {
                println!("No matching students.");
            } else {
                print!("{}", render::students(&results, cmd.format)?);
            }
            Ok(ExitCode::SUCCESS)
        }
        Command::Stats(cmd) => handle_stats(&store, &config, cmd.json),
        Command::Dashboard => handle_dashboard(&store, &config),
        Command::Import(cmd) => handle_import(&store, &cmd.file),
        Command::Export(cmd) => {
            let count = match &cmd.output {
                Some(path) => store.export(File::create(path)?)?,
                None => store.export(io::stdout().lock())?,
            };
            if let Some(path) = &cmd.output {
                println!("Exported {count} students to {}", path.display());
            }
            Ok(ExitCode::SUCCESS)
        }
        Command::Config(config_cmd) => handle_config(&config, config_cmd),
    }
}

fn handle_list(store: &Store, format: OutputFormat) -> CliResult {
    let loaded = store.load_with_status();
    if let LoadStatus::Unparseable { reason } = &loaded.status {
        eprintln!("Warning: {} could not be read ({reason}).", store.path().display());
    }
    if loaded.students.is_empty() && format != OutputFormat::Json {
        println!("No student records found. Add students or import a CSV file.");
    } else {
        print!("{}", render::students(&loaded.students, format)?);
    }
    Ok(ExitCode::SUCCESS)
}

fn handle_delete(store: &Store, id: i64, yes: bool) -> CliResult {
    let Some(student) = store.get(id) else {
        eprintln!("Failed to delete student: no student with ID {id}.");
        return Ok(ExitCode::FAILURE);
    };

    if !yes {
        println!("This will delete {}", render::plain(&student));
        println!("Use --yes to confirm.");
        return Ok(ExitCode::SUCCESS);
    }

    if store.delete(id)? {
        println!("Student {id} deleted.");
        Ok(ExitCode::SUCCESS)
    } else {
        eprintln!("Failed to delete student: no student with ID {id}.");
        Ok(ExitCode::FAILURE)
    }
}

fn handle_stats(store: &Store, config: &Config, json: bool) -> CliResult {
    let Some(stats) = store.analyze_with_threshold(config.analytics.failing_threshold) else {
        println!("No student data to analyze.");
        return Ok(ExitCode::SUCCESS);
    };

    if json {
        println!("{}", serde_json::to_string_pretty(&stats)?);
    } else {
        print!("{}", render::stats(&stats));
    }
    Ok(ExitCode::SUCCESS)
}

fn handle_dashboard(store: &Store, config: &Config) -> CliResult {
    let students = store.load();
    let Some(stats) =
        roster::analytics::analyze_with_threshold(&students, config.analytics.failing_threshold)
    else {
        println!("No student records found. Add students or import a CSV file.");
        return Ok(ExitCode::SUCCESS);
    };

    let n = config.analytics.top_count;
    println!("Student Record Dashboard");
    println!("========================");
    println!();
    println!("Total students:        {}", stats.total);
    println!("Average marks:         {:.2}", stats.average);
    println!(
        "Failing (<{}):          {}",
        config.analytics.failing_threshold, stats.failing
    );
    println!();
    println!("Top {n}");
    print!("{}", render::table(&top_performers(&students, n)));
    println!();
    println!("Bottom {n}");
    print!("{}", render::table(&bottom_performers(&students, n)));
    println!();
    println!("Grade distribution");
    for (grade, count) in &stats.grade_counts {
        println!("  {grade}: {}", "#".repeat(*count));
    }
    Ok(ExitCode::SUCCESS)
}

fn handle_import(store: &Store, path: &std::path::Path) -> CliResult {
    let file = match File::open(path) {
        Ok(file) => file,
        Err(e) => {
            eprintln!("Failed to import: cannot open {}: {e}", path.display());
            return Ok(ExitCode::FAILURE);
        }
    };

    match store.import(BufReader::new(file)) {
        Ok(summary) => {
            println!(
                "Imported {} rows ({} replaced existing IDs). {} students stored.",
                summary.imported, summary.replaced, summary.total
            );
            Ok(ExitCode::SUCCESS)
        }
        Err(e) => {
            eprintln!("Failed to import: {e}");
            Ok(ExitCode::FAILURE)
        }
    }
}

fn handle_config(config: &Config, cmd: ConfigCommand) -> CliResult {
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
                println!("[Analytics]");
                println!(
                    "  Failing threshold:  {}",
                    config.analytics.failing_threshold
                );
                println!("  Top count:          {}", config.analytics.top_count);
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
                Err(e) => {
                    println!("Configuration error: {e}");
                    return Ok(ExitCode::FAILURE);
                }
            }
        }
    }
    Ok(ExitCode::SUCCESS)
}
