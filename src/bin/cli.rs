//! PulseLake command-line interface
//!
//! `setup`, `validate`, and `cleanup` run the warehouse lifecycle against the
//! configured engine; `shell` opens an interactive statement session.

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use pulselake::config::WarehouseConfig;
use pulselake::engine::{Reply, SqlEngine, TcpEngine};
use pulselake::setup::Provisioner;

#[derive(Parser)]
#[command(
    name = "pulselake",
    about = "Provision, validate, and tear down the fitness lakehouse",
    version
)]
struct Cli {
    /// Path to the warehouse config file
    #[arg(long, default_value = "pulselake.json")]
    config: PathBuf,

    /// Target environment (dev, test, prod)
    #[arg(long)]
    env: Option<String>,

    /// Engine URL, overriding the config file
    #[arg(long)]
    url: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Create the tier databases and every warehouse object
    Setup,
    /// Check that every database, table, and view exists
    Validate,
    /// Drop the tier databases and remove the storage zones
    Cleanup,
    /// Open an interactive statement session against the engine
    Shell,
}

fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_target(false))
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .init();

    let cli = Cli::parse();
    let config = load_config(&cli)?;
    let engine = TcpEngine::connect(&config.engine_url)?;

    match cli.command {
        Commands::Setup => Provisioner::new(engine, config).setup()?,
        Commands::Validate => Provisioner::new(engine, config).validate()?,
        Commands::Cleanup => Provisioner::new(engine, config).cleanup()?,
        Commands::Shell => run_shell(engine, &config)?,
    }
    Ok(())
}

/// Load the config file and apply command-line overrides
fn load_config(cli: &Cli) -> Result<WarehouseConfig> {
    let mut config = WarehouseConfig::load(&cli.config)?;
    if let Some(env) = &cli.env {
        config = config.environment(env.parse()?);
    }
    if let Some(url) = &cli.url {
        config.engine_url = url.clone();
    }
    Ok(config)
}

/// Output format for shell results
#[derive(Debug, Clone, Copy, PartialEq)]
enum OutputFormat {
    Table,
    Json,
}

/// Print help message
fn print_help() {
    println!(
        r#"
Commands:
  .help              Show this help message
  .quit              Exit the shell
  .mode table|json   Switch result rendering

Anything else is sent to the engine as a single statement, e.g.:
  SHOW DATABASES IN `fitness-dev`
  SHOW TABLES IN `fitness-dev`.fitness_silver
"#
    );
}

/// Interactive statement loop against the engine session
fn run_shell(mut engine: TcpEngine, config: &WarehouseConfig) -> Result<()> {
    println!("Connected to {}", config.engine_url);
    println!("Catalog: {}", config.catalog_name());
    println!("Type '.help' for help, '.quit' to exit");

    let mut format = OutputFormat::Table;
    let mut rl = rustyline::DefaultEditor::new()?;

    loop {
        let line = match rl.readline("pulse> ") {
            Ok(line) => line,
            Err(rustyline::error::ReadlineError::Interrupted)
            | Err(rustyline::error::ReadlineError::Eof) => break,
            Err(e) => return Err(e.into()),
        };

        let statement = line.trim();
        if statement.is_empty() {
            continue;
        }
        let _ = rl.add_history_entry(statement);

        match statement {
            ".quit" | ".exit" => break,
            ".help" => {
                print_help();
                continue;
            }
            ".mode json" => {
                format = OutputFormat::Json;
                println!("Output mode set to JSON");
                continue;
            }
            ".mode table" => {
                format = OutputFormat::Table;
                println!("Output mode set to Table");
                continue;
            }
            _ => {}
        }

        if statement.starts_with('.') {
            eprintln!("Unknown command: {}", statement);
            eprintln!("Type '.help' for available commands.");
            continue;
        }

        match engine.execute(statement) {
            Ok(reply) => print_reply(&reply, format),
            Err(e) => eprintln!("Error: {}", e),
        }
    }

    println!("Goodbye!");
    Ok(())
}

/// Print one engine reply in the selected format
fn print_reply(reply: &Reply, format: OutputFormat) {
    if format == OutputFormat::Json {
        match serde_json::to_string(reply) {
            Ok(json) => println!("{}", json),
            Err(e) => eprintln!("Serialization error: {}", e),
        }
        return;
    }

    if let Some(ref msg) = reply.message {
        println!("{}", msg);
        return;
    }

    if reply.columns.is_empty() && reply.rows.is_empty() {
        if reply.affected_rows > 0 {
            println!("{} row(s) affected", reply.affected_rows);
        } else {
            println!("OK");
        }
        return;
    }

    print!("{}", format_table(reply));
}

/// Render a rowset reply as an ASCII table
fn format_table(reply: &Reply) -> String {
    // Stringify every cell once; column widths fall out of the rendered text.
    let cells: Vec<Vec<String>> = reply
        .rows
        .iter()
        .map(|row| row.iter().map(value_text).collect())
        .collect();

    let widths: Vec<usize> = reply
        .columns
        .iter()
        .enumerate()
        .map(|(i, name)| {
            cells
                .iter()
                .filter_map(|row| row.get(i))
                .map(|cell| cell.len())
                .fold(name.len(), usize::max)
        })
        .collect();

    let rule = format!(
        "+{}+\n",
        widths
            .iter()
            .map(|w| "-".repeat(w + 2))
            .collect::<Vec<_>>()
            .join("+")
    );

    let mut out = String::new();
    out.push_str(&rule);
    out.push_str(&table_line(&reply.columns, &widths));
    out.push_str(&rule);
    for row in &cells {
        out.push_str(&table_line(row, &widths));
    }
    if !cells.is_empty() {
        out.push_str(&rule);
    }
    out.push_str(&format!("{} row(s) returned\n", cells.len()));
    out
}

/// One padded table line; a row shorter than the header gets empty cells
fn table_line(cells: &[String], widths: &[usize]) -> String {
    let mut line = String::from("|");
    for (i, &w) in widths.iter().enumerate() {
        let cell = cells.get(i).map(String::as_str).unwrap_or("");
        line.push_str(&format!(" {:<w$} |", cell));
    }
    line.push('\n');
    line
}

fn value_text(value: &serde_json::Value) -> String {
    match value {
        serde_json::Value::String(s) => s.clone(),
        serde_json::Value::Null => "NULL".to_string(),
        other => other.to_string(),
    }
}
