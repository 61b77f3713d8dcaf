//! `garden` command-line front end for the garden store.
//!
//! Prints JSON (or CSV) on stdout. Errors go to stderr as `ERROR:<message>`
//! with exit code 1.

use clap::{Parser, Subcommand, ValueEnum};
use garden_core::service::csv::{plants_to_csv, seeds_to_csv};
use garden_core::{
    default_log_level, init_logging, Bounds, GardenStore, PlantCategory, PlantFilter,
    RecordRepository,
};
use log::info;
use std::path::PathBuf;
use std::process;

/// Garden planner store: stats, export/import, backup/restore, CSV and search.
#[derive(Parser)]
#[command(name = "garden", version, about)]
struct Cli {
    /// Path to the SQLite database file
    #[arg(long, default_value = "garden.sqlite3")]
    db: PathBuf,

    /// Absolute directory for rotated log files (logging is off when unset)
    #[arg(long)]
    log_dir: Option<PathBuf>,

    /// trace|debug|info|warn|error (defaults by build mode)
    #[arg(long)]
    log_level: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Clone, Copy, ValueEnum)]
enum CsvTable {
    Plants,
    Seeds,
}

#[derive(Subcommand)]
enum Command {
    /// Show record counts per collection
    Stats,

    /// Export a full snapshot as JSON
    Export {
        /// Write to a file instead of stdout
        #[arg(long)]
        out: Option<PathBuf>,
    },

    /// Create a backup snapshot
    Backup {
        /// Leave user preferences out of the backup
        #[arg(long)]
        no_settings: bool,
        #[arg(long)]
        out: Option<PathBuf>,
    },

    /// Import a snapshot file, merging by id
    Import {
        file: PathBuf,
    },

    /// Restore a backup file
    Restore {
        file: PathBuf,
        /// Delete all existing data first
        #[arg(long)]
        clear: bool,
    },

    /// Export plants or seed inventory as CSV
    Csv {
        table: CsvTable,
        #[arg(long)]
        out: Option<PathBuf>,
    },

    /// Search stored plants by name, variety or scientific name
    Search {
        text: Option<String>,
        /// Category filter, repeatable (e.g. --category herb)
        #[arg(long = "category", value_parser = parse_category)]
        categories: Vec<PlantCategory>,
        #[arg(long)]
        min_days: Option<u32>,
        #[arg(long)]
        max_days: Option<u32>,
    },

    /// Delete every record in every collection
    Clear {
        /// Confirm the deletion
        #[arg(long)]
        yes: bool,
    },
}

fn parse_category(s: &str) -> Result<PlantCategory, String> {
    serde_json::from_value(serde_json::Value::String(s.to_string()))
        .map_err(|_| format!("unknown plant category '{s}'"))
}

fn main() {
    let cli = Cli::parse();

    if let Err(e) = run(cli) {
        eprintln!("ERROR:{e}");
        process::exit(1);
    }
}

fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    if let Some(log_dir) = &cli.log_dir {
        let level = cli.log_level.as_deref().unwrap_or(default_log_level());
        init_logging(level, log_dir)?;
    }

    let mut store = GardenStore::open(&cli.db)?;
    info!(
        "event=cli_command module=cli status=start db={}",
        cli.db.display()
    );

    match cli.command {
        Command::Stats => {
            let counts = store.transfer().stats()?;
            println!("{}", serde_json::to_string_pretty(&counts)?);
        }

        Command::Export { out } => {
            let json = store.transfer().export_json()?;
            write_output(out, &json)?;
        }

        Command::Backup { no_settings, out } => {
            let json = store.transfer().create_backup(!no_settings)?;
            write_output(out, &json)?;
        }

        Command::Import { file } => {
            let text = std::fs::read_to_string(&file)?;
            let result = store.transfer().import_json(&text);
            println!("{}", serde_json::to_string_pretty(&result)?);
            if !result.success {
                return Err(result.message.into());
            }
        }

        Command::Restore { file, clear } => {
            let text = std::fs::read_to_string(&file)?;
            let result = store.transfer().restore_from_backup(&text, clear)?;
            println!("{}", serde_json::to_string_pretty(&result)?);
            if !result.success {
                return Err(result.message.into());
            }
        }

        Command::Csv { table, out } => {
            let csv = match table {
                CsvTable::Plants => plants_to_csv(&store.plants().list()?),
                CsvTable::Seeds => seeds_to_csv(&store.seeds().list()?),
            };
            write_output(out, &csv)?;
        }

        Command::Search {
            text,
            categories,
            min_days,
            max_days,
        } => {
            let filter = PlantFilter {
                category: categories,
                days_to_maturity: Bounds {
                    min: min_days,
                    max: max_days,
                },
                ..PlantFilter::default()
            };
            let plants = store.search_plants(text.as_deref().unwrap_or(""), &filter)?;
            println!("{}", serde_json::to_string_pretty(&plants)?);
        }

        Command::Clear { yes } => {
            if !yes {
                return Err("refusing to clear without --yes".into());
            }
            store.transfer().clear_all_data()?;
            println!("{}", serde_json::json!({ "ok": true }));
        }
    }

    store.close()?;
    Ok(())
}

fn write_output(out: Option<PathBuf>, content: &str) -> Result<(), Box<dyn std::error::Error>> {
    match out {
        Some(path) => std::fs::write(path, content)?,
        None => println!("{content}"),
    }
    Ok(())
}
