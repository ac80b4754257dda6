//! Shelf CLI
//!
//! Command-line interface for Shelf - personal book collection tracking.

use std::fs::File;
use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing::info;
use tracing_subscriber::EnvFilter;

use shelf_core::{Config, Genre, Library, LibraryError, SearchField, StorageError};

mod commands;
mod output;
mod prompt;

use commands::book::ReadFilter;
use output::{Output, OutputFormat};

#[derive(Parser)]
#[command(name = "shelf")]
#[command(about = "Shelf - Personal book collection tracker")]
#[command(version)]
#[command(propagate_version = true)]
struct Cli {
    /// Output as JSON
    #[arg(long, global = true)]
    json: bool,

    /// Quiet mode - minimal output
    #[arg(short, long, global = true)]
    quiet: bool,

    /// Use this config file instead of the default
    #[arg(long, global = true, value_name = "PATH")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Add a book
    Add {
        /// Book title
        title: String,
        /// Author name
        author: String,
        /// Publication year
        #[arg(short, long)]
        year: i32,
        /// Genre (see `shelf genres`)
        #[arg(short, long, default_value = "Other")]
        genre: Genre,
        /// Mark the book as already read
        #[arg(short, long)]
        read: bool,
    },
    /// List books
    #[command(alias = "ls")]
    List {
        /// Only books that have been read
        #[arg(long, conflicts_with = "unread")]
        read: bool,
        /// Only books not yet read
        #[arg(long)]
        unread: bool,
    },
    /// Show one book
    Show {
        /// Position as shown by `shelf list`
        position: usize,
    },
    /// Remove a book
    #[command(alias = "rm")]
    Remove {
        /// Position as shown by `shelf list`
        position: usize,
        /// Don't ask for confirmation
        #[arg(short, long)]
        yes: bool,
    },
    /// Flip a book between read and unread
    Toggle {
        /// Position as shown by `shelf list`
        position: usize,
    },
    /// Search books
    Search {
        /// Text to look for (case-insensitive)
        term: String,
        /// Field to search: title, author or genre
        #[arg(short, long, default_value = "title")]
        by: SearchField,
    },
    /// Show library statistics
    Stats {
        /// Number of top authors to show
        #[arg(long, default_value_t = 5)]
        top: usize,
    },
    /// List available genres
    Genres,
    /// Show or set configuration
    Config {
        #[command(subcommand)]
        command: Option<ConfigCommands>,
    },
}

#[derive(Subcommand, Clone)]
enum ConfigCommands {
    /// Show current configuration
    Show,
    /// Set a configuration value
    Set {
        /// Configuration key (data_dir, library_file, log_file)
        key: String,
        /// Configuration value
        value: String,
    },
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    let output = Output::new(OutputFormat::from_flags(cli.json, cli.quiet));

    match run(cli, &output) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            report_error(&e, &output);
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli, output: &Output) -> Result<()> {
    let config_path = cli.config.as_ref();

    // Commands that don't need the library
    match &cli.command {
        Commands::Config { command } => {
            return handle_config_command(command.clone(), config_path, output);
        }
        Commands::Genres => return commands::book::genres(output),
        _ => {}
    }

    let config = Config::load_with_cli_override(config_path)?;
    init_logging(&config);

    let mut library = Library::open_with_config(&config)?;

    match cli.command {
        Commands::Add {
            title,
            author,
            year,
            genre,
            read,
        } => commands::book::add(&mut library, title, author, year, genre, read, output),
        Commands::List { read, unread } => {
            commands::book::list(&library, ReadFilter::from_flags(read, unread), output)
        }
        Commands::Show { position } => commands::book::show(&library, position, output),
        Commands::Remove { position, yes } => {
            commands::book::remove(&mut library, position, yes, output)
        }
        Commands::Toggle { position } => commands::book::toggle(&mut library, position, output),
        Commands::Search { term, by } => commands::book::search(&mut library, term, by, output),
        Commands::Stats { top } => commands::stats::show(&library, top, output),
        Commands::Genres | Commands::Config { .. } => unreachable!(), // Handled above
    }
}

fn handle_config_command(
    command: Option<ConfigCommands>,
    config_path: Option<&PathBuf>,
    output: &Output,
) -> Result<()> {
    match command {
        Some(ConfigCommands::Show) | None => commands::config::show(config_path, output),
        Some(ConfigCommands::Set { key, value }) => {
            commands::config::set(key, value, config_path, output)
        }
    }
}

/// Print an error with a recovery hint when one is known
fn report_error(error: &anyhow::Error, output: &Output) {
    let storage = storage_error(error);
    let suggestion = storage.and_then(StorageError::recovery_suggestion);
    let retry = storage.is_some_and(StorageError::is_recoverable);

    if output.is_json() {
        println!(
            "{}",
            serde_json::json!({
                "status": "error",
                "message": format!("{:#}", error),
                "suggestion": suggestion,
                "retry": retry
            })
        );
        return;
    }

    eprintln!("Error: {:#}", error);
    if let Some(hint) = suggestion {
        eprintln!("Hint: {}", hint);
    }
    if retry {
        eprintln!("The library file was left unchanged; run the command again once this is fixed.");
    }
}

/// The storage failure behind `error`, if there is one
fn storage_error(error: &anyhow::Error) -> Option<&StorageError> {
    error.chain().find_map(|e| match e.downcast_ref::<LibraryError>() {
        Some(LibraryError::Persistence(storage)) => Some(storage),
        _ => e.downcast_ref::<StorageError>(),
    })
}

/// Initialize logging
///
/// Only initializes if SHELF_LOG environment variable is set.
/// Logs to file (config.log_file or default {data_dir}/debug.log) so
/// command output on stdout stays clean.
fn init_logging(config: &Config) {
    let Ok(log_level) = std::env::var("SHELF_LOG") else {
        return;
    };

    let log_path = config.log_path();
    if let Some(parent) = log_path.parent() {
        let _ = std::fs::create_dir_all(parent);
    }

    let log_file = match File::create(&log_path) {
        Ok(f) => f,
        Err(e) => {
            eprintln!("Warning: Could not create log file {:?}: {}", log_path, e);
            return;
        }
    };

    let env_filter = EnvFilter::new(format!("shelf_core={},shelf={}", log_level, log_level));

    // Ignore error if already initialized
    let _ = tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .with_ansi(false)
        .with_writer(log_file)
        .try_init();

    info!("Logging initialized to {:?}", log_path);
}
