//! gridpad: headless front end over the workbook store.
//!
//! Usage:
//!   gridpad import data.csv other.tsv --show
//!   gridpad import data.csv --activate --select B2
//!   gridpad ask "analyze this dataset" --file data.csv

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use gridpad_app::{Command, Store};
use gridpad_config::Settings;
use gridpad_core::parse_cell_address;

const EXIT_SUCCESS: u8 = 0;
const EXIT_ERROR: u8 = 1;
const EXIT_USAGE: u8 = 2;

/// Environment variable holding the log filter, e.g. `debug` or `gridpad_io=trace`.
const LOG_ENV: &str = "GRIDPAD_LOG";

#[derive(Parser)]
#[command(name = "gridpad")]
#[command(about = "Multi-sheet grid editor with file import and a keyword assistant (headless)")]
#[command(version)]
struct Cli {
    /// Settings file (defaults to the platform config directory)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Import CSV/TSV/Excel files as new sheets
    Import {
        /// Files to import
        #[arg(required = true)]
        files: Vec<PathBuf>,

        /// Switch to the first imported sheet
        #[arg(long)]
        activate: bool,

        /// Select a cell on the active sheet and print it (e.g. B2)
        #[arg(long)]
        select: Option<String>,

        /// Print the active sheet's stored values
        #[arg(long)]
        show: bool,
    },

    /// Ask the assistant about the active sheet
    Ask {
        /// Message to send
        message: String,

        /// Files to upload first; the first imported sheet becomes active
        #[arg(long = "file")]
        files: Vec<PathBuf>,

        /// Reply immediately instead of after the configured delay
        #[arg(long)]
        no_delay: bool,
    },
}

#[derive(Debug)]
struct CliError {
    code: u8,
    message: String,
}

impl CliError {
    fn usage(msg: impl Into<String>) -> Self {
        Self {
            code: EXIT_USAGE,
            message: msg.into(),
        }
    }

    fn failed(msg: impl Into<String>) -> Self {
        Self {
            code: EXIT_ERROR,
            message: msg.into(),
        }
    }
}

impl From<gridpad_app::StoreError> for CliError {
    fn from(e: gridpad_app::StoreError) -> Self {
        CliError::failed(e.to_string())
    }
}

/// Log filter from `GRIDPAD_LOG`; missing or malformed values mean `warn`.
fn log_filter(value: Option<&str>) -> EnvFilter {
    value
        .and_then(|v| EnvFilter::try_new(v.trim()).ok())
        .unwrap_or_else(|| EnvFilter::new("warn"))
}

fn main() -> ExitCode {
    // `log` records from the library crates are bridged into the subscriber
    tracing_subscriber::fmt()
        .with_env_filter(log_filter(std::env::var(LOG_ENV).ok().as_deref()))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let settings = match &cli.config {
        Some(path) => Settings::load_from(path),
        None => Settings::load(),
    };

    let result = match cli.command {
        Commands::Import {
            files,
            activate,
            select,
            show,
        } => cmd_import(settings, files, activate, select, show),
        Commands::Ask {
            message,
            files,
            no_delay,
        } => cmd_ask(settings, message, files, no_delay),
    };

    match result {
        Ok(()) => ExitCode::from(EXIT_SUCCESS),
        Err(CliError { code, message }) => {
            eprintln!("error: {}", message);
            ExitCode::from(code)
        }
    }
}

fn cmd_import(
    mut settings: Settings,
    files: Vec<PathBuf>,
    activate: bool,
    select: Option<String>,
    show: bool,
) -> Result<(), CliError> {
    let target = match select.as_deref() {
        Some(text) => Some(
            parse_cell_address(text)
                .ok_or_else(|| CliError::usage(format!("invalid cell address: {}", text)))?,
        ),
        None => None,
    };
    if activate {
        settings.activate_first_imported_sheet = true;
    }

    let mut store = Store::new(settings);
    import_paths(&mut store, files)?;
    print_notifications(&mut store);
    print_sheets(&store);

    if let Some((row, col)) = target {
        store.dispatch(Command::Select { row, col })?;
        let cell = store.workbook().cell(row, col);
        println!("{}: {}", gridpad_core::cell_address(row, col), cell.edit_text());
    }
    if show {
        print_active_sheet(&store);
    }
    Ok(())
}

fn cmd_ask(
    mut settings: Settings,
    message: String,
    files: Vec<PathBuf>,
    no_delay: bool,
) -> Result<(), CliError> {
    if no_delay {
        settings.response_delay_ms = 0;
    }
    settings.activate_first_imported_sheet = true;

    let mut store = Store::new(settings);
    if !files.is_empty() {
        import_paths(&mut store, files)?;
        print_notifications(&mut store);
    }

    let reply = smol::block_on(store.ask(&message))?;
    println!("{}", reply);
    Ok(())
}

fn import_paths(store: &mut Store, files: Vec<PathBuf>) -> Result<(), CliError> {
    let job = store.begin_import_paths(files);
    let (ticket, report) = smol::block_on(job.run());
    store.complete_import(ticket, report)?;
    Ok(())
}

fn print_notifications(store: &mut Store) {
    for notification in store.take_notifications() {
        println!("{}", notification);
    }
}

fn print_sheets(store: &Store) {
    let wb = store.workbook();
    let active = wb.active_sheet_id();
    for sheet in wb.sheets() {
        let marker = if sheet.id == active { "*" } else { " " };
        println!(
            "{} {}\t{}\t{}x{}",
            marker,
            sheet.id,
            sheet.name,
            sheet.grid.stored_rows(),
            sheet.grid.stored_cols()
        );
    }
}

fn print_active_sheet(store: &Store) {
    for row in store.workbook().active_sheet().grid.to_scalars() {
        let line: Vec<String> = row.iter().map(|v| v.to_string()).collect();
        println!("{}", line.join("\t"));
    }
}
