use std::io::{self, Write};
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing::debug;
use tracing_subscriber::{EnvFilter, FmtSubscriber};

use geocatalog_cli::commands::{
    self, city::CityCommand, nearby::NearbyArgs, place::PlaceCommand, state::StateCommand, Printer,
};
use geocatalog_cli::output::OutputFormat;
use geocatalog_cli::terminal::ColorPalette;
use geocatalog_lib::{Catalog, StorePaths};

#[derive(Parser, Debug)]
#[command(author, version, about = "Geo-tagged place catalog utilities")]
struct Cli {
    /// Path of the states/cities database.
    #[arg(long, global = true, env = "GEOCATALOG_SQLITE_PATH")]
    sqlite_path: Option<PathBuf>,

    /// Path of the place document database.
    #[arg(long, global = true, env = "GEOCATALOG_DOCUMENTS_PATH")]
    documents_path: Option<PathBuf>,

    /// Output format.
    #[arg(long, global = true, value_enum, default_value_t = OutputFormat::Text)]
    format: OutputFormat,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Manage states.
    #[command(subcommand)]
    State(StateCommand),
    /// Manage cities.
    #[command(subcommand)]
    City(CityCommand),
    /// Manage places.
    #[command(subcommand)]
    Place(PlaceCommand),
    /// List places within a radius of a point, closest first.
    Nearby(NearbyArgs),
}

impl Command {
    /// Listing and searching never create the databases.
    fn is_read_only(&self) -> bool {
        match self {
            Command::State(cmd) => matches!(cmd, StateCommand::List),
            Command::City(cmd) => matches!(cmd, CityCommand::List),
            Command::Place(cmd) => matches!(cmd, PlaceCommand::List { .. }),
            Command::Nearby(_) => true,
        }
    }
}

fn main() -> Result<()> {
    init_tracing();
    let cli = Cli::parse();

    let paths = resolve_paths(cli.sqlite_path, cli.documents_path)?;
    let read_only = cli.command.is_read_only();
    debug!(
        sqlite = %paths.sqlite.display(),
        documents = %paths.documents.display(),
        read_only,
        "opening catalog"
    );
    let opened = if read_only {
        Catalog::open_existing(&paths)
    } else {
        Catalog::open(&paths)
    };
    let catalog = opened.with_context(|| {
        format!(
            "failed to open catalog at {} and {}",
            paths.sqlite.display(),
            paths.documents.display()
        )
    })?;

    let printer = Printer::new(cli.format, ColorPalette::detect());
    let stdout = io::stdout();
    let mut out = stdout.lock();

    match cli.command {
        Command::State(cmd) => commands::state::run(&catalog, cmd, &printer, &mut out)?,
        Command::City(cmd) => commands::city::run(&catalog, cmd, &printer, &mut out)?,
        Command::Place(cmd) => commands::place::run(&catalog, cmd, &printer, &mut out)?,
        Command::Nearby(args) => commands::nearby::run(&catalog, args, &printer, &mut out)?,
    }

    out.flush()?;
    Ok(())
}

/// Fill whichever database path was not given with the platform default.
fn resolve_paths(sqlite: Option<PathBuf>, documents: Option<PathBuf>) -> Result<StorePaths> {
    if let (Some(sqlite), Some(documents)) = (&sqlite, &documents) {
        return Ok(StorePaths::new(sqlite, documents));
    }
    let defaults =
        StorePaths::platform_default().context("failed to resolve the default data directory")?;
    Ok(StorePaths::new(
        sqlite.unwrap_or(defaults.sqlite),
        documents.unwrap_or(defaults.documents),
    ))
}

fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(env_filter)
        .with_writer(io::stderr)
        .finish();

    let _ = tracing::subscriber::set_global_default(subscriber);
}
