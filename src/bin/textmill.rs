//! textmill - rewrites the text files of a directory and stores word statistics.
//!
//! Usage:
//!   textmill ./texts        # process every file directly inside ./texts
//!   textmill --1:10         # top 10 words per file  -> TopWords.csv
//!   textmill --2:500        # rolling char count     -> RollingCharCount.csv
//!   textmill --3            # char count by words    -> CharCountByWords.csv
//!   textmill --?            # usage

use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::Parser;
use tracing::{Level, error};
use tracing_subscriber::EnvFilter;

use textmill::cli::{Command, USAGE, parse_command};
use textmill::fs::RealFs;
use textmill::pipeline::{FileOutcome, Pipeline};
use textmill::report::{ReportExporter, ReportKind};
use textmill::store::{MemoryStore, PersistenceGateway, PgStore, ReportSource, StoreConfig};

/// Batch text rewriter with word and character statistics.
#[derive(Parser)]
#[command(name = "textmill", about = "Batch text rewriter with word statistics", version)]
struct Args {
    /// Directory to process, or a report selector
    /// (--1:<max_words>, --2:<ceiling>, --3, --?).
    #[arg(value_name = "TARGET", allow_hyphen_values = true)]
    target: Option<String>,

    /// libpq-style connection string. Defaults to PGHOST/PGPORT/PGUSER/
    /// PGPASSWORD/PGDATABASE.
    #[arg(long, env = "TEXTMILL_CONNECTION", value_name = "CONNINFO")]
    connection: Option<String>,

    /// Directory the report CSV files are written to.
    #[arg(long, default_value = ".", value_name = "PATH")]
    output_dir: PathBuf,

    /// Process files and print statistics without touching the database.
    #[arg(long)]
    dry_run: bool,

    /// Increase logging verbosity (-v info, -vv debug, -vvv trace).
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Quiet mode - only log errors.
    #[arg(short, long)]
    quiet: bool,
}

/// Initializes the tracing subscriber on stderr; stdout is kept for the
/// per-file and report messages.
fn init_logging(verbose: u8, quiet: bool) {
    let level = if quiet {
        Level::ERROR
    } else {
        match verbose {
            0 => Level::WARN,
            1 => Level::INFO,
            2 => Level::DEBUG,
            _ => Level::TRACE,
        }
    };

    let mut filter = EnvFilter::from_default_env();
    if let Ok(directive) = format!("textmill={}", level).parse() {
        filter = filter.add_directive(directive);
    }

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn store_config(args: &Args) -> Option<StoreConfig> {
    match &args.connection {
        Some(conn) => Some(StoreConfig::new(conn.as_str())),
        None => match StoreConfig::from_env() {
            Ok(config) => Some(config),
            Err(e) => {
                println!("{}", e);
                None
            }
        },
    }
}

/// Opens the database up front so no file is rewritten when it is unreachable.
fn connect(args: &Args) -> Option<PgStore> {
    let mut store = PgStore::new(store_config(args)?);
    match store.try_connect() {
        Ok(()) => Some(store),
        Err(e) => {
            println!("{}", e);
            None
        }
    }
}

fn print_outcome(path: &Path, outcome: &FileOutcome) {
    match outcome {
        FileOutcome::Done(stats) => println!(
            "File {} CharCount = {}, WordCount = {}",
            path.display(),
            stats.totals.char_count,
            stats.totals.word_count
        ),
        FileOutcome::Skipped(reason) => println!("File {} skipped: {}", path.display(), reason),
        FileOutcome::Failed(e) => println!("File {} failed: {}", path.display(), e),
    }
}

fn process<G: PersistenceGateway>(dir: &Path, gateway: G) -> ExitCode {
    let mut pipeline = Pipeline::new(RealFs::new(), gateway);
    match pipeline.run(dir, print_outcome) {
        Ok(summary) => {
            println!("{}", summary);
            if summary.failed() > 0 {
                ExitCode::FAILURE
            } else {
                ExitCode::SUCCESS
            }
        }
        Err(e) => {
            error!(error = %e, "run aborted");
            println!("{}", e);
            ExitCode::FAILURE
        }
    }
}

fn report<S: ReportSource>(source: S, output_dir: &Path, kind: ReportKind) -> ExitCode {
    let mut exporter = ReportExporter::new(source, output_dir);
    match exporter.export(kind) {
        Ok(outcome) => {
            println!("{}", outcome);
            ExitCode::SUCCESS
        }
        Err(e) => {
            error!(error = %e, "report failed");
            println!("{}", e);
            ExitCode::FAILURE
        }
    }
}

fn main() -> ExitCode {
    let args = Args::parse();
    init_logging(args.verbose, args.quiet);

    let command = match parse_command(args.target.as_deref()) {
        Ok(command) => command,
        Err(e) => {
            println!("{}", e);
            println!("{}", USAGE);
            return ExitCode::SUCCESS;
        }
    };

    match command {
        Command::Usage => {
            println!("{}", USAGE);
            ExitCode::SUCCESS
        }
        Command::Process(dir) if args.dry_run => process(&dir, MemoryStore::new()),
        Command::Process(dir) => match connect(&args) {
            Some(store) => process(&dir, store),
            None => ExitCode::FAILURE,
        },
        Command::Report(kind) if args.dry_run => {
            report(MemoryStore::new(), &args.output_dir, kind)
        }
        Command::Report(kind) => match connect(&args) {
            Some(store) => report(store, &args.output_dir, kind),
            None => ExitCode::FAILURE,
        },
    }
}
