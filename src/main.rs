// Module-specific lints configuration
#![allow(clippy::uninlined_format_args)]

use std::fs;
use std::io::Write;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{CommandFactory, Parser, Subcommand, ValueEnum};
use clap_complete::{generate, Shell};
use log::{debug, Level, LevelFilter, Log, Metadata, Record, SetLoggerError};

use tmxgrid::{AssetReader, TmxReader};

/// CLI wrapper for LogLevel to implement ValueEnum
#[derive(Debug, Clone, Copy, ValueEnum)]
enum CliLogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl From<CliLogLevel> for LevelFilter {
    fn from(level: CliLogLevel) -> Self {
        match level {
            CliLogLevel::Error => LevelFilter::Error,
            CliLogLevel::Warn => LevelFilter::Warn,
            CliLogLevel::Info => LevelFilter::Info,
            CliLogLevel::Debug => LevelFilter::Debug,
            CliLogLevel::Trace => LevelFilter::Trace,
        }
    }
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Generate shell completions for tmxgrid
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

/// tmxgrid - TMX translation memories as grid-ready assets
///
/// Reads a TMX file and prints one asset per target language, with the
/// inline tags of each segment rendered as numbered bracketed labels.
#[derive(Parser, Debug)]
#[command(name = "tmxgrid")]
#[command(version)]
#[command(about = "Inspect TMX translation memories")]
#[command(long_about = "tmxgrid reads a TMX translation memory and prints its assets.

EXAMPLES:
    tmxgrid memory.tmx                  # asset summary
    tmxgrid --pairs memory.tmx          # dump every translation pair
    tmxgrid --json memory.tmx           # machine-readable export
    tmxgrid -w 1 memory.tmx             # force single-threaded reading
    tmxgrid completions bash > tmxgrid.bash")]
struct CommandLineOptions {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Input TMX file
    #[arg(value_name = "TMX_FILE")]
    input: Option<PathBuf>,

    /// Dump every translation pair, not just the asset summary
    #[arg(short, long)]
    pairs: bool,

    /// Export the assets as JSON
    #[arg(short, long)]
    json: bool,

    /// Number of worker threads (defaults to available parallelism)
    #[arg(short, long)]
    workers: Option<usize>,

    /// Set logging level
    #[arg(short, long, value_enum)]
    log_level: Option<CliLogLevel>,
}

/// Custom logger implementation
struct CliLogger {
    level: LevelFilter,
}

impl CliLogger {
    fn init(level: LevelFilter) -> Result<(), SetLoggerError> {
        log::set_boxed_logger(Box::new(CliLogger { level }))?;
        log::set_max_level(level);
        Ok(())
    }

    fn color_for_level(level: Level) -> &'static str {
        match level {
            Level::Error => "\x1B[1;31m",
            Level::Warn => "\x1B[1;33m",
            Level::Info => "\x1B[1;32m",
            Level::Debug => "\x1B[1;36m",
            Level::Trace => "\x1B[0;37m",
        }
    }
}

impl Log for CliLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= self.level
    }

    fn log(&self, record: &Record) {
        if self.enabled(record.metadata()) {
            let now = chrono::Local::now().format("%H:%M:%S%.3f");
            let mut stderr = std::io::stderr();
            let _ = writeln!(
                stderr,
                "{}{} {:5} {}\x1B[0m",
                Self::color_for_level(record.level()),
                now,
                record.level(),
                record.args()
            );
        }
    }

    fn flush(&self) {}
}

fn main() -> Result<()> {
    let options = CommandLineOptions::parse();

    if let Some(Commands::Completions { shell }) = options.command {
        let mut cmd = CommandLineOptions::command();
        generate(shell, &mut cmd, "tmxgrid", &mut std::io::stdout());
        return Ok(());
    }

    let level = options.log_level.map_or(LevelFilter::Info, LevelFilter::from);
    CliLogger::init(level).context("failed to install the logger")?;

    let Some(input) = options.input else {
        CommandLineOptions::command().print_help()?;
        return Ok(());
    };

    let bytes = fs::read(&input)
        .with_context(|| format!("failed to read {}", input.display()))?;
    let package = input
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| input.display().to_string());

    let mut reader = TmxReader::new();
    if let Some(workers) = options.workers {
        reader = reader.with_workers(workers);
    }
    if !reader.probe(&bytes) {
        anyhow::bail!("{} does not look like a TMX document", input.display());
    }

    let assets = reader
        .try_read(&bytes, &package)
        .with_context(|| format!("failed to read {}", input.display()))?;
    debug!("{}: {} asset(s)", package, assets.len());

    if options.json {
        println!("{}", serde_json::to_string_pretty(&assets)?);
        return Ok(());
    }

    for asset in &assets {
        println!(
            "{}: {} pair(s), {} propert{}",
            asset.original,
            asset.pairs.len(),
            asset.properties.len(),
            if asset.properties.len() == 1 { "y" } else { "ies" },
        );
        if options.pairs {
            for pair in &asset.pairs {
                println!("  #{:<4} [{}] {} => {}", pair.serial, pair.id, pair.source, pair.target);
                for note in pair.notes() {
                    println!("        note: {}", note);
                }
            }
        }
    }
    Ok(())
}
