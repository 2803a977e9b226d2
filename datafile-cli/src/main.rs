//! Command-line interface for datafile
//! This binary reads indentation-structured data files and checks, normalizes or dumps them.
//!
//! Usage:
//!   datafile format `<path>`... [--in-place] [--separate]   - Rewrite with normalized quoting and indentation
//!   datafile check `<path>`...                              - Report bad bytes and unterminated quotes
//!   datafile dump `<path>` [--format tree|json]             - Print the parsed tree
//!
//! A path of `-` reads standard input. Settings come from the built-in defaults,
//! then `./datafile.toml` if present, then `--config <file>`.

mod commands;

use clap::{Parser, Subcommand};
use commands::DumpFormat;
use datafile_config::{DatafileConfig, Loader, LogLevel};
use log::LevelFilter;
use std::path::{Path, PathBuf};
use std::process;

const LOCAL_CONFIG: &str = "datafile.toml";

#[derive(Parser)]
#[command(
    name = "datafile",
    version,
    about = "A tool for checking and normalizing indentation-structured data files",
    arg_required_else_help = true
)]
struct Cli {
    /// Configuration file layered over the defaults and ./datafile.toml
    #[arg(long, short = 'c', global = true)]
    config: Option<PathBuf>,

    /// Show debug output
    #[arg(long, short = 'v', global = true, conflicts_with = "quiet")]
    verbose: bool,

    /// Only show errors
    #[arg(long, short = 'q', global = true)]
    quiet: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Re-emit files with normalized quoting and tab indentation
    Format {
        #[arg(required = true)]
        paths: Vec<PathBuf>,

        /// Overwrite each file instead of printing to stdout
        #[arg(long, short = 'i')]
        in_place: bool,

        /// Put a blank line between top-level nodes
        #[arg(long, short = 's')]
        separate: bool,
    },
    /// Report invalid bytes, missing final newlines and unterminated quotes
    Check {
        #[arg(required = true)]
        paths: Vec<PathBuf>,
    },
    /// Print the parsed tree
    Dump {
        path: PathBuf,

        #[arg(long, short = 'f', value_enum, default_value_t = DumpFormat::Tree)]
        format: DumpFormat,
    },
}

fn main() {
    let cli = Cli::parse();

    let config = load_config(&cli).unwrap_or_else(|e| {
        eprintln!("Configuration error: {}", e);
        process::exit(1);
    });
    init_logging(&cli, config.logging.level);

    let result = match &cli.command {
        Command::Format {
            paths, in_place, ..
        } => commands::format(paths, *in_place, &config.writer).map(|_| true),
        Command::Check { paths } => Ok(commands::check(paths, &config.check) == 0),
        Command::Dump { path, format } => commands::dump(path, *format).map(|output| {
            print!("{}", output);
            true
        }),
    };

    match result {
        Ok(true) => {}
        Ok(false) => process::exit(1),
        Err(e) => {
            eprintln!("Error: {}", e);
            process::exit(1);
        }
    }
}

fn load_config(cli: &Cli) -> Result<DatafileConfig, String> {
    let mut loader = Loader::new().with_optional_file(Path::new(LOCAL_CONFIG));
    if let Some(path) = &cli.config {
        loader = loader.with_file(path);
    }
    if let Command::Format { separate: true, .. } = &cli.command {
        loader = loader
            .set_override("writer.blank_line_between_roots", true)
            .map_err(|e| e.to_string())?;
    }
    loader.build().map_err(|e| e.to_string())
}

fn init_logging(cli: &Cli, configured: LogLevel) {
    let level = if cli.verbose {
        LevelFilter::Debug
    } else if cli.quiet {
        LevelFilter::Error
    } else {
        match configured {
            LogLevel::Off => LevelFilter::Off,
            LogLevel::Error => LevelFilter::Error,
            LogLevel::Warn => LevelFilter::Warn,
            LogLevel::Info => LevelFilter::Info,
            LogLevel::Debug => LevelFilter::Debug,
            LogLevel::Trace => LevelFilter::Trace,
        }
    };

    env_logger::Builder::new()
        .filter_level(level)
        .parse_default_env()
        .format_timestamp(None)
        .format_target(false)
        .init();
}
