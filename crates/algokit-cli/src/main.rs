use std::process;

use clap::Parser;
use log::LevelFilter;
use simplelog::{ColorChoice, ConfigBuilder, TermLogger, TerminalMode};

mod cli;
mod cmd;
mod error;
mod io;

pub use cli::{Cli, Command, OutputFormat, PathOrStdin};
use error::CliError;

/// Installs the stderr logger. Warnings by default, `--verbose` adds debug
/// output, `--quiet` keeps only errors.
fn init_logging(cli: &Cli) {
    let level = if cli.quiet {
        LevelFilter::Error
    } else if cli.verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Warn
    };
    let color = if cli.no_color {
        ColorChoice::Never
    } else {
        ColorChoice::Auto
    };
    let config = ConfigBuilder::new()
        .set_time_level(LevelFilter::Off)
        .set_target_level(LevelFilter::Off)
        .build();
    if let Err(e) = TermLogger::init(level, config, TerminalMode::Stderr, color) {
        eprintln!("warning: could not install logger: {e}");
    }
}

fn run(cli: &Cli) -> Result<(), CliError> {
    match &cli.command {
        Command::UnionFind { file } => {
            let content = io::read_input(file, cli.max_file_size)?;
            cmd::union_find::run(&content, cli.max_universe, &cli.format)
        }
        Command::SymbolTable {
            file,
            floor,
            ceiling,
            select,
            rank,
            range,
        } => {
            let content = io::read_input(file, cli.max_file_size)?;
            let queries =
                cmd::symbol_table::collect_queries(floor, ceiling, select, rank, range.as_deref());
            cmd::symbol_table::run(&content, &queries, &cli.format)
        }
        Command::Version => {
            match cli.format {
                OutputFormat::Human => println!("{}", algokit_core::version()),
                OutputFormat::Json => println!(
                    "{}",
                    serde_json::json!({ "version": algokit_core::version() })
                ),
            }
            Ok(())
        }
    }
}

fn main() {
    let cli = Cli::parse();
    init_logging(&cli);

    if let Err(e) = run(&cli) {
        eprintln!("{}", e.message());
        process::exit(e.exit_code());
    }
}
