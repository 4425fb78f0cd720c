//! chara-reel CLI
//!
//! Builds the character gallery manifest from an asset folder and its
//! optional spreadsheet, CSV and sidecar sources.

mod commands;
mod error;

use std::io::Write;
use std::path::PathBuf;

use clap::{Parser, Subcommand};
use log::LevelFilter;
use owo_colors::OwoColorize;
use owo_colors::Stream::Stderr;

use chara_reel_lib::Settings;

use crate::error::CliError;

#[derive(Parser)]
#[command(name = "chara-reel")]
#[command(about = "Build the character gallery manifest", long_about = None)]
struct Cli {
    /// Project root (defaults to current directory)
    #[arg(short, long, global = true)]
    root: Option<PathBuf>,

    /// Asset directory, relative to the project root
    #[arg(short, long, global = true)]
    dir: Option<PathBuf>,

    /// Settings file (defaults to chara-reel.toml in the project root)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Only print warnings and errors
    #[arg(short, long, global = true)]
    quiet: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Build the manifest once
    Build,

    /// Build, then rebuild whenever images or sources change
    Watch,

    /// Convert a raw sheet export (sheet.csv) into videos.csv
    Normalize {
        /// Raw export (default: <assets>/sheet.csv)
        #[arg(short, long)]
        input: Option<PathBuf>,

        /// Output file (default: <assets>/videos.csv)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Show which data sources are configured and which one wins
    Sources,

    /// Print the video id each link resolves to
    Resolve {
        /// Links or bare ids
        #[arg(required = true)]
        inputs: Vec<String>,
    },
}

fn init_logging(quiet: bool) {
    let level = if quiet {
        LevelFilter::Warn
    } else {
        LevelFilter::Info
    };
    env_logger::Builder::new()
        .filter_level(level)
        .parse_default_env()
        .format(|buf, record| match record.level() {
            log::Level::Info => writeln!(buf, "{}", record.args()),
            level => writeln!(buf, "{}: {}", level.to_string().to_lowercase(), record.args()),
        })
        .init();
}

fn load_settings(cli: &Cli) -> Result<Settings, CliError> {
    let root = match &cli.root {
        Some(r) => r.clone(),
        None => std::env::current_dir()?,
    };
    let settings = Settings::load(&root, cli.config.as_deref())?;
    Ok(match &cli.dir {
        Some(dir) => settings.with_asset_dir(dir),
        None => settings,
    })
}

fn run(cli: &Cli) -> Result<(), CliError> {
    match &cli.command {
        Commands::Build => commands::build::run_build(&load_settings(cli)?, cli.quiet),
        Commands::Watch => commands::watch::run_watch(&load_settings(cli)?),
        Commands::Normalize { input, output } => commands::normalize::run_normalize(
            &load_settings(cli)?,
            input.as_deref(),
            output.as_deref(),
        ),
        Commands::Sources => commands::sources::run_sources(&load_settings(cli)?, cli.quiet),
        Commands::Resolve { inputs } => {
            commands::resolve::run_resolve(inputs);
            Ok(())
        }
    }
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.quiet);

    if let Err(e) = run(&cli) {
        log::error!("{} {}", "\u{2718}".if_supports_color(Stderr, |t| t.red()), e);
        std::process::exit(1);
    }
}
