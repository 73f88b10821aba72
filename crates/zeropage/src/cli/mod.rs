pub mod check;
pub mod config;
pub mod run;

use clap::{Args, Parser, Subcommand};
use console::style;
use std::path::PathBuf;
use zeropage_lib::{Config, PlaceholderFilter, Result};

#[derive(Parser)]
#[command(name = "zeropage")]
#[command(about = "Remove zero-index placeholder pages from scanned-book image folders", long_about = None)]
#[command(version)]
pub struct Cli {
    #[arg(long, global = true, help = "Path to configuration file")]
    pub config: Option<PathBuf>,

    #[arg(long, short = 'v', global = true, help = "Enable verbose output")]
    pub verbose: bool,

    #[arg(long, short = 'q', global = true, help = "Suppress non-error output")]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    #[command(about = "Delete placeholder pages from image folders")]
    Run {
        #[arg(required = true, help = "Image folders to clean (e.g. master and media)")]
        folders: Vec<PathBuf>,

        #[command(flatten)]
        scope: ScopeArgs,

        #[arg(long, conflicts_with = "execute", help = "Only report what would be deleted (default)")]
        dry_run: bool,

        #[arg(long, help = "Actually delete the placeholder pages")]
        execute: bool,

        #[arg(long, short = 'y', help = "Do not ask for confirmation before deleting")]
        yes: bool,

        #[arg(long, help = "Print the cleanup report as JSON")]
        json: bool,
    },

    #[command(about = "Classify filenames without touching any files")]
    Check {
        #[arg(required = true, help = "Filenames to classify")]
        names: Vec<String>,

        #[command(flatten)]
        scope: ScopeArgs,

        #[arg(long, help = "Print the classification as JSON")]
        json: bool,
    },

    #[command(about = "Inspect configuration")]
    Config {
        #[command(subcommand)]
        action: config::ConfigCommands,
    },
}

/// Selects the configuration block and optionally overrides its splitter.
#[derive(Args, Debug, Clone)]
pub struct ScopeArgs {
    #[arg(long, help = "Name part splitter (overrides configuration)")]
    pub splitter: Option<String>,

    #[arg(long, default_value = "*", help = "Project name used to select configuration")]
    pub project: String,

    #[arg(long, default_value = "*", help = "Step name used to select configuration")]
    pub step: String,
}

impl ScopeArgs {
    pub fn filter(&self, config_path: Option<PathBuf>, verbose: bool) -> Result<PlaceholderFilter> {
        if let Some(splitter) = &self.splitter {
            return PlaceholderFilter::with_splitter(splitter);
        }

        let config = Config::new(config_path)?;
        if verbose {
            match &config.config_path {
                Some(path) => println!("{} Loaded configuration from {}", style(">>>").cyan(), path.display()),
                None => println!("{} No configuration file found, using defaults", style(">>>").cyan()),
            }
        }

        Ok(config.resolve(&self.project, &self.step).filter())
    }
}

pub fn init_logging(verbose: bool, quiet: bool) {
    let level = if verbose {
        "info"
    } else if quiet {
        "error"
    } else {
        "warn"
    };

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level)).init();
}
