use anyhow::Result;
use clap::{ArgAction, Parser, Subcommand};
use std::path::PathBuf;
use svcs_core::DEFAULT_ROOT;
use tracing::Level;

mod commands;

use commands::{add, checkout, commit, config, log, status};

#[derive(Parser)]
#[command(name = "svcs")]
#[command(version, about = "A minimal local version control system", long_about = None)]
#[command(arg_required_else_help = true)]
struct Cli {
    /// Storage directory, relative to the working tree
    #[arg(long, global = true, env = "SVCS_ROOT", default_value = DEFAULT_ROOT)]
    root: PathBuf,

    /// Increase log verbosity (-v, -vv, -vvv)
    #[arg(short, long, global = true, action = ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Get and set a username
    Config {
        /// New username (shows the current one if omitted)
        name: Option<String>,
    },

    /// Add a file to the index
    Add {
        /// File to track (lists tracked files if omitted)
        path: Option<String>,
    },

    /// Show commit logs
    Log {
        /// Number of commits to show
        #[arg(short = 'n', long)]
        limit: Option<usize>,

        /// Print the log as JSON
        #[arg(long)]
        json: bool,
    },

    /// Save changes
    Commit {
        /// Commit message
        #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
        message: Vec<String>,
    },

    /// Restore files from a commit
    Checkout {
        /// Commit ID to restore
        commit_id: Option<String>,
    },

    /// Show how tracked files differ from the last commit
    Status,
}

fn init_tracing(verbose: u8) {
    let level = match verbose {
        0 => Level::WARN,
        1 => Level::INFO,
        2 => Level::DEBUG,
        _ => Level::TRACE,
    };

    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let repo = commands::open_repository(&cli.root)?;

    match cli.command {
        Commands::Config { name } => config::run(&repo, name)?,
        Commands::Add { path } => add::run(&repo, path)?,
        Commands::Log { limit, json } => log::run(&repo, limit, json)?,
        Commands::Commit { message } => commit::run(&repo, message)?,
        Commands::Checkout { commit_id } => checkout::run(&repo, commit_id)?,
        Commands::Status => status::run(&repo)?,
    }

    Ok(())
}
