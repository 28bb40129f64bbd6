//! Main CLI application structure

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing::debug;
use tracing_subscriber::EnvFilter;

use super::output::{Output, OutputFormat};
use super::task;
use crate::domain::SortKey;
use crate::storage::{Config, TodoFile, DEFAULT_FILE_NAME};

#[derive(Parser)]
#[command(name = "todotxt")]
#[command(author, version, about = "Read, query and rewrite todo.txt files")]
#[command(propagate_version = true)]
pub struct Cli {
    /// todo.txt file to operate on
    #[arg(long, global = true, env = "TODO_FILE")]
    pub file: Option<PathBuf>,

    /// Config file (defaults to the user config directory)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Output format
    #[arg(long, short = 'f', global = true, default_value = "text")]
    pub format: OutputFormat,

    /// Enable debug logging on stderr
    #[arg(long, short = 'v', global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// List tasks
    ///
    /// Examples:
    ///   todotxt list --sort priority-asc --sort due-asc
    ///   todotxt list --pending --overdue --due-today
    List {
        /// Sort key such as `priority-asc`; the first key is the primary order
        #[arg(long = "sort", value_name = "KEY")]
        sort: Vec<SortKey>,

        /// Show only completed tasks
        #[arg(long, conflicts_with = "pending")]
        completed: bool,

        /// Show only open tasks
        #[arg(long)]
        pending: bool,

        /// Show tasks whose due day is over
        #[arg(long)]
        overdue: bool,

        /// Show tasks due before the end of today
        #[arg(long)]
        due_today: bool,
    },

    /// Add a task
    Add {
        /// Task line, e.g. "(A) Call Mom @phone due:2024-05-01"
        #[arg(required = true, num_args = 1..)]
        text: Vec<String>,

        /// Do not stamp today's date as the creation date
        #[arg(long)]
        no_date: bool,
    },

    /// Mark a task as done
    Done {
        /// Task ID
        id: u32,
    },

    /// Reopen a completed task
    Reopen {
        /// Task ID
        id: u32,
    },

    /// Remove a task
    Rm {
        /// Task ID
        id: u32,
    },

    /// Show the rendered segments of a task
    Show {
        /// Task ID
        id: u32,
    },

    /// Rewrite the file in sorted order
    Sort {
        /// Sort keys; the first key is the primary order
        #[arg(required = true, value_name = "KEY")]
        keys: Vec<SortKey>,
    },
}

/// Resolved state shared by every command
pub struct Session {
    pub config: Config,
    pub file: TodoFile,
    pub output: Output,
}

impl Session {
    fn open(cli: &Cli) -> Result<Self> {
        let config = Config::load(cli.config.as_deref())?;
        config.options.set_global();

        let path = cli
            .file
            .clone()
            .or_else(|| config.todo_file.clone())
            .unwrap_or_else(|| PathBuf::from(DEFAULT_FILE_NAME));
        debug!(path = %path.display(), "using todo file");

        Ok(Self {
            file: TodoFile::new(path),
            output: Output::new(cli.format),
            config,
        })
    }
}

/// Main entry point for the CLI
pub fn run() -> Result<()> {
    let cli = Cli::parse();
    install_tracing(cli.verbose);

    let session = Session::open(&cli)?;

    match cli.command {
        Commands::List {
            sort,
            completed,
            pending,
            overdue,
            due_today,
        } => {
            let filter = task::ListFilter {
                completed,
                pending,
                overdue,
                due_today,
            };
            task::list(&session, &sort, filter)?
        }
        Commands::Add { text, no_date } => task::add(&session, &text.join(" "), !no_date)?,
        Commands::Done { id } => task::complete(&session, id)?,
        Commands::Reopen { id } => task::reopen(&session, id)?,
        Commands::Rm { id } => task::remove(&session, id)?,
        Commands::Show { id } => task::show(&session, id)?,
        Commands::Sort { keys } => task::sort(&session, &keys)?,
    }

    debug!("command completed");
    Ok(())
}

/// Logs go to stderr; `RUST_LOG` takes precedence over `--verbose`
fn install_tracing(verbose: bool) {
    let level = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .compact()
        .try_init();
}
