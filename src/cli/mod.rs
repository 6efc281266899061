//! Command-line interface for `tix`.
//!
//! This module provides the CLI parsing and command routing using clap.
//! Every invocation is one session: the table is seeded (or imported),
//! the command runs against it, and the result is rendered.

pub mod commands;

use std::ops::RangeInclusive;
use std::path::PathBuf;

use anyhow::Result;
use clap::{Args, Parser, Subcommand, ValueEnum};
use clap_complete::Shell;

use crate::config::{self, CliOverrides};
use crate::logging;
use crate::output::OutputContext;
use crate::validation::{RESOLUTION_TIME_RANGE, RESPONSE_TIME_RANGE};

/// `tix` - support ticket desk.
#[derive(Parser, Debug)]
#[command(name = "tix")]
#[command(
    author,
    version,
    about = "Support ticket desk: submit, filter, edit, summarize and export tickets",
    long_about = None,
    after_help = "Each run is one session over a freshly seeded table; nothing is persisted."
)]
pub struct Cli {
    /// Output format: text (default) or json
    #[arg(long, global = true)]
    pub json: bool,

    /// Verbose output (-v info, -vv debug, -vvv trace)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Quiet mode (errors only)
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Config file (replaces ~/.config/tix/config.yaml and ./.tix.yaml)
    #[arg(long, global = true, env = "TIX_CONFIG")]
    pub config: Option<PathBuf>,

    /// PRNG seed for the synthetic table
    #[arg(long, global = true)]
    pub seed: Option<u64>,

    /// Number of synthetic rows
    #[arg(long, global = true)]
    pub rows: Option<usize>,

    /// Start from an exported CSV table instead of seeding
    #[arg(long, global = true, value_name = "PATH")]
    pub from_csv: Option<PathBuf>,

    /// The command to run
    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available commands.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Submit a new ticket
    Add(AddArgs),

    /// List tickets matching filters
    #[command(alias = "ls")]
    List(ListArgs),

    /// Change status/priority of tickets
    Edit(EditArgs),

    /// Show ticket metrics
    #[command(alias = "metrics")]
    Stats,

    /// Export the full table
    Export(ExportArgs),

    /// Run a scripted session of JSON-line actions
    Session(SessionArgs),

    /// Generate shell completions
    Completions(CompletionsArgs),

    /// Show version information
    Version,
}

#[derive(Args, Debug, Clone, Default)]
pub struct AddArgs {
    /// Describe the issue
    #[arg(long, short = 'i', default_value = "")]
    pub issue: String,

    /// Priority: High, Medium or Low
    #[arg(long, short = 'p', default_value = "High")]
    pub priority: String,

    /// Team member: "John Doe", "Jane Smith", "Alex Brown" or "Chris White"
    #[arg(long, short = 'a', default_value = "John Doe")]
    pub assigned_to: String,

    #[arg(
        long,
        default_value_t = 3,
        help = range_help("Estimated first response time in hours", &RESPONSE_TIME_RANGE)
    )]
    pub response_time: u32,

    #[arg(
        long,
        default_value_t = 24,
        help = range_help("Estimated resolution time in hours", &RESOLUTION_TIME_RANGE)
    )]
    pub resolution_time: u32,

    /// Submission date (YYYY-MM-DD); defaults to today
    #[arg(long)]
    pub date: Option<String>,
}

fn range_help(label: &str, range: &RangeInclusive<u32>) -> String {
    format!("{label} ({}-{})", range.start(), range.end())
}

#[derive(Args, Debug, Clone, Default)]
pub struct ListArgs {
    /// Filter by status (repeatable; default: all)
    #[arg(long, short = 's')]
    pub status: Vec<String>,

    /// Filter by priority (repeatable; default: all)
    #[arg(long, short = 'p')]
    pub priority: Vec<String>,

    /// Filter by assigned team member (repeatable; default: all)
    #[arg(long, short = 'a')]
    pub assigned_to: Vec<String>,

    /// Case-insensitive search in the issue description
    #[arg(long, default_value = "")]
    pub search: String,

    /// Show at most this many rows
    #[arg(long)]
    pub limit: Option<usize>,
}

#[derive(Args, Debug, Clone, Default)]
pub struct EditArgs {
    /// Ticket IDs to edit (e.g. TICKET-1042)
    #[arg(required = true)]
    pub ids: Vec<String>,

    /// New status
    #[arg(long, short = 's')]
    pub status: Option<String>,

    /// New priority
    #[arg(long, short = 'p')]
    pub priority: Option<String>,
}

/// Export encodings selectable on the command line.
#[derive(ValueEnum, Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ExportFormatArg {
    #[default]
    Csv,
    Json,
}

#[derive(Args, Debug, Clone, Default)]
pub struct ExportArgs {
    /// Output file; "-" writes to stdout (default: support_tickets.csv)
    #[arg(long, short = 'o')]
    pub output: Option<PathBuf>,

    /// Export encoding
    #[arg(long, value_enum, default_value_t = ExportFormatArg::Csv)]
    pub format: ExportFormatArg,
}

#[derive(Args, Debug, Clone, Default)]
pub struct SessionArgs {
    /// Read actions from this file instead of stdin
    #[arg(long)]
    pub script: Option<PathBuf>,

    /// Stop at the first failing action
    #[arg(long)]
    pub fail_fast: bool,
}

#[derive(Args, Debug, Clone)]
pub struct CompletionsArgs {
    /// Target shell
    #[arg(value_enum)]
    pub shell: Shell,
}

/// Run the CLI.
///
/// # Errors
///
/// Returns an error if the command fails to execute.
pub fn run() -> Result<()> {
    let cli = Cli::parse();
    let overrides = CliOverrides {
        config: cli.config.clone(),
        seed: cli.seed,
        rows: cli.rows,
        from_csv: cli.from_csv.clone(),
    };
    let config = config::load_config(&overrides)?;

    logging::init_logging(cli.verbose, cli.quiet, config.log_format)
        .map_err(|e| anyhow::anyhow!("Failed to initialize logging: {e}"))?;

    let ctx = OutputContext::new(cli.json, cli.quiet);

    match cli.command {
        Some(Commands::Add(args)) => commands::add::execute(&args, &config, &overrides, &ctx)?,
        Some(Commands::List(args)) => commands::list::execute(&args, &config, &overrides, &ctx)?,
        Some(Commands::Edit(args)) => commands::edit::execute(&args, &config, &overrides, &ctx)?,
        Some(Commands::Stats) => commands::stats::execute(&config, &overrides, &ctx)?,
        Some(Commands::Export(args)) => {
            commands::export::execute(&args, &config, &overrides, &ctx)?;
        }
        Some(Commands::Session(args)) => {
            commands::session::execute(&args, &config, &overrides, &ctx)?;
        }
        Some(Commands::Completions(args)) => commands::completions::execute(args.shell),
        Some(Commands::Version) => commands::version::execute(&ctx),
        None => println!("tix - support ticket desk. Use --help for usage."),
    }

    Ok(())
}
