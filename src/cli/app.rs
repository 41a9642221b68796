//! Main CLI application structure

use std::path::PathBuf;

use anyhow::Result;
use chrono::{Local, NaiveDate};
use clap::{Parser, Subcommand};
use tracing_subscriber::{fmt, EnvFilter};

use super::output::{Output, OutputFormat};
use super::{calendar, catalog, tui};
use crate::domain::{DerivationPolicy, Month, Schedule};
use crate::storage::Config;

#[derive(Parser)]
#[command(name = "cadence")]
#[command(author, version, about = "Content-update calendar for managed websites")]
#[command(propagate_version = true)]
pub struct Cli {
    /// Output format
    #[arg(long, short = 'f', global = true, default_value = "text")]
    pub format: OutputFormat,

    /// Enable verbose output for debugging
    #[arg(long, short = 'v', global = true)]
    pub verbose: bool,

    /// Configuration file (defaults to ./cadence.toml or the user config)
    #[arg(long, short = 'c', global = true, env = "CADENCE_CONFIG")]
    pub config: Option<PathBuf>,

    /// Override the configured ID derivation policy
    #[arg(long, global = true)]
    pub policy: Option<DerivationPolicy>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// List configured sites
    Sites,

    /// Derive the content ID a site publishes on a date
    Derive {
        /// Site ID
        #[arg(long)]
        site: u32,

        /// Date (YYYY-MM-DD)
        #[arg(long)]
        date: NaiveDate,
    },

    /// Show every scheduled update in a month
    Calendar {
        /// Month to show (YYYY-MM, defaults to the current month)
        #[arg(long)]
        month: Option<Month>,

        /// Only show one site
        #[arg(long)]
        site: Option<u32>,
    },

    /// Show the record for a content ID
    Show {
        /// Content ID (e.g. C101)
        id: String,
    },

    /// Preview the catalog after renaming a content ID
    Rename {
        /// Current content ID
        old: String,

        /// New content ID
        new: String,

        /// Shift every later ID with the same prefix by the same amount
        #[arg(long)]
        cascade: bool,
    },

    /// Preview a status change
    SetStatus {
        /// Content ID
        id: String,

        /// New status (pending, in-progress, review, complete)
        status: String,
    },

    /// Open the interactive calendar
    Tui {
        /// Month to open (YYYY-MM, defaults to the current month)
        #[arg(long)]
        month: Option<Month>,

        /// Only show one site
        #[arg(long)]
        site: Option<u32>,
    },
}

/// Main entry point for the CLI
pub fn run() -> Result<()> {
    let cli = Cli::parse();
    let output = Output::new(cli.format, cli.verbose);

    // The TUI owns the terminal, so log lines would corrupt the screen
    if !matches!(cli.command, Commands::Tui { .. }) {
        init_tracing(cli.verbose);
    }

    let config = Config::load(cli.config.as_deref())?;
    output.verbose_ctx("config", &format!("Loaded {}", config.source.describe()));

    match cli.command {
        Commands::Sites => {
            let schedule = open_schedule(config, None, cli.policy)?;
            calendar::sites(&output, &schedule)?
        }

        Commands::Derive { site, date } => {
            let schedule = open_schedule(config, Some(Month::containing(date)), cli.policy)?;
            output.verbose_ctx(
                "derive",
                &format!("site={} date={} policy={}", site, date, schedule.policy()),
            );
            calendar::derive(&output, &schedule, site, date)?
        }

        Commands::Calendar { month, site } => {
            let mut schedule = open_schedule(config, month, cli.policy)?;
            schedule.set_filter(site.into());
            output.verbose_ctx(
                "calendar",
                &format!("month={} filter={:?}", schedule.month(), schedule.filter()),
            );
            calendar::month(&output, &schedule)?
        }

        Commands::Show { id } => {
            let schedule = open_schedule(config, None, cli.policy)?;
            catalog::show(&output, &schedule, &id)?
        }

        Commands::Rename { old, new, cascade } => {
            let schedule = open_schedule(config, None, cli.policy)?;
            output.verbose_ctx("rename", &format!("{} -> {} cascade={}", old, new, cascade));
            catalog::rename(&output, &schedule, &old, &new, cascade)?
        }

        Commands::SetStatus { id, status } => {
            let schedule = open_schedule(config, None, cli.policy)?;
            catalog::set_status(&output, &schedule, &id, &status)?
        }

        Commands::Tui { month, site } => {
            let mut schedule = open_schedule(config, month, cli.policy)?;
            schedule.set_filter(site.into());
            tui::run(&output, schedule)?
        }
    }

    Ok(())
}

/// Builds the session state for a command
fn open_schedule(
    config: Config,
    month: Option<Month>,
    policy: Option<DerivationPolicy>,
) -> Result<Schedule> {
    let month = month.unwrap_or_else(|| Month::containing(Local::now().date_naive()));
    config.into_schedule(month, policy)
}

/// Installs the stderr log subscriber. `RUST_LOG` takes precedence.
fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    let _ = fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init();
}
