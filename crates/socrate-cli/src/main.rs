//! CLI frontend for socrate: history-weighted callouts for a class roster.

mod commands;

use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};
use socrate_session::CallPolicy;

#[derive(Parser)]
#[command(
    name = "socrate",
    about = "Socrate: history-weighted callouts for a class roster",
    version,
    propagate_version = true
)]
struct Cli {
    /// Print debug diagnostics to stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate a batch of callouts, counting each one as a call
    Batch {
        /// How many callouts to generate
        callouts: usize,

        /// Roster state file
        #[arg(long, visible_alias = "statefile", default_value = "socrate.txt")]
        roster: PathBuf,

        /// File the callouts are written to
        #[arg(short, long, visible_alias = "calloutfile", default_value = "callout.txt")]
        output: PathBuf,

        /// RNG seed for reproducible callouts
        #[arg(short, long)]
        seed: Option<u64>,

        /// Also print the callouts to stdout
        #[arg(short, long)]
        print: bool,
    },

    /// Run an interactive session: call on members one at a time
    Session {
        /// Roster state file
        #[arg(long, default_value = "socrate.txt")]
        roster: PathBuf,

        /// Session event log (appended to)
        #[arg(short, long, default_value = "socrate-log.txt")]
        log: PathBuf,

        /// RNG seed for reproducible callouts
        #[arg(short, long)]
        seed: Option<u64>,

        /// Count an absence as a call as well
        #[arg(long)]
        absent_counts_as_call: bool,

        /// Allow the same member to be called again before everyone has had a turn
        #[arg(long)]
        allow_repeats: bool,
    },

    /// Show every member's history, weight, and selection odds
    Roster {
        /// Roster state file
        #[arg(long, default_value = "socrate.txt")]
        roster: PathBuf,

        /// Print JSON instead of a table
        #[arg(long)]
        json: bool,
    },

    /// Create a new roster from a file of `Last,First` lines
    Init {
        /// File with one `Last,First` name per line
        names: PathBuf,

        /// Roster state file to create
        #[arg(long, default_value = "socrate.txt")]
        roster: PathBuf,
    },
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let result = match cli.command {
        Commands::Batch {
            callouts,
            roster,
            output,
            seed,
            print,
        } => commands::batch::run(&roster, &output, callouts, seed, print),
        Commands::Session {
            roster,
            log,
            seed,
            absent_counts_as_call,
            allow_repeats,
        } => {
            let policy = if absent_counts_as_call {
                CallPolicy::EverySelection
            } else {
                CallPolicy::Answered
            };
            commands::session::run(&roster, &log, seed, policy, !allow_repeats)
        }
        Commands::Roster { roster, json } => commands::roster::run(&roster, json),
        Commands::Init { names, roster } => commands::init::run(&names, &roster),
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        process::exit(1);
    }
}

/// Diagnostics go to stderr; `RUST_LOG` overrides the default filter.
fn init_tracing(verbose: bool) {
    use tracing_subscriber::{EnvFilter, fmt};

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        if verbose {
            EnvFilter::new("debug")
        } else {
            EnvFilter::new("warn")
        }
    });

    fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}
