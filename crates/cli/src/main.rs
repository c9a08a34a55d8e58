//! joyshim - force feedback policy inspection CLI
//!
//! Answers the questions an operator has about a shim configuration
//! before plugging anything in: which policy a device name resolves to,
//! what an effect looks like after scaling, and whether a config file
//! parses at all.

#![deny(static_mut_refs)]
#![deny(unused_must_use)]
#![deny(clippy::unwrap_used)]

mod commands;
mod completion;
mod error;
mod output;

use anyhow::Result;
use clap::{Parser, Subcommand};
use joyshim_policy::{LogLevel, ShimConfig};
use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::commands::*;
use crate::error::CliError;

#[derive(Parser)]
#[command(name = "joyshim")]
#[command(about = "Inspect joyshim force feedback policies and effect scaling")]
#[command(version)]
#[command(long_about = "
joyshim inspects the configuration of the force feedback policy shim.
Device rules are checked in file order and the first rule whose pattern
appears in the device name wins; unmatched devices get the default policy.

Use --json flag for machine-readable output suitable for scripting.
")]
struct Cli {
    /// Output format (human-readable or JSON)
    #[arg(
        long,
        global = true,
        help = "Output in JSON format for machine parsing"
    )]
    json: bool,

    /// Verbose logging
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show the policy a device name resolves to
    Resolve(ResolveArgs),

    /// Scale an effect descriptor the way an attached device would see it
    Scale(ScaleArgs),

    /// Validate a configuration file and list its device rules
    Check(CheckArgs),

    /// Generate shell completion scripts
    Completion {
        /// Shell to generate completion for
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let directive = log_directive(cli.verbose, configured_log_level(&cli.command));

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| directive.into()),
        )
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_writer(std::io::stderr),
        )
        .init();

    match execute_command(&cli) {
        Ok(()) => Ok(()),
        Err(e) => {
            if cli.json {
                output::print_error_json(&e);
            } else {
                output::print_error_human(&e);
            }

            let exit_code = e.downcast_ref::<CliError>().map_or(1, CliError::exit_code);
            std::process::exit(exit_code);
        }
    }
}

/// Log level set in the command's configuration file, if it has one that
/// loads. Load errors are left for the command itself to report.
fn configured_log_level(command: &Commands) -> Option<LogLevel> {
    let path = match command {
        Commands::Resolve(args) => &args.config,
        Commands::Check(args) => &args.config,
        Commands::Scale(_) | Commands::Completion { .. } => return None,
    };
    ShimConfig::from_path(path)
        .ok()
        .map(|config| config.general.log_level)
}

/// Default filter directive: `-v` wins over the configured level, and
/// `warn` applies when neither is given.
fn log_directive(verbose: u8, configured: Option<LogLevel>) -> String {
    let level = match (verbose, configured) {
        (0, Some(level)) => level.level_filter(),
        (0, None) => LevelFilter::WARN,
        (1, _) => LevelFilter::INFO,
        (2, _) => LevelFilter::DEBUG,
        _ => LevelFilter::TRACE,
    };
    format!("joyshim={}", level.to_string().to_lowercase())
}

fn execute_command(cli: &Cli) -> Result<()> {
    match &cli.command {
        Commands::Resolve(args) => {
            let report = commands::resolve::execute(args)?;
            output::print_resolve(&report, cli.json);
        }
        Commands::Scale(args) => {
            let report = commands::scale::execute(args)?;
            output::print_scale(&report, cli.json);
        }
        Commands::Check(args) => {
            let report = commands::check::execute(args)?;
            output::print_check(&report, cli.json);
        }
        Commands::Completion { shell } => completion::generate_completion(*shell),
    }
    Ok(())
}
