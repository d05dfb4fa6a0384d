//! # holdem CLI Library
//!
//! Terminal front-end for the `holdem_engine` rules core. It owns everything
//! the engine leaves to its caller: reading commands, checking who may issue
//! them, keeping one game per table, and resolving configuration.
//!
//! ## Main Entry Point
//!
//! [`run`] parses command-line arguments, executes the subcommand and returns
//! the process exit code.
//!
//! ```
//! use std::io;
//! let args = vec!["holdem", "eval", "As", "Ks", "Qs", "Js", "10s"];
//! let code = holdem_cli::run(args, &mut io::stdout(), &mut io::stderr());
//! assert_eq!(code, 0);
//! ```
//!
//! ## Available Subcommands
//!
//! - `play`: Run tables from `<user> <command>` lines on stdin
//! - `eval`: Rank 5 to 7 cards
//! - `deal`: Deal a single hand face up for inspection
//! - `cfg`: Display current configuration settings

use clap::Parser;
use std::io::Write;

#[macro_use]
mod macros;

pub mod cli;
mod commands;
pub mod config;
mod error;
pub mod exit_code;
pub mod formatters;
pub mod io_utils;
pub mod logging;
pub mod session;
pub mod ui;
pub mod validation;

use cli::{Commands, HoldemCli};
use commands::{handle_cfg_command, handle_deal_command, handle_eval_command, handle_play_command};

pub use error::CliError;

pub const COMMANDS: &[&str] = &["play", "eval", "deal", "cfg"];

/// Main entry point for the CLI application.
///
/// # Returns
///
/// Exit code: `0` for success (including `--help` and `--version`), `2` for
/// argument errors and failed commands.
pub fn run<I, S>(args: I, out: &mut dyn Write, err: &mut dyn Write) -> i32
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let argv: Vec<String> = args.into_iter().map(|s| s.as_ref().to_string()).collect();

    let cli = match HoldemCli::try_parse_from(&argv) {
        Ok(cli) => cli,
        Err(e) => return usage_error(e, out, err),
    };

    let result = match cli.cmd {
        Commands::Play { table, seed, json } => {
            let stdin = std::io::stdin();
            let mut stdin_lock = stdin.lock();
            handle_play_command(&table, seed, json, out, err, &mut stdin_lock)
        }
        Commands::Eval { cards } => handle_eval_command(&cards, out),
        Commands::Deal { players, seed } => handle_deal_command(players, seed, out),
        Commands::Cfg => handle_cfg_command(out, err),
    };

    match result {
        Ok(()) => exit_code::SUCCESS,
        // cfg and play already reported configuration problems
        Err(CliError::Config(_)) => exit_code::ERROR,
        Err(e) => {
            write_or_exit!(err, "Error: {}", e);
            exit_code::ERROR
        }
    }
}

fn usage_error(e: clap::Error, out: &mut dyn Write, err: &mut dyn Write) -> i32 {
    use clap::error::ErrorKind;

    // Help and version should print to stdout and exit 0
    if matches!(e.kind(), ErrorKind::DisplayHelp | ErrorKind::DisplayVersion) {
        if write!(out, "{}", e).is_err() {
            return exit_code::ERROR;
        }
        return exit_code::SUCCESS;
    }
    write_or_exit!(err, "{}", e);
    write_or_exit!(err, "holdem: No-limit Texas Hold'em tables");
    write_or_exit!(err, "Usage: holdem <command> [options]\n");
    write_or_exit!(err, "Commands:");
    for c in COMMANDS {
        write_or_exit!(err, "  {}", c);
    }
    write_or_exit!(err, "\nFor full help, run: holdem --help");
    exit_code::ERROR
}
