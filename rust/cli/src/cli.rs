//! Command-line argument definitions for `holdem`.

use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(
    name = "holdem",
    version,
    about = "No-limit Texas Hold'em tables in the terminal"
)]
pub struct HoldemCli {
    #[command(subcommand)]
    pub cmd: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Run tables from `<user> <command>` lines read on stdin
    Play {
        /// Table that lines without a `#table` prefix are sent to
        #[arg(long, default_value = "main")]
        table: String,
        /// Shuffle seed, overriding the configured one
        #[arg(long)]
        seed: Option<u64>,
        /// Print a JSON snapshot of the table after every command
        #[arg(long)]
        json: bool,
    },
    /// Rank 5 to 7 cards given as codes such as `As 10h Td`
    Eval {
        #[arg(required = true, num_args = 1..)]
        cards: Vec<String>,
    },
    /// Deal one hand face up and show who would win it
    Deal {
        #[arg(long, default_value_t = 2, value_parser = clap::value_parser!(u8).range(2..=10))]
        players: u8,
        #[arg(long)]
        seed: Option<u64>,
    },
    /// Show the resolved configuration and where each value came from
    Cfg,
}
