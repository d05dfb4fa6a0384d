//! Command handler modules for the `holdem` CLI.
//!
//! Each subcommand lives in its own module and exposes one
//! `handle_<name>_command` function that writes to injected streams and
//! returns `Result<(), CliError>`.

mod cfg;
mod deal;
mod eval;
mod play;

pub use cfg::handle_cfg_command;
pub use deal::handle_deal_command;
pub use eval::handle_eval_command;
pub use play::handle_play_command;
