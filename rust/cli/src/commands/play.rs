//! # Play Command
//!
//! Runs one or more tables from command lines read on stdin, one command per
//! line:
//!
//! ```text
//! alice newgame
//! bob join
//! alice start
//! alice deal
//! #side carol newgame
//! ```
//!
//! Every reply is written to `out` prefixed with the table it came from.
//! Hole cards go out as private lines addressed to their owner. Malformed
//! lines are reported on `err` and skipped; `quit` or EOF ends the session.

use crate::config;
use crate::error::CliError;
use crate::io_utils::read_stdin_line;
use crate::session::{Reply, Session};
use crate::ui;
use crate::validation::{ParseResult, parse_command_line};
use std::io::{BufRead, Write};

/// Handle the play command.
///
/// # Arguments
///
/// * `table` - Table that lines without a `#table` prefix address
/// * `seed` - Shuffle seed, overriding the configured one
/// * `json` - Also print a JSON snapshot of the addressed table after each command
/// * `out` - Output stream for table replies
/// * `err` - Error stream for rejected lines and warnings
/// * `stdin` - Input stream of command lines
///
/// # Errors
///
/// `CliError::Config` when the configuration cannot be resolved, `CliError::Io`
/// when writing fails.
pub fn handle_play_command(
    table: &str,
    seed: Option<u64>,
    json: bool,
    out: &mut dyn Write,
    err: &mut dyn Write,
    stdin: &mut dyn BufRead,
) -> Result<(), CliError> {
    let cfg = match config::load() {
        Ok(cfg) => cfg,
        Err(e) => {
            ui::write_error(err, &format!("Invalid configuration: {}", e))?;
            return Err(CliError::Config(e.to_string()));
        }
    };
    let mut options = cfg.game_options();
    if seed.is_some() {
        options.seed = seed;
    }
    tracing::info!(table, seed = ?options.seed, buy_in = options.buy_in, "session started");

    let mut session = Session::new(options);
    let mut commands = 0u32;
    while let Some(line) = read_stdin_line(stdin) {
        let parsed = match parse_command_line(&line) {
            ParseResult::Empty => continue,
            ParseResult::Quit => break,
            ParseResult::Invalid(msg) => {
                ui::write_error(err, &msg)?;
                continue;
            }
            ParseResult::Command(parsed) => parsed,
        };
        let target = parsed.table.as_deref().unwrap_or(table);
        let reply = session.dispatch(target, &parsed.user, &parsed.command);
        commands += 1;
        write_reply(out, target, &reply)?;

        if json {
            if let Some(game) = session.table(target) {
                let view = serde_json::to_string(&game.view()).map_err(std::io::Error::other)?;
                writeln!(out, "{}", view)?;
            }
        }
    }

    if session.registry().is_empty() {
        ui::display_warning(err, "no commands were given; nothing was played")?;
    }
    writeln!(out, "Session ended after {} commands.", commands)?;
    Ok(())
}

fn write_reply(out: &mut dyn Write, table: &str, reply: &Reply) -> Result<(), CliError> {
    for line in reply.public.trim_end().lines() {
        writeln!(out, "[{}] {}", table, line)?;
    }
    for (player, text) in &reply.private {
        writeln!(out, "[{} -> {}] {}", table, player, text)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn play(input: &str, json: bool) -> (String, String) {
        let mut out = Vec::new();
        let mut err = Vec::new();
        let mut stdin = Cursor::new(input.as_bytes());
        handle_play_command("main", Some(7), json, &mut out, &mut err, &mut stdin).unwrap();
        (
            String::from_utf8(out).unwrap(),
            String::from_utf8(err).unwrap(),
        )
    }

    #[test]
    fn replies_are_prefixed_with_the_table() {
        let (out, err) = play("ann newgame\n#side ben newgame\n", false);
        assert!(out.contains("[main] A new game has been started by ann!"));
        assert!(out.contains("[side] A new game has been started by ben!"));
        assert!(out.ends_with("Session ended after 2 commands.\n"));
        assert!(err.is_empty());
    }

    #[test]
    fn bad_lines_are_reported_and_skipped() {
        let (out, err) = play("ann dance\n\n// note\nann newgame\nquit\nann join\n", false);
        assert!(err.contains("Error: Unrecognized command 'dance'"));
        assert!(out.contains("Session ended after 1 commands."));
        assert!(!out.contains("joined"));
    }

    #[test]
    fn json_snapshot_follows_each_command() {
        let (out, _) = play("ann newgame\n", true);
        let json_line = out
            .lines()
            .find(|l| l.starts_with('{'))
            .expect("snapshot line");
        let value: serde_json::Value = serde_json::from_str(json_line).unwrap();
        assert_eq!(value["state"], "Waiting");
        assert_eq!(value["seats"][0]["player"], "ann");
    }

    #[test]
    fn empty_input_warns() {
        let (out, err) = play("", false);
        assert!(err.contains("WARNING: no commands were given"));
        assert!(out.contains("Session ended after 0 commands."));
    }
}
