//! Parsing of table command lines read by `holdem play`.
//!
//! A line names who is speaking and what they ask for, optionally addressed
//! to a table other than the session's default one:
//!
//! ```text
//! [#<table>] <user> <command> [args]
//! ```
//!
//! Parsing only checks shape. Whether the command is allowed right now is
//! decided by [`crate::session`].

/// A command a user can send to a table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TableCommand {
    NewGame,
    Join,
    Start,
    Deal,
    Check,
    Call,
    Raise(u32),
    Fold,
    AllIn,
    Count,
    Options,
    /// Value is kept signed so that negative values can be refused with a
    /// message rather than a parse error
    Set { option: String, value: i64 },
    Help,
}

impl TableCommand {
    /// Every command name with its help text, in the order `help` lists them.
    pub const HELP: [(&'static str, &'static str); 13] = [
        ("newgame", "Starts a new game at this table"),
        ("join", "Joins a game that has not started yet"),
        ("start", "Starts the game once everyone has joined"),
        ("deal", "Deals the next hand (dealer only)"),
        ("check", "Passes the action without betting"),
        ("call", "Matches the current bet"),
        ("raise", "Raises the current bet by an amount"),
        ("fold", "Gives up the current hand"),
        ("all-in", "Bets every chip you have left"),
        ("count", "Shows how much money everyone has"),
        ("options", "Lists the table options and their values"),
        ("set", "Sets an option to a value"),
        ("help", "Shows this list of commands"),
    ];
}

/// A parsed command line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandLine {
    /// Explicit `#table` prefix, if any
    pub table: Option<String>,
    pub user: String,
    pub command: TableCommand,
}

/// Outcome of parsing one input line.
#[derive(Debug, PartialEq)]
pub enum ParseResult {
    Command(CommandLine),
    /// Blank line or `//` comment
    Empty,
    /// `quit`, either alone or spoken by a user
    Quit,
    Invalid(String),
}

/// Parses one line of `holdem play` input.
///
/// # Example
///
/// ```rust
/// use holdem_cli::validation::{parse_command_line, ParseResult, TableCommand};
///
/// let ParseResult::Command(line) = parse_command_line("#side alice raise 20") else {
///     panic!("expected a command");
/// };
/// assert_eq!(line.table.as_deref(), Some("side"));
/// assert_eq!(line.user, "alice");
/// assert_eq!(line.command, TableCommand::Raise(20));
///
/// assert_eq!(parse_command_line("quit"), ParseResult::Quit);
/// assert!(matches!(parse_command_line("alice dance"), ParseResult::Invalid(_)));
/// ```
pub fn parse_command_line(input: &str) -> ParseResult {
    let input = input.trim();
    if input.is_empty() || input.starts_with("//") {
        return ParseResult::Empty;
    }
    let mut parts: Vec<&str> = input.split_whitespace().collect();

    let table = match parts.first() {
        Some(first) if first.starts_with('#') => {
            let name = &first[1..];
            if name.is_empty() {
                return ParseResult::Invalid("Table name missing after '#'".to_string());
            }
            let name = name.to_string();
            parts.remove(0);
            Some(name)
        }
        _ => None,
    };

    match parts.as_slice() {
        [] => ParseResult::Invalid("Expected '<user> <command>'".to_string()),
        [word] if is_quit(word) => ParseResult::Quit,
        [_, word] if is_quit(word) => ParseResult::Quit,
        [user] => ParseResult::Invalid(format!("No command given for {}", user)),
        [user, command, args @ ..] => match parse_command(command, args) {
            Ok(command) => ParseResult::Command(CommandLine {
                table,
                user: (*user).to_string(),
                command,
            }),
            Err(msg) => ParseResult::Invalid(msg),
        },
    }
}

fn is_quit(word: &str) -> bool {
    matches!(word.to_ascii_lowercase().as_str(), "q" | "quit")
}

fn parse_command(command: &str, args: &[&str]) -> Result<TableCommand, String> {
    let command = command.trim_start_matches('/').to_ascii_lowercase();
    let simple = match command.as_str() {
        "newgame" | "new-game" | "new_game" => Some(TableCommand::NewGame),
        "join" => Some(TableCommand::Join),
        "start" => Some(TableCommand::Start),
        "deal" => Some(TableCommand::Deal),
        "check" => Some(TableCommand::Check),
        "call" => Some(TableCommand::Call),
        "fold" => Some(TableCommand::Fold),
        "all-in" | "allin" | "all_in" => Some(TableCommand::AllIn),
        "count" => Some(TableCommand::Count),
        "options" => Some(TableCommand::Options),
        "help" => Some(TableCommand::Help),
        _ => None,
    };
    if let Some(cmd) = simple {
        return Ok(cmd);
    }

    match command.as_str() {
        "raise" => {
            let Some(amount) = args.first() else {
                return Err("Raise requires an amount (e.g., 'raise 50')".to_string());
            };
            match amount.trim_start_matches('$').parse::<u32>() {
                Ok(amount) if amount > 0 => Ok(TableCommand::Raise(amount)),
                Ok(_) => Err("Raise amount must be positive".to_string()),
                Err(_) => Err("Invalid raise amount".to_string()),
            }
        }
        "set" => match args {
            [option, value] => value
                .parse::<i64>()
                .map(|value| TableCommand::Set {
                    option: (*option).to_string(),
                    value,
                })
                .map_err(|_| format!("Invalid value '{}' for {}", value, option)),
            _ => Err("Set requires an option and a value (e.g., 'set blind 10')".to_string()),
        },
        other => Err(format!(
            "Unrecognized command '{}'. Valid commands: newgame, join, start, deal, check, call, raise <amount>, fold, all-in, count, options, set <option> <value>, help, quit",
            other
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn command(input: &str) -> TableCommand {
        match parse_command_line(input) {
            ParseResult::Command(line) => line.command,
            other => panic!("expected a command from {input:?}, got {other:?}"),
        }
    }

    #[test]
    fn simple_commands_are_case_insensitive() {
        assert_eq!(command("ann NEWGAME"), TableCommand::NewGame);
        assert_eq!(command("ann /join"), TableCommand::Join);
        assert_eq!(command("ann All-In"), TableCommand::AllIn);
        assert_eq!(command("ann allin"), TableCommand::AllIn);
    }

    #[test]
    fn raise_needs_a_positive_amount() {
        assert_eq!(command("ann raise $15"), TableCommand::Raise(15));
        for bad in ["ann raise", "ann raise 0", "ann raise -3", "ann raise lots"] {
            assert!(
                matches!(parse_command_line(bad), ParseResult::Invalid(_)),
                "{bad} should be invalid"
            );
        }
    }

    #[test]
    fn set_keeps_negative_values_for_the_dispatcher() {
        assert_eq!(
            command("ann set blind -5"),
            TableCommand::Set {
                option: "blind".into(),
                value: -5
            }
        );
        assert!(matches!(
            parse_command_line("ann set blind"),
            ParseResult::Invalid(_)
        ));
    }

    #[test]
    fn blank_comment_and_quit_lines() {
        assert_eq!(parse_command_line("   "), ParseResult::Empty);
        assert_eq!(parse_command_line("// setup"), ParseResult::Empty);
        assert_eq!(parse_command_line("Q"), ParseResult::Quit);
        assert_eq!(parse_command_line("ann quit"), ParseResult::Quit);
        assert!(matches!(parse_command_line("#"), ParseResult::Invalid(_)));
        assert!(matches!(parse_command_line("ann"), ParseResult::Invalid(_)));
    }
}
