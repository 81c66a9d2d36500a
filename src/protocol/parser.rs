//! Session command parser.
//!
//! Parses incoming lines into structured `Command` variants that the
//! session loop dispatches on.

use tracing::warn;

/// A parsed command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Synchronization ping; the session must reply `readyok`.
    IsReady,

    /// Change a configuration value: `setoption name <id> value <x>`.
    SetOption { name: String, value: String },

    /// Start a classical game from the configured start year.
    NewGame,

    /// Submit an order; `bits` start with the ordered province.
    Order { bits: Vec<String> },

    /// Process the current phase.
    Next,

    /// Print the current phase.
    Phase,

    /// Print every unit.
    Units,

    /// Print every owned supply center.
    Centers,

    /// Print the outcomes of the last processed phase.
    Resolutions,

    /// Print the options tree for a nation as JSON.
    Options { nation: String },

    /// Print the phase status lines for a nation.
    Messages { nation: String },

    /// Print the problems found in a nation's pending orders.
    Corroborate { nation: String },

    /// Print the nation that has won outright, if any.
    Winner,

    /// Print the whole state as JSON.
    Dump,

    /// Terminate the session.
    Quit,
}

/// Parses a single line of input into a `Command`.
///
/// Returns `None` for empty lines or unrecognized commands. Malformed
/// arguments for known commands also return `None` after logging a warning.
pub fn parse_command(line: &str) -> Option<Command> {
    let tokens: Vec<&str> = line.split_whitespace().collect();
    let (&first, rest) = tokens.split_first()?;

    match first {
        "isready" => Some(Command::IsReady),
        "newgame" => Some(Command::NewGame),
        "next" => Some(Command::Next),
        "phase" => Some(Command::Phase),
        "units" => Some(Command::Units),
        "centers" => Some(Command::Centers),
        "resolutions" => Some(Command::Resolutions),
        "dump" => Some(Command::Dump),
        "winner" => Some(Command::Winner),
        "quit" => Some(Command::Quit),

        "setoption" => parse_setoption(rest),
        "order" => parse_order(rest),
        "options" => parse_nation(rest, "options").map(|nation| Command::Options { nation }),
        "messages" => parse_nation(rest, "messages").map(|nation| Command::Messages { nation }),
        "corroborate" => {
            parse_nation(rest, "corroborate").map(|nation| Command::Corroborate { nation })
        }

        other => {
            warn!(command = other, "unknown command");
            None
        }
    }
}

/// Parses `setoption name <id> value <x>`.
fn parse_setoption(tokens: &[&str]) -> Option<Command> {
    let value_idx = tokens.iter().position(|&t| t == "value");
    match (tokens.first(), value_idx) {
        (Some(&"name"), Some(vi)) if vi > 1 && vi + 1 < tokens.len() => Some(Command::SetOption {
            name: tokens[1..vi].join(" "),
            value: tokens[vi + 1..].join(" "),
        }),
        _ => {
            warn!("malformed setoption: expected 'setoption name <id> value <x>'");
            None
        }
    }
}

/// Parses `order <prov> <type> [args]`.
fn parse_order(tokens: &[&str]) -> Option<Command> {
    if tokens.len() < 2 {
        warn!("malformed order: expected 'order <prov> <type> [args]'");
        return None;
    }
    Some(Command::Order {
        bits: tokens.iter().map(|t| t.to_string()).collect(),
    })
}

fn parse_nation(tokens: &[&str], command: &str) -> Option<String> {
    match tokens {
        [nation] => Some(nation.to_string()),
        _ => {
            warn!(command, "expected a single nation");
            None
        }
    }
}
