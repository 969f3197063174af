// ---------------------------------------------------------------------------
// Command
// ---------------------------------------------------------------------------

use crate::{
    app::{Action, AppState},
    theme::Theme,
};

/// A parsed, validated command ready to be executed by the app shell.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    // Close the app
    Quit,
    // Toggle the help popup
    Help,
    // Re-fetch the entry list
    Refresh,
    // Change theme
    Theme(String),
    // Toggle display of timestamps
    Timestamps,
    // Jump to the newest entry
    Top,
}

impl Command {
    /// Parse a raw command string (the text after the `:` prefix).
    ///
    /// Returns `Ok(cmd)` on success, `Err(message)` on failure. An empty
    /// string returns `Err("")` as a sentinel meaning "close without acting".
    pub fn parse(input: &str) -> Result<Command, String> {
        let input = input.trim();
        if input.is_empty() {
            return Err(String::new());
        }

        let (word, rest) = input
            .split_once(char::is_whitespace)
            .map(|(w, r)| (w, r.trim()))
            .unwrap_or((input, ""));

        match word {
            "q" | "quit" | "q!" | "quit!" => Ok(Command::Quit),
            "help" => Ok(Command::Help),
            "r" | "refresh" => Ok(Command::Refresh),
            "ts" | "timestamps" => Ok(Command::Timestamps),
            "top" => Ok(Command::Top),
            "theme" => {
                if rest.is_empty() {
                    Err("usage: theme <default|gruvbox>".to_string())
                } else {
                    Ok(Command::Theme(rest.to_string()))
                }
            }
            other => Err(format!("unknown command: {other}")),
        }
    }
}

/// Execute a parsed [`Command`] against the application state. Commands that
/// need the server come back as an [`Action`].
pub fn execute_command(s: &mut AppState, cmd: Command) -> Option<Action> {
    match cmd {
        Command::Quit => {
            s.quit = true;
        }
        Command::Help => {
            s.show_help = !s.show_help;
        }
        Command::Refresh => return Some(Action::Refresh),
        Command::Theme(name) => {
            s.theme = Theme::by_name(&name);
        }
        Command::Timestamps => {
            s.list.show_timestamps = !s.list.show_timestamps;
        }
        Command::Top => {
            s.list.offset = 0;
            s.list.cursor = 0;
        }
    }
    None
}
