//! Vim-style command bar: a single-line overlay at the bottom of the screen.
//!
//! Activated by pressing `:` while the entry list is focused. Displays a `:`
//! prefix followed by the typed command. `Enter` parses the command, `Escape`
//! cancels. See [`Command`] for what can be typed.

use crate::commands::Command;
use crate::event::{AppEvent, Direction};
use crate::theme::Theme;
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Clear, Widget},
};

// ---------------------------------------------------------------------------
// State
// ---------------------------------------------------------------------------

/// What the command bar wants the app shell to do after a key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommandBarOutcome {
    /// Still typing, or showing a parse error. Keep the bar open.
    Editing,
    /// Close without acting.
    Cancelled,
    /// Close and run the command.
    Submitted(Command),
}

#[derive(Debug, Default)]
pub struct CommandBarState {
    /// The text typed after the `:` prefix.
    pub input: String,
    /// Byte offset of the cursor within `input`.
    pub cursor: usize,
    /// Error message from the last failed command, cleared on the next key.
    pub error: Option<String>,
}

impl CommandBarState {
    /// Reset to a blank, error-free state. Call when opening the bar.
    pub fn clear(&mut self) {
        self.input.clear();
        self.cursor = 0;
        self.error = None;
    }

    /// Handle a key event while the command bar is focused.
    pub fn handle(&mut self, event: &AppEvent) -> CommandBarOutcome {
        // Any keypress dismisses the error display so the user can edit again.
        self.error = None;

        match event {
            AppEvent::Escape => {
                tracing::debug!("command bar cancelled");
                self.clear();
                CommandBarOutcome::Cancelled
            }
            AppEvent::Enter => match Command::parse(&self.input) {
                Ok(cmd) => {
                    tracing::debug!(command = ?cmd, "command parsed");
                    self.clear();
                    CommandBarOutcome::Submitted(cmd)
                }
                Err(msg) if msg.is_empty() => {
                    self.clear();
                    CommandBarOutcome::Cancelled
                }
                Err(msg) => {
                    self.error = Some(msg);
                    CommandBarOutcome::Editing
                }
            },
            AppEvent::Char(c) => {
                self.input.insert(self.cursor, *c);
                self.cursor += c.len_utf8();
                CommandBarOutcome::Editing
            }
            AppEvent::Backspace => {
                if self.cursor > 0 {
                    let prev = self.input[..self.cursor]
                        .char_indices()
                        .last()
                        .map(|(i, _)| i)
                        .unwrap_or(0);
                    self.input.remove(prev);
                    self.cursor = prev;
                }
                CommandBarOutcome::Editing
            }
            AppEvent::Nav(Direction::Left) => {
                if self.cursor > 0 {
                    self.cursor = self.input[..self.cursor]
                        .char_indices()
                        .last()
                        .map(|(i, _)| i)
                        .unwrap_or(0);
                }
                CommandBarOutcome::Editing
            }
            AppEvent::Nav(Direction::Right) => {
                if self.cursor < self.input.len() {
                    self.cursor = self.input[self.cursor..]
                        .char_indices()
                        .nth(1)
                        .map(|(i, _)| self.cursor + i)
                        .unwrap_or(self.input.len());
                }
                CommandBarOutcome::Editing
            }
            _ => CommandBarOutcome::Editing,
        }
    }

    /// Absolute terminal column of the text cursor within `area`.
    ///
    /// The `:` glyph occupies column 0, so the cursor starts at column 1.
    pub fn cursor_col(&self, area: Rect) -> u16 {
        let col = 1 + self.input[..self.cursor].chars().count() as u16;
        (area.x + col).min(area.right().saturating_sub(1))
    }
}

// ---------------------------------------------------------------------------
// Widget
// ---------------------------------------------------------------------------

/// Single-row command-bar overlay. The caller passes a 1-row `Rect`.
pub struct CommandBar<'a> {
    state: &'a CommandBarState,
    theme: &'a Theme,
}

impl<'a> CommandBar<'a> {
    pub fn new(state: &'a CommandBarState, theme: &'a Theme) -> Self {
        Self { state, theme }
    }
}

impl Widget for CommandBar<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        Clear.render(area, buf);

        let line = if let Some(ref err) = self.state.error {
            Line::from(Span::styled(
                format!("E  {err}"),
                Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
            ))
        } else {
            Line::from(vec![
                Span::styled(":", self.theme.border_command_bar),
                Span::raw(self.state.input.as_str()),
            ])
        };

        buf.set_line(area.x, area.y, &line, area.width);
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
