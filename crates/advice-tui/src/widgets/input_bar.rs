//! Input bar widget: the advice text field at the bottom of the screen.
//!
//! # Editing
//!
//! - `Char(c)` inserts at the cursor.
//! - `Backspace` deletes the character before the cursor.
//! - `Nav(Left)` / `Nav(Right)` move the cursor.
//!
//! Submission is handled by the app shell, which reads [`InputBarState::text`]
//! on `Enter`. The bar never clears itself.

use crate::event::{AppEvent, Direction};
use crate::theme::Theme;
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Paragraph, Widget},
};

// ---------------------------------------------------------------------------
// State
// ---------------------------------------------------------------------------

#[derive(Debug, Default)]
pub struct InputBarState {
    /// The advice typed so far.
    pub text: String,
    /// Byte offset of the cursor within `text`.
    pub cursor: usize,
}

impl InputBarState {
    pub fn clear(&mut self) {
        self.text.clear();
        self.cursor = 0;
    }

    /// The text as it would be submitted, or `None` if it is blank.
    pub fn submission(&self) -> Option<String> {
        let trimmed = self.text.trim();
        (!trimmed.is_empty()).then(|| trimmed.to_string())
    }

    /// Handle a key event from the app shell. Non-editing events are ignored.
    pub fn handle(&mut self, event: &AppEvent) {
        match event {
            AppEvent::Char(c) => {
                self.text.insert(self.cursor, *c);
                self.cursor += c.len_utf8();
            }
            AppEvent::Backspace => {
                if self.cursor > 0 {
                    let prev = self.prev_boundary();
                    self.text.remove(prev);
                    self.cursor = prev;
                }
            }
            AppEvent::Nav(Direction::Left) => {
                if self.cursor > 0 {
                    self.cursor = self.prev_boundary();
                }
            }
            AppEvent::Nav(Direction::Right) => {
                if self.cursor < self.text.len() {
                    self.cursor = self.text[self.cursor..]
                        .char_indices()
                        .nth(1)
                        .map(|(i, _)| self.cursor + i)
                        .unwrap_or(self.text.len());
                }
            }
            _ => return,
        }
        tracing::trace!(len = self.text.len(), cursor = self.cursor, "input edited");
    }

    fn prev_boundary(&self) -> usize {
        self.text[..self.cursor]
            .char_indices()
            .last()
            .map(|(i, _)| i)
            .unwrap_or(0)
    }
}

// ---------------------------------------------------------------------------
// Widget
// ---------------------------------------------------------------------------

pub struct InputBar<'a> {
    state: &'a InputBarState,
    focused: bool,
    theme: &'a Theme,
}

impl<'a> InputBar<'a> {
    pub fn new(state: &'a InputBarState, focused: bool, theme: &'a Theme) -> Self {
        Self { state, focused, theme }
    }

    /// Absolute terminal position of the text cursor within this widget's
    /// rendered area. Pass to `frame.set_cursor_position()` after rendering.
    pub fn cursor_position(&self, area: Rect) -> (u16, u16) {
        let col = u16::try_from(self.state.text[..self.state.cursor].chars().count())
            .unwrap_or(u16::MAX);
        let x = area
            .x
            .saturating_add(1)
            .saturating_add(col)
            .min(area.right().saturating_sub(2));
        (x, area.y.saturating_add(1))
    }
}

impl Widget for InputBar<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let border_style = if self.focused {
            self.theme.border_focused
        } else {
            self.theme.border_unfocused
        };

        let block = Block::bordered()
            .title("Share your advice (Enter to submit)")
            .border_style(border_style);

        let line = if self.state.text.is_empty() && !self.focused {
            Line::from(Span::styled(
                "press i to write",
                Style::default().add_modifier(Modifier::DIM),
            ))
        } else {
            Line::from(self.state.text.as_str())
        };

        Paragraph::new(line).block(block).render(area, buf);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn typed(s: &str) -> InputBarState {
        let mut state = InputBarState::default();
        for c in s.chars() {
            state.handle(&AppEvent::Char(c));
        }
        state
    }

    #[test]
    fn typing_and_backspace() {
        let mut state = typed("kind");
        state.handle(&AppEvent::Backspace);
        assert_eq!(state.text, "kin");
        assert_eq!(state.cursor, 3);
    }

    #[test]
    fn cursor_moves_over_multibyte_chars() {
        let mut state = typed("né");
        state.handle(&AppEvent::Nav(Direction::Left));
        assert_eq!(state.cursor, 1);
        state.handle(&AppEvent::Char('x'));
        assert_eq!(state.text, "nxé");
        state.handle(&AppEvent::Nav(Direction::Right));
        assert_eq!(state.cursor, state.text.len());
    }

    #[test]
    fn submission_is_trimmed() {
        assert_eq!(typed("  be kind  ").submission().as_deref(), Some("be kind"));
    }

    #[test]
    fn blank_input_has_no_submission() {
        assert_eq!(typed("   ").submission(), None);
        assert_eq!(InputBarState::default().submission(), None);
    }

    #[test]
    fn cursor_follows_short_input() {
        let state = typed("né");
        let theme = Theme::load_default();
        let area = Rect::new(4, 20, 40, 3);
        assert_eq!(InputBar::new(&state, true, &theme).cursor_position(area), (7, 21));
    }

    #[test]
    fn cursor_is_clamped_for_input_longer_than_u16() {
        let text = "a".repeat(usize::from(u16::MAX) + 10);
        let state = InputBarState {
            cursor: text.len(),
            text,
        };
        let theme = Theme::load_default();

        let area = Rect::new(10, 5, 40, 3);
        assert_eq!(InputBar::new(&state, true, &theme).cursor_position(area), (48, 6));

        let edge = Rect::new(u16::MAX - 40, 5, 40, 3);
        let (x, _) = InputBar::new(&state, true, &theme).cursor_position(edge);
        assert_eq!(x, edge.right().saturating_sub(2));
    }
}
