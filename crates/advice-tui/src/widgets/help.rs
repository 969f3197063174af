//! Help popup: centred floating overlay listing all keybindings.
//!
//! Toggle with `?` from the entry list; close with `?` or `Escape`.

use crate::theme::Theme;
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Clear, Paragraph, Widget},
};

pub struct HelpPopup<'a> {
    theme: &'a Theme,
}

impl<'a> HelpPopup<'a> {
    pub fn new(theme: &'a Theme) -> Self {
        Self { theme }
    }
}

impl Widget for HelpPopup<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let popup = centered_rect(64, 16, area);
        Clear.render(popup, buf);

        let block = Block::bordered()
            .title(" advice: keybindings (? to close) ")
            .border_style(self.theme.border_focused);

        let inner = block.inner(popup);
        block.render(popup, buf);

        const BINDINGS: &[(&str, &str)] = &[
            ("Enter", "Submit advice (input focused)"),
            ("Tab", "Switch focus: input ↔ list"),
            ("i", "Focus the input"),
            ("Escape", "Leave the input"),
            ("↑ k  /  ↓ j", "Move through the list"),
            ("PageUp  /  Ctrl+u", "Scroll list up"),
            ("PageDown / Ctrl+d", "Scroll list down"),
            ("g  /  Home", "Jump to newest advice"),
            ("Ctrl+r", "Reload the list"),
            (":", "Command bar (quit, refresh, ts, theme)"),
            ("q  /  Ctrl+c", "Quit"),
            ("?", "Toggle this help popup"),
        ];

        let lines: Vec<Line> = BINDINGS
            .iter()
            .map(|(key, desc)| {
                Line::from(vec![
                    Span::styled(
                        format!("  {:<22}", key),
                        Style::default().add_modifier(Modifier::BOLD),
                    ),
                    Span::raw(*desc),
                ])
            })
            .collect();

        Paragraph::new(lines).render(inner, buf);
    }
}

pub(crate) fn centered_rect(width: u16, height: u16, area: Rect) -> Rect {
    let x = area.x + area.width.saturating_sub(width) / 2;
    let y = area.y + area.height.saturating_sub(height) / 2;
    Rect {
        x,
        y,
        width: width.min(area.width),
        height: height.min(area.height),
    }
}
