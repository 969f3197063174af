//! Notice popup: a blocking message shown when a submission fails.
//!
//! While a notice is up the app shell swallows every key except `Enter` and
//! `Escape`, which dismiss it.

use crate::theme::Theme;
use crate::widgets::help::centered_rect;
use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Clear, Paragraph, Widget, Wrap},
};

/// Text shown when a create request does not succeed.
pub const SUBMIT_FAILED: &str = "Something went wrong. Try again.";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub message: String,
}

impl Notice {
    pub fn submit_failed() -> Self {
        Self {
            message: SUBMIT_FAILED.to_string(),
        }
    }
}

pub struct NoticePopup<'a> {
    notice: &'a Notice,
    theme: &'a Theme,
}

impl<'a> NoticePopup<'a> {
    pub fn new(notice: &'a Notice, theme: &'a Theme) -> Self {
        Self { notice, theme }
    }
}

impl Widget for NoticePopup<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let popup = centered_rect(48, 6, area);
        Clear.render(popup, buf);

        let block = Block::bordered()
            .title(" error ")
            .border_style(self.theme.notice_border);

        let lines = vec![
            Line::from(Span::styled(
                self.notice.message.clone(),
                self.theme.notice_message,
            )),
            Line::default(),
            Line::from(Span::styled(
                "Enter to dismiss",
                Style::default().add_modifier(Modifier::DIM),
            )),
        ];

        Paragraph::new(lines)
            .block(block)
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: true })
            .render(popup, buf);
    }
}
