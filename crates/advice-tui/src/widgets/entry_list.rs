//! Entry list widget: the scrollable newest-first pane.
//!
//! # Navigation (when pane is focused)
//!
//! | Key | Action |
//! |-----|--------|
//! | `↑` / `k` | Move cursor up one entry (scrolls view if needed) |
//! | `↓` / `j` | Move cursor down one entry |
//! | `PageUp` / `Ctrl+u` | Scroll up one page |
//! | `PageDown` / `Ctrl+d` | Scroll down one page |
//! | `g` / `Home` | Jump to the newest entry |
//!
//! # Scroll semantics
//!
//! `offset` = index of the first visible entry (0 = newest). `cursor` =
//! absolute index of the highlighted entry. The cursor is always kept inside
//! the visible window; moving it past an edge scrolls.

use std::cell::Cell;
use std::fmt::Write as _;

use crate::event::{AppEvent, Direction};
use crate::theme::Theme;
use advice_core::Entry;
use chrono::{DateTime, Local, Utc};
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    text::{Line, Span},
    widgets::{
        Block, Paragraph, Scrollbar, ScrollbarOrientation, ScrollbarState, StatefulWidget, Widget,
    },
};

const PAGE_STEP: usize = 10;

// ---------------------------------------------------------------------------
// State
// ---------------------------------------------------------------------------

pub struct EntryListState {
    pub entries: Vec<Entry>,
    /// Index of the first visible entry.
    pub offset: usize,
    /// Absolute index into `entries` of the highlighted entry.
    pub cursor: usize,
    /// Whether timestamps are shown on each entry.
    pub show_timestamps: bool,
    /// `strftime` pattern for timestamps, rendered in local time.
    pub timestamp_format: String,
    /// Cached from the last render so `handle()` can page by screenful.
    last_height: Cell<usize>,
}

impl EntryListState {
    pub fn new(show_timestamps: bool, timestamp_format: impl Into<String>) -> Self {
        Self {
            entries: Vec::new(),
            offset: 0,
            cursor: 0,
            show_timestamps,
            timestamp_format: timestamp_format.into(),
            last_height: Cell::new(20),
        }
    }

    /// Replace the whole list and return to the newest entry.
    pub fn replace(&mut self, entries: Vec<Entry>) {
        tracing::debug!(count = entries.len(), "entry list replaced");
        self.entries = entries;
        self.offset = 0;
        self.cursor = 0;
    }

    fn height(&self) -> usize {
        self.last_height.get().max(1)
    }

    fn max_offset(&self) -> usize {
        self.entries.len().saturating_sub(self.height())
    }

    /// Keep the cursor inside `[offset, offset + height)`.
    fn follow_cursor(&mut self) {
        if self.cursor < self.offset {
            self.offset = self.cursor;
        } else if self.cursor >= self.offset + self.height() {
            self.offset = self.cursor + 1 - self.height();
        }
    }

    /// Handle a navigation event from the app shell.
    pub fn handle(&mut self, event: &AppEvent) {
        let total = self.entries.len();
        if total == 0 {
            return;
        }

        match event {
            AppEvent::Nav(Direction::Up) => {
                self.cursor = self.cursor.saturating_sub(1);
                self.follow_cursor();
            }
            AppEvent::Nav(Direction::Down) => {
                if self.cursor + 1 < total {
                    self.cursor += 1;
                }
                self.follow_cursor();
            }
            AppEvent::ScrollUp => {
                self.offset = self.offset.saturating_sub(PAGE_STEP);
                self.cursor = self.cursor.saturating_sub(PAGE_STEP);
                self.follow_cursor();
            }
            AppEvent::ScrollDown => {
                self.offset = (self.offset + PAGE_STEP).min(self.max_offset());
                self.cursor = (self.cursor + PAGE_STEP).min(total - 1);
                self.follow_cursor();
            }
            AppEvent::ScrollToTop => {
                self.offset = 0;
                self.cursor = 0;
            }
            _ => return,
        }
        tracing::debug!(cursor = self.cursor, offset = self.offset, "list: moved");
    }
}

// ---------------------------------------------------------------------------
// Widget
// ---------------------------------------------------------------------------

pub struct EntryList<'a> {
    state: &'a EntryListState,
    focused: bool,
    theme: &'a Theme,
}

impl<'a> EntryList<'a> {
    pub fn new(state: &'a EntryListState, focused: bool, theme: &'a Theme) -> Self {
        Self { state, focused, theme }
    }
}

impl Widget for EntryList<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let border_style = if self.focused {
            self.theme.border_focused
        } else {
            self.theme.border_unfocused
        };

        let total = self.state.entries.len();
        let block = Block::bordered()
            .title(format!("Advice ({total})"))
            .border_style(border_style);
        let inner = block.inner(area);
        block.render(area, buf);

        let height = inner.height as usize;
        // Cache for handle(); draw always runs before the next handle().
        self.state.last_height.set(height);

        if total == 0 {
            Paragraph::new(Line::from(Span::styled(
                "No advice yet. Be the first to share some.",
                self.theme.entry_empty,
            )))
            .render(inner, buf);
            return;
        }

        let start = self.state.offset.min(total);
        let end = (start + height).min(total);

        let lines: Vec<Line<'static>> = self.state.entries[start..end]
            .iter()
            .enumerate()
            .map(|(row, entry)| {
                let line = render_entry(entry, self.state, self.theme);
                if self.focused && start + row == self.state.cursor {
                    line.patch_style(self.theme.entry_selected)
                } else {
                    line
                }
            })
            .collect();

        let text_area = Rect { width: inner.width.saturating_sub(1), ..inner };
        let sb_area = Rect {
            x: inner.right().saturating_sub(1),
            width: 1,
            ..inner
        };

        Paragraph::new(lines).render(text_area, buf);

        let mut sb_state = ScrollbarState::new(total)
            .position(start)
            .viewport_content_length(height);
        StatefulWidget::render(
            Scrollbar::new(ScrollbarOrientation::VerticalRight)
                .begin_symbol(None)
                .end_symbol(None),
            sb_area,
            buf,
            &mut sb_state,
        );
    }
}

// ---------------------------------------------------------------------------
// Entry rendering
// ---------------------------------------------------------------------------

/// Format `ts` in the local time zone. An invalid pattern falls back to
/// RFC 3339 rather than failing the draw.
pub fn format_timestamp(ts: DateTime<Utc>, pattern: &str) -> String {
    let local = ts.with_timezone(&Local);
    let mut out = String::new();
    match write!(out, "{}", local.format(pattern)) {
        Ok(()) => out,
        Err(_) => local.to_rfc3339(),
    }
}

fn render_entry(entry: &Entry, state: &EntryListState, theme: &Theme) -> Line<'static> {
    let mut spans: Vec<Span<'static>> = Vec::new();

    if state.show_timestamps {
        spans.push(Span::styled(
            format!("{}  ", format_timestamp(entry.timestamp, &state.timestamp_format)),
            theme.entry_timestamp,
        ));
    }

    // Newlines would break the one-row-per-entry layout.
    let text = entry.text.split_whitespace().collect::<Vec<_>>().join(" ");
    spans.push(Span::styled(text, theme.entry_text));

    Line::from(spans)
}
