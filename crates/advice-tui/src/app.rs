//! Top-level application state and the main event loop.
//!
//! [`AppState`] is a pure state machine: key events go in, [`Action`]s that
//! need the server come out, and the results of those actions are fed back
//! through [`AppState::apply_list`] and [`AppState::apply_create`].
//! [`App::run`] owns the terminal and the HTTP client and wires the two
//! together.

use crate::{
    commands::execute_command,
    event::{self, AppEvent},
    theme::Theme,
    widgets::{
        command_bar::{CommandBar, CommandBarOutcome, CommandBarState},
        entry_list::{EntryList, EntryListState},
        help::HelpPopup,
        input_bar::{InputBar, InputBarState},
        notice::{Notice, NoticePopup},
    },
};
use advice_client::{ClientError, EntriesClient};
use advice_core::{config::Config, Entry};
use crossterm::{
    event::{self as ct_event, Event, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Constraint, Direction as LayoutDir, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    Frame, Terminal,
};
use std::{io, time::Duration};
use tokio::runtime::Handle;

// ---------------------------------------------------------------------------
// Focus + actions
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Focus {
    Input,
    List,
    /// Vim-style `:` command line is active.
    Command,
}

/// Work the shell must do against the server.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    /// Fetch the list and replace what is shown.
    Refresh,
    /// Create an entry with this (already trimmed, non-empty) text.
    Submit(String),
}

// ---------------------------------------------------------------------------
// AppState
// ---------------------------------------------------------------------------

pub struct AppState {
    pub list: EntryListState,
    pub input: InputBarState,
    pub focus: Focus,
    /// Focus state before entering command mode, restored on exit.
    pub prev_focus: Focus,
    pub theme: Theme,
    pub config: Config,
    pub show_help: bool,
    /// Blocking error popup; `Some` swallows all input until dismissed.
    pub notice: Option<Notice>,
    pub command_bar: CommandBarState,
    pub quit: bool,
}

impl AppState {
    pub fn new(config: Config, theme: Theme) -> Self {
        let list = EntryListState::new(
            config.ui.show_timestamps,
            config.ui.timestamp_format.clone(),
        );

        Self {
            list,
            input: InputBarState::default(),
            focus: Focus::Input,
            prev_focus: Focus::Input,
            theme,
            config,
            show_help: false,
            notice: None,
            command_bar: CommandBarState::default(),
            quit: false,
        }
    }

    /// True when a text widget has focus, so letters type instead of acting
    /// as shortcuts.
    pub fn is_insert_mode(&self) -> bool {
        matches!(self.focus, Focus::Input | Focus::Command)
    }

    /// Feed one key event through the state machine.
    pub fn handle(&mut self, event: AppEvent) -> Option<Action> {
        if self.notice.is_some() {
            if matches!(event, AppEvent::Enter | AppEvent::Escape) {
                tracing::debug!("notice dismissed");
                self.notice = None;
            }
            return None;
        }

        if self.show_help {
            if matches!(event, AppEvent::Char('?') | AppEvent::Escape | AppEvent::Quit) {
                tracing::debug!("help popup closed");
                self.show_help = false;
            }
            return None;
        }

        if self.focus == Focus::Command {
            return match self.command_bar.handle(&event) {
                CommandBarOutcome::Editing => None,
                CommandBarOutcome::Cancelled => {
                    self.focus = self.prev_focus;
                    None
                }
                CommandBarOutcome::Submitted(cmd) => {
                    self.focus = self.prev_focus;
                    execute_command(self, cmd)
                }
            };
        }

        match event {
            AppEvent::Quit => {
                tracing::debug!("quit");
                self.quit = true;
                None
            }
            AppEvent::Refresh => Some(Action::Refresh),
            AppEvent::Resize(_, _) => None,
            AppEvent::FocusNext => {
                self.focus = match self.focus {
                    Focus::Input => Focus::List,
                    Focus::List | Focus::Command => Focus::Input,
                };
                tracing::debug!(focus = ?self.focus, "focus cycle");
                None
            }
            other => match self.focus {
                Focus::Input => self.handle_input(other),
                Focus::List => self.handle_list(other),
                Focus::Command => None,
            },
        }
    }

    fn handle_input(&mut self, event: AppEvent) -> Option<Action> {
        match event {
            AppEvent::Enter => {
                let text = self.input.submission();
                if text.is_none() {
                    tracing::debug!("blank submission ignored");
                }
                text.map(Action::Submit)
            }
            AppEvent::Escape => {
                self.focus = Focus::List;
                None
            }
            other => {
                self.input.handle(&other);
                None
            }
        }
    }

    fn handle_list(&mut self, event: AppEvent) -> Option<Action> {
        match event {
            AppEvent::Char('?') => {
                tracing::debug!("help popup opened");
                self.show_help = true;
            }
            AppEvent::Char(':') => {
                tracing::debug!(prev_focus = ?self.focus, "entering command mode");
                self.prev_focus = self.focus;
                self.command_bar.clear();
                self.focus = Focus::Command;
            }
            AppEvent::InputFocus => {
                self.focus = Focus::Input;
            }
            other => self.list.handle(&other),
        }
        None
    }

    /// Outcome of [`Action::Refresh`]. A failure keeps the current list.
    pub fn apply_list(&mut self, result: Result<Vec<Entry>, ClientError>) {
        match result {
            Ok(entries) => self.list.replace(entries),
            Err(e) => tracing::warn!(error = %e, "error loading entries"),
        }
    }

    /// Outcome of [`Action::Submit`]. Success clears the input and asks for a
    /// refresh; failure raises the notice and leaves the input as typed.
    pub fn apply_create(&mut self, result: Result<Entry, ClientError>) -> Option<Action> {
        match result {
            Ok(entry) => {
                tracing::info!(id = entry.id, "advice submitted");
                self.input.clear();
                Some(Action::Refresh)
            }
            Err(e) => {
                tracing::warn!(error = %e, "error submitting advice");
                self.notice = Some(Notice::submit_failed());
                None
            }
        }
    }
}

// ---------------------------------------------------------------------------
// App
// ---------------------------------------------------------------------------

pub struct App {
    state: AppState,
    client: EntriesClient,
    runtime: Handle,
}

impl App {
    /// `runtime` drives the client's requests; the event loop itself is
    /// synchronous and must not run on a runtime worker thread.
    pub fn new(state: AppState, client: EntriesClient, runtime: Handle) -> Self {
        Self {
            state,
            client,
            runtime,
        }
    }

    /// Set up the terminal, load the list, run the event loop, and restore
    /// the terminal on exit.
    pub fn run(mut self) -> anyhow::Result<()> {
        install_panic_hook();

        enable_raw_mode()?;
        execute!(io::stdout(), EnterAlternateScreen)?;
        let backend = CrosstermBackend::new(io::stdout());
        let mut terminal = Terminal::new(backend)?;

        self.perform(Action::Refresh);
        let result = self.event_loop(&mut terminal);

        // Always restore terminal, even if the loop returned an error
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen);
        let _ = terminal.show_cursor();

        result
    }

    fn event_loop(
        &mut self,
        terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    ) -> anyhow::Result<()> {
        loop {
            {
                let s = &self.state;
                terminal.draw(|frame| draw(frame, s))?;
            }

            if self.state.quit {
                break;
            }

            if !ct_event::poll(Duration::from_millis(16))? {
                continue;
            }

            let raw = ct_event::read()?;
            if let Event::Key(key) = &raw {
                if key.kind != KeyEventKind::Press {
                    continue;
                }
            }

            let app_event = if self.state.is_insert_mode() {
                event::to_app_event_insert(raw)
            } else {
                event::to_app_event(raw)
            };

            if let Some(ev) = app_event {
                tracing::debug!(focus = ?self.state.focus, event = ?ev, "key event");
                if let Some(action) = self.state.handle(ev) {
                    self.perform(action);
                }
            }
        }
        Ok(())
    }

    /// Run `action` and any follow-up it produces, one request at a time.
    fn perform(&mut self, action: Action) {
        let mut next = Some(action);
        while let Some(action) = next.take() {
            tracing::debug!(action = ?action, "performing");
            next = match action {
                Action::Refresh => {
                    let result = self.runtime.block_on(self.client.list());
                    self.state.apply_list(result);
                    None
                }
                Action::Submit(text) => {
                    let result = self.runtime.block_on(self.client.create(&text));
                    self.state.apply_create(result)
                }
            };
        }
    }
}

// ---------------------------------------------------------------------------
// Rendering
// ---------------------------------------------------------------------------

fn draw(frame: &mut Frame, state: &AppState) {
    let area = frame.area();

    // Vertical: 1-line title | entry list | 3-line input
    let vert = Layout::default()
        .direction(LayoutDir::Vertical)
        .constraints([
            Constraint::Length(1),
            Constraint::Fill(1),
            Constraint::Length(3),
        ])
        .split(area);

    let title = Line::from(vec![
        Span::styled(" Advice Archive ", state.theme.title),
        Span::styled(
            " ? help · Tab switch · Ctrl+r reload",
            Style::default().add_modifier(Modifier::DIM),
        ),
    ]);
    frame.render_widget(title, vert[0]);

    frame.render_widget(
        EntryList::new(&state.list, state.focus == Focus::List, &state.theme),
        vert[1],
    );
    frame.render_widget(
        InputBar::new(&state.input, state.focus == Focus::Input, &state.theme),
        vert[2],
    );

    if state.show_help {
        frame.render_widget(HelpPopup::new(&state.theme), area);
    }

    if let Some(notice) = &state.notice {
        frame.render_widget(NoticePopup::new(notice, &state.theme), area);
        return;
    }

    // Command bar overlays the bottom row of the screen
    if state.focus == Focus::Command {
        let cmd_area = Rect { y: area.bottom().saturating_sub(1), height: 1, ..area };
        frame.render_widget(CommandBar::new(&state.command_bar, &state.theme), cmd_area);
        let col = state.command_bar.cursor_col(cmd_area);
        frame.set_cursor_position((col, cmd_area.y));
        return;
    }

    if state.focus == Focus::Input {
        let bar = InputBar::new(&state.input, true, &state.theme);
        frame.set_cursor_position(bar.cursor_position(vert[2]));
    }
}

// ---------------------------------------------------------------------------
// Terminal helpers
// ---------------------------------------------------------------------------

fn install_panic_hook() {
    let original = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen);
        original(info);
    }));
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::widgets::notice::SUBMIT_FAILED;
    use chrono::Utc;
    use pretty_assertions::assert_eq;

    fn state() -> AppState {
        AppState::new(Config::defaults(), Theme::load_default())
    }

    fn type_str(s: &mut AppState, text: &str) {
        for c in text.chars() {
            assert_eq!(s.handle(AppEvent::Char(c)), None);
        }
    }

    fn entry(id: u64, text: &str) -> Entry {
        Entry {
            id,
            text: text.to_string(),
            timestamp: Utc::now(),
        }
    }

    fn server_error() -> ClientError {
        ClientError::Status {
            status: hyper::StatusCode::INTERNAL_SERVER_ERROR,
            message: "Could not save entry".to_string(),
        }
    }

    #[test]
    fn starts_focused_on_input() {
        let s = state();
        assert_eq!(s.focus, Focus::Input);
        assert!(s.is_insert_mode());
    }

    #[test]
    fn enter_submits_trimmed_text() {
        let mut s = state();
        type_str(&mut s, "  be kind  ");
        assert_eq!(
            s.handle(AppEvent::Enter),
            Some(Action::Submit("be kind".to_string()))
        );
        // Input is only cleared once the server accepts it.
        assert_eq!(s.input.text, "  be kind  ");
    }

    #[test]
    fn blank_submission_does_nothing() {
        let mut s = state();
        assert_eq!(s.handle(AppEvent::Enter), None);
        type_str(&mut s, "   ");
        assert_eq!(s.handle(AppEvent::Enter), None);
        assert!(s.notice.is_none());
    }

    #[test]
    fn successful_create_clears_input_and_refreshes() {
        let mut s = state();
        type_str(&mut s, "drink water");
        s.handle(AppEvent::Enter);
        assert_eq!(
            s.apply_create(Ok(entry(1, "drink water"))),
            Some(Action::Refresh)
        );
        assert!(s.input.text.is_empty());
        assert!(s.notice.is_none());
    }

    #[test]
    fn failed_create_raises_notice_and_keeps_input() {
        let mut s = state();
        type_str(&mut s, "drink water");
        s.handle(AppEvent::Enter);
        assert_eq!(s.apply_create(Err(server_error())), None);
        assert_eq!(s.input.text, "drink water");
        assert_eq!(s.notice.as_ref().unwrap().message, SUBMIT_FAILED);
    }

    #[test]
    fn notice_blocks_input_until_dismissed() {
        let mut s = state();
        s.apply_create(Err(server_error()));

        assert_eq!(s.handle(AppEvent::Char('x')), None);
        assert_eq!(s.handle(AppEvent::Refresh), None);
        assert!(s.input.text.is_empty());
        assert!(s.notice.is_some());

        s.handle(AppEvent::Enter);
        assert!(s.notice.is_none());
        s.handle(AppEvent::Char('x'));
        assert_eq!(s.input.text, "x");
    }

    #[test]
    fn list_success_replaces_everything() {
        let mut s = state();
        s.apply_list(Ok(vec![entry(1, "old")]));
        s.apply_list(Ok(vec![entry(3, "newest"), entry(2, "newer")]));
        let texts: Vec<&str> = s.list.entries.iter().map(|e| e.text.as_str()).collect();
        assert_eq!(texts, vec!["newest", "newer"]);
    }

    #[test]
    fn list_failure_keeps_stale_entries_silently() {
        let mut s = state();
        s.apply_list(Ok(vec![entry(1, "still here")]));
        s.apply_list(Err(server_error()));
        assert_eq!(s.list.entries.len(), 1);
        assert!(s.notice.is_none());
    }

    #[test]
    fn refresh_key_requests_list() {
        let mut s = state();
        assert_eq!(s.handle(AppEvent::Refresh), Some(Action::Refresh));
    }

    #[test]
    fn help_and_command_only_from_list() {
        let mut s = state();
        s.handle(AppEvent::Char('?'));
        assert!(!s.show_help);
        assert_eq!(s.input.text, "?");

        s.handle(AppEvent::Escape);
        assert_eq!(s.focus, Focus::List);
        s.handle(AppEvent::Char('?'));
        assert!(s.show_help);
        s.handle(AppEvent::Escape);
        assert!(!s.show_help);

        s.handle(AppEvent::Char(':'));
        assert_eq!(s.focus, Focus::Command);
        for c in "refresh".chars() {
            s.handle(AppEvent::Char(c));
        }
        assert_eq!(s.handle(AppEvent::Enter), Some(Action::Refresh));
        assert_eq!(s.focus, Focus::List);
    }

    #[test]
    fn tab_cycles_between_input_and_list() {
        let mut s = state();
        s.handle(AppEvent::FocusNext);
        assert_eq!(s.focus, Focus::List);
        s.handle(AppEvent::FocusNext);
        assert_eq!(s.focus, Focus::Input);
    }

    #[test]
    fn quit_sets_flag() {
        let mut s = state();
        s.handle(AppEvent::Quit);
        assert!(s.quit);
    }
}
