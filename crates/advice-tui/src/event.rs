//! Semantic application events: crossterm key events mapped to a
//! widget-agnostic vocabulary so widgets never touch crossterm directly.
//!
//! # Keybindings
//!
//! | Key(s)                  | Event                      |
//! |-------------------------|----------------------------|
//! | `q`, `Ctrl+c`           | `Quit`                     |
//! | `Tab`                   | `FocusNext`                |
//! | `i`                     | `InputFocus`               |
//! | `Ctrl+r`                | `Refresh`                  |
//! | `PageUp`, `Ctrl+u`      | `ScrollUp`                 |
//! | `PageDown`, `Ctrl+d`    | `ScrollDown`               |
//! | `g`                     | `ScrollToTop`              |
//! | `↑` / `k`               | `Nav(Up)`                  |
//! | `↓` / `j`               | `Nav(Down)`                |
//! | `←` / `h`               | `Nav(Left)`                |
//! | `→` / `l`               | `Nav(Right)`               |
//! | printable char          | `Char(c)`                  |
//! | `Backspace`             | `Backspace`                |
//! | `Enter`                 | `Enter`                    |
//! | `Esc`                   | `Escape`                   |
//! | terminal resize         | `Resize(w, h)`             |
//!
//! ## Insert mode
//!
//! While the advice input or the command bar is focused the event loop calls
//! [`to_app_event_insert`] instead. Every printable character is typed
//! literally; only `Ctrl+c`, `Ctrl+r`, arrows, `Tab`, `Backspace`, `Enter`
//! and `Esc` keep their bindings.

use crossterm::event::{Event, KeyCode, KeyEvent, KeyModifiers};

/// Cardinal direction for list navigation and text-cursor movement.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

/// A semantic application event derived from a raw crossterm [`Event`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AppEvent {
    /// Exit the application.
    Quit,
    /// Move keyboard focus to the other pane.
    FocusNext,
    /// Jump straight to the advice input.
    InputFocus,
    /// Re-fetch the entry list.
    Refresh,
    /// Scroll the entry list up one page.
    ScrollUp,
    /// Scroll the entry list down one page.
    ScrollDown,
    /// Jump to the newest entry.
    ScrollToTop,
    /// Arrow-style navigation.
    Nav(Direction),
    /// A printable character forwarded to the active text input.
    Char(char),
    /// Delete the character before the cursor in the active text input.
    Backspace,
    /// Submit the active input or dismiss a notice.
    Enter,
    /// The terminal was resized to the given (width, height).
    Resize(u16, u16),
    /// Dismiss the active modal or leave the input.
    Escape,
}

/// Map a raw crossterm [`Event`] to an [`AppEvent`] (navigation mode).
///
/// Returns `None` for events with no meaning to the application (mouse
/// events, unbound keys).
pub fn to_app_event(event: Event) -> Option<AppEvent> {
    match event {
        Event::Resize(w, h) => Some(AppEvent::Resize(w, h)),
        Event::Key(key) => map_key(key),
        _ => None,
    }
}

/// Map a raw crossterm [`Event`] to an [`AppEvent`] for text-input mode.
pub fn to_app_event_insert(event: Event) -> Option<AppEvent> {
    match event {
        Event::Resize(w, h) => Some(AppEvent::Resize(w, h)),
        Event::Key(key) => map_key_insert(key),
        _ => None,
    }
}

fn map_key(key: KeyEvent) -> Option<AppEvent> {
    use KeyCode::*;
    use KeyModifiers as Mod;

    match key.code {
        Char('q') if key.modifiers == Mod::NONE => Some(AppEvent::Quit),
        Char('c') if key.modifiers == Mod::CONTROL => Some(AppEvent::Quit),
        Char('r') if key.modifiers == Mod::CONTROL => Some(AppEvent::Refresh),

        Tab if key.modifiers == Mod::NONE => Some(AppEvent::FocusNext),
        Char('i') if key.modifiers == Mod::NONE => Some(AppEvent::InputFocus),

        PageUp => Some(AppEvent::ScrollUp),
        PageDown => Some(AppEvent::ScrollDown),
        Char('u') if key.modifiers == Mod::CONTROL => Some(AppEvent::ScrollUp),
        Char('d') if key.modifiers == Mod::CONTROL => Some(AppEvent::ScrollDown),
        Char('g') if key.modifiers == Mod::NONE => Some(AppEvent::ScrollToTop),
        Home => Some(AppEvent::ScrollToTop),

        Up | Char('k') if key.modifiers == Mod::NONE => Some(AppEvent::Nav(Direction::Up)),
        Down | Char('j') if key.modifiers == Mod::NONE => Some(AppEvent::Nav(Direction::Down)),
        Left | Char('h') if key.modifiers == Mod::NONE => Some(AppEvent::Nav(Direction::Left)),
        Right | Char('l') if key.modifiers == Mod::NONE => {
            Some(AppEvent::Nav(Direction::Right))
        }

        Char(c) if key.modifiers == Mod::NONE || key.modifiers == Mod::SHIFT => {
            Some(AppEvent::Char(c))
        }

        Backspace if key.modifiers == Mod::NONE => Some(AppEvent::Backspace),
        Enter if key.modifiers == Mod::NONE => Some(AppEvent::Enter),
        Esc => Some(AppEvent::Escape),

        _ => None,
    }
}

fn map_key_insert(key: KeyEvent) -> Option<AppEvent> {
    use KeyCode::*;
    use KeyModifiers as Mod;

    match key.code {
        Char('c') if key.modifiers == Mod::CONTROL => Some(AppEvent::Quit),
        Char('r') if key.modifiers == Mod::CONTROL => Some(AppEvent::Refresh),

        Up => Some(AppEvent::Nav(Direction::Up)),
        Down => Some(AppEvent::Nav(Direction::Down)),
        Left => Some(AppEvent::Nav(Direction::Left)),
        Right => Some(AppEvent::Nav(Direction::Right)),

        Tab if key.modifiers == Mod::NONE => Some(AppEvent::FocusNext),

        Char(c) if key.modifiers == Mod::NONE || key.modifiers == Mod::SHIFT => {
            Some(AppEvent::Char(c))
        }

        Backspace if key.modifiers == Mod::NONE => Some(AppEvent::Backspace),
        Enter if key.modifiers == Mod::NONE => Some(AppEvent::Enter),
        Esc => Some(AppEvent::Escape),

        _ => None,
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
