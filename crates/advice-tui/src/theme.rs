//! Colour theme for the advice TUI.
//!
//! Themes are defined as TOML files. Both built-in themes are embedded in the
//! binary via [`include_str!`] so the application works without any files on
//! disk. Call [`Theme::load_default`] at startup and pass the result through
//! the application as a shared reference.

use config::{Config, File, FileFormat};
use ratatui::style::{Color, Modifier, Style};
use serde::Deserialize;

const DEFAULT_THEME_SRC: &str = include_str!("themes/default.toml");
const GRUVBOX_DARK_THEME_SRC: &str = include_str!("themes/gruvbox_dark.toml");

// ---------------------------------------------------------------------------
// Raw (serde) types: mirror the TOML structure
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
struct RawStyle {
    fg: Option<String>,
    bg: Option<String>,
    #[serde(default)]
    bold: bool,
    #[serde(default)]
    dim: bool,
    #[serde(default)]
    italic: bool,
    #[serde(default)]
    underlined: bool,
}

impl RawStyle {
    fn into_style(self) -> Style {
        let mut style = Style::default();
        if let Some(c) = self.fg.as_deref().and_then(parse_color) {
            style = style.fg(c);
        }
        if let Some(c) = self.bg.as_deref().and_then(parse_color) {
            style = style.bg(c);
        }
        if self.bold {
            style = style.add_modifier(Modifier::BOLD);
        }
        if self.dim {
            style = style.add_modifier(Modifier::DIM);
        }
        if self.italic {
            style = style.add_modifier(Modifier::ITALIC);
        }
        if self.underlined {
            style = style.add_modifier(Modifier::UNDERLINED);
        }
        style
    }
}

#[derive(Debug, Deserialize)]
struct RawBorders {
    focused: RawStyle,
    unfocused: RawStyle,
    command_bar: RawStyle,
}

#[derive(Debug, Deserialize)]
struct RawEntries {
    timestamp: RawStyle,
    text: RawStyle,
    selected: RawStyle,
    empty: RawStyle,
}

#[derive(Debug, Deserialize)]
struct RawNotice {
    border: RawStyle,
    message: RawStyle,
}

#[derive(Debug, Deserialize)]
struct RawTitle {
    style: RawStyle,
}

#[derive(Debug, Deserialize)]
struct RawTheme {
    borders: RawBorders,
    entries: RawEntries,
    notice: RawNotice,
    title: RawTitle,
}

// ---------------------------------------------------------------------------
// Public Theme type
// ---------------------------------------------------------------------------

/// Application colour theme. All styles are pre-resolved ratatui [`Style`]
/// values.
#[derive(Debug, Clone)]
pub struct Theme {
    /// Border style for the currently focused pane.
    pub border_focused: Style,
    /// Border style for unfocused panes.
    pub border_unfocused: Style,
    pub border_command_bar: Style,

    pub entry_timestamp: Style,
    pub entry_text: Style,
    /// Highlight for the selected entry row.
    pub entry_selected: Style,
    /// Placeholder shown while the list is empty.
    pub entry_empty: Style,

    pub notice_border: Style,
    pub notice_message: Style,

    pub title: Style,
}

impl Theme {
    /// Load and parse the embedded default theme.
    ///
    /// # Panics
    ///
    /// Panics if the embedded TOML is malformed.
    pub fn load_default() -> Self {
        Self::from_toml_str(DEFAULT_THEME_SRC).expect("embedded default theme must be valid TOML")
    }

    /// Load and parse the embedded Gruvbox Dark theme.
    ///
    /// # Panics
    ///
    /// Panics if the embedded TOML is malformed.
    pub fn load_gruvbox_dark() -> Self {
        Self::from_toml_str(GRUVBOX_DARK_THEME_SRC)
            .expect("embedded gruvbox dark theme must be valid TOML")
    }

    /// Resolve a theme by name, falling back to the default for unknown names.
    pub fn by_name(name: &str) -> Self {
        match name.to_ascii_lowercase().as_str() {
            "gruvbox" | "gruvbox_dark" | "gruvbox-dark" => Self::load_gruvbox_dark(),
            _ => Self::load_default(),
        }
    }

    /// Parse a theme from a TOML string.
    pub fn from_toml_str(src: &str) -> anyhow::Result<Self> {
        let raw: RawTheme = Config::builder()
            .add_source(File::from_str(src, FileFormat::Toml))
            .build()?
            .try_deserialize()?;

        Ok(Self {
            border_focused: raw.borders.focused.into_style(),
            border_unfocused: raw.borders.unfocused.into_style(),
            border_command_bar: raw.borders.command_bar.into_style(),
            entry_timestamp: raw.entries.timestamp.into_style(),
            entry_text: raw.entries.text.into_style(),
            entry_selected: raw.entries.selected.into_style(),
            entry_empty: raw.entries.empty.into_style(),
            notice_border: raw.notice.border.into_style(),
            notice_message: raw.notice.message.into_style(),
            title: raw.title.style.into_style(),
        })
    }
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Parse a colour name into a ratatui [`Color`].
///
/// Accepts:
/// - Named terminal colours (case-insensitive): `red`, `dark_gray`, etc.
/// - Hex RGB: `#rrggbb`
/// - 256-colour indexed: `indexed:N`
fn parse_color(s: &str) -> Option<Color> {
    match s.to_ascii_lowercase().as_str() {
        "black" => Some(Color::Black),
        "red" => Some(Color::Red),
        "green" => Some(Color::Green),
        "yellow" => Some(Color::Yellow),
        "blue" => Some(Color::Blue),
        "magenta" => Some(Color::Magenta),
        "cyan" => Some(Color::Cyan),
        "gray" | "grey" => Some(Color::Gray),
        "dark_gray" | "darkgray" | "dark_grey" | "darkgrey" => Some(Color::DarkGray),
        "white" => Some(Color::White),
        s if s.starts_with('#') && s.len() == 7 => {
            let r = u8::from_str_radix(&s[1..3], 16).ok()?;
            let g = u8::from_str_radix(&s[3..5], 16).ok()?;
            let b = u8::from_str_radix(&s[5..7], 16).ok()?;
            Some(Color::Rgb(r, g, b))
        }
        s if s.starts_with("indexed:") => {
            let n: u8 = s["indexed:".len()..].parse().ok()?;
            Some(Color::Indexed(n))
        }
        _ => None,
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
