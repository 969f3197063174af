//! Ratatui widgets for the advice TUI.

pub mod command_bar;
pub mod entry_list;
pub mod help;
pub mod input_bar;
pub mod notice;
