pub mod app;
pub mod commands;
pub mod event;
pub mod theme;
pub mod widgets;

use advice_client::EntriesClient;
use advice_core::config::Config;
use app::{App, AppState};
use theme::Theme;

/// Start the terminal view against the server at `config.client.base_url`.
///
/// Builds its own runtime for the HTTP client; call from a plain thread,
/// not from inside another tokio runtime.
pub fn run(config: Config) -> anyhow::Result<()> {
    let runtime = tokio::runtime::Runtime::new()?;
    let client = EntriesClient::new(&config.client.base_url)?;
    tracing::info!(base_url = %config.client.base_url, "starting advice view");

    let state = AppState::new(config, Theme::load_default());
    App::new(state, client, runtime.handle().clone()).run()
}
