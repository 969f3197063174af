use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use advice_core::config::Config;

#[derive(Parser)]
#[command(name = "advice", about = "Advice Archive: share short advice, newest first")]
struct Cli {
    /// Read configuration from this TOML file instead of ~/.config/advice/config.toml.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Verbose logs. `view` writes them to /tmp/advice-debug.log (tail -f to inspect).
    #[arg(long, global = true)]
    debug: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Run the HTTP server.
    Serve,
    /// Open the terminal view against a running server.
    View,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let config = Config::load(cli.config.as_deref())?;

    match cli.command {
        Command::Serve => {
            let default_level = if cli.debug { "debug" } else { "info" };
            tracing_subscriber::fmt()
                .with_env_filter(
                    EnvFilter::try_from_default_env()
                        .unwrap_or_else(|_| EnvFilter::new(default_level)),
                )
                .init();

            tokio::runtime::Runtime::new()?.block_on(advice::serve(config))
        }
        Command::View => {
            if cli.debug {
                let file = std::fs::OpenOptions::new()
                    .create(true)
                    .append(true)
                    .open("/tmp/advice-debug.log")?;
                tracing_subscriber::fmt()
                    .with_writer(std::sync::Mutex::new(file))
                    .with_ansi(false)
                    .with_env_filter(
                        EnvFilter::try_from_env("RUST_LOG")
                            .unwrap_or_else(|_| EnvFilter::new("debug")),
                    )
                    .init();
                tracing::info!("advice debug log started: tail -f /tmp/advice-debug.log");
            }

            advice_tui::run(config)
        }
    }
}
