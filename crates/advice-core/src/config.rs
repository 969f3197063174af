//! Configuration types for advice.
//!
//! [`Config::load`] layers, lowest precedence first: the embedded defaults,
//! the config file (`~/.config/advice/config.toml` unless a path is given),
//! `ADVICE_<SECTION>__<KEY>` environment variables, and finally the plain
//! `PORT` / `STORE_URI` variables. [`Config::defaults`] returns the embedded
//! defaults without touching the filesystem or environment (useful in tests).

use serde::Deserialize;
use std::path::{Path, PathBuf};

// ---------------------------------------------------------------------------
// Embedded defaults
// ---------------------------------------------------------------------------

const DEFAULT_CONFIG: &str = r#"
[server]
host = "0.0.0.0"
port = 3000

[store]
uri        = "memory://"
database   = "adviceArchive"
collection = "entries"

[client]
base_url = "http://127.0.0.1:3000"

[ui]
show_timestamps  = true
timestamp_format = "%Y-%m-%d %H:%M:%S"
"#;

// ---------------------------------------------------------------------------
// Public config types
// ---------------------------------------------------------------------------

/// Top-level application configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub store: StoreConfig,
    #[serde(default)]
    pub client: ClientConfig,
    #[serde(default)]
    pub ui: UiConfig,
}

/// `[server]` section.
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
}

fn default_host() -> String { "0.0.0.0".to_string() }
fn default_port() -> u16 { 3000 }

impl ServerConfig {
    /// `host:port` string suitable for `TcpListener::bind`.
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

/// `[store]` section. `uri` is the store connection string.
#[derive(Debug, Clone, Deserialize)]
pub struct StoreConfig {
    #[serde(default = "default_uri")]
    pub uri: String,
    #[serde(default = "default_database")]
    pub database: String,
    #[serde(default = "default_collection")]
    pub collection: String,
}

fn default_uri() -> String { "memory://".to_string() }
fn default_database() -> String { "adviceArchive".to_string() }
fn default_collection() -> String { "entries".to_string() }

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            uri: default_uri(),
            database: default_database(),
            collection: default_collection(),
        }
    }
}

/// `[client]` section, used by the terminal view.
#[derive(Debug, Clone, Deserialize)]
pub struct ClientConfig {
    #[serde(default = "default_base_url")]
    pub base_url: String,
}

fn default_base_url() -> String { "http://127.0.0.1:3000".to_string() }

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
        }
    }
}

/// `[ui]` section.
#[derive(Debug, Clone, Deserialize)]
pub struct UiConfig {
    #[serde(default = "default_show_timestamps")]
    pub show_timestamps: bool,
    #[serde(default = "default_timestamp_format")]
    pub timestamp_format: String,
}

fn default_show_timestamps() -> bool { true }
fn default_timestamp_format() -> String { "%Y-%m-%d %H:%M:%S".to_string() }

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            show_timestamps: default_show_timestamps(),
            timestamp_format: default_timestamp_format(),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::defaults()
    }
}

impl Config {
    /// Load configuration from the file at `path` (or the default location)
    /// and the process environment.
    pub fn load(path: Option<&Path>) -> anyhow::Result<Self> {
        Self::load_with_env(path, std::env::vars().collect())
    }

    /// Same as [`Config::load`] but reads variables from `vars` instead of
    /// the process environment.
    pub fn load_with_env(
        path: Option<&Path>,
        vars: config::Map<String, String>,
    ) -> anyhow::Result<Self> {
        let file = match path {
            Some(p) => config::File::from(p).required(true),
            None => config::File::from(config_path().as_path()).required(false),
        };

        let port = vars.get("PORT").cloned();
        let store_uri = vars.get("STORE_URI").cloned();

        config::Config::builder()
            .add_source(config::File::from_str(DEFAULT_CONFIG, config::FileFormat::Toml))
            .add_source(file)
            .add_source(
                config::Environment::with_prefix("ADVICE")
                    .prefix_separator("_")
                    .separator("__")
                    .source(Some(vars)),
            )
            .set_override_option("server.port", port)?
            .set_override_option("store.uri", store_uri)?
            .build()?
            .try_deserialize()
            .map_err(Into::into)
    }

    /// Return the built-in defaults without touching the filesystem.
    pub fn defaults() -> Self {
        config::Config::builder()
            .add_source(config::File::from_str(DEFAULT_CONFIG, config::FileFormat::Toml))
            .build()
            .expect("built-in default config must be valid TOML")
            .try_deserialize()
            .expect("built-in default config must deserialize correctly")
    }
}

// ---------------------------------------------------------------------------
// Path helpers
// ---------------------------------------------------------------------------

fn config_path() -> PathBuf {
    std::env::var("XDG_CONFIG_HOME")
        .map(PathBuf::from)
        .unwrap_or_else(|_| {
            PathBuf::from(std::env::var("HOME").unwrap_or_else(|_| ".".to_string()))
                .join(".config")
        })
        .join("advice")
        .join("config.toml")
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
