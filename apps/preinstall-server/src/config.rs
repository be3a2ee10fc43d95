//! Server configuration: defaults, optional YAML file, environment, CLI flags

use anyhow::{Context, Result};
use figment::{
    providers::{Env, Format, Yaml},
    Figment,
};
use serde::Deserialize;
use std::path::PathBuf;

/// Command line flags that override file and environment configuration
#[derive(Debug, Clone, Default, clap::Parser)]
#[command(name = "preinstall-server", version, about = "Pre-install registration server")]
pub struct Cli {
    /// Path to a YAML configuration file
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Interface to listen on
    #[arg(long)]
    pub host: Option<String>,

    /// Port to listen on
    #[arg(short, long)]
    pub port: Option<u16>,

    /// SQLite connection URL
    #[arg(long)]
    pub database_url: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AppConfig {
    #[serde(default)]
    pub server: ServerConfig,

    #[serde(default)]
    pub logging: LoggingConfig,

    #[serde(default)]
    pub registry: preinstall_registry::Config,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,

    #[serde(default = "default_port")]
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

impl ServerConfig {
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LoggingConfig {
    /// Default filter directive; `RUST_LOG` wins when set
    #[serde(default = "default_level")]
    pub level: String,

    /// Emit JSON lines instead of human-readable output
    #[serde(default)]
    pub json: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_level(),
            json: false,
        }
    }
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    3000
}

fn default_level() -> String {
    "info".to_string()
}

impl AppConfig {
    /// Layer YAML file, bare `PORT`, and `PREINSTALL_*` variables, then apply CLI flags
    pub fn load(cli: &Cli) -> Result<Self> {
        let mut figment = Figment::new();
        if let Some(path) = &cli.config {
            figment = figment.merge(Yaml::file_exact(path));
        }
        figment = figment
            .merge(Env::raw().only(&["PORT"]).map(|_| "server.port".into()))
            .merge(Env::prefixed("PREINSTALL_").split("__"));

        let mut config = Self::from_figment(figment)?;
        config.apply_cli(cli);
        Ok(config)
    }

    pub fn from_figment(figment: Figment) -> Result<Self> {
        figment
            .extract()
            .context("invalid server configuration")
    }

    fn apply_cli(&mut self, cli: &Cli) {
        if let Some(host) = &cli.host {
            self.server.host = host.clone();
        }
        if let Some(port) = cli.port {
            self.server.port = port;
        }
        if let Some(url) = &cli.database_url {
            self.registry.database_url = url.clone();
        }
    }
}
