use clap::{Parser, Subcommand};
use serde::Deserialize;
use std::path::{Path, PathBuf};

#[derive(Parser, Debug)]
#[command(name = "holonet", about = "A small REST API for planets, characters and favorites")]
pub struct Cli {
    /// Path to config file
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Host to bind to
    #[arg(long, global = true)]
    pub host: Option<String>,

    /// Port to bind to
    #[arg(short, long, env = "PORT", global = true)]
    pub port: Option<u16>,

    /// Path to data directory
    #[arg(long, global = true)]
    pub data_dir: Option<PathBuf>,

    /// SQLite database location (`sqlite://path` or a bare path)
    #[arg(long, env = "DATABASE_URL", global = true)]
    pub database_url: Option<String>,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Subcommand, Debug, Clone, PartialEq)]
pub enum Command {
    /// Run the HTTP server (default)
    Serve,
    /// Load planets and characters into the database
    Seed {
        /// TOML catalog to load instead of the built-in one
        #[arg(long)]
        file: Option<PathBuf>,
    },
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Unsupported database URL `{0}`: only sqlite databases are supported")]
    UnsupportedDatabase(String),

    #[error("Could not determine home directory")]
    NoHomeDir,
}

#[derive(Deserialize, Debug, Clone, Default)]
#[serde(default)]
pub struct Config {
    pub server: ServerConfig,
    pub database: DatabaseConfig,
    pub auth: AuthConfig,
    pub favorites: FavoritesConfig,
}

#[derive(Deserialize, Debug, Clone)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

#[derive(Deserialize, Debug, Clone, Default)]
#[serde(default)]
pub struct DatabaseConfig {
    pub path: Option<PathBuf>,
}

#[derive(Deserialize, Debug, Clone)]
#[serde(default)]
pub struct AuthConfig {
    pub bcrypt_cost: u32,
}

/// Who favorite mutations act on behalf of until real authentication exists.
#[derive(Deserialize, Debug, Clone)]
#[serde(default)]
pub struct FavoritesConfig {
    pub owner_id: i64,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 3000,
        }
    }
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            bcrypt_cost: bcrypt::DEFAULT_COST,
        }
    }
}

impl Default for FavoritesConfig {
    fn default() -> Self {
        Self { owner_id: 3 }
    }
}

impl Config {
    pub fn load(cli: &Cli) -> anyhow::Result<Self> {
        let data_dir = Self::data_dir(cli)?;
        let config_path = cli
            .config
            .clone()
            .unwrap_or_else(|| data_dir.join("config.toml"));

        let mut config = if config_path.exists() {
            let content = std::fs::read_to_string(&config_path)?;
            toml::from_str(&content)?
        } else {
            Config::default()
        };

        // CLI / environment overrides
        if let Some(ref host) = cli.host {
            config.server.host = host.clone();
        }
        if let Some(port) = cli.port {
            config.server.port = port;
        }
        if let Some(ref url) = cli.database_url {
            config.database.path = Some(parse_database_url(url)?);
        }

        if config.database.path.is_none() {
            config.database.path = Some(data_dir.join("holonet.db"));
        }

        Ok(config)
    }

    pub fn data_dir(cli: &Cli) -> Result<PathBuf, ConfigError> {
        match cli.data_dir {
            Some(ref dir) => Ok(dir.clone()),
            None => dirs::home_dir()
                .map(|home| home.join(".holonet"))
                .ok_or(ConfigError::NoHomeDir),
        }
    }

    /// Database file location. Only `None` before [`Config::load`] resolved it.
    pub fn db_path(&self) -> Option<&Path> {
        self.database.path.as_deref()
    }
}

/// Accepts `sqlite://path`, `sqlite:path` or a bare filesystem path.
pub fn parse_database_url(url: &str) -> Result<PathBuf, ConfigError> {
    if let Some(path) = url.strip_prefix("sqlite://") {
        return Ok(PathBuf::from(path));
    }
    if let Some(path) = url.strip_prefix("sqlite:") {
        return Ok(PathBuf::from(path));
    }
    if url.contains("://") {
        return Err(ConfigError::UnsupportedDatabase(url.to_string()));
    }
    Ok(PathBuf::from(url))
}
