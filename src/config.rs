use anyhow::{Context, Result};
use dotenvy::dotenv;
use std::env;

#[derive(Clone, Debug)]
pub struct Config {
    pub mongo_uri: String,
    /// Falls back to the URI's default database, then `test`
    pub database_name: Option<String>,
    pub server_host: String,
    pub port: u16,
    pub log_dir: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenv().ok();

        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds the config from any key lookup; blank values count as unset.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let var = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        Ok(Self {
            mongo_uri: var("MONGO_URI").context("MONGO_URI must be set")?,
            database_name: var("MONGO_DB"),
            server_host: var("SERVER_HOST").unwrap_or_else(|| "0.0.0.0".to_string()),
            port: match var("PORT") {
                Some(port) => port
                    .trim()
                    .parse()
                    .with_context(|| format!("PORT must be a valid port number, got {port:?}"))?,
                None => 3000,
            },
            log_dir: var("LOG_DIR").unwrap_or_else(|| "logs".to_string()),
        })
    }
}
