use anyhow::{Context, Result, bail};
use dotenvy::dotenv;
use std::env;
use std::str::FromStr;

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum StoreBackend {
    MySql,
    Memory,
}

impl FromStr for StoreBackend {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "mysql" => Ok(StoreBackend::MySql),
            "memory" => Ok(StoreBackend::Memory),
            other => bail!("unknown STORE_BACKEND {:?}, expected \"mysql\" or \"memory\"", other),
        }
    }
}

#[derive(Clone, Debug)]
pub struct Config {
    pub server_addr: String,
    pub store_backend: StoreBackend,
    pub database_url: Option<String>,
    pub db_max_connections: u32,

    // Server timeouts, in seconds
    pub request_timeout_secs: u64,
    pub keep_alive_secs: u64,
    pub disconnect_timeout_secs: u64,

    pub api_prefix: String,
    pub log_dir: String,
    pub seed_demo_data: bool,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let store_backend: StoreBackend = parse_or(&lookup, "STORE_BACKEND", StoreBackend::MySql)?;
        let database_url = lookup("DATABASE_URL");

        if store_backend == StoreBackend::MySql && database_url.is_none() {
            bail!("DATABASE_URL must be set when STORE_BACKEND is mysql");
        }

        Ok(Self {
            server_addr: lookup("SERVER_ADDR").unwrap_or_else(|| "0.0.0.0:8080".to_string()),
            store_backend,
            database_url,
            db_max_connections: parse_or(&lookup, "DB_MAX_CONNECTIONS", 10)?,

            request_timeout_secs: parse_or(&lookup, "REQUEST_TIMEOUT_SECS", 10)?,
            keep_alive_secs: parse_or(&lookup, "KEEP_ALIVE_SECS", 10)?,
            disconnect_timeout_secs: parse_or(&lookup, "DISCONNECT_TIMEOUT_SECS", 10)?,

            api_prefix: lookup("API_PREFIX").unwrap_or_default(),
            log_dir: lookup("LOG_DIR").unwrap_or_else(|| "logs".to_string()),
            seed_demo_data: parse_or(&lookup, "SEED_DEMO_DATA", false)?,
        })
    }
}

fn parse_or<T>(lookup: &impl Fn(&str) -> Option<String>, key: &str, default: T) -> Result<T>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    match lookup(key) {
        Some(raw) => raw
            .trim()
            .parse()
            .map_err(|e| anyhow::anyhow!("{}", e))
            .with_context(|| format!("invalid value {:?} for {}", raw, key)),
        None => Ok(default),
    }
}
