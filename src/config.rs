use derive_more::Display;
use dotenvy::dotenv;
use std::env;

const DEFAULT_SECRET_KEY: &str = "dev-secret-key-change-me";

#[derive(Clone)]
pub struct Config {
    pub server_addr: String,
    pub database_url: String,
    pub db_max_connections: u32,
    pub log_dir: String,

    pub api_prefix: String,

    // Request filtering
    pub allowed_hosts: Vec<String>,
    pub cors_allowed_origins: Vec<String>,

    pub secret_key: String,
}

#[derive(Debug, Display)]
pub enum ConfigError {
    #[display(fmt = "{} must be a number, got {:?}", key, value)]
    InvalidNumber { key: &'static str, value: String },
}

impl std::error::Error for ConfigError {}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenv().ok();

        Self::from_vars(|key| env::var(key).ok())
    }

    /// Builds the config from any key lookup, `from_env` passes the process environment.
    pub fn from_vars<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |key: &str, default: &str| lookup(key).unwrap_or_else(|| default.to_string());

        let max_connections = var("DB_MAX_CONNECTIONS", "5");
        let db_max_connections =
            max_connections
                .trim()
                .parse()
                .map_err(|_| ConfigError::InvalidNumber {
                    key: "DB_MAX_CONNECTIONS",
                    value: max_connections.clone(),
                })?;

        Ok(Self {
            server_addr: var("SERVER_ADDR", "127.0.0.1:8000"),
            database_url: var("DATABASE_URL", "sqlite://hrms_lite.db?mode=rwc"),
            db_max_connections,
            log_dir: var("LOG_DIR", "logs"),
            api_prefix: var("API_PREFIX", "/api"),
            allowed_hosts: split_list(&var("ALLOWED_HOSTS", "*")),
            cors_allowed_origins: split_list(&var("CORS_ALLOWED_ORIGINS", "")),
            secret_key: var("SECRET_KEY", DEFAULT_SECRET_KEY),
        })
    }

    /// `*` allows everything, `.example.com` allows the domain and its subdomains.
    pub fn allows_host(&self, host: &str) -> bool {
        let host = strip_port(host).to_lowercase();

        self.allowed_hosts.iter().any(|pattern| {
            let pattern = pattern.to_lowercase();
            if pattern == "*" {
                return true;
            }
            match pattern.strip_prefix('.') {
                Some(domain) => host == domain || host.ends_with(&pattern),
                None => host == pattern,
            }
        })
    }

    pub fn uses_default_secret(&self) -> bool {
        self.secret_key == DEFAULT_SECRET_KEY
    }
}

fn split_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

fn strip_port(host: &str) -> &str {
    if host.starts_with('[') {
        // [::1]:8000
        return match host.find(']') {
            Some(end) => &host[..=end],
            None => host,
        };
    }
    match host.rsplit_once(':') {
        Some((name, port)) if port.chars().all(|c| c.is_ascii_digit()) => name,
        _ => host,
    }
}
