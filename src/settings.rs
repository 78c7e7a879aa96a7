use std::env;
use std::path::PathBuf;

use anyhow::{Context, Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreBackend {
    Postgres,
    Memory,
}

/// Process configuration read from the environment.
#[derive(Debug, Clone)]
pub struct Settings {
    pub log_level: String,
    pub store_backend: StoreBackend,
    pub db_host: String,
    pub db_port: u16,
    pub db_user: String,
    pub db_pass: String,
    pub db_name: String,
    pub xml_url: String,
    pub xml_file_path: PathBuf,
    pub server_host: String,
    pub server_port: u16,
    pub server_tls: bool,
    pub server_public_key: PathBuf,
    pub server_private_key: PathBuf,
    pub token_secret: String,
}

impl Settings {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Builds settings from an arbitrary variable source. Empty values fall
    /// back to the default.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |name: &str, default: &str| -> String {
            lookup(name)
                .filter(|v| !v.is_empty())
                .unwrap_or_else(|| default.to_string())
        };

        let store_backend = match get("STORE_BACKEND", "postgres").to_lowercase().as_str() {
            "postgres" => StoreBackend::Postgres,
            "memory" => StoreBackend::Memory,
            other => anyhow::bail!("Unknown STORE_BACKEND: {}", other),
        };
        let server_tls = get("SERVER_TLS", "true")
            .parse::<bool>()
            .context("SERVER_TLS must be true or false")?;

        Ok(Self {
            log_level: get("LOG_LEVEL", "info"),
            store_backend,
            db_host: get("DB_HOST", "localhost"),
            db_port: parse_port(&get("DB_PORT", "5432"), "DB_PORT")?,
            db_user: get("DB_USER", "secretdbuser"),
            db_pass: get("DB_PASS", "secretdbpass"),
            db_name: get("DB_NAME", "currency_api_db"),
            xml_url: get(
                "XML_URL_PATH",
                "https://www.ecb.europa.eu/stats/eurofxref/eurofxref-hist-90d.xml",
            ),
            xml_file_path: get("XML_FILE_PATH", "./data/eurofxref-hist-90d.xml").into(),
            server_host: get("SERVER_HOST", "localhost"),
            server_port: parse_port(&get("SERVER_PORT", "9988"), "SERVER_PORT")?,
            server_tls,
            server_public_key: get("SERVER_PUBLIC_KEY", "./certs/cert.pem").into(),
            server_private_key: get("SERVER_PRIVATE_KEY", "./certs/key.pem").into(),
            token_secret: get("TOKEN_SECRET", "notSoSecret"),
        })
    }

    pub fn database_url(&self) -> String {
        format!(
            "postgres://{}:{}@{}:{}/{}?sslmode=disable",
            self.db_user, self.db_pass, self.db_host, self.db_port, self.db_name
        )
    }

    pub fn bind_address(&self) -> (String, u16) {
        (self.server_host.clone(), self.server_port)
    }
}

fn parse_port(value: &str, name: &str) -> Result<u16> {
    value
        .parse()
        .with_context(|| format!("{} is not a valid port: {:?}", name, value))
}
