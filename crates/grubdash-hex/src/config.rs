use serde::Deserialize;
use std::env;

#[derive(Debug, Deserialize, Clone, PartialEq, Eq)]
pub struct Config {
    pub server_host: String,
    pub server_port: String,
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> anyhow::Result<Self> {
        let server_host = lookup("SERVER_HOST").unwrap_or_else(|| "0.0.0.0".into());
        let server_port = lookup("SERVER_PORT").unwrap_or_else(|| "5000".into());
        if server_port.parse::<u16>().is_err() {
            anyhow::bail!("SERVER_PORT must be a port number, got {server_port:?}");
        }
        Ok(Self {
            server_host,
            server_port,
        })
    }
}
