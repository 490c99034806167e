use std::{env, net::SocketAddr, path::PathBuf};
use tracing::warn;

pub const DEFAULT_PORT: u16 = 3000;
pub const DEFAULT_DATABASE_URL: &str = "data/todolist.json";

#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    /// Plain path or `file://` URL of the JSON document store.
    pub database_url: String,
}

impl Config {
    pub fn from_env() -> Self {
        Self::from_values(env::var("PORT").ok(), env::var("DATABASE_URL").ok())
    }

    fn from_values(port: Option<String>, database_url: Option<String>) -> Self {
        let port = match port {
            Some(value) => value.trim().parse::<u16>().unwrap_or_else(|_| {
                warn!("invalid PORT {value:?}, using {DEFAULT_PORT}");
                DEFAULT_PORT
            }),
            None => DEFAULT_PORT,
        };
        let database_url = database_url
            .filter(|value| !value.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_DATABASE_URL.to_string());

        Self { port, database_url }
    }

    pub fn data_path(&self) -> PathBuf {
        let url = self.database_url.trim();
        PathBuf::from(url.strip_prefix("file://").unwrap_or(url))
    }

    pub fn bind_addr(&self) -> SocketAddr {
        SocketAddr::from(([0, 0, 0, 0], self.port))
    }
}
