use std::env;
use std::path::PathBuf;

/// Environment variable names - single source of truth
pub mod env_vars {
    pub const PORT: &str = "PORT";
    pub const DATABASE_URL: &str = "DATABASE_URL";
    pub const DATA_FILE: &str = "DATA_FILE";
    /// Which point store backend to use: "sqlite" (default) or "json".
    pub const STORE_BACKEND: &str = "STORE_BACKEND";
}

/// Default values
pub mod defaults {
    pub const PORT: u16 = 8080;
    pub const DATABASE_URL: &str = "./.db/points.db";
    pub const DATA_FILE: &str = "./.db/points.json";
    pub const PUBLIC_DIR: &str = "public";
}

/// Storage backend selection for the point store.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreBackend {
    /// SQLite collection with per-row atomic operations and auto timestamps.
    Sqlite,
    /// Single JSON array file, rewritten whole on every mutation.
    JsonFile,
}

impl StoreBackend {
    fn from_env() -> Self {
        match env::var(env_vars::STORE_BACKEND).as_deref() {
            Ok("json") | Ok("file") => StoreBackend::JsonFile,
            Ok("sqlite") | Err(_) => StoreBackend::Sqlite,
            Ok(other) => {
                log::warn!(
                    "Unknown {} value '{}', falling back to sqlite",
                    env_vars::STORE_BACKEND,
                    other
                );
                StoreBackend::Sqlite
            }
        }
    }
}

#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub store_backend: StoreBackend,
    pub database_url: String,
    pub data_file: String,
}

impl Config {
    pub fn from_env() -> Self {
        let port = env::var(env_vars::PORT)
            .ok()
            .and_then(|p| p.parse().ok())
            .unwrap_or(defaults::PORT);

        let database_url = env::var(env_vars::DATABASE_URL)
            .unwrap_or_else(|_| defaults::DATABASE_URL.to_string());

        let data_file =
            env::var(env_vars::DATA_FILE).unwrap_or_else(|_| defaults::DATA_FILE.to_string());

        Config {
            port,
            store_backend: StoreBackend::from_env(),
            database_url,
            data_file,
        }
    }
}

/// Returns the absolute path to the backend directory.
/// Uses CARGO_MANIFEST_DIR at compile time, so it always resolves
/// regardless of the working directory at runtime.
pub fn backend_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
}

/// Get the public files directory (static map client)
pub fn public_dir() -> String {
    backend_dir()
        .join(defaults::PUBLIC_DIR)
        .to_string_lossy()
        .to_string()
}
