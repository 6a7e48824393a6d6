use std::env;
use std::path::PathBuf;

/// Environment variable names - single source of truth
pub mod env_vars {
    pub const PORT: &str = "PORT";
    pub const BIND_ADDRESS: &str = "BIND_ADDRESS";
    /// Path of the JSON file holding every note
    pub const NOTES_DATA_PATH: &str = "NOTES_DATA_PATH";
    /// Comma-separated list of allowed browser origins, or "*" for any
    pub const CORS_ORIGIN: &str = "CORS_ORIGIN";
    /// Built browser client to serve at "/" (optional)
    pub const CLIENT_DIST_DIR: &str = "CLIENT_DIST_DIR";
}

/// Default values
pub mod defaults {
    pub const PORT: u16 = 3000;
    pub const BIND_ADDRESS: &str = "0.0.0.0";
    pub const DATA_DIR: &str = "data";
    pub const DATA_FILE: &str = "notes.json";
    pub const CORS_ORIGIN: &str = "http://localhost:8080";
}

/// Returns the absolute path to the notes-backend directory.
/// Uses CARGO_MANIFEST_DIR at compile time, so it always resolves
/// to notes-backend/ regardless of the working directory at runtime.
pub fn backend_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
}

/// Default location of the notes data file
pub fn default_data_path() -> PathBuf {
    backend_dir().join(defaults::DATA_DIR).join(defaults::DATA_FILE)
}

/// Allowed CORS origins
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum CorsOrigins {
    Any,
    List(Vec<String>),
}

impl CorsOrigins {
    pub fn parse(raw: &str) -> Self {
        let origins: Vec<String> = raw
            .split(',')
            .map(|s| s.trim().trim_end_matches('/').to_string())
            .filter(|s| !s.is_empty())
            .collect();

        if origins.iter().any(|o| o == "*") {
            CorsOrigins::Any
        } else if origins.is_empty() {
            CorsOrigins::List(vec![defaults::CORS_ORIGIN.to_string()])
        } else {
            CorsOrigins::List(origins)
        }
    }
}

#[derive(Clone, Debug)]
pub struct Config {
    pub port: u16,
    pub bind_address: String,
    pub data_path: PathBuf,
    pub cors_origins: CorsOrigins,
    pub client_dist_dir: Option<PathBuf>,
}

impl Config {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build the config from any key lookup (the process environment in production)
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |key: &str| lookup(key).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());

        let port = match var(env_vars::PORT) {
            Some(raw) => raw.parse().unwrap_or_else(|_| {
                log::warn!(
                    "{} must be a valid port number (got {:?}), using {}",
                    env_vars::PORT,
                    raw,
                    defaults::PORT
                );
                defaults::PORT
            }),
            None => defaults::PORT,
        };

        Self {
            port,
            bind_address: var(env_vars::BIND_ADDRESS)
                .unwrap_or_else(|| defaults::BIND_ADDRESS.to_string()),
            data_path: var(env_vars::NOTES_DATA_PATH)
                .map(PathBuf::from)
                .unwrap_or_else(default_data_path),
            cors_origins: CorsOrigins::parse(
                &var(env_vars::CORS_ORIGIN).unwrap_or_else(|| defaults::CORS_ORIGIN.to_string()),
            ),
            client_dist_dir: var(env_vars::CLIENT_DIST_DIR).map(PathBuf::from),
        }
    }
}
