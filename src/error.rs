use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("No data directory available")]
    NoDataDir,
    #[error("Storage I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Storage database error: {0}")]
    Sqlite(#[from] rusqlite::Error),
    #[error("Stored value could not be encoded: {0}")]
    Encode(#[from] serde_json::Error),
}

#[derive(Debug, Error)]
pub enum FixtureError {
    #[error("Failed to read fixture {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Fixture is not valid platform data: {0}")]
    Parse(#[from] serde_json::Error),
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("No config directory available")]
    NoConfigDir,
    #[error("Config I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Config is not valid TOML: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("Config could not be written as TOML: {0}")]
    Serialize(#[from] toml::ser::Error),
    #[error("Legacy config is not valid JSON: {0}")]
    Legacy(#[from] serde_json::Error),
}

#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Storage(#[from] StorageError),
    #[error(transparent)]
    Fixture(#[from] FixtureError),
    #[error(transparent)]
    Config(#[from] ConfigError),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
