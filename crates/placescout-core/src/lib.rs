pub mod app_config;
pub mod business;
pub mod catalog;
pub mod config;
pub mod credentials;
pub mod store;

pub use app_config::{AppConfig, Environment};
pub use business::{Business, SearchParams, DEFAULT_RADIUS_METERS};
pub use catalog::{load_catalog, Catalog};
pub use config::{load_app_config, load_app_config_from_env};
pub use credentials::{
    mask_credential, CredentialError, CredentialStore, FileCredentialStore,
    MemoryCredentialStore, CREDENTIAL_KEY,
};
pub use store::{default_store_path, KeyedFileStore, StoreError};

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing required environment variable: {0}")]
    MissingEnvVar(String),

    #[error("invalid value for {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },

    #[error("failed to read catalog file {path}: {source}")]
    CatalogFileIo {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse catalog file: {0}")]
    CatalogFileParse(#[from] serde_yaml::Error),

    #[error("catalog validation failed: {0}")]
    Validation(String),
}
