use serde::Deserialize;
use std::path::PathBuf;
use thiserror::Error;

const IDENTITY_URL: &str = "https://identitytoolkit.googleapis.com/v1";
const DATABASE_URL: &str = "https://sippure-default-rtdb.firebaseio.com";
const MEDIA_UPLOAD_URL: &str = "https://api.cloudinary.com/v1_1/sippure";

/// Errors that can occur while loading the application configuration.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// A required environment variable is not set.
    #[error("missing required environment variable {0}")]
    MissingVar(&'static str),
}

/// Endpoints and keys for the hosted services the app talks to.
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    /// Base URL of the identity service REST API.
    pub identity_url: String,
    /// Browser API key sent with every identity call.
    pub identity_api_key: String,
    /// Base URL of the hierarchical database.
    pub database_url: String,
    /// Base URL of the media upload endpoint.
    pub media_upload_url: String,
    /// Unsigned upload preset accepted by the media service.
    pub media_upload_preset: String,
    /// Directory for device-local data such as remembered credentials.
    pub data_dir: PathBuf,
}

impl AppConfig {
    /// Loads the configuration from the environment, falling back to the
    /// production endpoints. Only the identity API key has no default.
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let identity_api_key = std::env::var("SIPPURE_API_KEY")
            .map_err(|_| ConfigError::MissingVar("SIPPURE_API_KEY"))?;

        Ok(Self {
            identity_url: env_or("SIPPURE_IDENTITY_URL", IDENTITY_URL),
            identity_api_key,
            database_url: env_or("SIPPURE_DATABASE_URL", DATABASE_URL),
            media_upload_url: env_or("SIPPURE_MEDIA_URL", MEDIA_UPLOAD_URL),
            media_upload_preset: env_or("SIPPURE_MEDIA_PRESET", "sippure_unsigned"),
            data_dir: env_or("SIPPURE_DATA_DIR", ".sippure").into(),
        })
    }
}

fn env_or(name: &str, default: &str) -> String {
    std::env::var(name).unwrap_or_else(|_| default.to_string())
}
