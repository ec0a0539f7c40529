//! Environment-driven configuration.
//!
//! All settings come from environment variables (a `.env` file is honored in
//! development). `from_env` applies defaults and rejects values that can never
//! work; `validate` checks the cross-field requirements of the selected
//! backends before the server starts.

use crate::storage_types::StorageBackend;
use std::env;
use std::fmt;
use std::str::FromStr;

const DEFAULT_PORT: &str = "4000";
const DEFAULT_ENVIRONMENT: &str = "development";
const DEFAULT_CORS_ORIGINS: &str = "*";
const DEFAULT_STORAGE_BACKEND: &str = "s3";
const DEFAULT_METADATA_BACKEND: &str = "postgres";
const DEFAULT_DB_MAX_CONNECTIONS: &str = "20";
const DEFAULT_DB_TIMEOUT_SECONDS: &str = "30";
const DEFAULT_SEARCH_FUNCTION_URL: &str =
    "https://us-central1-your-project.cloudfunctions.net/searchFiles";

/// Supported metadata document stores
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MetadataBackend {
    Postgres,
    Memory,
}

impl FromStr for MetadataBackend {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "postgres" => Ok(MetadataBackend::Postgres),
            "memory" => Ok(MetadataBackend::Memory),
            _ => Err(anyhow::anyhow!("Invalid metadata backend: {}", s)),
        }
    }
}

impl fmt::Display for MetadataBackend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MetadataBackend::Postgres => write!(f, "postgres"),
            MetadataBackend::Memory => write!(f, "memory"),
        }
    }
}

/// Application configuration loaded from the environment
#[derive(Debug, Clone)]
pub struct Config {
    pub server_port: u16,
    pub environment: String,
    pub cors_origins: Vec<String>,
    pub storage_backend: StorageBackend,
    pub s3_bucket: Option<String>,
    pub s3_region: Option<String>,
    pub aws_region: Option<String>,
    pub s3_endpoint: Option<String>,
    pub local_storage_path: Option<String>,
    pub local_storage_base_url: Option<String>,
    pub metadata_backend: MetadataBackend,
    pub database_url: Option<String>,
    pub db_max_connections: u32,
    pub db_timeout_seconds: u64,
    pub search_function_url: String,
}

impl Config {
    pub fn from_env() -> Result<Self, anyhow::Error> {
        dotenvy::dotenv().ok();

        let environment = env::var("ENVIRONMENT")
            .or_else(|_| env::var("APP_ENV"))
            .unwrap_or_else(|_| DEFAULT_ENVIRONMENT.to_string());

        let cors_origins: Vec<String> = env::var("CORS_ORIGINS")
            .unwrap_or_else(|_| DEFAULT_CORS_ORIGINS.to_string())
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        let is_production = environment == "production" || environment == "prod";
        if is_production && cors_origins.iter().any(|origin| origin == "*") {
            return Err(anyhow::anyhow!(
                "CORS_ORIGINS must list explicit origins in production, wildcard is not allowed"
            ));
        }

        let server_port = env::var("SERVER_PORT")
            .or_else(|_| env::var("PORT"))
            .unwrap_or_else(|_| DEFAULT_PORT.to_string())
            .parse::<u16>()
            .map_err(|_| anyhow::anyhow!("SERVER_PORT must be a valid port number"))?;

        let storage_backend = env::var("STORAGE_BACKEND")
            .unwrap_or_else(|_| DEFAULT_STORAGE_BACKEND.to_string())
            .parse::<StorageBackend>()?;

        let metadata_backend = env::var("METADATA_BACKEND")
            .unwrap_or_else(|_| DEFAULT_METADATA_BACKEND.to_string())
            .parse::<MetadataBackend>()?;

        let db_max_connections = env::var("DB_MAX_CONNECTIONS")
            .unwrap_or_else(|_| DEFAULT_DB_MAX_CONNECTIONS.to_string())
            .parse::<u32>()
            .map_err(|_| anyhow::anyhow!("DB_MAX_CONNECTIONS must be a valid number"))?;

        let db_timeout_seconds = env::var("DB_TIMEOUT_SECONDS")
            .unwrap_or_else(|_| DEFAULT_DB_TIMEOUT_SECONDS.to_string())
            .parse::<u64>()
            .map_err(|_| anyhow::anyhow!("DB_TIMEOUT_SECONDS must be a valid number"))?;

        Ok(Config {
            server_port,
            environment,
            cors_origins,
            storage_backend,
            s3_bucket: env::var("S3_BUCKET").ok(),
            s3_region: env::var("S3_REGION").ok(),
            aws_region: env::var("AWS_REGION").ok(),
            s3_endpoint: env::var("S3_ENDPOINT").ok(),
            local_storage_path: env::var("LOCAL_STORAGE_PATH").ok(),
            local_storage_base_url: env::var("LOCAL_STORAGE_BASE_URL").ok(),
            metadata_backend,
            database_url: env::var("DATABASE_URL").ok(),
            db_max_connections,
            db_timeout_seconds,
            search_function_url: env::var("SEARCH_FUNCTION_URL")
                .unwrap_or_else(|_| DEFAULT_SEARCH_FUNCTION_URL.to_string()),
        })
    }

    pub fn is_production(&self) -> bool {
        self.environment == "production" || self.environment == "prod"
    }

    /// Check cross-field requirements of the selected backends.
    pub fn validate(&self) -> Result<(), anyhow::Error> {
        match self.storage_backend {
            StorageBackend::S3 => {
                if self.s3_bucket.is_none() {
                    return Err(anyhow::anyhow!(
                        "S3_BUCKET is required when STORAGE_BACKEND is s3"
                    ));
                }
                if self.s3_region.is_none() && self.aws_region.is_none() {
                    return Err(anyhow::anyhow!(
                        "S3_REGION or AWS_REGION is required when STORAGE_BACKEND is s3"
                    ));
                }
            }
            StorageBackend::Local => {
                if self.local_storage_path.is_none() {
                    return Err(anyhow::anyhow!(
                        "LOCAL_STORAGE_PATH is required when STORAGE_BACKEND is local"
                    ));
                }
                if self.local_storage_base_url.is_none() {
                    return Err(anyhow::anyhow!(
                        "LOCAL_STORAGE_BASE_URL is required when STORAGE_BACKEND is local"
                    ));
                }
            }
        }

        if self.metadata_backend == MetadataBackend::Postgres {
            let url = self.database_url.as_deref().ok_or_else(|| {
                anyhow::anyhow!("DATABASE_URL is required when METADATA_BACKEND is postgres")
            })?;
            if !url.starts_with("postgresql://") && !url.starts_with("postgres://") {
                return Err(anyhow::anyhow!(
                    "DATABASE_URL must be a postgresql:// connection string"
                ));
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base_config() -> Config {
        Config {
            server_port: 4000,
            environment: "test".to_string(),
            cors_origins: vec!["*".to_string()],
            storage_backend: StorageBackend::Local,
            s3_bucket: None,
            s3_region: None,
            aws_region: None,
            s3_endpoint: None,
            local_storage_path: Some("/tmp/medley".to_string()),
            local_storage_base_url: Some("http://localhost:4000/media".to_string()),
            metadata_backend: MetadataBackend::Memory,
            database_url: None,
            db_max_connections: 20,
            db_timeout_seconds: 30,
            search_function_url: DEFAULT_SEARCH_FUNCTION_URL.to_string(),
        }
    }

    #[test]
    fn test_validate_local_backend() {
        let config = base_config();
        assert!(config.validate().is_ok());

        let mut missing_path = base_config();
        missing_path.local_storage_path = None;
        assert!(missing_path.validate().is_err());
    }

    #[test]
    fn test_validate_s3_requires_bucket_and_region() {
        let mut config = base_config();
        config.storage_backend = StorageBackend::S3;
        assert!(config.validate().is_err());

        config.s3_bucket = Some("media".to_string());
        assert!(config.validate().is_err());

        config.aws_region = Some("us-east-1".to_string());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validate_postgres_requires_database_url() {
        let mut config = base_config();
        config.metadata_backend = MetadataBackend::Postgres;
        assert!(config.validate().is_err());

        config.database_url = Some("mysql://nope".to_string());
        assert!(config.validate().is_err());

        config.database_url = Some("postgresql://localhost/medley".to_string());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_parse_metadata_backend() {
        assert_eq!(
            "memory".parse::<MetadataBackend>().unwrap(),
            MetadataBackend::Memory
        );
        assert!("redis".parse::<MetadataBackend>().is_err());
    }
}
