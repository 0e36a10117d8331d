/// Configuration management for lifecycle-service
///
/// Loads configuration from environment variables with sensible defaults.
use serde::Deserialize;

#[derive(Clone, Debug, Deserialize)]
pub struct Config {
    pub app: AppConfig,
    pub database: DatabaseConfig,
    pub redis: RedisConfig,
    pub cdn: CdnConfig,
    pub signature_rpc: SignatureRpcConfig,
    pub archive_api: ArchiveApiConfig,
}

#[derive(Clone, Debug, Deserialize)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
}

#[derive(Clone, Debug, Deserialize)]
pub struct DatabaseConfig {
    pub url: String,
    pub max_connections: u32,
    pub acquire_timeout_secs: u64,
}

#[derive(Clone, Debug, Deserialize)]
pub struct RedisConfig {
    pub url: String,
}

#[derive(Clone, Debug, Deserialize)]
pub struct CdnConfig {
    /// Base URL the playback and thumbnail URLs are derived from,
    /// e.g. `https://cdn.livecast.example`.
    pub base_url: String,
}

#[derive(Clone, Debug, Deserialize)]
pub struct SignatureRpcConfig {
    /// Wallet-server JSON-RPC endpoint used for channel signature checks.
    pub endpoint: String,
    pub timeout_secs: u64,
}

#[derive(Clone, Debug, Deserialize)]
pub struct ArchiveApiConfig {
    /// Archive ingestion endpoint the finished-stream metadata is posted to.
    pub endpoint: String,
    /// Name this edge reports itself as to the archive API.
    pub server_name: String,
    pub timeout_secs: u64,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self, Box<dyn std::error::Error>> {
        Ok(Config {
            app: AppConfig {
                host: std::env::var("LIFECYCLE_SERVICE_HOST")
                    .unwrap_or_else(|_| "0.0.0.0".to_string()),
                port: std::env::var("LIFECYCLE_SERVICE_PORT")
                    .unwrap_or_else(|_| "8090".to_string())
                    .parse()
                    .unwrap_or(8090),
            },
            database: DatabaseConfig {
                url: std::env::var("DATABASE_URL")
                    .unwrap_or_else(|_| "postgresql://localhost/livecast".to_string()),
                max_connections: std::env::var("DATABASE_MAX_CONNECTIONS")
                    .unwrap_or_else(|_| "10".to_string())
                    .parse()
                    .unwrap_or(10),
                acquire_timeout_secs: std::env::var("DATABASE_ACQUIRE_TIMEOUT_SECS")
                    .unwrap_or_else(|_| "5".to_string())
                    .parse()
                    .unwrap_or(5),
            },
            redis: RedisConfig {
                url: std::env::var("REDIS_URL")
                    .unwrap_or_else(|_| "redis://localhost".to_string()),
            },
            cdn: CdnConfig {
                base_url: std::env::var("CDN_BASE_URL")
                    .unwrap_or_else(|_| "https://cdn.livecast.example".to_string()),
            },
            signature_rpc: SignatureRpcConfig {
                endpoint: std::env::var("SIGNATURE_RPC_ENDPOINT")
                    .unwrap_or_else(|_| "http://127.0.0.1:5279".to_string()),
                timeout_secs: std::env::var("SIGNATURE_RPC_TIMEOUT_SECS")
                    .unwrap_or_else(|_| "5".to_string())
                    .parse()
                    .unwrap_or(5),
            },
            archive_api: ArchiveApiConfig {
                endpoint: std::env::var("ARCHIVE_API_ENDPOINT")
                    .unwrap_or_else(|_| "http://127.0.0.1:8091/archive".to_string()),
                server_name: std::env::var("ARCHIVE_SERVER_NAME")
                    .unwrap_or_else(|_| "livecast-edge".to_string()),
                timeout_secs: std::env::var("ARCHIVE_API_TIMEOUT_SECS")
                    .unwrap_or_else(|_| "10".to_string())
                    .parse()
                    .unwrap_or(10),
            },
        })
    }
}
