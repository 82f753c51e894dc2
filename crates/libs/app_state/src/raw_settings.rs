use serde::Deserialize;

/// Settings exactly as they appear in `config/settings.yaml` (plus `APP__*` overrides).
#[derive(Debug, Deserialize, Clone)]
pub struct RawSettings {
    pub api: ApiSettings,
    pub logging: LoggingSettings,
    pub secrets: SecretSettings,
    pub constants: RawConstants,
}

/// Configuration for the API server.
#[derive(Debug, Deserialize, Clone)]
pub struct ApiSettings {
    pub host: String,
    pub port: u16,
    /// Empty means any origin is allowed.
    #[serde(default)]
    pub allowed_origins: Vec<String>,
    pub public_url: String,
}

/// Logging configuration.
#[derive(Debug, Deserialize, Clone)]
pub struct LoggingSettings {
    pub level: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct SecretSettings {
    pub database_url: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct RawConstants {
    pub database: DatabaseConstants,
    pub search: RawSearchConstants,
}

/// Database connection and related configuration.
#[derive(Debug, Deserialize, Clone)]
pub struct DatabaseConstants {
    pub max_connections: u32,
    pub min_connection: u32,
    pub max_lifetime: u64,
    pub idle_timeout: u64,
    pub acquire_timeout: u64,
}

#[derive(Debug, Deserialize, Clone)]
pub struct RawSearchConstants {
    /// Page size used when a request doesn't carry a usable `limit`.
    pub default_limit: i64,
    /// Upper bound for a requested `limit`.
    pub max_limit: i64,
}
