// --- File: crates/schedulink_config/src/models.rs ---

use serde::{Deserialize, Serialize};

// --- General Server Config ---
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8000,
        }
    }
}

// --- Database Config ---
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct DatabaseConfig {
    pub url: String, // e.g. sqlite:data/schedulink.db, via SCHEDULINK__DATABASE__URL
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,
}

fn default_max_connections() -> u32 {
    5
}

// --- Unified App Configuration ---
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct AppConfig {
    #[serde(default)]
    pub server: ServerConfig,

    // --- Runtime Flags ---
    /// Persist users and slots through `database` instead of process memory.
    #[serde(default)]
    pub use_database: bool,
    /// Attach a permissive CORS layer to the HTTP service.
    #[serde(default = "default_true")]
    pub cors_allow_any: bool,

    #[serde(default)]
    pub database: Option<DatabaseConfig>,
}

fn default_true() -> bool {
    true
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            server: ServerConfig::default(),
            use_database: false,
            cors_allow_any: true,
            database: None,
        }
    }
}

impl AppConfig {
    /// Configuration that keeps every record in memory. Used by tests.
    pub fn in_memory() -> Self {
        Self::default()
    }

    /// Configuration backed by the given database URL.
    pub fn with_database(url: impl Into<String>) -> Self {
        Self {
            use_database: true,
            database: Some(DatabaseConfig {
                url: url.into(),
                max_connections: default_max_connections(),
            }),
            ..Self::default()
        }
    }

    /// Returns the database configuration when persistence is switched on
    /// and a non-empty URL is present.
    pub fn active_database(&self) -> Option<&DatabaseConfig> {
        if !self.use_database {
            return None;
        }
        self.database.as_ref().filter(|db| !db.url.trim().is_empty())
    }
}
