use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::env;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    pub environment: Environment,
    pub server: ServerConfig,
    pub database: DatabaseConfig,
    pub session: SessionConfig,
    pub catalog: CatalogConfig,
    pub security: SecurityConfig,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Environment {
    Development,
    Staging,
    Production,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    pub port: u16,
    /// Front-end bundle served for any path the API does not claim.
    pub static_dir: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseConfig {
    pub url: Option<String>,
    pub max_connections: u32,
    pub connection_timeout: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionConfig {
    pub cookie_name: String,
    pub secure: bool,
    pub expiry_hours: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CatalogConfig {
    pub base_url: String,
    pub api_key: Option<String>,
    pub max_results: u32,
    pub timeout_secs: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SecurityConfig {
    /// Empty means permissive CORS.
    pub cors_origins: Vec<String>,
}

const GOOGLE_BOOKS_VOLUMES: &str = "https://www.googleapis.com/books/v1/volumes";

impl AppConfig {
    pub fn from_env() -> Self {
        let environment = match env::var("APP_ENV").as_deref() {
            Ok("production") | Ok("prod") => Environment::Production,
            Ok("staging") | Ok("stage") => Environment::Staging,
            _ => Environment::Development,
        };

        // Set defaults based on environment, then override with specific env vars
        match environment {
            Environment::Production => Self::production(),
            Environment::Staging => Self::staging(),
            Environment::Development => Self::development(),
        }
        .with_env_overrides()
    }

    fn with_env_overrides(mut self) -> Self {
        // Server overrides
        if let Some(v) = env::var("KNAPSACK_PORT").ok().or_else(|| env::var("PORT").ok()) {
            self.server.port = v.parse().unwrap_or(self.server.port);
        }
        if let Ok(v) = env::var("STATIC_DIR") {
            self.server.static_dir = Some(v).filter(|s| !s.trim().is_empty());
        }

        // Database overrides
        if let Ok(v) = env::var("DATABASE_URL") {
            self.database.url = Some(v).filter(|s| !s.trim().is_empty());
        }
        if let Ok(v) = env::var("DATABASE_MAX_CONNECTIONS") {
            self.database.max_connections = v.parse().unwrap_or(self.database.max_connections);
        }
        if let Ok(v) = env::var("DATABASE_CONNECTION_TIMEOUT") {
            self.database.connection_timeout = v.parse().unwrap_or(self.database.connection_timeout);
        }

        // Session overrides
        if let Ok(v) = env::var("SESSION_COOKIE_NAME") {
            if !v.trim().is_empty() {
                self.session.cookie_name = v;
            }
        }
        if let Ok(v) = env::var("SESSION_SECURE") {
            self.session.secure = v.parse().unwrap_or(self.session.secure);
        }
        if let Ok(v) = env::var("SESSION_EXPIRY_HOURS") {
            self.session.expiry_hours = v.parse().unwrap_or(self.session.expiry_hours);
        }

        // Catalog overrides
        if let Ok(v) = env::var("CATALOG_BASE_URL") {
            if !v.trim().is_empty() {
                self.catalog.base_url = v;
            }
        }
        if let Ok(v) = env::var("CATALOG_API_KEY") {
            self.catalog.api_key = Some(v).filter(|s| !s.trim().is_empty());
        }
        if let Ok(v) = env::var("CATALOG_MAX_RESULTS") {
            self.catalog.max_results = v.parse().unwrap_or(self.catalog.max_results);
        }
        if let Ok(v) = env::var("CATALOG_TIMEOUT_SECS") {
            self.catalog.timeout_secs = v.parse().unwrap_or(self.catalog.timeout_secs);
        }

        // Security overrides
        if let Ok(v) = env::var("SECURITY_CORS_ORIGINS") {
            self.security.cors_origins = v
                .split(',')
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty())
                .collect();
        }

        self
    }

    fn development() -> Self {
        Self {
            environment: Environment::Development,
            server: ServerConfig {
                port: 3000,
                static_dir: None,
            },
            database: DatabaseConfig {
                url: None,
                max_connections: 5,
                connection_timeout: 30,
            },
            session: SessionConfig {
                cookie_name: "sid".to_string(),
                secure: false,
                expiry_hours: 24 * 7, // 1 week
            },
            catalog: CatalogConfig {
                base_url: GOOGLE_BOOKS_VOLUMES.to_string(),
                api_key: None,
                max_results: 20,
                timeout_secs: 10,
            },
            security: SecurityConfig {
                cors_origins: Vec::new(),
            },
        }
    }

    fn staging() -> Self {
        Self {
            environment: Environment::Staging,
            server: ServerConfig {
                port: 3000,
                static_dir: None,
            },
            database: DatabaseConfig {
                url: None,
                max_connections: 10,
                connection_timeout: 10,
            },
            session: SessionConfig {
                cookie_name: "sid".to_string(),
                secure: true,
                expiry_hours: 24,
            },
            catalog: CatalogConfig {
                base_url: GOOGLE_BOOKS_VOLUMES.to_string(),
                api_key: None,
                max_results: 20,
                timeout_secs: 5,
            },
            security: SecurityConfig {
                cors_origins: vec!["https://staging.example.com".to_string()],
            },
        }
    }

    fn production() -> Self {
        Self {
            environment: Environment::Production,
            server: ServerConfig {
                port: 3000,
                static_dir: None,
            },
            database: DatabaseConfig {
                url: None,
                max_connections: 20,
                connection_timeout: 5,
            },
            session: SessionConfig {
                cookie_name: "sid".to_string(),
                secure: true,
                expiry_hours: 12,
            },
            catalog: CatalogConfig {
                base_url: GOOGLE_BOOKS_VOLUMES.to_string(),
                api_key: None,
                max_results: 20,
                timeout_secs: 5,
            },
            security: SecurityConfig {
                cors_origins: vec!["https://app.example.com".to_string()],
            },
        }
    }

    /// Development defaults with no environment overrides applied.
    pub fn for_tests() -> Self {
        Self::development()
    }
}

// Global singleton config - initialized once at startup
pub static CONFIG: Lazy<AppConfig> = Lazy::new(AppConfig::from_env);

pub fn config() -> &'static AppConfig {
    &CONFIG
}
