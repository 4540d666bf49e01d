use serde::{Deserialize, Serialize};

/// Runtime configuration, layered defaults <- appsettings.json <- environment.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppCfg {
    /// Document store connection string; the database name is taken from
    /// the URI path when present.
    pub mongo_uri: String,
    /// Cookie-signing key material, at least 32 bytes.
    pub secret_key: String,
    pub port: u16,
}

impl Default for AppCfg {
    fn default() -> Self {
        Self {
            mongo_uri: "mongodb://localhost:27017/blog".into(),
            secret_key: "insecure-dev-secret-key-change-me-before-deploying".into(),
            port: 5000,
        }
    }
}
