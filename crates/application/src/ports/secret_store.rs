//! Port for secret retrieval
//!
//! Credentials such as the routing API key are looked up through this port
//! so they never have to live in code or in committed configuration.

use async_trait::async_trait;

use crate::error::ApplicationError;

/// Port for secret storage backends (environment, vault, ...)
#[async_trait]
pub trait SecretStorePort: Send + Sync {
    /// Retrieve a secret by its key path (e.g. "routing/api_key")
    async fn get_secret(&self, key: &str) -> Result<String, ApplicationError>;

    /// Check whether a secret exists without reading it
    async fn exists(&self, key: &str) -> Result<bool, ApplicationError>;
}
