//! Environment-based secret store adapter
//!
//! Reads secrets such as the routing API key from environment variables,
//! for local use and containerized deployments.

use application::{error::ApplicationError, ports::SecretStorePort};
use async_trait::async_trait;
use std::env;
use tracing::{debug, instrument, warn};

use crate::config::ENV_PREFIX;

/// Secret store that reads from environment variables
///
/// Keys are uppercased with slashes and hyphens replaced by underscores.
/// For example: "routing/api_key" becomes "TRAILMAP_ROUTING_API_KEY" with
/// the default prefix.
#[derive(Debug, Clone)]
pub struct EnvSecretStore {
    prefix: Option<String>,
}

impl Default for EnvSecretStore {
    fn default() -> Self {
        Self::with_prefix(ENV_PREFIX)
    }
}

impl EnvSecretStore {
    /// Create a store using the `TRAILMAP` prefix
    pub fn new() -> Self {
        Self::default()
    }

    /// Create with a custom prefix
    ///
    /// # Example
    /// ```
    /// use infrastructure::adapters::EnvSecretStore;
    ///
    /// let store = EnvSecretStore::with_prefix("MYAPP");
    /// // Looking up "routing/api_key" will check "MYAPP_ROUTING_API_KEY"
    /// ```
    pub fn with_prefix(prefix: impl Into<String>) -> Self {
        Self {
            prefix: Some(prefix.into()),
        }
    }

    /// Create a store that looks up bare variable names
    pub const fn unprefixed() -> Self {
        Self { prefix: None }
    }

    fn key_to_env_var(&self, key: &str) -> String {
        let normalized = key.replace(['/', '-'], "_").to_uppercase();

        match &self.prefix {
            Some(prefix) => format!("{prefix}_{normalized}"),
            None => normalized,
        }
    }
}

#[async_trait]
impl SecretStorePort for EnvSecretStore {
    #[instrument(skip(self), fields(env_var))]
    async fn get_secret(&self, key: &str) -> Result<String, ApplicationError> {
        let env_var = self.key_to_env_var(key);
        tracing::Span::current().record("env_var", &env_var);

        match env::var(&env_var) {
            Ok(value) => {
                debug!("Retrieved secret from environment variable");
                Ok(value)
            },
            Err(env::VarError::NotPresent) => {
                warn!(env_var = %env_var, "Secret not found in environment");
                Err(ApplicationError::NotFound(format!(
                    "Secret not found: {key} (env: {env_var})"
                )))
            },
            Err(env::VarError::NotUnicode(_)) => Err(ApplicationError::Configuration(format!(
                "Secret contains invalid UTF-8: {env_var}"
            ))),
        }
    }

    async fn exists(&self, key: &str) -> Result<bool, ApplicationError> {
        Ok(env::var(self.key_to_env_var(key)).is_ok())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_prefix_matches_config_env() {
        let store = EnvSecretStore::new();
        assert_eq!(
            store.key_to_env_var("routing/api_key"),
            "TRAILMAP_ROUTING_API_KEY"
        );
    }

    #[test]
    fn key_transformation_with_hyphens() {
        let store = EnvSecretStore::unprefixed();
        assert_eq!(store.key_to_env_var("ors-api-key"), "ORS_API_KEY");
    }

    #[test]
    fn key_transformation_custom_prefix() {
        let store = EnvSecretStore::with_prefix("APP");
        assert_eq!(
            store.key_to_env_var("secret/data/routing/api-key"),
            "APP_SECRET_DATA_ROUTING_API_KEY"
        );
    }

    #[tokio::test]
    async fn get_secret_from_existing_env() {
        // PATH exists on every test host
        let store = EnvSecretStore::unprefixed();
        let value = store.get_secret("path").await.unwrap();
        assert!(!value.is_empty());
        assert!(store.exists("path").await.unwrap());
    }

    #[tokio::test]
    async fn get_secret_not_found() {
        let store = EnvSecretStore::new();
        let result = store.get_secret("definitely/not/exists/xyz789").await;

        assert!(matches!(result, Err(ApplicationError::NotFound(_))));
        assert!(!store.exists("definitely/not/exists/xyz789").await.unwrap());
    }
}
