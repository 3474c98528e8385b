//! Configuration handling.
//!
//! Values are merged once at process start, lowest precedence first:
//! - built-in defaults
//! - an optional YAML file (`lostfound.yaml` or `--config <path>`)
//! - environment variables (`SHOPIFY_SHOP_NAME`, `SHOPIFY_ADMIN_TOKEN`, `PORT`, ...)
//!
//! The resulting [`Config`] is immutable and handed to the store client at
//! construction time.

use std::env;
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};
use url::Url;

use crate::error::{LostFoundError, Result};
use crate::types::DEFAULT_METAOBJECT_TYPE;

/// Default config file, read from the working directory when present
pub const DEFAULT_CONFIG_FILE: &str = "lostfound.yaml";

/// Admin API version used when none is configured
pub const DEFAULT_API_VERSION: &str = "2023-10";

pub const ENV_SHOP_NAME: &str = "SHOPIFY_SHOP_NAME";
pub const ENV_ADMIN_TOKEN: &str = "SHOPIFY_ADMIN_TOKEN";
pub const ENV_API_VERSION: &str = "SHOPIFY_API_VERSION";
pub const ENV_STORE_ENDPOINT: &str = "LOSTFOUND_STORE_ENDPOINT";
pub const ENV_METAOBJECT_TYPE: &str = "LOSTFOUND_METAOBJECT_TYPE";
pub const ENV_HOST: &str = "LOSTFOUND_HOST";
pub const ENV_PORT: &str = "PORT";

/// Main configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub store: StoreConfig,

    #[serde(default)]
    pub server: ServerConfig,
}

/// Remote store (Shopify Admin API) settings
#[derive(Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct StoreConfig {
    /// Shop name, with or without the `.myshopify.com` suffix
    pub shop: Option<String>,
    /// Admin API access token
    #[serde(skip_serializing)]
    pub access_token: Option<String>,
    pub api_version: String,
    /// Full GraphQL endpoint URL; overrides the one derived from `shop`
    pub endpoint: Option<String>,
    /// Metaobject type that pet records are stored as
    pub metaobject_type: String,
    pub timeout_secs: u64,
    pub connect_timeout_secs: u64,
}

impl Default for StoreConfig {
    fn default() -> Self {
        StoreConfig {
            shop: None,
            access_token: None,
            api_version: DEFAULT_API_VERSION.to_string(),
            endpoint: None,
            metaobject_type: DEFAULT_METAOBJECT_TYPE.to_string(),
            timeout_secs: 60,
            connect_timeout_secs: 30,
        }
    }
}

impl fmt::Debug for StoreConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StoreConfig")
            .field("shop", &self.shop)
            .field(
                "access_token",
                &self.access_token.as_ref().map(|_| "[REDACTED]"),
            )
            .field("api_version", &self.api_version)
            .field("endpoint", &self.endpoint)
            .field("metaobject_type", &self.metaobject_type)
            .field("timeout_secs", &self.timeout_secs)
            .field("connect_timeout_secs", &self.connect_timeout_secs)
            .finish()
    }
}

/// Inbound HTTP listener settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        ServerConfig {
            host: "0.0.0.0".to_string(),
            port: 3000,
        }
    }
}

impl ServerConfig {
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

impl Config {
    /// Load configuration from the given file (or the default file if it
    /// exists), then apply environment overrides.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let mut config = Self::load_file(path)?;
        config.apply_env_with(|key| env::var(key).ok());
        Ok(config)
    }

    /// Read the YAML layer only. An explicit path must exist; the default
    /// path is optional.
    pub fn load_file(path: Option<&Path>) -> Result<Self> {
        let path = match path {
            Some(p) => p.to_path_buf(),
            None => {
                let default = PathBuf::from(DEFAULT_CONFIG_FILE);
                if !default.exists() {
                    return Ok(Config::default());
                }
                default
            }
        };

        let content = fs::read_to_string(&path).map_err(|e| {
            LostFoundError::Config(format!("failed to read {}: {e}", path.display()))
        })?;
        let config: Config = serde_yaml_ng::from_str(&content)?;
        Ok(config)
    }

    /// Apply environment overrides using the given lookup. Empty values are
    /// ignored, as are ports that do not parse.
    pub fn apply_env_with<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        if let Some(shop) = get(ENV_SHOP_NAME) {
            self.store.shop = Some(shop);
        }
        if let Some(token) = get(ENV_ADMIN_TOKEN) {
            self.store.access_token = Some(token);
        }
        if let Some(version) = get(ENV_API_VERSION) {
            self.store.api_version = version;
        }
        if let Some(endpoint) = get(ENV_STORE_ENDPOINT) {
            self.store.endpoint = Some(endpoint);
        }
        if let Some(metaobject_type) = get(ENV_METAOBJECT_TYPE) {
            self.store.metaobject_type = metaobject_type;
        }
        if let Some(host) = get(ENV_HOST) {
            self.server.host = host;
        }
        if let Some(port) = get(ENV_PORT) {
            match port.trim().parse::<u16>() {
                Ok(port) => self.server.port = port,
                Err(_) => tracing::warn!("Ignoring invalid {ENV_PORT} value '{port}'"),
            }
        }
    }

    /// Check that the store section is usable.
    pub fn validate(&self) -> Result<()> {
        if self.access_token().is_none() {
            return Err(LostFoundError::Auth(format!(
                "Shopify access token not configured. Set {ENV_ADMIN_TOKEN} or store.access_token"
            )));
        }
        self.store_endpoint()?;
        if self.store.metaobject_type.trim().is_empty() {
            return Err(LostFoundError::Config(
                "store.metaobject_type cannot be empty".to_string(),
            ));
        }
        if self.store.timeout_secs == 0 || self.store.connect_timeout_secs == 0 {
            return Err(LostFoundError::Config(
                "store timeouts must be greater than zero".to_string(),
            ));
        }
        Ok(())
    }

    /// Access token, if configured and non-empty
    pub fn access_token(&self) -> Option<&str> {
        self.store
            .access_token
            .as_deref()
            .filter(|t| !t.trim().is_empty())
    }

    /// GraphQL endpoint: the explicit override, or the one derived from the shop name.
    pub fn store_endpoint(&self) -> Result<Url> {
        if let Some(endpoint) = &self.store.endpoint {
            return Url::parse(endpoint).map_err(|e| {
                LostFoundError::Config(format!("invalid store endpoint '{endpoint}': {e}"))
            });
        }

        let shop = self
            .store
            .shop
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .ok_or_else(|| {
                LostFoundError::Config(format!(
                    "Shopify shop not configured. Set {ENV_SHOP_NAME} or store.shop"
                ))
            })?;

        let host = if shop.ends_with(".myshopify.com") {
            shop.to_string()
        } else {
            format!("{shop}.myshopify.com")
        };
        let raw = format!(
            "https://{host}/admin/api/{}/graphql.json",
            self.store.api_version
        );
        Url::parse(&raw)
            .map_err(|e| LostFoundError::Config(format!("invalid shop name '{shop}': {e}")))
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.store.timeout_secs)
    }

    pub fn connect_timeout(&self) -> Duration {
        Duration::from_secs(self.store.connect_timeout_secs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::io::Write;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_config_default() {
        let config = Config::default();
        assert!(config.store.shop.is_none());
        assert!(config.access_token().is_none());
        assert_eq!(config.store.api_version, DEFAULT_API_VERSION);
        assert_eq!(config.store.metaobject_type, "pet");
        assert_eq!(config.server.port, 3000);
        assert_eq!(config.server.bind_address(), "0.0.0.0:3000");
    }

    #[test]
    fn test_env_overrides() {
        let mut config = Config::default();
        config.apply_env_with(lookup(&[
            (ENV_SHOP_NAME, "pawprints"),
            (ENV_ADMIN_TOKEN, "shpat_test"),
            (ENV_PORT, "8080"),
            (ENV_METAOBJECT_TYPE, "pet_profile"),
        ]));

        assert_eq!(config.store.shop.as_deref(), Some("pawprints"));
        assert_eq!(config.access_token(), Some("shpat_test"));
        assert_eq!(config.server.port, 8080);
        assert_eq!(config.store.metaobject_type, "pet_profile");
    }

    #[test]
    fn test_env_ignores_empty_and_bad_port() {
        let mut config = Config::default();
        config.store.shop = Some("from-file".to_string());
        config.apply_env_with(lookup(&[(ENV_SHOP_NAME, ""), (ENV_PORT, "not-a-port")]));

        assert_eq!(config.store.shop.as_deref(), Some("from-file"));
        assert_eq!(config.server.port, 3000);
    }

    #[test]
    fn test_store_endpoint_derived_from_shop() {
        let mut config = Config::default();
        config.store.shop = Some("pawprints".to_string());
        assert_eq!(
            config.store_endpoint().unwrap().as_str(),
            "https://pawprints.myshopify.com/admin/api/2023-10/graphql.json"
        );

        config.store.shop = Some("pawprints.myshopify.com".to_string());
        config.store.api_version = "2024-01".to_string();
        assert_eq!(
            config.store_endpoint().unwrap().as_str(),
            "https://pawprints.myshopify.com/admin/api/2024-01/graphql.json"
        );
    }

    #[test]
    fn test_store_endpoint_override_wins() {
        let mut config = Config::default();
        config.store.shop = Some("pawprints".to_string());
        config.store.endpoint = Some("http://127.0.0.1:9999/graphql".to_string());
        assert_eq!(
            config.store_endpoint().unwrap().as_str(),
            "http://127.0.0.1:9999/graphql"
        );
    }

    #[test]
    fn test_validate() {
        let mut config = Config::default();
        assert!(matches!(config.validate(), Err(LostFoundError::Auth(_))));

        config.store.access_token = Some("shpat_test".to_string());
        assert!(matches!(config.validate(), Err(LostFoundError::Config(_))));

        config.store.shop = Some("pawprints".to_string());
        assert!(config.validate().is_ok());

        config.store.metaobject_type = " ".to_string();
        assert!(config.validate().is_err());

        config.store.metaobject_type = "pet".to_string();
        config.store.timeout_secs = 0;
        assert!(config.validate().is_err());

        config.store.timeout_secs = 60;
        config.store.endpoint = Some("not a url".to_string());
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_debug_redacts_token() {
        let mut config = Config::default();
        config.store.access_token = Some("shpat_supersecret".to_string());
        let debug = format!("{config:?}");
        assert!(debug.contains("[REDACTED]"));
        assert!(!debug.contains("supersecret"));
    }

    #[test]
    fn test_load_file_yaml() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(
            file,
            "store:\n  shop: pawprints\n  metaobject_type: pet_profile\nserver:\n  port: 4000\n"
        )
        .unwrap();

        let config = Config::load_file(Some(file.path())).unwrap();
        assert_eq!(config.store.shop.as_deref(), Some("pawprints"));
        assert_eq!(config.store.metaobject_type, "pet_profile");
        assert_eq!(config.store.api_version, DEFAULT_API_VERSION);
        assert_eq!(config.server.port, 4000);
        assert_eq!(config.server.host, "0.0.0.0");
    }

    #[test]
    fn test_load_file_missing_explicit_path() {
        let dir = tempfile::TempDir::new().unwrap();
        let result = Config::load_file(Some(&dir.path().join("nope.yaml")));
        assert!(matches!(result, Err(LostFoundError::Config(_))));
    }

    #[test]
    fn test_serialization_skips_token() {
        let mut config = Config::default();
        config.store.access_token = Some("shpat_test".to_string());
        let yaml = serde_yaml_ng::to_string(&config).unwrap();
        assert!(!yaml.contains("shpat_test"));
    }
}
