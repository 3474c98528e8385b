//! Shopify Admin GraphQL client with type-safe cynic operations.
//!
//! # Security Note - Logging
//!
//! The access token is held in a [`SecretBox`] and only exposed while building the
//! request header. The header itself goes through [`RedactedHeader`], which
//! formats as `[REDACTED]`, and is marked sensitive so reqwest/hyper never print it.
//!
//! ```bash
//! # Do NOT enable reqwest logging in production as it may still log other request details
//! # RUST_LOG=reqwest=debug  <-- AVOID IN PRODUCTION
//! ```

pub mod graphql;

use std::fmt;

use reqwest::Client;
use reqwest::header;
use secrecy::{ExposeSecret, SecretBox};
use url::Url;

use crate::config::Config;
use crate::error::{GraphQlError, LostFoundError, Result};

use graphql::{ErrorExtensions, GraphQlResponse};

/// Header Shopify reads the Admin API access token from
pub const ACCESS_TOKEN_HEADER: &str = "x-shopify-access-token";

/// Longest slice of an error body kept for diagnostics
const MAX_ERROR_BODY: usize = 512;

/// Wrapper for sensitive header values that redacts the value when formatted.
struct RedactedHeader {
    value: String,
}

impl RedactedHeader {
    fn new(value: &str) -> Self {
        Self {
            value: value.to_string(),
        }
    }

    fn as_header_value(&self) -> Result<header::HeaderValue> {
        let mut value = header::HeaderValue::from_str(&self.value).map_err(|_| {
            LostFoundError::Auth("access token contains invalid header characters".to_string())
        })?;
        value.set_sensitive(true);
        Ok(value)
    }
}

impl fmt::Display for RedactedHeader {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[REDACTED]")
    }
}

impl fmt::Debug for RedactedHeader {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RedactedHeader")
            .field("value", &"[REDACTED]")
            .finish()
    }
}

/// Client for one shop's Admin GraphQL endpoint.
///
/// Holds no per-request state; a single instance is shared by every request.
pub struct ShopifyClient {
    client: Client,
    endpoint: Url,
    access_token: SecretBox<String>,
}

impl fmt::Debug for ShopifyClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ShopifyClient")
            .field("endpoint", &self.endpoint.as_str())
            .field("access_token", &"[REDACTED]")
            .finish()
    }
}

impl ShopifyClient {
    /// Create a client from validated configuration.
    ///
    /// The HTTP client uses the configured total and connect timeouts.
    pub fn from_config(config: &Config) -> Result<Self> {
        config.validate()?;

        let access_token = config.access_token().ok_or_else(|| {
            LostFoundError::Auth("Shopify access token not configured".to_string())
        })?;
        let endpoint = config.store_endpoint()?;

        let client = Client::builder()
            .timeout(config.timeout())
            .connect_timeout(config.connect_timeout())
            .build()?;

        Ok(Self {
            client,
            endpoint,
            access_token: SecretBox::new(Box::new(access_token.to_string())),
        })
    }

    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }

    /// Execute a GraphQL operation (query or mutation) exactly once.
    ///
    /// Transport problems, non-2xx statuses, undecodable bodies, and top-level
    /// GraphQL errors all come back as errors; only `data` is returned.
    pub(crate) async fn execute<ResponseData, Vars>(
        &self,
        operation: cynic::Operation<ResponseData, Vars>,
    ) -> Result<ResponseData>
    where
        ResponseData: serde::de::DeserializeOwned + 'static,
        Vars: serde::Serialize,
    {
        let token_header = RedactedHeader::new(self.access_token.expose_secret());
        let response = self
            .client
            .post(self.endpoint.clone())
            .header(ACCESS_TOKEN_HEADER, token_header.as_header_value()?)
            .header(
                header::CONTENT_TYPE,
                header::HeaderValue::from_static("application/json"),
            )
            .json(&operation)
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            return Err(LostFoundError::Api(format!(
                "HTTP {status}: {}",
                truncate(&body, MAX_ERROR_BODY)
            )));
        }

        let result: GraphQlResponse<ResponseData, ErrorExtensions> = serde_json::from_str(&body)?;

        // Handle GraphQL errors - preserve individual error details
        if let Some(errors) = result.errors
            && !errors.is_empty()
        {
            let structured_errors: Vec<GraphQlError> = errors
                .iter()
                .map(|e| {
                    let code = e.extensions.as_ref().and_then(|ext| ext.code.clone());
                    let path = e.path.as_ref().map(|p| {
                        p.iter()
                            .map(|segment| match segment {
                                cynic::GraphQlErrorPathSegment::Field(name) => name.clone(),
                                cynic::GraphQlErrorPathSegment::Index(idx) => idx.to_string(),
                            })
                            .collect::<Vec<_>>()
                            .join(".")
                    });
                    GraphQlError {
                        message: e.message.clone(),
                        code,
                        path,
                    }
                })
                .collect();

            return Err(LostFoundError::GraphQlErrors {
                errors: structured_errors,
                partial_data: result.data.is_some(),
            });
        }

        result
            .data
            .ok_or_else(|| LostFoundError::Api("No data in Shopify response".to_string()))
    }
}

fn truncate(body: &str, max_chars: usize) -> String {
    if body.chars().count() <= max_chars {
        return body.to_string();
    }
    let mut cut: String = body.chars().take(max_chars).collect();
    cut.push_str("...");
    cut
}
