//! Resolve-then-mutate workflow behind both endpoints.
//!
//! Each call performs at most one lookup and one mutation, sequentially, and
//! holds no state between calls. Concurrent changes to the same record are left
//! to the store (last write wins).

use std::sync::Arc;

use tracing::{info, warn};

use crate::config::Config;
use crate::error::{LostFoundError, Result};
use crate::mutator::{AppliedFields, StatusMutator};
use crate::outcome::Outcome;
use crate::resolver::HandleResolver;
use crate::shopify::ShopifyClient;
use crate::types::{Handle, StatusFieldSet};

#[derive(Debug, Clone)]
pub struct StatusWorkflow {
    resolver: HandleResolver,
    mutator: StatusMutator,
}

impl StatusWorkflow {
    pub fn new(client: Arc<ShopifyClient>, metaobject_type: impl Into<String>) -> Self {
        Self {
            resolver: HandleResolver::new(Arc::clone(&client), metaobject_type),
            mutator: StatusMutator::new(client),
        }
    }

    /// Build the store client and workflow from validated configuration.
    pub fn from_config(config: &Config) -> Result<Self> {
        let client = Arc::new(ShopifyClient::from_config(config)?);
        Ok(Self::new(client, config.store.metaobject_type.clone()))
    }

    /// Mark a pet lost, recording `location` only when one is given.
    pub async fn mark_lost(&self, handle: &Handle, location: Option<String>) -> Outcome {
        self.execute(handle, StatusFieldSet::mark_lost(location)).await
    }

    /// Mark a pet found. The last seen location is left as it is.
    pub async fn mark_found(&self, handle: &Handle) -> Outcome {
        self.execute(handle, StatusFieldSet::mark_found()).await
    }

    pub async fn execute(&self, handle: &Handle, fields: StatusFieldSet) -> Outcome {
        let status = fields.status();
        info!(
            handle = %handle,
            status = %status,
            location = ?fields.last_seen_location(),
            "Updating pet status"
        );

        match self.run(handle, &fields).await {
            Ok(applied) => {
                info!(
                    handle = %handle,
                    reference = %applied.reference,
                    status = %status,
                    confirmed = ?applied.confirmed,
                    "Pet status updated"
                );
                Outcome::Success {
                    handle: handle.clone(),
                    reference: applied.reference,
                    status,
                }
            }
            Err(LostFoundError::HandleNotFound(handle)) => {
                warn!(handle = %handle, "No pet found for handle");
                Outcome::NotFound { handle }
            }
            Err(err) => err.into(),
        }
    }

    async fn run(&self, handle: &Handle, fields: &StatusFieldSet) -> Result<AppliedFields> {
        let reference = self
            .resolver
            .resolve(handle)
            .await?
            .ok_or_else(|| LostFoundError::HandleNotFound(handle.clone()))?;

        self.mutator.apply(&reference, fields).await
    }
}
