//! Handle -> record reference lookup.

use std::sync::Arc;

use tracing::debug;

use crate::error::{LostFoundError, Result};
use crate::shopify::ShopifyClient;
use crate::shopify::graphql::{
    MetaobjectByHandleQuery, MetaobjectByHandleVariables, MetaobjectHandleInput, QueryBuilder,
};
use crate::types::{Handle, RecordReference};

/// Maps caller handles to store references with a read-only query.
///
/// Nothing is cached: the handle binding can change between calls, so every
/// request resolves again.
#[derive(Debug, Clone)]
pub struct HandleResolver {
    client: Arc<ShopifyClient>,
    metaobject_type: String,
}

impl HandleResolver {
    pub fn new(client: Arc<ShopifyClient>, metaobject_type: impl Into<String>) -> Self {
        Self {
            client,
            metaobject_type: metaobject_type.into(),
        }
    }

    /// Look up the reference for `handle`.
    ///
    /// `Ok(None)` means the store has no such record. Errors mean the lookup
    /// itself failed and existence is unknown. A record returned under a
    /// different handle is an error, not a match.
    pub async fn resolve(&self, handle: &Handle) -> Result<Option<RecordReference>> {
        let operation = MetaobjectByHandleQuery::build(MetaobjectByHandleVariables {
            handle: MetaobjectHandleInput {
                metaobject_type: self.metaobject_type.clone(),
                handle: handle.as_str().to_string(),
            },
        });

        let response = self.client.execute(operation).await?;

        let reference = match response.metaobject_by_handle {
            Some(metaobject) if metaobject.handle != handle.as_str() => {
                return Err(LostFoundError::Api(format!(
                    "lookup for handle '{handle}' returned '{}'",
                    metaobject.handle
                )));
            }
            Some(metaobject) => Some(RecordReference::new(metaobject.id.into_inner())),
            None => None,
        };

        debug!(
            handle = %handle,
            metaobject_type = %self.metaobject_type,
            found = reference.is_some(),
            "Resolved handle"
        );

        Ok(reference)
    }
}
