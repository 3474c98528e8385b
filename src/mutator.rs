//! Partial-field status mutation against a resolved record.

use std::sync::Arc;

use tracing::{debug, warn};

use crate::error::{LostFoundError, Result};
use crate::shopify::ShopifyClient;
use crate::shopify::graphql::{
    MetaobjectFieldInput, MetaobjectUpdateInput, MetaobjectUpdateMutation,
    MetaobjectUpdatePayload, MetaobjectUpdateVariables, MetaobjectUserError, MutationBuilder,
};
use crate::types::{FieldError, RecordReference, StatusFieldSet};

/// Field name reported when the store does not say which input it rejected
const UNKNOWN_FIELD: &str = "unknown";

/// Fields the store confirmed after a successful update
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppliedFields {
    pub reference: RecordReference,
    pub confirmed: Vec<String>,
}

/// Writes a [`StatusFieldSet`] to one record.
///
/// The update replaces only the named fields, so applying the same set twice
/// leaves the record in the same state.
#[derive(Debug, Clone)]
pub struct StatusMutator {
    client: Arc<ShopifyClient>,
}

impl StatusMutator {
    pub fn new(client: Arc<ShopifyClient>) -> Self {
        Self { client }
    }

    /// Send one `metaobjectUpdate` and classify the result.
    ///
    /// Field-level rejections come back as [`LostFoundError::ValidationRejected`].
    /// A payload with no user errors but no written value echoed back, or
    /// echoed for a different record, is [`LostFoundError::AmbiguousMutation`].
    pub async fn apply(
        &self,
        reference: &RecordReference,
        fields: &StatusFieldSet,
    ) -> Result<AppliedFields> {
        let inputs: Vec<MetaobjectFieldInput> = fields
            .writes()
            .into_iter()
            .map(|write| MetaobjectFieldInput {
                key: write.key.to_string(),
                value: write.value,
            })
            .collect();

        debug!(
            reference = %reference,
            fields = ?fields.keys(),
            "Applying metaobject update"
        );

        let operation = MetaobjectUpdateMutation::build(MetaobjectUpdateVariables {
            id: cynic::Id::new(reference.as_str()),
            metaobject: MetaobjectUpdateInput {
                fields: Some(inputs),
            },
        });

        let response = self.client.execute(operation).await?;

        let payload = response.metaobject_update.ok_or_else(|| {
            LostFoundError::AmbiguousMutation(format!(
                "metaobjectUpdate returned no payload for {reference}"
            ))
        })?;

        classify_payload(reference, fields, payload)
    }
}

fn classify_payload(
    reference: &RecordReference,
    fields: &StatusFieldSet,
    payload: MetaobjectUpdatePayload,
) -> Result<AppliedFields> {
    if !payload.user_errors.is_empty() {
        let errors: Vec<FieldError> = payload.user_errors.iter().map(to_field_error).collect();
        warn!(reference = %reference, errors = ?errors, "Store rejected field values");
        return Err(LostFoundError::ValidationRejected(errors));
    }

    let metaobject = payload.metaobject.ok_or_else(|| {
        LostFoundError::AmbiguousMutation(format!(
            "no user errors and no metaobject returned for {reference}"
        ))
    })?;

    if metaobject.id.inner() != reference.as_str() {
        return Err(LostFoundError::AmbiguousMutation(format!(
            "update for {reference} returned metaobject {}",
            metaobject.id.inner()
        )));
    }

    let writes = fields.writes();
    let mut confirmed = Vec::new();
    for write in &writes {
        let returned = metaobject
            .fields
            .iter()
            .find(|field| field.key == write.key)
            .and_then(|field| field.value.as_deref());
        if returned == Some(write.value.as_str()) {
            confirmed.push(write.key.to_string());
        } else {
            warn!(
                reference = %reference,
                key = write.key,
                sent = %write.value,
                returned = ?returned,
                "Store did not echo written value"
            );
        }
    }

    if confirmed.is_empty() {
        return Err(LostFoundError::AmbiguousMutation(format!(
            "no user errors but none of {:?} confirmed for {reference}",
            fields.keys()
        )));
    }

    Ok(AppliedFields {
        reference: reference.clone(),
        confirmed,
    })
}

/// Name a user error by the last element of its input path,
/// e.g. `["fields", "last_seen_location"]` -> `last_seen_location`.
fn to_field_error(error: &MetaobjectUserError) -> FieldError {
    let field = error
        .field
        .as_ref()
        .and_then(|path| path.last())
        .map(String::as_str)
        .unwrap_or(UNKNOWN_FIELD);
    FieldError::new(field, error.message.clone())
}
