//! cynic operation types for the metaobject slice of the Shopify Admin API.

// Re-export cynic types we need
pub use cynic::{GraphQlResponse, MutationBuilder, QueryBuilder};

// Import schema from the dedicated lostfound-schema crate.
// The import MUST be named `schema` for cynic derives to work.
use lostfound_schema::shopify as schema;

use serde::Deserialize;

/// Error extensions attached to Shopify top-level GraphQL errors
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct ErrorExtensions {
    pub code: Option<String>,
}

// Lookup by handle

#[derive(cynic::QueryVariables, Debug)]
pub struct MetaobjectByHandleVariables {
    pub handle: MetaobjectHandleInput,
}

/// Natural key of a metaobject: its type plus handle
#[derive(cynic::InputObject, Debug, Clone)]
#[cynic(rename_all = "camelCase")]
pub struct MetaobjectHandleInput {
    #[cynic(rename = "type")]
    pub metaobject_type: String,
    pub handle: String,
}

#[derive(cynic::QueryFragment, Debug)]
#[cynic(graphql_type = "QueryRoot", variables = "MetaobjectByHandleVariables")]
pub struct MetaobjectByHandleQuery {
    #[arguments(handle: $handle)]
    pub metaobject_by_handle: Option<MetaobjectRef>,
}

#[derive(cynic::QueryFragment, Debug)]
#[cynic(graphql_type = "Metaobject")]
pub struct MetaobjectRef {
    pub id: cynic::Id,
    pub handle: String,
}

// Partial field update

#[derive(cynic::QueryVariables, Debug)]
pub struct MetaobjectUpdateVariables {
    pub id: cynic::Id,
    pub metaobject: MetaobjectUpdateInput,
}

/// Only `fields` is sent; the handle and other attributes stay as they are.
#[derive(cynic::InputObject, Debug, Clone)]
#[cynic(rename_all = "camelCase")]
pub struct MetaobjectUpdateInput {
    pub fields: Option<Vec<MetaobjectFieldInput>>,
}

#[derive(cynic::InputObject, Debug, Clone, PartialEq)]
#[cynic(rename_all = "camelCase")]
pub struct MetaobjectFieldInput {
    pub key: String,
    pub value: String,
}

#[derive(cynic::QueryFragment, Debug)]
#[cynic(graphql_type = "Mutation", variables = "MetaobjectUpdateVariables")]
pub struct MetaobjectUpdateMutation {
    #[arguments(id: $id, metaobject: $metaobject)]
    pub metaobject_update: Option<MetaobjectUpdatePayload>,
}

#[derive(cynic::QueryFragment, Debug)]
pub struct MetaobjectUpdatePayload {
    pub metaobject: Option<UpdatedMetaobject>,
    pub user_errors: Vec<MetaobjectUserError>,
}

#[derive(cynic::QueryFragment, Debug)]
#[cynic(graphql_type = "Metaobject")]
pub struct UpdatedMetaobject {
    pub id: cynic::Id,
    pub fields: Vec<MetaobjectField>,
}

#[derive(cynic::QueryFragment, Debug)]
pub struct MetaobjectField {
    pub key: String,
    pub value: Option<String>,
}

#[derive(cynic::QueryFragment, Debug)]
pub struct MetaobjectUserError {
    /// Path to the offending input, e.g. `["fields", "last_seen_location"]`
    pub field: Option<Vec<String>>,
    pub message: String,
}
