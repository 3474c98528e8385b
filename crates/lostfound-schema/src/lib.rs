//! GraphQL schema definitions for lostfound.
//!
//! This crate contains the generated schema types for the slice of the Shopify
//! Admin API that lostfound talks to. Keeping them in their own crate avoids
//! regenerating them when unrelated code changes.

// Disable all clippy lints for this crate - it's entirely generated code
#![allow(clippy::all)]
#![allow(clippy::pedantic)]
#![allow(clippy::nursery)]

/// Shopify Admin GraphQL schema types (metaobject subset).
#[cynic::schema("shopify")]
pub mod shopify {}
