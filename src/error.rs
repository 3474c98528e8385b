use std::fmt;

use thiserror::Error;

use crate::types::{FieldError, Handle};

/// A single top-level GraphQL error returned by the store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GraphQlError {
    pub message: String,
    pub code: Option<String>,
    /// Dotted response path (e.g. `metaobjectUpdate.metaobject`)
    pub path: Option<String>,
}

impl fmt::Display for GraphQlError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.code {
            Some(code) => write!(f, "[{code}] {}", self.message)?,
            None => write!(f, "{}", self.message)?,
        }
        if let Some(path) = &self.path {
            write!(f, " (at {path})")?;
        }
        Ok(())
    }
}

fn join_graphql_errors(errors: &[GraphQlError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

fn partial_note(partial_data: &bool) -> &'static str {
    if *partial_data { " (partial data)" } else { "" }
}

fn join_field_errors(errors: &[FieldError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

#[derive(Error, Debug)]
pub enum LostFoundError {
    #[error("missing 'handle'")]
    MissingHandle,

    #[error("no pet found for handle '{0}'")]
    HandleNotFound(Handle),

    #[error("store rejected field values: {}", join_field_errors(.0))]
    ValidationRejected(Vec<FieldError>),

    #[error("ambiguous mutation result: {0}")]
    AmbiguousMutation(String),

    #[error("GraphQL errors{}: {}", partial_note(.partial_data), join_graphql_errors(.errors))]
    GraphQlErrors {
        errors: Vec<GraphQlError>,
        partial_data: bool,
    },

    #[error("API error: {0}")]
    Api(String),

    #[error("configuration error: {0}")]
    Config(String),

    #[error("authentication error: {0}")]
    Auth(String),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("YAML parse error: {0}")]
    YamlParse(#[from] serde_yaml_ng::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, LostFoundError>;
