use std::fmt;

use serde::Serialize;

use crate::error::{LostFoundError, Result};

/// Metaobject field key holding the lost flag
pub const LOST_STATUS_KEY: &str = "lost_status";

/// Metaobject field key holding the free-text last seen location
pub const LAST_SEEN_LOCATION_KEY: &str = "last_seen_location";

/// Metaobject type used when none is configured
pub const DEFAULT_METAOBJECT_TYPE: &str = "pet";

/// Caller-chosen identifier for a pet record.
///
/// Only non-blank handles can be constructed, so a `Handle` in hand means the
/// caller-error check has already happened.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct Handle(String);

impl Handle {
    /// Validate a raw (possibly absent) handle, trimming surrounding whitespace.
    pub fn parse(raw: Option<&str>) -> Result<Self> {
        match raw.map(str::trim) {
            Some(handle) if !handle.is_empty() => Ok(Handle(handle.to_string())),
            _ => Err(LostFoundError::MissingHandle),
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Handle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl std::str::FromStr for Handle {
    type Err = LostFoundError;

    fn from_str(s: &str) -> Result<Self> {
        Handle::parse(Some(s))
    }
}

/// The store's stable id for one record, e.g. `gid://shopify/Metaobject/1`.
///
/// Resolved fresh for every request and never cached.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RecordReference(String);

impl RecordReference {
    pub fn new(id: impl Into<String>) -> Self {
        RecordReference(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_inner(self) -> String {
        self.0
    }
}

impl fmt::Display for RecordReference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Externally observable status of a pet
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum LostStatus {
    Lost,
    Found,
}

impl LostStatus {
    /// Value written to the `lost_status` field
    pub fn field_value(self) -> &'static str {
        match self {
            LostStatus::Lost => "true",
            LostStatus::Found => "false",
        }
    }
}

impl fmt::Display for LostStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LostStatus::Lost => write!(f, "LOST"),
            LostStatus::Found => write!(f, "FOUND"),
        }
    }
}

/// One key/value pair written by a mutation
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldWrite {
    pub key: &'static str,
    pub value: String,
}

/// The exact set of fields written by one status change.
///
/// Only constructible through [`StatusFieldSet::mark_lost`] and
/// [`StatusFieldSet::mark_found`]: the lost flag is always present, the
/// location only when marking lost with a non-empty location. Fields that are
/// absent here are left untouched in the store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusFieldSet {
    status: LostStatus,
    last_seen_location: Option<String>,
}

impl StatusFieldSet {
    pub fn mark_lost(location: Option<String>) -> Self {
        StatusFieldSet {
            status: LostStatus::Lost,
            last_seen_location: location.filter(|l| !l.is_empty()),
        }
    }

    pub fn mark_found() -> Self {
        StatusFieldSet {
            status: LostStatus::Found,
            last_seen_location: None,
        }
    }

    pub fn status(&self) -> LostStatus {
        self.status
    }

    pub fn last_seen_location(&self) -> Option<&str> {
        self.last_seen_location.as_deref()
    }

    /// Fields in write order: `lost_status` first, then the location if any.
    pub fn writes(&self) -> Vec<FieldWrite> {
        let mut writes = vec![FieldWrite {
            key: LOST_STATUS_KEY,
            value: self.status.field_value().to_string(),
        }];
        if let Some(location) = &self.last_seen_location {
            writes.push(FieldWrite {
                key: LAST_SEEN_LOCATION_KEY,
                value: location.clone(),
            });
        }
        writes
    }

    pub fn keys(&self) -> Vec<&'static str> {
        self.writes().into_iter().map(|w| w.key).collect()
    }
}

/// A field-level rejection reported by the store
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldError {
    pub field: String,
    pub message: String,
}

impl FieldError {
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        FieldError {
            field: field.into(),
            message: message.into(),
        }
    }
}

impl fmt::Display for FieldError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}
