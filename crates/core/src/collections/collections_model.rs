//! Collection domain models.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::errors::{Error, Result};
use crate::utils::serde_utils::{
    deserialize_null_as_default, deserialize_opaque_id, deserialize_optional_record_datetime,
};

/// A named grouping of tasks, owned by the external collaborator.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Collection {
    #[serde(deserialize_with = "deserialize_opaque_id")]
    pub id: String,
    pub name: String,
    #[serde(default, deserialize_with = "deserialize_null_as_default")]
    pub description: String,
    #[serde(
        default,
        deserialize_with = "deserialize_optional_record_datetime",
        skip_serializing_if = "Option::is_none"
    )]
    pub created_at: Option<DateTime<Utc>>,
    /// Number of tasks, when the collaborator reports it
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub task_count: Option<u32>,
}

fn validate_name(name: &str) -> Result<()> {
    if name.trim().is_empty() {
        return Err(Error::invalid_input("Collection name cannot be empty"));
    }
    Ok(())
}

/// Input model for creating a collection.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewCollection {
    pub name: String,
    #[serde(default)]
    pub description: String,
}

impl NewCollection {
    pub fn validate(&self) -> Result<()> {
        validate_name(&self.name)
    }
}

/// Input model for renaming or re-describing a collection.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CollectionUpdate {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
}

impl CollectionUpdate {
    pub fn validate(&self) -> Result<()> {
        if self.id.trim().is_empty() {
            return Err(Error::missing_field("id"));
        }
        validate_name(&self.name)
    }
}
