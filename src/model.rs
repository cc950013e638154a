//! JSON payloads served by a Sumatra project page.
//!
//! Both payloads live for a single page load. They are validated on the way in
//! so that one malformed entry is skipped instead of stopping the whole table.

use serde::{Deserialize, Deserializer};
use serde_json::Value;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ModelError {
    #[error("project index is malformed: {0}")]
    Project(#[source] serde_json::Error),

    #[error("record is malformed: {0}")]
    Record(#[source] serde_json::Error),

    #[error("record has an empty label")]
    EmptyLabel,
}

// ---------------------------------------------------------------------------
// Project index
// ---------------------------------------------------------------------------

/// The project page queried as JSON: the list of record URLs plus the
/// project metadata the server sends alongside it.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ProjectData {
    pub records: Vec<String>,
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    /// Tag filter the server applied to `records`, if any.
    #[serde(default)]
    pub tags: Option<String>,
    #[serde(default)]
    pub access: Vec<String>,
}

impl ProjectData {
    /// Interpret an index response. A missing or ill-typed `records` field is
    /// an error, which the loader treats as "no rows".
    pub fn from_value(value: Value) -> Result<Self, ModelError> {
        serde_json::from_value(value).map_err(ModelError::Project)
    }
}

/// One entry of the server's project list.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ProjectSummary {
    pub id: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    pub uri: String,
    #[serde(default)]
    pub last_updated: Option<String>,
}

// ---------------------------------------------------------------------------
// Record
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Executable {
    pub name: String,
    pub version: String,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Repository {
    pub url: String,
}

/// A single simulation/analysis run, rendered as one table row.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Record {
    pub label: String,
    pub reason: String,
    pub outcome: String,
    /// Wall-clock duration in seconds.
    pub duration: f64,
    pub timestamp: String,
    pub executable: Executable,
    pub repository: Repository,
    pub version: String,
    pub main_file: String,
    pub script_arguments: String,
    #[serde(default, deserialize_with = "nullable_list")]
    pub tags: Vec<String>,
}

impl Record {
    /// Parse and validate a record response.
    pub fn from_value(value: Value) -> Result<Self, ModelError> {
        let record: Self = serde_json::from_value(value).map_err(ModelError::Record)?;
        if record.label.trim().is_empty() {
            return Err(ModelError::EmptyLabel);
        }
        Ok(record)
    }

    /// Duration as shown in the table, fixed to two decimal places.
    pub fn display_duration(&self) -> String {
        format_duration(self.duration)
    }
}

pub fn format_duration(seconds: f64) -> String {
    format!("{:.2}", seconds)
}

fn nullable_list<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<Vec<String>>::deserialize(deserializer)?.unwrap_or_default())
}
