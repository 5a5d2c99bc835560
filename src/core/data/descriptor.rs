use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::position::SourcePosition;

/// The normalized record extracted from one message declaration.
///
/// Serializes to the catalog shape:
/// `{ id, defaultMessage?, description?, file?, start?, end?, ...extra }`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MessageDescriptor {
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_message: Option<String>,
    /// Either a string or a static object literal.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start: Option<SourcePosition>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end: Option<SourcePosition>,
    /// Fields introduced by an override function.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl MessageDescriptor {
    pub fn new(id: impl Into<String>, default_message: Option<String>) -> Self {
        Self {
            id: id.into(),
            default_message,
            description: None,
            file: None,
            start: None,
            end: None,
            extra: Map::new(),
        }
    }

    pub fn with_description(mut self, description: impl Into<Value>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Whether two descriptors with the same id describe the same message.
    ///
    /// Only `defaultMessage` and `description` take part; locations differ
    /// between occurrences by nature.
    pub fn same_content(&self, other: &MessageDescriptor) -> bool {
        self.default_message == other.default_message && self.description == other.description
    }
}
