//! User-supplied message overrides.
//!
//! An override sees the computed id, default message and description of a
//! declaration and returns the descriptor that should be recorded instead.
//! Any fields beyond the known ones are carried into the catalog and written
//! back onto the declaration.

use serde_json::{Map, Value};

use crate::core::data::MessageDescriptor;

/// Fields an override cannot introduce as extras.
const RESERVED_FIELDS: &[&str] = &["id", "defaultMessage", "description", "file", "start", "end"];

/// What an override returns.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct OverrideDescriptor {
    pub id: String,
    pub default_message: Option<String>,
    pub description: Option<Value>,
    pub extra: Map<String, Value>,
}

impl OverrideDescriptor {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            ..Default::default()
        }
    }

    pub fn default_message(mut self, message: impl Into<String>) -> Self {
        self.default_message = Some(message.into());
        self
    }

    pub fn description(mut self, description: impl Into<Value>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Add an extra field. Reserved names are ignored.
    pub fn field(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        let name = name.into();
        if !RESERVED_FIELDS.contains(&name.as_str()) {
            self.extra.insert(name, value.into());
        }
        self
    }

    /// Build from a JSON object such as `{"id": ..., "defaultMessage": ..., "X": ...}`.
    ///
    /// Returns `None` when `value` is not an object or has no string `id`.
    pub fn from_json(value: Value) -> Option<Self> {
        let Value::Object(mut map) = value else {
            return None;
        };
        let Some(Value::String(id)) = map.remove("id") else {
            return None;
        };
        let default_message = match map.remove("defaultMessage") {
            Some(Value::String(message)) => Some(message),
            _ => None,
        };
        let description = map.remove("description").filter(|d| !d.is_null());
        for reserved in RESERVED_FIELDS {
            map.remove(*reserved);
        }
        Some(Self {
            id,
            default_message,
            description,
            extra: map,
        })
    }
}

/// Replaces a computed descriptor with a caller-chosen one.
pub trait MessageOverride: Send + Sync {
    fn override_message(
        &self,
        id: &str,
        default_message: Option<&str>,
        description: Option<&Value>,
    ) -> OverrideDescriptor;
}

impl<F> MessageOverride for F
where
    F: Fn(&str, Option<&str>, Option<&Value>) -> OverrideDescriptor + Send + Sync,
{
    fn override_message(
        &self,
        id: &str,
        default_message: Option<&str>,
        description: Option<&Value>,
    ) -> OverrideDescriptor {
        self(id, default_message, description)
    }
}

/// Run `hook` on `computed` and merge the result.
///
/// The override's id, default message and description replace the computed
/// ones outright, so a field the override leaves out is absent afterwards.
/// Location fields are kept.
pub fn apply_override(computed: MessageDescriptor, hook: &dyn MessageOverride) -> MessageDescriptor {
    let replacement = hook.override_message(
        &computed.id,
        computed.default_message.as_deref(),
        computed.description.as_ref(),
    );
    MessageDescriptor {
        id: replacement.id,
        default_message: replacement.default_message,
        description: replacement.description,
        extra: replacement.extra,
        ..computed
    }
}
