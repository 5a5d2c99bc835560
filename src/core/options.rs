use std::{fmt, sync::Arc};

use crate::core::validate::{IdPattern, MessageOverride};

pub const DEFAULT_MODULE_SOURCE_NAME: &str = "react-intl";

/// Component names recognized when imported from the module source.
pub const DEFAULT_COMPONENT_NAMES: &[&str] = &["FormattedMessage", "FormattedHTMLMessage"];

/// Which transformation pass a traversal belongs to.
///
/// On repeated passes over already-transformed code, declarations that are
/// already in their final shape are recorded as they are instead of being
/// validated again.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Pass {
    First,
    Repeat,
}

/// Policy for one extraction run.
#[derive(Clone)]
pub struct ExtractOptions {
    pub enforce_descriptions: bool,
    pub enforce_default_message: bool,
    pub remove_default_message: bool,
    pub module_source_name: String,
    pub additional_component_names: Vec<String>,
    pub extract_source_location: bool,
    pub extract_from_format_message_call: bool,
    pub id_pattern: IdPattern,
    pub override_message: Option<Arc<dyn MessageOverride>>,
    /// How many times the transformation is applied to each file.
    pub passes: usize,
}

impl Default for ExtractOptions {
    fn default() -> Self {
        Self {
            enforce_descriptions: false,
            enforce_default_message: true,
            remove_default_message: false,
            module_source_name: DEFAULT_MODULE_SOURCE_NAME.to_string(),
            additional_component_names: Vec::new(),
            extract_source_location: false,
            extract_from_format_message_call: false,
            id_pattern: IdPattern::default(),
            override_message: None,
            passes: 1,
        }
    }
}

impl fmt::Debug for ExtractOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ExtractOptions")
            .field("enforce_descriptions", &self.enforce_descriptions)
            .field("enforce_default_message", &self.enforce_default_message)
            .field("remove_default_message", &self.remove_default_message)
            .field("module_source_name", &self.module_source_name)
            .field(
                "additional_component_names",
                &self.additional_component_names,
            )
            .field("extract_source_location", &self.extract_source_location)
            .field(
                "extract_from_format_message_call",
                &self.extract_from_format_message_call,
            )
            .field("id_pattern", &self.id_pattern.to_string())
            .field("override_message", &self.override_message.is_some())
            .field("passes", &self.passes)
            .finish()
    }
}

impl ExtractOptions {
    pub fn with_override(mut self, hook: impl MessageOverride + 'static) -> Self {
        self.override_message = Some(Arc::new(hook));
        self
    }

    /// Whether `name` is an additional component matched by tag name alone.
    pub fn is_additional_component(&self, name: &str) -> bool {
        self.additional_component_names.iter().any(|n| n == name)
    }
}
