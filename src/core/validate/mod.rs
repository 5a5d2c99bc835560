//! Declaration validation.
//!
//! Turns the raw fields of a matched declaration into a final
//! [`MessageDescriptor`], applying the extraction policy in a fixed order:
//!
//! 1. fields that cannot be evaluated statically
//! 2. missing `defaultMessage` (when enforced)
//! 3. missing `description` (when enforced)
//! 4. ICU syntax of `defaultMessage`
//! 5. id: explicit, otherwise a content hash
//! 6. user override
//! 7. source location

pub mod hash;
pub mod overrides;

pub use hash::{DEFAULT_ID_PATTERN, IdPattern, IdPatternError, hash_input};
pub use overrides::{MessageOverride, OverrideDescriptor, apply_override};

use serde_json::Value;
use tracing::{debug, trace};

use crate::{
    core::{
        data::{FileIdentity, MessageDescriptor, SourceRange},
        icu,
        matcher::{DescriptorFields, FieldValue},
        options::{ExtractOptions, Pass},
    },
    error::ExtractError,
};

/// Result of validating one declaration.
#[derive(Debug, Clone, PartialEq)]
pub enum Verdict {
    /// Not extractable and not required to be; leave the node alone.
    Skip(&'static str),
    /// Already in final shape from an earlier pass; record without rewriting.
    Final(MessageDescriptor),
    /// A new descriptor. `overridden` tells the rewriter to write the
    /// override's fields back onto the node.
    Extracted {
        descriptor: MessageDescriptor,
        overridden: bool,
    },
}

/// Collapse whitespace runs to a single space and trim the ends.
pub fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

pub fn validate(
    fields: &DescriptorFields,
    range: SourceRange,
    file: &FileIdentity,
    options: &ExtractOptions,
    pass: Pass,
) -> Result<Verdict, ExtractError> {
    let position = range.start;
    let unresolvable = |field: &str| ExtractError::UnresolvableDeclaration {
        file: file.display_path.clone(),
        field: field.to_string(),
        position,
    };

    if fields.default_message.is_dynamic() {
        if options.enforce_default_message {
            return Err(unresolvable("defaultMessage"));
        }
        return Ok(Verdict::Skip("dynamic defaultMessage"));
    }
    if fields.description.is_dynamic() {
        if options.enforce_descriptions {
            return Err(unresolvable("description"));
        }
        return Ok(Verdict::Skip("dynamic description"));
    }
    if fields.id.is_dynamic() {
        return Ok(Verdict::Skip("dynamic id"));
    }
    if fields.opaque {
        if options.enforce_default_message && fields.default_message.is_absent() {
            return Err(unresolvable("defaultMessage"));
        }
        if options.enforce_descriptions && fields.description.is_absent() {
            return Err(unresolvable("description"));
        }
    }

    let default_message = fields.default_message.as_str().map(collapse_whitespace);
    let description = match &fields.description {
        FieldValue::Text(text) => Some(Value::String(collapse_whitespace(text))),
        FieldValue::Object(map) => Some(Value::Object(map.clone())),
        FieldValue::Absent | FieldValue::Dynamic => None,
    };

    if pass == Pass::Repeat
        && let Some(id) = fields.id.as_str()
        && description.is_none()
    {
        let mut descriptor = MessageDescriptor::new(id, default_message);
        attach_location(&mut descriptor, range, file, options);
        return Ok(Verdict::Final(descriptor));
    }

    if options.enforce_default_message && default_message.is_none() {
        return Err(ExtractError::MissingDefaultMessage {
            file: file.display_path.clone(),
            position,
        });
    }
    if options.enforce_descriptions && description.is_none() {
        return Err(ExtractError::MissingDescription {
            file: file.display_path.clone(),
            position,
        });
    }

    if let Some(message) = fields.default_message.as_str() {
        let elements = icu::parse(message).map_err(|source| ExtractError::InvalidIcuSyntax {
            file: file.display_path.clone(),
            position,
            source,
        })?;
        trace!(arguments = ?icu::argument_names(&elements), "parsed defaultMessage");
    }

    let id = match (fields.id.as_str(), default_message.as_deref()) {
        (Some(id), _) => id.to_string(),
        (None, Some(message)) => options
            .id_pattern
            .interpolate(&hash_input(message, description.as_ref())),
        (None, None) => {
            return Err(ExtractError::MissingId {
                file: file.display_path.clone(),
                position,
            });
        }
    };

    let mut descriptor = MessageDescriptor {
        description,
        ..MessageDescriptor::new(id, default_message)
    };

    let overridden = match &options.override_message {
        Some(hook) => {
            descriptor = apply_override(descriptor, hook.as_ref());
            debug!(id = %descriptor.id, "applied message override");
            true
        }
        None => false,
    };

    attach_location(&mut descriptor, range, file, options);

    Ok(Verdict::Extracted {
        descriptor,
        overridden,
    })
}

fn attach_location(
    descriptor: &mut MessageDescriptor,
    range: SourceRange,
    file: &FileIdentity,
    options: &ExtractOptions,
) {
    if options.extract_source_location {
        descriptor.file = Some(file.display_path.clone());
        descriptor.start = Some(range.start);
        descriptor.end = Some(range.end);
    }
}
