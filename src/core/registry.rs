use std::collections::HashMap;

use crate::{
    core::data::{MessageDescriptor, SourcePosition},
    error::ExtractError,
};

/// Descriptors of one file, in first-seen order, keyed by id.
#[derive(Debug, Default)]
pub struct MessageRegistry {
    messages: Vec<MessageDescriptor>,
    /// id -> (index into `messages`, position of the first declaration)
    seen: HashMap<String, (usize, SourcePosition)>,
}

impl MessageRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a descriptor declared at `position`.
    ///
    /// Re-declaring an id with the same `defaultMessage` and `description` is
    /// allowed and keeps the first entry; anything else is a conflict.
    pub fn add(
        &mut self,
        descriptor: MessageDescriptor,
        position: SourcePosition,
        file: &str,
    ) -> Result<(), ExtractError> {
        if let Some(&(index, first)) = self.seen.get(&descriptor.id) {
            if self.messages[index].same_content(&descriptor) {
                return Ok(());
            }
            return Err(ExtractError::ConflictingDuplicateId {
                file: file.to_string(),
                id: descriptor.id,
                first,
                second: position,
            });
        }
        self.seen
            .insert(descriptor.id.clone(), (self.messages.len(), position));
        self.messages.push(descriptor);
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    pub fn messages(&self) -> &[MessageDescriptor] {
        &self.messages
    }

    /// Take all descriptors, leaving the registry empty.
    pub fn drain(&mut self) -> Vec<MessageDescriptor> {
        self.seen.clear();
        std::mem::take(&mut self.messages)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn msg(id: &str, text: &str) -> MessageDescriptor {
        MessageDescriptor::new(id, Some(text.to_string()))
    }

    #[test]
    fn test_identical_duplicates_collapse() {
        let mut registry = MessageRegistry::new();
        registry.add(msg("a", "Hi"), SourcePosition::new(1, 0), "f.js").unwrap();
        registry.add(msg("a", "Hi"), SourcePosition::new(2, 0), "f.js").unwrap();
        registry.add(msg("b", "Bye"), SourcePosition::new(3, 0), "f.js").unwrap();
        assert_eq!(registry.len(), 2);
        assert_eq!(registry.messages()[0].id, "a");
    }

    #[test]
    fn test_conflicting_duplicate() {
        let mut registry = MessageRegistry::new();
        registry.add(msg("a", "Hi"), SourcePosition::new(1, 0), "f.js").unwrap();
        let err = registry
            .add(msg("a", "Hello"), SourcePosition::new(5, 2), "f.js")
            .unwrap_err();
        assert_eq!(
            err,
            ExtractError::ConflictingDuplicateId {
                file: "f.js".to_string(),
                id: "a".to_string(),
                first: SourcePosition::new(1, 0),
                second: SourcePosition::new(5, 2),
            }
        );
    }

    #[test]
    fn test_description_difference_conflicts() {
        let mut registry = MessageRegistry::new();
        registry
            .add(msg("a", "Hi").with_description("x"), SourcePosition::new(1, 0), "f.js")
            .unwrap();
        assert!(
            registry
                .add(msg("a", "Hi"), SourcePosition::new(2, 0), "f.js")
                .is_err()
        );
    }

    #[test]
    fn test_drain_empties() {
        let mut registry = MessageRegistry::new();
        registry.add(msg("a", "Hi"), SourcePosition::new(1, 0), "f.js").unwrap();
        let drained = registry.drain();
        assert_eq!(drained.len(), 1);
        assert!(registry.is_empty());
        registry.add(msg("a", "Other"), SourcePosition::new(1, 0), "f.js").unwrap();
    }
}
