//! Source rewriting.
//!
//! Declarations are rewritten in place by editing the text of their property
//! or attribute list. Untouched fields keep their original text, so a
//! declaration already in its final shape produces no edit at all.

pub mod edit;
pub mod render;

pub use edit::{TextEdit, apply_edits};

use serde_json::Value;
use tracing::warn;

use crate::core::{
    data::MessageDescriptor,
    matcher::{DEFAULT_MESSAGE_FIELD, DESCRIPTION_FIELD, FieldList, FieldSlot, ID_FIELD, ListStyle},
    options::ExtractOptions,
};
use render::{render_field, separator};

#[derive(Debug, Clone, PartialEq)]
enum SlotAction {
    Keep,
    Replace(String),
    Drop,
}

/// Plan the edits that bring a declaration in line with `descriptor`.
///
/// - `id` is set to the final id
/// - `description` is removed
/// - `defaultMessage` is removed under `remove_default_message`, otherwise it
///   only changes when an override supplied a new one
/// - override extras are written onto the declaration
pub fn plan_edits(
    list: &FieldList,
    descriptor: &MessageDescriptor,
    overridden: bool,
    options: &ExtractOptions,
    code: &str,
) -> Vec<TextEdit> {
    let style = list.style;
    let id_value = Value::String(descriptor.id.clone());

    let mut actions = Vec::with_capacity(list.slots.len());
    for slot in &list.slots {
        let action = match slot.name.as_deref() {
            Some(ID_FIELD) => set_text(style, slot, ID_FIELD, &descriptor.id),
            Some(DESCRIPTION_FIELD) => SlotAction::Drop,
            Some(DEFAULT_MESSAGE_FIELD) if options.remove_default_message => SlotAction::Drop,
            Some(DEFAULT_MESSAGE_FIELD) if overridden => match &descriptor.default_message {
                Some(message) => set_text(style, slot, DEFAULT_MESSAGE_FIELD, message),
                None => SlotAction::Drop,
            },
            Some(name) if overridden && descriptor.extra.contains_key(name) => {
                match (&descriptor.extra[name], slot.value.as_deref()) {
                    (Value::String(new), Some(old)) if new == old => SlotAction::Keep,
                    (value, _) => render_field(style, name, value)
                        .map(SlotAction::Replace)
                        .unwrap_or(SlotAction::Keep),
                }
            }
            _ => SlotAction::Keep,
        };
        actions.push(action);
    }

    let mut inserts = Vec::new();
    if !list.has(ID_FIELD)
        && let Some(text) = render_field(style, ID_FIELD, &id_value)
    {
        inserts.push(text);
    }
    if overridden {
        if !options.remove_default_message
            && !list.has(DEFAULT_MESSAGE_FIELD)
            && let Some(message) = &descriptor.default_message
            && let Some(text) = render_field(style, DEFAULT_MESSAGE_FIELD, &Value::String(message.clone()))
        {
            inserts.push(text);
        }
        for (name, value) in &descriptor.extra {
            if list.has(name) {
                continue;
            }
            match render_field(style, name, value) {
                Some(text) => inserts.push(text),
                None => warn!(field = %name, "cannot write field onto a JSX element"),
            }
        }
    }

    build_edits(list, &actions, inserts, code)
}

fn set_text(style: ListStyle, slot: &FieldSlot, name: &str, text: &str) -> SlotAction {
    if slot.value.as_deref() == Some(text) {
        return SlotAction::Keep;
    }
    match render_field(style, name, &Value::String(text.to_string())) {
        Some(rendered) => SlotAction::Replace(rendered),
        None => SlotAction::Keep,
    }
}

fn build_edits(
    list: &FieldList,
    actions: &[SlotAction],
    inserts: Vec<String>,
    code: &str,
) -> Vec<TextEdit> {
    let slots = &list.slots;
    let sep = list_separator(list, code);
    let mut edits = Vec::new();

    if slots.is_empty() {
        if !inserts.is_empty() {
            let text = match list.style {
                ListStyle::Object => format!(" {} ", inserts.join(&sep)),
                ListStyle::JsxAttributes => format!(" {}", inserts.join(&sep)),
            };
            edits.push(TextEdit::insert(list.open, text));
        }
        return edits;
    }

    let Some(last_kept) = actions.iter().rposition(|a| *a != SlotAction::Drop) else {
        // Every field goes; replace the whole list with the new fields.
        let range = slots[0].range.start..slots[slots.len() - 1].range.end;
        edits.push(TextEdit::replace(range, inserts.join(&sep)));
        return edits;
    };

    let mut i = 0;
    while i < slots.len() {
        match &actions[i] {
            SlotAction::Keep => i += 1,
            SlotAction::Replace(text) => {
                edits.push(TextEdit::replace(slots[i].range.clone(), text.clone()));
                i += 1;
            }
            SlotAction::Drop => {
                let first = i;
                while i < slots.len() && actions[i] == SlotAction::Drop {
                    i += 1;
                }
                let last = i - 1;
                let range = if i < slots.len() {
                    slots[first].range.start..slots[i].range.start
                } else {
                    // Trailing run: take the separator before it instead.
                    slots[first - 1].range.end..slots[last].range.end
                };
                edits.push(TextEdit::delete(range));
            }
        }
    }

    if !inserts.is_empty() {
        let text = format!("{}{}", sep, inserts.join(&sep));
        edits.push(TextEdit::insert(slots[last_kept].range.end, text));
    }
    edits
}

fn list_separator(list: &FieldList, code: &str) -> String {
    let between = match list.slots.as_slice() {
        [first, second, ..] => code.get(first.range.end..second.range.start),
        [only] => code.get(list.open..only.range.start),
        [] => None,
    };
    separator(list.style, between.unwrap_or_default())
}
