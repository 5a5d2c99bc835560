//! Declaration sites: the shapes a message declaration can take in source.

use std::ops::Range;

use enum_dispatch::enum_dispatch;
use serde_json::{Map, Value};
use swc_common::{Span, Spanned};
use swc_ecma_ast::{JSXAttrName, JSXAttrOrSpread, JSXOpeningElement, ObjectLit, Prop, PropOrSpread};

use super::evaluate::{field_from_expr, field_from_jsx, prop_name};
use crate::core::parsers::ParsedSource;

pub const ID_FIELD: &str = "id";
pub const DEFAULT_MESSAGE_FIELD: &str = "defaultMessage";
pub const DESCRIPTION_FIELD: &str = "description";

/// Whether `name` is one of the fields a descriptor is built from.
pub fn is_descriptor_field(name: &str) -> bool {
    matches!(name, ID_FIELD | DEFAULT_MESSAGE_FIELD | DESCRIPTION_FIELD)
}

/// The statically evaluated value of one descriptor field.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
    Absent,
    Text(String),
    /// Static object literal; only accepted for `description`.
    Object(Map<String, Value>),
    /// Present but not statically known.
    Dynamic,
}

impl FieldValue {
    pub fn as_str(&self) -> Option<&str> {
        match self {
            FieldValue::Text(text) => Some(text),
            _ => None,
        }
    }

    pub fn is_dynamic(&self) -> bool {
        matches!(self, FieldValue::Dynamic)
    }

    pub fn is_absent(&self) -> bool {
        matches!(self, FieldValue::Absent)
    }
}

/// Raw descriptor fields of a declaration.
#[derive(Debug, Clone, PartialEq)]
pub struct DescriptorFields {
    pub id: FieldValue,
    pub default_message: FieldValue,
    pub description: FieldValue,
    /// A spread or computed key could contribute fields we cannot see.
    pub opaque: bool,
}

impl Default for DescriptorFields {
    fn default() -> Self {
        Self {
            id: FieldValue::Absent,
            default_message: FieldValue::Absent,
            description: FieldValue::Absent,
            opaque: false,
        }
    }
}

impl DescriptorFields {
    fn set(&mut self, name: &str, value: FieldValue) {
        match name {
            ID_FIELD => self.id = text_only(value),
            DEFAULT_MESSAGE_FIELD => self.default_message = text_only(value),
            DESCRIPTION_FIELD => self.description = value,
            _ => {}
        }
    }
}

fn text_only(value: FieldValue) -> FieldValue {
    match value {
        FieldValue::Object(_) => FieldValue::Dynamic,
        other => other,
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListStyle {
    /// `{ id: "x", defaultMessage: "y" }`
    Object,
    /// `<FormattedMessage id="x" defaultMessage="y" />`
    JsxAttributes,
}

/// One property or attribute of a declaration, as a byte range of the source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldSlot {
    /// `None` for spreads and keys that are not statically known.
    pub name: Option<String>,
    /// The statically known string value, if any.
    pub value: Option<String>,
    pub range: Range<usize>,
}

/// The property list or attribute list a declaration's fields live in.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldList {
    pub style: ListStyle,
    pub slots: Vec<FieldSlot>,
    /// Offset right after `{` or the tag name, used when the list is empty.
    pub open: usize,
}

impl FieldList {
    pub fn has(&self, name: &str) -> bool {
        self.slots.iter().any(|s| s.name.as_deref() == Some(name))
    }
}

/// What every declaration shape exposes to validation and rewriting.
#[enum_dispatch]
pub trait Declaration {
    fn fields(&self) -> &DescriptorFields;
    fn field_list(&self) -> &FieldList;
    /// Span used for the reported position and source location.
    fn span(&self) -> Span;
    /// Short description for logs.
    fn label(&self) -> String;
}

/// An object literal passed to `defineMessage`, or one entry of the object
/// passed to `defineMessages`.
#[derive(Debug, Clone, PartialEq)]
pub struct CallSite {
    pub callee: String,
    /// The key under which the entry appears in `defineMessages`.
    pub key: Option<String>,
    pub fields: DescriptorFields,
    pub list: FieldList,
    pub span: Span,
}

/// A message component element such as `<FormattedMessage ... />`.
#[derive(Debug, Clone, PartialEq)]
pub struct ComponentSite {
    pub tag: String,
    pub fields: DescriptorFields,
    pub list: FieldList,
    pub span: Span,
}

/// The descriptor argument of a `formatMessage(...)` call.
#[derive(Debug, Clone, PartialEq)]
pub struct FormatCallSite {
    pub fields: DescriptorFields,
    pub list: FieldList,
    pub span: Span,
}

impl Declaration for CallSite {
    fn fields(&self) -> &DescriptorFields {
        &self.fields
    }

    fn field_list(&self) -> &FieldList {
        &self.list
    }

    fn span(&self) -> Span {
        self.span
    }

    fn label(&self) -> String {
        match &self.key {
            Some(key) => format!("{}({}: ...)", self.callee, key),
            None => format!("{}(...)", self.callee),
        }
    }
}

impl Declaration for ComponentSite {
    fn fields(&self) -> &DescriptorFields {
        &self.fields
    }

    fn field_list(&self) -> &FieldList {
        &self.list
    }

    fn span(&self) -> Span {
        self.span
    }

    fn label(&self) -> String {
        format!("<{}>", self.tag)
    }
}

impl Declaration for FormatCallSite {
    fn fields(&self) -> &DescriptorFields {
        &self.fields
    }

    fn field_list(&self) -> &FieldList {
        &self.list
    }

    fn span(&self) -> Span {
        self.span
    }

    fn label(&self) -> String {
        "formatMessage(...)".to_string()
    }
}

#[enum_dispatch(Declaration)]
#[derive(Debug, Clone, PartialEq)]
pub enum DeclarationSite {
    Call(CallSite),
    Component(ComponentSite),
    FormatCall(FormatCallSite),
}

/// Read the descriptor fields and slots of an object literal.
pub fn object_fields(object: &ObjectLit, parsed: &ParsedSource) -> (DescriptorFields, FieldList) {
    let mut fields = DescriptorFields::default();
    let mut slots = Vec::with_capacity(object.props.len());

    for prop in &object.props {
        let range = parsed.byte_range(prop.span());
        let mut value = None;
        let name = match prop {
            PropOrSpread::Spread(_) => None,
            PropOrSpread::Prop(prop) => match prop.as_ref() {
                Prop::KeyValue(kv) => {
                    let name = prop_name(&kv.key);
                    let field = field_from_expr(&kv.value);
                    value = field.as_str().map(str::to_string);
                    if let Some(name) = &name {
                        fields.set(name, field);
                    }
                    name
                }
                Prop::Shorthand(ident) => {
                    let name = ident.sym.to_string();
                    fields.set(&name, FieldValue::Dynamic);
                    Some(name)
                }
                Prop::Getter(p) => dynamic_member(&mut fields, prop_name(&p.key)),
                Prop::Setter(p) => dynamic_member(&mut fields, prop_name(&p.key)),
                Prop::Method(p) => dynamic_member(&mut fields, prop_name(&p.key)),
                Prop::Assign(p) => dynamic_member(&mut fields, Some(p.key.sym.to_string())),
            },
        };
        if name.is_none() {
            fields.opaque = true;
        }
        slots.push(FieldSlot { name, value, range });
    }

    let open = parsed.byte_range(object.span).start + 1;
    (
        fields,
        FieldList {
            style: ListStyle::Object,
            slots,
            open,
        },
    )
}

fn dynamic_member(fields: &mut DescriptorFields, name: Option<String>) -> Option<String> {
    if let Some(name) = &name {
        fields.set(name, FieldValue::Dynamic);
    }
    name
}

/// Read the descriptor fields and slots of a JSX opening element.
pub fn jsx_fields(element: &JSXOpeningElement, parsed: &ParsedSource) -> (DescriptorFields, FieldList) {
    let mut fields = DescriptorFields::default();
    let mut slots = Vec::with_capacity(element.attrs.len());

    for attr in &element.attrs {
        match attr {
            JSXAttrOrSpread::JSXAttr(attr) => {
                let name = jsx_attr_name(&attr.name);
                let field = field_from_jsx(attr.value.as_ref());
                let value = field.as_str().map(str::to_string);
                fields.set(&name, field);
                slots.push(FieldSlot {
                    name: Some(name),
                    value,
                    range: parsed.byte_range(attr.span),
                });
            }
            JSXAttrOrSpread::SpreadElement(spread) => {
                fields.opaque = true;
                slots.push(FieldSlot {
                    name: None,
                    value: None,
                    range: widen_to_braces(&parsed.code, parsed.byte_range(spread.span())),
                });
            }
        }
    }

    let open = parsed.byte_range(element.name.span()).end;
    (
        fields,
        FieldList {
            style: ListStyle::JsxAttributes,
            slots,
            open,
        },
    )
}

pub fn jsx_attr_name(name: &JSXAttrName) -> String {
    match name {
        JSXAttrName::Ident(ident) => ident.sym.to_string(),
        JSXAttrName::JSXNamespacedName(ns) => format!("{}:{}", ns.ns.sym, ns.name.sym),
    }
}

/// A JSX spread's span covers `...expr`; extend it over the surrounding braces.
fn widen_to_braces(code: &str, range: Range<usize>) -> Range<usize> {
    let bytes = code.as_bytes();
    let mut start = range.start;
    while start > 0 && bytes[start - 1].is_ascii_whitespace() {
        start -= 1;
    }
    let start = if start > 0 && bytes[start - 1] == b'{' {
        start - 1
    } else {
        range.start
    };

    let mut end = range.end;
    while end < bytes.len() && bytes[end].is_ascii_whitespace() {
        end += 1;
    }
    let end = if end < bytes.len() && bytes[end] == b'}' {
        end + 1
    } else {
        range.end
    };

    start..end
}
