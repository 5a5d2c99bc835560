//! Decides whether a call or JSX element declares messages.

use swc_ecma_ast::{
    CallExpr, Callee, Expr, JSXElementName, JSXObject, JSXOpeningElement, MemberProp, ObjectLit,
    Prop, PropOrSpread,
};
use tracing::debug;

use super::{
    evaluate::{prop_name, unwrap_expr},
    imports::{MessageApi, MessageImports},
    site::{
        CallSite, ComponentSite, DEFAULT_MESSAGE_FIELD, DeclarationSite, FormatCallSite,
        jsx_fields, object_fields,
    },
};
use crate::core::{options::ExtractOptions, parsers::ParsedSource};

const FORMAT_MESSAGE: &str = "formatMessage";

/// How a call expression relates to message declaration.
#[derive(Debug)]
pub enum CallClass {
    /// Not a declaring call.
    Other,
    /// `defineMessages`/`defineMessage`, or `formatMessage` with an inline
    /// descriptor. The first argument holds the declarations.
    Declaring(Vec<DeclarationSite>),
}

pub struct Classifier<'a> {
    imports: MessageImports,
    options: &'a ExtractOptions,
    parsed: &'a ParsedSource,
}

impl<'a> Classifier<'a> {
    pub fn new(parsed: &'a ParsedSource, options: &'a ExtractOptions) -> Self {
        Self {
            imports: MessageImports::collect(&parsed.module, &options.module_source_name),
            options,
            parsed,
        }
    }

    /// Whether the file can contain declarations at all.
    pub fn can_match(&self) -> bool {
        !self.imports.is_empty()
            || !self.options.additional_component_names.is_empty()
            || self.options.extract_from_format_message_call
    }

    pub fn classify_call(&self, call: &CallExpr) -> CallClass {
        let Callee::Expr(callee) = &call.callee else {
            return CallClass::Other;
        };
        let Some(arg) = call.args.first().filter(|a| a.spread.is_none()) else {
            return CallClass::Other;
        };

        let (callee_name, api) = match unwrap_expr(callee) {
            Expr::Ident(ident) => (ident.sym.to_string(), self.imports.resolve(&ident.sym)),
            Expr::Member(member) => {
                let MemberProp::Ident(prop) = &member.prop else {
                    return CallClass::Other;
                };
                let api = match unwrap_expr(&member.obj) {
                    Expr::Ident(obj) => self.imports.resolve_member(&obj.sym, &prop.sym),
                    _ => None,
                };
                (prop.sym.to_string(), api)
            }
            _ => return CallClass::Other,
        };

        let Expr::Object(object) = unwrap_expr(&arg.expr) else {
            return match api {
                Some(MessageApi::DefineMessages | MessageApi::DefineMessage) => {
                    debug!(callee = %callee_name, "descriptor argument is not an object literal");
                    CallClass::Declaring(Vec::new())
                }
                _ => CallClass::Other,
            };
        };

        match api {
            Some(MessageApi::DefineMessages) => {
                CallClass::Declaring(self.define_messages_sites(&callee_name, object))
            }
            Some(MessageApi::DefineMessage) => {
                CallClass::Declaring(vec![self.call_site(&callee_name, None, object)])
            }
            Some(MessageApi::Component) => CallClass::Other,
            None if callee_name == FORMAT_MESSAGE
                && self.options.extract_from_format_message_call =>
            {
                let (fields, list) = object_fields(object, self.parsed);
                if !list.has(DEFAULT_MESSAGE_FIELD) {
                    return CallClass::Other;
                }
                CallClass::Declaring(vec![DeclarationSite::FormatCall(FormatCallSite {
                    fields,
                    list,
                    span: object.span,
                })])
            }
            None => CallClass::Other,
        }
    }

    fn define_messages_sites(&self, callee: &str, object: &ObjectLit) -> Vec<DeclarationSite> {
        let mut sites = Vec::new();
        for prop in &object.props {
            let PropOrSpread::Prop(prop) = prop else {
                debug!(callee, "skipping spread in message map");
                continue;
            };
            let Prop::KeyValue(kv) = prop.as_ref() else {
                continue;
            };
            let key = prop_name(&kv.key);
            match unwrap_expr(&kv.value) {
                Expr::Object(inner) => sites.push(self.call_site(callee, key, inner)),
                _ => debug!(callee, key = ?key, "message map entry is not an object literal"),
            }
        }
        sites
    }

    fn call_site(&self, callee: &str, key: Option<String>, object: &ObjectLit) -> DeclarationSite {
        let (fields, list) = object_fields(object, self.parsed);
        DeclarationSite::Call(CallSite {
            callee: callee.to_string(),
            key,
            fields,
            list,
            span: object.span,
        })
    }

    /// Classify a JSX opening element.
    ///
    /// Elements without a `defaultMessage` attribute are references to
    /// messages declared elsewhere and are not matched.
    pub fn classify_element(&self, element: &JSXOpeningElement) -> Option<DeclarationSite> {
        let tag = self.component_tag(&element.name)?;
        let (fields, list) = jsx_fields(element, self.parsed);
        if !list.has(DEFAULT_MESSAGE_FIELD) {
            debug!(tag = %tag, "component without defaultMessage");
            return None;
        }
        Some(DeclarationSite::Component(ComponentSite {
            tag,
            fields,
            list,
            span: element.span,
        }))
    }

    fn component_tag(&self, name: &JSXElementName) -> Option<String> {
        match name {
            JSXElementName::Ident(ident) => {
                let tag = ident.sym.to_string();
                let imported = self.imports.resolve(&tag) == Some(MessageApi::Component);
                (imported || self.options.is_additional_component(&tag)).then_some(tag)
            }
            JSXElementName::JSXMemberExpr(member) => {
                let JSXObject::Ident(obj) = &member.obj else {
                    return None;
                };
                let tag = format!("{}.{}", obj.sym, member.prop.sym);
                let imported = self.imports.resolve_member(&obj.sym, &member.prop.sym)
                    == Some(MessageApi::Component);
                (imported || self.options.is_additional_component(&tag)).then_some(tag)
            }
            JSXElementName::JSXNamespacedName(_) => None,
        }
    }
}
