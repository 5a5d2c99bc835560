use std::collections::{HashMap, HashSet};

use swc_ecma_ast::{ImportDecl, ImportSpecifier, Module, ModuleDecl, ModuleExportName, ModuleItem};

/// The message-declaring exports a file can bind from the module source.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageApi {
    DefineMessages,
    DefineMessage,
    Component,
}

impl MessageApi {
    fn from_export(name: &str) -> Option<Self> {
        match name {
            "defineMessages" => Some(MessageApi::DefineMessages),
            "defineMessage" => Some(MessageApi::DefineMessage),
            "FormattedMessage" | "FormattedHTMLMessage" => Some(MessageApi::Component),
            _ => None,
        }
    }
}

/// Local bindings of the module source in one file.
///
/// `import { defineMessages as dm } from 'react-intl'` binds `dm`;
/// `import * as ReactIntl from 'react-intl'` makes `ReactIntl.defineMessages`
/// and `<ReactIntl.FormattedMessage>` resolve.
#[derive(Debug, Default, Clone)]
pub struct MessageImports {
    named: HashMap<String, MessageApi>,
    namespaces: HashSet<String>,
}

impl MessageImports {
    /// Collect the imports of `module_source` from the top level of `module`.
    pub fn collect(module: &Module, module_source: &str) -> Self {
        let mut imports = Self::default();
        for item in &module.body {
            if let ModuleItem::ModuleDecl(ModuleDecl::Import(decl)) = item
                && !decl.type_only
                && decl.src.value.as_str() == Some(module_source)
            {
                imports.add_decl(decl);
            }
        }
        imports
    }

    fn add_decl(&mut self, decl: &ImportDecl) {
        for specifier in &decl.specifiers {
            match specifier {
                ImportSpecifier::Named(named) if !named.is_type_only => {
                    let exported = match &named.imported {
                        Some(ModuleExportName::Ident(ident)) => ident.sym.to_string(),
                        Some(ModuleExportName::Str(s)) => s.value.to_string_lossy().to_string(),
                        None => named.local.sym.to_string(),
                    };
                    if let Some(api) = MessageApi::from_export(&exported) {
                        self.named.insert(named.local.sym.to_string(), api);
                    }
                }
                ImportSpecifier::Namespace(ns) => {
                    self.namespaces.insert(ns.local.sym.to_string());
                }
                _ => {}
            }
        }
    }

    pub fn is_empty(&self) -> bool {
        self.named.is_empty() && self.namespaces.is_empty()
    }

    /// Resolve a bare identifier.
    pub fn resolve(&self, local: &str) -> Option<MessageApi> {
        self.named.get(local).copied()
    }

    /// Resolve `namespace.member`.
    pub fn resolve_member(&self, namespace: &str, member: &str) -> Option<MessageApi> {
        if self.namespaces.contains(namespace) {
            MessageApi::from_export(member)
        } else {
            None
        }
    }
}
