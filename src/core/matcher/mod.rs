//! Declaration matching.
//!
//! The matcher walks a parsed module once. Each call expression and JSX
//! opening element is classified; declaring nodes are handed to the
//! [`TraversalContext`] and their descriptor fields are not walked again.
//!
//! - `imports`: which local names refer to the module source
//! - `classify`: call/element classification
//! - `site`: the declaration shapes and their fields
//! - `evaluate`: static evaluation of field values

pub mod classify;
pub mod evaluate;
pub mod imports;
pub mod site;

pub use classify::{CallClass, Classifier};
pub use imports::{MessageApi, MessageImports};
pub use site::{
    CallSite, ComponentSite, DEFAULT_MESSAGE_FIELD, DESCRIPTION_FIELD, Declaration,
    DeclarationSite, DescriptorFields, FieldList, FieldSlot, FieldValue, FormatCallSite, ID_FIELD,
    ListStyle, is_descriptor_field,
};

use swc_ecma_ast::{CallExpr, JSXAttrOrSpread, JSXOpeningElement, Module};
use swc_ecma_visit::{Visit, VisitWith};

use crate::core::context::TraversalContext;

/// Walks a module and feeds every declaration to the context.
pub struct DeclarationMatcher<'a, 'ctx> {
    classifier: Classifier<'a>,
    ctx: &'ctx mut TraversalContext<'a>,
}

impl<'a, 'ctx> DeclarationMatcher<'a, 'ctx> {
    pub fn new(ctx: &'ctx mut TraversalContext<'a>) -> Self {
        Self {
            classifier: Classifier::new(ctx.parsed, ctx.options),
            ctx,
        }
    }

    pub fn run(mut self, module: &Module) {
        if !self.classifier.can_match() {
            return;
        }
        module.visit_with(&mut self);
    }
}

impl Visit for DeclarationMatcher<'_, '_> {
    fn visit_call_expr(&mut self, node: &CallExpr) {
        if self.ctx.failed() {
            return;
        }
        match self.classifier.classify_call(node) {
            CallClass::Other => node.visit_children_with(self),
            CallClass::Declaring(sites) => {
                for site in sites {
                    self.ctx.accept(site);
                }
                node.callee.visit_with(self);
                for arg in node.args.iter().skip(1) {
                    arg.visit_with(self);
                }
            }
        }
    }

    fn visit_jsx_opening_element(&mut self, node: &JSXOpeningElement) {
        if self.ctx.failed() {
            return;
        }
        let Some(declaration) = self.classifier.classify_element(node) else {
            node.visit_children_with(self);
            return;
        };
        self.ctx.accept(declaration);
        // `values={{ link: <FormattedMessage ... /> }}` may nest declarations.
        for attr in &node.attrs {
            let is_field = matches!(
                attr,
                JSXAttrOrSpread::JSXAttr(a) if is_descriptor_field(&site::jsx_attr_name(&a.name))
            );
            if !is_field {
                attr.visit_with(self);
            }
        }
    }
}
