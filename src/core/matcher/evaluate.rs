//! Static evaluation of descriptor field values.
//!
//! Only values whose text is fully known at parse time are accepted: string
//! literals, templates without substitutions, `+` concatenations of those and,
//! for descriptions, object literals built from static values.

use serde_json::{Map, Number, Value};
use swc_ecma_ast::{
    BinaryOp, Expr, JSXAttrValue, JSXExpr, Lit, ObjectLit, Prop, PropName, PropOrSpread,
};

use super::site::FieldValue;

/// Strip parentheses and TypeScript-only wrappers.
pub fn unwrap_expr(expr: &Expr) -> &Expr {
    match expr {
        Expr::Paren(paren) => unwrap_expr(&paren.expr),
        Expr::TsAs(e) => unwrap_expr(&e.expr),
        Expr::TsSatisfies(e) => unwrap_expr(&e.expr),
        Expr::TsNonNull(e) => unwrap_expr(&e.expr),
        Expr::TsConstAssertion(e) => unwrap_expr(&e.expr),
        Expr::TsTypeAssertion(e) => unwrap_expr(&e.expr),
        _ => expr,
    }
}

/// Evaluate an expression to a string, if it is statically known.
pub fn static_string(expr: &Expr) -> Option<String> {
    match unwrap_expr(expr) {
        Expr::Lit(Lit::Str(s)) => s.value.as_str().map(|s| s.to_string()),
        Expr::Tpl(tpl) if tpl.exprs.is_empty() => tpl
            .quasis
            .iter()
            .map(|q| q.cooked.as_ref().and_then(|c| c.as_str()))
            .collect::<Option<String>>(),
        Expr::Bin(bin) if bin.op == BinaryOp::Add => {
            let mut left = static_string(&bin.left)?;
            let right = static_string(&bin.right)?;
            left.push_str(&right);
            Some(left)
        }
        _ => None,
    }
}

/// Evaluate an expression to JSON, if it is statically known.
pub fn static_json(expr: &Expr) -> Option<Value> {
    if let Some(text) = static_string(expr) {
        return Some(Value::String(text));
    }
    match unwrap_expr(expr) {
        Expr::Lit(Lit::Num(n)) => Number::from_f64(n.value).map(Value::Number),
        Expr::Lit(Lit::Bool(b)) => Some(Value::Bool(b.value)),
        Expr::Lit(Lit::Null(_)) => Some(Value::Null),
        Expr::Array(array) => array
            .elems
            .iter()
            .map(|elem| match elem {
                Some(e) if e.spread.is_none() => static_json(&e.expr),
                _ => None,
            })
            .collect::<Option<Vec<_>>>()
            .map(Value::Array),
        Expr::Object(object) => static_object(object).map(Value::Object),
        _ => None,
    }
}

/// Evaluate an object literal whose keys and values are all static.
pub fn static_object(object: &ObjectLit) -> Option<Map<String, Value>> {
    let mut map = Map::new();
    for prop in &object.props {
        let PropOrSpread::Prop(prop) = prop else {
            return None;
        };
        let Prop::KeyValue(kv) = prop.as_ref() else {
            return None;
        };
        map.insert(prop_name(&kv.key)?, static_json(&kv.value)?);
    }
    Some(map)
}

/// The static name of an object property key.
pub fn prop_name(key: &PropName) -> Option<String> {
    match key {
        PropName::Ident(ident) => Some(ident.sym.to_string()),
        PropName::Str(s) => s.value.as_str().map(|s| s.to_string()),
        PropName::Num(n) => Some(n.value.to_string()),
        PropName::Computed(computed) => static_string(&computed.expr),
        PropName::BigInt(_) => None,
    }
}

/// Evaluate a descriptor field given as an expression.
///
/// Object literals are only meaningful for `description`; the caller decides
/// whether to accept them.
pub fn field_from_expr(expr: &Expr) -> FieldValue {
    if let Some(text) = static_string(expr) {
        return FieldValue::Text(text);
    }
    match unwrap_expr(expr) {
        Expr::Object(object) => match static_object(object) {
            Some(map) => FieldValue::Object(map),
            None => FieldValue::Dynamic,
        },
        _ => FieldValue::Dynamic,
    }
}

/// Evaluate a descriptor field given as a JSX attribute value.
pub fn field_from_jsx(value: Option<&JSXAttrValue>) -> FieldValue {
    match value {
        Some(JSXAttrValue::Str(s)) => match s.value.as_str() {
            Some(text) => FieldValue::Text(text.to_string()),
            None => FieldValue::Dynamic,
        },
        Some(JSXAttrValue::JSXExprContainer(container)) => match &container.expr {
            JSXExpr::Expr(expr) => field_from_expr(expr),
            JSXExpr::JSXEmptyExpr(_) => FieldValue::Dynamic,
        },
        // `<X defaultMessage />` is `true`, not a message
        None => FieldValue::Dynamic,
        Some(_) => FieldValue::Dynamic,
    }
}
