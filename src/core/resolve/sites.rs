//! Extraction of reference sites from calls and JSX elements.
//!
//! Shared by the hook collector (hook calls used in place) and the reference
//! finder (occurrences of a bound name).

use swc_common::{Span, Spanned};
use swc_ecma_ast::{
    CallExpr, Callee, Expr, ExprOrSpread, Ident, JSXAttrName, JSXAttrOrSpread, JSXAttrValue,
    JSXExpr, JSXOpeningElement, OptChainBase, OptChainExpr, Prop, PropName, PropOrSpread,
};

use super::classify::{KeyArgument, ReferenceSite};
use super::helpers::{callee_ref, jsx_component, member_access, unwrap_expr};

/// Decides which expressions stand for the tracked translator value.
pub trait SiteMatcher {
    type Value;

    fn match_expr(&self, expr: &Expr) -> Option<Self::Value>;

    /// Shorthand object properties (`{ t }`) name a variable directly.
    fn match_shorthand(&self, _ident: &Ident) -> Option<Self::Value> {
        None
    }
}

pub struct Matched<V> {
    /// Span of the matched expression.
    pub span: Span,
    pub value: V,
    pub site: ReferenceSite,
}

/// A plain call or an optional call (`t?.("key")`, `t.rich?.("key")`).
#[derive(Clone, Copy)]
pub struct Invocation<'a> {
    pub span: Span,
    pub callee: Option<&'a Expr>,
    pub args: &'a [ExprOrSpread],
}

impl<'a> Invocation<'a> {
    pub fn call(call: &'a CallExpr) -> Self {
        let callee = match &call.callee {
            Callee::Expr(expr) => Some(&**expr),
            _ => None,
        };
        Self {
            span: call.span,
            callee,
            args: &call.args,
        }
    }

    /// `None` when the chain ends in a property access rather than a call.
    pub fn optional(chain: &'a OptChainExpr) -> Option<Self> {
        match &*chain.base {
            OptChainBase::Call(call) => Some(Self {
                span: chain.span,
                callee: Some(&*call.callee),
                args: &call.args,
            }),
            OptChainBase::Member(_) => None,
        }
    }
}

/// Sites inside one call: the callee, `obj.method` callee objects, bare
/// arguments, and properties of object-literal arguments.
pub fn call_sites<M: SiteMatcher>(call: Invocation, matcher: &M) -> Vec<Matched<M::Value>> {
    let mut sites = Vec::new();

    if let Some(callee) = call.callee {
        let callee = unwrap_expr(callee);
        if let Some(value) = matcher.match_expr(callee) {
            sites.push(Matched {
                span: callee.span(),
                value,
                site: ReferenceSite::Callee {
                    call_span: call.span,
                    key: KeyArgument::from_args(call.args),
                },
            });
        } else if let Some((object, method)) = member_access(callee) {
            let object = unwrap_expr(object);
            if let Some(value) = matcher.match_expr(object) {
                sites.push(Matched {
                    span: object.span(),
                    value,
                    site: ReferenceSite::MemberCallee {
                        call_span: call.span,
                        method,
                        key: KeyArgument::from_args(call.args),
                    },
                });
            }
        }
    }

    let callee = call.callee.and_then(callee_ref);
    for (index, arg) in call.args.iter().enumerate() {
        // Positions after a spread are unknown
        if arg.spread.is_some() {
            break;
        }
        let expr = unwrap_expr(&arg.expr);
        if let Some(value) = matcher.match_expr(expr) {
            sites.push(Matched {
                span: expr.span(),
                value,
                site: ReferenceSite::Argument {
                    callee: callee.clone(),
                    index,
                },
            });
            continue;
        }

        let Expr::Object(object) = expr else {
            continue;
        };
        for prop in &object.props {
            let PropOrSpread::Prop(prop) = prop else {
                continue;
            };
            let matched = match &**prop {
                Prop::Shorthand(ident) => matcher
                    .match_shorthand(ident)
                    .map(|value| (ident.span, value, ident.sym.to_string())),
                Prop::KeyValue(kv) => {
                    let value_expr = unwrap_expr(&kv.value);
                    match (prop_name(&kv.key), matcher.match_expr(value_expr)) {
                        (Some(name), Some(value)) => Some((value_expr.span(), value, name)),
                        _ => None,
                    }
                }
                _ => None,
            };
            if let Some((span, value, property)) = matched {
                sites.push(Matched {
                    span,
                    value,
                    site: ReferenceSite::ObjectProperty {
                        callee: callee.clone(),
                        index,
                        property,
                    },
                });
            }
        }
    }

    sites
}

/// Sites inside a JSX opening element: `<Panel t={t} />`.
pub fn jsx_sites<M: SiteMatcher>(
    element: &JSXOpeningElement,
    matcher: &M,
) -> Vec<Matched<M::Value>> {
    let component = jsx_component(&element.name);
    let mut sites = Vec::new();

    for attr in &element.attrs {
        let JSXAttrOrSpread::JSXAttr(attr) = attr else {
            continue;
        };
        let JSXAttrName::Ident(prop) = &attr.name else {
            continue;
        };
        let Some(JSXAttrValue::JSXExprContainer(container)) = &attr.value else {
            continue;
        };
        let JSXExpr::Expr(expr) = &container.expr else {
            continue;
        };

        let expr = unwrap_expr(expr);
        if let Some(value) = matcher.match_expr(expr) {
            sites.push(Matched {
                span: expr.span(),
                value,
                site: ReferenceSite::JsxProp {
                    component: component.clone(),
                    prop: prop.sym.to_string(),
                },
            });
        }
    }

    sites
}

/// Static name of an object-literal property key.
pub fn prop_name(key: &PropName) -> Option<String> {
    match key {
        PropName::Ident(ident) => Some(ident.sym.to_string()),
        PropName::Str(s) => s.value.as_str().map(|s| s.to_string()),
        _ => None,
    }
}
