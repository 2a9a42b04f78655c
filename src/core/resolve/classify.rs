//! Reference sites and their classification.
//!
//! A `ReferenceSite` is an owned description of where a translator value
//! occurs. `classify` maps each site to what the resolver does with it.

use swc_common::{Span, Spanned};
use swc_ecma_ast::ExprOrSpread;

use super::helpers::{static_string, unwrap_expr};

/// Callee of a call expression, by name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CalleeRef {
    /// `format(t)`
    Ident(String),
    /// `helpers.format(t)`
    Member { object: String, property: String },
}

/// First argument of a translator call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum KeyArgument {
    Literal { value: String, span: Span },
    NonLiteral { span: Span },
    Missing,
}

impl KeyArgument {
    pub fn from_args(args: &[ExprOrSpread]) -> Self {
        let Some(first) = args.first() else {
            return KeyArgument::Missing;
        };
        if first.spread.is_some() {
            return KeyArgument::NonLiteral {
                span: first.span(),
            };
        }

        let expr = unwrap_expr(&first.expr);
        match static_string(expr) {
            Some(value) => KeyArgument::Literal {
                value,
                span: expr.span(),
            },
            None => KeyArgument::NonLiteral { span: expr.span() },
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReferenceSite {
    /// `t("key")`
    Callee { call_span: Span, key: KeyArgument },
    /// `t.rich("key", ...)`
    MemberCallee {
        call_span: Span,
        method: String,
        key: KeyArgument,
    },
    /// `format(t)`: bare argument at `index`.
    Argument {
        callee: Option<CalleeRef>,
        index: usize,
    },
    /// `render({ t })` or `render({ label: t })`: property of an object
    /// literal passed at `index`.
    ObjectProperty {
        callee: Option<CalleeRef>,
        index: usize,
        property: String,
    },
    /// `<Panel t={t} />`: `component` is `None` for intrinsic elements.
    JsxProp {
        component: Option<CalleeRef>,
        prop: String,
    },
    /// Any other occurrence (assignment, return, comparison, ...).
    Other { span: Span },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Classified {
    /// The translator itself is invoked.
    Direct { call_span: Span, key: KeyArgument },
    /// The translator becomes parameter `index` of `callee`.
    ForwardPositional { callee: CalleeRef, index: usize },
    /// The translator becomes `property` of the object bound by parameter
    /// `index` of `callee`.
    ForwardDestructured {
        callee: CalleeRef,
        index: usize,
        property: String,
    },
    Ignored,
}

pub fn classify(site: ReferenceSite) -> Classified {
    match site {
        ReferenceSite::Callee { call_span, key } | ReferenceSite::MemberCallee { call_span, key, .. } => {
            Classified::Direct { call_span, key }
        }
        ReferenceSite::Argument {
            callee: Some(callee),
            index,
        } => Classified::ForwardPositional { callee, index },
        ReferenceSite::ObjectProperty {
            callee: Some(callee),
            index,
            property,
        } => Classified::ForwardDestructured {
            callee,
            index,
            property,
        },
        // Components receive their props as the first parameter
        ReferenceSite::JsxProp {
            component: Some(component),
            prop,
        } => Classified::ForwardDestructured {
            callee: component,
            index: 0,
            property: prop,
        },
        ReferenceSite::Argument { callee: None, .. }
        | ReferenceSite::ObjectProperty { callee: None, .. }
        | ReferenceSite::JsxProp {
            component: None, ..
        }
        | ReferenceSite::Other { .. } => Classified::Ignored,
    }
}
