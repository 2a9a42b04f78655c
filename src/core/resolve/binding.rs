use swc_common::Span;

use crate::core::Namespace;

/// Kind of syntax node a binding is visible in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ScopeKind {
    Module,
    Block,
    /// Expression-bodied arrow function.
    Arrow,
}

/// The region of a file in which a binding's name refers to it.
///
/// All files share one source map, so a span identifies its node across the
/// whole project.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct BindingScope {
    pub kind: ScopeKind,
    pub span: Span,
}

impl BindingScope {
    pub fn module(span: Span) -> Self {
        Self {
            kind: ScopeKind::Module,
            span,
        }
    }

    pub fn block(span: Span) -> Self {
        Self {
            kind: ScopeKind::Block,
            span,
        }
    }

    pub fn arrow(span: Span) -> Self {
        Self {
            kind: ScopeKind::Arrow,
            span,
        }
    }
}

/// A name known to hold a translator.
///
/// Created either from a hook call (`const t = useTranslations("ns")`) or
/// from a parameter a translator was forwarded into. The namespace never
/// changes across forwarding.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TranslatorBinding {
    pub name: String,
    pub namespace: Namespace,
    /// Span of the binding identifier.
    pub declaration: Span,
    pub scope: BindingScope,
}
