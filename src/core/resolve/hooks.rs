//! Discovery of translator-producing hook calls.
//!
//! ```typescript
//! const t = useTranslations("common");        // binding, block scoped
//! const t = await getTranslations("common");  // binding
//! useTranslations("common")("title");         // used in place
//! <Header t={useTranslations("nav")} />       // used in place
//! useTranslations(ns);                        // dynamic namespace
//! ```

use std::collections::HashSet;

use swc_common::{Span, Spanned};
use swc_ecma_ast::{
    ArrowExpr, BlockStmt, BlockStmtOrExpr, CallExpr, Callee, Constructor, Expr, Function,
    JSXOpeningElement, Module, OptChainExpr, Pat, Prop, PropOrSpread, VarDecl, VarDeclKind,
};
use swc_ecma_visit::{Visit, VisitWith};

use super::binding::{BindingScope, TranslatorBinding};
use super::classify::ReferenceSite;
use super::helpers::{static_string, unwrap_await, unwrap_expr};
use super::sites::{Invocation, SiteMatcher, call_sites, jsx_sites, prop_name};
use crate::core::Namespace;

/// Namespace argument of a hook call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HookNamespace {
    Literal(Namespace),
    /// The namespace cannot be read statically.
    Dynamic,
}

/// Evaluate a hook call's namespace if `call` invokes one of `hooks`.
///
/// Accepts no argument, a string literal, a template without substitutions,
/// or an options object with a `namespace` property
/// (`getTranslations({ locale, namespace: "ns" })`).
pub fn hook_call_namespace(hooks: &HashSet<String>, call: &CallExpr) -> Option<HookNamespace> {
    let Callee::Expr(callee) = &call.callee else {
        return None;
    };
    let Expr::Ident(ident) = unwrap_expr(callee) else {
        return None;
    };
    if !hooks.contains(&*ident.sym) {
        return None;
    }

    let Some(first) = call.args.first() else {
        return Some(HookNamespace::Literal(Namespace::Default));
    };
    if first.spread.is_some() {
        return Some(HookNamespace::Dynamic);
    }

    let arg = unwrap_expr(&first.expr);
    if let Some(value) = static_string(arg) {
        return Some(HookNamespace::Literal(Namespace::from_literal(&value)));
    }
    let Expr::Object(options) = arg else {
        return Some(HookNamespace::Dynamic);
    };

    for prop in &options.props {
        let PropOrSpread::Prop(prop) = prop else {
            // `{ ...options }` may carry a namespace
            return Some(HookNamespace::Dynamic);
        };
        match &**prop {
            Prop::KeyValue(kv) if prop_name(&kv.key).as_deref() == Some("namespace") => {
                return Some(match static_string(unwrap_expr(&kv.value)) {
                    Some(value) => HookNamespace::Literal(Namespace::from_literal(&value)),
                    None => HookNamespace::Dynamic,
                });
            }
            Prop::Shorthand(ident) if &*ident.sym == "namespace" => {
                return Some(HookNamespace::Dynamic);
            }
            _ => {}
        }
    }
    Some(HookNamespace::Literal(Namespace::Default))
}

fn hook_namespace(hooks: &HashSet<String>, expr: &Expr) -> Option<HookNamespace> {
    match unwrap_await(expr) {
        Expr::Call(call) => hook_call_namespace(hooks, call),
        _ => None,
    }
}

struct HookMatcher<'h>(&'h HashSet<String>);

impl SiteMatcher for HookMatcher<'_> {
    type Value = Namespace;

    fn match_expr(&self, expr: &Expr) -> Option<Namespace> {
        match hook_namespace(self.0, expr)? {
            HookNamespace::Literal(namespace) => Some(namespace),
            HookNamespace::Dynamic => None,
        }
    }
}

#[derive(Debug, Clone, Copy)]
struct Scope {
    scope: BindingScope,
    /// Function bodies and the module hold `var` declarations.
    is_function: bool,
}

/// Collects hook calls of one file.
pub struct HookCollector<'h> {
    hooks: &'h HashSet<String>,
    scopes: Vec<Scope>,
    /// Named translators.
    pub bindings: Vec<TranslatorBinding>,
    /// Hook calls used directly as a value.
    pub sites: Vec<(Namespace, ReferenceSite)>,
    /// Spans of hook calls whose namespace is not static.
    pub dynamic_namespaces: Vec<Span>,
}

impl<'h> HookCollector<'h> {
    pub fn new(hooks: &'h HashSet<String>) -> Self {
        Self {
            hooks,
            scopes: Vec::new(),
            bindings: Vec::new(),
            sites: Vec::new(),
            dynamic_namespaces: Vec::new(),
        }
    }

    fn scope_for(&self, kind: VarDeclKind) -> Option<BindingScope> {
        let scope = match kind {
            VarDeclKind::Var => self.scopes.iter().rev().find(|s| s.is_function),
            VarDeclKind::Let | VarDeclKind::Const => self.scopes.last(),
        };
        scope.map(|s| s.scope)
    }

    fn with_scope<N: VisitWith<Self>>(&mut self, scope: BindingScope, is_function: bool, node: &N) {
        self.scopes.push(Scope { scope, is_function });
        node.visit_children_with(self);
        self.scopes.pop();
    }

    fn record_call(&mut self, call: Invocation) {
        for matched in call_sites(call, &HookMatcher(self.hooks)) {
            self.sites.push((matched.value, matched.site));
        }
    }

    fn visit_function_body(&mut self, body: &BlockStmt) {
        self.with_scope(BindingScope::block(body.span), true, body);
    }
}

impl Visit for HookCollector<'_> {
    fn visit_module(&mut self, module: &Module) {
        self.with_scope(BindingScope::module(module.span), true, module);
    }

    fn visit_block_stmt(&mut self, block: &BlockStmt) {
        self.with_scope(BindingScope::block(block.span), false, block);
    }

    fn visit_function(&mut self, function: &Function) {
        function.decorators.visit_with(self);
        function.params.visit_with(self);
        if let Some(body) = &function.body {
            self.visit_function_body(body);
        }
    }

    fn visit_constructor(&mut self, constructor: &Constructor) {
        constructor.params.visit_with(self);
        if let Some(body) = &constructor.body {
            self.visit_function_body(body);
        }
    }

    fn visit_arrow_expr(&mut self, arrow: &ArrowExpr) {
        arrow.params.visit_with(self);
        match &*arrow.body {
            BlockStmtOrExpr::BlockStmt(body) => self.visit_function_body(body),
            BlockStmtOrExpr::Expr(expr) => {
                self.scopes.push(Scope {
                    scope: BindingScope::arrow(arrow.span),
                    is_function: true,
                });
                expr.visit_with(self);
                self.scopes.pop();
            }
        }
    }

    fn visit_var_decl(&mut self, var: &VarDecl) {
        for declarator in &var.decls {
            let Pat::Ident(name) = &declarator.name else {
                continue;
            };
            let Some(init) = &declarator.init else {
                continue;
            };
            let Some(HookNamespace::Literal(namespace)) = hook_namespace(self.hooks, init) else {
                continue;
            };
            let Some(scope) = self.scope_for(var.kind) else {
                continue;
            };
            self.bindings.push(TranslatorBinding {
                name: name.sym.to_string(),
                namespace,
                declaration: name.span,
                scope,
            });
        }
        var.visit_children_with(self);
    }

    fn visit_call_expr(&mut self, call: &CallExpr) {
        if let Some(HookNamespace::Dynamic) = hook_call_namespace(self.hooks, call) {
            self.dynamic_namespaces.push(call.span());
        }
        self.record_call(Invocation::call(call));
        call.visit_children_with(self);
    }

    fn visit_opt_chain_expr(&mut self, chain: &OptChainExpr) {
        if let Some(call) = Invocation::optional(chain) {
            self.record_call(call);
        }
        chain.visit_children_with(self);
    }

    fn visit_jsx_opening_element(&mut self, element: &JSXOpeningElement) {
        for matched in jsx_sites(element, &HookMatcher(self.hooks)) {
            self.sites.push((matched.value, matched.site));
        }
        element.visit_children_with(self);
    }
}
