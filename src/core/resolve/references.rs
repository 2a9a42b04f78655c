//! Finding every reference to a translator binding inside its scope.

use std::collections::HashSet;

use swc_common::Span;
use swc_ecma_ast::{
    ArrowExpr, BlockStmt, BlockStmtOrExpr, CallExpr, CatchClause, Constructor, Expr,
    ForInStmt, ForOfStmt, ForStmt, Function, Ident, JSXOpeningElement, Module, OptChainExpr,
    ParamOrTsParamProp,
};
use swc_ecma_visit::{Visit, VisitWith};

use super::binding::{ScopeKind, TranslatorBinding};
use super::classify::ReferenceSite;
use super::helpers::{
    declarations_in, for_head_binds, for_init_binds, function_shadows, pat_binding,
};
use super::sites::{Invocation, SiteMatcher, call_sites, jsx_sites};

struct NameMatcher<'n>(&'n str);

impl SiteMatcher for NameMatcher<'_> {
    type Value = ();

    fn match_expr(&self, expr: &Expr) -> Option<()> {
        match expr {
            Expr::Ident(ident) if &*ident.sym == self.0 => Some(()),
            _ => None,
        }
    }

    fn match_shorthand(&self, ident: &Ident) -> Option<()> {
        (&*ident.sym == self.0).then_some(())
    }
}

/// Walks a module and collects the reference sites of one binding.
///
/// The walk covers the whole module but only records sites while inside the
/// binding's scope node. Nested functions and blocks that declare the same
/// name again are skipped.
pub struct ReferenceFinder<'b> {
    binding: &'b TranslatorBinding,
    active: bool,
    /// Identifiers already reported as part of a more specific site.
    claimed: HashSet<Span>,
    sites: Vec<ReferenceSite>,
}

impl<'b> ReferenceFinder<'b> {
    pub fn find(module: &Module, binding: &'b TranslatorBinding) -> Vec<ReferenceSite> {
        let mut finder = Self {
            binding,
            active: false,
            claimed: HashSet::new(),
            sites: Vec::new(),
        };
        module.visit_with(&mut finder);
        finder.sites
    }

    fn name(&self) -> &'b str {
        &self.binding.name
    }

    fn is_scope(&self, kind: ScopeKind, span: Span) -> bool {
        self.binding.scope.kind == kind && self.binding.scope.span == span
    }

    /// Visit a node that is the binding's scope with recording switched on.
    fn visit_scope<N: VisitWith<Self>>(&mut self, node: &N) {
        self.active = true;
        node.visit_children_with(self);
        self.active = false;
    }

    fn record_call(&mut self, call: Invocation) {
        if !self.active {
            return;
        }
        for matched in call_sites(call, &NameMatcher(self.name())) {
            self.claimed.insert(matched.span);
            self.sites.push(matched.site);
        }
    }

    /// A nested block redeclares the name unless the declaration found is
    /// the binding itself (`var` inside a nested block).
    fn block_shadows(&self, block: &BlockStmt) -> bool {
        declarations_in(&block.stmts, self.name())
            .into_iter()
            .any(|span| span != self.binding.declaration)
    }
}

impl Visit for ReferenceFinder<'_> {
    fn visit_module(&mut self, module: &Module) {
        if self.is_scope(ScopeKind::Module, module.span) {
            self.visit_scope(module);
        } else {
            module.visit_children_with(self);
        }
    }

    fn visit_block_stmt(&mut self, block: &BlockStmt) {
        if !self.active && self.is_scope(ScopeKind::Block, block.span) {
            self.visit_scope(block);
            return;
        }
        if self.active && self.block_shadows(block) {
            return;
        }
        block.visit_children_with(self);
    }

    fn visit_function(&mut self, function: &Function) {
        if self.active
            && function_shadows(
                function.params.iter().map(|p| &p.pat),
                function.body.as_ref().map(|b| b.stmts.as_slice()),
                self.name(),
            )
        {
            return;
        }
        function.visit_children_with(self);
    }

    fn visit_arrow_expr(&mut self, arrow: &ArrowExpr) {
        if !self.active && self.is_scope(ScopeKind::Arrow, arrow.span) {
            self.visit_scope(arrow);
            return;
        }
        let body = match &*arrow.body {
            BlockStmtOrExpr::BlockStmt(block) => Some(block.stmts.as_slice()),
            BlockStmtOrExpr::Expr(_) => None,
        };
        if self.active && function_shadows(arrow.params.iter(), body, self.name()) {
            return;
        }
        arrow.visit_children_with(self);
    }

    fn visit_constructor(&mut self, constructor: &Constructor) {
        let shadows = constructor.params.iter().any(|param| match param {
            ParamOrTsParamProp::Param(param) => pat_binding(&param.pat, self.name()).is_some(),
            ParamOrTsParamProp::TsParamProp(_) => false,
        });
        if self.active && shadows {
            return;
        }
        constructor.visit_children_with(self);
    }

    fn visit_catch_clause(&mut self, clause: &CatchClause) {
        if self.active
            && clause
                .param
                .as_ref()
                .is_some_and(|pat| pat_binding(pat, self.name()).is_some())
        {
            return;
        }
        clause.visit_children_with(self);
    }

    fn visit_for_of_stmt(&mut self, stmt: &ForOfStmt) {
        if self.active && for_head_binds(&stmt.left, self.name()) {
            return;
        }
        stmt.visit_children_with(self);
    }

    fn visit_for_in_stmt(&mut self, stmt: &ForInStmt) {
        if self.active && for_head_binds(&stmt.left, self.name()) {
            return;
        }
        stmt.visit_children_with(self);
    }

    fn visit_for_stmt(&mut self, stmt: &ForStmt) {
        if self.active && for_init_binds(stmt.init.as_ref(), self.name()) {
            return;
        }
        stmt.visit_children_with(self);
    }

    fn visit_call_expr(&mut self, call: &CallExpr) {
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
        if self.active {
            for matched in jsx_sites(element, &NameMatcher(self.name())) {
                self.claimed.insert(matched.span);
                self.sites.push(matched.site);
            }
        }
        element.visit_children_with(self);
    }

    fn visit_expr(&mut self, expr: &Expr) {
        if self.active
            && let Expr::Ident(ident) = expr
            && &*ident.sym == self.name()
            && !self.claimed.contains(&ident.span)
        {
            self.sites.push(ReferenceSite::Other { span: ident.span });
        }
        expr.visit_children_with(self);
    }
}
