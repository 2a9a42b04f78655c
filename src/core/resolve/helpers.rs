use swc_common::Span;
use swc_ecma_ast::{
    Decl, Expr, ForHead, JSXElementName, JSXObject, Lit, MemberProp, ObjectPatProp,
    OptChainBase, Pat, Stmt, VarDeclOrExpr,
};

use super::classify::CalleeRef;

/// Strip parentheses and TypeScript-only wrappers.
pub fn unwrap_expr(expr: &Expr) -> &Expr {
    match expr {
        Expr::Paren(paren) => unwrap_expr(&paren.expr),
        Expr::TsAs(ts_as) => unwrap_expr(&ts_as.expr),
        Expr::TsConstAssertion(ts_const) => unwrap_expr(&ts_const.expr),
        Expr::TsSatisfies(ts_sat) => unwrap_expr(&ts_sat.expr),
        Expr::TsNonNull(non_null) => unwrap_expr(&non_null.expr),
        Expr::TsTypeAssertion(assertion) => unwrap_expr(&assertion.expr),
        _ => expr,
    }
}

/// Like `unwrap_expr`, also looking through `await`.
pub fn unwrap_await(expr: &Expr) -> &Expr {
    match unwrap_expr(expr) {
        Expr::Await(await_expr) => unwrap_expr(&await_expr.arg),
        other => other,
    }
}

/// Value of a string literal or a template literal without substitutions.
pub fn static_string(expr: &Expr) -> Option<String> {
    match expr {
        Expr::Lit(Lit::Str(s)) => s.value.as_str().map(|s| s.to_string()),
        Expr::Tpl(tpl) if tpl.exprs.is_empty() => tpl
            .quasis
            .first()
            .and_then(|q| q.cooked.as_ref())
            .and_then(|s| s.as_str())
            .map(|s| s.to_string()),
        _ => None,
    }
}

/// Object and static property name of `obj.prop`, `obj["prop"]` or
/// `obj?.prop`.
pub fn member_access(expr: &Expr) -> Option<(&Expr, String)> {
    let member = match unwrap_expr(expr) {
        Expr::Member(member) => member,
        Expr::OptChain(chain) => match &*chain.base {
            OptChainBase::Member(member) => member,
            OptChainBase::Call(_) => return None,
        },
        _ => return None,
    };
    let property = match &member.prop {
        MemberProp::Ident(prop) => prop.sym.to_string(),
        MemberProp::Computed(computed) => static_string(unwrap_expr(&computed.expr))?,
        MemberProp::PrivateName(_) => return None,
    };
    Some((&*member.obj, property))
}

pub fn callee_ref(callee: &Expr) -> Option<CalleeRef> {
    if let Expr::Ident(ident) = unwrap_expr(callee) {
        return Some(CalleeRef::Ident(ident.sym.to_string()));
    }
    let (object, property) = member_access(callee)?;
    match unwrap_expr(object) {
        Expr::Ident(obj) => Some(CalleeRef::Member {
            object: obj.sym.to_string(),
            property,
        }),
        _ => None,
    }
}

/// Component a JSX element renders. Lowercase tags are intrinsic elements.
pub fn jsx_component(name: &JSXElementName) -> Option<CalleeRef> {
    match name {
        JSXElementName::Ident(ident) => {
            let name = ident.sym.to_string();
            name.starts_with(|c: char| c.is_ascii_uppercase())
                .then_some(CalleeRef::Ident(name))
        }
        JSXElementName::JSXMemberExpr(member) => match &member.obj {
            JSXObject::Ident(obj) => Some(CalleeRef::Member {
                object: obj.sym.to_string(),
                property: member.prop.sym.to_string(),
            }),
            JSXObject::JSXMemberExpr(_) => None,
        },
        JSXElementName::JSXNamespacedName(_) => None,
    }
}

/// Span of the identifier that binds `name` inside a pattern, if any.
pub fn pat_binding(pat: &Pat, name: &str) -> Option<Span> {
    match pat {
        Pat::Ident(ident) => (&*ident.sym == name).then_some(ident.span),
        Pat::Assign(assign) => pat_binding(&assign.left, name),
        Pat::Rest(rest) => pat_binding(&rest.arg, name),
        Pat::Array(array) => array
            .elems
            .iter()
            .flatten()
            .find_map(|elem| pat_binding(elem, name)),
        Pat::Object(object) => object.props.iter().find_map(|prop| match prop {
            ObjectPatProp::KeyValue(kv) => pat_binding(&kv.value, name),
            ObjectPatProp::Assign(assign) => (&*assign.key.sym == name).then_some(assign.key.span),
            ObjectPatProp::Rest(rest) => pat_binding(&rest.arg, name),
        }),
        _ => None,
    }
}

/// Spans of every declaration of `name` made directly by `stmts`.
pub fn declarations_in(stmts: &[Stmt], name: &str) -> Vec<Span> {
    stmts
        .iter()
        .filter_map(|stmt| match stmt {
            Stmt::Decl(decl) => decl_binding(decl, name),
            _ => None,
        })
        .collect()
}

pub fn decl_binding(decl: &Decl, name: &str) -> Option<Span> {
    match decl {
        Decl::Var(var) => var
            .decls
            .iter()
            .find_map(|declarator| pat_binding(&declarator.name, name)),
        Decl::Fn(fn_decl) => (&*fn_decl.ident.sym == name).then_some(fn_decl.ident.span),
        Decl::Class(class_decl) => {
            (&*class_decl.ident.sym == name).then_some(class_decl.ident.span)
        }
        _ => None,
    }
}

/// Whether a function with these parameters and body introduces its own
/// `name`, hiding an outer binding.
pub fn function_shadows<'a>(
    mut params: impl Iterator<Item = &'a Pat>,
    body: Option<&[Stmt]>,
    name: &str,
) -> bool {
    params.any(|pat| pat_binding(pat, name).is_some())
        || body.is_some_and(|stmts| !declarations_in(stmts, name).is_empty())
}

pub fn for_head_binds(head: &ForHead, name: &str) -> bool {
    match head {
        ForHead::VarDecl(var) => var
            .decls
            .iter()
            .any(|declarator| pat_binding(&declarator.name, name).is_some()),
        _ => false,
    }
}

pub fn for_init_binds(init: Option<&VarDeclOrExpr>, name: &str) -> bool {
    match init {
        Some(VarDeclOrExpr::VarDecl(var)) => var
            .decls
            .iter()
            .any(|declarator| pat_binding(&declarator.name, name).is_some()),
        _ => false,
    }
}
