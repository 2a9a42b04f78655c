//! Lookup of the functions a translator can be forwarded into.
//!
//! Declarations are found by name. Module-level declarations win over
//! nested ones, and among declarations with the same name the first one with
//! a body is used.

use swc_common::Span;
use swc_ecma_ast::{
    ArrowExpr, BlockStmtOrExpr, ClassMember, Decl, DefaultDecl, Expr, ExportSpecifier, Function,
    Module, ModuleDecl, ModuleExportName, ModuleItem, ObjectPatProp, Pat, Prop, PropName,
    PropOrSpread, Stmt,
};

use super::binding::BindingScope;
use super::helpers::unwrap_expr;
use super::sites::prop_name;

/// A function, method or arrow function with a body.
#[derive(Debug, Clone)]
pub struct Callable<'a> {
    pub params: Vec<&'a Pat>,
    /// Scope of bindings created from the parameters.
    pub scope: BindingScope,
}

impl<'a> Callable<'a> {
    fn from_function(function: &'a Function) -> Option<Self> {
        let body = function.body.as_ref()?;
        Some(Self {
            params: function.params.iter().map(|p| &p.pat).collect(),
            scope: BindingScope::block(body.span),
        })
    }

    fn from_arrow(arrow: &'a ArrowExpr) -> Self {
        let scope = match &*arrow.body {
            BlockStmtOrExpr::BlockStmt(body) => BindingScope::block(body.span),
            BlockStmtOrExpr::Expr(_) => BindingScope::arrow(arrow.span),
        };
        Self {
            params: arrow.params.iter().collect(),
            scope,
        }
    }

    fn from_expr(expr: &'a Expr) -> Option<Self> {
        match unwrap_expr(expr) {
            Expr::Fn(fn_expr) => Self::from_function(&fn_expr.function),
            Expr::Arrow(arrow) => Some(Self::from_arrow(arrow)),
            _ => None,
        }
    }

    /// The parameter at `index` when it is a plain identifier, optionally
    /// with a default value.
    pub fn positional(&self, index: usize) -> Option<(String, Span)> {
        match self.params.get(index)? {
            Pat::Ident(ident) => Some((ident.sym.to_string(), ident.span)),
            Pat::Assign(assign) => match &*assign.left {
                Pat::Ident(ident) => Some((ident.sym.to_string(), ident.span)),
                _ => None,
            },
            _ => None,
        }
    }

    /// The local name bound to `property` when the parameter at `index` is an
    /// object pattern: `{ t }`, `{ t: translate }`, `{ t = fallback }`.
    pub fn destructured(&self, index: usize, property: &str) -> Option<(String, Span)> {
        let pattern = match self.params.get(index)? {
            Pat::Object(object) => object,
            Pat::Assign(assign) => match &*assign.left {
                Pat::Object(object) => object,
                _ => return None,
            },
            _ => return None,
        };

        pattern.props.iter().find_map(|prop| match prop {
            ObjectPatProp::Assign(assign) if &*assign.key.sym == property => {
                Some((assign.key.sym.to_string(), assign.key.span))
            }
            ObjectPatProp::KeyValue(kv) if prop_name(&kv.key).as_deref() == Some(property) => {
                match &*kv.value {
                    Pat::Ident(ident) => Some((ident.sym.to_string(), ident.span)),
                    Pat::Assign(assign) => match &*assign.left {
                        Pat::Ident(ident) => Some((ident.sym.to_string(), ident.span)),
                        _ => None,
                    },
                    _ => None,
                }
            }
            _ => None,
        })
    }
}

fn module_stmts(module: &Module) -> impl Iterator<Item = StmtRef<'_>> {
    module.body.iter().filter_map(|item| match item {
        ModuleItem::Stmt(Stmt::Decl(decl)) => Some(StmtRef::Decl(decl)),
        ModuleItem::Stmt(stmt) => Some(StmtRef::Other(stmt)),
        ModuleItem::ModuleDecl(ModuleDecl::ExportDecl(export)) => Some(StmtRef::Decl(&export.decl)),
        ModuleItem::ModuleDecl(ModuleDecl::ExportDefaultDecl(export)) => match &export.decl {
            DefaultDecl::Fn(fn_expr) => Some(StmtRef::DefaultFn(
                fn_expr.ident.as_ref().map(|i| i.sym.to_string()),
                &fn_expr.function,
            )),
            _ => None,
        },
        ModuleItem::ModuleDecl(ModuleDecl::ExportDefaultExpr(export)) => {
            Some(StmtRef::DefaultExpr(&export.expr))
        }
        ModuleItem::ModuleDecl(_) => None,
    })
}

/// Module-level items seen through the export wrappers around them.
enum StmtRef<'a> {
    Decl(&'a Decl),
    DefaultFn(Option<String>, &'a Function),
    DefaultExpr(&'a Expr),
    Other(&'a Stmt),
}

/// Callable declared as `name` by `decl`.
fn callable_in_decl<'a>(decl: &'a Decl, name: &str) -> Option<Callable<'a>> {
    match decl {
        Decl::Fn(fn_decl) if &*fn_decl.ident.sym == name => {
            Callable::from_function(&fn_decl.function)
        }
        Decl::Var(var) => var.decls.iter().find_map(|declarator| match &declarator.name {
            Pat::Ident(ident) if &*ident.sym == name => {
                declarator.init.as_deref().and_then(Callable::from_expr)
            }
            _ => None,
        }),
        _ => None,
    }
}

/// Find a function or arrow function declared as `name` anywhere in `module`.
pub fn find_callable<'a>(module: &'a Module, name: &str) -> Option<Callable<'a>> {
    let top_level = module_stmts(module).find_map(|stmt| match stmt {
        StmtRef::Decl(decl) => callable_in_decl(decl, name),
        StmtRef::DefaultFn(Some(ident), function) if ident == name => {
            Callable::from_function(function)
        }
        _ => None,
    });
    if top_level.is_some() {
        return top_level;
    }

    module_stmts(module).find_map(|stmt| match stmt {
        StmtRef::Decl(decl) => nested_in_decl(decl, name),
        StmtRef::DefaultFn(_, function) => nested_in_function(function, name),
        StmtRef::DefaultExpr(expr) => nested_in_expr(expr, name),
        StmtRef::Other(stmt) => nested_in_stmt(stmt, name),
    })
}

fn nested_in_stmts<'a>(stmts: &'a [Stmt], name: &str) -> Option<Callable<'a>> {
    stmts
        .iter()
        .find_map(|stmt| match stmt {
            Stmt::Decl(decl) => callable_in_decl(decl, name),
            _ => None,
        })
        .or_else(|| stmts.iter().find_map(|stmt| nested_in_stmt(stmt, name)))
}

fn nested_in_stmt<'a>(stmt: &'a Stmt, name: &str) -> Option<Callable<'a>> {
    match stmt {
        Stmt::Decl(decl) => nested_in_decl(decl, name),
        Stmt::Block(block) => nested_in_stmts(&block.stmts, name),
        Stmt::If(if_stmt) => nested_in_stmt(&if_stmt.cons, name)
            .or_else(|| if_stmt.alt.as_deref().and_then(|alt| nested_in_stmt(alt, name))),
        Stmt::Try(try_stmt) => nested_in_stmts(&try_stmt.block.stmts, name),
        _ => None,
    }
}

fn nested_in_decl<'a>(decl: &'a Decl, name: &str) -> Option<Callable<'a>> {
    match decl {
        Decl::Fn(fn_decl) => nested_in_function(&fn_decl.function, name),
        Decl::Var(var) => var
            .decls
            .iter()
            .filter_map(|declarator| declarator.init.as_deref())
            .find_map(|init| nested_in_expr(init, name)),
        _ => None,
    }
}

fn nested_in_function<'a>(function: &'a Function, name: &str) -> Option<Callable<'a>> {
    function
        .body
        .as_ref()
        .and_then(|body| nested_in_stmts(&body.stmts, name))
}

fn nested_in_expr<'a>(expr: &'a Expr, name: &str) -> Option<Callable<'a>> {
    match unwrap_expr(expr) {
        Expr::Fn(fn_expr) => nested_in_function(&fn_expr.function, name),
        Expr::Arrow(arrow) => match &*arrow.body {
            BlockStmtOrExpr::BlockStmt(body) => nested_in_stmts(&body.stmts, name),
            BlockStmtOrExpr::Expr(_) => None,
        },
        _ => None,
    }
}

fn export_name(name: &ModuleExportName) -> String {
    match name {
        ModuleExportName::Ident(ident) => ident.sym.to_string(),
        ModuleExportName::Str(s) => s.value.to_string_lossy().to_string(),
    }
}

/// Local name behind an `export { local as exported }` without a source.
fn exported_local(module: &Module, exported: &str) -> Option<String> {
    module.body.iter().find_map(|item| match item {
        ModuleItem::ModuleDecl(ModuleDecl::ExportNamed(named)) if named.src.is_none() => {
            named.specifiers.iter().find_map(|specifier| match specifier {
                ExportSpecifier::Named(spec) => {
                    let local = export_name(&spec.orig);
                    let public = spec.exported.as_ref().map(export_name);
                    (public.as_deref().unwrap_or(&local) == exported).then_some(local)
                }
                _ => None,
            })
        }
        _ => None,
    })
}

/// Local name of the value exported as default, when it is an identifier.
pub fn default_export_local(module: &Module) -> Option<String> {
    module
        .body
        .iter()
        .find_map(|item| match item {
            ModuleItem::ModuleDecl(ModuleDecl::ExportDefaultExpr(export)) => {
                match unwrap_expr(&export.expr) {
                    Expr::Ident(ident) => Some(ident.sym.to_string()),
                    _ => None,
                }
            }
            _ => None,
        })
        .or_else(|| exported_local(module, "default"))
}

/// Find the callable a module exports as `exported` ("default" for the
/// default export).
///
/// Re-exports with a source (`export { x } from "./y"`, `export * from`) are
/// not followed.
pub fn find_export<'a>(module: &'a Module, exported: &str) -> Option<Callable<'a>> {
    let declared = module_stmts(module).find_map(|stmt| match (stmt, exported) {
        (StmtRef::DefaultFn(_, function), "default") => Callable::from_function(function),
        (StmtRef::DefaultExpr(expr), "default") => Callable::from_expr(expr),
        _ => None,
    });
    if declared.is_some() {
        return declared;
    }

    let exported_decl = module.body.iter().find_map(|item| match item {
        ModuleItem::ModuleDecl(ModuleDecl::ExportDecl(export)) => {
            callable_in_decl(&export.decl, exported)
        }
        _ => None,
    });
    if exported_decl.is_some() {
        return exported_decl;
    }

    let local = if exported == "default" {
        default_export_local(module)?
    } else {
        exported_local(module, exported)?
    };
    find_callable(module, &local)
}

/// Find `object.member` where `object` is an object literal or a class
/// declared at module level.
pub fn find_member_callable<'a>(
    module: &'a Module,
    object: &str,
    member: &str,
) -> Option<Callable<'a>> {
    module_stmts(module).find_map(|stmt| {
        let StmtRef::Decl(decl) = stmt else {
            return None;
        };
        match decl {
            Decl::Class(class_decl) if &*class_decl.ident.sym == object => {
                class_decl.class.body.iter().find_map(|class_member| match class_member {
                    ClassMember::Method(method) if is_named(&method.key, member) => {
                        Callable::from_function(&method.function)
                    }
                    ClassMember::ClassProp(prop) if is_named(&prop.key, member) => {
                        prop.value.as_deref().and_then(Callable::from_expr)
                    }
                    _ => None,
                })
            }
            Decl::Var(var) => var.decls.iter().find_map(|declarator| {
                let Pat::Ident(ident) = &declarator.name else {
                    return None;
                };
                if &*ident.sym != object {
                    return None;
                }
                let Expr::Object(literal) = unwrap_expr(declarator.init.as_deref()?) else {
                    return None;
                };
                literal.props.iter().find_map(|prop| {
                    let PropOrSpread::Prop(prop) = prop else {
                        return None;
                    };
                    match &**prop {
                        Prop::Method(method) if is_named(&method.key, member) => {
                            Callable::from_function(&method.function)
                        }
                        Prop::KeyValue(kv) if is_named(&kv.key, member) => {
                            Callable::from_expr(&kv.value)
                        }
                        Prop::Shorthand(ident) if &*ident.sym == member => {
                            find_callable(module, member)
                        }
                        _ => None,
                    }
                })
            }),
            _ => None,
        }
    })
}

fn is_named(key: &PropName, name: &str) -> bool {
    prop_name(key).as_deref() == Some(name)
}
