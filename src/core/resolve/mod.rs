//! Translation key usage resolver.
//!
//! Finds every key passed to a translator obtained from a configured hook,
//! following the translator through renames, positional arguments, object
//! arguments and JSX props into the functions that receive it.
//!
//! ## Pipeline
//!
//! 1. `HookCollector`: hook calls in files that import a configured hook
//! 2. `ReferenceFinder`: occurrences of each binding inside its scope
//! 3. `classify`: what each occurrence means
//! 4. `declarations`: the function a forwarded translator lands in
//!
//! Forwarding recurses with an explicit `Traversal`. Its visited set is keyed
//! by declaration and namespace, so cycles terminate and a helper reached
//! with two namespaces is expanded once for each.

mod binding;
mod classify;
mod declarations;
mod helpers;
mod hooks;
mod references;
mod sites;


use std::collections::{BTreeSet, HashSet};

use swc_common::Span;
use swc_ecma_visit::VisitWith;
use tracing::debug;

pub use binding::{BindingScope, ScopeKind, TranslatorBinding};
pub use classify::{CalleeRef, Classified, KeyArgument, ReferenceSite, classify};
pub use declarations::Callable;
pub use hooks::{HookCollector, HookNamespace};
pub use references::ReferenceFinder;

use crate::config::HookSpec;
use crate::core::project::{FileId, Project};
use crate::core::{DynamicReason, DynamicUsage, KeyUsage, Namespace, SourceContext};

/// Everything the resolver proved about a project.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Resolution {
    /// Fully-qualified keys reachable from literal call sites.
    pub used_keys: BTreeSet<String>,
    /// One entry per literal call site, sorted by location.
    pub usages: Vec<KeyUsage>,
    /// Usages that cannot be proven static, sorted by location.
    pub dynamic_usages: Vec<DynamicUsage>,
}

impl Resolution {
    pub fn usages_in<'a>(&'a self, file_path: &'a str) -> impl Iterator<Item = &'a KeyUsage> {
        self.usages
            .iter()
            .filter(move |usage| usage.context.file_path() == file_path)
    }

    pub fn dynamic_usages_in<'a>(
        &'a self,
        file_path: &'a str,
    ) -> impl Iterator<Item = &'a DynamicUsage> {
        self.dynamic_usages
            .iter()
            .filter(move |usage| usage.context.file_path() == file_path)
    }
}

/// State threaded through one resolution run.
#[derive(Default)]
struct Traversal {
    /// Bindings already expanded, by declaration and namespace.
    visited: HashSet<(Span, Namespace)>,
    resolution: Resolution,
}

impl Traversal {
    fn record_key(&mut self, usage: KeyUsage) {
        self.resolution.used_keys.insert(usage.key.clone());
        self.resolution.usages.push(usage);
    }

    fn record_dynamic(
        &mut self,
        context: SourceContext,
        namespace: Option<Namespace>,
        reason: DynamicReason,
    ) {
        self.resolution.dynamic_usages.push(DynamicUsage {
            context,
            namespace,
            reason,
        });
    }

    fn finish(mut self) -> Resolution {
        let resolution = &mut self.resolution;
        resolution
            .usages
            .sort_by(|a, b| a.context.location.cmp(&b.context.location).then(a.key.cmp(&b.key)));
        resolution.usages.dedup();
        resolution
            .dynamic_usages
            .sort_by(|a, b| a.context.location.cmp(&b.context.location));
        resolution.dynamic_usages.dedup();
        self.resolution
    }
}

pub struct Resolver<'p> {
    project: &'p Project,
    hooks: &'p [HookSpec],
}

impl<'p> Resolver<'p> {
    pub fn new(project: &'p Project, hooks: &'p [HookSpec]) -> Self {
        Self { project, hooks }
    }

    /// Resolve every translator usage in the project. Never fails: anything
    /// that cannot be followed is either ignored or reported as dynamic.
    pub fn resolve(&self) -> Resolution {
        let mut traversal = Traversal::default();

        for (file, unit) in self.project.units().iter().enumerate() {
            let hook_names = self.hook_names(file);
            if hook_names.is_empty() {
                continue;
            }

            let mut collector = HookCollector::new(&hook_names);
            unit.module.visit_with(&mut collector);
            debug!(
                file = %unit.path,
                bindings = collector.bindings.len(),
                in_place = collector.sites.len(),
                "hook calls collected"
            );

            for span in collector.dynamic_namespaces {
                traversal.record_dynamic(
                    self.project.context_at(file, span),
                    None,
                    DynamicReason::NonLiteralNamespace,
                );
            }
            for (namespace, site) in collector.sites {
                self.apply(file, &namespace, classify(site), &mut traversal);
            }
            for binding in collector.bindings {
                self.expand(file, binding, &mut traversal);
            }
        }

        traversal.finish()
    }

    /// Local names under which `file` imports a configured hook.
    fn hook_names(&self, file: FileId) -> HashSet<String> {
        self.project
            .unit(file)
            .imports
            .iter()
            .filter(|import| {
                self.hooks.iter().any(|hook| {
                    hook.name == import.imported_name && hook.module == import.module_path
                })
            })
            .map(|import| import.local_name.clone())
            .collect()
    }

    fn expand(&self, file: FileId, binding: TranslatorBinding, traversal: &mut Traversal) {
        if !traversal
            .visited
            .insert((binding.declaration, binding.namespace.clone()))
        {
            return;
        }

        let unit = self.project.unit(file);
        let sites = ReferenceFinder::find(&unit.module, &binding);
        debug!(
            file = %unit.path,
            name = %binding.name,
            namespace = %binding.namespace,
            references = sites.len(),
            "expanding translator binding"
        );

        for site in sites {
            self.apply(file, &binding.namespace, classify(site), traversal);
        }
    }

    fn apply(
        &self,
        file: FileId,
        namespace: &Namespace,
        classified: Classified,
        traversal: &mut Traversal,
    ) {
        match classified {
            Classified::Direct { call_span, key } => match key {
                KeyArgument::Literal { value, span } => traversal.record_key(KeyUsage {
                    context: self.project.context_at(file, span),
                    key: namespace.qualify(&value),
                    namespace: namespace.clone(),
                }),
                KeyArgument::NonLiteral { span } => traversal.record_dynamic(
                    self.project.context_at(file, span),
                    Some(namespace.clone()),
                    DynamicReason::NonLiteralKey,
                ),
                KeyArgument::Missing => traversal.record_dynamic(
                    self.project.context_at(file, call_span),
                    Some(namespace.clone()),
                    DynamicReason::MissingKey,
                ),
            },
            Classified::ForwardPositional { callee, index } => {
                let Some((target, callable)) = self.resolve_callee(file, &callee) else {
                    debug!(?callee, "forwarding target not found");
                    return;
                };
                if let Some((name, declaration)) = callable.positional(index) {
                    let binding = TranslatorBinding {
                        name,
                        namespace: namespace.clone(),
                        declaration,
                        scope: callable.scope,
                    };
                    self.expand(target, binding, traversal);
                }
            }
            Classified::ForwardDestructured {
                callee,
                index,
                property,
            } => {
                let Some((target, callable)) = self.resolve_callee(file, &callee) else {
                    debug!(?callee, "forwarding target not found");
                    return;
                };
                if let Some((name, declaration)) = callable.destructured(index, &property) {
                    let binding = TranslatorBinding {
                        name,
                        namespace: namespace.clone(),
                        declaration,
                        scope: callable.scope,
                    };
                    self.expand(target, binding, traversal);
                }
            }
            Classified::Ignored => {}
        }
    }

    /// Find the declaration a callee refers to: a function in the same file,
    /// or one import hop into another project file.
    fn resolve_callee(&self, file: FileId, callee: &CalleeRef) -> Option<(FileId, Callable<'p>)> {
        let unit = self.project.unit(file);
        match callee {
            CalleeRef::Ident(name) => {
                if let Some(callable) = declarations::find_callable(&unit.module, name) {
                    return Some((file, callable));
                }
                let import = unit.import(name)?;
                if import.imported_name == "*" {
                    return None;
                }
                let target = self.project.resolve_module(file, &import.module_path)?;
                let callable =
                    declarations::find_export(&self.project.unit(target).module, &import.imported_name)?;
                Some((target, callable))
            }
            CalleeRef::Member { object, property } => {
                if let Some(callable) =
                    declarations::find_member_callable(&unit.module, object, property)
                {
                    return Some((file, callable));
                }
                let import = unit.import(object)?;
                let target = self.project.resolve_module(file, &import.module_path)?;
                let target_module = &self.project.unit(target).module;
                let callable = match import.imported_name.as_str() {
                    "*" => declarations::find_export(target_module, property)?,
                    "default" => {
                        let local = declarations::default_export_local(target_module)?;
                        declarations::find_member_callable(target_module, &local, property)?
                    }
                    exported => {
                        declarations::find_member_callable(target_module, exported, property)?
                    }
                };
                Some((target, callable))
            }
        }
    }
}
