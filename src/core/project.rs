//! Parsed source units and the module graph between them.
//!
//! A `Project` owns every parsed module of a run. All files share one
//! `SourceMap`, so a `Span` identifies a syntax node uniquely across the whole
//! project; the resolver relies on this for scope and declaration identity.

use std::{
    collections::HashMap,
    fs,
    path::{Component, Path, PathBuf},
    sync::Arc,
};

use rayon::prelude::*;
use swc_common::{SourceMap, Span};
use swc_ecma_ast::{ImportSpecifier, Module, ModuleDecl, ModuleExportName, ModuleItem};
use tracing::{debug, warn};

use crate::core::parsers::source::parse_source;
use crate::core::{SourceContext, SourceLocation};

/// Index of a unit inside a `Project`.
pub type FileId = usize;

/// Extensions tried, in order, when resolving a relative import.
const RESOLVE_EXTENSIONS: &[&str] = &["ts", "tsx", "js", "jsx"];

/// Import statement information.
///
/// Tracks how names are imported so call targets can be followed into the
/// module that declares them:
/// ```typescript
/// import { formatTitle as fmt } from "./format";
/// fmt(t); // `fmt` resolves to `formatTitle` in "./format"
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImportInfo {
    /// Local name in the importing file (e.g., "fmt").
    pub local_name: String,
    /// Original name in the imported file ("default" for default imports,
    /// "*" for namespace imports).
    pub imported_name: String,
    /// Import source (e.g., "./format").
    pub module_path: String,
}

/// A file that could not be read or parsed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseFailure {
    pub file_path: String,
    pub error: String,
}

/// One parsed source file.
pub struct SourceUnit {
    pub path: String,
    pub module: Module,
    pub imports: Vec<ImportInfo>,
}

impl SourceUnit {
    fn new(path: String, module: Module) -> Self {
        let imports = collect_imports(&module);
        Self {
            path,
            module,
            imports,
        }
    }

    /// Find the import that binds `local_name` in this file.
    pub fn import(&self, local_name: &str) -> Option<&ImportInfo> {
        self.imports.iter().find(|i| i.local_name == local_name)
    }
}

pub struct Project {
    source_map: Arc<SourceMap>,
    units: Vec<SourceUnit>,
    by_path: HashMap<PathBuf, FileId>,
    parse_failures: Vec<ParseFailure>,
}

impl Project {
    /// Read and parse every file, in parallel.
    ///
    /// Unreadable or unparsable files are recorded as `ParseFailure`s and left
    /// out of the project.
    pub fn load<I>(files: I) -> Self
    where
        I: IntoIterator<Item = String>,
    {
        let source_map = Arc::new(SourceMap::default());
        let mut files: Vec<String> = files.into_iter().collect();
        files.sort();

        let results: Vec<(String, anyhow::Result<Module>)> = files
            .into_par_iter()
            .map(|path| {
                let parsed = fs::read_to_string(&path)
                    .map_err(anyhow::Error::from)
                    .and_then(|code| parse_source(code, &path, &source_map));
                (path, parsed)
            })
            .collect();

        Self::from_results(source_map, results)
    }

    /// Build a project from in-memory sources. Parsing is sequential.
    pub fn from_sources<I, P, C>(sources: I) -> Self
    where
        I: IntoIterator<Item = (P, C)>,
        P: Into<String>,
        C: Into<String>,
    {
        let source_map = Arc::new(SourceMap::default());
        let results = sources
            .into_iter()
            .map(|(path, code)| {
                let path = path.into();
                let parsed = parse_source(code.into(), &path, &source_map);
                (path, parsed)
            })
            .collect();
        Self::from_results(source_map, results)
    }

    fn from_results(
        source_map: Arc<SourceMap>,
        results: Vec<(String, anyhow::Result<Module>)>,
    ) -> Self {
        let mut units = Vec::new();
        let mut by_path = HashMap::new();
        let mut parse_failures = Vec::new();

        for (path, parsed) in results {
            match parsed {
                Ok(module) => {
                    by_path.insert(normalize_path(Path::new(&path)), units.len());
                    units.push(SourceUnit::new(path, module));
                }
                Err(e) => {
                    warn!(file = %path, error = %e, "skipping unparsable file");
                    parse_failures.push(ParseFailure {
                        file_path: path,
                        error: e.to_string(),
                    });
                }
            }
        }

        debug!(
            parsed = units.len(),
            failed = parse_failures.len(),
            "project loaded"
        );

        Self {
            source_map,
            units,
            by_path,
            parse_failures,
        }
    }

    pub fn units(&self) -> &[SourceUnit] {
        &self.units
    }

    pub fn unit(&self, file: FileId) -> &SourceUnit {
        &self.units[file]
    }

    pub fn parse_failures(&self) -> &[ParseFailure] {
        &self.parse_failures
    }

    /// Resolve a relative module specifier used in `from` to a loaded unit.
    ///
    /// Tries `<path>.{ts,tsx,js,jsx}`, the path itself, then
    /// `<path>/index.{ts,tsx,js,jsx}`. Bare package specifiers and path
    /// aliases are not resolved.
    pub fn resolve_module(&self, from: FileId, specifier: &str) -> Option<FileId> {
        if !specifier.starts_with('.') {
            return None;
        }
        let base_dir = Path::new(&self.unit(from).path).parent()?;
        let target = normalize_path(&base_dir.join(specifier));

        let mut candidates = Vec::new();
        for ext in RESOLVE_EXTENSIONS {
            candidates.push(PathBuf::from(format!("{}.{}", target.display(), ext)));
        }
        candidates.push(target.clone());
        for ext in RESOLVE_EXTENSIONS {
            candidates.push(target.join(format!("index.{}", ext)));
        }

        candidates
            .iter()
            .find_map(|candidate| self.by_path.get(candidate).copied())
    }

    /// Source context (location and line text) for a span inside `file`.
    pub fn context_at(&self, file: FileId, span: Span) -> SourceContext {
        let loc = self.source_map.lookup_char_pos(span.lo);
        let source_line = loc
            .file
            .get_line(loc.line - 1)
            .map(|cow| cow.to_string())
            .unwrap_or_default();

        SourceContext::new(
            SourceLocation::new(&self.unit(file).path, loc.line, loc.col_display + 1),
            source_line,
        )
    }
}

/// Lexically normalize a path: drop `.` components and fold `..`.
pub fn normalize_path(path: &Path) -> PathBuf {
    let mut normalized = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                if !normalized.pop() {
                    normalized.push("..");
                }
            }
            other => normalized.push(other.as_os_str()),
        }
    }
    normalized
}

fn collect_imports(module: &Module) -> Vec<ImportInfo> {
    let mut imports = Vec::new();

    for item in &module.body {
        let ModuleItem::ModuleDecl(ModuleDecl::Import(import)) = item else {
            continue;
        };
        if import.type_only {
            continue;
        }
        let Some(module_path) = import.src.value.as_str() else {
            continue;
        };

        for specifier in &import.specifiers {
            let (local_name, imported_name) = match specifier {
                ImportSpecifier::Named(named) => {
                    if named.is_type_only {
                        continue;
                    }
                    let local_name = named.local.sym.to_string();
                    let imported_name = named
                        .imported
                        .as_ref()
                        .map(|i| match i {
                            ModuleExportName::Ident(ident) => ident.sym.to_string(),
                            ModuleExportName::Str(s) => s.value.to_string_lossy().to_string(),
                        })
                        .unwrap_or_else(|| local_name.clone());
                    (local_name, imported_name)
                }
                ImportSpecifier::Default(default) => {
                    (default.local.sym.to_string(), "default".to_string())
                }
                ImportSpecifier::Namespace(ns) => (ns.local.sym.to_string(), "*".to_string()),
            };

            imports.push(ImportInfo {
                local_name,
                imported_name,
                module_path: module_path.to_string(),
            });
        }
    }

    imports
}
