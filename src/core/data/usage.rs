//! Records produced by the usage resolver.
//!
//! - `Namespace`: the prefix a translator was created with
//! - `KeyUsage`: one call site that passes a literal key
//! - `DynamicUsage`: one call site whose key cannot be proven static

use std::fmt;

use crate::core::data::source::SourceContext;

/// Namespace fixed when a translator is created by the hook.
///
/// `useTranslations()`, `useTranslations("")` and `useTranslations("default")`
/// all address the root of the message document, represented by `Default`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Namespace {
    Default,
    Named(String),
}

impl Namespace {
    pub fn from_literal(value: &str) -> Self {
        if value.is_empty() || value == "default" {
            Namespace::Default
        } else {
            Namespace::Named(value.to_string())
        }
    }

    /// Build the fully-qualified key for a literal passed to a translator.
    ///
    /// ```
    /// use keyscan::core::Namespace;
    ///
    /// assert_eq!(Namespace::Default.qualify("title"), "title");
    /// assert_eq!(Namespace::from_literal("common").qualify("title"), "common.title");
    /// ```
    pub fn qualify(&self, key: &str) -> String {
        match self {
            Namespace::Default => key.to_string(),
            Namespace::Named(ns) => format!("{}.{}", ns, key),
        }
    }
}

impl fmt::Display for Namespace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Namespace::Default => write!(f, "default"),
            Namespace::Named(ns) => write!(f, "{}", ns),
        }
    }
}

/// A call site that passes a literal key to a translator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyUsage {
    /// Location of the key literal.
    pub context: SourceContext,
    /// Fully-qualified key (namespace + literal).
    pub key: String,
    pub namespace: Namespace,
}

/// Why a usage could not be resolved to a literal key.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DynamicReason {
    /// `t(key)`, `t(\`a.${b}\`)`, `t(cond ? "a" : "b")`
    NonLiteralKey,
    /// `t()`
    MissingKey,
    /// `useTranslations(ns)`
    NonLiteralNamespace,
}

impl fmt::Display for DynamicReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DynamicReason::NonLiteralKey => write!(f, "non-literal key"),
            DynamicReason::MissingKey => write!(f, "missing key argument"),
            DynamicReason::NonLiteralNamespace => write!(f, "non-literal namespace"),
        }
    }
}

/// A translator usage whose key cannot be proven static.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DynamicUsage {
    /// Location of the offending expression (or of the call when the key is absent).
    pub context: SourceContext,
    /// Namespace of the translator; `None` when the namespace itself is dynamic.
    pub namespace: Option<Namespace>,
    pub reason: DynamicReason,
}

impl fmt::Display for DynamicUsage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.context.location, self.reason)?;
        if let Some(namespace) = &self.namespace {
            write!(f, " (namespace \"{}\")", namespace)?;
        }
        Ok(())
    }
}
