//! keyscan - translation key usage checker for next-intl
//!
//! keyscan finds every translation key a TypeScript/JavaScript project passes
//! to a translator obtained from `useTranslations` or `getTranslations`, even
//! when the translator is renamed, destructured or forwarded into other
//! functions and components. The result is compared with the source locale
//! document to report missing and unused keys, and fix mode removes unused
//! keys from every locale.
//!
//! ## Module Structure
//!
//! - `cli`: Command-line interface layer (modes, reporting, exit codes)
//! - `config`: Configuration file loading and parsing
//! - `core`: Core analysis engine (parsing, resolution, reconciliation)
//! - `issues`: Issue type definitions and reporting
//! - `logging`: Diagnostic logging setup
//! - `rules`: Per-file lint rules

pub mod cli;
pub mod config;
pub mod core;
pub mod issues;
pub mod logging;
pub mod rules;
