//! Core analysis engine.
//!
//! ## Module Structure
//!
//! - `data`: Shared record types (locations, key usages, dynamic usages)
//! - `file_scanner`: Source file discovery
//! - `key_cache`: Defined-key cache for the lint rules
//! - `parsers`: Source (swc) and message document (JSON) parsing
//! - `project`: Parsed source units and module resolution
//! - `reconcile`: Key flattening, missing/unused computation, structural delete
//! - `resolve`: Translation key usage resolver

pub mod data;
pub mod file_scanner;
pub mod key_cache;
pub mod parsers;
pub mod project;
pub mod reconcile;
pub mod resolve;

pub use data::*;
