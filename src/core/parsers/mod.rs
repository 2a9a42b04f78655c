//! File parsers for source code and message files.
//!
//! This module provides parsers for different file types:
//! - `json`: Locale message documents (load, locate keys, save)
//! - `source`: TS/TSX/JS/JSX source files (uses swc for AST generation)

pub mod json;
pub mod source;
