//! Core data types shared by the resolver, the reconciler and the rules.
//!
//! ## Module Structure
//!
//! - `message`: Locations inside locale message files (MessageLocation, MessageContext)
//! - `source`: Source code location types (SourceContext, SourceLocation)
//! - `usage`: Resolver output records (Namespace, KeyUsage, DynamicUsage)

pub mod message;
pub mod source;
pub mod usage;

pub use message::{MessageContext, MessageLocation};
pub use source::{SourceContext, SourceLocation};
pub use usage::{DynamicReason, DynamicUsage, KeyUsage, Namespace};
