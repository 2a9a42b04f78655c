pub mod check;
mod command_result;
pub mod fix;
pub mod helper;
pub mod lint;

pub use command_result::*;
