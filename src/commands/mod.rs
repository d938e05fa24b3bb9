//! Command parsing
//!
//! Handles the command bar system (commands starting with `/` or `:`)

pub mod handlers;
pub mod parser;

pub use parser::{Command, parse_command};
