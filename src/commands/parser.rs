//! Command parsing
//!
//! Parses user input from the command bar into structured Command enums.
//! Commands use `/` prefix (e.g., `/help`, `/quit`).

use crate::error::{CommandError, CommandResult};

/// Commands that can be executed from the command bar
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Reload the catalog list and clear the selection
    Refresh,

    /// Run the health check again
    Health,

    /// Load column details for the selected table
    Describe,

    /// Copy the qualified name of the selection
    Copy,

    /// Show help
    Help,

    /// Quit the application
    Quit,
}

/// Parse a command string into a Command enum
pub fn parse_command(input: &str) -> CommandResult<Command> {
    let input = input.trim();
    let input = input
        .strip_prefix('/')
        .or_else(|| input.strip_prefix(':'))
        .unwrap_or(input);
    let parts: Vec<&str> = input.split_whitespace().collect();

    if parts.is_empty() {
        return Err(CommandError::Unknown(String::new()));
    }

    let command = match parts[0] {
        "refresh" | "r" => Command::Refresh,
        "health" | "status" => Command::Health,
        "describe" | "d" => Command::Describe,
        "copy" | "y" => Command::Copy,
        "help" | "h" | "?" => Command::Help,
        "quit" | "q" | "exit" => Command::Quit,
        unknown => return Err(CommandError::Unknown(unknown.to_string())),
    };

    if let Some(extra) = parts.get(1) {
        return Err(CommandError::UnexpectedArgument(extra.to_string()));
    }
    Ok(command)
}
