//! Command execution handlers
//!
//! Executes parsed commands and returns appropriate actions.

use crate::app::{Action, App, StatusLevel};
use crate::commands::Command;

impl App {
    /// Execute a command and return the resulting action
    ///
    /// This is called after a command has been parsed from user input.
    pub fn execute_command(&mut self, command: Command) -> Action {
        match command {
            Command::Refresh => self.refresh(),
            Command::Health => {
                self.set_status("Checking connection...".to_string(), StatusLevel::Info);
                self.check_health()
            }
            Command::Describe => self.describe_selected(),
            Command::Copy => {
                self.copy_qualified_name();
                Action::None
            }
            Command::Help => {
                self.show_help();
                Action::None
            }
            Command::Quit => Action::Quit,
        }
    }
}
