//! The command table.
//!
//! Commands form a closed set ([`CommandKind`]); the table only carries the
//! names an operator may type and the text `help` prints.

use crate::error::{Flow, MonitorError};
use core::fmt;

/// Every command the monitor knows.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum CommandKind {
    Help,
    KernInfo,
    Backtrace,
    ShowMappings,
}

/// One row of the command table.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct Command {
    pub name: &'static str,
    pub short_name: &'static str,
    pub description: &'static str,
    pub kind: CommandKind,
}

impl Command {
    /// Exact, case-sensitive match against either name.
    #[must_use]
    pub fn matches(&self, token: &str) -> bool {
        token == self.name || token == self.short_name
    }
}

/// All commands, in the order `help` lists them.
pub static COMMANDS: [Command; 4] = [
    Command {
        name: "help",
        short_name: "h",
        description: "Display this list of commands",
        kind: CommandKind::Help,
    },
    Command {
        name: "kerninfo",
        short_name: "ki",
        description: "Display information about the kernel",
        kind: CommandKind::KernInfo,
    },
    Command {
        name: "backtrace",
        short_name: "bt",
        description: "show the kernel stack backtrace",
        kind: CommandKind::Backtrace,
    },
    Command {
        name: "showmappings",
        short_name: "sm",
        description: "show mapping of the physical address range",
        kind: CommandKind::ShowMappings,
    },
];

/// First command matching `token`.
#[must_use]
pub fn find(token: &str) -> Option<&'static Command> {
    COMMANDS.iter().find(|c| c.matches(token))
}

/// `help`: one `name - description` line per command.
///
/// # Errors
/// Propagates console write failures.
pub fn help<W: fmt::Write + ?Sized>(out: &mut W) -> Result<Flow, MonitorError<'static>> {
    for cmd in &COMMANDS {
        writeln!(out, "{} - {}", cmd.name, cmd.description)?;
    }
    Ok(Flow::Continue)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn both_names_resolve_to_the_same_command() {
        for cmd in &COMMANDS {
            assert_eq!(find(cmd.name).map(|c| c.kind), Some(cmd.kind));
            assert_eq!(find(cmd.short_name).map(|c| c.kind), Some(cmd.kind));
        }
    }

    #[test]
    fn matching_is_exact() {
        assert!(find("Help").is_none());
        assert!(find("hel").is_none());
        assert!(find("sm ").is_none());
    }
}
