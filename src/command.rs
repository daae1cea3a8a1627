//! Command types for the session service protocol.

use crate::error::{StoreError, StoreResult};

/// Types of commands supported by the session server.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Create a new session; the response is its key.
    Create,
    /// Get a session's payload by key.
    Get,
    /// Replace a session's payload.
    Update,
    /// Delete a session.
    Delete,
    /// Ping the server (health check).
    Ping,
    /// Get server statistics.
    Stats,
    /// Invalid or unknown command.
    Invalid,
}

impl Command {
    /// Parse a command from a string (case-insensitive).
    ///
    /// Unknown commands map to `Command::Invalid`.
    pub fn get(s: &str) -> Command {
        match s.to_lowercase().as_str() {
            "create" | "new" => Command::Create,
            "get" => Command::Get,
            "update" | "set" => Command::Update,
            "delete" | "del" => Command::Delete,
            "ping" => Command::Ping,
            "stats" | "info" => Command::Stats,
            _ => Command::Invalid,
        }
    }

    /// Parse a command, returning an error for unknown commands.
    pub fn parse(s: &str) -> StoreResult<Command> {
        let cmd = Self::get(s);
        if cmd == Command::Invalid {
            Err(StoreError::InvalidCommand(s.to_string()))
        } else {
            Ok(cmd)
        }
    }

    /// Get the string representation of this command.
    pub fn as_str(&self) -> &'static str {
        match self {
            Command::Create => "create",
            Command::Get => "get",
            Command::Update => "update",
            Command::Delete => "delete",
            Command::Ping => "ping",
            Command::Stats => "stats",
            Command::Invalid => "invalid",
        }
    }
}

impl std::fmt::Display for Command {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
