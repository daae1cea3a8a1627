//! Command-line interface definitions for the session client.

use clap::{Parser, Subcommand};

/// Session store client.
///
/// A CLI tool for interacting with the session server.
#[derive(Parser, Debug)]
#[command(name = "session-client")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// The command to execute.
    #[clap(subcommand)]
    pub command: ClientCommand,
}

/// Available client commands.
#[derive(Subcommand, Debug)]
pub enum ClientCommand {
    /// Create a new session.
    ///
    /// Prints the key of the freshly created session.
    Create,

    /// Get a session's payload by key.
    ///
    /// Prints the payload as JSON, or reports that the session is gone.
    Get {
        /// The session key to look up.
        key: String,
    },

    /// Replace a session's payload with a single field.
    ///
    /// Also resets the session's idle clock.
    Update {
        /// The session key.
        key: String,
        /// The field name to store.
        field: String,
        /// The field value.
        value: String,
    },

    /// Delete a session.
    Delete {
        /// The session key to delete.
        key: String,
    },

    /// Ping the server.
    Ping,

    /// Get server statistics.
    Stats,
}
