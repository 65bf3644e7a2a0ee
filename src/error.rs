//! Error types for the datasource
//!
//! This module defines all error types used throughout the crate.
//! Uses `thiserror` for ergonomic error definitions.

use std::io;
use thiserror::Error;

/// Main error type for datasource operations
#[derive(Error, Debug)]
pub enum DatasourceError {
    /// Underlying I/O error
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// Connection-level error (protocol violation, unexpected close)
    #[error("Connection error: {0}")]
    Connection(String),

    /// The server answered the command with an error reply
    #[error("Command failed: {0}")]
    Command(String),

    /// Authentication was rejected by the server
    #[error("Authentication failed: {0}")]
    Auth(String),

    /// The reply's top-level shape contradicts the command's contract
    #[error("Unexpected reply: {0}")]
    UnexpectedReply(String),

    /// A slow log entry does not match the fixed positional layout
    #[error("Malformed slow log entry: {0}")]
    MalformedEntry(String),

    /// Query named a command this crate has no parser for
    #[error("Unknown query command: {0}")]
    UnknownCommand(String),

    /// Configuration parsing or validation error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Query request could not be decoded from the host's JSON model
    #[error("Invalid query request: {0}")]
    Request(String),
}

/// Result type alias for datasource operations
pub type Result<T> = std::result::Result<T, DatasourceError>;
