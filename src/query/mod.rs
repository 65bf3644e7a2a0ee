//! Query dispatch and per-command parsers
//!
//! A query names one of the known diagnostic commands; [`run_query`] picks
//! the matching parser, which issues exactly one command through the
//! [`CommandClient`] collaborator and converts the raw reply into named
//! tables.

pub mod clients;
pub mod info;
pub mod search;
pub mod slowlog;

use serde::Deserialize;

use crate::client::CommandClient;
use crate::error::{DatasourceError, Result};
use crate::reply::Reply;
use crate::table::Table;

/// One query as shipped by the host, selecting a parser and its inputs
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct QueryRequest {
    /// Command name selecting the parser ("info", "clientList",
    /// "slowlogGet", "ft.info")
    pub command: String,

    /// INFO section name ("", "commandstats", "errorstats", ...)
    #[serde(default)]
    pub section: Option<String>,

    /// Target key (search index name for "ft.info")
    #[serde(default)]
    pub key: Option<String>,

    /// Lay command statistics out as one single-row counter column per
    /// command, for time-series accumulation across repeated polls
    #[serde(default)]
    pub streaming: bool,

    /// Number of most-recent slow log entries to request
    #[serde(default)]
    pub size: Option<i64>,
}

impl QueryRequest {
    /// Create a request for the given command with no further inputs
    pub fn new(command: impl Into<String>) -> Self {
        Self {
            command: command.into(),
            section: None,
            key: None,
            streaming: false,
            size: None,
        }
    }

    /// Set the INFO section name
    pub fn with_section(mut self, section: impl Into<String>) -> Self {
        self.section = Some(section.into());
        self
    }

    /// Set the target key
    pub fn with_key(mut self, key: impl Into<String>) -> Self {
        self.key = Some(key.into());
        self
    }

    /// Enable streaming layout for command statistics
    pub fn with_streaming(mut self, streaming: bool) -> Self {
        self.streaming = streaming;
        self
    }

    /// Limit how many slow log entries are requested
    pub fn with_size(mut self, size: i64) -> Self {
        self.size = Some(size);
        self
    }

    /// Decode a request from the host's JSON query model
    pub fn from_json(input: &str) -> Result<Self> {
        serde_json::from_str(input).map_err(|e| DatasourceError::Request(e.to_string()))
    }
}

/// Run one query: dispatch by command name, execute, parse into tables.
///
/// Returns the collaborator's error untouched when command execution fails;
/// no tables are produced in that case.
pub async fn run_query<C: CommandClient>(
    request: &QueryRequest,
    client: &mut C,
) -> Result<Vec<Table>> {
    match request.command.as_str() {
        "info" => info::query_info(request, client).await,
        "clientList" => clients::query_client_list(request, client).await,
        "slowlogGet" => slowlog::query_slowlog_get(request, client).await,
        "ft.info" => search::query_ft_info(request, client).await,
        other => Err(DatasourceError::UnknownCommand(other.to_string())),
    }
}

/// Require a text reply, naming the command in the error otherwise
pub(crate) fn expect_text(reply: Reply, command: &str) -> Result<String> {
    match reply {
        Reply::Text(s) => Ok(s),
        other => Err(DatasourceError::UnexpectedReply(format!(
            "{command} returned a {} reply, expected text",
            other.kind()
        ))),
    }
}

/// Normalize line endings and split into lines
pub(crate) fn split_lines(text: &str) -> Vec<&str> {
    text.split('\n')
        .map(|line| line.strip_suffix('\r').unwrap_or(line))
        .collect()
}

/// The right-hand side of a `field=value` token, if the token has one
pub(crate) fn pair_value(token: &str) -> Option<&str> {
    token.split_once('=').map(|(_, value)| value)
}
