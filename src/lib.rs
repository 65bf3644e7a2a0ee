//! # Ferrite Datasource
//!
//! Backend engine that turns a Ferrite/Redis server's administrative and
//! diagnostic command replies into named tables of typed columns, ready for
//! charting, filtering, and time-series display in a dashboard host.
//!
//! The server-side output these commands produce is only loosely
//! structured: INFO is free-form `key:value` text with per-section
//! sub-formats, CLIENT LIST is whitespace-delimited `key=value` records
//! whose key sets drift across versions, and SLOWLOG GET is a nested array
//! whose argument position depends on the server edition. The per-command
//! parsers in [`query`] absorb that variance and emit a strict columnar
//! shape without losing information or failing on partial records.
//!
//! ## Module Organization
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`reply`] | Raw reply model: text, integer, float, nested sequence |
//! | [`table`] | Tabular result model: named tables of typed columns |
//! | [`client`] | Command execution seam and the RESP TCP client |
//! | [`query`] | Per-command parsers and query dispatch |
//! | [`config`] | Connection settings (TOML) |
//! | [`error`] | Crate error type |
//!
//! ## Example
//!
//! ```no_run
//! use ferrite_datasource::{run_query, DatasourceConfig, QueryRequest, TcpClient};
//!
//! # async fn example() -> ferrite_datasource::Result<()> {
//! let config = DatasourceConfig::default();
//! let mut client = TcpClient::from_config(&config).await?;
//!
//! let request = QueryRequest::new("info").with_section("commandstats");
//! let tables = run_query(&request, &mut client).await?;
//! for table in &tables {
//!     println!("{}: {} rows", table.name(), table.row_count());
//! }
//! # Ok(())
//! # }
//! ```

pub mod client;
pub mod config;
pub mod error;
pub mod query;
pub mod reply;
pub mod table;

pub use client::{CommandClient, TcpClient};
pub use config::DatasourceConfig;
pub use error::{DatasourceError, Result};
pub use query::{run_query, QueryRequest};
pub use reply::Reply;
pub use table::{Cell, Column, ColumnKind, Table};
