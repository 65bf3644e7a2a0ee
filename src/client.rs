//! RESP client for connecting to Ferrite/Redis servers
//!
//! Defines the [`CommandClient`] capability the query parsers depend on,
//! plus [`TcpClient`], the concrete RESP implementation over a tokio
//! `TcpStream`. Each query issues exactly one command through this seam, so
//! parsers can be driven by any implementation, including test doubles.

use async_trait::async_trait;
use tokio::io::{AsyncBufReadExt, AsyncReadExt, AsyncWriteExt, BufReader};
use tokio::net::TcpStream;

use crate::config::DatasourceConfig;
use crate::error::{DatasourceError, Result};
use crate::reply::Reply;

/// Capability to execute one diagnostic command and return its raw reply.
///
/// A server error reply surfaces as [`DatasourceError::Command`], never as a
/// [`Reply`] value.
#[async_trait]
pub trait CommandClient: Send {
    /// Execute the command given as argument words and return the raw reply
    async fn run_command(&mut self, args: &[&str]) -> Result<Reply>;
}

/// Client for connecting to Ferrite/Redis servers
pub struct TcpClient {
    reader: BufReader<tokio::net::tcp::OwnedReadHalf>,
    writer: tokio::net::tcp::OwnedWriteHalf,
}

impl TcpClient {
    /// Connect to a Ferrite/Redis server
    pub async fn connect(host: &str, port: u16) -> Result<Self> {
        let stream = TcpStream::connect(format!("{}:{}", host, port)).await?;
        let (read_half, write_half) = stream.into_split();
        let reader = BufReader::new(read_half);

        Ok(Self {
            reader,
            writer: write_half,
        })
    }

    /// Connect, authenticate, and select a database per the configuration,
    /// applying the configured connect timeout to connection establishment.
    pub async fn from_config(config: &DatasourceConfig) -> Result<Self> {
        let connect = Self::connect(&config.host, config.port);
        let mut client = tokio::time::timeout(config.connect_timeout(), connect)
            .await
            .map_err(|_| {
                DatasourceError::Connection(format!(
                    "connect to {}:{} timed out",
                    config.host, config.port
                ))
            })??;

        if let Some(password) = &config.password {
            client
                .authenticate(config.username.as_deref(), password)
                .await?;
        }
        if config.db != 0 {
            client.select(config.db).await?;
        }
        Ok(client)
    }

    /// Authenticate with the server
    pub async fn authenticate(&mut self, user: Option<&str>, password: &str) -> Result<()> {
        let result = if let Some(username) = user {
            self.run_command(&["AUTH", username, password]).await
        } else {
            self.run_command(&["AUTH", password]).await
        };

        match result {
            Ok(_) => Ok(()),
            Err(DatasourceError::Command(msg)) => Err(DatasourceError::Auth(msg)),
            Err(e) => Err(e),
        }
    }

    /// Select a database
    pub async fn select(&mut self, db: u8) -> Result<()> {
        self.run_command(&["SELECT", &db.to_string()]).await?;
        Ok(())
    }

    /// Read one reply value from the connection
    async fn read_reply(&mut self) -> Result<Reply> {
        let mut line = String::new();
        self.reader.read_line(&mut line).await?;

        if line.is_empty() {
            return Err(DatasourceError::Connection("connection closed".to_string()));
        }

        let line = line.trim_end_matches("\r\n").trim_end_matches('\n');

        match line.chars().next() {
            Some('+') => Ok(Reply::text(&line[1..])),
            Some('-') => Err(DatasourceError::Command(line[1..].to_string())),
            Some(':') => {
                let n: i64 = line[1..].parse().map_err(|_| {
                    DatasourceError::Connection(format!("invalid integer reply: {line}"))
                })?;
                Ok(Reply::Integer(n))
            }
            Some(',') => {
                let f: f64 = line[1..].parse().map_err(|_| {
                    DatasourceError::Connection(format!("invalid double reply: {line}"))
                })?;
                Ok(Reply::Float(f))
            }
            Some('$') => {
                let len: i64 = line[1..].parse().map_err(|_| {
                    DatasourceError::Connection(format!("invalid bulk length: {line}"))
                })?;

                // Null bulk folds into empty text; the Reply model has no null.
                if len < 0 {
                    return Ok(Reply::text(""));
                }

                let len = len as usize;
                let mut buf = vec![0u8; len + 2]; // +2 for \r\n
                self.reader.read_exact(&mut buf).await?;
                buf.truncate(len);
                Ok(Reply::Text(String::from_utf8_lossy(&buf).into_owned()))
            }
            Some('*') => {
                let count: i64 = line[1..].parse().map_err(|_| {
                    DatasourceError::Connection(format!("invalid array length: {line}"))
                })?;

                if count < 0 {
                    return Ok(Reply::sequence(Vec::new()));
                }

                let mut items = Vec::with_capacity(count as usize);
                for _ in 0..count {
                    items.push(Box::pin(self.read_reply()).await?);
                }
                Ok(Reply::Sequence(items))
            }
            Some('_') => Ok(Reply::text("")),
            _ => Err(DatasourceError::Connection(format!(
                "unknown reply type: {line}"
            ))),
        }
    }
}

#[async_trait]
impl CommandClient for TcpClient {
    async fn run_command(&mut self, args: &[&str]) -> Result<Reply> {
        // Encode command as RESP array
        let mut cmd = format!("*{}\r\n", args.len());
        for arg in args {
            cmd.push_str(&format!("${}\r\n{}\r\n", arg.len(), arg));
        }

        self.writer.write_all(cmd.as_bytes()).await?;
        self.writer.flush().await?;

        self.read_reply().await
    }
}
