//! ferrite-probe — one-shot diagnostic queries against a running server
//!
//! Connects to a Ferrite/Redis instance, runs a single diagnostic query
//! (server info, client list, slow log, search index info), and renders the
//! resulting tables. Useful for eyeballing exactly what a dashboard panel
//! would receive.

#![allow(clippy::print_stdout, clippy::print_stderr)]

use std::process::ExitCode;

use clap::{Parser, Subcommand};
use colored::Colorize;

use ferrite_datasource::{
    run_query, Cell, DatasourceConfig, QueryRequest, Result, Table, TcpClient,
};

/// ferrite-probe — one-shot diagnostic query CLI for Ferrite
#[derive(Parser, Debug)]
#[command(name = "ferrite-probe")]
#[command(author, version, about = "Run one diagnostic query against a running Ferrite instance")]
struct Args {
    /// Server host (ignored when --config is given)
    #[arg(long, default_value = "127.0.0.1")]
    host: String,

    /// Server port (ignored when --config is given)
    #[arg(long, default_value = "6379")]
    port: u16,

    /// ACL username for AUTH
    #[arg(long)]
    user: Option<String>,

    /// Password for AUTH
    #[arg(long)]
    password: Option<String>,

    /// Database index to SELECT
    #[arg(long, default_value = "0")]
    db: u8,

    /// Load connection settings from a TOML file instead of flags
    #[arg(long)]
    config: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Server info report, one column per key
    Info {
        /// Section to request (e.g. memory, commandstats, errorstats)
        section: Option<String>,

        /// Pivot command statistics into one counter column per command
        #[arg(long)]
        streaming: bool,
    },
    /// Connected client records
    Clients,
    /// Slow command log
    Slowlog {
        /// Number of most-recent entries to request
        #[arg(short = 'n', long)]
        count: Option<i64>,
    },
    /// Search index info
    SearchInfo {
        /// Index name
        index: String,
    },
}

impl Args {
    fn config(&self) -> Result<DatasourceConfig> {
        if let Some(path) = &self.config {
            return DatasourceConfig::from_file(path);
        }
        let config = DatasourceConfig {
            host: self.host.clone(),
            port: self.port,
            username: self.user.clone(),
            password: self.password.clone(),
            db: self.db,
            ..DatasourceConfig::default()
        };
        config.validate()?;
        Ok(config)
    }

    fn request(&self) -> QueryRequest {
        match &self.command {
            Command::Info { section, streaming } => {
                let mut request = QueryRequest::new("info").with_streaming(*streaming);
                if let Some(section) = section {
                    request = request.with_section(section.clone());
                }
                request
            }
            Command::Clients => QueryRequest::new("clientList"),
            Command::Slowlog { count } => {
                let mut request = QueryRequest::new("slowlogGet");
                if let Some(count) = count {
                    request = request.with_size(*count);
                }
                request
            }
            Command::SearchInfo { index } => QueryRequest::new("ft.info").with_key(index.clone()),
        }
    }
}

async fn run(args: &Args) -> Result<()> {
    let config = args.config()?;
    let mut client = TcpClient::from_config(&config).await?;

    let request = args.request();
    let tables = run_query(&request, &mut client).await?;

    for table in &tables {
        print_table(table);
    }
    Ok(())
}

/// Render one table with aligned columns, Absent cells shown as "-"
fn print_table(table: &Table) {
    let headers: Vec<String> = table
        .columns()
        .iter()
        .map(|column| match column.unit() {
            Some(unit) => format!("{} ({unit})", column.name()),
            None => column.name().to_string(),
        })
        .collect();

    let mut widths: Vec<usize> = headers.iter().map(String::len).collect();
    let rows: Vec<Vec<String>> = (0..table.row_count())
        .map(|row| {
            table
                .columns()
                .iter()
                .enumerate()
                .map(|(i, column)| {
                    let rendered = match column.get(row) {
                        Some(Cell::Absent) | None => "-".to_string(),
                        Some(cell) => cell.render(),
                    };
                    widths[i] = widths[i].max(rendered.len());
                    rendered
                })
                .collect()
        })
        .collect();

    println!("{}", table.name().bold());
    let header_line: Vec<String> = headers
        .iter()
        .zip(widths.iter().copied())
        .map(|(header, width)| format!("{header:<width$}"))
        .collect();
    println!("{}", header_line.join("  ").bold());

    for row in rows {
        let line: Vec<String> = row
            .iter()
            .zip(widths.iter().copied())
            .map(|(cell, width)| format!("{cell:<width$}"))
            .collect();
        println!("{}", line.join("  "));
    }
    println!();
}

#[tokio::main]
async fn main() -> ExitCode {
    tracing_subscriber::fmt::init();

    let args = Args::parse();
    match run(&args).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{}: {}", "Error".red(), e);
            ExitCode::FAILURE
        }
    }
}
