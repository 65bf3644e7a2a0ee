//! INFO [section]
//!
//! The server info report is newline-delimited `key:value` text. Most
//! sections become one single-value column per key; the `commandstats` and
//! `errorstats` sections carry their own sub-formats and get dedicated
//! tabular layouts.

use crate::client::CommandClient;
use crate::error::Result;
use crate::query::{expect_text, pair_value, split_lines, QueryRequest};
use crate::table::{Cell, Column, ColumnKind, Table};

/// Run INFO for the requested section and parse the reply
pub async fn query_info<C: CommandClient>(
    request: &QueryRequest,
    client: &mut C,
) -> Result<Vec<Table>> {
    let section = request.section.as_deref().unwrap_or("");
    let reply = if section.is_empty() {
        client.run_command(&["INFO"]).await?
    } else {
        client.run_command(&["INFO", section]).await?
    };
    let text = expect_text(reply, "INFO")?;

    let table = match section {
        "commandstats" => command_stats_table(&text, request.streaming, &request.command),
        "errorstats" => error_stats_table(&text, &request.command),
        _ => section_table(&text, &request.command),
    };
    Ok(vec![table])
}

/// General section layout: one single-value column per `key:value` line.
///
/// A value that parses as a float becomes a Float column, anything else a
/// Text column. Lines without a colon (blank lines, `# Section` headers)
/// are skipped, as are repeated keys.
pub fn section_table(text: &str, name: &str) -> Table {
    let mut table = Table::new(name);

    for line in split_lines(text) {
        let Some((key, value)) = line.split_once(':') else {
            continue;
        };
        if table.has_column(key) {
            continue;
        }

        let cell = match value.parse::<f64>() {
            Ok(v) => Cell::Float(v),
            Err(_) => Cell::Text(value.to_string()),
        };
        table.add_column(Column::single(key, cell));
    }

    table
}

/// Command statistics layout.
///
/// Each line is `cmdstat_<name>:calls=N,usec=F,usec_per_call=F` with two
/// optional trailing groups, `rejected_calls=N,failed_calls=N`, that newer
/// servers emit. The optional columns are introduced exactly once, the
/// first time a five-group line appears, and are backfilled with Absent for
/// the rows before that point.
///
/// In streaming mode the table is pivoted: one single-row integer column
/// per command, holding the call count.
pub fn command_stats_table(text: &str, streaming: bool, name: &str) -> Table {
    let mut table = Table::new(name);

    if !streaming {
        table.add_column(Column::new("Command", ColumnKind::Text));
        table.add_column(Column::new("Calls", ColumnKind::Integer));
        table.add_column(Column::new("Usec", ColumnKind::Float).with_unit("µs"));
        table.add_column(Column::new("Usec_per_call", ColumnKind::Float).with_unit("µs"));
    }

    for line in split_lines(text) {
        let Some((command_field, stats_field)) = line.split_once(':') else {
            continue;
        };

        let stats: Vec<&str> = stats_field.split(',').collect();
        if stats.len() < 3 {
            continue;
        }

        let command = command_field
            .strip_prefix("cmdstat_")
            .unwrap_or(command_field);

        if streaming {
            if table.has_column(command) {
                continue;
            }
            let calls = pair_value(stats[0])
                .and_then(|v| v.parse::<i64>().ok())
                .unwrap_or(0);
            table.add_column(Column::single(command, Cell::Integer(calls)));
            continue;
        }

        if stats.len() >= 5 && !table.has_column("RejectedCalls") {
            table.add_column_backfilled(Column::new("RejectedCalls", ColumnKind::Integer));
            table.add_column_backfilled(Column::new("FailedCalls", ColumnKind::Integer));
        }

        let mut row = vec![
            Cell::Text(command.to_string()),
            integer_cell(stats[0]),
            float_cell(stats[1]),
            float_cell(stats[2]),
        ];
        if table.has_column("RejectedCalls") {
            if stats.len() >= 5 {
                row.push(integer_cell(stats[3]));
                row.push(integer_cell(stats[4]));
            } else {
                row.push(Cell::Absent);
                row.push(Cell::Absent);
            }
        }
        table.push_row(row);
    }

    table
}

/// Error statistics layout: `errorstat_<CODE>:calls=N` lines become rows of
/// [Error(text), Count(int)].
pub fn error_stats_table(text: &str, name: &str) -> Table {
    let mut table = Table::new(name);
    table.add_column(Column::new("Error", ColumnKind::Text));
    table.add_column(Column::new("Count", ColumnKind::Integer));

    for line in split_lines(text) {
        let Some((code_field, value)) = line.split_once(':') else {
            continue;
        };

        let code = code_field.strip_prefix("errorstat_").unwrap_or(code_field);
        table.push_row(vec![Cell::Text(code.to_string()), integer_cell(value)]);
    }

    table
}

/// Integer from a `field=value` group; raw text when the number does not
/// parse, Absent when the group has no `=` at all.
fn integer_cell(group: &str) -> Cell {
    match pair_value(group) {
        Some(value) => value
            .parse::<i64>()
            .map(Cell::Integer)
            .unwrap_or_else(|_| Cell::Text(value.to_string())),
        None => Cell::Absent,
    }
}

/// Float from a `field=value` group, with the same fallbacks as
/// [`integer_cell`]
fn float_cell(group: &str) -> Cell {
    match pair_value(group) {
        Some(value) => value
            .parse::<f64>()
            .map(Cell::Float)
            .unwrap_or_else(|_| Cell::Text(value.to_string())),
        None => Cell::Absent,
    }
}
