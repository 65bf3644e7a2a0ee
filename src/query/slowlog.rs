//! SLOWLOG GET [count]
//!
//! The reply is a sequence with one nested entry per logged slow command:
//! id, epoch-seconds timestamp, and duration in microseconds at positions
//! 0-2, followed by the argument array. OSS servers put the arguments at
//! index 3; Enterprise editions insert an extra field first, pushing the
//! array to index 4. Ferrite itself appends client address and name after
//! the index-3 array, so the rule is positional, not length-based: the
//! arguments live at index 4 only when the entry is long enough AND index 4
//! actually holds a sequence.
//!
//! Entries have a fixed, version-gated shape, so unlike the INFO-family
//! parsers any contract violation fails the whole query.

use chrono::DateTime;
use tracing::debug;

use crate::client::CommandClient;
use crate::error::{DatasourceError, Result};
use crate::query::QueryRequest;
use crate::reply::Reply;
use crate::table::{Cell, Column, ColumnKind, Table};

/// Run SLOWLOG GET and parse the reply
pub async fn query_slowlog_get<C: CommandClient>(
    request: &QueryRequest,
    client: &mut C,
) -> Result<Vec<Table>> {
    let reply = match request.size {
        Some(size) if size > 0 => {
            client
                .run_command(&["SLOWLOG", "GET", &size.to_string()])
                .await?
        }
        _ => client.run_command(&["SLOWLOG", "GET"]).await?,
    };

    let entries = reply.into_sequence().ok_or_else(|| {
        DatasourceError::UnexpectedReply("SLOWLOG GET did not return a sequence".to_string())
    })?;
    Ok(vec![slowlog_table(&entries, &request.command)?])
}

/// Parse slow log entries into rows of [Id, Timestamp, Duration, Command]
pub fn slowlog_table(entries: &[Reply], name: &str) -> Result<Table> {
    let mut table = Table::new(name);
    table.add_column(Column::new("Id", ColumnKind::Integer));
    table.add_column(Column::new("Timestamp", ColumnKind::Timestamp));
    table.add_column(Column::new("Duration", ColumnKind::Integer).with_unit("µs"));
    table.add_column(Column::new("Command", ColumnKind::Text));

    for (index, entry) in entries.iter().enumerate() {
        let fields = entry
            .as_sequence()
            .ok_or_else(|| malformed(index, "not a sequence"))?;
        if fields.len() < 4 {
            return Err(malformed(index, "fewer than 4 elements"));
        }

        let id = fields[0]
            .as_integer()
            .ok_or_else(|| malformed(index, "id is not an integer"))?;
        let seconds = fields[1]
            .as_integer()
            .ok_or_else(|| malformed(index, "timestamp is not an integer"))?;
        let timestamp = DateTime::from_timestamp(seconds, 0)
            .ok_or_else(|| malformed(index, "timestamp out of range"))?;
        let duration = fields[2]
            .as_integer()
            .ok_or_else(|| malformed(index, "duration is not an integer"))?;

        let arguments_at = if fields.len() > 4 && matches!(fields[4], Reply::Sequence(_)) {
            4
        } else {
            3
        };
        let arguments = fields[arguments_at]
            .as_sequence()
            .ok_or_else(|| malformed(index, "arguments are not a sequence"))?;

        let mut command = String::new();
        for argument in arguments {
            let word = match argument {
                Reply::Integer(n) => n.to_string(),
                Reply::Text(s) => s.clone(),
                other => {
                    debug!(kind = other.kind(), "skipping slow log argument");
                    continue;
                }
            };
            if !command.is_empty() {
                command.push(' ');
            }
            command.push_str(&word);
        }

        table.push_row(vec![
            Cell::Integer(id),
            Cell::Timestamp(timestamp),
            Cell::Integer(duration),
            Cell::Text(command),
        ]);
    }

    Ok(table)
}

fn malformed(index: usize, problem: &str) -> DatasourceError {
    DatasourceError::MalformedEntry(format!("entry {index}: {problem}"))
}
