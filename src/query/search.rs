//! FT.INFO <index>
//!
//! The reply is a flat sequence of alternating key/value entries describing
//! one search index. Each top-level key becomes a single-value column.
//! Nested sub-groups (index definition, field list, GC stats) are carried
//! through unflattened, as the bracketed rendering of the sequence.

use crate::client::CommandClient;
use crate::error::{DatasourceError, Result};
use crate::query::QueryRequest;
use crate::reply::Reply;
use crate::table::{Cell, Column, Table};

/// Run FT.INFO for the requested index and parse the reply
pub async fn query_ft_info<C: CommandClient>(
    request: &QueryRequest,
    client: &mut C,
) -> Result<Vec<Table>> {
    let key = request.key.as_deref().unwrap_or("");
    let reply = client.run_command(&["FT.INFO", key]).await?;
    let items = reply.into_sequence().ok_or_else(|| {
        DatasourceError::UnexpectedReply("FT.INFO did not return a sequence".to_string())
    })?;
    Ok(vec![search_info_table(&items, key)])
}

/// Parse FT.INFO key/value pairs into one single-value column per key.
///
/// The table is named after the requested index. A trailing key with no
/// paired value, a non-text key, or a repeated key is skipped.
pub fn search_info_table(items: &[Reply], name: &str) -> Table {
    let mut table = Table::new(name);

    for pair in items.chunks(2) {
        let [key, value] = pair else {
            break;
        };
        let Some(key) = key.as_str() else {
            continue;
        };
        if table.has_column(key) {
            continue;
        }

        let cell = match value {
            Reply::Integer(n) => Cell::Integer(*n),
            Reply::Float(f) => Cell::Float(*f),
            Reply::Text(s) => Cell::infer(s),
            Reply::Sequence(_) => Cell::Text(value.to_string()),
        };
        table.add_column(Column::single(key, cell));
    }

    table
}
