//! CLIENT LIST
//!
//! Each line of the reply describes one connection as whitespace-separated
//! `key=value` tokens. The first line carrying such tokens declares the
//! columns; each column's kind comes from an integer-parse attempt on that
//! first value. Client records are not guaranteed to share a key set across
//! server versions, so rows are assembled by key rather than positionally:
//! a missing key yields an explicit Absent cell and an undeclared key is
//! dropped.

use tracing::debug;

use crate::client::CommandClient;
use crate::error::Result;
use crate::query::{expect_text, split_lines, QueryRequest};
use crate::table::{Cell, Column, ColumnKind, Table};

/// Run CLIENT LIST and parse the reply
pub async fn query_client_list<C: CommandClient>(
    request: &QueryRequest,
    client: &mut C,
) -> Result<Vec<Table>> {
    let reply = client.run_command(&["CLIENT", "LIST"]).await?;
    let text = expect_text(reply, "CLIENT LIST")?;
    Ok(vec![client_list_table(&text, &request.command)])
}

/// Parse client records into one row per connection
pub fn client_list_table(text: &str, name: &str) -> Table {
    let mut table = Table::new(name);

    for line in split_lines(text) {
        let tokens = line_tokens(line);
        if tokens.is_empty() {
            continue;
        }

        if table.columns().is_empty() {
            for (key, value) in &tokens {
                if table.has_column(key) {
                    continue;
                }
                let kind = if value.parse::<i64>().is_ok() {
                    ColumnKind::Integer
                } else {
                    ColumnKind::Text
                };
                table.add_column(Column::new(*key, kind));
            }
        }

        for (key, _) in &tokens {
            if !table.has_column(key) {
                debug!(key, "client record field not declared in header, dropped");
            }
        }

        let row: Vec<Cell> = table
            .columns()
            .iter()
            .map(|column| {
                let found = tokens
                    .iter()
                    .find(|(key, _)| *key == column.name())
                    .map(|(_, value)| *value);
                match found {
                    Some(value) if column.kind() == ColumnKind::Integer => value
                        .parse::<i64>()
                        .map(Cell::Integer)
                        .unwrap_or_else(|_| Cell::Text(value.to_string())),
                    Some(value) => Cell::Text(value.to_string()),
                    None => Cell::Absent,
                }
            })
            .collect();
        table.push_row(row);
    }

    table
}

/// Split a record line into `key=value` pairs, skipping tokens without `=`
fn line_tokens(line: &str) -> Vec<(&str, &str)> {
    line.split_whitespace()
        .filter_map(|token| token.split_once('='))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_header_fixes_column_kinds() {
        let text = "id=3 addr=127.0.0.1:0 age=10\nid=4 addr=127.0.0.1:1 age=20";
        let table = client_list_table(text, "clientList");

        assert_eq!(table.columns().len(), 3);
        assert_eq!(table.column("id").unwrap().kind(), ColumnKind::Integer);
        assert_eq!(table.column("addr").unwrap().kind(), ColumnKind::Text);
        assert_eq!(table.column("age").unwrap().kind(), ColumnKind::Integer);
        assert_eq!(table.row_count(), 2);
        assert_eq!(
            table.column("id").unwrap().values(),
            &[Cell::Integer(3), Cell::Integer(4)]
        );
    }

    #[test]
    fn test_unparsable_value_degrades_to_text() {
        let text = "id=3 age=10\nid=4 age=not-a-number";
        let table = client_list_table(text, "clientList");

        assert_eq!(
            table.column("age").unwrap().values(),
            &[Cell::Integer(10), Cell::Text("not-a-number".to_string())]
        );
    }

    #[test]
    fn test_rows_assembled_by_key_not_position() {
        let text = "id=3 addr=127.0.0.1:0 age=10\nage=20 id=4 addr=127.0.0.1:1";
        let table = client_list_table(text, "clientList");

        assert_eq!(
            table.column("age").unwrap().values(),
            &[Cell::Integer(10), Cell::Integer(20)]
        );
        assert_eq!(
            table.column("id").unwrap().values(),
            &[Cell::Integer(3), Cell::Integer(4)]
        );
    }

    #[test]
    fn test_ragged_records_pad_and_drop() {
        // Second record misses "age" and brings an undeclared "cmd".
        let text = "id=3 age=10\nid=4 cmd=get";
        let table = client_list_table(text, "clientList");

        assert_eq!(table.columns().len(), 2);
        assert!(table.columns().iter().all(|c| c.len() == 2));
        assert_eq!(
            table.column("age").unwrap().values(),
            &[Cell::Integer(10), Cell::Absent]
        );
    }

    #[test]
    fn test_blank_and_malformed_lines_skipped() {
        let text = "\nnotakeyvalueline\nid=3 age=10\n\n";
        let table = client_list_table(text, "clientList");
        assert_eq!(table.row_count(), 1);
    }

    #[test]
    fn test_empty_reply_yields_empty_table() {
        let table = client_list_table("", "clientList");
        assert!(table.columns().is_empty());
        assert_eq!(table.row_count(), 0);
    }
}
