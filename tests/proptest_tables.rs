//! Property-based tests for the reply-to-table parsers
//!
//! Uses proptest to verify the structural invariants the parsers promise
//! for arbitrary, partially malformed diagnostic text: equal-length
//! columns, no panics, and deterministic output.
#![allow(clippy::unwrap_used)]

use proptest::prelude::*;

use ferrite_datasource::query::clients::client_list_table;
use ferrite_datasource::query::info::{command_stats_table, error_stats_table, section_table};

// ============================================================================
// Test Strategies
// ============================================================================

/// Strategy for generating info keys
fn key_strategy() -> impl Strategy<Value = String> {
    "[a-z_]{1,16}"
}

/// Strategy for generating info values (numeric or free text, no newlines)
fn value_strategy() -> impl Strategy<Value = String> {
    prop_oneof![
        "[0-9]{1,6}",
        "[0-9]{1,3}\\.[0-9]{1,3}",
        "[a-zA-Z][a-zA-Z0-9._-]{0,12}",
    ]
}

/// Strategy for lines with no colon at all, which every text parser skips
fn junk_line_strategy() -> impl Strategy<Value = String> {
    "[a-zA-Z0-9 _-]{0,20}"
}

/// Strategy for one client record line of `key=value` tokens
fn client_line_strategy() -> impl Strategy<Value = String> {
    prop::collection::vec(
        (key_strategy(), value_strategy()).prop_map(|(k, v)| format!("{k}={v}")),
        0..6,
    )
    .prop_map(|tokens| tokens.join(" "))
}

// ============================================================================
// General INFO section properties
// ============================================================================

proptest! {
    /// N valid key:value lines with distinct keys produce exactly N
    /// single-row columns, junk lines notwithstanding
    #[test]
    fn prop_section_column_per_distinct_key(
        entries in prop::collection::btree_map(key_strategy(), value_strategy(), 0..20),
        junk in prop::collection::vec(junk_line_strategy(), 0..5),
    ) {
        let mut lines: Vec<String> = entries
            .iter()
            .map(|(k, v)| format!("{k}:{v}"))
            .collect();
        lines.extend(junk.iter().filter(|j| !j.contains(':')).cloned());
        let text = lines.join("\r\n");

        let table = section_table(&text, "info");
        prop_assert_eq!(table.columns().len(), entries.len());
        for column in table.columns() {
            prop_assert_eq!(column.len(), 1);
        }
    }

    /// Parsing the same text twice yields identical tables
    #[test]
    fn prop_section_is_deterministic(text in "[ -~\\r\\n]{0,300}") {
        let first = section_table(&text, "info");
        let second = section_table(&text, "info");
        prop_assert_eq!(first, second);
    }
}

// ============================================================================
// Command/error statistics properties
// ============================================================================

proptest! {
    /// Command stats tables have 4 columns, or 6 once any line carries the
    /// optional counters, and every column has the same length
    #[test]
    fn prop_command_stats_shape(
        commands in prop::collection::btree_set("[a-z]{1,10}", 1..10),
        with_counters in any::<bool>(),
    ) {
        let lines: Vec<String> = commands
            .iter()
            .enumerate()
            .map(|(i, cmd)| {
                // Half the lines carry the optional counters when enabled.
                if with_counters && i % 2 == 0 {
                    format!(
                        "cmdstat_{cmd}:calls={i},usec={i}.5,usec_per_call=0.5,rejected_calls=0,failed_calls=1"
                    )
                } else {
                    format!("cmdstat_{cmd}:calls={i},usec={i}.5,usec_per_call=0.5")
                }
            })
            .collect();
        let table = command_stats_table(&lines.join("\n"), false, "info");

        let expected_columns = if with_counters { 6 } else { 4 };
        prop_assert_eq!(table.columns().len(), expected_columns);
        prop_assert_eq!(table.row_count(), commands.len());
        for column in table.columns() {
            prop_assert_eq!(column.len(), commands.len());
        }
    }

    /// Streaming mode yields one single-row column per command
    #[test]
    fn prop_command_stats_streaming_shape(
        commands in prop::collection::btree_set("[a-z]{1,10}", 1..10),
    ) {
        let lines: Vec<String> = commands
            .iter()
            .map(|cmd| format!("cmdstat_{cmd}:calls=3,usec=9,usec_per_call=3"))
            .collect();
        let table = command_stats_table(&lines.join("\n"), true, "info");

        prop_assert_eq!(table.columns().len(), commands.len());
        for column in table.columns() {
            prop_assert_eq!(column.len(), 1);
        }
    }

    /// Arbitrary text never panics the stats parsers and never breaks the
    /// equal-length invariant
    #[test]
    fn prop_stats_parsers_tolerate_arbitrary_text(text in "[ -~\\r\\n]{0,300}") {
        for table in [
            command_stats_table(&text, false, "info"),
            command_stats_table(&text, true, "info"),
            error_stats_table(&text, "info"),
        ] {
            let rows = table.row_count();
            for column in table.columns() {
                prop_assert_eq!(column.len(), rows);
            }
        }
    }
}

// ============================================================================
// Client list properties
// ============================================================================

proptest! {
    /// Ragged client records keep every column the same length
    #[test]
    fn prop_client_list_columns_equal_length(
        lines in prop::collection::vec(client_line_strategy(), 0..10),
    ) {
        let table = client_list_table(&lines.join("\n"), "clientList");
        let rows = table.row_count();
        for column in table.columns() {
            prop_assert_eq!(column.len(), rows);
        }
    }

    /// Arbitrary text never panics the client list parser
    #[test]
    fn prop_client_list_tolerates_arbitrary_text(text in "[ -~\\r\\n]{0,300}") {
        let table = client_list_table(&text, "clientList");
        let rows = table.row_count();
        for column in table.columns() {
            prop_assert_eq!(column.len(), rows);
        }
    }
}
