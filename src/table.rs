//! Tabular result model
//!
//! This module defines the Table/Column/Cell types the parsers accumulate
//! into: named tables of ordered, typed, equal-length columns. Rows are
//! implicit; the Nth value across all columns forms row N.
//!
//! A column's kind is fixed by its first value. Later values that do not fit
//! the fixed kind are stored through a text fallback so that no row is ever
//! dropped. Columns introduced after rows already exist are backfilled with
//! explicit [`Cell::Absent`] sentinels, keeping every column the same length
//! at all times.

use chrono::{DateTime, SecondsFormat, Utc};

/// Value kind fixed for a column by its first value
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnKind {
    /// Free-form text
    Text,
    /// 64-bit integer
    Integer,
    /// Double-precision float
    Float,
    /// UTC timestamp
    Timestamp,
}

/// A single typed value within a column
#[derive(Debug, Clone, PartialEq)]
pub enum Cell {
    /// Text value, also the fallback representation for mismatched values
    Text(String),
    /// Integer value
    Integer(i64),
    /// Float value
    Float(f64),
    /// UTC timestamp value
    Timestamp(DateTime<Utc>),
    /// Explicit absent sentinel for rows a column does not cover
    Absent,
}

impl Cell {
    /// Fix a kind from raw text: integer parse, then float parse, then text.
    ///
    /// The float path accepts the special spellings servers emit in
    /// statistics output ("inf", "-nan").
    pub fn infer(raw: &str) -> Cell {
        if let Ok(n) = raw.parse::<i64>() {
            return Cell::Integer(n);
        }
        if let Ok(f) = raw.parse::<f64>() {
            return Cell::Float(f);
        }
        Cell::Text(raw.to_string())
    }

    /// The column kind this cell naturally belongs to, None for Absent
    pub fn kind(&self) -> Option<ColumnKind> {
        match self {
            Cell::Text(_) => Some(ColumnKind::Text),
            Cell::Integer(_) => Some(ColumnKind::Integer),
            Cell::Float(_) => Some(ColumnKind::Float),
            Cell::Timestamp(_) => Some(ColumnKind::Timestamp),
            Cell::Absent => None,
        }
    }

    /// Text rendering, used for the fallback coercion and for display
    pub fn render(&self) -> String {
        match self {
            Cell::Text(s) => s.clone(),
            Cell::Integer(n) => n.to_string(),
            Cell::Float(f) => f.to_string(),
            Cell::Timestamp(t) => t.to_rfc3339_opts(SecondsFormat::Secs, true),
            Cell::Absent => String::new(),
        }
    }
}

/// A named, typed column of values
#[derive(Debug, Clone, PartialEq)]
pub struct Column {
    name: String,
    kind: ColumnKind,
    unit: Option<String>,
    values: Vec<Cell>,
}

impl Column {
    /// Create an empty column of the given kind
    pub fn new(name: impl Into<String>, kind: ColumnKind) -> Self {
        Self {
            name: name.into(),
            kind,
            unit: None,
            values: Vec::new(),
        }
    }

    /// Create a column holding exactly one value, kind fixed by that value.
    /// An Absent sample fixes a Text column.
    pub fn single(name: impl Into<String>, cell: Cell) -> Self {
        let kind = cell.kind().unwrap_or(ColumnKind::Text);
        Self {
            name: name.into(),
            kind,
            unit: None,
            values: vec![cell],
        }
    }

    /// Attach a display-unit annotation (e.g. "µs")
    pub fn with_unit(mut self, unit: impl Into<String>) -> Self {
        self.unit = Some(unit.into());
        self
    }

    /// Column name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Fixed value kind
    pub fn kind(&self) -> ColumnKind {
        self.kind
    }

    /// Display-unit annotation, if any
    pub fn unit(&self) -> Option<&str> {
        self.unit.as_deref()
    }

    /// Number of values (rows) in this column
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Whether this column holds no values yet
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// All values in row order
    pub fn values(&self) -> &[Cell] {
        &self.values
    }

    /// Value at the given row, if present
    pub fn get(&self, row: usize) -> Option<&Cell> {
        self.values.get(row)
    }

    /// Append a value, coercing kind mismatches to their text rendering.
    /// Absent passes through untouched.
    fn push(&mut self, cell: Cell) {
        match cell.kind() {
            None => self.values.push(cell),
            Some(kind) if kind == self.kind => self.values.push(cell),
            Some(_) => self.values.push(Cell::Text(cell.render())),
        }
    }
}

/// A named set of typed, equal-length columns holding one query's result
#[derive(Debug, Clone, PartialEq)]
pub struct Table {
    name: String,
    columns: Vec<Column>,
}

impl Table {
    /// Create an empty table
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            columns: Vec::new(),
        }
    }

    /// Table name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// All columns in declared order
    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    /// Number of rows (length of every column)
    pub fn row_count(&self) -> usize {
        self.columns.first().map_or(0, Column::len)
    }

    /// Whether a column with this name has been declared
    pub fn has_column(&self, name: &str) -> bool {
        self.columns.iter().any(|c| c.name == name)
    }

    /// Look up a column by name
    pub fn column(&self, name: &str) -> Option<&Column> {
        self.columns.iter().find(|c| c.name == name)
    }

    /// Declare a column. Must happen before any rows the column should
    /// cover; use [`Table::add_column_backfilled`] once rows exist.
    pub fn add_column(&mut self, column: Column) {
        self.columns.push(column);
    }

    /// Declare a column after rows already exist, padding it with Absent
    /// cells so the equal-length invariant keeps holding.
    pub fn add_column_backfilled(&mut self, mut column: Column) {
        let rows = self.row_count();
        while column.values.len() < rows {
            column.values.push(Cell::Absent);
        }
        self.columns.push(column);
    }

    /// Append one row, one cell per column in declared order.
    ///
    /// Mismatched cells are stored through the text fallback, never dropped.
    /// A short row is padded with Absent and surplus cells are discarded, so
    /// the equal-length invariant survives caller mistakes.
    pub fn push_row(&mut self, cells: Vec<Cell>) {
        let mut cells = cells.into_iter();
        for column in &mut self.columns {
            column.push(cells.next().unwrap_or(Cell::Absent));
        }
    }
}
