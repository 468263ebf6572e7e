use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;

use crate::utils::error::{EtlError, Result};

/// Unprocessed content as returned by a pipeline's extract stage.
/// Handed to transform and dropped afterwards.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum RawPayload {
    Html(String),
    Json(serde_json::Value),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ColumnKind {
    Text,
    Number,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Column {
    pub name: String,
    pub kind: ColumnKind,
}

impl Column {
    pub fn text(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            kind: ColumnKind::Text,
        }
    }

    pub fn number(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            kind: ColumnKind::Number,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Cell {
    Text(String),
    Number(f64),
}

impl Cell {
    fn kind(&self) -> ColumnKind {
        match self {
            Cell::Text(_) => ColumnKind::Text,
            Cell::Number(_) => ColumnKind::Number,
        }
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Cell::Text(s) => f.write_str(s),
            Cell::Number(n) => write!(f, "{}", n),
        }
    }
}

/// The shaped, rectangular record set: declared columns plus ordered rows.
/// `push_row` checks arity and cell kinds, so a constructed table is always
/// rectangular.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Table {
    columns: Vec<Column>,
    rows: Vec<Vec<Cell>>,
}

impl Table {
    pub fn new(columns: Vec<Column>) -> Self {
        Self {
            columns,
            rows: Vec::new(),
        }
    }

    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    pub fn rows(&self) -> &[Vec<Cell>] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c.name == name)
    }

    pub fn push_row(&mut self, row: Vec<Cell>) -> Result<()> {
        if row.len() != self.columns.len() {
            return Err(EtlError::shape(format!(
                "row has {} cells, table declares {} columns",
                row.len(),
                self.columns.len()
            )));
        }
        for (cell, column) in row.iter().zip(&self.columns) {
            if cell.kind() != column.kind {
                return Err(EtlError::shape(format!(
                    "column '{}' expects {:?}, got {:?}",
                    column.name,
                    column.kind,
                    cell.kind()
                )));
            }
        }
        self.rows.push(row);
        Ok(())
    }

    /// Stable descending sort on a numeric column.
    pub fn sort_desc_by(&mut self, column: &str) -> Result<()> {
        let index = self
            .column_index(column)
            .ok_or_else(|| EtlError::shape(format!("no column named '{}'", column)))?;
        if self.columns[index].kind != ColumnKind::Number {
            return Err(EtlError::shape(format!(
                "column '{}' is not numeric, cannot sort by it",
                column
            )));
        }
        self.rows.sort_by(|a, b| {
            let (x, y) = match (&a[index], &b[index]) {
                (Cell::Number(x), Cell::Number(y)) => (*x, *y),
                _ => (0.0, 0.0),
            };
            y.partial_cmp(&x).unwrap_or(Ordering::Equal)
        });
        Ok(())
    }

    /// Keep only the first `n` rows. Row order stays contiguous, so the
    /// implicit index restarts at zero with no gaps.
    pub fn truncate(&mut self, n: usize) {
        self.rows.truncate(n);
    }
}
