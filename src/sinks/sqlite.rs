use std::path::PathBuf;

use rusqlite::Connection;

use crate::domain::model::{Cell, ColumnKind, Table};
use crate::utils::error::Result;

/// Writes a record set to one table of a SQLite database. The drop, create
/// and inserts run inside a single transaction, so each write wholesale
/// replaces the previous table contents.
#[derive(Debug, Clone)]
pub struct SqliteSink {
    db_path: PathBuf,
    table: String,
}

impl SqliteSink {
    pub fn new(db_path: impl Into<PathBuf>, table: impl Into<String>) -> Self {
        Self {
            db_path: db_path.into(),
            table: table.into(),
        }
    }

    /// Destination identity as `<db path>::<table>`.
    pub fn identity(&self) -> String {
        format!("{}::{}", self.db_path.display(), self.table)
    }

    pub fn write(&self, table: &Table) -> Result<()> {
        let mut conn = Connection::open(&self.db_path)?;
        let tx = conn.transaction()?;

        tx.execute_batch(&format!(r#"DROP TABLE IF EXISTS "{}""#, self.table))?;

        let columns_sql = table
            .columns()
            .iter()
            .map(|column| {
                let sql_type = match column.kind {
                    ColumnKind::Text => "TEXT NOT NULL",
                    ColumnKind::Number => "REAL NOT NULL",
                };
                format!(r#""{}" {}"#, column.name, sql_type)
            })
            .collect::<Vec<_>>()
            .join(", ");
        tx.execute_batch(&format!(
            r#"CREATE TABLE "{}" ({})"#,
            self.table, columns_sql
        ))?;

        let placeholders = (1..=table.columns().len())
            .map(|i| format!("?{}", i))
            .collect::<Vec<_>>()
            .join(", ");
        let insert_sql = format!(r#"INSERT INTO "{}" VALUES ({})"#, self.table, placeholders);
        {
            let mut stmt = tx.prepare(&insert_sql)?;
            for row in table.rows() {
                stmt.execute(rusqlite::params_from_iter(row.iter().map(
                    |cell| match cell {
                        Cell::Text(s) => rusqlite::types::Value::Text(s.clone()),
                        Cell::Number(n) => rusqlite::types::Value::Real(*n),
                    },
                )))?;
            }
        }

        tx.commit()?;
        Ok(())
    }
}
