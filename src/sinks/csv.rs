use std::fs;
use std::path::{Path, PathBuf};

use crate::domain::model::Table;
use crate::utils::error::Result;

/// Writes a record set to a comma-separated file: header row of column
/// names, one record per row, no index column. Opening the path truncates
/// any previous contents.
#[derive(Debug, Clone)]
pub struct CsvSink {
    path: PathBuf,
}

impl CsvSink {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn write(&self, table: &Table) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }

        let mut writer = csv::Writer::from_path(&self.path)?;
        writer.write_record(table.columns().iter().map(|c| c.name.as_str()))?;
        for row in table.rows() {
            writer.write_record(row.iter().map(|cell| cell.to_string()))?;
        }
        writer.flush()?;
        Ok(())
    }
}
