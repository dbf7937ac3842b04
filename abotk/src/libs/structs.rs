use std::path::PathBuf;

use color_eyre::Result;
use serde::{Deserialize, Serialize};

/// One surviving row of the deobfuscation workbook: the sequencing
/// accession and the first token of the grid number.
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MappingRecord {
    pub sample_id: String,
    pub grid_number: String,
}

/// A delimited table kept verbatim: ordered header plus string rows.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Table {
    pub header: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl Table {
    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.header.iter().position(|h| h == name)
    }

    /// Append a column, one value per row.
    pub fn push_column(&mut self, name: &str, values: Vec<String>) {
        assert_eq!(values.len(), self.rows.len());
        self.header.push(name.to_string());
        for (row, value) in self.rows.iter_mut().zip(values) {
            row.push(value);
        }
    }

    /// Move the named column to the front, all other columns keep their
    /// relative order. No-op if the column does not exist.
    pub fn move_column_first(&mut self, name: &str) {
        if let Some(idx) = self.column_index(name) {
            let column = self.header.remove(idx);
            self.header.insert(0, column);
            for row in &mut self.rows {
                let value = row.remove(idx);
                row.insert(0, value);
            }
        }
    }

    /// No-op if the column does not exist.
    pub fn rename_column(&mut self, from: &str, to: &str) {
        if let Some(idx) = self.column_index(from) {
            self.header[idx] = to.to_string();
        }
    }

    /// A copy of the table without the named column.
    pub fn without_column(&self, name: &str) -> Table {
        match self.column_index(name) {
            Some(idx) => {
                let header = self
                    .header
                    .iter()
                    .enumerate()
                    .filter(|(i, _)| *i != idx)
                    .map(|(_, h)| h.clone())
                    .collect();
                let rows = self
                    .rows
                    .iter()
                    .map(|row| {
                        row.iter()
                            .enumerate()
                            .filter(|(i, _)| *i != idx)
                            .map(|(_, v)| v.clone())
                            .collect()
                    })
                    .collect();
                Table { header, rows }
            }
            None => self.clone(),
        }
    }

    pub fn column(&self, name: &str) -> Option<Vec<&str>> {
        let idx = self.column_index(name)?;
        Some(self.rows.iter().map(|row| row[idx].as_str()).collect())
    }
}

/// Per-file result of the best-effort output stage.
#[derive(Debug)]
pub struct WriteOutcome {
    pub path: PathBuf,
    pub result: Result<()>,
}

impl WriteOutcome {
    pub fn is_ok(&self) -> bool {
        self.result.is_ok()
    }
}
