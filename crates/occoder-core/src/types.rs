//! Domain types shared across the coding pipeline.

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// A single freetext job posting to be coded.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct JobRecord {
    pub title: String,
    pub sector: Option<String>,
    pub description: Option<String>,
}

/// How many codes a match should produce.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum OutputMode {
    /// One best code per record.
    Single,
    /// Up to three codes with confidence scores per record.
    Multi,
}

impl OutputMode {
    pub fn parse(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "single" => Ok(Self::Single),
            "multi" => Ok(Self::Multi),
            other => Err(Error::InvalidConfig(format!(
                "output mode must be 'single' or 'multi', got '{other}'"
            ))),
        }
    }
}

/// One fuzzy-scored candidate. `code` is absent when no usable title
/// matched for that candidate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RankedCode {
    pub code: Option<String>,
    pub score: u8,
}

/// Outcome of coding one record. Owned by the caller; nothing is retained
/// across calls.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum MatchResult {
    /// A single code, from an exact title hit or single-mode selection.
    Code(String),
    /// Ranked candidates, best first (multi mode).
    Ranked(Vec<RankedCode>),
    /// No usable candidate; an empty marker, never an error.
    NoMatch,
}

/// Minimal column-addressed table of strings — the exchange surface between
/// the batch driver and file-format collaborators (CSV readers etc.).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Table {
    columns: Vec<String>,
    rows: Vec<Vec<String>>,
}

impl Table {
    pub fn new(columns: Vec<String>) -> Self {
        Self { columns, rows: Vec::new() }
    }

    pub fn push_row(&mut self, row: Vec<String>) -> Result<()> {
        if row.len() != self.columns.len() {
            return Err(Error::InvalidInput(format!(
                "row has {} values, table has {} columns",
                row.len(),
                self.columns.len()
            )));
        }
        self.rows.push(row);
        Ok(())
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn rows(&self) -> &[Vec<String>] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c == name)
    }

    /// All values of a named column, in row order.
    pub fn column(&self, name: &str) -> Option<Vec<&str>> {
        let idx = self.column_index(name)?;
        Some(self.rows.iter().map(|r| r[idx].as_str()).collect())
    }

    pub fn add_column(&mut self, name: &str, values: Vec<String>) -> Result<()> {
        if values.len() != self.rows.len() {
            return Err(Error::InvalidInput(format!(
                "column '{}' has {} values, table has {} rows",
                name,
                values.len(),
                self.rows.len()
            )));
        }
        self.columns.push(name.to_string());
        for (row, value) in self.rows.iter_mut().zip(values) {
            row.push(value);
        }
        Ok(())
    }

    pub fn drop_column(&mut self, name: &str) -> Result<()> {
        let idx = self
            .column_index(name)
            .ok_or_else(|| Error::ColumnNotFound(name.to_string()))?;
        self.columns.remove(idx);
        for row in &mut self.rows {
            row.remove(idx);
        }
        Ok(())
    }
}
