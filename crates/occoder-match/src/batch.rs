//! Row-wise application of a [`Coder`] over a [`Table`].

use std::sync::atomic::{AtomicBool, Ordering};

use rayon::prelude::*;
use tracing::warn;

use occoder_core::error::{Error, Result};
use occoder_core::types::{JobRecord, MatchResult, OutputMode, Table};

use crate::coder::Coder;

/// Column bindings for one batch job, resolved against the table schema
/// before any row is processed.
#[derive(Debug, Clone, Copy)]
pub struct RecordAccessor {
    title: usize,
    sector: Option<usize>,
    description: Option<usize>,
}

impl RecordAccessor {
    pub fn resolve(
        table: &Table,
        title_column: &str,
        sector_column: Option<&str>,
        description_column: Option<&str>,
    ) -> Result<Self> {
        let lookup = |name: &str| {
            table
                .column_index(name)
                .ok_or_else(|| Error::ColumnNotFound(name.to_string()))
        };
        Ok(Self {
            title: lookup(title_column)?,
            sector: sector_column.map(lookup).transpose()?,
            description: description_column.map(lookup).transpose()?,
        })
    }

    /// Pull one row into a [`JobRecord`]. Blank sector/description cells
    /// become absent fields, not empty strings.
    pub fn record(&self, row: &[String]) -> JobRecord {
        let optional = |idx: Option<usize>| {
            idx.map(|i| row[i].clone()).filter(|v| !v.trim().is_empty())
        };
        JobRecord {
            title: row[self.title].clone(),
            sector: optional(self.sector),
            description: optional(self.description),
        }
    }
}

/// Settings for one batch job.
#[derive(Debug, Clone, Copy)]
pub struct BatchOptions<'a> {
    pub title_column: &'a str,
    pub sector_column: Option<&'a str>,
    pub description_column: Option<&'a str>,
    /// Spread rows across a rayon pool; falls back to sequential execution
    /// if the pool cannot be started. Output is identical either way.
    pub parallel: bool,
}

impl Default for BatchOptions<'static> {
    fn default() -> Self {
        Self {
            title_column: "job_title",
            sector_column: None,
            description_column: None,
            parallel: false,
        }
    }
}

/// Code every row of `table`, appending result columns in place.
///
/// Single mode (and multi mode when no row produced a ranked result) adds
/// one `{SCHEME}_code` column. Multi mode with ranked rows explodes into
/// `prediction 1..3` / `score 1..3` columns, padding with empty strings.
///
/// A raised `cancel` flag stops further matching; rows already coded keep
/// their results, remaining rows stay empty. Row order always matches the
/// input.
pub fn code_table(
    coder: &Coder,
    table: &mut Table,
    options: &BatchOptions,
    cancel: Option<&AtomicBool>,
) -> Result<()> {
    let accessor = RecordAccessor::resolve(
        table,
        options.title_column,
        options.sector_column,
        options.description_column,
    )?;
    let records: Vec<JobRecord> = table.rows().iter().map(|r| accessor.record(r)).collect();
    let results = map_records(coder, &records, options.parallel, cancel);

    let exploded = coder.output() == OutputMode::Multi
        && results
            .iter()
            .any(|r| matches!(r, Some(MatchResult::Ranked(_))));
    if exploded {
        add_prediction_columns(table, &results)?;
    } else {
        let column = format!("{}_code", coder.scheme().to_uppercase());
        let values = results
            .iter()
            .map(|r| match r {
                Some(MatchResult::Code(code)) => code.clone(),
                _ => String::new(),
            })
            .collect();
        table.add_column(&column, values)?;
    }
    Ok(())
}

fn map_records(
    coder: &Coder,
    records: &[JobRecord],
    parallel: bool,
    cancel: Option<&AtomicBool>,
) -> Vec<Option<MatchResult>> {
    let run = |record: &JobRecord| -> Option<MatchResult> {
        if cancel.is_some_and(|c| c.load(Ordering::Relaxed)) {
            return None;
        }
        Some(coder.code_record(record))
    };
    if parallel {
        match rayon::ThreadPoolBuilder::new().build() {
            Ok(pool) => pool.install(|| records.par_iter().map(run).collect()),
            Err(e) => {
                warn!(error = %e, "parallel pool unavailable, running sequentially");
                records.iter().map(run).collect()
            }
        }
    } else {
        records.iter().map(run).collect()
    }
}

/// Fixed-width `prediction k` / `score k` columns, k = 1..=3. Rows that hit
/// an exact match carry their code in `prediction 1` with an empty score.
fn add_prediction_columns(table: &mut Table, results: &[Option<MatchResult>]) -> Result<()> {
    for k in 0..3 {
        let predictions = results
            .iter()
            .map(|r| match r {
                Some(MatchResult::Code(code)) if k == 0 => code.clone(),
                Some(MatchResult::Ranked(ranked)) => ranked
                    .get(k)
                    .and_then(|rc| rc.code.clone())
                    .unwrap_or_default(),
                _ => String::new(),
            })
            .collect();
        table.add_column(&format!("prediction {}", k + 1), predictions)?;
    }
    for k in 0..3 {
        let scores = results
            .iter()
            .map(|r| match r {
                Some(MatchResult::Ranked(ranked)) => ranked
                    .get(k)
                    .map(|rc| rc.score.to_string())
                    .unwrap_or_default(),
                _ => String::new(),
            })
            .collect();
        table.add_column(&format!("score {}", k + 1), scores)?;
    }
    Ok(())
}
