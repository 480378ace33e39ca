//! Batch compilation
//!
//! Every sheet is compiled by its own blocking worker. Workers share only the
//! read-only [`SheetCompiler`]; the run waits for all of them before building
//! the report, so a failing sheet never stops its siblings.

use crate::compiler::SheetCompiler;
use serde::Serialize;
use sheet2lua_core::prelude::*;
use std::sync::Arc;
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

/// Rows of one sheet plus the labels used in its output
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SheetInput {
    /// Sheet name
    pub name: String,
    /// Source label written into the preamble
    pub source_label: String,
    /// Text cells, header rows included
    pub rows: Vec<RawRow>,
}

impl SheetInput {
    /// Create a new sheet input
    pub fn new(name: impl Into<String>, source_label: impl Into<String>, rows: Vec<RawRow>) -> Self {
        Self {
            name: name.into(),
            source_label: source_label.into(),
            rows,
        }
    }
}

/// What happened to one sheet
#[derive(Debug)]
pub enum SheetOutcome {
    /// Sheet compiled
    Compiled(OutputRecord),
    /// Sheet too short to hold a header; diagnostic only
    Skipped(Sheet2LuaError),
    /// Sheet had a structural or cell error
    Failed(Sheet2LuaError),
}

/// Outcome for a named sheet
#[derive(Debug)]
pub struct SheetReport {
    /// Sheet name
    pub sheet: String,
    /// Result of compiling it
    pub outcome: SheetOutcome,
}

impl SheetReport {
    /// Serializable summary line
    #[must_use]
    pub fn summary(&self) -> SheetSummary {
        let (status, error) = match &self.outcome {
            SheetOutcome::Compiled(_) => ("compiled", None),
            SheetOutcome::Skipped(err) => ("skipped", Some(err)),
            SheetOutcome::Failed(err) => ("failed", Some(err)),
        };
        SheetSummary {
            sheet: self.sheet.clone(),
            status,
            error_kind: error.map(Sheet2LuaError::kind),
            row: error.and_then(Sheet2LuaError::row),
            message: error.map(ToString::to_string),
        }
    }
}

/// Flat, serializable view of a [`SheetReport`]
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SheetSummary {
    /// Sheet name
    pub sheet: String,
    /// `compiled`, `skipped` or `failed`
    pub status: &'static str,
    /// Root error variant
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error_kind: Option<&'static str>,
    /// Spreadsheet row of the error
    #[serde(skip_serializing_if = "Option::is_none")]
    pub row: Option<usize>,
    /// Error message
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

/// Per-sheet results of one run, in input order
#[derive(Debug, Default)]
pub struct RunReport {
    /// One report per input sheet
    pub sheets: Vec<SheetReport>,
}

impl RunReport {
    /// Records of the sheets that compiled
    pub fn records(&self) -> impl Iterator<Item = &OutputRecord> {
        self.sheets.iter().filter_map(|report| match &report.outcome {
            SheetOutcome::Compiled(record) => Some(record),
            _ => None,
        })
    }

    /// Number of compiled sheets
    #[must_use]
    pub fn compiled(&self) -> usize {
        self.count(|outcome| matches!(outcome, SheetOutcome::Compiled(_)))
    }

    /// Number of skipped sheets
    #[must_use]
    pub fn skipped(&self) -> usize {
        self.count(|outcome| matches!(outcome, SheetOutcome::Skipped(_)))
    }

    /// Number of failed sheets
    #[must_use]
    pub fn failed(&self) -> usize {
        self.count(|outcome| matches!(outcome, SheetOutcome::Failed(_)))
    }

    /// Whether any sheet failed
    #[must_use]
    pub fn has_failures(&self) -> bool {
        self.failed() > 0
    }

    /// Report for a sheet by name
    #[must_use]
    pub fn get(&self, sheet: &str) -> Option<&SheetReport> {
        self.sheets.iter().find(|report| report.sheet == sheet)
    }

    /// Serializable summaries in input order
    #[must_use]
    pub fn summaries(&self) -> Vec<SheetSummary> {
        self.sheets.iter().map(SheetReport::summary).collect()
    }

    fn count(&self, predicate: impl Fn(&SheetOutcome) -> bool) -> usize {
        self.sheets
            .iter()
            .filter(|report| predicate(&report.outcome))
            .count()
    }
}

/// Compile every sheet on its own worker and wait for all of them
pub async fn compile_all(
    compiler: Arc<SheetCompiler>,
    sheets: Vec<SheetInput>,
    filter: AudienceFilter,
) -> RunReport {
    info!("Compiling {} sheets for {} build", sheets.len(), filter);

    let handles: Vec<(String, JoinHandle<Result<OutputRecord>>)> = sheets
        .into_iter()
        .map(|sheet| {
            let compiler = Arc::clone(&compiler);
            let name = sheet.name.clone();
            let handle = tokio::task::spawn_blocking(move || {
                compiler.compile_sheet(&sheet.name, &sheet.source_label, &sheet.rows, filter)
            });
            (name, handle)
        })
        .collect();

    let mut report = RunReport::default();
    for (sheet, handle) in handles {
        let outcome = match handle.await {
            Ok(Ok(record)) => {
                debug!("Compiled sheet '{}' ({} bytes)", sheet, record.body.len());
                SheetOutcome::Compiled(record)
            }
            Ok(Err(err @ Sheet2LuaError::InvalidHeader { .. })) => {
                warn!("Skipping sheet '{}': {}", sheet, err);
                SheetOutcome::Skipped(err)
            }
            Ok(Err(err)) => {
                warn!("Sheet '{}' failed: {}", sheet, err);
                SheetOutcome::Failed(err)
            }
            Err(join_err) => {
                warn!("Worker for sheet '{}' stopped: {}", sheet, join_err);
                SheetOutcome::Failed(Sheet2LuaError::worker(join_err.to_string()))
            }
        };
        report.sheets.push(SheetReport { sheet, outcome });
    }

    info!(
        "Run finished: {} compiled, {} skipped, {} failed",
        report.compiled(),
        report.skipped(),
        report.failed()
    );
    report
}
