//! Parsing of job outputs and accumulation into the result table.
//!
//! Every job that yields a parseable cross-validation accuracy gets a record
//! in the table and a line in the `<prefix>.params` log. Jobs that failed or
//! reported nothing recognizable are skipped; the sweep carries on.

use std::fs::File;
use std::io::Write;
use std::path::Path;

use hs_grid::{ResultTable, TrialRecord};
use hs_types::HsResult;
use tracing::{debug, warn};

use crate::runner::JobOutput;

/// Extract the cross-validation accuracy percentage from trainer output.
///
/// The trainer reports a line containing `Cross` whose last
/// whitespace-delimited token is the percentage (with a trailing `%`).
/// Returns the first such value that parses; `None` when no line qualifies.
pub fn parse_validation_accuracy(stdout: &str) -> Option<f64> {
    for line in stdout.lines() {
        if !line.contains("Cross") {
            continue;
        }
        let Some(token) = line.split_whitespace().last() else {
            continue;
        };
        let token = token.strip_suffix('%').unwrap_or(token);
        if let Ok(score) = token.parse::<f64>() {
            return Some(score);
        }
    }
    None
}

/// Accumulates job results and appends the params log.
#[derive(Debug)]
pub struct Collector {
    table: ResultTable,
    params_log: File,
    skipped: usize,
}

impl Collector {
    /// Create (truncating) the params log at `params_path`.
    pub fn create(params_path: &Path) -> HsResult<Self> {
        Ok(Self {
            table: ResultTable::new(),
            params_log: File::create(params_path)?,
            skipped: 0,
        })
    }

    /// Digest one job output. Returns the new record, or `None` when the job
    /// was skipped (failed process or no recognizable report line).
    pub fn collect(&mut self, output: &JobOutput) -> HsResult<Option<&TrialRecord>> {
        if !output.success {
            warn!(
                command = %output.command,
                code = ?output.status_code,
                "evaluation exited non-zero; skipping candidate"
            );
            self.skipped += 1;
            return Ok(None);
        }
        let Some(score) = parse_validation_accuracy(&output.stdout) else {
            debug!(command = %output.command, "no accuracy report in output; skipping candidate");
            self.skipped += 1;
            return Ok(None);
        };

        // Point-in-time marker: does this beat everything recorded so far?
        let marker = if self.table.improves_on_all(score) {
            " *BEST*"
        } else {
            ""
        };
        writeln!(
            self.params_log,
            "-c {}, -g {} # accuracy: {}{}",
            output.candidate.cost, output.candidate.gamma, score, marker
        )?;

        let record = self
            .table
            .record(score, output.candidate, output.command.clone());
        Ok(Some(record))
    }

    /// Jobs dropped so far (non-zero exit or unparseable output).
    pub fn skipped(&self) -> usize {
        self.skipped
    }

    pub fn table(&self) -> &ResultTable {
        &self.table
    }

    pub fn into_table(self) -> ResultTable {
        self.table
    }
}
