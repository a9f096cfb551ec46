//! Result accumulation and best-candidate selection.
//!
//! Scores are kept as an ordered list of [`TrialRecord`]s carrying an
//! explicit insertion sequence. Selection maximizes `(score, seq)`, which
//! makes the tie-break rule concrete: when two candidates score identically,
//! the later-recorded one wins.

use hs_types::{Candidate, EngineError};
use serde::{Deserialize, Serialize};

/// One successfully parsed cross-validation result.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrialRecord {
    /// Insertion sequence number, starting at 0.
    pub seq: usize,
    /// Cross-validation accuracy percentage reported by the trainer.
    pub score: f64,
    pub candidate: Candidate,
    /// The literal command whose output produced this record.
    pub command: String,
}

/// The winning (score, candidate) pair.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BestSelection {
    pub score: f64,
    pub candidate: Candidate,
}

/// Ordered accumulation of trial records for one sweep.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ResultTable {
    records: Vec<TrialRecord>,
}

impl ResultTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether `score` strictly exceeds every score recorded so far.
    ///
    /// False for an empty table: the first record is not an "improvement"
    /// over anything. This is the point-in-time comparison behind the
    /// `*BEST*` params-log marker, not the final verdict.
    pub fn improves_on_all(&self, score: f64) -> bool {
        !self.records.is_empty() && self.records.iter().all(|r| score > r.score)
    }

    /// Append a record, assigning the next insertion sequence number.
    pub fn record(&mut self, score: f64, candidate: Candidate, command: String) -> &TrialRecord {
        let seq = self.records.len();
        self.records.push(TrialRecord {
            seq,
            score,
            candidate,
            command,
        });
        &self.records[seq]
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn records(&self) -> &[TrialRecord] {
        &self.records
    }

    /// Select the record maximizing `(score, seq)`.
    ///
    /// An empty table is an error: a sweep that produced no parseable result
    /// has no well-defined best.
    pub fn best(&self) -> Result<BestSelection, EngineError> {
        let mut best: Option<&TrialRecord> = None;
        for record in &self.records {
            // >= so the later-recorded candidate survives an exact tie.
            let replaces = match best {
                None => true,
                Some(current) => record.score >= current.score,
            };
            if replaces {
                best = Some(record);
            }
        }
        best.map(|r| BestSelection {
            score: r.score,
            candidate: r.candidate,
        })
        .ok_or(EngineError::NoResults)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn candidate(cost: f64, gamma: f64) -> Candidate {
        Candidate { cost, gamma }
    }

    #[test]
    fn best_picks_maximum_score() {
        let mut table = ResultTable::new();
        table.record(91.2, candidate(1.0, 1.0), String::new());
        table.record(95.0, candidate(2.0, 0.5), String::new());
        table.record(93.5, candidate(4.0, 0.25), String::new());

        let best = table.best().unwrap();
        assert_eq!(best.score, 95.0);
        assert_eq!(best.candidate, candidate(2.0, 0.5));
    }

    #[test]
    fn exact_tie_goes_to_later_record() {
        let mut table = ResultTable::new();
        table.record(91.2, candidate(1.0, 1.0), String::new());
        table.record(93.5, candidate(2.0, 0.5), String::new());
        table.record(93.5, candidate(3.0, 0.25), String::new());

        let best = table.best().unwrap();
        assert_eq!(best.score, 93.5);
        assert_eq!(best.candidate, candidate(3.0, 0.25));
    }

    #[test]
    fn selection_is_deterministic() {
        let mut table = ResultTable::new();
        table.record(88.0, candidate(1.0, 1.0), String::new());
        table.record(88.0, candidate(2.0, 2.0), String::new());

        let first = table.best().unwrap();
        let second = table.best().unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn empty_table_is_an_error() {
        let table = ResultTable::new();
        assert!(matches!(table.best(), Err(EngineError::NoResults)));
    }

    #[test]
    fn improvement_marker_semantics() {
        let mut table = ResultTable::new();
        // First score is never an improvement: there is nothing to beat yet.
        assert!(!table.improves_on_all(91.2));
        table.record(91.2, candidate(1.0, 1.0), String::new());

        assert!(table.improves_on_all(93.5));
        table.record(93.5, candidate(2.0, 0.5), String::new());

        // Equal is not an improvement.
        assert!(!table.improves_on_all(93.5));
        // Neither is worse.
        assert!(!table.improves_on_all(80.0));
    }

    #[test]
    fn sequence_numbers_track_insertion_order() {
        let mut table = ResultTable::new();
        table.record(1.0, candidate(1.0, 1.0), String::new());
        table.record(2.0, candidate(2.0, 2.0), String::new());
        let seqs: Vec<usize> = table.records().iter().map(|r| r.seq).collect();
        assert_eq!(seqs, vec![0, 1]);
    }
}
