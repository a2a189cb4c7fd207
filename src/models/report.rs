//! Comparison report models

use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

use super::run::{RunOutcome, RunRecord, RunStatus, TimingSummary};

/// Summary of one algorithm's run
#[derive(Debug, Clone, Serialize)]
pub struct ReportEntry {
    pub name: String,
    pub status: RunStatus,
    pub outcome: Option<RunOutcome>,
    pub steps: u64,
    pub elapsed_ms: f64,
    pub samples: usize,
    pub dropped_samples: u64,
    /// Statistics over the time spent between two samples
    pub sample_intervals: TimingSummary,
}

impl From<&RunRecord> for ReportEntry {
    fn from(record: &RunRecord) -> Self {
        Self {
            name: record.name.clone(),
            status: record.status(),
            outcome: record.outcome.clone(),
            steps: record.steps,
            elapsed_ms: record.elapsed_ms,
            samples: record.samples_ms.len(),
            dropped_samples: record.dropped_samples,
            sample_intervals: TimingSummary::from_cumulative(&record.samples_ms),
        }
    }
}

/// Result of a comparison run across several algorithms
#[derive(Debug, Clone, Serialize)]
pub struct ComparisonReport {
    pub id: Uuid,
    pub started_at: DateTime<Utc>,
    pub input_len: usize,
    pub ascending: bool,
    pub entries: Vec<ReportEntry>,
}

impl ComparisonReport {
    /// Names of the runs that finished, fastest first
    pub fn ranking(&self) -> Vec<&str> {
        let mut finished: Vec<&ReportEntry> = self
            .entries
            .iter()
            .filter(|e| e.outcome == Some(RunOutcome::Finished))
            .collect();
        finished.sort_by(|a, b| a.elapsed_ms.total_cmp(&b.elapsed_ms));
        finished.into_iter().map(|e| e.name.as_str()).collect()
    }

    /// Whether every run reported back
    pub fn all_completed(&self) -> bool {
        self.entries.iter().all(|e| e.status == RunStatus::Completed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn finished(name: &str, elapsed_ms: f64) -> RunRecord {
        let mut record = RunRecord::new(name);
        record.complete(RunOutcome::Finished, 10, elapsed_ms);
        record
    }

    #[test]
    fn test_ranking_orders_finished_runs() {
        let mut cancelled = RunRecord::new("Bubble Sort");
        cancelled.complete(RunOutcome::Cancelled, 3, 0.1);

        let report = ComparisonReport {
            id: Uuid::new_v4(),
            started_at: Utc::now(),
            input_len: 10,
            ascending: true,
            entries: [
                finished("Merge Sort", 2.0),
                cancelled,
                finished("Quick Sort", 1.0),
            ]
            .iter()
            .map(ReportEntry::from)
            .collect(),
        };

        assert_eq!(report.ranking(), vec!["Quick Sort", "Merge Sort"]);
        assert!(report.all_completed());
    }
}
