//! Run records written by the comparison runner

use serde::{Deserialize, Serialize};

/// How a driver stopped pulling its producer
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "message", rename_all = "snake_case")]
pub enum RunOutcome {
    /// Producer exhausted
    Finished,
    /// Running flag cleared before exhaustion
    Cancelled,
    /// Producer panicked; siblings are unaffected
    Failed(String),
}

/// Coarse status as shown next to each algorithm
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RunStatus {
    Waiting,
    Running,
    Completed,
}

/// Per-algorithm progress of a comparison run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunRecord {
    pub name: String,
    /// Cumulative elapsed time at each sample, in milliseconds
    pub samples_ms: Vec<f64>,
    pub completed: bool,
    pub outcome: Option<RunOutcome>,
    /// Steps pulled before the driver stopped
    pub steps: u64,
    /// Total elapsed time, in milliseconds
    pub elapsed_ms: f64,
    /// Samples lost to a full event channel
    pub dropped_samples: u64,
}

impl RunRecord {
    /// Create an empty record for `name`
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            samples_ms: Vec::new(),
            completed: false,
            outcome: None,
            steps: 0,
            elapsed_ms: 0.0,
            dropped_samples: 0,
        }
    }

    /// Append an elapsed-time sample
    pub fn record_sample(&mut self, elapsed_ms: f64) {
        self.samples_ms.push(elapsed_ms);
    }

    /// Mark the run as done
    pub fn complete(&mut self, outcome: RunOutcome, steps: u64, elapsed_ms: f64) {
        self.completed = true;
        self.outcome = Some(outcome);
        self.steps = steps;
        self.elapsed_ms = elapsed_ms;
    }

    pub fn status(&self) -> RunStatus {
        if self.completed {
            RunStatus::Completed
        } else if self.samples_ms.is_empty() {
            RunStatus::Waiting
        } else {
            RunStatus::Running
        }
    }
}

/// Aggregated statistics over a set of timings
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TimingSummary {
    pub count: u32,
    pub avg_ms: f64,
    pub median_ms: f64,
    pub min_ms: f64,
    pub max_ms: f64,
    pub stddev_ms: f64,
}

impl TimingSummary {
    /// Summarize raw timings
    pub fn from_samples(samples: &[f64]) -> Self {
        let count = samples.len() as u32;
        if count == 0 {
            return Self::default();
        }

        let avg_ms = samples.iter().sum::<f64>() / count as f64;
        let min_ms = samples.iter().cloned().fold(f64::INFINITY, f64::min);
        let max_ms = samples.iter().cloned().fold(f64::NEG_INFINITY, f64::max);

        let mut sorted = samples.to_vec();
        sorted.sort_by(f64::total_cmp);
        let median_ms = if count % 2 == 0 {
            (sorted[count as usize / 2 - 1] + sorted[count as usize / 2]) / 2.0
        } else {
            sorted[count as usize / 2]
        };

        let variance = samples
            .iter()
            .map(|t| (t - avg_ms).powi(2))
            .sum::<f64>()
            / count as f64;

        Self {
            count,
            avg_ms,
            median_ms,
            min_ms,
            max_ms,
            stddev_ms: variance.sqrt(),
        }
    }

    /// Summarize the gaps between consecutive cumulative samples
    pub fn from_cumulative(samples: &[f64]) -> Self {
        let mut previous = 0.0;
        let intervals: Vec<f64> = samples
            .iter()
            .map(|&sample| {
                let interval = sample - previous;
                previous = sample;
                interval
            })
            .collect();

        Self::from_samples(&intervals)
    }
}
