//! Comparison runner - races several producers over the same input

use std::fmt;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::{Duration, Instant};

use chrono::{DateTime, Utc};
use tokio::sync::mpsc::{self, error::TrySendError};
use tokio::task::JoinError;
use tracing::{debug, error, info, warn};
use uuid::Uuid;

use crate::{
    algorithms::{Algorithm, Producer},
    config::ComparisonConfig,
    constants::SAMPLE_CHANNEL_CAPACITY,
    error::{AppError, AppResult},
    models::{ComparisonReport, ReportEntry, RunOutcome, RunRecord, Value},
    utils::{format_elapsed, millis},
};

/// Builds a fresh producer for one run
pub type ProducerFactory = Arc<dyn Fn(&[Value], bool) -> Producer + Send + Sync>;

/// A named producer factory taking part in a comparison
#[derive(Clone)]
pub struct Contender {
    name: String,
    factory: ProducerFactory,
}

impl Contender {
    pub fn new(
        name: impl Into<String>,
        factory: impl Fn(&[Value], bool) -> Producer + Send + Sync + 'static,
    ) -> Self {
        Self {
            name: name.into(),
            factory: Arc::new(factory),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }
}

impl From<Algorithm> for Contender {
    fn from(algorithm: Algorithm) -> Self {
        Contender::new(algorithm.display_name(), move |input, ascending| {
            algorithm.producer(input, ascending)
        })
    }
}

impl fmt::Debug for Contender {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Contender").field("name", &self.name).finish()
    }
}

/// Progress reported by a driver
#[derive(Debug)]
enum RunEvent {
    Sample {
        slot: usize,
        elapsed: Duration,
    },
    Finished {
        slot: usize,
        outcome: RunOutcome,
        steps: u64,
        elapsed: Duration,
        dropped_samples: u64,
    },
}

/// What a driver saw before it stopped pulling
#[derive(Debug)]
struct DriveSummary {
    outcome: RunOutcome,
    steps: u64,
    elapsed: Duration,
    /// Samples discarded because the event channel was full
    dropped_samples: u64,
}

/// Starts one independent driver per contender
#[derive(Debug, Clone)]
pub struct ComparisonRunner {
    contenders: Vec<Contender>,
    sample_every: u64,
    sample_capacity: usize,
    ascending: bool,
}

impl ComparisonRunner {
    /// Create a runner over all nine algorithms, sorting ascending
    pub fn new(config: &ComparisonConfig) -> Self {
        Self {
            contenders: Algorithm::ALL.into_iter().map(Contender::from).collect(),
            sample_every: config.sample_every.max(1),
            sample_capacity: SAMPLE_CHANNEL_CAPACITY,
            ascending: true,
        }
    }

    /// Replace the contenders
    pub fn with_contenders(mut self, contenders: Vec<Contender>) -> Self {
        self.contenders = contenders;
        self
    }

    pub fn ascending(mut self, ascending: bool) -> Self {
        self.ascending = ascending;
        self
    }

    /// Bound on undelivered events; samples beyond it are dropped and counted
    pub fn sample_capacity(mut self, capacity: usize) -> Self {
        self.sample_capacity = capacity.max(1);
        self
    }

    /// Start every driver over its own copy of `input`.
    ///
    /// Must be called from within a Tokio runtime.
    pub fn start(&self, input: &[Value]) -> ComparisonHandle {
        let id = Uuid::new_v4();
        let running = Arc::new(AtomicBool::new(true));
        let (events_tx, events_rx) = mpsc::channel(self.sample_capacity);
        let shared_input: Arc<[Value]> = Arc::from(input);

        info!(
            comparison_id = %id,
            contenders = self.contenders.len(),
            input_len = input.len(),
            "Starting comparison"
        );

        for (slot, contender) in self.contenders.iter().enumerate() {
            let name = contender.name.clone();
            let factory = contender.factory.clone();
            let input = shared_input.clone();
            let flag = running.clone();
            let samples = events_tx.clone();
            let (ascending, sample_every) = (self.ascending, self.sample_every);

            let started = Instant::now();
            let worker = tokio::task::spawn_blocking(move || {
                drive(slot, &factory, &input, ascending, sample_every, &flag, &samples)
            });

            // supervisor: isolates a failing producer from its siblings
            let finished = events_tx.clone();
            tokio::spawn(async move {
                let summary = match worker.await {
                    Ok(summary) => summary,
                    Err(err) => {
                        let message = panic_message(err);
                        error!(algorithm = %name, "Run failed: {}", message);
                        DriveSummary {
                            outcome: RunOutcome::Failed(message),
                            steps: 0,
                            elapsed: started.elapsed(),
                            dropped_samples: 0,
                        }
                    }
                };

                debug!(
                    algorithm = %name,
                    steps = summary.steps,
                    dropped_samples = summary.dropped_samples,
                    elapsed = %format_elapsed(summary.elapsed),
                    "Run stopped: {:?}",
                    summary.outcome
                );

                // completion is never dropped; this waits for room
                let _ = finished
                    .send(RunEvent::Finished {
                        slot,
                        outcome: summary.outcome,
                        steps: summary.steps,
                        elapsed: summary.elapsed,
                        dropped_samples: summary.dropped_samples,
                    })
                    .await;
            });
        }

        ComparisonHandle {
            id,
            started_at: Utc::now(),
            input_len: input.len(),
            ascending: self.ascending,
            running,
            events: events_rx,
            records: self
                .contenders
                .iter()
                .map(|c| RunRecord::new(c.name.clone()))
                .collect(),
        }
    }
}

/// Pull `factory`'s producer until it is exhausted or the flag is cleared
fn drive(
    slot: usize,
    factory: &ProducerFactory,
    input: &[Value],
    ascending: bool,
    sample_every: u64,
    running: &AtomicBool,
    events: &mpsc::Sender<RunEvent>,
) -> DriveSummary {
    let started = Instant::now();
    let mut producer = factory(input, ascending);
    let mut steps = 0u64;
    let mut dropped_samples = 0u64;

    let outcome = loop {
        if !running.load(Ordering::Acquire) {
            break RunOutcome::Cancelled;
        }
        if producer.next().is_none() {
            break RunOutcome::Finished;
        }

        steps += 1;
        if steps % sample_every == 0 {
            let sample = RunEvent::Sample {
                slot,
                elapsed: started.elapsed(),
            };
            if let Err(TrySendError::Full(_)) = events.try_send(sample) {
                dropped_samples += 1;
            }
        }
    };

    DriveSummary {
        outcome,
        steps,
        elapsed: started.elapsed(),
        dropped_samples,
    }
}

fn panic_message(err: JoinError) -> String {
    if !err.is_panic() {
        return err.to_string();
    }

    let payload = err.into_panic();
    payload
        .downcast_ref::<&str>()
        .map(|s| s.to_string())
        .or_else(|| payload.downcast_ref::<String>().cloned())
        .unwrap_or_else(|| "producer panicked".to_string())
}

/// Live view of a running comparison.
///
/// Owns every [`RunRecord`]; drivers only send events. Dropping the handle
/// cancels whatever is still running.
pub struct ComparisonHandle {
    id: Uuid,
    started_at: DateTime<Utc>,
    input_len: usize,
    ascending: bool,
    running: Arc<AtomicBool>,
    events: mpsc::Receiver<RunEvent>,
    records: Vec<RunRecord>,
}

impl ComparisonHandle {
    pub fn id(&self) -> Uuid {
        self.id
    }

    /// Records in contender order
    pub fn records(&self) -> &[RunRecord] {
        &self.records
    }

    /// Record for the contender called `name`
    pub fn record(&self, name: &str) -> Option<&RunRecord> {
        self.records.iter().find(|r| r.name == name)
    }

    /// Whether every driver has reported back
    pub fn is_finished(&self) -> bool {
        self.records.iter().all(|r| r.completed)
    }

    pub fn is_running(&self) -> bool {
        self.running.load(Ordering::Acquire) && !self.is_finished()
    }

    /// Ask every driver to stop; each notices within one step
    pub fn cancel(&self) {
        if self.running.swap(false, Ordering::AcqRel) {
            info!(comparison_id = %self.id, "Cancelling comparison");
        }
    }

    /// Apply every event received so far without waiting
    pub fn poll(&mut self) -> usize {
        let mut applied = 0;
        while let Ok(event) = self.events.try_recv() {
            self.apply(event);
            applied += 1;
        }
        applied
    }

    /// Wait until every driver has reported back, for at most `grace`
    pub async fn wait(&mut self, grace: Duration) -> AppResult<()> {
        if tokio::time::timeout(grace, self.drain()).await.is_ok() {
            return Ok(());
        }

        let pending = self.records.iter().filter(|r| !r.completed).count();
        warn!(
            comparison_id = %self.id,
            pending,
            "Comparison did not settle within {}",
            format_elapsed(grace)
        );
        Err(AppError::Timeout(format!(
            "{} run(s) still active after {}",
            pending,
            format_elapsed(grace)
        )))
    }

    /// Wait until every driver has reported back
    pub async fn join(&mut self) {
        self.drain().await;
    }

    async fn drain(&mut self) {
        while !self.is_finished() {
            match self.events.recv().await {
                Some(event) => self.apply(event),
                None => break,
            }
        }
    }

    fn apply(&mut self, event: RunEvent) {
        match event {
            RunEvent::Sample { slot, elapsed } => {
                if let Some(record) = self.records.get_mut(slot) {
                    record.record_sample(millis(elapsed));
                }
            }
            RunEvent::Finished {
                slot,
                outcome,
                steps,
                elapsed,
                dropped_samples,
            } => {
                if let Some(record) = self.records.get_mut(slot) {
                    record.complete(outcome, steps, millis(elapsed));
                    record.dropped_samples = dropped_samples;
                }
            }
        }
    }

    /// Snapshot of the comparison so far
    pub fn report(&self) -> ComparisonReport {
        ComparisonReport {
            id: self.id,
            started_at: self.started_at,
            input_len: self.input_len,
            ascending: self.ascending,
            entries: self.records.iter().map(ReportEntry::from).collect(),
        }
    }
}

impl Drop for ComparisonHandle {
    fn drop(&mut self) {
        self.running.store(false, Ordering::Release);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::RunStatus;
    use crate::utils::random_sequence;

    fn exploding(input: &[Value], ascending: bool) -> Producer {
        Box::new(
            Algorithm::Bubble
                .producer(input, ascending)
                .enumerate()
                .map(|(index, step)| {
                    if index == 3 {
                        panic!("producer exploded");
                    }
                    step
                }),
        )
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 2)]
    async fn test_cancelled_comparison_completes_every_run() {
        let input = random_sequence(50, 0, 1000).unwrap();
        let runner = ComparisonRunner::new(&ComparisonConfig::default());
        let mut handle = runner.start(&input);

        tokio::time::sleep(Duration::from_millis(10)).await;
        handle.cancel();
        handle.wait(Duration::from_secs(5)).await.unwrap();

        assert_eq!(handle.records().len(), 9);
        for record in handle.records() {
            assert!(record.completed, "{} did not complete", record.name);
            assert!(matches!(
                record.outcome,
                Some(RunOutcome::Finished) | Some(RunOutcome::Cancelled)
            ));
        }
        assert!(!handle.is_running());
    }

    #[tokio::test]
    async fn test_full_run_reports_every_algorithm() {
        let input = random_sequence(60, -100, 100).unwrap();
        let config = ComparisonConfig {
            sample_every: 1,
            ..ComparisonConfig::default()
        };
        let mut handle = ComparisonRunner::new(&config).start(&input);
        handle.wait(Duration::from_secs(10)).await.unwrap();

        for record in handle.records() {
            assert_eq!(record.outcome, Some(RunOutcome::Finished));
            // one sample per pulled step, delivered or counted as dropped
            assert_eq!(record.samples_ms.len() as u64 + record.dropped_samples, record.steps);
            assert!(record.steps > 0);
        }

        let report = handle.report();
        assert!(report.all_completed());
        assert_eq!(report.ranking().len(), 9);
        assert_eq!(report.input_len, 60);
    }

    #[tokio::test]
    async fn test_failing_producer_is_isolated() {
        let input: Vec<Value> = (0..30).rev().collect();
        let runner = ComparisonRunner::new(&ComparisonConfig::default()).with_contenders(vec![
            Contender::new("Exploding Sort", exploding),
            Algorithm::Merge.into(),
        ]);
        let mut handle = runner.start(&input);
        handle.wait(Duration::from_secs(5)).await.unwrap();

        let failed = handle.record("Exploding Sort").unwrap();
        assert!(failed.completed);
        assert!(matches!(
            &failed.outcome,
            Some(RunOutcome::Failed(message)) if message.contains("exploded")
        ));

        let merge = handle.record("Merge Sort").unwrap();
        assert_eq!(merge.outcome, Some(RunOutcome::Finished));
        assert_eq!(merge.status(), RunStatus::Completed);
    }

    #[tokio::test]
    async fn test_poll_applies_pending_events() {
        let mut handle = ComparisonRunner::new(&ComparisonConfig::default())
            .with_contenders(vec![Algorithm::Quick.into()])
            .start(&[3, 1, 2]);

        handle.join().await;
        assert!(handle.is_finished());
        // everything was drained by join
        assert_eq!(handle.poll(), 0);
    }

    #[tokio::test]
    async fn test_undrained_samples_are_bounded() {
        let input: Vec<Value> = (0..200).rev().collect();
        let config = ComparisonConfig {
            sample_every: 1,
            ..ComparisonConfig::default()
        };
        let mut handle = ComparisonRunner::new(&config)
            .with_contenders(vec![Algorithm::Bubble.into()])
            .sample_capacity(1)
            .start(&input);

        // nothing is received while the driver runs
        tokio::time::sleep(Duration::from_millis(200)).await;
        handle.wait(Duration::from_secs(5)).await.unwrap();

        let record = handle.record("Bubble Sort").unwrap();
        assert_eq!(record.outcome, Some(RunOutcome::Finished));
        assert!(record.dropped_samples > 0);
        assert_eq!(record.samples_ms.len() as u64 + record.dropped_samples, record.steps);
    }

    #[tokio::test]
    async fn test_no_contenders_is_immediately_finished() {
        let mut handle = ComparisonRunner::new(&ComparisonConfig::default())
            .with_contenders(Vec::new())
            .start(&[1, 2, 3]);

        assert!(handle.is_finished());
        handle.wait(Duration::from_millis(10)).await.unwrap();
    }
}
