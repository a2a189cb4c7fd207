//! Timed, step-by-step playback of a single producer

use std::iter::Peekable;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::{Duration, Instant};

use futures::{Stream, StreamExt, pin_mut};
use serde::Serialize;
use tokio::time::{Interval, MissedTickBehavior};
use tracing::{debug, info};

use crate::{
    algorithms::{Algorithm, Producer},
    config::AnimationConfig,
    error::AppResult,
    models::{Step, Value},
    utils::format_elapsed,
};

/// One rendered moment of an animation
#[derive(Debug, Clone, Serialize)]
pub struct Frame {
    pub algorithm: Algorithm,
    /// 1-based position in the step stream
    pub index: u64,
    /// Time since playback started
    #[serde(skip)]
    pub elapsed: Duration,
    pub step: Step,
    /// Set on the terminal step of the stream
    pub last: bool,
}

impl Frame {
    pub fn is_final(&self) -> bool {
        self.last
    }
}

/// How a playback ended
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AnimationSummary {
    pub algorithm: Algorithm,
    pub frames: u64,
    #[serde(skip)]
    pub elapsed: Duration,
    /// False when playback was stopped before the producer was exhausted
    pub completed: bool,
    pub final_snapshot: Vec<Value>,
}

/// Receives frames as they are played
#[cfg_attr(test, mockall::automock)]
pub trait FrameSink: Send {
    fn render(&mut self, frame: &Frame) -> AppResult<()>;

    fn finish(&mut self, summary: &AnimationSummary) -> AppResult<()>;
}

/// Plays a producer at a fixed frame interval.
///
/// Exactly one step is emitted per tick; stopping takes effect before the
/// next emission.
#[derive(Debug, Clone)]
pub struct Animator {
    frame_interval: Duration,
    running: Arc<AtomicBool>,
}

struct Playback {
    algorithm: Algorithm,
    producer: Peekable<Producer>,
    period: Duration,
    ticker: Option<Interval>,
    started: Instant,
    index: u64,
    running: Arc<AtomicBool>,
}

impl Animator {
    pub fn new(frame_interval: Duration) -> Self {
        Self {
            // a zero period would make the interval panic
            frame_interval: frame_interval.max(Duration::from_millis(1)),
            running: Arc::new(AtomicBool::new(false)),
        }
    }

    pub fn from_config(config: &AnimationConfig) -> Self {
        Self::new(config.frame_interval)
    }

    pub fn frame_interval(&self) -> Duration {
        self.frame_interval
    }

    /// Shared flag; clearing it stops playback
    pub fn stop_handle(&self) -> Arc<AtomicBool> {
        self.running.clone()
    }

    pub fn stop(&self) {
        self.running.store(false, Ordering::Release);
    }

    pub fn is_running(&self) -> bool {
        self.running.load(Ordering::Acquire)
    }

    /// Frames of `algorithm` over `input`, one per tick, until exhausted or stopped
    pub fn frames(
        &self,
        algorithm: Algorithm,
        input: &[Value],
        ascending: bool,
    ) -> impl Stream<Item = Frame> + Send + 'static {
        let playback = Playback {
            algorithm,
            producer: algorithm.producer(input, ascending).peekable(),
            period: self.frame_interval,
            ticker: None,
            started: Instant::now(),
            index: 0,
            running: self.running.clone(),
        };

        futures::stream::unfold(playback, |mut playback| async move {
            let period = playback.period;
            let ticker = playback.ticker.get_or_insert_with(|| {
                let mut ticker = tokio::time::interval(period);
                ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
                ticker
            });
            ticker.tick().await;

            if !playback.running.load(Ordering::Acquire) {
                return None;
            }
            let step = playback.producer.next()?;
            playback.index += 1;

            let frame = Frame {
                algorithm: playback.algorithm,
                index: playback.index,
                elapsed: playback.started.elapsed(),
                step,
                last: playback.producer.peek().is_none(),
            };
            Some((frame, playback))
        })
    }

    /// Play `algorithm` over `input` into `sink`
    pub async fn play(
        &self,
        algorithm: Algorithm,
        input: &[Value],
        ascending: bool,
        sink: &mut dyn FrameSink,
    ) -> AppResult<AnimationSummary> {
        self.running.store(true, Ordering::Release);
        info!(
            algorithm = %algorithm,
            input_len = input.len(),
            ascending,
            interval = %format_elapsed(self.frame_interval),
            "Starting animation"
        );

        let started = Instant::now();
        let mut frames_played = 0u64;
        let mut exhausted = false;
        let mut last = input.to_vec();

        let frames = self.frames(algorithm, input, ascending);
        pin_mut!(frames);

        while let Some(frame) = frames.next().await {
            sink.render(&frame)?;
            frames_played = frame.index;
            exhausted = frame.last;
            last = frame.step.snapshot;
        }
        self.running.store(false, Ordering::Release);

        let summary = AnimationSummary {
            algorithm,
            frames: frames_played,
            elapsed: started.elapsed(),
            completed: exhausted,
            final_snapshot: last,
        };

        debug!(
            algorithm = %algorithm,
            frames = summary.frames,
            completed = summary.completed,
            "Animation ended after {}",
            format_elapsed(summary.elapsed)
        );

        sink.finish(&summary)?;
        Ok(summary)
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use super::*;
    use crate::error::AppError;

    fn animator() -> Animator {
        Animator::new(Duration::from_millis(1))
    }

    #[tokio::test]
    async fn test_plays_every_step_then_finishes() {
        let mut sink = MockFrameSink::new();
        // bubble over [2, 1]: compare, swap, terminal
        sink.expect_render().times(3).returning(|_| Ok(()));
        sink.expect_finish()
            .withf(|summary: &AnimationSummary| {
                summary.completed && summary.frames == 3 && summary.final_snapshot == vec![1, 2]
            })
            .times(1)
            .returning(|_| Ok(()));

        let summary = animator()
            .play(Algorithm::Bubble, &[2, 1], true, &mut sink)
            .await
            .unwrap();
        assert!(summary.completed);
    }

    async fn record_frames(
        algorithm: Algorithm,
        input: &[Value],
        ascending: bool,
    ) -> (Vec<(u64, bool)>, AnimationSummary) {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let recorder = seen.clone();

        let mut sink = MockFrameSink::new();
        sink.expect_render().returning(move |frame: &Frame| {
            recorder.lock().unwrap().push((frame.index, frame.is_final()));
            Ok(())
        });
        sink.expect_finish().returning(|_| Ok(()));

        let summary = animator()
            .play(algorithm, input, ascending, &mut sink)
            .await
            .unwrap();
        let seen = seen.lock().unwrap().clone();
        (seen, summary)
    }

    #[tokio::test]
    async fn test_frames_arrive_in_order() {
        let (seen, summary) = record_frames(Algorithm::Merge, &[4, 3, 2, 1], false).await;

        assert_eq!(seen.len() as u64, summary.frames);
        assert!(seen.iter().enumerate().all(|(i, (index, _))| *index == i as u64 + 1));
        assert_eq!(summary.final_snapshot, vec![4, 3, 2, 1]);
    }

    #[tokio::test]
    async fn test_only_the_terminal_frame_is_final() {
        // bucket gathers emit plain steps that are not terminal
        for algorithm in [Algorithm::Merge, Algorithm::Bucket, Algorithm::Counting] {
            let (seen, summary) = record_frames(algorithm, &[3, 0, 2, 1], true).await;

            let finals: Vec<u64> = seen.iter().filter(|(_, last)| *last).map(|(i, _)| *i).collect();
            assert_eq!(finals, vec![summary.frames], "{algorithm}");
            assert_eq!(summary.final_snapshot, vec![0, 1, 2, 3], "{algorithm}");
            assert!(summary.completed);
        }
    }

    #[tokio::test]
    async fn test_stop_after_terminal_frame_still_completes() {
        let animator = animator();
        let stop = animator.stop_handle();

        let mut sink = MockFrameSink::new();
        sink.expect_render().returning(move |frame: &Frame| {
            if frame.is_final() {
                stop.store(false, Ordering::Release);
            }
            Ok(())
        });
        sink.expect_finish().returning(|_| Ok(()));

        let summary = animator
            .play(Algorithm::Bubble, &[2, 1], true, &mut sink)
            .await
            .unwrap();
        assert!(summary.completed);
        assert_eq!(summary.frames, 3);
        assert!(!animator.is_running());
    }

    #[tokio::test]
    async fn test_stop_takes_effect_before_next_pull() {
        let animator = animator();
        let stop = animator.stop_handle();

        let mut sink = MockFrameSink::new();
        sink.expect_render().times(2).returning(move |frame: &Frame| {
            if frame.index == 2 {
                stop.store(false, Ordering::Release);
            }
            Ok(())
        });
        sink.expect_finish()
            .withf(|summary: &AnimationSummary| !summary.completed && summary.frames == 2)
            .times(1)
            .returning(|_| Ok(()));

        let input: Vec<Value> = (0..20).rev().collect();
        let summary = animator
            .play(Algorithm::Selection, &input, true, &mut sink)
            .await
            .unwrap();
        assert!(!summary.completed);
        assert!(!animator.is_running());
    }

    #[tokio::test]
    async fn test_render_error_aborts_playback() {
        let mut sink = MockFrameSink::new();
        sink.expect_render()
            .times(1)
            .returning(|_| Err(AppError::Render("terminal closed".to_string())));
        sink.expect_finish().never();

        let result = animator().play(Algorithm::Heap, &[3, 1, 2], true, &mut sink).await;
        assert!(matches!(result, Err(AppError::Render(_))));
    }

    #[tokio::test]
    async fn test_frame_stream_yields_highlighted_steps() {
        let animator = animator();
        animator.stop_handle().store(true, Ordering::Release);

        let frames: Vec<Frame> = animator.frames(Algorithm::Insertion, &[2, 1], true).collect().await;
        assert!(frames.len() > 1);
        assert!(frames[..frames.len() - 1].iter().all(|f| !f.step.highlights.is_empty()));
        assert_eq!(frames.last().unwrap().step.snapshot, vec![1, 2]);
    }

    #[tokio::test]
    async fn test_stream_is_empty_when_not_started() {
        // the running flag is only raised by `play`
        let frames: Vec<Frame> = animator().frames(Algorithm::Quick, &[1, 2], true).collect().await;
        assert!(frames.is_empty());
    }

    #[test]
    fn test_zero_interval_is_clamped() {
        assert_eq!(Animator::new(Duration::ZERO).frame_interval(), Duration::from_millis(1));
    }
}
