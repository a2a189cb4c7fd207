//! Sortscope - Application Entry Point
//!
//! Runs either a timed comparison of every algorithm or an animation of one.

use std::fmt::Write as _;
use std::io::{self, Write};
use std::sync::atomic::Ordering;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use sortscope::{
    Algorithm, AppResult,
    algorithms::{ValueRange, value_range},
    config::{CONFIG, RunMode},
    models::{ComparisonReport, Highlight, RunOutcome, Value},
    runner::{AnimationSummary, Animator, ComparisonRunner, Frame, FrameSink},
    utils::{format_elapsed, random_sequence},
};

/// Widest bar drawn by the terminal sink
const BAR_WIDTH: u64 = 60;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing; stdout is reserved for frames and reports
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| CONFIG.display.rust_log.clone().into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();

    let input = random_sequence(
        CONFIG.input.size,
        CONFIG.input.min_value,
        CONFIG.input.max_value,
    )?;
    tracing::info!(
        size = input.len(),
        min = CONFIG.input.min_value,
        max = CONFIG.input.max_value,
        "Generated input"
    );

    match CONFIG.display.mode {
        RunMode::Compare => compare(&input).await,
        RunMode::Animate => animate(&input).await,
    }
}

async fn compare(input: &[Value]) -> anyhow::Result<()> {
    let runner = ComparisonRunner::new(&CONFIG.comparison).ascending(CONFIG.input.ascending);
    let mut handle = runner.start(input);

    let deadline = async {
        match CONFIG.comparison.cancel_after {
            Some(after) => tokio::time::sleep(after).await,
            None => std::future::pending().await,
        }
    };

    tokio::select! {
        _ = handle.join() => {}
        _ = deadline => tracing::info!("Cancel deadline reached"),
        _ = tokio::signal::ctrl_c() => tracing::info!("Interrupted"),
    }

    handle.cancel();
    handle.wait(CONFIG.comparison.grace).await?;

    let report = handle.report();
    if CONFIG.display.json_report {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print!("{}", render_table(&report));
    }
    Ok(())
}

fn render_table(report: &ComparisonReport) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "Comparison {} over {} values ({})",
        report.id,
        report.input_len,
        if report.ascending { "ascending" } else { "descending" }
    );
    let _ = writeln!(
        out,
        "{:<16} {:<10} {:>10} {:>12} {:>14}",
        "Algorithm", "Outcome", "Steps", "Elapsed", "Median sample"
    );

    for entry in &report.entries {
        let outcome = match &entry.outcome {
            Some(RunOutcome::Finished) => "finished",
            Some(RunOutcome::Cancelled) => "cancelled",
            Some(RunOutcome::Failed(_)) => "failed",
            None => "running",
        };
        let name = format!("{:<16}", entry.name);
        let name = match entry.name.parse::<Algorithm>() {
            Ok(algorithm) => {
                let (r, g, b) = algorithm.chart_color();
                format!("\x1b[38;2;{r};{g};{b}m{name}\x1b[0m")
            }
            Err(_) => name,
        };
        let _ = writeln!(
            out,
            "{} {:<10} {:>10} {:>12} {:>12.4}ms",
            name,
            outcome,
            entry.steps,
            format!("{:.2}ms", entry.elapsed_ms),
            entry.sample_intervals.median_ms
        );
    }

    let ranking = report.ranking();
    if !ranking.is_empty() {
        let _ = writeln!(out, "Ranking: {}", ranking.join(" < "));
    }
    out
}

async fn animate(input: &[Value]) -> anyhow::Result<()> {
    let animator = Animator::from_config(&CONFIG.animation);

    let stop = animator.stop_handle();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            stop.store(false, Ordering::Release);
        }
    });

    let mut sink = TerminalSink::new(input);
    animator
        .play(
            CONFIG.animation.algorithm,
            input,
            CONFIG.input.ascending,
            &mut sink,
        )
        .await?;
    Ok(())
}

/// Draws each frame as horizontal bars colored by highlight
struct TerminalSink {
    range: Option<ValueRange>,
    out: io::Stdout,
}

impl TerminalSink {
    fn new(input: &[Value]) -> Self {
        Self {
            range: value_range(input).ok(),
            out: io::stdout(),
        }
    }

    fn bar_len(&self, value: Value) -> u64 {
        match self.range {
            Some(range) if !range.is_flat() => {
                let offset = value.abs_diff(range.min) as u128;
                (offset * BAR_WIDTH as u128 / range.span() as u128) as u64 + 1
            }
            _ => BAR_WIDTH,
        }
    }
}

impl FrameSink for TerminalSink {
    fn render(&mut self, frame: &Frame) -> AppResult<()> {
        let mut screen = String::from("\x1b[H\x1b[2J");
        let _ = writeln!(
            screen,
            "{}  step {}  {}",
            frame.algorithm,
            frame.index,
            format_elapsed(frame.elapsed)
        );

        for (index, &value) in frame.step.snapshot.iter().enumerate() {
            let (r, g, b) = frame
                .step
                .highlight(index)
                .map(Highlight::rgb)
                .unwrap_or((255, 255, 255));
            let _ = writeln!(
                screen,
                "\x1b[38;2;{r};{g};{b}m{}\x1b[0m {value}",
                "#".repeat(self.bar_len(value) as usize)
            );
        }

        let mut out = self.out.lock();
        out.write_all(screen.as_bytes())?;
        out.flush()?;
        Ok(())
    }

    fn finish(&mut self, summary: &AnimationSummary) -> AppResult<()> {
        let mut out = self.out.lock();
        writeln!(
            out,
            "{}: {} frames in {} ({})",
            summary.algorithm,
            summary.frames,
            format_elapsed(summary.elapsed),
            if summary.completed { "sorted" } else { "stopped" }
        )?;
        Ok(())
    }
}
