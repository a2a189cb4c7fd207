//! Time utilities

use std::time::Duration;

/// Convert a duration into fractional milliseconds
pub fn millis(duration: Duration) -> f64 {
    duration.as_secs_f64() * 1000.0
}

/// Format an elapsed duration as a human-readable string
pub fn format_elapsed(duration: Duration) -> String {
    let ms = millis(duration);

    if ms < 1.0 {
        format!("{}µs", duration.as_micros())
    } else if ms < 1000.0 {
        format!("{:.2}ms", ms)
    } else if ms < 60_000.0 {
        format!("{:.3}s", ms / 1000.0)
    } else {
        let seconds = duration.as_secs();
        format!("{}m {}s", seconds / 60, seconds % 60)
    }
}
