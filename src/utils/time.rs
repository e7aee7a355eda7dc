//! Time formatting utilities

/// Render seconds for an ffmpeg `-ss`/`-t` argument, millisecond precision
pub fn format_seconds_arg(seconds: f64) -> String {
    format!("{:.3}", seconds.max(0.0))
}

/// Format seconds to MM:SS.ms or HH:MM:SS.ms for display
pub fn format_clock(seconds: f64) -> String {
    let total_ms = (seconds.max(0.0) * 1000.0).round() as u64;
    let hours = total_ms / 3_600_000;
    let minutes = (total_ms % 3_600_000) / 60_000;
    let secs = (total_ms % 60_000) / 1000;
    let milliseconds = total_ms % 1000;

    if hours > 0 {
        format!("{:02}:{:02}:{:02}.{:03}", hours, minutes, secs, milliseconds)
    } else {
        format!("{:02}:{:02}.{:03}", minutes, secs, milliseconds)
    }
}
