//! Shared components for CLI commands
//!
//! Logging setup and the terminal formatting used by more than one command.

use crate::app::services::vex_parser::ParseStats;
use colored::*;
use tracing::debug;

/// Set up structured logging on stderr
///
/// `RUST_LOG` overrides `log_level` when set. Quiet mode drops the uptime
/// timer for compact output.
pub fn setup_logging(log_level: &str, quiet: bool) {
    use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("vex_schedule={}", log_level)));

    if quiet {
        tracing_subscriber::registry()
            .with(filter)
            .with(
                fmt::layer()
                    .with_target(false)
                    .with_level(true)
                    .with_writer(std::io::stderr)
                    .compact(),
            )
            .init();
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(
                fmt::layer()
                    .with_target(false)
                    .with_level(true)
                    .with_timer(fmt::time::uptime())
                    .with_writer(std::io::stderr),
            )
            .init();
    }

    debug!("Logging initialized at level: {}", log_level);
}

/// Format a duration in seconds as `1h 02m 03s`
pub fn format_duration(seconds: u64) -> String {
    let hours = seconds / 3600;
    let minutes = (seconds % 3600) / 60;
    let secs = seconds % 60;

    if hours > 0 {
        format!("{}h {:02}m {:02}s", hours, minutes, secs)
    } else if minutes > 0 {
        format!("{}m {:02}s", minutes, secs)
    } else {
        format!("{}s", secs)
    }
}

/// Print the diagnostics of a parse, most recent last
pub fn print_diagnostics(stats: &ParseStats) {
    if !stats.has_diagnostics() {
        return;
    }

    println!(
        "\n{} ({})",
        "Diagnostics".bright_yellow().bold(),
        stats.diagnostics.len()
    );
    for diagnostic in &stats.diagnostics {
        println!(
            "  {} {:?}: {}",
            format!("line {:>5}", diagnostic.line).dimmed(),
            diagnostic.kind,
            diagnostic.message
        );
    }
}
