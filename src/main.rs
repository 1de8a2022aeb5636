//! daybook - scheduled task store CLI
//!
//! Schedules tasks on dates and time slots and lists them by day, week,
//! month or explicit range.

use clap::Parser;
use daybook::cli::Cli;
use daybook::output::{emit_error, infer_command_name_from_args};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Longest `RUST_LOG` value honored at startup
const MAX_LOG_FILTER_LEN: usize = 4096;

fn main() {
    // Tracing is opt-in via RUST_LOG; an empty, oversized or unparsable
    // filter leaves it off.
    let filter = std::env::var("RUST_LOG")
        .ok()
        .and_then(|raw| {
            let raw = raw.trim();
            if raw.is_empty() || raw.len() > MAX_LOG_FILTER_LEN {
                return None;
            }
            EnvFilter::try_new(raw).ok()
        })
        .unwrap_or_else(|| EnvFilter::new("off"));

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .init();

    let command = infer_command_name_from_args();
    let cli = Cli::parse();
    let json = cli.json;
    if let Err(err) = cli.run() {
        let _ = emit_error(&command, &err, json);
        std::process::exit(err.exit_code());
    }
}
