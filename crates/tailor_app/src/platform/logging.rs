//! Logger setup for tailor_app.
//!
//! Logs go to `./tailor.log` so they do not interleave with the prompt.
//! `TAILOR_LOG` picks the level; `TAILOR_LOG_TERMINAL=1` also echoes to the terminal.

use std::path::Path;

use tailor_logging::{initialize, parse_level, LevelFilter, LogDestination};

const LOG_FILE: &str = "./tailor.log";

pub fn initialize_from_env() {
    let level = std::env::var("TAILOR_LOG")
        .ok()
        .and_then(|name| parse_level(&name))
        .unwrap_or(LevelFilter::Info);
    let echo = std::env::var("TAILOR_LOG_TERMINAL").is_ok_and(|value| value == "1");

    let path = Path::new(LOG_FILE);
    let destination = if echo {
        LogDestination::Both(path)
    } else {
        LogDestination::File(path)
    };
    initialize(destination, level);
}
