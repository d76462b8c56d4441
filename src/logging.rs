//! Diagnostic logging to stderr

use tracing::Level;

/// Environment variable naming the log level (error, warn, info, debug, trace)
pub const LOG_ENV: &str = "NOTEPAD_LOG";

/// Pick the log level: `-v` flags win, then `NOTEPAD_LOG`, then warn
pub fn level(verbose: u8, env_value: Option<&str>) -> Level {
    match verbose {
        0 => env_value
            .and_then(|value| value.trim().parse::<Level>().ok())
            .unwrap_or(Level::WARN),
        1 => Level::INFO,
        2 => Level::DEBUG,
        _ => Level::TRACE,
    }
}

/// Install the global subscriber. Stdout stays reserved for command output.
pub fn init(verbose: u8) {
    let env_value = std::env::var(LOG_ENV).ok();
    let max_level = level(verbose, env_value.as_deref());

    // A subscriber may already be installed when embedded in tests
    let _ = tracing_subscriber::fmt()
        .with_max_level(max_level)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}
