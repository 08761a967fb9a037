// Leveled, colored log output for getgo.
// Log lines always go to stderr so that stdout only carries the progress
// lines (matched filename, URL, extracted paths).

use colored::{ColoredString, Colorize};
use std::fmt;
use std::sync::atomic::{AtomicBool, Ordering};

/// Severity of a log line. `Debug` lines are dropped unless `--debug` was given.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Level {
    Debug,
    Info,
    Warn,
    Error,
}

impl Level {
    /// The colored `[LEVEL]` tag printed in front of each line.
    fn tag(self) -> ColoredString {
        match self {
            Level::Debug => "[DEBUG]".dimmed(),
            Level::Info => "[INFO]".bright_green(),
            Level::Warn => "[WARN]".bright_yellow(),
            Level::Error => "[ERROR]".bright_red(),
        }
    }
}

// General progress.
#[macro_export]
macro_rules! log_info {
    ($($arg:tt)*) => ($crate::logger::emit($crate::logger::Level::Info, format_args!($($arg)*)));
}

// Outcomes worth a second look that are not failures.
#[macro_export]
macro_rules! log_warn {
    ($($arg:tt)*) => ($crate::logger::emit($crate::logger::Level::Warn, format_args!($($arg)*)));
}

// The fatal error reported right before exiting.
#[macro_export]
macro_rules! log_error {
    ($($arg:tt)*) => ($crate::logger::emit($crate::logger::Level::Error, format_args!($($arg)*)));
}

// Silent unless `--debug` was passed. Arguments are not even formatted otherwise.
#[macro_export]
macro_rules! log_debug {
    ($($arg:tt)*) => {
        if $crate::logger::is_debug_enabled() {
            $crate::logger::emit($crate::logger::Level::Debug, format_args!($($arg)*));
        }
    };
}

static DEBUG_ENABLED: AtomicBool = AtomicBool::new(false);

/// Sets the global debug flag. Called once from `main` after argument parsing.
pub fn init(debug: bool) {
    DEBUG_ENABLED.store(debug, Ordering::Relaxed);
    log_debug!("Logger initialized in DEBUG mode");
}

/// `false` until `init(true)` runs, so unit tests stay quiet.
pub fn is_debug_enabled() -> bool {
    DEBUG_ENABLED.load(Ordering::Relaxed)
}

/// Writes one tagged line to stderr.
pub fn emit(level: Level, message: fmt::Arguments<'_>) {
    if let Some(line) = render(level, message) {
        eprintln!("{line}");
    }
}

// `None` means the line is filtered out at the current verbosity.
fn render(level: Level, message: fmt::Arguments<'_>) -> Option<String> {
    if level == Level::Debug && !is_debug_enabled() {
        return None;
    }
    Some(format!("{} {}", level.tag(), message))
}
