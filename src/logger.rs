//! Minimal process-wide logger.
//!
//! Messages go to stderr with a colored level prefix. Debug output is off
//! until [`init`] is called with `debug = true`.

use std::sync::atomic::{AtomicBool, Ordering};

static DEBUG_ENABLED: AtomicBool = AtomicBool::new(false);

/// Log severity, ordered from most to least verbose.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Level {
    Debug,
    Info,
    Warn,
    Error,
}

/// Initializes the logger. Safe to call more than once; the last call wins.
pub fn init(debug: bool) {
    DEBUG_ENABLED.store(debug, Ordering::Relaxed);
}

/// Returns `true` when debug-level messages are being printed.
pub fn is_debug_enabled() -> bool {
    DEBUG_ENABLED.load(Ordering::Relaxed)
}

/// Returns the colored prefix printed in front of a message of the given level.
pub fn prefix(level: Level) -> String {
    use colored::Colorize;
    match level {
        Level::Debug => "[DEBUG]".bright_black().to_string(),
        Level::Info => "[INFO]".bright_cyan().to_string(),
        Level::Warn => "[WARN]".bright_yellow().to_string(),
        Level::Error => "[ERROR]".bright_red().bold().to_string(),
    }
}

#[doc(hidden)]
pub fn write(level: Level, args: std::fmt::Arguments<'_>) {
    if level == Level::Debug && !is_debug_enabled() {
        return;
    }
    eprintln!("{} {}", prefix(level), args);
}

/// Logs a debug-level message. Printed only when debug output is enabled.
#[macro_export]
macro_rules! log_debug {
    ($($arg:tt)*) => {
        $crate::logger::write($crate::logger::Level::Debug, format_args!($($arg)*))
    };
}

/// Logs an info-level message.
#[macro_export]
macro_rules! log_info {
    ($($arg:tt)*) => {
        $crate::logger::write($crate::logger::Level::Info, format_args!($($arg)*))
    };
}

/// Logs a warning.
#[macro_export]
macro_rules! log_warn {
    ($($arg:tt)*) => {
        $crate::logger::write($crate::logger::Level::Warn, format_args!($($arg)*))
    };
}

/// Logs an error.
#[macro_export]
macro_rules! log_error {
    ($($arg:tt)*) => {
        $crate::logger::write($crate::logger::Level::Error, format_args!($($arg)*))
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn debug_switch_round_trips() {
        init(true);
        assert!(is_debug_enabled());
        init(false);
        assert!(!is_debug_enabled());
    }

    #[test]
    fn prefixes_name_their_level() {
        assert!(prefix(Level::Warn).contains("WARN"));
        assert!(prefix(Level::Error).contains("ERROR"));
    }
}
