// src/logger.rs
// =============================================================================
// Progress and diagnostic messages.
//
// Everything here goes to stderr: stdout only carries the report, so two runs
// over the same tree print byte-identical output.
//
// Usage:
//   log!("walk"; "reading files from {}", root.display());
//   debug!("validate"; "{} links on {}", n, path.display());   // --verbose only
// =============================================================================

use colored::Colorize;
use std::sync::atomic::{AtomicBool, Ordering};

// Global verbose flag (set by the --verbose CLI argument)
static VERBOSE: AtomicBool = AtomicBool::new(false);

pub fn set_verbose(verbose: bool) {
    VERBOSE.store(verbose, Ordering::SeqCst);
}

pub fn is_verbose() -> bool {
    VERBOSE.load(Ordering::SeqCst)
}

/// Log a message with a colored module prefix
#[macro_export]
macro_rules! log {
    ($module:expr; $($arg:tt)*) => {{
        $crate::logger::log($module, &format!($($arg)*))
    }};
}

/// Log a message only when --verbose is enabled
#[macro_export]
macro_rules! debug {
    ($module:expr; $($arg:tt)*) => {{
        if $crate::logger::is_verbose() {
            $crate::logger::log($module, &format!($($arg)*))
        }
    }};
}

pub fn log(module: &str, message: &str) {
    eprintln!("{} {}", prefix(module), message);
}

// "[walk]" in a color depending on the module
fn prefix(module: &str) -> String {
    let tag = format!("[{}]", module);
    match module {
        "error" => tag.red().bold().to_string(),
        "walk" => tag.cyan().to_string(),
        "validate" => tag.blue().to_string(),
        "report" => tag.green().to_string(),
        _ => tag.dimmed().to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prefix_keeps_module_name() {
        colored::control::set_override(false);
        assert_eq!(prefix("walk"), "[walk]");
        assert_eq!(prefix("anything"), "[anything]");
    }
}
