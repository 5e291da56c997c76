//! Helpers for ANSI-colored log lines
//!
//! The backend's log endpoint returns raw terminal output, escape codes
//! included. Rendering the colors is a presentation concern; filtering and
//! search must work on the visible text, so the escapes get stripped first.

use regex::Regex;
use std::sync::OnceLock;

/// CSI escape sequences (`ESC [ ... <final byte>`), which covers the SGR
/// color codes ansible emits
fn ansi_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"\x1b\[[0-9;?]*[ -/]*[@-~]").unwrap())
}

/// Whether the line contains any ANSI escape sequence
pub fn contains_ansi_codes(line: &str) -> bool {
    ansi_pattern().is_match(line)
}

/// Remove all ANSI escape sequences, leaving the visible text
pub fn strip_ansi_codes(line: &str) -> String {
    ansi_pattern().replace_all(line, "").into_owned()
}

/// Case-insensitive substring search over the visible (stripped) text
pub fn contains_word(line: &str, word: &str) -> bool {
    if word.is_empty() {
        return true;
    }
    strip_ansi_codes(line)
        .to_lowercase()
        .contains(&word.to_lowercase())
}
