/// ANSI color helper utilities for terminal output.
pub const RESET: &str = "\x1b[0m";

pub const GREY: &str = "\x1b[90m";

pub const RED: &str = "\x1b[31m";
pub const GREEN: &str = "\x1b[32m";

pub const YELLOW: &str = "\x1b[33m";
pub const CYAN: &str = "\x1b[36m";

/// Remaining-time color:
/// 0 → red
/// under `warn_below` → yellow
/// otherwise → green
pub fn color_for_remaining(value: i64, warn_below: i64) -> &'static str {
    if value <= 0 {
        RED
    } else if value < warn_below {
        YELLOW
    } else {
        GREEN
    }
}

/// Returns the value in grey when it carries no information ("--" or "00h 00m").
pub fn colorize_optional(value: &str) -> String {
    let v = value.trim();
    if v.is_empty() || v == "--" || v == "00h 00m" {
        format!("{GREY}{value}{RESET}")
    } else {
        value.to_string()
    }
}
