/// ANSI color helper utilities for terminal output.
pub const RESET: &str = "\x1b[0m";

pub const GREY: &str = "\x1b[90m";
pub const WHITE: &str = "\x1b[37m";

pub const RED: &str = "\x1b[31m";
pub const GREEN: &str = "\x1b[32m";

pub const YELLOW: &str = "\x1b[33m";
pub const BLUE: &str = "\x1b[34m";
pub const CYAN: &str = "\x1b[36m";
pub const MAGENTA: &str = "\x1b[35m";

/// Returns GREY when the field is empty (None or "" or "--"),
/// and RESET otherwise.
pub fn color_for_optional_field<T: AsRef<str>>(value: Option<T>) -> &'static str {
    match value {
        Some(v) if !v.as_ref().trim().is_empty() && v.as_ref() != "--" => RESET,
        _ => GREY,
    }
}

/// Color per run state:
/// running → green, paused → yellow, awaiting → grey.
pub fn color_for_run_state(state: &str) -> &'static str {
    match state {
        "running" => GREEN,
        "paused" => YELLOW,
        _ => GREY,
    }
}

/// Ritorna formattazione colorata de um valor opcional.
pub fn colorize_optional(value: &str) -> String {
    if value.trim().is_empty() || value.trim() == "--" || value.trim() == "00:00:00" {
        format!("{GREY}{value}{RESET}")
    } else {
        value.to_string()
    }
}
