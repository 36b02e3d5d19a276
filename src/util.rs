// src/util.rs — Shared utility functions

/// Short preview of a string for log lines: at most `max_chars`
/// characters, with an ellipsis when anything was cut.
pub fn preview(s: &str, max_chars: usize) -> String {
    let mut out: String = s.chars().take(max_chars).collect();
    if s.chars().count() > max_chars {
        out.push('…');
    }
    out
}
