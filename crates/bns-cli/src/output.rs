//! Output formatting utilities.

use serde_json::Value;

/// Formats a value as pretty JSON.
pub fn format_json(value: &Value) -> String {
    serde_json::to_string_pretty(value).unwrap_or_else(|_| "{}".to_string())
}

/// Formats a check verdict as a table row.
pub fn format_verdict_row(kind: &str, value: &str, accepted: bool, reason: Option<&str>) -> String {
    let verdict = if accepted { "ACCEPTED" } else { "REJECTED" };
    match reason {
        Some(reason) => format!("{:<12} {:<40} {:<9} {}", kind, truncate(value, 40), verdict, reason),
        None => format!("{:<12} {:<40} {}", kind, truncate(value, 40), verdict),
    }
}

fn truncate(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else {
        let kept: String = s.chars().take(max_len.saturating_sub(3)).collect();
        format!("{}...", kept)
    }
}

/// Reads a whole file, naming it in the error.
pub fn read_file(path: &str) -> Result<String, Box<dyn std::error::Error>> {
    std::fs::read_to_string(path).map_err(|e| format!("Failed to read file {}: {}", path, e).into())
}
