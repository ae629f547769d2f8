//! Helper utilities for CLI commands.

/// Truncate a string to at most `max` characters, adding "..." if truncated.
pub fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        s.to_string()
    } else {
        let kept: String = s.chars().take(max.saturating_sub(3)).collect();
        format!("{}...", kept)
    }
}

/// Collapse a page's text onto one line for summaries.
pub fn one_line(s: &str) -> String {
    s.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Format page indices as a compact list, e.g. "0, 2, 5".
pub fn format_indices(indices: &[usize]) -> String {
    if indices.is_empty() {
        return "none".to_string();
    }
    indices
        .iter()
        .map(|i| i.to_string())
        .collect::<Vec<_>>()
        .join(", ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate_is_char_safe() {
        assert_eq!(truncate("short", 10), "short");
        assert_eq!(truncate("héllo wörld", 8), "héllo...");
    }

    #[test]
    fn test_one_line() {
        assert_eq!(one_line("  Hello\n\nworld \t again "), "Hello world again");
    }

    #[test]
    fn test_format_indices() {
        assert_eq!(format_indices(&[]), "none");
        assert_eq!(format_indices(&[0, 2, 5]), "0, 2, 5");
    }
}
