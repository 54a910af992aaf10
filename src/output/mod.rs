// Output: stage artifacts on disk and terminal display.

pub mod artifacts;
pub mod terminal;

/// Truncate a string to at most `max_chars` characters, appending "..." if truncated.
///
/// Counts characters rather than bytes, so multi-byte input never panics
/// the way byte slicing would.
pub fn truncate_chars(text: &str, max_chars: usize) -> String {
    let char_count = text.chars().count();
    if char_count <= max_chars {
        text.to_string()
    } else {
        let truncated: String = text.chars().take(max_chars).collect();
        format!("{truncated}...")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate_chars_short_string_unchanged() {
        assert_eq!(truncate_chars("docker", 10), "docker");
    }

    #[test]
    fn test_truncate_chars_long_string_gets_ellipsis() {
        assert_eq!(truncate_chars("kubernetes", 4), "kube...");
    }

    #[test]
    fn test_truncate_chars_multibyte_safe() {
        assert_eq!(truncate_chars("héllo wörld", 5), "héllo...");
    }
}
