/// Pure string processing utilities (Discord-agnostic)

/// Check if a string is empty after trimming
pub fn is_empty_or_whitespace(text: &str) -> bool {
    text.trim().is_empty()
}

/// Split a message into chunks of at most `limit` characters, breaking at the
/// last newline before the limit so no line is ever truncated mid-entry.
/// A single line longer than the limit is hard-split at the limit.
pub fn split_message(text: &str, limit: usize) -> Vec<String> {
    let mut chunks = Vec::new();
    let mut remaining = text;

    while remaining.chars().count() > limit {
        let window_end = remaining
            .char_indices()
            .nth(limit)
            .map(|(i, _)| i)
            .unwrap_or(remaining.len());
        // A newline at index 0 would produce an empty chunk; hard-split instead
        let split_at = match remaining[..window_end].rfind('\n') {
            Some(i) if i > 0 => i,
            _ => window_end,
        };

        chunks.push(remaining[..split_at].to_string());
        remaining = remaining[split_at..].trim_start_matches('\n');
    }

    chunks.push(remaining.to_string());
    chunks
}
