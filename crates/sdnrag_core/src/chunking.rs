/// Default chunk budget in bytes. Log lines are short; this keeps several
/// complete lines per chunk without splitting any of them.
pub const DEFAULT_MAX_CHUNK_CHARS: usize = 500;

/// Split raw multi-line text into bounded-size chunks on line boundaries.
///
/// A running buffer accumulates whole lines while it stays within `max_len`;
/// a line that would overflow the budget flushes the buffer (trimmed) as one
/// chunk and starts the next buffer. The overflow check happens before any
/// line is forced into a chunk alone, so a single line longer than `max_len`
/// is emitted whole rather than split or truncated.
///
/// Pure and deterministic; empty input yields no chunks and no produced
/// chunk is empty after trimming.
pub fn split_lines(text: &str, max_len: usize) -> Vec<String> {
    let mut chunks = Vec::new();
    let mut buf = String::new();

    for line in text.lines() {
        if buf.len() + line.len() <= max_len {
            buf.push_str(line);
            buf.push('\n');
        } else {
            let flushed = buf.trim();
            if !flushed.is_empty() {
                chunks.push(flushed.to_string());
            }
            buf.clear();
            buf.push_str(line);
            buf.push('\n');
        }
    }

    let tail = buf.trim();
    if !tail.is_empty() {
        chunks.push(tail.to_string());
    }

    chunks
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn chunks_contain_only_complete_source_lines() {
        let text = (0..12)
            .map(|i| format!("line {i} with some padding"))
            .collect::<Vec<_>>()
            .join("\n");
        let chunks = split_lines(&text, 60);
        assert!(chunks.len() > 1);
        for chunk in &chunks {
            assert!(chunk.len() <= 60, "chunk over budget: {chunk:?}");
            for line in chunk.lines() {
                assert!(
                    text.lines().any(|l| l == line),
                    "partial line leaked: {line:?}"
                );
            }
        }
    }

    #[test]
    fn flush_happens_before_budget_overflow() {
        let a = "a".repeat(300);
        let b = "b".repeat(300);
        let chunks = split_lines(&format!("{a}\n{b}"), DEFAULT_MAX_CHUNK_CHARS);
        assert_eq!(chunks, vec![a, b]);
    }

    #[test]
    fn overlong_line_is_emitted_whole() {
        let long = "x".repeat(1200);
        let chunks = split_lines(&format!("short\n{long}\ntail"), 500);
        assert_eq!(chunks, vec!["short".to_string(), long, "tail".to_string()]);
    }

    #[test]
    fn chunks_reproduce_non_blank_lines_in_order() {
        let text = "alpha\n\nbeta\ngamma\n\n\ndelta";
        let chunks = split_lines(text, 12);
        let mut lines = Vec::new();
        for chunk in &chunks {
            for line in chunk.lines() {
                if !line.trim().is_empty() {
                    lines.push(line.to_string());
                }
            }
        }
        assert_eq!(lines, vec!["alpha", "beta", "gamma", "delta"]);
    }

    #[test]
    fn empty_and_whitespace_input_yield_no_chunks() {
        assert!(split_lines("", 500).is_empty());
        assert!(split_lines("\n\n   \n", 500).is_empty());
    }
}
