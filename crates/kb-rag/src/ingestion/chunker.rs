//! Fixed-size overlapping text chunking

use super::router::ChunkingPolicy;

/// Split text into fixed-size overlapping chunks.
///
/// Chunk `i` starts at character offset `i * (chunk_size - overlap)` and
/// spans `chunk_size` characters; the final chunk may be shorter. For text
/// of L characters with L > overlap this yields
/// `ceil((L - overlap) / (chunk_size - overlap))` chunks.
pub fn chunk_text(text: &str, policy: &ChunkingPolicy) -> Vec<String> {
    let chars: Vec<char> = text.chars().collect();
    let step = policy.chunk_size - policy.overlap;

    let mut chunks = Vec::new();
    let mut start = 0usize;

    while start < chars.len() {
        let end = (start + policy.chunk_size).min(chars.len());
        chunks.push(chars[start..end].iter().collect());
        if end == chars.len() {
            break;
        }
        start += step;
    }

    chunks
}

#[cfg(test)]
mod tests {
    use super::*;

    fn expected_count(len: usize, policy: &ChunkingPolicy) -> usize {
        // ceil((L - O) / (C - O)) for L > O
        let step = policy.chunk_size - policy.overlap;
        (len - policy.overlap).div_ceil(step)
    }

    #[test]
    fn test_chunk_count_matches_formula() {
        let policy = ChunkingPolicy::new(1000, 200);

        for len in [201, 999, 1000, 1001, 1800, 1801, 5000, 12345] {
            let text: String = "a".repeat(len);
            let chunks = chunk_text(&text, &policy);
            assert_eq!(chunks.len(), expected_count(len, &policy), "len={}", len);
        }
    }

    #[test]
    fn test_chunk_offsets_and_overlap() {
        let policy = ChunkingPolicy::new(10, 3);
        let text: String = ('a'..='z').collect();

        let chunks = chunk_text(&text, &policy);

        // chunk i starts at i * (chunk_size - overlap)
        for (i, chunk) in chunks.iter().enumerate() {
            let start = i * (policy.chunk_size - policy.overlap);
            let expected: String = text.chars().skip(start).take(policy.chunk_size).collect();
            assert_eq!(chunk, &expected, "chunk {}", i);
        }

        // adjacent chunks share exactly `overlap` characters
        for pair in chunks.windows(2) {
            let tail: String = pair[0].chars().skip(policy.chunk_size - policy.overlap).collect();
            let head: String = pair[1].chars().take(policy.overlap).collect();
            assert_eq!(tail, head);
        }
    }

    #[test]
    fn test_all_full_size_except_last() {
        let policy = ChunkingPolicy::new(10, 3);
        let text = "a".repeat(25);

        let chunks = chunk_text(&text, &policy);
        for chunk in &chunks[..chunks.len() - 1] {
            assert_eq!(chunk.chars().count(), 10);
        }
        assert!(chunks.last().unwrap().chars().count() <= 10);
    }

    #[test]
    fn test_short_text_is_single_chunk() {
        let policy = ChunkingPolicy::new(1000, 200);
        let chunks = chunk_text("tiny", &policy);
        assert_eq!(chunks, vec!["tiny".to_string()]);
    }

    #[test]
    fn test_empty_text_yields_no_chunks() {
        let policy = ChunkingPolicy::new(1000, 200);
        assert!(chunk_text("", &policy).is_empty());
    }

    #[test]
    fn test_multibyte_boundaries() {
        let policy = ChunkingPolicy::new(4, 1);
        let text = "héllo wörld ünïcode";

        let chunks = chunk_text(text, &policy);
        for chunk in &chunks {
            assert!(chunk.chars().count() <= 4);
        }
        // reassembling without the overlaps reproduces the original
        let mut rebuilt: String = chunks[0].clone();
        for chunk in &chunks[1..] {
            rebuilt.extend(chunk.chars().skip(policy.overlap));
        }
        assert_eq!(rebuilt, text);
    }
}
