/*!
 * Fixed-width transcript chunking.
 *
 * Chunks are measured in chars, never bytes, so a boundary never lands in the
 * middle of a UTF-8 sequence. Boundaries ignore words and sentences; a word
 * or preserved term may be cut in two.
 */

/// Split `text` into consecutive chunks of at most `max_len` chars
///
/// A `max_len` of zero is treated as one.
pub fn split(text: &str, max_len: usize) -> Vec<&str> {
    let max_len = max_len.max(1);
    let mut chunks = Vec::with_capacity(chunk_count(text, max_len));

    let mut start = 0;
    let mut count = 0;
    for (offset, _) in text.char_indices() {
        if count == max_len {
            chunks.push(&text[start..offset]);
            start = offset;
            count = 0;
        }
        count += 1;
    }
    if count > 0 {
        chunks.push(&text[start..]);
    }

    chunks
}

/// Number of chunks `split` will produce
pub fn chunk_count(text: &str, max_len: usize) -> usize {
    text.chars().count().div_ceil(max_len.max(1))
}
