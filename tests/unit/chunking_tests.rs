/*!
 * Tests for transcript chunking
 */

use tubetrans::translation::chunking::{chunk_count, split};

#[test]
fn test_split_withEmptyText_shouldReturnNoChunks() {
    assert!(split("", 350).is_empty());
    assert_eq!(chunk_count("", 350), 0);
}

#[test]
fn test_split_withShortText_shouldReturnSingleChunk() {
    assert_eq!(split("short", 350), vec!["short"]);
}

#[test]
fn test_split_withVariousLengths_shouldCoverInputExactly() {
    let text = "The quick brown fox jumps over the lazy dog, again and again.";
    let length = text.chars().count();

    for max_len in [1, 2, 3, 7, 10, 60, 61, 62, 500] {
        let chunks = split(text, max_len);

        assert_eq!(chunks.len(), length.div_ceil(max_len), "max_len {}", max_len);
        assert!(chunks.iter().all(|c| c.chars().count() <= max_len));
        assert!(chunks.iter().all(|c| !c.is_empty()));
        assert_eq!(chunks.concat(), text);
        assert_eq!(chunk_count(text, max_len), chunks.len());
    }
}

#[test]
fn test_split_withMultibyteText_shouldNeverSplitCharacters() {
    let text = "日本語のテキストと émojis 🎉🎉 mixed";
    let chunks = split(text, 4);

    assert_eq!(chunks.concat(), text);
    assert!(chunks.iter().all(|c| c.chars().count() <= 4));
}

#[test]
fn test_split_shouldCutThroughWords() {
    assert_eq!(split("Hello World", 4), vec!["Hell", "o Wo", "rld"]);
}
