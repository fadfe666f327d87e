//! Fixed-width character windows with configurable overlap.

use super::char_boundaries;
use crate::types::ChunksmithError;

/// Slides a `chunk_size`-character window over `text`, advancing
/// `chunk_size - overlap` characters per step.
///
/// Each window's substring is trimmed of surrounding whitespace and dropped
/// if nothing remains, so the output holds only non-empty chunks in
/// left-to-right order. Adjacent chunks intentionally share `overlap`
/// characters at their boundary.
///
/// `chunk_size` must be positive and `overlap` strictly smaller than
/// `chunk_size`, otherwise the window could never advance; violations are
/// rejected with [`ChunksmithError::InvalidArgument`].
pub fn chunk_fixed_size(
    text: &str,
    chunk_size: usize,
    overlap: usize,
) -> Result<Vec<String>, ChunksmithError> {
    if chunk_size == 0 {
        return Err(ChunksmithError::InvalidArgument(
            "chunk_size must be greater than zero".into(),
        ));
    }
    if overlap >= chunk_size {
        return Err(ChunksmithError::InvalidArgument(format!(
            "overlap ({overlap}) must be smaller than chunk_size ({chunk_size})"
        )));
    }

    let boundaries = char_boundaries(text);
    let total_chars = boundaries.len() - 1;
    let step = chunk_size - overlap;

    let mut chunks = Vec::new();
    let mut start = 0;
    while start < total_chars {
        let end = (start + chunk_size).min(total_chars);
        let window = text[boundaries[start]..boundaries[end]].trim();
        if !window.is_empty() {
            chunks.push(window.to_string());
        }
        start += step;
    }
    Ok(chunks)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn windows_advance_by_size_minus_overlap() {
        // Offsets 0, 3, 6, 9 with a width-4 window.
        let chunks = chunk_fixed_size("abcdefghij", 4, 1).unwrap();
        assert_eq!(chunks, vec!["abcd", "defg", "ghij", "j"]);
    }

    #[test]
    fn zero_overlap_tiles_the_text() {
        let chunks = chunk_fixed_size("0123456789abcdefghij", 10, 0).unwrap();
        assert_eq!(chunks, vec!["0123456789", "abcdefghij"]);
    }

    #[test]
    fn windows_are_trimmed_and_empties_dropped() {
        // The middle window lands entirely on whitespace.
        let chunks = chunk_fixed_size("ab      cd", 4, 0).unwrap();
        assert_eq!(chunks, vec!["ab", "cd"]);
    }

    #[test]
    fn empty_input_yields_no_chunks() {
        assert!(chunk_fixed_size("", 300, 50).unwrap().is_empty());
        assert!(chunk_fixed_size("   \n\t  ", 300, 50).unwrap().is_empty());
    }

    #[test]
    fn consecutive_windows_share_overlap_characters() {
        let text = "abcdefghijklmnopqrst";
        let chunks = chunk_fixed_size(text, 8, 3).unwrap();
        for pair in chunks.windows(2) {
            // ASCII text, so byte slicing the last three characters is fine.
            let tail = &pair[0][pair[0].len() - 3..];
            assert!(pair[1].starts_with(tail));
        }
    }

    #[test]
    fn multibyte_text_is_counted_in_characters() {
        let text = "héllo wörld émoji 🦀🦀🦀";
        let chunks = chunk_fixed_size(text, 5, 2).unwrap();
        assert!(!chunks.is_empty());
        for chunk in &chunks {
            assert!(chunk.chars().count() <= 5);
            assert_eq!(chunk.trim(), chunk);
        }
    }

    #[test]
    fn bad_parameters_are_rejected() {
        assert!(matches!(
            chunk_fixed_size("abc", 0, 0),
            Err(ChunksmithError::InvalidArgument(_))
        ));
        assert!(matches!(
            chunk_fixed_size("abc", 4, 4),
            Err(ChunksmithError::InvalidArgument(_))
        ));
        assert!(matches!(
            chunk_fixed_size("abc", 4, 9),
            Err(ChunksmithError::InvalidArgument(_))
        ));
    }
}
