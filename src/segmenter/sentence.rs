//! Sentence-aware packing up to a character budget.

use super::char_boundaries;
use crate::types::ChunksmithError;

/// Splits `text` at sentence boundaries and greedily packs sentences into
/// chunks of at most `max_chars` characters.
///
/// Whitespace runs (including newlines) are collapsed to single spaces
/// before splitting. A boundary is any `.`, `!`, or `?` followed by
/// whitespace — a heuristic, not grammatical parsing; abbreviations and
/// decimal points are not special-cased. The punctuation stays attached to
/// its sentence and the whitespace is consumed.
///
/// Packing joins sentences with a single space until the next sentence
/// would push the chunk past `max_chars`. A single sentence longer than
/// `max_chars` is flushed around and hard-split into consecutive
/// `max_chars`-character slices on its own; it never merges with
/// neighbors. A sentence of exactly `max_chars` characters is ordinary
/// packable text (the oversize check is strict).
pub fn chunk_by_sentences(text: &str, max_chars: usize) -> Result<Vec<String>, ChunksmithError> {
    if max_chars == 0 {
        return Err(ChunksmithError::InvalidArgument(
            "max_chars must be greater than zero".into(),
        ));
    }

    let cleaned = text.split_whitespace().collect::<Vec<_>>().join(" ");
    if cleaned.is_empty() {
        return Ok(Vec::new());
    }

    let mut chunks = Vec::new();
    let mut current = String::new();
    let mut current_chars = 0usize;

    for sentence in split_sentences(&cleaned) {
        let sentence = sentence.trim();
        if sentence.is_empty() {
            continue;
        }
        let sentence_chars = sentence.chars().count();

        if sentence_chars > max_chars {
            if !current.is_empty() {
                chunks.push(std::mem::take(&mut current));
                current_chars = 0;
            }
            hard_split(sentence, max_chars, &mut chunks);
            continue;
        }

        if !current.is_empty() && current_chars + 1 + sentence_chars > max_chars {
            chunks.push(std::mem::take(&mut current));
            current.push_str(sentence);
            current_chars = sentence_chars;
        } else {
            if !current.is_empty() {
                current.push(' ');
                current_chars += 1;
            }
            current.push_str(sentence);
            current_chars += sentence_chars;
        }
    }

    if !current.is_empty() {
        chunks.push(current);
    }
    Ok(chunks)
}

/// Splits at whitespace preceded by `.`, `!`, or `?`. The whitespace run is
/// consumed; everything else is preserved verbatim.
fn split_sentences(text: &str) -> Vec<&str> {
    let mut sentences = Vec::new();
    let mut start = 0;
    let mut iter = text.char_indices().peekable();

    while let Some((offset, ch)) = iter.next() {
        if !matches!(ch, '.' | '!' | '?') {
            continue;
        }
        let boundary = offset + ch.len_utf8();
        if !iter.peek().is_some_and(|&(_, next)| next.is_whitespace()) {
            continue;
        }
        sentences.push(&text[start..boundary]);
        while iter.peek().is_some_and(|&(_, next)| next.is_whitespace()) {
            iter.next();
        }
        start = iter.peek().map_or(text.len(), |&(offset, _)| offset);
    }

    if start < text.len() {
        sentences.push(&text[start..]);
    }
    sentences
}

/// Appends consecutive `max_chars`-character slices of an oversized
/// sentence, trimmed, dropping any slice that trims away to nothing.
fn hard_split(sentence: &str, max_chars: usize, chunks: &mut Vec<String>) {
    let boundaries = char_boundaries(sentence);
    let total_chars = boundaries.len() - 1;

    let mut start = 0;
    while start < total_chars {
        let end = (start + max_chars).min(total_chars);
        let slice = sentence[boundaries[start]..boundaries[end]].trim();
        if !slice.is_empty() {
            chunks.push(slice.to_string());
        }
        start = end;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_and_whitespace_input_yield_nothing() {
        assert!(chunk_by_sentences("", 300).unwrap().is_empty());
        assert!(chunk_by_sentences(" \n\t \r\n ", 300).unwrap().is_empty());
    }

    #[test]
    fn sentences_split_after_terminal_punctuation() {
        assert_eq!(
            split_sentences("Hi. World is big. X."),
            vec!["Hi.", "World is big.", "X."]
        );
        assert_eq!(split_sentences("One! Two? Three."), vec!["One!", "Two?", "Three."]);
        // No trailing whitespace after the final period, so no split there.
        assert_eq!(split_sentences("No boundary here"), vec!["No boundary here"]);
    }

    #[test]
    fn punctuation_without_following_whitespace_does_not_split() {
        assert_eq!(split_sentences("v1.2 is out. Really."), vec!["v1.2 is out.", "Really."]);
    }

    #[test]
    fn packs_greedily_and_hard_splits_oversized_sentences() {
        let chunks = chunk_by_sentences("Hi. World is big. X.", 10).unwrap();
        assert_eq!(chunks, vec!["Hi.", "World is b", "ig.", "X."]);
    }

    #[test]
    fn short_sentences_pack_into_one_chunk() {
        let chunks = chunk_by_sentences("Hi. X.", 10).unwrap();
        assert_eq!(chunks, vec!["Hi. X."]);
    }

    #[test]
    fn newlines_collapse_before_splitting() {
        let chunks = chunk_by_sentences("First\nsentence.\n\nSecond one.", 40).unwrap();
        assert_eq!(chunks, vec!["First sentence. Second one."]);
    }

    #[test]
    fn every_chunk_respects_the_budget() {
        let text = "Alpha beta gamma delta. Epsilon zeta eta theta iota kappa. \
                    Lambda mu. Nu xi omicron pi rho sigma tau upsilon phi chi psi omega.";
        for max_chars in [10, 25, 40] {
            for chunk in chunk_by_sentences(text, max_chars).unwrap() {
                assert!(
                    chunk.chars().count() <= max_chars,
                    "chunk {chunk:?} exceeds {max_chars}"
                );
            }
        }
    }

    #[test]
    fn sentence_exactly_at_budget_is_not_force_split() {
        // 10 characters including the period.
        let exact = "abcdefghi.";
        assert_eq!(exact.chars().count(), 10);
        let chunks = chunk_by_sentences(&format!("{exact} Tail."), 10).unwrap();
        assert_eq!(chunks, vec![exact.to_string(), "Tail.".to_string()]);
    }

    #[test]
    fn sentence_one_over_budget_is_always_force_split() {
        // 11 characters, budget 10: split into a 10-char head and 1-char tail.
        let over = "abcdefghij.";
        assert_eq!(over.chars().count(), 11);
        let chunks = chunk_by_sentences(&format!("Hi. {over} Bye."), 10).unwrap();
        assert_eq!(chunks, vec!["Hi.", "abcdefghij", ".", "Bye."]);
    }

    #[test]
    fn zero_budget_is_rejected() {
        assert!(matches!(
            chunk_by_sentences("Hi.", 0),
            Err(ChunksmithError::InvalidArgument(_))
        ));
    }
}
