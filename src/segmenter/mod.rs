//! Pure text segmentation: normalized text in, ordered chunk strings out.
//!
//! Two interchangeable strategies are provided:
//!
//! * [`chunk_fixed_size`] — fixed-width character windows with overlap.
//! * [`chunk_by_sentences`] — sentence-boundary packing up to a character
//!   budget.
//!
//! Both are deterministic, side-effect free, and measure lengths in `char`
//! units while slicing on UTF-8 boundaries. [`SegmentParams`] tags a
//! parameter set with the strategy it drives so ingestion can dispatch on
//! one value.

mod fixed;
mod sentence;

pub use fixed::chunk_fixed_size;
pub use sentence::chunk_by_sentences;

use crate::types::{ChunksmithError, SplitStrategy};

/// Default window width for the fixed-size strategy, in characters.
pub const DEFAULT_CHUNK_SIZE: usize = 300;
/// Default overlap between adjacent fixed-size windows, in characters.
pub const DEFAULT_OVERLAP: usize = 50;
/// Default packing budget for the sentence-aware strategy, in characters.
pub const DEFAULT_MAX_CHARS: usize = 300;

/// Strategy selection plus the parameters that drive it.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SegmentParams {
    FixedSize { chunk_size: usize, overlap: usize },
    Sentence { max_chars: usize },
}

impl SegmentParams {
    /// Fixed-size strategy with the default window and overlap.
    #[must_use]
    pub fn fixed_size() -> Self {
        SegmentParams::FixedSize {
            chunk_size: DEFAULT_CHUNK_SIZE,
            overlap: DEFAULT_OVERLAP,
        }
    }

    /// Sentence-aware strategy with the default character budget.
    #[must_use]
    pub fn sentence() -> Self {
        SegmentParams::Sentence {
            max_chars: DEFAULT_MAX_CHARS,
        }
    }

    /// The strategy tag these parameters belong to.
    #[must_use]
    pub fn strategy(&self) -> SplitStrategy {
        match self {
            SegmentParams::FixedSize { .. } => SplitStrategy::FixedSize,
            SegmentParams::Sentence { .. } => SplitStrategy::Sentence,
        }
    }

    /// Runs the selected strategy over `text`.
    pub fn segment(&self, text: &str) -> Result<Vec<String>, ChunksmithError> {
        match *self {
            SegmentParams::FixedSize {
                chunk_size,
                overlap,
            } => chunk_fixed_size(text, chunk_size, overlap),
            SegmentParams::Sentence { max_chars } => chunk_by_sentences(text, max_chars),
        }
    }
}

impl Default for SegmentParams {
    fn default() -> Self {
        Self::fixed_size()
    }
}

/// Byte offset of every `char` boundary in `text`, with the trailing
/// `text.len()` appended, so windows counted in characters can slice safely.
pub(crate) fn char_boundaries(text: &str) -> Vec<usize> {
    let mut boundaries: Vec<usize> = text.char_indices().map(|(offset, _)| offset).collect();
    boundaries.push(text.len());
    boundaries
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn params_report_their_strategy() {
        assert_eq!(
            SegmentParams::fixed_size().strategy(),
            SplitStrategy::FixedSize
        );
        assert_eq!(SegmentParams::sentence().strategy(), SplitStrategy::Sentence);
    }

    #[test]
    fn segment_dispatches_to_the_selected_strategy() {
        let text = "abcdefghij";
        let fixed = SegmentParams::FixedSize {
            chunk_size: 4,
            overlap: 1,
        };
        assert_eq!(
            fixed.segment(text).unwrap(),
            vec!["abcd", "defg", "ghij", "j"]
        );

        let sentence = SegmentParams::Sentence { max_chars: 20 };
        assert_eq!(sentence.segment("One. Two.").unwrap(), vec!["One. Two."]);
    }

    #[test]
    fn boundaries_cover_multibyte_text() {
        let text = "aé🦀";
        let boundaries = char_boundaries(text);
        assert_eq!(boundaries, vec![0, 1, 3, 7]);
    }
}
