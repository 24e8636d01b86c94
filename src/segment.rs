//! Sentence segmentation.
//!
//! The session only relies on the [`Segmenter`] contract: spans come back in
//! increasing, non-overlapping start order with char offsets into the input.
//! Gaps between spans (whitespace, blank lines) are allowed.

use unicode_segmentation::UnicodeSegmentation;

use crate::error::SegmentationError;

pub const DEFAULT_LANGUAGE: &str = "en";

/// A sentence located in the document by char offsets `start..end`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SentenceSpan {
    pub text: String,
    pub start: usize,
    pub end: usize,
}

impl SentenceSpan {
    pub fn new(text: impl Into<String>, start: usize, end: usize) -> Self {
        Self {
            text: text.into(),
            start,
            end,
        }
    }

    pub fn len(&self) -> usize {
        self.end - self.start
    }

    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }

    pub(crate) fn shift(&mut self, delta: isize) {
        self.start = self.start.saturating_add_signed(delta);
        self.end = self.end.saturating_add_signed(delta);
    }
}

pub trait Segmenter {
    fn segment(&self, text: &str) -> Result<Vec<SentenceSpan>, SegmentationError>;
}

/// Splits on Unicode (UAX #29) sentence boundaries.
///
/// Leading and trailing whitespace is trimmed from every sentence and
/// whitespace-only pieces are dropped, so `"Cat runs. Dog"` yields
/// `("Cat runs.", 0, 9)` and `("Dog", 10, 13)`.
#[derive(Clone, Debug)]
pub struct UnicodeSegmenter {
    language: String,
}

impl UnicodeSegmenter {
    pub fn new(language: impl Into<String>) -> Self {
        Self {
            language: language.into(),
        }
    }

    pub fn language(&self) -> &str {
        &self.language
    }
}

impl Default for UnicodeSegmenter {
    fn default() -> Self {
        Self::new(DEFAULT_LANGUAGE)
    }
}

impl Segmenter for UnicodeSegmenter {
    fn segment(&self, text: &str) -> Result<Vec<SentenceSpan>, SegmentationError> {
        if !is_language_code(&self.language) {
            return Err(SegmentationError::UnsupportedLanguage(self.language.clone()));
        }

        let mut spans = Vec::new();
        let mut byte_pos = 0;
        let mut char_pos = 0;

        for (byte_idx, piece) in text.split_sentence_bound_indices() {
            char_pos += text[byte_pos..byte_idx].chars().count();
            byte_pos = byte_idx;

            let without_leading = piece.trim_start();
            let trimmed = without_leading.trim_end();
            if !trimmed.is_empty() {
                let leading_chars = piece[..piece.len() - without_leading.len()]
                    .chars()
                    .count();
                let start = char_pos + leading_chars;
                let end = start + trimmed.chars().count();
                spans.push(SentenceSpan::new(trimmed, start, end));
            }

            char_pos += piece.chars().count();
            byte_pos += piece.len();
        }

        Ok(spans)
    }
}

/// ISO 639 code with an optional region or script subtag: `en`, `de-AT`,
/// `zh-Hant`, or POSIX-style `en_US`.
fn is_language_code(code: &str) -> bool {
    let mut parts = code.split(['-', '_']);
    let Some(primary) = parts.next() else {
        return false;
    };
    if !(2..=3).contains(&primary.len()) || !primary.chars().all(|c| c.is_ascii_alphabetic()) {
        return false;
    }
    match (parts.next(), parts.next()) {
        (None, _) => true,
        (Some(subtag), None) => {
            (2..=8).contains(&subtag.len()) && subtag.chars().all(|c| c.is_ascii_alphanumeric())
        }
        _ => false,
    }
}
