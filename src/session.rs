use std::path::Path;

use tracing::{debug, info, warn};

use crate::document::Document;
use crate::error::{Result, SessionError};
use crate::segment::{Segmenter, SentenceSpan, UnicodeSegmenter};

mod filter;
mod matches;

pub use filter::{SearchTerms, apply_filter};
pub use matches::MatchSet;

/// What a [`EditSession::replace`] did, for the caller to re-render.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ReplaceOutcome {
    pub length_delta: isize,
    pub still_matches: bool,
    pub cursor: Option<usize>,
}

/// Document, match list, cursor and active terms, kept consistent with each
/// other across filters and edits.
pub struct EditSession {
    document: Document,
    matches: MatchSet,
    terms: SearchTerms,
    segmenter: Box<dyn Segmenter>,
}

impl EditSession {
    pub fn new(segmenter: Box<dyn Segmenter>) -> Self {
        Self {
            document: Document::new(),
            matches: MatchSet::new(),
            terms: SearchTerms::default(),
            segmenter,
        }
    }

    pub fn with_text(text: &str, segmenter: Box<dyn Segmenter>) -> Self {
        let mut session = Self::new(segmenter);
        session.reset(Document::from_text(text));
        session
    }

    pub fn document(&self) -> &Document {
        &self.document
    }

    pub fn document_text(&self) -> String {
        self.document.text()
    }

    pub fn matches(&self) -> &MatchSet {
        &self.matches
    }

    pub fn cursor(&self) -> Option<usize> {
        self.matches.cursor()
    }

    pub fn current(&self) -> Option<&SentenceSpan> {
        self.matches.current()
    }

    pub fn terms(&self) -> &SearchTerms {
        &self.terms
    }

    pub fn is_dirty(&self) -> bool {
        self.document.is_dirty()
    }

    /// Replaces the document with the file's contents and forgets all matches.
    pub fn load(&mut self, path: &Path) -> Result<()> {
        let document = Document::read_from(path).map_err(|err| {
            warn!(path = %path.display(), error = %err, "load failed");
            SessionError::io(path, err)
        })?;
        info!(path = %path.display(), chars = document.len_chars(), "loaded document");
        self.reset(document);
        Ok(())
    }

    pub fn save(&mut self, path: &Path) -> Result<()> {
        self.document.write_to(path).map_err(|err| {
            warn!(path = %path.display(), error = %err, "save failed");
            SessionError::io(path, err)
        })?;
        self.document.mark_clean();
        info!(path = %path.display(), chars = self.document.len_chars(), "saved document");
        Ok(())
    }

    /// Re-segments the document and keeps the sentences containing every
    /// word of `query`. Returns the number of matches.
    ///
    /// A blank query clears the matches without segmenting. On segmentation
    /// failure nothing changes.
    pub fn find_matches(&mut self, query: &str) -> Result<usize> {
        let terms = SearchTerms::parse(query);
        if terms.is_empty() {
            debug!("empty query, clearing matches");
            self.matches.clear();
            self.terms = terms;
            return Ok(0);
        }

        let text = self.document.text();
        let spans = self.segmenter.segment(&text).map_err(|err| {
            warn!(error = %err, "segmentation failed");
            SessionError::from(err)
        })?;
        let sentences = spans.len();
        self.matches = MatchSet::from_spans(apply_filter(&terms, spans));
        self.terms = terms;
        debug!(
            terms = ?self.terms.as_slice(),
            sentences,
            matches = self.matches.len(),
            "filter applied"
        );
        Ok(self.matches.len())
    }

    pub fn select_index(&mut self, index: usize) -> bool {
        self.matches.select_index(index)
    }

    pub fn next(&mut self) -> bool {
        self.matches.next()
    }

    pub fn previous(&mut self) -> bool {
        self.matches.previous()
    }

    /// Swaps the current sentence for `new_text` in the document and brings
    /// the match list back in line with the new offsets.
    ///
    /// Without a current match this does nothing and returns `Ok(None)`.
    pub fn replace(&mut self, new_text: &str) -> Result<Option<ReplaceOutcome>> {
        let Some(index) = self.matches.cursor() else {
            return Ok(None);
        };
        let Some(current) = self.matches.get(index) else {
            return Ok(None);
        };
        let (start, end) = (current.start, current.end);

        self.document.replace(start..end, new_text)?;

        let length_delta = new_text.chars().count() as isize - (end - start) as isize;
        let still_matches = self.terms.matches(new_text);
        self.matches.reconcile_edit(index, new_text, still_matches, length_delta);

        let outcome = ReplaceOutcome {
            length_delta,
            still_matches,
            cursor: self.matches.cursor(),
        };
        debug!(
            index,
            start,
            end,
            length_delta,
            still_matches,
            remaining = self.matches.len(),
            "replaced sentence"
        );
        Ok(Some(outcome))
    }

    fn reset(&mut self, document: Document) {
        self.document = document;
        self.matches.clear();
        self.terms = SearchTerms::default();
    }
}

impl Default for EditSession {
    fn default() -> Self {
        Self::new(Box::new(UnicodeSegmenter::default()))
    }
}

#[cfg(test)]
#[path = "session_tests.rs"]
mod session_tests;

#[cfg(test)]
#[path = "session/matches_tests.rs"]
mod matches_tests;
