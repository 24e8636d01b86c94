use crate::segment::SentenceSpan;

/// The filtered sentences in document order, plus the cursor into them.
#[derive(Clone, Debug, Default)]
pub struct MatchSet {
    entries: Vec<SentenceSpan>,
    cursor: Option<usize>,
}

impl MatchSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_spans(entries: Vec<SentenceSpan>) -> Self {
        Self {
            entries,
            cursor: None,
        }
    }

    pub fn entries(&self) -> &[SentenceSpan] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&SentenceSpan> {
        self.entries.get(index)
    }

    pub fn cursor(&self) -> Option<usize> {
        self.cursor
    }

    pub fn current(&self) -> Option<&SentenceSpan> {
        self.cursor.and_then(|idx| self.entries.get(idx))
    }

    pub fn clear(&mut self) {
        self.entries.clear();
        self.cursor = None;
    }

    pub fn select_index(&mut self, index: usize) -> bool {
        if index >= self.entries.len() {
            return false;
        }
        let changed = self.cursor != Some(index);
        self.cursor = Some(index);
        changed
    }

    pub fn next(&mut self) -> bool {
        match self.cursor {
            None if !self.entries.is_empty() => {
                self.cursor = Some(0);
                true
            }
            Some(idx) if idx + 1 < self.entries.len() => {
                self.cursor = Some(idx + 1);
                true
            }
            _ => false,
        }
    }

    pub fn previous(&mut self) -> bool {
        match self.cursor {
            Some(idx) if idx > 0 => {
                self.cursor = Some(idx - 1);
                true
            }
            _ => false,
        }
    }

    /// Records that the entry at `index` now reads `new_text` and moves every
    /// later entry by `length_delta` chars.
    ///
    /// An entry that no longer matches is dropped and the cursor is clamped
    /// to the remaining entries.
    pub(crate) fn reconcile_edit(
        &mut self,
        index: usize,
        new_text: &str,
        still_matches: bool,
        length_delta: isize,
    ) {
        let Some(edited) = self.entries.get_mut(index) else {
            return;
        };

        let shift_from = if still_matches {
            let start = edited.start;
            *edited = SentenceSpan::new(new_text, start, start + new_text.chars().count());
            index + 1
        } else {
            self.entries.remove(index);
            self.clamp_cursor();
            index
        };

        if length_delta != 0 {
            for entry in &mut self.entries[shift_from..] {
                entry.shift(length_delta);
            }
        }
    }

    fn clamp_cursor(&mut self) {
        self.cursor = match self.cursor {
            _ if self.entries.is_empty() => None,
            Some(idx) if idx >= self.entries.len() => Some(self.entries.len() - 1),
            other => other,
        };
    }
}
