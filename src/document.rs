use std::{
    fs,
    io::{self, BufWriter, Write},
    ops::Range,
    path::Path,
};

use ropey::Rope;

use crate::error::EditError;

/// The full text being edited, addressed by character offset.
#[derive(Clone, Debug, Default)]
pub struct Document {
    text: Rope,
    dirty: bool,
}

impl Document {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_text(text: &str) -> Self {
        Self {
            text: Rope::from_str(text),
            dirty: false,
        }
    }

    /// Reads a UTF-8 file in full. Invalid UTF-8 is reported as
    /// [`io::ErrorKind::InvalidData`].
    pub fn read_from(path: &Path) -> io::Result<Self> {
        let content = fs::read_to_string(path)?;
        Ok(Self::from_text(&content))
    }

    /// Writes the whole document, overwriting `path`.
    pub fn write_to(&self, path: &Path) -> io::Result<()> {
        let file = fs::File::create(path)?;
        let mut writer = BufWriter::new(file);
        self.text.write_to(&mut writer)?;
        writer.flush()
    }

    pub fn len_chars(&self) -> usize {
        self.text.len_chars()
    }

    pub fn is_empty(&self) -> bool {
        self.text.len_chars() == 0
    }

    pub fn text(&self) -> String {
        self.text.to_string()
    }

    pub fn rope(&self) -> &Rope {
        &self.text
    }

    pub fn slice(&self, range: Range<usize>) -> Option<String> {
        if range.start > range.end || range.end > self.text.len_chars() {
            return None;
        }
        Some(self.text.slice(range).to_string())
    }

    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    pub fn mark_clean(&mut self) {
        self.dirty = false;
    }

    /// Replaces the half-open char range with `replacement`.
    ///
    /// The range is checked before anything is touched, so on error the
    /// document is unchanged.
    pub fn replace(&mut self, range: Range<usize>, replacement: &str) -> Result<(), EditError> {
        let len = self.text.len_chars();
        if range.start > range.end || range.end > len {
            return Err(EditError::RangeOutOfBounds {
                start: range.start,
                end: range.end,
                len,
            });
        }

        let start = range.start;
        if !range.is_empty() {
            self.text.remove(range);
        }
        if !replacement.is_empty() {
            self.text.insert(start, replacement);
        }
        self.dirty = true;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn replace_splices_char_range() {
        let mut document = Document::from_text("Cat runs. Dog runs fast.");
        document.replace(0..9, "A cat walks.").unwrap();
        assert_eq!(document.text(), "A cat walks. Dog runs fast.");
        assert!(document.is_dirty());
    }

    #[test]
    fn replace_uses_char_offsets_not_bytes() {
        let mut document = Document::from_text("Grüße aus Köln. Hallo.");
        assert_eq!(document.slice(0..15).as_deref(), Some("Grüße aus Köln."));
        document.replace(16..22, "Tschüss.").unwrap();
        assert_eq!(document.text(), "Grüße aus Köln. Tschüss.");
    }

    #[test]
    fn replace_with_empty_text_deletes() {
        let mut document = Document::from_text("One. Two. Three.");
        document.replace(5..10, "").unwrap();
        assert_eq!(document.text(), "One. Three.");
    }

    #[test]
    fn out_of_bounds_replace_leaves_document_untouched() {
        let mut document = Document::from_text("short");
        let err = document.replace(2..10, "x").unwrap_err();
        assert_eq!(
            err,
            EditError::RangeOutOfBounds {
                start: 2,
                end: 10,
                len: 5
            }
        );
        assert_eq!(document.text(), "short");
        assert!(!document.is_dirty());
    }

    #[test]
    fn slice_rejects_inverted_range() {
        let document = Document::from_text("abc");
        #[allow(clippy::reversed_empty_ranges)]
        let range = 2..1;
        assert_eq!(document.slice(range), None);
    }

    #[test]
    fn read_write_round_trip_is_byte_identical() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("notes.txt");
        let original = "line one.\r\nline two\n\nünïcödé. trailing";
        fs::write(&path, original).unwrap();

        let document = Document::read_from(&path).unwrap();
        document.write_to(&path).unwrap();

        assert_eq!(fs::read(&path).unwrap(), original.as_bytes());
    }

    #[test]
    fn read_rejects_invalid_utf8() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bad.txt");
        fs::write(&path, [0x66, 0x6f, 0xff, 0xfe]).unwrap();

        let err = Document::read_from(&path).unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::InvalidData);
    }
}
