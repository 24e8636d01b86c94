use std::ops::Range;

use ratatui::{
    style::Style,
    text::{Line, Span},
};
use unicode_width::UnicodeWidthChar;

use crate::session::EditSession;
use crate::theme::Theme;

pub const DEFAULT_LABEL_WIDTH: usize = 120;
const TAB_WIDTH: usize = 4;

/// Char ranges the document view should mark.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Highlights {
    pub matches: Vec<Range<usize>>,
    pub current: Option<Range<usize>>,
}

impl Highlights {
    pub fn from_session(session: &EditSession) -> Self {
        Self {
            matches: session
                .matches()
                .entries()
                .iter()
                .map(|entry| entry.start..entry.end)
                .collect(),
            current: session.current().map(|entry| entry.start..entry.end),
        }
    }
}

#[derive(Debug)]
pub struct RenderResult {
    pub lines: Vec<Line<'static>>,
    pub total_lines: usize,
    /// Visual line on which the current sentence starts.
    pub focus_line: Option<usize>,
}

/// Row text for the match list: 1-based number, line breaks flattened,
/// long sentences cut to `width` chars ending in `...`.
pub fn list_label(index: usize, text: &str, width: usize) -> String {
    let flattened: String = text
        .chars()
        .map(|ch| if ch == '\n' || ch == '\r' { ' ' } else { ch })
        .collect();
    let display = if flattened.chars().count() > width {
        let mut cut: String = flattened.chars().take(width.saturating_sub(3)).collect();
        cut.push_str("...");
        cut
    } else {
        flattened
    };
    format!("{:>4}: {}", index + 1, display)
}

/// Zero-based (line, column) of a char offset, both counted in chars.
pub fn line_col(text: &str, offset: usize) -> (usize, usize) {
    let mut line = 0;
    let mut column = 0;
    for ch in text.chars().take(offset) {
        if ch == '\n' {
            line += 1;
            column = 0;
        } else {
            column += 1;
        }
    }
    (line, column)
}

/// Lays out `text` hard-wrapped at `width` columns with match and current
/// sentence styling applied.
pub fn render_document(
    text: &str,
    highlights: &Highlights,
    theme: &Theme,
    width: usize,
) -> RenderResult {
    let mut renderer = Renderer::new(width.max(1));
    let match_style = theme.match_style();
    let current_style = theme.current_style();
    let mut pending = highlights.matches.iter().peekable();

    for (offset, ch) in text.chars().enumerate() {
        while pending.next_if(|range| range.end <= offset).is_some() {}

        let in_current = highlights
            .current
            .as_ref()
            .is_some_and(|range| range.contains(&offset));
        if in_current && renderer.focus_line.is_none() {
            renderer.focus_line = Some(renderer.line_index());
        }

        let style = if in_current {
            current_style
        } else if pending.peek().is_some_and(|range| range.contains(&offset)) {
            match_style
        } else {
            Style::default()
        };
        renderer.push_char(ch, style);
    }

    renderer.finish()
}

struct Renderer {
    wrap_width: usize,
    lines: Vec<Line<'static>>,
    spans: Vec<Span<'static>>,
    segment: String,
    segment_style: Style,
    column: usize,
    focus_line: Option<usize>,
}

impl Renderer {
    fn new(wrap_width: usize) -> Self {
        Self {
            wrap_width,
            lines: Vec::new(),
            spans: Vec::new(),
            segment: String::new(),
            segment_style: Style::default(),
            column: 0,
            focus_line: None,
        }
    }

    fn line_index(&self) -> usize {
        self.lines.len()
    }

    fn push_char(&mut self, ch: char, style: Style) {
        match ch {
            '\r' => return,
            '\n' => {
                self.break_line();
                return;
            }
            _ => {}
        }

        let (glyph, width) = if ch == '\t' {
            (' ', TAB_WIDTH - self.column % TAB_WIDTH)
        } else {
            (ch, ch.width().unwrap_or(0))
        };

        if self.column > 0 && self.column + width > self.wrap_width {
            self.break_line();
        }
        if style != self.segment_style {
            self.flush_segment();
            self.segment_style = style;
        }
        if ch == '\t' {
            self.segment.extend(std::iter::repeat_n(glyph, width));
        } else {
            self.segment.push(glyph);
        }
        self.column += width;
    }

    fn flush_segment(&mut self) {
        if !self.segment.is_empty() {
            let text = std::mem::take(&mut self.segment);
            self.spans.push(Span::styled(text, self.segment_style));
        }
    }

    fn break_line(&mut self) {
        self.flush_segment();
        let spans = std::mem::take(&mut self.spans);
        self.lines.push(Line::from(spans));
        self.column = 0;
    }

    fn finish(mut self) -> RenderResult {
        self.break_line();
        let total_lines = self.lines.len();
        RenderResult {
            lines: self.lines,
            total_lines,
            focus_line: self.focus_line,
        }
    }
}
