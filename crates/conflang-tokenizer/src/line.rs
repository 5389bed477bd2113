//! Line scanning.

use crate::{Cursor, Span};

/// One physical line, with surrounding whitespace trimmed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Line<'src> {
    /// Trimmed text of the line.
    pub text: &'src str,
    /// Where the trimmed text sits in the scanned string.
    pub span: Span,
}

/// Iterator over the lines of a string.
///
/// Lines end at `\n`; a trailing `\r` is removed by trimming. A final
/// newline does not produce an extra empty line.
#[derive(Debug, Clone)]
pub struct Lines<'src> {
    cursor: Cursor<'src>,
}

impl<'src> Lines<'src> {
    /// Scan `text` line by line.
    pub fn new(text: &'src str) -> Self {
        Self {
            cursor: Cursor::new(text),
        }
    }
}

impl<'src> Iterator for Lines<'src> {
    type Item = Line<'src>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.cursor.is_eof() {
            return None;
        }

        let start = self.cursor.position();
        match self.cursor.find("\n") {
            Some(len) => self.cursor.advance_by(len),
            None => self.cursor.advance_to_end(),
        }
        let raw = self.cursor.since(start);
        if self.cursor.starts_with("\n") {
            self.cursor.advance_by(1);
        }

        let leading = raw.len() - raw.trim_start().len();
        let text = raw.trim();
        let begin = start + leading as u32;
        Some(Line {
            text,
            span: Span::new(begin, begin + text.len() as u32),
        })
    }
}
