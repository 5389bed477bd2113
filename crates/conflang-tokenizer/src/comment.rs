//! Block comment removal.
//!
//! Comments are written `<# ... #>`, may span lines, and do not nest: the
//! first `#>` after an opener closes it. An opener without a closer swallows
//! the rest of the input.

use tracing::trace;

use crate::{Cursor, Lines, Span};

/// Opening delimiter of a block comment.
pub const COMMENT_OPEN: &str = "<#";
/// Closing delimiter of a block comment.
pub const COMMENT_CLOSE: &str = "#>";

/// Source text with every block comment removed.
///
/// Keeps a record of where comments were cut out so offsets into
/// [`Stripped::text`] can be mapped back onto the original source.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Stripped {
    text: String,
    cuts: Vec<Cut>,
}

/// A place in the stripped text where a comment used to be.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Cut {
    /// Offset in the stripped text.
    at: u32,
    /// Total bytes removed up to and including this cut.
    removed: u32,
}

impl Stripped {
    /// The comment-free text.
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Number of comments that were removed.
    pub fn comment_count(&self) -> usize {
        self.cuts.len()
    }

    /// Iterate over the trimmed lines of the comment-free text.
    pub fn lines(&self) -> Lines<'_> {
        Lines::new(&self.text)
    }

    /// Map an offset in the stripped text to an offset in the original source.
    ///
    /// An offset sitting exactly where a comment was removed maps to the
    /// first byte after that comment.
    pub fn original_offset(&self, offset: u32) -> u32 {
        let idx = self.cuts.partition_point(|cut| cut.at <= offset);
        offset + self.removed_before(idx)
    }

    /// Map a span in the stripped text onto the original source.
    ///
    /// The end is mapped so that a comment directly after the span is not
    /// pulled into it.
    pub fn original_span(&self, span: Span) -> Span {
        let start = self.original_offset(span.start);
        let idx = self.cuts.partition_point(|cut| cut.at < span.end);
        let end = span.end + self.removed_before(idx);
        Span::new(start, end.max(start))
    }

    fn removed_before(&self, idx: usize) -> u32 {
        match idx {
            0 => 0,
            n => self.cuts[n - 1].removed,
        }
    }
}

/// Remove every `<# ... #>` comment from `source`.
pub fn strip_comments(source: &str) -> Stripped {
    let mut cursor = Cursor::new(source);
    let mut stripped = Stripped {
        text: String::with_capacity(source.len()),
        cuts: Vec::new(),
    };
    let mut removed = 0u32;

    while !cursor.is_eof() {
        let Some(offset) = cursor.find(COMMENT_OPEN) else {
            stripped.text.push_str(cursor.rest());
            cursor.advance_to_end();
            break;
        };

        let chunk_start = cursor.position();
        cursor.advance_by(offset);
        stripped.text.push_str(cursor.since(chunk_start));

        let comment_start = cursor.position();
        cursor.advance_by(COMMENT_OPEN.len());
        match cursor.find(COMMENT_CLOSE) {
            Some(end) => cursor.advance_by(end + COMMENT_CLOSE.len()),
            None => {
                trace!("unterminated comment at {}", comment_start);
                cursor.advance_to_end();
            }
        }

        removed += cursor.position() - comment_start;
        stripped.cuts.push(Cut {
            at: stripped.text.len() as u32,
            removed,
        });
        trace!(
            "removed comment {:?}",
            Span::new(comment_start, cursor.position())
        );
    }

    stripped
}
