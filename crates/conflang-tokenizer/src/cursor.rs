//! Forward-only cursor over source text.

/// A cursor over a string slice that tracks its byte position.
///
/// The comment stripper and the line scanner both walk their input with it,
/// so every offset they report is a byte offset into the same string.
#[derive(Debug, Clone)]
pub struct Cursor<'src> {
    /// The full text being walked.
    source: &'src str,
    /// The remaining text (suffix of `source`).
    remaining: &'src str,
    /// Current byte position in `source`.
    pos: u32,
}

impl<'src> Cursor<'src> {
    /// Create a cursor positioned at the start of `source`.
    pub fn new(source: &'src str) -> Self {
        Self {
            source,
            remaining: source,
            pos: 0,
        }
    }

    /// Get the current byte position.
    #[inline]
    pub fn position(&self) -> u32 {
        self.pos
    }

    /// Check if we're at the end of input.
    #[inline]
    pub fn is_eof(&self) -> bool {
        self.remaining.is_empty()
    }

    /// Peek at the next character without consuming it.
    #[inline]
    pub fn peek(&self) -> Option<char> {
        self.remaining.chars().next()
    }

    /// Advance by one character and return it.
    #[inline]
    pub fn advance(&mut self) -> Option<char> {
        let c = self.peek()?;
        self.advance_by(c.len_utf8());
        Some(c)
    }

    /// Advance by n bytes. `n` must land on a char boundary.
    #[inline]
    pub fn advance_by(&mut self, n: usize) {
        self.pos += n as u32;
        self.remaining = &self.remaining[n..];
    }

    /// Skip to the end of the input.
    #[inline]
    pub fn advance_to_end(&mut self) {
        self.advance_by(self.remaining.len());
    }

    /// Check if the remaining text starts with the given prefix.
    #[inline]
    pub fn starts_with(&self, prefix: &str) -> bool {
        self.remaining.starts_with(prefix)
    }

    /// Byte distance from the cursor to the next occurrence of `needle`.
    #[inline]
    pub fn find(&self, needle: &str) -> Option<usize> {
        self.remaining.find(needle)
    }

    /// The text that has not been consumed yet.
    #[inline]
    pub fn rest(&self) -> &'src str {
        self.remaining
    }

    /// The text consumed since byte position `start`.
    #[inline]
    pub fn since(&self, start: u32) -> &'src str {
        &self.source[start as usize..self.pos as usize]
    }
}
