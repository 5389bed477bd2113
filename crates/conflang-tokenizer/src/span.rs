//! Byte ranges into source text.

/// Half-open byte range `start..end` into a source string.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Span {
    /// First byte covered.
    pub start: u32,
    /// One past the last byte covered.
    pub end: u32,
}

impl Span {
    #[inline]
    pub fn new(start: u32, end: u32) -> Self {
        debug_assert!(start <= end, "span start {start} is past end {end}");
        Self { start, end }
    }

    /// Number of bytes covered.
    #[inline]
    pub fn len(&self) -> u32 {
        self.end - self.start
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// The smallest span that covers both `self` and `other`.
    #[inline]
    pub fn extend(&self, other: Span) -> Span {
        Span::new(self.start.min(other.start), self.end.max(other.end))
    }

    /// The text this span covers in `source`.
    ///
    /// Panics if the span is out of bounds or splits a UTF-8 sequence.
    #[inline]
    pub fn slice<'a>(&self, source: &'a str) -> &'a str {
        let range: std::ops::Range<usize> = (*self).into();
        &source[range]
    }
}

impl From<Span> for std::ops::Range<usize> {
    fn from(span: Span) -> Self {
        span.start as usize..span.end as usize
    }
}
