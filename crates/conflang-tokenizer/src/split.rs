//! Depth-aware splitting of delimited sequences.
//!
//! Mapping bodies are split on `,` and array bodies on whitespace, but only
//! where the separator sits outside every bracket pair and every quoted span.
//! `{a={b=1,c=2},d=3}` therefore yields `a={b=1,c=2}` and `d=3`.
//!
//! A quote starts a quoted span only at the start of a token and only when
//! the same quote character appears again later. `o'brien` is a plain word.

use tracing::trace;

/// Bracket pairs that open and close a nesting level.
pub const BRACKETS: &[(char, char)] = &[('{', '}'), ('(', ')')];

/// Characters that open a quoted span closed by the same character.
pub const QUOTES: &[char] = &['"', '\''];

/// What a [`Splitter`] breaks its input on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Separator {
    /// A single character, such as `,`.
    Char(char),
    /// Any whitespace character.
    Whitespace,
}

impl Separator {
    #[inline]
    fn matches(self, c: char) -> bool {
        match self {
            Separator::Char(sep) => c == sep,
            Separator::Whitespace => c.is_whitespace(),
        }
    }
}

/// Splits text at top-level separators.
#[derive(Debug, Clone, Copy)]
pub struct Splitter {
    separator: Separator,
    brackets: &'static [(char, char)],
    quotes: &'static [char],
}

impl Splitter {
    /// Splits `key = value` pairs of a mapping body.
    pub const PAIRS: Splitter = Splitter::new(Separator::Char(','));

    /// Splits the items of a `(list ...)` body.
    pub const ITEMS: Splitter = Splitter::new(Separator::Whitespace);

    /// A splitter on `separator` that tracks [`BRACKETS`] and [`QUOTES`].
    pub const fn new(separator: Separator) -> Self {
        Self {
            separator,
            brackets: BRACKETS,
            quotes: QUOTES,
        }
    }

    /// Replace the tracked bracket pairs.
    pub const fn with_brackets(mut self, brackets: &'static [(char, char)]) -> Self {
        self.brackets = brackets;
        self
    }

    /// Replace the quote characters. An empty slice disables quote tracking.
    pub const fn with_quotes(mut self, quotes: &'static [char]) -> Self {
        self.quotes = quotes;
        self
    }

    /// Split `input` into trimmed, non-empty pieces.
    ///
    /// Depth is a signed counter: a stray closer drives it negative, and no
    /// further separator splits until it returns to zero. A quote in the middle
    /// of a word, or one that is never closed, is an ordinary character.
    pub fn split<'a>(&self, input: &'a str) -> Vec<&'a str> {
        let mut pieces = Vec::new();
        let mut depth: i32 = 0;
        let mut quote: Option<char> = None;
        let mut prev: Option<char> = None;
        let mut start = 0;

        for (idx, c) in input.char_indices() {
            if let Some(open) = quote {
                if c == open {
                    quote = None;
                }
                prev = Some(c);
                continue;
            }

            if self.quotes.contains(&c) && self.opens_quote(input, idx, c, prev) {
                quote = Some(c);
            } else if self.brackets.iter().any(|&(open, _)| open == c) {
                depth += 1;
            } else if self.brackets.iter().any(|&(_, close)| close == c) {
                depth -= 1;
            } else if depth == 0 && self.separator.matches(c) {
                push_piece(&mut pieces, &input[start..idx]);
                start = idx + c.len_utf8();
                prev = None;
                continue;
            }
            prev = Some(c);
        }
        push_piece(&mut pieces, &input[start..]);

        trace!("split {:?} into {:?}", input, pieces);
        pieces
    }

    /// Whether the quote `c` at `idx` opens a span: it must begin a token and
    /// have a closing partner further on.
    fn opens_quote(&self, input: &str, idx: usize, c: char, prev: Option<char>) -> bool {
        let starts_token = match prev {
            None => true,
            Some(p) => {
                p.is_whitespace()
                    || p == '='
                    || self.separator.matches(p)
                    || self.brackets.iter().any(|&(open, _)| open == p)
            }
        };
        starts_token && input[idx + c.len_utf8()..].contains(c)
    }
}

fn push_piece<'a>(pieces: &mut Vec<&'a str>, raw: &'a str) {
    let piece = raw.trim();
    if !piece.is_empty() {
        pieces.push(piece);
    }
}
