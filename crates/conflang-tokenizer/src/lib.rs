//! Lexical layer for conflang.
//!
//! Everything here works on plain text: removing `<# ... #>` comments,
//! walking the result line by line, and splitting comma- or
//! whitespace-separated sequences without breaking nested `{}`/`()` groups.

mod span;
pub use span::Span;

mod cursor;
pub use cursor::Cursor;

mod comment;
pub use comment::{COMMENT_CLOSE, COMMENT_OPEN, Stripped, strip_comments};

mod line;
pub use line::{Line, Lines};

mod split;
pub use split::{BRACKETS, QUOTES, Separator, Splitter};
